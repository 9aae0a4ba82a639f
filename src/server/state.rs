use crate::exchange::ExecutionSimulator;
use std::sync::Arc;

#[derive(Clone)]
pub struct AppState {
    pub simulator: Arc<ExecutionSimulator>,
}

impl AppState {
    pub fn new(simulator: Arc<ExecutionSimulator>) -> Self {
        Self { simulator }
    }
}
