// Mock exchange HTTP server
// Exposes the execution simulator over the form-encoded order protocol

pub mod auth;
pub mod error;
pub mod handlers;
pub mod router;
pub mod state;

pub use auth::{AuthError, Authenticator};
pub use error::ApiError;
pub use router::create_router;
pub use state::AppState;

use crate::config::Config;
use crate::error::{TradingError, TradingResult};
use crate::exchange::{ExecutionSimulator, JitterPriceOracle};
use axum::Router;
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::TcpListener;
use tracing::{error, info};

pub struct MockExchange {
    simulator: Arc<ExecutionSimulator>,
    authenticator: Option<Arc<Authenticator>>,
}

impl MockExchange {
    pub fn new(simulator: Arc<ExecutionSimulator>, authenticator: Option<Authenticator>) -> Self {
        Self {
            simulator,
            authenticator: authenticator.map(Arc::new),
        }
    }

    /// Exchange with a jitter oracle built from the `[market]` table
    pub fn from_config(config: &Config) -> Self {
        let oracle = JitterPriceOracle::new(config.market.oracle_config());
        let simulator = Arc::new(ExecutionSimulator::new(Arc::new(oracle)));
        Self::new(simulator, Authenticator::from_config(config))
    }

    pub fn simulator(&self) -> Arc<ExecutionSimulator> {
        Arc::clone(&self.simulator)
    }

    pub fn router(&self) -> Router {
        create_router(AppState::new(self.simulator()), self.authenticator.clone())
    }

    async fn bind(addr: &str) -> TradingResult<TcpListener> {
        TcpListener::bind(addr)
            .await
            .map_err(|e| TradingError::ServerStartup(format!("{}: {}", addr, e)))
    }

    /// Start serving on a background task; returns once the port is bound
    pub async fn spawn(self, addr: &str) -> TradingResult<SocketAddr> {
        let listener = Self::bind(addr).await?;
        let local_addr = listener.local_addr()?;
        let app = self.router();

        tokio::spawn(async move {
            if let Err(e) = axum::serve(listener, app).await {
                error!("[MOCK EXCHANGE] server stopped: {}", e);
            }
        });

        info!("[MOCK EXCHANGE] Ready on http://{}", local_addr);
        Ok(local_addr)
    }

    /// Serve in the foreground until Ctrl-C
    pub async fn run(self, addr: &str) -> TradingResult<()> {
        let listener = Self::bind(addr).await?;
        let local_addr = listener.local_addr()?;
        info!(
            "[MOCK EXCHANGE] Starting on http://{} (signature checks {})",
            local_addr,
            if self.authenticator.is_some() { "on" } else { "off" }
        );

        let simulator = self.simulator();
        axum::serve(listener, self.router())
            .with_graceful_shutdown(async {
                let _ = tokio::signal::ctrl_c().await;
            })
            .await?;

        info!(
            "[MOCK EXCHANGE] Stopped after {} orders (last orderId={})",
            simulator.len(),
            simulator.last_order_id()
        );
        Ok(())
    }
}
