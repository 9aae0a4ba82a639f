// Web order API
// JSON front end over the exchange client, with a local order history

pub mod error;
pub mod handlers;

pub use error::WebError;

use crate::client::ExchangeClient;
use crate::error::{TradingError, TradingResult};
use crate::types::Order;
use axum::{
    routing::{get, post},
    Router,
};
use std::sync::{Arc, Mutex, PoisonError};
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;
use tracing::info;

pub const ORDER_PATH: &str = "/api/order";
pub const ORDERS_PATH: &str = "/api/orders";

#[derive(Clone)]
pub struct WebState {
    pub client: Arc<ExchangeClient>,
    history: Arc<Mutex<Vec<Order>>>,
}

impl WebState {
    pub fn new(client: ExchangeClient) -> Self {
        Self {
            client: Arc::new(client),
            history: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Append a placed order; history is never edited
    pub fn record(&self, order: Order) {
        self.history
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(order);
    }

    /// Placed orders, newest first
    pub fn history(&self) -> Vec<Order> {
        let history = self.history.lock().unwrap_or_else(PoisonError::into_inner);
        history.iter().rev().cloned().collect()
    }
}

pub fn create_web_router(state: WebState) -> Router {
    Router::new()
        .route(ORDER_PATH, post(handlers::place_order))
        .route(ORDERS_PATH, get(handlers::list_orders))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Serve the web API in the foreground until Ctrl-C
pub async fn run(state: WebState, addr: &str) -> TradingResult<()> {
    let listener = TcpListener::bind(addr)
        .await
        .map_err(|e| TradingError::ServerStartup(format!("{}: {}", addr, e)))?;
    info!(
        "Web order API on http://{} → exchange {}",
        listener.local_addr()?,
        state.client.base_url()
    );

    axum::serve(listener, create_web_router(state))
        .with_graceful_shutdown(async {
            let _ = tokio::signal::ctrl_c().await;
        })
        .await?;
    Ok(())
}
