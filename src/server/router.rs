use crate::client::{ORDER_ENDPOINT, TIME_ENDPOINT};
use crate::server::auth::{self, Authenticator};
use crate::server::handlers;
use crate::server::state::AppState;
use axum::{
    middleware,
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use tower_http::trace::TraceLayer;

/// Build the mock exchange routes.
///
/// With an authenticator, every order route is signature checked before
/// it reaches its handler; the time endpoint always stays public.
pub fn create_router(state: AppState, authenticator: Option<Arc<Authenticator>>) -> Router {
    let mut order_routes = Router::new().route(
        ORDER_ENDPOINT,
        post(handlers::place_order).get(handlers::get_order),
    );

    if let Some(authenticator) = authenticator {
        order_routes = order_routes.route_layer(middleware::from_fn_with_state(
            authenticator,
            auth::verify_signature,
        ));
    }

    Router::new()
        .merge(order_routes)
        .route(TIME_ENDPOINT, get(handlers::server_time))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
