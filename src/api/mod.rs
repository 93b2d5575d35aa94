pub mod health;
pub mod trades;

use crate::config::Config;
use crate::engine::TradeStore;
use axum::{routing::get, Router};
use tower_http::cors::{Any, CorsLayer};

#[derive(Clone)]
pub struct AppState {
    /// Records served by the mock backend, generated once per process start.
    pub store: TradeStore,
    pub config: Config,
}

impl AppState {
    pub fn new(store: TradeStore, config: Config) -> Self {
        Self { store, config }
    }
}

pub fn create_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/health", get(health::health))
        .route("/ready", get(health::ready))
        .route("/api/trades", get(trades::get_trades))
        .route("/api/trades/rows", get(trades::get_trade_rows))
        .route("/api/trades/:trade_id/:version", get(trades::get_trade))
        .layer(cors)
        .with_state(state)
}
