pub mod app_state;
pub mod config;
pub mod providers;
pub mod redirect;
mod routes;

pub use app_state::{AppState, Config, LoginButton};
use axum::Router;
pub use config::ConfigError;
use std::sync::Arc;
use tower_http::trace::TraceLayer;

/// Validates `config` and builds the router with one route per login button.
pub fn create_app(config: Config) -> Result<Router, ConfigError> {
    config.validate()?;
    tracing::info!(
        base_url = %config.base_url,
        buttons = config.buttons.len(),
        "registering login buttons"
    );
    let router = routes::main_router(&config.buttons);
    let app_state = AppState {
        config: Arc::new(config),
    };
    Ok(router
        .layer(TraceLayer::new_for_http())
        .with_state(app_state))
}
