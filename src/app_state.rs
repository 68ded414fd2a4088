pub use crate::providers::LoginButton;
use axum::extract::FromRef;
use std::net::SocketAddr;
use std::sync::Arc;
use url::Url;

#[derive(Clone, FromRef)]
pub struct AppState {
    pub config: Arc<Config>,
}

pub struct Config {
    /// Absolute URL the application is served under; callbacks and relative endpoints hang off it.
    pub base_url: Url,
    pub bind_addr: SocketAddr,
    pub buttons: Vec<LoginButton>,
}
