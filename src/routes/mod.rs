use crate::app_state::{AppState, LoginButton};
use crate::routes::login::login_routes;
use axum::routing::get;
use axum::Router;

mod login;

pub fn main_router(buttons: &[LoginButton]) -> Router<AppState> {
    Router::new()
        .route("/", get(root))
        .nest("/login", login_routes(buttons))
}

async fn root() -> &'static str {
    "OK"
}
