mod errors;
mod models;

use crate::app_state::{AppState, LoginButton};
use crate::redirect::PageContext;
use crate::routes::login::errors::LoginErr;
use crate::routes::login::models::ProviderSummary;
use axum::extract::{Path, State};
use axum::http::header::{CACHE_CONTROL, EXPIRES, LOCATION, PRAGMA};
use axum::http::{HeaderValue, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use axum::{Json, Router};
use std::sync::Arc;

pub fn login_routes(buttons: &[LoginButton]) -> Router<AppState> {
    let router = Router::new()
        .route("/providers", get(list_providers))
        .route("/:button", get(unknown_button));
    buttons.iter().cloned().fold(router, register_button)
}

/// Registers one button under `/{id}` with its configuration bound to the handler.
pub fn register_button(router: Router<AppState>, button: LoginButton) -> Router<AppState> {
    let path = format!("/{}", button.id);
    let button = Arc::new(button);
    router.route(
        &path,
        get(
            move |State(app_state): State<AppState>, page: PageContext| async move {
                redirect_to_provider(&app_state, &button, &page)
            },
        ),
    )
}

fn redirect_to_provider(
    app_state: &AppState,
    button: &LoginButton,
    page: &PageContext,
) -> Result<Response, LoginErr> {
    let url = button.login_url(&app_state.config.base_url, page);
    tracing::debug!(
        button = %button.id,
        provider = ?button.provider.kind(),
        has_next = page.next().is_some(),
        "redirecting to identity provider"
    );
    see_other(&url)
}

fn see_other(location: &str) -> Result<Response, LoginErr> {
    let location = HeaderValue::from_str(location)
        .map_err(|_| LoginErr::InvalidLocation(location.to_string()))?;
    Ok((
        StatusCode::SEE_OTHER,
        [
            (LOCATION, location),
            (CACHE_CONTROL, HeaderValue::from_static("no-cache, no-store")),
            (PRAGMA, HeaderValue::from_static("no-cache")),
            (EXPIRES, HeaderValue::from_static("-1")),
        ],
    )
        .into_response())
}

async fn unknown_button(Path(button): Path<String>) -> LoginErr {
    tracing::warn!(%button, "login requested for unknown button");
    LoginErr::UnknownButton(button)
}

async fn list_providers(State(app_state): State<AppState>) -> Json<Vec<ProviderSummary>> {
    let config = &app_state.config;
    let page = PageContext::default();
    let summaries = config
        .buttons
        .iter()
        .map(|button| ProviderSummary {
            id: button.id.clone(),
            provider: button.provider.kind(),
            login_url: button.login_url(&config.base_url, &page),
        })
        .collect();
    Json(summaries)
}
