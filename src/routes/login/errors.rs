use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};

pub enum LoginErr {
    UnknownButton(String),
    InvalidLocation(String),
}

impl IntoResponse for LoginErr {
    fn into_response(self) -> Response {
        match self {
            LoginErr::UnknownButton(button) => (
                StatusCode::NOT_FOUND,
                format!("Unknown login provider: {button}"),
            )
                .into_response(),
            LoginErr::InvalidLocation(location) => {
                tracing::error!(%location, "built redirect is not a valid Location header");
                StatusCode::INTERNAL_SERVER_ERROR.into_response()
            }
        }
    }
}
