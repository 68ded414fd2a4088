use crate::providers::primitives::ButtonId;
use crate::providers::ProviderKind;
use crate::redirect::PageContext;
use async_trait::async_trait;
use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use serde::Serialize;
use std::convert::Infallible;

#[async_trait]
impl<S> FromRequestParts<S> for PageContext
where
    S: Send + Sync,
{
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        Ok(PageContext::new(parts.uri.query().unwrap_or_default()))
    }
}

#[derive(Serialize)]
pub struct ProviderSummary {
    pub id: ButtonId,
    pub provider: ProviderKind,
    /// Provider URL for a login with no `next`.
    pub login_url: String,
}
