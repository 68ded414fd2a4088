//! Outbound authorization-redirect URLs.
//!
//! The user's requested destination (`next`) travels to the identity provider inside a single
//! redirect-preservation parameter, `state` for OAuth and `href` for SAML, and is echoed back to
//! the application's callback.

mod page;
mod params;

pub use page::PageContext;
pub use params::QueryParams;

use url::Url;

/// Fallback for the state field when the page carries no `next`.
pub const DEFAULT_STATE: &str = "/";

/// Parameters that are owned by the login flow and never copied from the incoming page.
pub const RESERVED_PARAMS: [&str; 7] = [
    "client_id",
    "response_type",
    "scope",
    "redirect_uri",
    "state",
    "href",
    "next",
];

/// Name of the parameter carrying `next` to the identity provider.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StateField {
    State,
    Href,
}

impl StateField {
    pub fn as_str(&self) -> &'static str {
        match self {
            StateField::State => "state",
            StateField::Href => "href",
        }
    }
}

/// What the state field holds when there is no `next`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatePolicy {
    /// The application root, `/`.
    Root,
    /// A provider-specific literal, for providers that reject a bare `/`.
    Fixed(&'static str),
}

impl StatePolicy {
    pub fn fallback(&self) -> &'static str {
        match self {
            StatePolicy::Root => DEFAULT_STATE,
            StatePolicy::Fixed(literal) => *literal,
        }
    }
}

/// Returns the decoded `next` parameter of `query_string`, if present and non-empty.
///
/// A leading `?` is accepted. When `next` is repeated the first occurrence wins.
pub fn extract_next(query_string: &str) -> Option<String> {
    page::parse_pairs(query_string)
        .into_iter()
        .find(|(key, _)| key == "next")
        .map(|(_, value)| value)
        .filter(|value| !value.is_empty())
}

/// Appends `params` to `endpoint`, carrying `next` in `state` (or `/` when absent).
pub fn build_url(endpoint: &str, params: QueryParams, next: Option<&str>) -> String {
    build_url_with(endpoint, params, next, StateField::State, StatePolicy::Root)
}

pub fn build_url_with(
    endpoint: &str,
    mut params: QueryParams,
    next: Option<&str>,
    field: StateField,
    policy: StatePolicy,
) -> String {
    match next.filter(|next| !next.is_empty()) {
        Some(next) => {
            params.set(field.as_str(), next);
        }
        None => {
            params.set_if_absent(field.as_str(), policy.fallback());
        }
    }
    append_query(endpoint, &params.to_query_string())
}

fn append_query(endpoint: &str, query: &str) -> String {
    let (base, fragment) = match endpoint.find('#') {
        Some(index) => endpoint.split_at(index),
        None => (endpoint, ""),
    };
    if query.is_empty() {
        return endpoint.to_string();
    }
    let separator = if !base.contains('?') {
        "?"
    } else if base.ends_with('?') || base.ends_with('&') {
        ""
    } else {
        "&"
    };
    format!("{base}{separator}{query}{fragment}")
}

/// Prefixes a root-relative `path` with the application base URL.
///
/// Absolute URLs pass through untouched. The base URL's own path is kept, so an application
/// mounted under `/app` gets `/app/saml` for `/saml`.
///
/// Only the scheme, authority and path of the base take part; its query and fragment are dropped.
pub fn resolve_endpoint(base_url: &Url, path: &str) -> String {
    if path.starts_with('/') && !path.starts_with("//") {
        let mut base = base_url.clone();
        base.set_query(None);
        base.set_fragment(None);
        format!("{}{}", base.as_str().trim_end_matches('/'), path)
    } else {
        path.to_string()
    }
}

/// The local callback the identity provider returns to, `{base}/callbacks/{provider}`.
pub fn callback_uri(base_url: &Url, provider: &str) -> String {
    resolve_endpoint(base_url, &format!("/callbacks/{provider}"))
}

/// One provider redirect, assembled per login click and dropped after navigation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RedirectRequest {
    base_url: Url,
    authorize_endpoint: String,
    params: QueryParams,
    state_field: StateField,
    state_policy: StatePolicy,
}

impl RedirectRequest {
    pub fn new(base_url: Url, authorize_endpoint: impl Into<String>, params: QueryParams) -> Self {
        RedirectRequest {
            base_url,
            authorize_endpoint: authorize_endpoint.into(),
            params,
            state_field: StateField::State,
            state_policy: StatePolicy::Root,
        }
    }

    pub fn state_field(self, state_field: StateField) -> Self {
        Self {
            state_field,
            ..self
        }
    }

    pub fn state_policy(self, state_policy: StatePolicy) -> Self {
        Self {
            state_policy,
            ..self
        }
    }

    pub fn params(&self) -> &QueryParams {
        &self.params
    }

    /// Builds the redirect against the endpoint exactly as configured.
    pub fn to_url(&self, next: Option<&str>) -> String {
        build_url_with(
            &self.authorize_endpoint,
            self.params.clone(),
            next,
            self.state_field,
            self.state_policy,
        )
    }

    /// Builds the redirect, resolving a root-relative endpoint against the base URL first.
    pub fn to_absolute_url(&self, next: Option<&str>) -> String {
        build_url_with(
            &resolve_endpoint(&self.base_url, &self.authorize_endpoint),
            self.params.clone(),
            next,
            self.state_field,
            self.state_policy,
        )
    }
}
