//! Typed login-button configuration and the per-provider redirect constructors.

pub mod oauth;
pub mod primitives;
pub mod saml;

use crate::providers::primitives::{ButtonId, ClientId};
use crate::redirect::{callback_uri, PageContext, QueryParams, RedirectRequest, RESERVED_PARAMS};
pub use saml::SamlEndpointPolicy;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use url::Url;

/// One login entry point: a provider configuration registered under its own route.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginButton {
    pub id: ButtonId,
    #[serde(flatten)]
    pub provider: ProviderConfig,
    /// Copy non-reserved query parameters of the login page onto the provider URL.
    #[serde(default)]
    pub forward_query_params: bool,
}

impl LoginButton {
    pub fn new(id: ButtonId, provider: ProviderConfig) -> Self {
        LoginButton {
            id,
            provider,
            forward_query_params: false,
        }
    }

    pub fn forward_query_params(self, forward_query_params: bool) -> Self {
        Self {
            forward_query_params,
            ..self
        }
    }

    pub fn redirect_request(&self, base_url: &Url, page: &PageContext) -> RedirectRequest {
        let forwarded = if self.forward_query_params {
            page.forwardable_params()
        } else {
            QueryParams::new()
        };
        let callback = callback_uri(base_url, self.id.as_str());
        match &self.provider {
            ProviderConfig::Google(config) => oauth::google(base_url, config, &callback, forwarded),
            ProviderConfig::Linkedin(config) => {
                oauth::linkedin(base_url, config, &callback, forwarded)
            }
            ProviderConfig::Github(config) => oauth::github(base_url, config, &callback, forwarded),
            ProviderConfig::IdentityProvider(config) => {
                oauth::identity_provider(base_url, config, &callback, forwarded)
            }
            ProviderConfig::Saml(config) => saml::saml(base_url, config, forwarded),
        }
    }

    /// Fully-qualified provider URL for a login started from `page`.
    pub fn login_url(&self, base_url: &Url, page: &PageContext) -> String {
        self.redirect_request(base_url, page)
            .to_absolute_url(page.next().as_deref())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "provider", rename_all = "snake_case")]
pub enum ProviderConfig {
    Google(OAuthProviderConfig),
    Linkedin(OAuthProviderConfig),
    Github(OAuthProviderConfig),
    IdentityProvider(IdentityProviderConfig),
    Saml(saml::SamlProviderConfig),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProviderKind {
    Google,
    Linkedin,
    Github,
    IdentityProvider,
    Saml,
}

const OAUTH_REQUIRED: &[&str] = &["client_id", "scope"];
const IDENTITY_PROVIDER_REQUIRED: &[&str] = &["client_id", "authorize_uri"];
const SAML_REQUIRED: &[&str] = &[];

impl ProviderConfig {
    pub fn kind(&self) -> ProviderKind {
        match self {
            ProviderConfig::Google(_) => ProviderKind::Google,
            ProviderConfig::Linkedin(_) => ProviderKind::Linkedin,
            ProviderConfig::Github(_) => ProviderKind::Github,
            ProviderConfig::IdentityProvider(_) => ProviderKind::IdentityProvider,
            ProviderConfig::Saml(_) => ProviderKind::Saml,
        }
    }

    pub fn required_fields(&self) -> &'static [&'static str] {
        match self.kind() {
            ProviderKind::Google | ProviderKind::Linkedin | ProviderKind::Github => OAUTH_REQUIRED,
            ProviderKind::IdentityProvider => IDENTITY_PROVIDER_REQUIRED,
            ProviderKind::Saml => SAML_REQUIRED,
        }
    }

    /// Declared required fields that are absent or blank.
    pub fn missing_fields(&self) -> Vec<&'static str> {
        let mut missing: Vec<&'static str> = self
            .required_fields()
            .iter()
            .copied()
            .filter(|field| !self.has_field(field))
            .collect();
        if let ProviderConfig::Saml(config) = self {
            if let SamlEndpointPolicy::Configured(uri) = config.endpoint() {
                if uri.trim().is_empty() {
                    missing.push("saml_uri");
                }
            }
        }
        missing
    }

    fn has_field(&self, field: &str) -> bool {
        match (self, field) {
            (
                ProviderConfig::Google(config)
                | ProviderConfig::Linkedin(config)
                | ProviderConfig::Github(config),
                "client_id",
            ) => !config.client_id.as_str().trim().is_empty(),
            (
                ProviderConfig::Google(config)
                | ProviderConfig::Linkedin(config)
                | ProviderConfig::Github(config),
                "scope",
            ) => !config.scope_string().is_empty(),
            (ProviderConfig::IdentityProvider(config), "client_id") => {
                !config.client_id.as_str().trim().is_empty()
            }
            (ProviderConfig::IdentityProvider(config), "authorize_uri") => {
                !config.authorize_uri.trim().is_empty()
            }
            _ => false,
        }
    }
}

/// Google, LinkedIn and GitHub share the same client record.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct OAuthProviderConfig {
    #[serde(default)]
    pub client_id: ClientId,
    #[serde(default)]
    pub scope: Vec<String>,
    #[serde(default)]
    pub extra: BTreeMap<String, String>,
}

impl OAuthProviderConfig {
    pub fn scope_string(&self) -> String {
        join_scope(&self.scope)
    }
}

/// A generic OAuth identity provider (Okta, Azure AD, ...) reached through its own endpoint.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct IdentityProviderConfig {
    #[serde(default)]
    pub authorize_uri: String,
    #[serde(default)]
    pub client_id: ClientId,
    #[serde(default)]
    pub scope: Vec<String>,
    pub idp: Option<String>,
    #[serde(default)]
    pub extra: BTreeMap<String, String>,
}

impl IdentityProviderConfig {
    pub fn scope_string(&self) -> String {
        join_scope(&self.scope)
    }
}

fn join_scope(scope: &[String]) -> String {
    scope
        .iter()
        .map(|s| s.trim())
        .filter(|s| !s.is_empty())
        .collect::<Vec<_>>()
        .join(" ")
}

/// Adds configured extras and forwarded page parameters below the provider's own fields.
fn merge_extras(params: &mut QueryParams, extra: &BTreeMap<String, String>, forwarded: QueryParams) {
    for (key, value) in extra {
        if !RESERVED_PARAMS.contains(&key.as_str()) {
            params.set_if_absent(key.as_str(), value.as_str());
        }
    }
    for (key, value) in forwarded.iter() {
        params.set_if_absent(key, value);
    }
}
