use crate::providers::merge_extras;
use crate::redirect::{QueryParams, RedirectRequest, StateField};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use url::Url;

pub const SAML_FIXED_PATH: &str = "/saml";

/// Where the SAML login starts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SamlEndpointPolicy<'a> {
    /// The application's `/saml` route.
    FixedPath,
    /// A configured URI, either root-relative or absolute.
    Configured(&'a str),
}

impl SamlEndpointPolicy<'_> {
    pub fn uri(&self) -> &str {
        match self {
            SamlEndpointPolicy::FixedPath => SAML_FIXED_PATH,
            SamlEndpointPolicy::Configured(uri) => uri,
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SamlProviderConfig {
    /// Overrides the fixed `/saml` start path when set.
    #[serde(default)]
    pub saml_uri: Option<String>,
    #[serde(default)]
    pub extra: BTreeMap<String, String>,
}

impl SamlProviderConfig {
    pub fn endpoint(&self) -> SamlEndpointPolicy<'_> {
        match self.saml_uri.as_deref() {
            Some(uri) => SamlEndpointPolicy::Configured(uri),
            None => SamlEndpointPolicy::FixedPath,
        }
    }
}

/// SAML carries the destination in `href` instead of `state`.
pub fn saml(base_url: &Url, config: &SamlProviderConfig, forwarded: QueryParams) -> RedirectRequest {
    let mut params = QueryParams::new();
    merge_extras(&mut params, &config.extra, forwarded);
    RedirectRequest::new(base_url.clone(), config.endpoint().uri(), params)
        .state_field(StateField::Href)
}
