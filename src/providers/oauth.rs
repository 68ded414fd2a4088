use crate::providers::{merge_extras, IdentityProviderConfig, OAuthProviderConfig};
use crate::redirect::{QueryParams, RedirectRequest, StatePolicy};
use url::Url;

pub const GOOGLE_AUTHORIZE_URL: &str = "https://accounts.google.com/o/oauth2/auth";
pub const LINKEDIN_AUTHORIZE_URL: &str = "https://www.linkedin.com/uas/oauth2/authorization";
pub const GITHUB_AUTHORIZE_URL: &str = "https://github.com/login/oauth/authorize";

/// LinkedIn rejects authorization requests without a state, `/` included.
pub const LINKEDIN_DEFAULT_STATE: &str = "linkedin";

pub fn google(
    base_url: &Url,
    config: &OAuthProviderConfig,
    callback: &str,
    forwarded: QueryParams,
) -> RedirectRequest {
    let mut params = code_flow_params(config.client_id.as_str(), &config.scope_string(), callback);
    merge_extras(&mut params, &config.extra, forwarded);
    RedirectRequest::new(base_url.clone(), GOOGLE_AUTHORIZE_URL, params)
}

pub fn linkedin(
    base_url: &Url,
    config: &OAuthProviderConfig,
    callback: &str,
    forwarded: QueryParams,
) -> RedirectRequest {
    let mut params = code_flow_params(config.client_id.as_str(), &config.scope_string(), callback);
    merge_extras(&mut params, &config.extra, forwarded);
    RedirectRequest::new(base_url.clone(), LINKEDIN_AUTHORIZE_URL, params)
        .state_policy(StatePolicy::Fixed(LINKEDIN_DEFAULT_STATE))
}

/// GitHub's web flow has no `response_type`.
pub fn github(
    base_url: &Url,
    config: &OAuthProviderConfig,
    callback: &str,
    forwarded: QueryParams,
) -> RedirectRequest {
    let mut params = QueryParams::new();
    params
        .set("client_id", config.client_id.as_str())
        .set("scope", config.scope_string())
        .set("redirect_uri", callback);
    merge_extras(&mut params, &config.extra, forwarded);
    RedirectRequest::new(base_url.clone(), GITHUB_AUTHORIZE_URL, params)
}

pub fn identity_provider(
    base_url: &Url,
    config: &IdentityProviderConfig,
    callback: &str,
    forwarded: QueryParams,
) -> RedirectRequest {
    let mut params = code_flow_params(config.client_id.as_str(), &config.scope_string(), callback);
    if let Some(idp) = config.idp.as_deref().filter(|idp| !idp.is_empty()) {
        params.set("idp", idp);
    }
    merge_extras(&mut params, &config.extra, forwarded);
    RedirectRequest::new(base_url.clone(), config.authorize_uri.as_str(), params)
}

fn code_flow_params(client_id: &str, scope: &str, callback: &str) -> QueryParams {
    let mut params = QueryParams::new();
    params
        .set("client_id", client_id)
        .set("response_type", "code");
    if !scope.is_empty() {
        params.set("scope", scope);
    }
    params.set("redirect_uri", callback);
    params
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::providers::primitives::ClientId;
    use std::collections::HashMap;

    fn base() -> Url {
        "https://app.example.com/".parse().unwrap()
    }

    fn config(client_id: &str, scope: &[&str]) -> OAuthProviderConfig {
        OAuthProviderConfig {
            client_id: ClientId::new(client_id),
            scope: scope.iter().map(|s| s.to_string()).collect(),
            ..Default::default()
        }
    }

    fn pairs(url: &str) -> HashMap<String, String> {
        Url::parse(url)
            .unwrap()
            .query_pairs()
            .map(|(k, v)| (k.into_owned(), v.into_owned()))
            .collect()
    }

    #[test]
    fn google_uses_code_flow() {
        let request = google(
            &base(),
            &config("g-123", &["email", "profile"]),
            "https://app.example.com/callbacks/google",
            QueryParams::new(),
        );
        let url = request.to_absolute_url(Some("/inbox"));
        let query = pairs(&url);

        assert!(url.starts_with(GOOGLE_AUTHORIZE_URL));
        assert_eq!(query["client_id"], "g-123");
        assert_eq!(query["response_type"], "code");
        assert_eq!(query["scope"], "email profile");
        assert_eq!(
            query["redirect_uri"],
            "https://app.example.com/callbacks/google"
        );
        assert_eq!(query["state"], "/inbox");
    }

    #[test]
    fn linkedin_falls_back_to_fixed_state() {
        let request = linkedin(
            &base(),
            &config("li", &["r_emailaddress"]),
            "https://app.example.com/callbacks/linkedin",
            QueryParams::new(),
        );

        assert_eq!(pairs(&request.to_url(None))["state"], LINKEDIN_DEFAULT_STATE);
        assert_eq!(pairs(&request.to_url(Some("/jobs")))["state"], "/jobs");
    }

    #[test]
    fn github_omits_response_type() {
        let request = github(
            &base(),
            &config("abc", &["user:email"]),
            "https://app.example.com/callbacks/github",
            QueryParams::new(),
        );
        let url = request.to_url(Some("/profile"));

        assert!(url.starts_with("https://github.com/login/oauth/authorize?client_id=abc&scope=user%3Aemail&"));
        assert!(!pairs(&url).contains_key("response_type"));
        assert!(url.ends_with("&state=%2Fprofile"), "{url}");
    }

    #[test]
    fn identity_provider_passes_idp_hint() {
        let config = IdentityProviderConfig {
            authorize_uri: "https://dev-1.okta.com/oauth2/v1/authorize?display=page".to_string(),
            client_id: ClientId::new("okta-client"),
            scope: vec!["openid".to_string(), "email".to_string()],
            idp: Some("0oa1b2c3".to_string()),
            ..Default::default()
        };
        let request = identity_provider(
            &base(),
            &config,
            "https://app.example.com/callbacks/okta",
            QueryParams::new(),
        );
        let url = request.to_absolute_url(None);
        let query = pairs(&url);

        assert_eq!(url.matches('?').count(), 1, "{url}");
        assert_eq!(query["display"], "page");
        assert_eq!(query["idp"], "0oa1b2c3");
        assert_eq!(query["scope"], "openid email");
        assert_eq!(query["state"], "/");
    }
}
