#![allow(dead_code)]

use social_login_redirect::config::{default_bind_addr, parse_buttons};
use social_login_redirect::{create_app, Config};
use std::sync::OnceLock;
use url::Url;

static LOG_INITIALIZED: OnceLock<()> = OnceLock::new();

pub const PROVIDERS: &str = r#"[
    {"id": "google", "provider": "google", "client_id": "google-client", "scope": ["email", "profile"],
     "extra": {"access_type": "online"}},
    {"id": "linkedin", "provider": "linkedin", "client_id": "linkedin-client", "scope": ["r_emailaddress"]},
    {"id": "github", "provider": "github", "client_id": "abc", "scope": ["user:email"]},
    {"id": "okta", "provider": "identity_provider", "client_id": "okta-client", "scope": ["openid", "email"],
     "authorize_uri": "https://dev-1.okta.com/oauth2/v1/authorize", "idp": "0oa1b2c3",
     "forward_query_params": true},
    {"id": "saml", "provider": "saml"},
    {"id": "corp-saml", "provider": "saml", "saml_uri": "https://sso.example.com/start?app=crm"}
]"#;

pub async fn start_test_server() -> TestConfig {
    LOG_INITIALIZED.get_or_init(|| {
        tracing_subscriber::fmt()
            .with_env_filter("social_login_redirect=debug,tower_http=debug")
            .init()
    });

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let port = listener.local_addr().unwrap().port();

    let (config, test_config) = test_config(port);
    let app = create_app(config).expect("test config is valid");
    tokio::spawn(async { axum::serve(listener, app).await.unwrap() });

    test_config
}

pub fn test_config(port: u16) -> (Config, TestConfig) {
    let mut base_url = Url::parse("http://localhost").unwrap();
    base_url.set_port(Some(port)).unwrap();

    let test_config = TestConfig {
        base_url: base_url.clone(),
        client: reqwest::Client::builder()
            .redirect(reqwest::redirect::Policy::none())
            .build()
            .unwrap(),
    };

    let config = Config {
        base_url,
        bind_addr: default_bind_addr(),
        buttons: parse_buttons(PROVIDERS).expect("valid provider fixture"),
    };
    (config, test_config)
}

pub struct TestConfig {
    pub base_url: Url,
    pub client: reqwest::Client,
}

impl TestConfig {
    pub fn url(&self, path_and_query: &str) -> Url {
        self.base_url.join(path_and_query).unwrap()
    }
}
