mod common;

use crate::common::test_config;
use axum::body::Body;
use axum::http::header::LOCATION;
use axum::http::{Request, StatusCode};
use social_login_redirect::config::parse_buttons;
use social_login_redirect::{create_app, ConfigError, LoginButton};
use tower::ServiceExt;

fn github(id: &str) -> LoginButton {
    let raw = format!(r#"[{{"id": "{id}", "provider": "github", "client_id": "abc", "scope": ["user"]}}]"#);
    parse_buttons(&raw).unwrap().remove(0)
}

#[tokio::test]
async fn root_responds() {
    let (config, _) = test_config(3000);
    let res = create_app(config)
        .unwrap()
        .oneshot(Request::get("/").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(res.status(), StatusCode::OK);
}

#[tokio::test]
async fn login_redirect_without_network() {
    let (config, _) = test_config(3000);
    let res = create_app(config)
        .unwrap()
        .oneshot(
            Request::get("/login/saml?next=%2F")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(res.status(), StatusCode::SEE_OTHER);
    assert_eq!(
        res.headers()[LOCATION],
        "http://localhost:3000/saml?href=%2F"
    );
}

#[tokio::test]
async fn duplicate_buttons_are_rejected_before_routing() {
    let (mut config, _) = test_config(3000);
    config.buttons = vec![github("gh"), github("gh")];

    assert_eq!(
        create_app(config).err(),
        Some(ConfigError::DuplicateButton("gh".to_string()))
    );
}

#[tokio::test]
async fn reserved_button_id_is_rejected_before_routing() {
    let (mut config, _) = test_config(3000);
    config.buttons.push(github("providers"));

    assert_eq!(
        create_app(config).err(),
        Some(ConfigError::InvalidButtonId("providers".to_string()))
    );
}

#[tokio::test]
async fn base_url_with_query_is_rejected() {
    let (mut config, _) = test_config(3000);
    config.base_url = "https://app.example.com/?tenant=a".parse().unwrap();

    assert!(matches!(
        create_app(config).err(),
        Some(ConfigError::InvalidBaseUrl(_))
    ));
}
