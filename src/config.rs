use crate::app_state::Config;
use crate::providers::LoginButton;
use anyhow::Context;
use std::collections::HashSet;
use std::fmt;
use std::net::SocketAddr;
use std::path::Path;
use url::Url;

pub const BASE_URL_VAR: &str = "BASE_URL";
pub const BIND_ADDR_VAR: &str = "BIND_ADDR";
pub const LOGIN_PROVIDERS_VAR: &str = "LOGIN_PROVIDERS";

pub const DEFAULT_LOG_FILTER: &str = "social_login_redirect=info,tower_http=info";

/// Route segments under `/login` that a button id may not take.
const RESERVED_BUTTON_IDS: &[&str] = &["providers"];

pub fn default_bind_addr() -> SocketAddr {
    SocketAddr::from(([127, 0, 0, 1], 3000))
}

impl Config {
    /// Reads `BASE_URL`, `BIND_ADDR` and the `LOGIN_PROVIDERS` file, then validates the result.
    pub fn from_env() -> anyhow::Result<Self> {
        let base_url = std::env::var(BASE_URL_VAR)
            .with_context(|| format!("{BASE_URL_VAR} must be set"))?;
        let base_url: Url = base_url
            .parse()
            .with_context(|| format!("{BASE_URL_VAR} is not an absolute url: {base_url}"))?;

        let bind_addr = match std::env::var(BIND_ADDR_VAR) {
            Ok(addr) => addr
                .parse()
                .with_context(|| format!("{BIND_ADDR_VAR} is not a socket address: {addr}"))?,
            Err(_) => default_bind_addr(),
        };

        let providers_path = std::env::var(LOGIN_PROVIDERS_VAR)
            .with_context(|| format!("{LOGIN_PROVIDERS_VAR} must point to a provider file"))?;
        let buttons = load_buttons(Path::new(&providers_path))?;

        let config = Config {
            base_url,
            bind_addr,
            buttons,
        };
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.base_url.cannot_be_a_base()
            || self.base_url.query().is_some()
            || self.base_url.fragment().is_some()
        {
            return Err(ConfigError::InvalidBaseUrl(self.base_url.clone()));
        }
        let mut seen = HashSet::new();
        for button in &self.buttons {
            let id = button.id.as_str();
            if !button.id.is_path_safe() || RESERVED_BUTTON_IDS.contains(&id) {
                return Err(ConfigError::InvalidButtonId(id.to_string()));
            }
            if !seen.insert(id) {
                return Err(ConfigError::DuplicateButton(id.to_string()));
            }
            let missing = button.provider.missing_fields();
            if !missing.is_empty() {
                return Err(ConfigError::MissingRequiredFields {
                    button: id.to_string(),
                    fields: missing,
                });
            }
        }
        Ok(())
    }
}

pub fn load_buttons(path: &Path) -> anyhow::Result<Vec<LoginButton>> {
    let raw = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read provider file {}", path.display()))?;
    parse_buttons(&raw).with_context(|| format!("invalid provider file {}", path.display()))
}

pub fn parse_buttons(raw: &str) -> serde_json::Result<Vec<LoginButton>> {
    serde_json::from_str(raw)
}

#[derive(Debug, PartialEq, Eq)]
pub enum ConfigError {
    InvalidBaseUrl(Url),
    InvalidButtonId(String),
    DuplicateButton(String),
    MissingRequiredFields {
        button: String,
        fields: Vec<&'static str>,
    },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::InvalidBaseUrl(url) => {
                write!(f, "base url must be hierarchical with no query or fragment: {url}")
            }
            ConfigError::InvalidButtonId(id) => write!(f, "invalid button id: {id:?}"),
            ConfigError::DuplicateButton(id) => write!(f, "button {id} is configured twice"),
            ConfigError::MissingRequiredFields { button, fields } => write!(
                f,
                "button {button} is missing required fields: {}",
                fields.join(", ")
            ),
        }
    }
}

impl std::error::Error for ConfigError {}
