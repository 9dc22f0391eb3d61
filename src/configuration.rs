use crate::quote_client::QuoteClient;
use secrecy::Secret;
use serde_aux::field_attributes::deserialize_option_number_from_string;
use std::path::Path;

/// Environment variable holding the quote service API key.
pub const API_KEY_ENV_VAR: &str = "FAVQS_API_KEY";

#[derive(serde::Deserialize, Clone, Debug)]
pub struct Settings {
    pub quote_service: QuoteServiceSettings,
    pub telemetry: TelemetrySettings,
}

#[derive(serde::Deserialize, Clone, Debug)]
pub struct QuoteServiceSettings {
    pub base_url: String,
    pub api_key: Secret<String>,
    // Unset means the HTTP client default (no timeout)
    #[serde(default, deserialize_with = "deserialize_option_number_from_string")]
    pub timeout_milliseconds: Option<u64>,
}

impl QuoteServiceSettings {
    pub fn timeout(&self) -> Option<std::time::Duration> {
        self.timeout_milliseconds
            .map(std::time::Duration::from_millis)
    }

    pub fn client(&self) -> Result<QuoteClient, reqwest::Error> {
        QuoteClient::new(self.base_url.clone(), self.api_key.clone(), self.timeout())
    }
}

#[derive(serde::Deserialize, Clone, Debug)]
pub struct TelemetrySettings {
    pub subscriber_name: String,
    pub log_level: String,
}

/// The possible runtime environment for our checks.
#[derive(Debug)]
pub enum Environment {
    Local,
    Production,
}

impl Environment {
    pub fn as_str(&self) -> &'static str {
        match self {
            Environment::Local => "local",
            Environment::Production => "production",
        }
    }
}

impl TryFrom<String> for Environment {
    type Error = String;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        match s.to_lowercase().as_str() {
            "local" => Ok(Self::Local),
            "production" => Ok(Self::Production),
            other => Err(format!(
                "{} is not a supported environment. Use either `local` or `production`.",
                other
            )),
        }
    }
}

pub fn get_configuration() -> Result<Settings, config::ConfigError> {
    // A missing `.env` file is fine: the key may come from the real environment
    let _ = dotenvy::dotenv();

    let base_path = std::env::current_dir().map_err(|e| {
        config::ConfigError::Message(format!(
            "Failed to determine the current directory: {}",
            e
        ))
    })?;
    let configuration_directory = base_path.join("configuration");

    // Detect the running environment.
    // Default to `local` if unspecified.
    let environment: Environment = std::env::var("APP_ENVIRONMENT")
        .unwrap_or_else(|_| "local".into())
        .try_into()
        .map_err(config::ConfigError::Message)?;

    load_settings(
        &configuration_directory,
        environment,
        std::env::var(API_KEY_ENV_VAR).ok(),
    )
}

/// Builds settings from the configuration directory, `APP_`-prefixed
/// environment variables and the API key, in increasing priority.
pub fn load_settings(
    configuration_directory: &Path,
    environment: Environment,
    api_key: Option<String>,
) -> Result<Settings, config::ConfigError> {
    let environment_filename = format!("{}.yaml", environment.as_str());
    let settings = config::Config::builder()
        .add_source(config::File::from(configuration_directory.join("base.yaml")))
        .add_source(
            config::File::from(configuration_directory.join(environment_filename)).required(false),
        )
        // E.g. `APP_QUOTE_SERVICE__BASE_URL=http://127.0.0.1:8000` would set
        // `Settings.quote_service.base_url`
        .add_source(
            config::Environment::with_prefix("APP")
                .prefix_separator("_")
                .separator("__"),
        )
        .set_override_option("quote_service.api_key", api_key)?
        .build()?;

    settings.try_deserialize::<Settings>()
}
