use crate::core::{Error, Result};
use serde::{Deserialize, Serialize};
use std::env;
use std::fmt;
use std::time::Duration;

const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Main client configuration
///
/// Loaded once at process start; credentials are never mutated afterwards
/// and never appear in `Debug` output.
#[derive(Debug, Clone)]
pub struct Config {
    pub environment: Environment,
    /// Bounded wait applied to every outbound gateway call
    pub timeout: Duration,
    pub adyen: AdyenConfig,
    pub square: SquareConfig,
}

/// Gateway environment selector
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    Sandbox,
    Production,
}

/// Adyen Checkout credentials and endpoint
#[derive(Clone)]
pub struct AdyenConfig {
    pub api_key: String,
    pub merchant_account: String,
    pub base_url: String,
}

/// Square credentials and endpoint
#[derive(Clone)]
pub struct SquareConfig {
    pub access_token: String,
    pub base_url: String,
}

impl Config {
    /// Load configuration from environment variables
    ///
    /// Fails with `Error::Config` before any network call is attempted if
    /// a required secret is missing or empty.
    pub fn from_env() -> Result<Self> {
        // Load .env file if present
        dotenvy::dotenv().ok();

        let environment: Environment = env::var("GATEWAY_ENV")
            .unwrap_or_else(|_| "sandbox".to_string())
            .parse()?;

        let timeout_secs: u64 = env::var("GATEWAY_TIMEOUT_SECS")
            .unwrap_or_else(|_| DEFAULT_TIMEOUT_SECS.to_string())
            .parse()
            .map_err(|_| Error::Config("Invalid GATEWAY_TIMEOUT_SECS".to_string()))?;

        let config = Config {
            environment,
            timeout: Duration::from_secs(timeout_secs),
            adyen: AdyenConfig {
                api_key: required_var("ADYEN_API_KEY")?,
                merchant_account: required_var("ADYEN_MERCHANT_ACCOUNT")?,
                base_url: env::var("ADYEN_BASE_URL")
                    .unwrap_or_else(|_| environment.adyen_base_url().to_string()),
            },
            square: SquareConfig {
                access_token: required_var("SQUARE_ACCESS_TOKEN")?,
                base_url: env::var("SQUARE_BASE_URL")
                    .unwrap_or_else(|_| environment.square_base_url().to_string()),
            },
        };

        config.validate()?;
        Ok(config)
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<()> {
        if self.timeout.is_zero() {
            return Err(Error::Config(
                "Gateway timeout must be greater than 0".to_string(),
            ));
        }

        if self.adyen.api_key.trim().is_empty() {
            return Err(Error::Config("ADYEN_API_KEY is empty".to_string()));
        }

        if self.adyen.merchant_account.trim().is_empty() {
            return Err(Error::Config("ADYEN_MERCHANT_ACCOUNT is empty".to_string()));
        }

        if self.square.access_token.trim().is_empty() {
            return Err(Error::Config("SQUARE_ACCESS_TOKEN is empty".to_string()));
        }

        Ok(())
    }
}

impl Environment {
    pub fn is_production(&self) -> bool {
        matches!(self, Environment::Production)
    }

    fn adyen_base_url(&self) -> &'static str {
        match self {
            Environment::Sandbox => "https://checkout-test.adyen.com",
            Environment::Production => "https://checkout-live.adyen.com",
        }
    }

    fn square_base_url(&self) -> &'static str {
        match self {
            Environment::Sandbox => "https://connect.squareupsandbox.com",
            Environment::Production => "https://connect.squareup.com",
        }
    }
}

impl fmt::Display for Environment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Environment::Sandbox => write!(f, "sandbox"),
            Environment::Production => write!(f, "production"),
        }
    }
}

impl std::str::FromStr for Environment {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "sandbox" | "test" => Ok(Environment::Sandbox),
            "production" | "live" => Ok(Environment::Production),
            _ => Err(Error::Config(format!("Invalid GATEWAY_ENV: {}", s))),
        }
    }
}

fn required_var(name: &str) -> Result<String> {
    match env::var(name) {
        Ok(value) if !value.trim().is_empty() => Ok(value),
        _ => Err(Error::Config(format!("{} not set", name))),
    }
}

// Secrets stay out of logs: Debug prints everything but the credential
impl fmt::Debug for AdyenConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AdyenConfig")
            .field("api_key", &"[redacted]")
            .field("merchant_account", &self.merchant_account)
            .field("base_url", &self.base_url)
            .finish()
    }
}

impl fmt::Debug for SquareConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SquareConfig")
            .field("access_token", &"[redacted]")
            .field("base_url", &self.base_url)
            .finish()
    }
}
