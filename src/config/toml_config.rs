use crate::core::ConfigProvider;
use crate::utils::error::{BookingError, Result};
use crate::utils::validation::{
    validate_currency_code, validate_non_empty_string, validate_positive_number, validate_range,
    validate_url, Validate,
};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::sync::LazyLock;
use std::time::Duration;

pub const BACKEND_URL_ENV: &str = "SLOT_STORE_API_URL";
pub const DEFAULT_BACKEND_URL: &str = "http://localhost:3000/api/bookings";
const MAX_SUBMIT_DELAY_MS: u64 = 60_000;

static ENV_VAR: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\$\{([^}]+)\}").expect("env pattern compiles"));

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct StoreConfig {
    pub store: StoreSection,
    pub payment: PaymentSection,
    pub backend: BackendSection,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct StoreSection {
    pub name: String,
}

impl Default for StoreSection {
    fn default() -> Self {
        Self {
            name: "SlotStore".to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PaymentSection {
    /// Minor units, 5000 = 50.00.
    pub amount_minor: u64,
    pub currency: String,
    pub submit_delay_ms: u64,
}

impl Default for PaymentSection {
    fn default() -> Self {
        Self {
            amount_minor: 5000,
            currency: "EUR".to_string(),
            submit_delay_ms: 2000,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct BackendSection {
    pub endpoint: String,
}

impl Default for BackendSection {
    fn default() -> Self {
        Self {
            endpoint: backend_endpoint_from_env(),
        }
    }
}

/// The future booking backend; env override with a local fallback.
pub fn backend_endpoint_from_env() -> String {
    std::env::var(BACKEND_URL_ENV).unwrap_or_else(|_| DEFAULT_BACKEND_URL.to_string())
}

impl StoreConfig {
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(BookingError::IoError)?;
        Self::from_toml_str(&content)
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed = Self::substitute_env_vars(content);
        Ok(toml::from_str(&processed)?)
    }

    /// Replaces `${VAR}` with the variable's value; unknown variables are left as written.
    fn substitute_env_vars(content: &str) -> String {
        ENV_VAR
            .replace_all(content, |caps: &regex::Captures| {
                let var_name = &caps[1];
                std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
            })
            .into_owned()
    }

    pub fn validate_config(&self) -> Result<()> {
        validate_non_empty_string("store.name", &self.store.name)?;
        validate_positive_number("payment.amount_minor", self.payment.amount_minor, 1)?;
        validate_currency_code("payment.currency", &self.payment.currency)?;
        validate_range(
            "payment.submit_delay_ms",
            self.payment.submit_delay_ms,
            0,
            MAX_SUBMIT_DELAY_MS,
        )?;
        validate_url("backend.endpoint", &self.backend.endpoint)?;
        Ok(())
    }

    /// "EUR 50.00"
    pub fn display_price(&self) -> String {
        format!(
            "{} {}.{:02}",
            self.payment.currency,
            self.payment.amount_minor / 100,
            self.payment.amount_minor % 100
        )
    }
}

impl ConfigProvider for StoreConfig {
    fn store_name(&self) -> &str {
        &self.store.name
    }

    fn backend_endpoint(&self) -> &str {
        &self.backend.endpoint
    }

    fn price(&self) -> u64 {
        self.payment.amount_minor
    }

    fn currency(&self) -> &str {
        &self.payment.currency
    }

    fn submit_delay(&self) -> Duration {
        Duration::from_millis(self.payment.submit_delay_ms)
    }
}

impl Validate for StoreConfig {
    fn validate(&self) -> Result<()> {
        self.validate_config()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_parse_full_config() {
        let toml_content = r#"
[store]
name = "Studio Prenota"

[payment]
amount_minor = 7550
currency = "EUR"
submit_delay_ms = 0

[backend]
endpoint = "https://api.example.com/bookings"
"#;

        let config = StoreConfig::from_toml_str(toml_content).unwrap();

        assert_eq!(config.store_name(), "Studio Prenota");
        assert_eq!(config.price(), 7550);
        assert_eq!(config.submit_delay(), Duration::ZERO);
        assert_eq!(config.display_price(), "EUR 75.50");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_missing_sections_use_defaults() {
        let config = StoreConfig::from_toml_str("[store]\nname = \"Mini\"\n").unwrap();
        assert_eq!(config.price(), 5000);
        assert_eq!(config.currency(), "EUR");
        assert_eq!(config.submit_delay(), Duration::from_millis(2000));
        assert_eq!(config.display_price(), "EUR 50.00");
    }

    #[test]
    fn test_env_var_substitution() {
        std::env::set_var("SLOT_STORE_TEST_ENDPOINT", "https://test.api.com/bookings");

        let toml_content = r#"
[backend]
endpoint = "${SLOT_STORE_TEST_ENDPOINT}"
"#;

        let config = StoreConfig::from_toml_str(toml_content).unwrap();
        assert_eq!(config.backend_endpoint(), "https://test.api.com/bookings");

        std::env::remove_var("SLOT_STORE_TEST_ENDPOINT");
    }

    #[test]
    fn test_config_validation() {
        let toml_content = r#"
[payment]
currency = "euro"

[backend]
endpoint = "http://localhost:3000/api/bookings"
"#;

        let config = StoreConfig::from_toml_str(toml_content).unwrap();
        assert!(config.validate().is_err());

        let bad_url = StoreConfig::from_toml_str("[backend]\nendpoint = \"invalid-url\"\n").unwrap();
        assert!(bad_url.validate().is_err());
    }

    #[test]
    fn test_invalid_toml_is_reported() {
        let err = StoreConfig::from_toml_str("[payment\namount_minor = ").unwrap_err();
        assert!(matches!(err, BookingError::TomlParseError(_)));
    }

    #[test]
    fn test_config_from_file() {
        let mut temp_file = NamedTempFile::new().unwrap();
        temp_file
            .write_all(b"[store]\nname = \"File Store\"\n")
            .unwrap();

        let config = StoreConfig::from_file(temp_file.path()).unwrap();
        assert_eq!(config.store.name, "File Store");
    }
}
