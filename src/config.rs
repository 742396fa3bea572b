//! Runtime configuration: defaults, TOML files and environment overrides.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

use crate::error::ConfigError;

#[derive(Serialize, Deserialize, Debug, Clone, Default)]
pub struct AssistantConfig {
    #[serde(default)]
    pub backend: BackendConfig,
    #[serde(default)]
    pub catalog: CatalogConfig,
    #[serde(default)]
    pub checkout: CheckoutConfig,
    #[serde(default)]
    pub currency: CurrencyConfig,
    #[serde(default)]
    pub cart: CartConfig,
    #[serde(default)]
    pub persona: PersonaConfig,
}

#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct BackendConfig {
    /// Base URL of the assistant worker API.
    pub api_url: String,
    pub request_timeout_seconds: u64,
}

#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct CatalogConfig {
    /// URL of the storefront's read-only product feed.
    pub feed_url: String,
    pub cache_ttl_seconds: u64,
}

#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct CheckoutConfig {
    /// Destination the UI should navigate to after a checkout directive.
    pub url: String,
    /// Grace period before navigating, so the confirmation stays readable.
    pub redirect_delay_ms: u64,
}

#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct CurrencyConfig {
    /// Prefix shown before amounts, e.g. "Rp 15.000".
    pub prefix: String,
    pub thousands_separator: char,
}

#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct CartConfig {
    /// Merge a new line into an existing one when name, color and size all
    /// match. Off by default: repeated adds stay separate lines.
    pub merge_duplicates: bool,
}

#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct PersonaConfig {
    /// Name the assistant introduces itself with.
    pub name: String,
}

impl Default for BackendConfig {
    fn default() -> Self {
        Self {
            api_url: "https://gemini-2.sendaljepit.workers.dev".to_string(),
            request_timeout_seconds: 30,
        }
    }
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            feed_url: "https://plus62store.github.io/products.json".to_string(),
            cache_ttl_seconds: 300,
        }
    }
}

impl Default for CheckoutConfig {
    fn default() -> Self {
        Self {
            url: "https://plus62store.github.io/checkout".to_string(),
            redirect_delay_ms: 2500,
        }
    }
}

impl Default for CurrencyConfig {
    fn default() -> Self {
        Self {
            prefix: "Rp".to_string(),
            thousands_separator: '.',
        }
    }
}

impl Default for CartConfig {
    fn default() -> Self {
        Self {
            merge_duplicates: false,
        }
    }
}

impl Default for PersonaConfig {
    fn default() -> Self {
        Self {
            name: "Hermes".to_string(),
        }
    }
}

impl AssistantConfig {
    /// Load from a TOML file. Missing sections fall back to defaults.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let raw = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.display().to_string(),
            source,
        })?;
        toml::from_str(&raw).map_err(|source| ConfigError::Parse {
            path: path.display().to_string(),
            source,
        })
    }

    /// Defaults overridden by environment variables where set.
    ///
    /// ENV vars: HERMES_API_URL, HERMES_FEED_URL, HERMES_CHECKOUT_URL,
    /// HERMES_REQUEST_TIMEOUT, HERMES_CATALOG_TTL, HERMES_REDIRECT_DELAY_MS,
    /// HERMES_CURRENCY_PREFIX, HERMES_MERGE_DUPLICATES, HERMES_PERSONA
    pub fn from_env() -> Self {
        use std::env;
        let mut config = Self::default();
        if let Ok(url) = env::var("HERMES_API_URL") {
            config.backend.api_url = url;
        }
        if let Ok(url) = env::var("HERMES_FEED_URL") {
            config.catalog.feed_url = url;
        }
        if let Ok(url) = env::var("HERMES_CHECKOUT_URL") {
            config.checkout.url = url;
        }
        config.backend.request_timeout_seconds = env::var("HERMES_REQUEST_TIMEOUT")
            .unwrap_or_default()
            .parse()
            .unwrap_or(config.backend.request_timeout_seconds);
        config.catalog.cache_ttl_seconds = env::var("HERMES_CATALOG_TTL")
            .unwrap_or_default()
            .parse()
            .unwrap_or(config.catalog.cache_ttl_seconds);
        config.checkout.redirect_delay_ms = env::var("HERMES_REDIRECT_DELAY_MS")
            .unwrap_or_default()
            .parse()
            .unwrap_or(config.checkout.redirect_delay_ms);
        if let Ok(prefix) = env::var("HERMES_CURRENCY_PREFIX") {
            config.currency.prefix = prefix;
        }
        config.cart.merge_duplicates = env::var("HERMES_MERGE_DUPLICATES")
            .unwrap_or_default()
            .parse()
            .unwrap_or(config.cart.merge_duplicates);
        if let Ok(name) = env::var("HERMES_PERSONA") {
            config.persona.name = name;
        }
        config
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn defaults_are_sane() {
        let config = AssistantConfig::default();
        assert_eq!(config.backend.request_timeout_seconds, 30);
        assert_eq!(config.catalog.cache_ttl_seconds, 300);
        assert_eq!(config.checkout.redirect_delay_ms, 2500);
        assert_eq!(config.currency.prefix, "Rp");
        assert_eq!(config.currency.thousands_separator, '.');
        assert!(!config.cart.merge_duplicates);
    }

    #[test]
    fn partial_file_keeps_defaults_elsewhere() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(
            file,
            "[checkout]\nurl = \"https://shop.example/checkout\"\nredirect_delay_ms = 1000\n"
        )
        .unwrap();

        let config = AssistantConfig::from_file(file.path()).unwrap();
        assert_eq!(config.checkout.url, "https://shop.example/checkout");
        assert_eq!(config.checkout.redirect_delay_ms, 1000);
        // untouched sections keep their defaults
        assert_eq!(config.currency.prefix, "Rp");
        assert_eq!(config.backend.request_timeout_seconds, 30);
    }

    #[test]
    fn missing_file_is_an_io_error() {
        let err = AssistantConfig::from_file("/definitely/not/here.toml").unwrap_err();
        assert!(matches!(err, ConfigError::Io { .. }));
    }

    #[test]
    fn malformed_file_is_a_parse_error() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[checkout\nnot toml at all").unwrap();

        let err = AssistantConfig::from_file(file.path()).unwrap_err();
        assert!(matches!(err, ConfigError::Parse { .. }));
    }

    // The one test touching process env; keeping it a single fn avoids races
    // with parallel test threads.
    #[test]
    fn env_overrides_apply_and_unparseable_values_fall_back() {
        use std::env;

        env::set_var("HERMES_API_URL", "https://staging.example.dev");
        env::set_var("HERMES_CATALOG_TTL", "60");
        env::set_var("HERMES_MERGE_DUPLICATES", "true");
        env::set_var("HERMES_REDIRECT_DELAY_MS", "soon");

        let config = AssistantConfig::from_env();

        env::remove_var("HERMES_API_URL");
        env::remove_var("HERMES_CATALOG_TTL");
        env::remove_var("HERMES_MERGE_DUPLICATES");
        env::remove_var("HERMES_REDIRECT_DELAY_MS");

        assert_eq!(config.backend.api_url, "https://staging.example.dev");
        assert_eq!(config.catalog.cache_ttl_seconds, 60);
        assert!(config.cart.merge_duplicates);
        // a value that does not parse keeps the default
        assert_eq!(config.checkout.redirect_delay_ms, 2500);
        // untouched variables leave their defaults alone
        assert_eq!(config.backend.request_timeout_seconds, 30);
        assert_eq!(config.persona.name, "Hermes");
    }
}
