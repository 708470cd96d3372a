//! Configuration management for the bookstore.
//!
//! Loads configuration from environment variables with sensible defaults.

use std::env;

/// Application configuration loaded from environment variables.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Capacity of the store actor's request channel (`BOOKSTORE_STORE_BUFFER`, default 64).
    /// Zero is not a valid capacity and falls back to the default.
    pub store_buffer: usize,
    /// Currency tag sent with payment intents (`BOOKSTORE_CURRENCY`, default `usd`).
    pub currency: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            store_buffer: 64,
            currency: "usd".to_string(),
        }
    }
}

impl Config {
    /// Load configuration from the process environment.
    #[must_use]
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Load configuration from an arbitrary key lookup.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();
        Self {
            store_buffer: lookup("BOOKSTORE_STORE_BUFFER")
                .and_then(|s| s.trim().parse().ok())
                .filter(|&n: &usize| n > 0)
                .unwrap_or(defaults.store_buffer),
            currency: lookup("BOOKSTORE_CURRENCY")
                .map(|s| s.trim().to_lowercase())
                .filter(|s| !s.is_empty())
                .unwrap_or(defaults.currency),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| vars.get(key).cloned()
    }

    #[test]
    fn test_defaults() {
        assert_eq!(Config::from_lookup(lookup_from(&[])), Config::default());
    }

    #[test]
    fn test_overrides() {
        let config = Config::from_lookup(lookup_from(&[
            ("BOOKSTORE_STORE_BUFFER", "8"),
            ("BOOKSTORE_CURRENCY", " EUR "),
        ]));
        assert_eq!(config.store_buffer, 8);
        assert_eq!(config.currency, "eur");
    }

    #[test]
    fn test_invalid_values_fall_back() {
        let config = Config::from_lookup(lookup_from(&[
            ("BOOKSTORE_STORE_BUFFER", "0"),
            ("BOOKSTORE_CURRENCY", ""),
        ]));
        assert_eq!(config, Config::default());

        let config = Config::from_lookup(lookup_from(&[("BOOKSTORE_STORE_BUFFER", "lots")]));
        assert_eq!(config.store_buffer, 64);
    }
}
