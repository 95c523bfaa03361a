// ⚙️ Settings - calculator defaults and server options
//
// Layering: built-in defaults → splitsmart.json (if present) → environment.

use crate::currency::Currency;
use crate::participants::SharePolicy;
use anyhow::{bail, Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

pub const DEFAULT_CONFIG_PATH: &str = "splitsmart.json";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub default_bill: f64,
    pub default_tip: f64,
    pub default_currency: Currency,
    pub initial_people: usize,

    /// Bounds applied when the participant count is edited
    pub min_people: usize,
    pub max_people: usize,

    pub share_policy: SharePolicy,

    /// Address for `split-server`
    pub server_bind: String,
}

impl Default for Settings {
    fn default() -> Self {
        Settings {
            default_bill: 100.0,
            default_tip: 15.0,
            default_currency: Currency::Usd,
            initial_people: 2,
            min_people: 2,
            max_people: 50,
            share_policy: SharePolicy::PreserveExisting,
            server_bind: "127.0.0.1:3000".to_string(),
        }
    }
}

impl Settings {
    /// Load settings from a JSON file. Unset keys keep their defaults.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(path.as_ref())
            .with_context(|| format!("Failed to read settings file: {:?}", path.as_ref()))?;

        let settings: Settings = serde_json::from_str(&content)
            .with_context(|| format!("Failed to parse settings JSON: {:?}", path.as_ref()))?;

        Ok(settings.normalized())
    }

    /// Apply `SPLITSMART_*` overrides from `lookup`
    pub fn apply_overrides<F>(mut self, lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(v) = lookup("SPLITSMART_BIND") {
            self.server_bind = v;
        }
        if let Some(v) = lookup("SPLITSMART_CURRENCY") {
            self.default_currency = v.parse::<Currency>().context("SPLITSMART_CURRENCY")?;
        }
        if let Some(v) = lookup("SPLITSMART_TIP") {
            self.default_tip = v
                .trim()
                .parse::<f64>()
                .with_context(|| format!("SPLITSMART_TIP is not a number: {}", v))?;
        }
        Ok(self.normalized())
    }

    /// Clamp a requested participant count into `[min_people, max_people]`
    pub fn clamp_people(&self, count: usize) -> usize {
        count.clamp(self.min_people, self.max_people)
    }

    /// Reject a participant count outside `[min_people, max_people]`
    pub fn check_people(&self, count: usize) -> Result<()> {
        if count < self.min_people || count > self.max_people {
            bail!(
                "{} participants is outside the allowed range {}..={}",
                count,
                self.min_people,
                self.max_people
            );
        }
        Ok(())
    }

    fn normalized(mut self) -> Self {
        if self.max_people < self.min_people {
            self.max_people = self.min_people;
        }
        self.initial_people = self.clamp_people(self.initial_people);
        self
    }
}

/// Defaults, then the config file, then environment variables.
/// The file path comes from `SPLITSMART_CONFIG`; a missing file is not an error.
pub fn load_settings() -> Result<Settings> {
    let path = std::env::var("SPLITSMART_CONFIG").unwrap_or_else(|_| DEFAULT_CONFIG_PATH.to_string());

    let settings = if Path::new(&path).exists() {
        tracing::info!(path = %path, "loading settings");
        Settings::from_file(&path)?
    } else {
        tracing::debug!(path = %path, "settings file not found, using defaults");
        Settings::default()
    };

    settings.apply_overrides(|key| std::env::var(key).ok())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn test_defaults_match_initial_state() {
        let settings = Settings::default();
        assert_eq!(settings.default_bill, 100.0);
        assert_eq!(settings.default_tip, 15.0);
        assert_eq!(settings.default_currency, Currency::Usd);
        assert_eq!(settings.initial_people, 2);
        assert_eq!((settings.min_people, settings.max_people), (2, 50));
    }

    #[test]
    fn test_partial_json_keeps_defaults() {
        let settings: Settings =
            serde_json::from_str(r#"{"default_currency": "EUR", "share_policy": "even_split"}"#).unwrap();
        assert_eq!(settings.default_currency, Currency::Eur);
        assert_eq!(settings.share_policy, SharePolicy::EvenSplit);
        assert_eq!(settings.max_people, 50);
    }

    #[test]
    fn test_from_file() {
        let path = std::env::temp_dir().join(format!("splitsmart-test-{}.json", std::process::id()));
        fs::write(&path, r#"{"initial_people": 99, "max_people": 10}"#).unwrap();

        let settings = Settings::from_file(&path).unwrap();
        fs::remove_file(&path).unwrap();

        assert_eq!(settings.initial_people, 10);
    }

    #[test]
    fn test_from_file_missing_is_error() {
        assert!(Settings::from_file("/definitely/not/here.json").is_err());
    }

    #[test]
    fn test_env_overrides() {
        let env: HashMap<&str, &str> = [("SPLITSMART_BIND", "0.0.0.0:8080"), ("SPLITSMART_CURRENCY", "gbp"), ("SPLITSMART_TIP", "20")]
            .into_iter()
            .collect();

        let settings = Settings::default()
            .apply_overrides(|k| env.get(k).map(|v| v.to_string()))
            .unwrap();

        assert_eq!(settings.server_bind, "0.0.0.0:8080");
        assert_eq!(settings.default_currency, Currency::Gbp);
        assert_eq!(settings.default_tip, 20.0);
    }

    #[test]
    fn test_bad_env_override_is_error() {
        let result = Settings::default().apply_overrides(|k| (k == "SPLITSMART_CURRENCY").then(|| "XXX".to_string()));
        assert!(result.is_err());
    }

    #[test]
    fn test_clamp_people() {
        let settings = Settings::default();
        assert_eq!(settings.clamp_people(0), 2);
        assert_eq!(settings.clamp_people(7), 7);
        assert_eq!(settings.clamp_people(500), 50);
    }

    #[test]
    fn test_check_people() {
        let settings = Settings::default();
        assert!(settings.check_people(2).is_ok());
        assert!(settings.check_people(50).is_ok());
        assert!(settings.check_people(1).is_err());
        assert!(settings.check_people(0).is_err());
        assert!(settings.check_people(51).is_err());
    }
}
