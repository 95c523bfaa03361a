// 💱 Currency - Display labels only
// Amounts are never converted; the currency only picks the symbol we print.

use anyhow::{anyhow, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

// ============================================================================
// CURRENCY
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Currency {
    #[default]
    Usd,
    Eur,
    Gbp,
    Jpy,
    Cad,
}

impl Currency {
    /// Every supported currency, in selector order
    pub const ALL: [Currency; 5] = [
        Currency::Usd,
        Currency::Eur,
        Currency::Gbp,
        Currency::Jpy,
        Currency::Cad,
    ];

    pub fn code(&self) -> &'static str {
        match self {
            Currency::Usd => "USD",
            Currency::Eur => "EUR",
            Currency::Gbp => "GBP",
            Currency::Jpy => "JPY",
            Currency::Cad => "CAD",
        }
    }

    pub fn symbol(&self) -> &'static str {
        match self {
            Currency::Usd => "$",
            Currency::Eur => "€",
            Currency::Gbp => "£",
            Currency::Jpy => "¥",
            Currency::Cad => "C$",
        }
    }

    /// Selector label, e.g. `USD ($)`
    pub fn label(&self) -> String {
        format!("{} ({})", self.code(), self.symbol())
    }

    /// Next currency in selector order (wraps)
    pub fn next(&self) -> Self {
        let pos = Self::ALL.iter().position(|c| c == self).unwrap_or(0);
        Self::ALL[(pos + 1) % Self::ALL.len()]
    }

    pub fn previous(&self) -> Self {
        let pos = Self::ALL.iter().position(|c| c == self).unwrap_or(0);
        Self::ALL[(pos + Self::ALL.len() - 1) % Self::ALL.len()]
    }
}

impl fmt::Display for Currency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for Currency {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        let code = s.trim().to_uppercase();
        Self::ALL
            .iter()
            .copied()
            .find(|c| c.code() == code)
            .ok_or_else(|| anyhow!("Unknown currency code: {}", s))
    }
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_symbols() {
        assert_eq!(Currency::Usd.symbol(), "$");
        assert_eq!(Currency::Eur.symbol(), "€");
        assert_eq!(Currency::Gbp.symbol(), "£");
        assert_eq!(Currency::Jpy.symbol(), "¥");
        assert_eq!(Currency::Cad.symbol(), "C$");
    }

    #[test]
    fn test_parse_case_insensitive() {
        assert_eq!("usd".parse::<Currency>().unwrap(), Currency::Usd);
        assert_eq!(" CAD ".parse::<Currency>().unwrap(), Currency::Cad);
        assert!("XYZ".parse::<Currency>().is_err());
    }

    #[test]
    fn test_cycle_wraps() {
        assert_eq!(Currency::Cad.next(), Currency::Usd);
        assert_eq!(Currency::Usd.previous(), Currency::Cad);
        assert_eq!(Currency::Usd.label(), "USD ($)");
    }

    #[test]
    fn test_serde_uses_codes() {
        let json = serde_json::to_string(&Currency::Gbp).unwrap();
        assert_eq!(json, "\"GBP\"");
        let back: Currency = serde_json::from_str("\"JPY\"").unwrap();
        assert_eq!(back, Currency::Jpy);
    }
}
