use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Currencies the platform quotes in
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "UPPERCASE")]
pub enum CurrencyCode {
    Eur,
    Mad,
    Usd,
    Gbp,
}

impl CurrencyCode {
    /// ISO 4217 code as rendered on invoices and in API payloads
    pub fn as_str(&self) -> &'static str {
        match self {
            CurrencyCode::Eur => "EUR",
            CurrencyCode::Mad => "MAD",
            CurrencyCode::Usd => "USD",
            CurrencyCode::Gbp => "GBP",
        }
    }
}

impl fmt::Display for CurrencyCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for CurrencyCode {
    type Err = CurrencyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "EUR" => Ok(CurrencyCode::Eur),
            "MAD" => Ok(CurrencyCode::Mad),
            "USD" => Ok(CurrencyCode::Usd),
            "GBP" => Ok(CurrencyCode::Gbp),
            _ => Err(CurrencyError::Unrecognized(s.to_string())),
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum CurrencyError {
    #[error("unrecognized currency code: {0}")]
    Unrecognized(String),
}

/// Round a monetary amount to 2 decimal places.
///
/// Display boundary only. Engine math stays unrounded so repeated
/// recomputation never compounds rounding error.
pub fn round_display(amount: f64) -> f64 {
    (amount * 100.0).round() / 100.0
}

/// Format an amount for display, e.g. "43.50 EUR"
pub fn format_amount(amount: f64, currency: CurrencyCode) -> String {
    format!("{:.2} {}", amount, currency)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_known_codes() {
        assert_eq!("EUR".parse::<CurrencyCode>().unwrap(), CurrencyCode::Eur);
        assert_eq!("mad".parse::<CurrencyCode>().unwrap(), CurrencyCode::Mad);
        assert_eq!(" gbp ".parse::<CurrencyCode>().unwrap(), CurrencyCode::Gbp);
    }

    #[test]
    fn test_parse_unknown_code() {
        let err = "XXX".parse::<CurrencyCode>();
        assert!(matches!(err, Err(CurrencyError::Unrecognized(_))));
    }

    #[test]
    fn test_serde_round_trip() {
        let json = serde_json::to_string(&CurrencyCode::Mad).unwrap();
        assert_eq!(json, "\"MAD\"");
        let back: CurrencyCode = serde_json::from_str(&json).unwrap();
        assert_eq!(back, CurrencyCode::Mad);
    }

    #[test]
    fn test_round_display() {
        assert_eq!(round_display(12.3456), 12.35);
        assert_eq!(round_display(10.0), 10.0);
        assert_eq!(round_display(0.005), 0.01);
    }

    #[test]
    fn test_format_amount() {
        assert_eq!(format_amount(43.5, CurrencyCode::Eur), "43.50 EUR");
        assert_eq!(format_amount(0.0, CurrencyCode::Mad), "0.00 MAD");
    }
}
