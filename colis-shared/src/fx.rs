use serde::{Deserialize, Serialize};

use crate::currency::{format_amount, round_display, CurrencyCode};

/// Display-only dual-currency hint, e.g. showing a EUR price with its
/// approximate MAD equivalent next to it.
///
/// The rate is an opaque display parameter refreshed out-of-band by the
/// host application. Output from this formatter never feeds back into an
/// authoritative total; duty conversion has its own configured rate.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DualCurrencyFormatter {
    pub from: CurrencyCode,
    pub to: CurrencyCode,
    pub rate: f64,
}

impl DualCurrencyFormatter {
    pub fn new(from: CurrencyCode, to: CurrencyCode, rate: f64) -> Self {
        Self { from, to, rate }
    }

    /// The EUR -> MAD pairing shown across the booking and tracking screens
    pub fn eur_to_mad(rate: f64) -> Self {
        Self::new(CurrencyCode::Eur, CurrencyCode::Mad, rate)
    }

    /// Converted amount, rounded for display
    pub fn converted(&self, amount: f64) -> f64 {
        round_display(amount * self.rate)
    }

    /// Secondary display string, e.g. "~ 471.98 MAD"
    pub fn hint(&self, amount: f64) -> String {
        format!("~ {}", format_amount(self.converted(amount), self.to))
    }

    /// Primary plus secondary, e.g. "43.50 EUR (~ 471.98 MAD)"
    pub fn dual(&self, amount: f64) -> String {
        format!("{} ({})", format_amount(amount, self.from), self.hint(amount))
    }
}

impl Default for DualCurrencyFormatter {
    fn default() -> Self {
        Self::eur_to_mad(10.85)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_converted_rounds_for_display() {
        let fx = DualCurrencyFormatter::eur_to_mad(10.85);
        assert_eq!(fx.converted(10.0), 108.5);
        assert_eq!(fx.converted(100.0), 1085.0);
        // three-decimal raw product gets squeezed to two for display
        let fine = DualCurrencyFormatter::eur_to_mad(10.333);
        assert_eq!(fine.converted(2.0), 20.67);
    }

    #[test]
    fn test_hint_format() {
        let fx = DualCurrencyFormatter::eur_to_mad(10.0);
        assert_eq!(fx.hint(15.0), "~ 150.00 MAD");
        assert_eq!(fx.dual(15.0), "15.00 EUR (~ 150.00 MAD)");
    }
}
