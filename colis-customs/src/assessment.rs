use serde::{Deserialize, Serialize};

use colis_shared::CurrencyCode;

use crate::category::{resolve_or_other, DutyCategory, DutyCategoryKey, DUTY_TABLE_VERSION};
use crate::{CustomsError, CustomsResult};

/// Advisory sentence that must accompany every rendered assessment. The
/// real assessment is issued by the destination customs authority; this
/// calculator only estimates and never authorizes a payment release.
pub const ESTIMATE_NOTICE: &str =
    "Estimated charges only. The final amount is set by the Moroccan customs authority and may differ.";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CustomsConfig {
    /// Declared value at or below this is exempt from duty and VAT
    pub de_minimis_eur: f64,

    /// Fixed conversion rate used for the dutiable portion
    pub eur_to_mad_rate: f64,

    /// Flat clearance processing fee, in the destination currency
    pub processing_fee: f64,
}

impl Default for CustomsConfig {
    fn default() -> Self {
        Self {
            de_minimis_eur: 150.0,
            eur_to_mad_rate: 10.85,
            processing_fee: 50.0,
        }
    }
}

/// Import duty estimate for one declared parcel.
///
/// Derived per request and never cached: a rate or table change must not
/// leave a stale assessment behind.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DutyAssessment {
    pub declared_value_eur: f64,

    /// Portion of the declared value above the de-minimis threshold
    pub dutiable_value_eur: f64,

    /// Dutiable portion converted to the destination currency
    pub dutiable_value: f64,

    pub duty_amount: f64,
    pub vat_amount: f64,
    pub processing_fee: f64,
    pub total_due: f64,
    pub currency: CurrencyCode,
    pub duty_free: bool,

    pub category: DutyCategoryKey,

    /// True when the requested category was unknown and the generic rate
    /// was used instead
    pub category_fallback: bool,

    /// Rate-table version this estimate was computed with
    pub table_version: String,
}

/// Computes import duty estimates for declared value/category pairs
pub struct DutyCalculator {
    config: CustomsConfig,
}

impl DutyCalculator {
    pub fn new(config: CustomsConfig) -> Self {
        Self { config }
    }

    /// Assess a declared value against a resolved category.
    ///
    /// The de-minimis threshold applies to the total declared value: a
    /// declaration of exactly the threshold is duty-free, and anything
    /// above it is dutiable only for the remainder.
    pub fn assess(
        &self,
        declared_value_eur: f64,
        category: &DutyCategory,
    ) -> CustomsResult<DutyAssessment> {
        if !declared_value_eur.is_finite() || declared_value_eur < 0.0 {
            return Err(CustomsError::InvalidDeclaredValue(declared_value_eur));
        }

        if declared_value_eur <= self.config.de_minimis_eur {
            return Ok(self.duty_free(declared_value_eur, category));
        }

        let dutiable_value_eur = declared_value_eur - self.config.de_minimis_eur;
        let dutiable_value = dutiable_value_eur * self.config.eur_to_mad_rate;
        let duty_amount = dutiable_value * category.duty_rate;
        let vat_amount = dutiable_value * category.vat_rate;
        let processing_fee = self.config.processing_fee;
        let total_due = duty_amount + vat_amount + processing_fee;

        Ok(DutyAssessment {
            declared_value_eur,
            dutiable_value_eur,
            dutiable_value,
            duty_amount,
            vat_amount,
            processing_fee,
            total_due,
            currency: CurrencyCode::Mad,
            duty_free: false,
            category: category.key,
            category_fallback: false,
            table_version: DUTY_TABLE_VERSION.to_string(),
        })
    }

    /// Assess against a raw category key from the booking form, falling
    /// back to the generic rate for unknown keys. The fallback is flagged
    /// on the assessment so the UI can show it.
    pub fn assess_by_key(
        &self,
        declared_value_eur: f64,
        raw_category: &str,
    ) -> CustomsResult<DutyAssessment> {
        let (category, fell_back) = resolve_or_other(raw_category);
        let mut assessment = self.assess(declared_value_eur, category)?;
        assessment.category_fallback = fell_back;
        Ok(assessment)
    }

    fn duty_free(&self, declared_value_eur: f64, category: &DutyCategory) -> DutyAssessment {
        DutyAssessment {
            declared_value_eur,
            dutiable_value_eur: 0.0,
            dutiable_value: 0.0,
            duty_amount: 0.0,
            vat_amount: 0.0,
            processing_fee: 0.0,
            total_due: 0.0,
            currency: CurrencyCode::Mad,
            duty_free: true,
            category: category.key,
            category_fallback: false,
            table_version: DUTY_TABLE_VERSION.to_string(),
        }
    }
}

impl Default for DutyCalculator {
    fn default() -> Self {
        Self::new(CustomsConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::category::category;

    fn assert_close(actual: f64, expected: f64) {
        assert!(
            (actual - expected).abs() < 1e-9,
            "expected {}, got {}",
            expected,
            actual
        );
    }

    /// Unit rate makes the expected numbers readable in EUR terms
    fn eur_calculator() -> DutyCalculator {
        DutyCalculator::new(CustomsConfig {
            de_minimis_eur: 150.0,
            eur_to_mad_rate: 1.0,
            processing_fee: 50.0,
        })
    }

    #[test]
    fn test_threshold_is_duty_free() {
        let calc = eur_calculator();
        let electronics = category(DutyCategoryKey::Electronics);

        let at_threshold = calc.assess(150.0, electronics).unwrap();
        assert!(at_threshold.duty_free);
        assert_close(at_threshold.total_due, 0.0);
        assert_close(at_threshold.processing_fee, 0.0);

        let below = calc.assess(20.0, electronics).unwrap();
        assert!(below.duty_free);
    }

    #[test]
    fn test_just_above_threshold() {
        let calc = eur_calculator();
        let electronics = category(DutyCategoryKey::Electronics);

        let assessment = calc.assess(150.01, electronics).unwrap();
        assert!(!assessment.duty_free);
        assert_close(assessment.dutiable_value_eur, 0.01);
    }

    #[test]
    fn test_electronics_example() {
        let calc = eur_calculator();
        let electronics = category(DutyCategoryKey::Electronics);

        let assessment = calc.assess(250.0, electronics).unwrap();
        assert_close(assessment.dutiable_value_eur, 100.0);
        assert_close(assessment.duty_amount, 2.5);
        assert_close(assessment.vat_amount, 20.0);
        assert_close(assessment.total_due, 2.5 + 20.0 + 50.0);
        assert_eq!(assessment.table_version, DUTY_TABLE_VERSION);
    }

    #[test]
    fn test_rate_conversion_applies_to_dutiable_portion() {
        let calc = DutyCalculator::new(CustomsConfig {
            de_minimis_eur: 150.0,
            eur_to_mad_rate: 10.0,
            processing_fee: 40.0,
        });
        let books = category(DutyCategoryKey::Books);

        let assessment = calc.assess(250.0, books).unwrap();
        assert_close(assessment.dutiable_value, 1000.0);
        assert_close(assessment.duty_amount, 0.0);
        assert_close(assessment.vat_amount, 200.0);
        assert_close(assessment.total_due, 240.0);
        assert_eq!(assessment.currency, CurrencyCode::Mad);
    }

    #[test]
    fn test_unknown_category_falls_back_flagged() {
        let calc = eur_calculator();
        let assessment = calc.assess_by_key(300.0, "furniture").unwrap();
        assert!(assessment.category_fallback);
        assert_eq!(assessment.category, DutyCategoryKey::Other);

        let known = calc.assess_by_key(300.0, "electronics").unwrap();
        assert!(!known.category_fallback);
    }

    #[test]
    fn test_invalid_declared_value() {
        let calc = eur_calculator();
        let electronics = category(DutyCategoryKey::Electronics);
        assert!(matches!(
            calc.assess(-1.0, electronics),
            Err(CustomsError::InvalidDeclaredValue(_))
        ));
        assert!(matches!(
            calc.assess(f64::NAN, electronics),
            Err(CustomsError::InvalidDeclaredValue(_))
        ));
    }

    #[test]
    fn test_assessment_is_idempotent() {
        let calc = DutyCalculator::default();
        let clothing = category(DutyCategoryKey::Clothing);
        let first = calc.assess(400.0, clothing).unwrap();
        let second = calc.assess(400.0, clothing).unwrap();
        assert_eq!(first, second);
    }
}
