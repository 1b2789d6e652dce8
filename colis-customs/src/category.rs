use serde::{Deserialize, Serialize};

use crate::CustomsError;

/// Version of the duty-rate table below.
///
/// The backend re-validates assessments against its own copy of this
/// table; every assessment carries the version it was computed with so a
/// client/server mismatch shows up instead of silently disagreeing.
pub const DUTY_TABLE_VERSION: &str = "2025-03";

/// Goods categories a sender can declare
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum DutyCategoryKey {
    Electronics,
    Clothing,
    Cosmetics,
    Books,
    Food,
    Toys,
    Jewelry,
    Sports,
    Other,
}

impl DutyCategoryKey {
    pub fn label(&self) -> &'static str {
        match self {
            DutyCategoryKey::Electronics => "Electronics",
            DutyCategoryKey::Clothing => "Clothing",
            DutyCategoryKey::Cosmetics => "Cosmetics",
            DutyCategoryKey::Books => "Books",
            DutyCategoryKey::Food => "Food",
            DutyCategoryKey::Toys => "Toys",
            DutyCategoryKey::Jewelry => "Jewelry",
            DutyCategoryKey::Sports => "Sports equipment",
            DutyCategoryKey::Other => "Other",
        }
    }

    /// Parse the key the booking form sends ("electronics", "ELECTRONICS", ...)
    pub fn parse(raw: &str) -> Result<Self, CustomsError> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "electronics" => Ok(DutyCategoryKey::Electronics),
            "clothing" => Ok(DutyCategoryKey::Clothing),
            "cosmetics" => Ok(DutyCategoryKey::Cosmetics),
            "books" => Ok(DutyCategoryKey::Books),
            "food" => Ok(DutyCategoryKey::Food),
            "toys" => Ok(DutyCategoryKey::Toys),
            "jewelry" => Ok(DutyCategoryKey::Jewelry),
            "sports" => Ok(DutyCategoryKey::Sports),
            "other" => Ok(DutyCategoryKey::Other),
            _ => Err(CustomsError::CategoryNotFound(raw.to_string())),
        }
    }
}

/// Import duty and VAT rates for one goods category.
///
/// `vat_rate` is 0.20 across the whole current table but stays per
/// category so a future table version can differentiate.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct DutyCategory {
    pub key: DutyCategoryKey,
    pub duty_rate: f64,
    pub vat_rate: f64,
}

static TABLE: [DutyCategory; 9] = [
    DutyCategory {
        key: DutyCategoryKey::Electronics,
        duty_rate: 0.025,
        vat_rate: 0.20,
    },
    DutyCategory {
        key: DutyCategoryKey::Clothing,
        duty_rate: 0.25,
        vat_rate: 0.20,
    },
    DutyCategory {
        key: DutyCategoryKey::Cosmetics,
        duty_rate: 0.25,
        vat_rate: 0.20,
    },
    DutyCategory {
        key: DutyCategoryKey::Books,
        duty_rate: 0.0,
        vat_rate: 0.20,
    },
    DutyCategory {
        key: DutyCategoryKey::Food,
        duty_rate: 0.175,
        vat_rate: 0.20,
    },
    DutyCategory {
        key: DutyCategoryKey::Toys,
        duty_rate: 0.25,
        vat_rate: 0.20,
    },
    DutyCategory {
        key: DutyCategoryKey::Jewelry,
        duty_rate: 0.30,
        vat_rate: 0.20,
    },
    DutyCategory {
        key: DutyCategoryKey::Sports,
        duty_rate: 0.175,
        vat_rate: 0.20,
    },
    DutyCategory {
        key: DutyCategoryKey::Other,
        duty_rate: 0.175,
        vat_rate: 0.20,
    },
];

pub fn duty_table() -> &'static [DutyCategory] {
    &TABLE
}

pub fn category(key: DutyCategoryKey) -> &'static DutyCategory {
    // TABLE is ordered by key discriminant; alignment is pinned by a test
    &TABLE[key as usize]
}

/// Resolve a raw category key, failing on unknown values
pub fn resolve(raw: &str) -> Result<&'static DutyCategory, CustomsError> {
    DutyCategoryKey::parse(raw).map(category)
}

/// Resolve a raw category key, falling back to `Other` for unknown values.
///
/// Returns whether the fallback was taken; callers must surface that flag
/// next to the estimate rather than presenting it as a category match.
pub fn resolve_or_other(raw: &str) -> (&'static DutyCategory, bool) {
    match resolve(raw) {
        Ok(found) => (found, false),
        Err(_) => {
            tracing::warn!(category = raw, "unknown duty category, assessing at the generic rate");
            (category(DutyCategoryKey::Other), true)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_table_covers_every_key() {
        let keys = [
            DutyCategoryKey::Electronics,
            DutyCategoryKey::Clothing,
            DutyCategoryKey::Cosmetics,
            DutyCategoryKey::Books,
            DutyCategoryKey::Food,
            DutyCategoryKey::Toys,
            DutyCategoryKey::Jewelry,
            DutyCategoryKey::Sports,
            DutyCategoryKey::Other,
        ];
        for key in keys {
            let entry = category(key);
            assert_eq!(entry.key, key);
            assert!(entry.duty_rate >= 0.0 && entry.duty_rate <= 1.0);
            assert!(entry.vat_rate >= 0.0 && entry.vat_rate <= 1.0);
        }
    }

    #[test]
    fn test_parse_is_case_insensitive() {
        assert_eq!(
            DutyCategoryKey::parse("Electronics").unwrap(),
            DutyCategoryKey::Electronics
        );
        assert_eq!(
            DutyCategoryKey::parse(" BOOKS ").unwrap(),
            DutyCategoryKey::Books
        );
    }

    #[test]
    fn test_unknown_key_fails_resolution() {
        assert!(matches!(
            resolve("furniture"),
            Err(CustomsError::CategoryNotFound(_))
        ));
    }

    #[test]
    fn test_fallback_is_flagged() {
        let (entry, fell_back) = resolve_or_other("furniture");
        assert_eq!(entry.key, DutyCategoryKey::Other);
        assert!(fell_back);

        let (entry, fell_back) = resolve_or_other("books");
        assert_eq!(entry.key, DutyCategoryKey::Books);
        assert!(!fell_back);
    }

    #[test]
    fn test_serde_uses_wire_names() {
        let json = serde_json::to_string(&DutyCategoryKey::Electronics).unwrap();
        assert_eq!(json, "\"ELECTRONICS\"");
    }
}
