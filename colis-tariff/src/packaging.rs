use serde::{Deserialize, Serialize};

use crate::{TariffError, TariffResult};

/// Packaging tiers offered at booking time
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[serde(rename_all = "lowercase")]
pub enum TierKind {
    Small,
    Medium,
    Large,
}

impl TierKind {
    pub fn label(&self) -> &'static str {
        match self {
            TierKind::Small => "small",
            TierKind::Medium => "medium",
            TierKind::Large => "large",
        }
    }
}

/// One packaging tier with its advertised weight range in kilograms.
///
/// The table is contiguous: each tier's `max_kg` equals the next tier's
/// `min_kg`, and a boundary weight belongs to the lower tier.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PackagingTier {
    pub kind: TierKind,
    pub min_kg: f64,
    pub max_kg: f64,
    pub popular: bool,
}

static TIERS: [PackagingTier; 3] = [
    PackagingTier {
        kind: TierKind::Small,
        min_kg: 0.1,
        max_kg: 5.0,
        popular: false,
    },
    PackagingTier {
        kind: TierKind::Medium,
        min_kg: 5.0,
        max_kg: 15.0,
        popular: true,
    },
    PackagingTier {
        kind: TierKind::Large,
        min_kg: 15.0,
        max_kg: 30.0,
        popular: false,
    },
];

pub fn tiers() -> &'static [PackagingTier] {
    &TIERS
}

/// Whether `weight_kg` belongs to the given tier.
///
/// Ownership is half-open above the previous tier's max, so every weight
/// in [0, 30] belongs to exactly one tier. A boundary weight (5 kg, 15 kg)
/// belongs to the tier whose max it is.
pub fn fits(kind: TierKind, weight_kg: f64) -> bool {
    if !weight_kg.is_finite() || weight_kg < 0.0 {
        return false;
    }
    let idx = kind as usize;
    let upper_ok = weight_kg <= TIERS[idx].max_kg;
    let lower_ok = match idx {
        0 => true,
        _ => weight_kg > TIERS[idx - 1].max_kg,
    };
    upper_ok && lower_ok
}

/// Smallest tier whose range contains the weight
pub fn recommend(weight_kg: f64) -> TariffResult<&'static PackagingTier> {
    if !weight_kg.is_finite() || weight_kg <= 0.0 {
        return Err(TariffError::InvalidWeight(weight_kg));
    }
    TIERS
        .iter()
        .find(|tier| fits(tier.kind, weight_kg))
        .ok_or(TariffError::OverMaxWeight {
            weight_kg,
            max_kg: TIERS[TIERS.len() - 1].max_kg,
        })
}

/// Share of a trip's remaining capacity this parcel would take
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CapacityStatus {
    /// Clamped to [0, 100] for the capacity bar
    pub percentage: f64,
    pub over_capacity: bool,
}

pub fn capacity_status(weight_kg: f64, trip_remaining_capacity_kg: f64) -> CapacityStatus {
    let over_capacity = weight_kg > trip_remaining_capacity_kg;
    let percentage = if trip_remaining_capacity_kg > 0.0 {
        (weight_kg / trip_remaining_capacity_kg * 100.0).clamp(0.0, 100.0)
    } else if weight_kg > 0.0 {
        100.0
    } else {
        0.0
    };
    CapacityStatus {
        percentage,
        over_capacity,
    }
}

/// Outcome of the booking-time fit check
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct BookingFit {
    pub tier: PackagingTier,
    pub capacity: CapacityStatus,
}

/// Validate a parcel against a trip before booking.
///
/// Capacity is checked before packaging fit: an over-capacity parcel
/// blocks booking even when a tier would hold it.
pub fn validate_booking(weight_kg: f64, trip_remaining_capacity_kg: f64) -> TariffResult<BookingFit> {
    if !weight_kg.is_finite() || weight_kg <= 0.0 {
        return Err(TariffError::InvalidWeight(weight_kg));
    }
    let capacity = capacity_status(weight_kg, trip_remaining_capacity_kg);
    if capacity.over_capacity {
        return Err(TariffError::OverCapacity {
            weight_kg,
            remaining_kg: trip_remaining_capacity_kg,
        });
    }
    let tier = recommend(weight_kg)?;
    Ok(BookingFit {
        tier: tier.clone(),
        capacity,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_table_is_contiguous() {
        for pair in TIERS.windows(2) {
            assert_eq!(pair[0].max_kg, pair[1].min_kg);
        }
    }

    #[test]
    fn test_recommend_smallest_matching_tier() {
        assert_eq!(recommend(0.5).unwrap().kind, TierKind::Small);
        assert_eq!(recommend(5.0).unwrap().kind, TierKind::Small);
        assert_eq!(recommend(5.01).unwrap().kind, TierKind::Medium);
        assert_eq!(recommend(15.0).unwrap().kind, TierKind::Medium);
        assert_eq!(recommend(15.5).unwrap().kind, TierKind::Large);
        assert_eq!(recommend(30.0).unwrap().kind, TierKind::Large);
    }

    #[test]
    fn test_recommend_rejects_bad_weights() {
        assert!(matches!(recommend(0.0), Err(TariffError::InvalidWeight(_))));
        assert!(matches!(
            recommend(-1.0),
            Err(TariffError::InvalidWeight(_))
        ));
        assert!(matches!(
            recommend(30.01),
            Err(TariffError::OverMaxWeight { .. })
        ));
    }

    #[test]
    fn test_exactly_one_tier_fits() {
        for tenths in 0..=300 {
            let weight = tenths as f64 / 10.0;
            let matching = [TierKind::Small, TierKind::Medium, TierKind::Large]
                .iter()
                .filter(|kind| fits(**kind, weight))
                .count();
            assert_eq!(matching, 1, "weight {} kg", weight);
        }
    }

    #[test]
    fn test_tier_monotonic_in_weight() {
        let mut previous = TierKind::Small;
        for tenths in 1..=300 {
            let weight = tenths as f64 / 10.0;
            let kind = recommend(weight).unwrap().kind;
            assert!(kind >= previous);
            previous = kind;
        }
    }

    #[test]
    fn test_capacity_status() {
        let status = capacity_status(5.0, 20.0);
        assert_eq!(status.percentage, 25.0);
        assert!(!status.over_capacity);

        let full = capacity_status(25.0, 20.0);
        assert_eq!(full.percentage, 100.0);
        assert!(full.over_capacity);

        let empty_trip = capacity_status(1.0, 0.0);
        assert!(empty_trip.over_capacity);
        assert_eq!(empty_trip.percentage, 100.0);
    }

    #[test]
    fn test_capacity_blocks_before_tier_fit() {
        // 4 kg fits the small tier but the trip only has 2 kg left
        let result = validate_booking(4.0, 2.0);
        assert!(matches!(result, Err(TariffError::OverCapacity { .. })));

        let fit = validate_booking(4.0, 10.0).unwrap();
        assert_eq!(fit.tier.kind, TierKind::Small);
        assert_eq!(fit.capacity.percentage, 40.0);
    }

    #[test]
    fn test_over_capacity_and_over_weight() {
        // capacity violation wins even when no tier could hold the parcel
        let result = validate_booking(40.0, 10.0);
        assert!(matches!(result, Err(TariffError::OverCapacity { .. })));
    }
}
