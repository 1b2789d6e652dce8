pub mod packaging;
pub mod pricing;
pub mod trip;

pub use packaging::{
    capacity_status, fits, recommend, validate_booking, BookingFit, CapacityStatus, PackagingTier,
    TierKind,
};
pub use pricing::{ParcelChargeBreakdown, PricingConfig, PricingEngine, TripPriceParameters};
pub use trip::{TripDirectory, TripSummary};

#[derive(Debug, thiserror::Error)]
pub enum TariffError {
    #[error("invalid parcel weight: {0} kg")]
    InvalidWeight(f64),

    #[error("invalid trip price parameters: {0}")]
    InvalidPriceParameters(String),

    #[error("parcel weight {weight_kg} kg exceeds the largest packaging tier ({max_kg} kg)")]
    OverMaxWeight { weight_kg: f64, max_kg: f64 },

    #[error("parcel weight {weight_kg} kg exceeds remaining trip capacity ({remaining_kg} kg)")]
    OverCapacity { weight_kg: f64, remaining_kg: f64 },
}

pub type TariffResult<T> = Result<T, TariffError>;
