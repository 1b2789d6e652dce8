use serde::{Deserialize, Serialize};

use colis_shared::CurrencyCode;

use crate::{TariffError, TariffResult};

/// Price parameters published with a trip by its organization.
///
/// Immutable once the trip is live; the booking API is the owner, this
/// engine only reads them.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TripPriceParameters {
    pub base_price: f64,
    pub price_per_kg: f64,
    pub minimum_price: f64,
    pub currency: CurrencyCode,
}

impl TripPriceParameters {
    /// All money fields must be finite and non-negative
    fn validate(&self) -> Result<(), String> {
        let fields = [
            ("base_price", self.base_price),
            ("price_per_kg", self.price_per_kg),
            ("minimum_price", self.minimum_price),
        ];
        for (name, value) in fields {
            if !value.is_finite() || value < 0.0 {
                return Err(format!("{} is {}", name, value));
            }
        }
        Ok(())
    }
}

/// Line-by-line charge for one parcel on one trip.
///
/// Derived on every weight or price change, never stored or mutated in
/// place. Amounts are unrounded; rounding happens at display time only.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ParcelChargeBreakdown {
    pub base_component: f64,
    pub weight_component: f64,
    pub insurance_fee: f64,
    pub subtotal: f64,
    pub tax: f64,
    pub total: f64,
    pub currency: CurrencyCode,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PricingConfig {
    /// Flat insurance fee applied to every shipment, in the trip's currency
    pub insurance_fee: f64,

    /// Tax applied on the subtotal
    pub tax_rate: f64,
}

impl Default for PricingConfig {
    fn default() -> Self {
        Self {
            insurance_fee: 3.50,
            tax_rate: 0.19,
        }
    }
}

/// Computes shipment charges from trip price parameters and parcel weight
pub struct PricingEngine {
    config: PricingConfig,
}

impl PricingEngine {
    pub fn new(config: PricingConfig) -> Self {
        Self { config }
    }

    /// Compute the charge for a parcel of `weight_kg` on a trip priced by
    /// `params`.
    ///
    /// Currency is pass-through: this engine never converts. The
    /// dual-currency hint shown next to the total is a separate,
    /// display-only concern.
    pub fn compute_charge(
        &self,
        weight_kg: f64,
        params: &TripPriceParameters,
    ) -> TariffResult<ParcelChargeBreakdown> {
        if !weight_kg.is_finite() || weight_kg <= 0.0 {
            return Err(TariffError::InvalidWeight(weight_kg));
        }
        if let Err(detail) = params.validate() {
            // Data-integrity problem in the trip aggregate, not user input
            tracing::error!(%detail, "rejecting trip price parameters");
            return Err(TariffError::InvalidPriceParameters(detail));
        }

        let base_component = params.base_price.max(params.minimum_price);
        let weight_component = weight_kg * params.price_per_kg;
        let insurance_fee = self.config.insurance_fee;
        let subtotal = base_component + weight_component + insurance_fee;
        let tax = subtotal * self.config.tax_rate;
        let total = subtotal + tax;

        Ok(ParcelChargeBreakdown {
            base_component,
            weight_component,
            insurance_fee,
            subtotal,
            tax,
            total,
            currency: params.currency,
        })
    }
}

impl Default for PricingEngine {
    fn default() -> Self {
        Self::new(PricingConfig::default())
    }
}
