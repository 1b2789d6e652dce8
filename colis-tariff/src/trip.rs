use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::pricing::TripPriceParameters;

/// A published trip as the booking API exposes it to the booking flow
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TripSummary {
    pub id: Uuid,
    pub origin: String,
    pub destination: String,
    pub departure_time: DateTime<Utc>,
    pub price: TripPriceParameters,
    pub remaining_capacity_kg: f64,
    pub total_capacity_kg: f64,
    pub metadata: serde_json::Value,
}

/// Read side of the external booking API.
///
/// This core never implements it against a real backend; the host
/// application does. Test doubles live next to the tests.
#[async_trait]
pub trait TripDirectory: Send + Sync {
    async fn get_trip(
        &self,
        id: Uuid,
    ) -> Result<Option<TripSummary>, Box<dyn std::error::Error + Send + Sync>>;

    async fn list_open_trips(
        &self,
        origin: &str,
        destination: &str,
    ) -> Result<Vec<TripSummary>, Box<dyn std::error::Error + Send + Sync>>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use colis_shared::CurrencyCode;

    #[test]
    fn test_trip_summary_deserializes_from_api_payload() {
        let payload = serde_json::json!({
            "id": "3f2b8c64-9c1d-4e6a-8e6f-0a4f6f1c2d3e",
            "origin": "Brussels",
            "destination": "Casablanca",
            "departure_time": "2025-03-14T08:30:00Z",
            "price": {
                "base_price": 10.0,
                "price_per_kg": 2.5,
                "minimum_price": 15.0,
                "currency": "EUR"
            },
            "remaining_capacity_kg": 42.5,
            "total_capacity_kg": 120.0,
            "metadata": { "vehicle": "bus" }
        });

        let trip: TripSummary = serde_json::from_value(payload).unwrap();
        assert_eq!(trip.price.currency, CurrencyCode::Eur);
        assert_eq!(trip.remaining_capacity_kg, 42.5);
        assert_eq!(trip.metadata["vehicle"], "bus");
    }
}
