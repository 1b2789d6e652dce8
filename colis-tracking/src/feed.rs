use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use colis_shared::Masked;

use crate::status::ParcelStatus;
use crate::timeline::Timeline;

/// One status emission from the tracking API, polled or pushed.
///
/// `status` stays a raw string here: the feed is where schema drift
/// enters, and parsing is the state machine's job, not the transport's.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrackingUpdate {
    pub parcel_id: Uuid,
    pub status: String,
    pub location: Option<String>,
    pub timestamp: DateTime<Utc>,
    #[serde(default)]
    pub metadata: serde_json::Value,
}

impl TrackingUpdate {
    pub fn parsed_status(&self) -> Option<ParcelStatus> {
        ParcelStatus::parse(&self.status).ok()
    }
}

/// Read side of the external tracking API.
///
/// Implemented by the host application; test doubles live next to the
/// tests. All asynchrony lives behind this seam, the engine itself stays
/// synchronous and pure.
#[async_trait]
pub trait TrackingFeed: Send + Sync {
    async fn current(
        &self,
        parcel_id: Uuid,
    ) -> Result<Option<TrackingUpdate>, Box<dyn std::error::Error + Send + Sync>>;

    async fn timeline(
        &self,
        parcel_id: Uuid,
    ) -> Result<Timeline, Box<dyn std::error::Error + Send + Sync>>;
}

/// Driver contact details, phone masked against accidental logging
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DriverContact {
    pub name: String,
    pub phone: Masked<String>,
}

/// Hand out the driver's contact card only when the current status (or a
/// delay flag) permits direct contact
pub fn contact_card(
    status: ParcelStatus,
    delayed: bool,
    contact: DriverContact,
) -> Option<DriverContact> {
    if status.contact_allowed(delayed) {
        Some(contact)
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn update(status: &str) -> TrackingUpdate {
        serde_json::from_value(serde_json::json!({
            "parcel_id": "7d4e1c3a-2b5f-4a8d-9c6e-1f0a2b3c4d5e",
            "status": status,
            "location": "Algeciras",
            "timestamp": "2025-03-12T14:00:00Z"
        }))
        .unwrap()
    }

    #[test]
    fn test_update_deserializes_without_metadata() {
        let parsed = update("IN_TRANSIT_BUS");
        assert_eq!(parsed.parsed_status(), Some(ParcelStatus::InTransitBus));
        assert!(parsed.metadata.is_null());
    }

    #[test]
    fn test_unknown_status_survives_deserialization() {
        let parsed = update("WAREHOUSE_SCAN");
        assert_eq!(parsed.parsed_status(), None);
        assert_eq!(parsed.status, "WAREHOUSE_SCAN");
    }

    #[test]
    fn test_contact_card_gate() {
        let contact = DriverContact {
            name: "Youssef".to_string(),
            phone: Masked::new("+212600123456".to_string()),
        };

        assert!(contact_card(ParcelStatus::OutForDelivery, false, contact.clone()).is_some());
        assert!(contact_card(ParcelStatus::InTransitBus, false, contact.clone()).is_none());
        assert!(contact_card(ParcelStatus::InTransitBus, true, contact).is_some());
    }

    #[test]
    fn test_contact_phone_masked_in_debug() {
        let contact = DriverContact {
            name: "Youssef".to_string(),
            phone: Masked::new("+212600123456".to_string()),
        };
        let rendered = format!("{:?}", contact);
        assert!(!rendered.contains("+212600123456"));
    }
}
