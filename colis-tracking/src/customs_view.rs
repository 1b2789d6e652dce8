use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

use colis_customs::{CustomsResult, DutyAssessment, DutyCalculator};

use crate::status::ParcelStatus;

/// Which border the parcel is currently being cleared at
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum CustomsStage {
    EuExit,
    MaEntry,
}

impl CustomsStage {
    /// The stage a status belongs to, or `None` outside customs
    pub fn of(status: ParcelStatus) -> Option<Self> {
        use ParcelStatus::*;
        match status {
            CustomsSubmittedEu | CustomsInspectionEu | CustomsHeldEu | CustomsClearedEu => {
                Some(CustomsStage::EuExit)
            }
            CustomsSubmittedMa | CustomsInspectionMa | CustomsHeldMa | DutyPaymentPending
            | CustomsClearedMa => Some(CustomsStage::MaEntry),
            _ => None,
        }
    }

    /// Typical clearance time quoted to customers for this border
    pub fn expected_clearance(&self) -> Duration {
        match self {
            CustomsStage::EuExit => Duration::hours(12),
            CustomsStage::MaEntry => Duration::hours(24),
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum DutyPaymentStatus {
    Pending,
    Processing,
    Paid,
    Waived,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum DocumentStatus {
    Pending,
    Submitted,
    Approved,
    Rejected,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CustomsDocument {
    pub name: String,
    pub status: DocumentStatus,
}

/// Duty estimate plus where its payment stands
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DutyInfo {
    pub assessment: DutyAssessment,
    pub payment_status: DutyPaymentStatus,
}

/// What the sender declared at booking; input to the duty estimate
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CustomsDeclaration {
    pub declared_value_eur: f64,

    /// Raw category key from the booking form; unknown values assess at
    /// the generic rate, flagged on the assessment
    pub category: String,
}

/// Customs card shown while a parcel sits inside a clearance stage.
///
/// Logically superseded once the parcel moves to the next non-customs
/// status; the builder returns `None` there and the UI drops the card.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CustomsInfo {
    pub stage: CustomsStage,
    pub status: ParcelStatus,
    pub submitted_at: DateTime<Utc>,
    pub estimated_clearance_time: DateTime<Utc>,
    pub duty_info: Option<DutyInfo>,
    pub documents: Vec<CustomsDocument>,
    pub delay_reason: Option<String>,
}

/// Build the customs card for the current status, or `None` when the
/// parcel is not inside a customs stage.
///
/// The duty estimate is recomputed on every build while payment is
/// pending, so a rate-table change can never leave a stale figure on
/// screen.
pub fn build_customs_info(
    status: ParcelStatus,
    submitted_at: DateTime<Utc>,
    declaration: &CustomsDeclaration,
    documents: Vec<CustomsDocument>,
    delay_reason: Option<String>,
    calculator: &DutyCalculator,
) -> CustomsResult<Option<CustomsInfo>> {
    let stage = match CustomsStage::of(status) {
        Some(stage) => stage,
        None => return Ok(None),
    };

    let duty_info = if status == ParcelStatus::DutyPaymentPending {
        let assessment =
            calculator.assess_by_key(declaration.declared_value_eur, &declaration.category)?;
        Some(DutyInfo {
            assessment,
            payment_status: DutyPaymentStatus::Pending,
        })
    } else {
        None
    };

    Ok(Some(CustomsInfo {
        stage,
        status,
        submitted_at,
        estimated_clearance_time: submitted_at + stage.expected_clearance(),
        duty_info,
        documents,
        delay_reason,
    }))
}
