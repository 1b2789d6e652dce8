use serde::{Deserialize, Serialize};

/// Lifecycle states for a parcel, as emitted by the tracking feed
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ParcelStatus {
    Created,
    Confirmed,
    PickedUp,
    InTransitBus,
    CustomsSubmittedEu,
    CustomsInspectionEu,
    CustomsHeldEu,
    CustomsClearedEu,
    CustomsSubmittedMa,
    CustomsInspectionMa,
    CustomsHeldMa,
    DutyPaymentPending,
    CustomsClearedMa,
    OutForDelivery,
    DeliveryAttempted,
    Delivered,
    Cancelled,
    Lost,
    Damaged,
}

/// Action a parcel is waiting on before it can progress
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RequiredAction {
    AwaitingDocuments,
    AwaitingDutyPayment,
}

/// Per-status facts the UI derives everything else from.
///
/// One row per status; adding a status means adding a table row, not
/// touching scattered conditionals.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StatusFacts {
    pub status: ParcelStatus,

    /// Index into the forward journey; holds share their parent stage
    pub stage: u8,

    /// Hold sub-state: pauses progress without reverting stage
    pub is_hold: bool,

    pub is_terminal: bool,

    /// Contact is additionally enabled for delayed parcels, see
    /// [`ParcelStatus::contact_allowed`]
    pub contact_allowed: bool,

    pub required_action: Option<RequiredAction>,

    pub label: &'static str,
}

/// Progress shown for each forward stage. Hand-tuned for the tracking
/// bar; the only requirement is monotonicity.
const PROGRESS_BY_STAGE: [u8; 10] = [0, 10, 25, 40, 55, 65, 70, 80, 90, 100];

/// Ordered like the `ParcelStatus` variants; indexed by discriminant
static FACTS: [StatusFacts; 19] = [
    StatusFacts {
        status: ParcelStatus::Created,
        stage: 0,
        is_hold: false,
        is_terminal: false,
        contact_allowed: false,
        required_action: None,
        label: "Booking created",
    },
    StatusFacts {
        status: ParcelStatus::Confirmed,
        stage: 1,
        is_hold: false,
        is_terminal: false,
        contact_allowed: false,
        required_action: None,
        label: "Booking confirmed",
    },
    StatusFacts {
        status: ParcelStatus::PickedUp,
        stage: 2,
        is_hold: false,
        is_terminal: false,
        contact_allowed: false,
        required_action: None,
        label: "Picked up",
    },
    StatusFacts {
        status: ParcelStatus::InTransitBus,
        stage: 3,
        is_hold: false,
        is_terminal: false,
        contact_allowed: false,
        required_action: None,
        label: "In transit",
    },
    StatusFacts {
        status: ParcelStatus::CustomsSubmittedEu,
        stage: 4,
        is_hold: false,
        is_terminal: false,
        contact_allowed: false,
        required_action: None,
        label: "EU customs: submitted",
    },
    StatusFacts {
        status: ParcelStatus::CustomsInspectionEu,
        stage: 4,
        is_hold: false,
        is_terminal: false,
        contact_allowed: false,
        required_action: None,
        label: "EU customs: under inspection",
    },
    StatusFacts {
        status: ParcelStatus::CustomsHeldEu,
        stage: 4,
        is_hold: true,
        is_terminal: false,
        contact_allowed: false,
        required_action: Some(RequiredAction::AwaitingDocuments),
        label: "EU customs: held",
    },
    StatusFacts {
        status: ParcelStatus::CustomsClearedEu,
        stage: 5,
        is_hold: false,
        is_terminal: false,
        contact_allowed: false,
        required_action: None,
        label: "EU customs: cleared",
    },
    StatusFacts {
        status: ParcelStatus::CustomsSubmittedMa,
        stage: 6,
        is_hold: false,
        is_terminal: false,
        contact_allowed: false,
        required_action: None,
        label: "Morocco customs: submitted",
    },
    StatusFacts {
        status: ParcelStatus::CustomsInspectionMa,
        stage: 6,
        is_hold: false,
        is_terminal: false,
        contact_allowed: false,
        required_action: None,
        label: "Morocco customs: under inspection",
    },
    StatusFacts {
        status: ParcelStatus::CustomsHeldMa,
        stage: 6,
        is_hold: true,
        is_terminal: false,
        contact_allowed: false,
        required_action: Some(RequiredAction::AwaitingDocuments),
        label: "Morocco customs: held",
    },
    StatusFacts {
        status: ParcelStatus::DutyPaymentPending,
        stage: 6,
        is_hold: true,
        is_terminal: false,
        contact_allowed: false,
        required_action: Some(RequiredAction::AwaitingDutyPayment),
        label: "Import duty payment pending",
    },
    StatusFacts {
        status: ParcelStatus::CustomsClearedMa,
        stage: 7,
        is_hold: false,
        is_terminal: false,
        contact_allowed: false,
        required_action: None,
        label: "Morocco customs: cleared",
    },
    StatusFacts {
        status: ParcelStatus::OutForDelivery,
        stage: 8,
        is_hold: false,
        is_terminal: false,
        contact_allowed: true,
        required_action: None,
        label: "Out for delivery",
    },
    StatusFacts {
        status: ParcelStatus::DeliveryAttempted,
        stage: 8,
        is_hold: false,
        is_terminal: false,
        contact_allowed: true,
        required_action: None,
        label: "Delivery attempted",
    },
    StatusFacts {
        status: ParcelStatus::Delivered,
        stage: 9,
        is_hold: false,
        is_terminal: true,
        contact_allowed: false,
        required_action: None,
        label: "Delivered",
    },
    StatusFacts {
        status: ParcelStatus::Cancelled,
        stage: 0,
        is_hold: false,
        is_terminal: true,
        contact_allowed: false,
        required_action: None,
        label: "Cancelled",
    },
    StatusFacts {
        status: ParcelStatus::Lost,
        stage: 0,
        is_hold: false,
        is_terminal: true,
        contact_allowed: false,
        required_action: None,
        label: "Lost",
    },
    StatusFacts {
        status: ParcelStatus::Damaged,
        stage: 0,
        is_hold: false,
        is_terminal: true,
        contact_allowed: false,
        required_action: None,
        label: "Damaged",
    },
];

/// How many failed delivery attempts are tolerated before the backend is
/// expected to terminalize the parcel
pub const MAX_DELIVERY_ATTEMPTS: u32 = 3;

#[derive(Debug, thiserror::Error)]
#[error("unrecognized parcel status from tracking feed: {0:?}")]
pub struct UnrecognizedStatus(pub String);

#[derive(Debug, thiserror::Error)]
#[error("illegal status transition from {from:?} to {to:?}")]
pub struct IllegalTransition {
    pub from: ParcelStatus,
    pub to: ParcelStatus,
}

impl ParcelStatus {
    pub fn facts(&self) -> &'static StatusFacts {
        &FACTS[*self as usize]
    }

    pub fn label(&self) -> &'static str {
        self.facts().label
    }

    pub fn is_terminal(&self) -> bool {
        self.facts().is_terminal
    }

    pub fn is_hold(&self) -> bool {
        self.facts().is_hold
    }

    /// Whether this is one of the failure endings (cancelled, lost,
    /// damaged) rather than a point on the forward journey
    pub fn is_failure(&self) -> bool {
        matches!(
            self,
            ParcelStatus::Cancelled | ParcelStatus::Lost | ParcelStatus::Damaged
        )
    }

    pub fn required_action(&self) -> Option<RequiredAction> {
        self.facts().required_action
    }

    /// Completion percentage for the tracking bar.
    ///
    /// Monotonic along the forward journey; holds report their parent
    /// stage so progress never regresses while a parcel is held. Failure
    /// endings have no meaningful percentage and report `None`.
    pub fn progress(&self) -> Option<u8> {
        if self.is_failure() {
            return None;
        }
        Some(PROGRESS_BY_STAGE[self.facts().stage as usize])
    }

    /// Whether direct driver contact is currently permitted.
    ///
    /// Allowed once the parcel is locally dispatched, or at any
    /// non-terminal point when the parcel is running late against its
    /// estimated delivery window.
    pub fn contact_allowed(&self, delayed: bool) -> bool {
        self.facts().contact_allowed || (delayed && !self.is_terminal())
    }

    /// Forward transitions out of this status. Failure endings are not
    /// listed here; see [`ParcelStatus::can_transition`].
    pub fn successors(&self) -> &'static [ParcelStatus] {
        use ParcelStatus::*;
        match self {
            Created => &[Confirmed],
            Confirmed => &[PickedUp],
            PickedUp => &[InTransitBus],
            InTransitBus => &[CustomsSubmittedEu],
            CustomsSubmittedEu => &[CustomsInspectionEu, CustomsHeldEu, CustomsClearedEu],
            CustomsInspectionEu => &[CustomsHeldEu, CustomsClearedEu],
            CustomsHeldEu => &[CustomsInspectionEu, CustomsClearedEu],
            CustomsClearedEu => &[CustomsSubmittedMa],
            CustomsSubmittedMa => &[
                CustomsInspectionMa,
                CustomsHeldMa,
                DutyPaymentPending,
                CustomsClearedMa,
            ],
            CustomsInspectionMa => &[CustomsHeldMa, DutyPaymentPending, CustomsClearedMa],
            CustomsHeldMa => &[CustomsInspectionMa, DutyPaymentPending, CustomsClearedMa],
            DutyPaymentPending => &[CustomsClearedMa],
            CustomsClearedMa => &[OutForDelivery],
            OutForDelivery => &[DeliveryAttempted, Delivered],
            // retry goes straight back out, no re-traversal
            DeliveryAttempted => &[OutForDelivery],
            Delivered | Cancelled | Lost | Damaged => &[],
        }
    }

    /// Whether `to` is a legal next status. Any non-terminal status can
    /// fall off the forward path into a failure ending.
    pub fn can_transition(&self, to: ParcelStatus) -> bool {
        if self.successors().contains(&to) {
            return true;
        }
        to.is_failure() && !self.is_terminal()
    }

    pub fn ensure_transition(&self, to: ParcelStatus) -> Result<(), IllegalTransition> {
        if self.can_transition(to) {
            Ok(())
        } else {
            Err(IllegalTransition { from: *self, to })
        }
    }

    /// Whether another delivery attempt may be scheduled after `attempts`
    /// failed ones
    pub fn retry_allowed(attempts: u32) -> bool {
        attempts < MAX_DELIVERY_ATTEMPTS
    }

    /// Parse a raw wire value from the tracking feed
    pub fn parse(raw: &str) -> Result<Self, UnrecognizedStatus> {
        use ParcelStatus::*;
        match raw.trim().to_ascii_uppercase().as_str() {
            "CREATED" => Ok(Created),
            "CONFIRMED" => Ok(Confirmed),
            "PICKED_UP" => Ok(PickedUp),
            "IN_TRANSIT_BUS" => Ok(InTransitBus),
            "CUSTOMS_SUBMITTED_EU" => Ok(CustomsSubmittedEu),
            "CUSTOMS_INSPECTION_EU" => Ok(CustomsInspectionEu),
            "CUSTOMS_HELD_EU" => Ok(CustomsHeldEu),
            "CUSTOMS_CLEARED_EU" => Ok(CustomsClearedEu),
            "CUSTOMS_SUBMITTED_MA" => Ok(CustomsSubmittedMa),
            "CUSTOMS_INSPECTION_MA" => Ok(CustomsInspectionMa),
            "CUSTOMS_HELD_MA" => Ok(CustomsHeldMa),
            "DUTY_PAYMENT_PENDING" => Ok(DutyPaymentPending),
            "CUSTOMS_CLEARED_MA" => Ok(CustomsClearedMa),
            "OUT_FOR_DELIVERY" => Ok(OutForDelivery),
            "DELIVERY_ATTEMPTED" => Ok(DeliveryAttempted),
            "DELIVERED" => Ok(Delivered),
            "CANCELLED" => Ok(Cancelled),
            "LOST" => Ok(Lost),
            "DAMAGED" => Ok(Damaged),
            _ => Err(UnrecognizedStatus(raw.to_string())),
        }
    }

    pub fn all() -> &'static [ParcelStatus] {
        static ALL: [ParcelStatus; 19] = [
            ParcelStatus::Created,
            ParcelStatus::Confirmed,
            ParcelStatus::PickedUp,
            ParcelStatus::InTransitBus,
            ParcelStatus::CustomsSubmittedEu,
            ParcelStatus::CustomsInspectionEu,
            ParcelStatus::CustomsHeldEu,
            ParcelStatus::CustomsClearedEu,
            ParcelStatus::CustomsSubmittedMa,
            ParcelStatus::CustomsInspectionMa,
            ParcelStatus::CustomsHeldMa,
            ParcelStatus::DutyPaymentPending,
            ParcelStatus::CustomsClearedMa,
            ParcelStatus::OutForDelivery,
            ParcelStatus::DeliveryAttempted,
            ParcelStatus::Delivered,
            ParcelStatus::Cancelled,
            ParcelStatus::Lost,
            ParcelStatus::Damaged,
        ];
        &ALL
    }
}

/// What the tracking card renders for one status value.
///
/// `status` is `None` when the feed sent something this build does not
/// recognize; the card then degrades to a generic processing view instead
/// of crashing, and the value is reported for schema-drift monitoring.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct DisplayState {
    pub status: Option<ParcelStatus>,
    pub label: String,
    pub progress: Option<u8>,
    pub contact_allowed: bool,
    pub required_action: Option<RequiredAction>,
}

impl DisplayState {
    pub fn for_status(status: ParcelStatus, delayed: bool) -> Self {
        Self {
            status: Some(status),
            label: status.label().to_string(),
            progress: status.progress(),
            contact_allowed: status.contact_allowed(delayed),
            required_action: status.required_action(),
        }
    }

    pub fn from_raw(raw: &str, delayed: bool) -> Self {
        match ParcelStatus::parse(raw) {
            Ok(status) => Self::for_status(status, delayed),
            Err(unknown) => {
                tracing::warn!(
                    raw = %unknown.0,
                    "tracking feed sent an unknown status, degrading to processing view"
                );
                Self {
                    status: None,
                    label: "Processing".to_string(),
                    progress: Some(0),
                    contact_allowed: delayed,
                    required_action: None,
                }
            }
        }
    }
}
