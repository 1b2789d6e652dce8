pub mod customs_view;
pub mod feed;
pub mod status;
pub mod timeline;

pub use customs_view::{
    build_customs_info, CustomsDeclaration, CustomsDocument, CustomsInfo, CustomsStage,
    DocumentStatus, DutyInfo, DutyPaymentStatus,
};
pub use feed::{contact_card, DriverContact, TrackingFeed, TrackingUpdate};
pub use status::{
    DisplayState, IllegalTransition, ParcelStatus, RequiredAction, StatusFacts,
    UnrecognizedStatus, MAX_DELIVERY_ATTEMPTS,
};
pub use timeline::{Timeline, TimelineEntry, TimelineIssue};
