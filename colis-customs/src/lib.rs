pub mod assessment;
pub mod category;

pub use assessment::{CustomsConfig, DutyAssessment, DutyCalculator, ESTIMATE_NOTICE};
pub use category::{
    category, duty_table, resolve, resolve_or_other, DutyCategory, DutyCategoryKey,
    DUTY_TABLE_VERSION,
};

#[derive(Debug, thiserror::Error)]
pub enum CustomsError {
    #[error("unknown duty category: {0}")]
    CategoryNotFound(String),

    #[error("invalid declared value: {0}")]
    InvalidDeclaredValue(f64),
}

pub type CustomsResult<T> = Result<T, CustomsError>;
