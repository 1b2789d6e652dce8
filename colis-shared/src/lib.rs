pub mod currency;
pub mod fx;
pub mod pii;

pub use currency::{format_amount, round_display, CurrencyCode, CurrencyError};
pub use fx::DualCurrencyFormatter;
pub use pii::Masked;
