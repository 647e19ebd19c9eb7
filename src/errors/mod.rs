pub mod types;
pub mod classification;

pub use types::PwnError;
pub use classification::ErrorClassification;
