pub mod models;
pub mod scorer;

mod recommendations;

pub use models::*;
pub use scorer::{RiskAnalyzer, INSUFFICIENT_DATA_SCORE};
