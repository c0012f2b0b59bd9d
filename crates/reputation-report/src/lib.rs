//! Plain-language narratives and the combined reputation report.

pub mod narrative;
pub mod report;

pub use narrative::{describe_risk, describe_trend, Summarize};
pub use report::{ReportBuilder, ReputationReport};
