use thiserror::Error;

/// Why a raw record was rejected at the normalization boundary
#[derive(Error, Debug, Clone, PartialEq)]
pub enum RecordError {
    #[error("Record has no timestamp")]
    MissingTimestamp,

    #[error("Review has no rating")]
    MissingRating,

    #[error("Review rating {0} outside the 1-5 scale")]
    RatingOutOfRange(f64),

    #[error("Classifier confidence {0} outside the 0-1 range")]
    ConfidenceOutOfRange(f64),
}
