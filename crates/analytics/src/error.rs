use thiserror::Error;

#[derive(Error, Debug)]
pub enum AnalyticsError {
    #[error("Not enough data to perform calculation: {0}")]
    NotEnoughData(String),

    #[error("Unknown breakdown dimension: {0}")]
    UnknownDimension(String),

    #[error("An unexpected error occurred during analytics calculation: {0}")]
    InternalError(String),
}
