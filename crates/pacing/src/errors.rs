use thiserror::Error;
use tracks::TrackError;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum PacingError {
    #[error("No positive real velocity for {power} W on slope {slope}")]
    NoPositiveRoot { power: f64, slope: f64 },

    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),

    #[error("Track error: {0}")]
    Track(#[from] TrackError),
}

impl PacingError {
    pub(crate) fn invalid(msg: impl Into<String>) -> Self {
        PacingError::InvalidParameter(msg.into())
    }
}
