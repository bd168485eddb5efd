use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum TrackError {
    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),

    #[error("Track must contain at least one segment")]
    EmptyTrack,

    #[error("Invalid segment {index}: {reason}")]
    InvalidSegment { index: usize, reason: String },
}

impl TrackError {
    pub(crate) fn invalid(msg: impl Into<String>) -> Self {
        TrackError::InvalidParameter(msg.into())
    }
}
