use std::fmt;

use crate::bearing::SectionName;

/// Fixed message shown for every remote failure.
pub const REQUEST_FAILED_MSG: &str = "failed to fetch prediction";

/// All errors that can occur in the predictor.
#[derive(Debug)]
pub enum PredictorError {
    /// A feature slot could not be read as a finite number. Raised before any request.
    InvalidFeature { value: String },
    /// The prediction request failed: transport, non-2xx status or undecodable body.
    RequestFailed,
    /// A probability string in a bearing section is not a number.
    InvalidProbability { section: SectionName, value: String },
    /// A bearing section violates the parallel arrays layout.
    MalformedSection { section: SectionName, reason: String },
    /// Invalid client configuration.
    InvalidConfig(String),
    /// An underlying I/O error not covered by the above variants.
    Io(std::io::Error),
}

impl fmt::Display for PredictorError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidFeature { value } => write!(f, "\"{value}\" is not a valid number"),
            Self::RequestFailed => f.write_str(REQUEST_FAILED_MSG),
            Self::InvalidProbability { section, value } => {
                write!(f, "{section}: \"{value}\" is not a valid probability")
            }
            Self::MalformedSection { section, reason } => write!(f, "{section}: {reason}"),
            Self::InvalidConfig(msg) => write!(f, "invalid config: {msg}"),
            Self::Io(e) => write!(f, "io error: {e}"),
        }
    }
}

impl std::error::Error for PredictorError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io(e) => Some(e),
            _ => None,
        }
    }
}

impl From<std::io::Error> for PredictorError {
    fn from(e: std::io::Error) -> Self {
        Self::Io(e)
    }
}
