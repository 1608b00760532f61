use smartinvo_backend::ServiceError;
use smartinvo_types::ValidationError;
use thiserror::Error;

/// Result type for smartinvo-runtime operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors surfaced to the caller of a user-initiated action.
///
/// Failures of passive refreshes never become an `Error`; they are logged
/// and the affected value keeps its last good state.
#[derive(Error, Debug)]
pub enum Error {
    /// Required input missing or malformed; no request was sent
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// The service failed or could not be reached
    #[error(transparent)]
    Service(#[from] ServiceError),

    /// A recommendation request is already in flight
    #[error("a recommendation request is already in flight")]
    Busy,

    #[error("configuration error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl Error {
    /// True for errors that belong in front of the user rather than in a log
    pub fn is_user_visible(&self) -> bool {
        matches!(self, Error::Validation(_) | Error::Service(_) | Error::Busy)
    }

    pub fn is_validation(&self) -> bool {
        matches!(self, Error::Validation(_))
    }
}

impl From<toml::de::Error> for Error {
    fn from(err: toml::de::Error) -> Self {
        Error::Config(err.to_string())
    }
}

impl From<toml::ser::Error> for Error {
    fn from(err: toml::ser::Error) -> Self {
        Error::Config(err.to_string())
    }
}
