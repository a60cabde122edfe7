use thiserror::Error;

/// Failures of a remote e-Solat fetch. These are the only errors the data
/// service surfaces to callers.
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("Failed to fetch prayer times. Please check your internet connection. ({0})")]
    Network(#[source] reqwest::Error),

    #[error("HTTP error! status: {0}")]
    HttpStatus(u16),

    #[error("API error: {0}")]
    ApiStatus(String),

    #[error("Unreadable response from prayer time server: {0}")]
    Decode(String),
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum CalcError {
    #[error("No prayer times to compare against")]
    NoCandidates,

    #[error("Bad time '{0}'")]
    InvalidTime(String),
}
