use std::num::ParseIntError;

use http::StatusCode;
use thiserror::Error;
use url::Url;

/// Possible errors while checking the overview of one or more hosts.
///
/// Every one of them aborts the whole check; nothing is retried.
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum ErrorKind {
    /// A limit string did not consist of exactly two comma-separated fields
    #[error("A list of two integers is required for limits, got {1} field(s) in `{0}`")]
    MalformedLimits(String, usize),
    /// One of the two limit fields is not an integer
    #[error("Cannot parse limit `{0}` as an integer: {1}")]
    NonNumericLimit(String, #[source] ParseIntError),
    /// A request header could not be built from the given value
    #[error("Invalid value for header `{0}`: `{1}`")]
    InvalidHeader(String, String),
    /// The HTTP client could not be initialized (e.g. no TLS backend)
    #[error("Cannot set up HTTP client: {0}")]
    ClientSetup(#[source] reqwest::Error),
    /// The overview URL for a host could not be built
    #[error("Cannot build overview URL from `{0}`: {1}")]
    InvalidUrl(String, #[source] url::ParseError),
    /// Connection refused, DNS failure, timeout or a broken body stream
    #[error("Network error while requesting {0}: {1}")]
    TransportError(Url, #[source] reqwest::Error),
    /// The management API answered with a non-success status code
    #[error("Unexpected response status {1} from {0}")]
    UnexpectedStatus(Url, StatusCode),
    /// The response body is not a valid overview document
    #[error("Cannot decode overview from {0}: {1}")]
    DecodeError(Url, #[source] serde_json::Error),
    /// Status lines could not be written
    #[error("Failed to write status output: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type used throughout this crate
pub type Result<T> = std::result::Result<T, ErrorKind>;
