use std::str::Utf8Error;

/// Result alias used throughout the crate.
pub type Result<T> = std::result::Result<T, HL7Error>;

/// Errors produced while decoding a message or resolving a path against it.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum HL7Error {
    /// The raw buffer had zero length.
    #[error("no data")]
    EmptyInput,

    /// The normalized text does not start with the `MSH` header marker.
    #[error("no HL7 message")]
    NotAMessage,

    /// The header line is too short to declare all five delimiters.
    #[error("malformed header: expected at least 8 characters, found {length}")]
    MalformedHeader {
        /// Character length of the header line that was found.
        length: usize,
    },

    /// A path address could not be resolved. The cause is logged at debug level.
    #[error("invalid location: {0}")]
    InvalidLocation(String),

    /// The raw bytes were not UTF-8.
    #[error("input is not valid UTF-8: {0}")]
    Encoding(#[from] Utf8Error),
}

impl HL7Error {
    pub fn invalid_location(location: impl Into<String>) -> Self {
        HL7Error::InvalidLocation(location.into())
    }
}
