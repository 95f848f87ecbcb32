//! use csrkit::error::Error;

use thiserror::Error;

/// Represents errors that can occur while generating keys and certificate
/// requests.
///
/// Each variant corresponds to a distinct failure class so callers can match
/// on the kind instead of parsing message strings.
#[derive(Debug, Error)]
pub enum Error {
    /// Missing or malformed configuration.
    #[error("configuration error: {0}")]
    Configuration(String),

    /// A caller-supplied parameter is out of range or unparseable.
    #[error("invalid parameter: {0}")]
    InvalidParameter(String),

    /// Key generation failed (e.g. the random source).
    #[error("key generation error: {0}")]
    Generation(String),

    /// Error while encoding data to DER or PEM.
    #[error("failed to encode data: {0}")]
    Encode(String),

    /// Error while decoding DER or PEM data.
    #[error("failed to decode data: {0}")]
    Decode(String),

    /// Decryption of an encrypted private key failed.
    #[error("authentication error: {0}")]
    Authentication(String),

    /// The key algorithm is not one of the supported families.
    #[error("unsupported key type: {0}")]
    UnsupportedKeyType(String),

    /// Error reading from or writing to the filesystem.
    #[error("i/o error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<der::Error> for Error {
    /// Converts a `der::Error` into an `Error`.
    fn from(err: der::Error) -> Self {
        Error::Decode(err.to_string())
    }
}

impl From<pem::PemError> for Error {
    fn from(err: pem::PemError) -> Self {
        Error::Decode(err.to_string())
    }
}

impl From<rsa::Error> for Error {
    fn from(err: rsa::Error) -> Self {
        Error::Generation(err.to_string())
    }
}
