//! JWT error types

use thiserror::Error;

/// JWT operation result type
pub type JwtResult<T> = Result<T, JwtError>;

/// Errors raised while building, signing, encoding or accepting a token.
///
/// Any error returned from a decode path means the token must not be trusted;
/// there is no partially-valid outcome.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum JwtError {
    /// Input was not valid base64url
    #[error("Malformed base64url encoding: {0}")]
    MalformedEncoding(String),

    /// Token is structurally invalid or failed a structural claim rule
    #[error("Invalid JWT: {0}")]
    Decode(String),

    /// Recomputed signature does not match the token's signature
    #[error("Signature did not verify")]
    BadSignature,

    /// The `exp` claim is at or before the current time
    #[error("Token has expired")]
    Expired,

    /// Algorithm identifier is not in the registry
    #[error("Unsupported algorithm: {0}")]
    UnsupportedAlgorithm(String),

    /// Key cannot be used with the requested algorithm
    #[error("Invalid key: {0}")]
    InvalidKey(String),

    /// The underlying signature primitive failed
    #[error("Signing error: {0}")]
    Signature(String),

    /// No encryption primitive is compiled in for the requested cipher
    #[error("Encryption unavailable: {0}")]
    EncryptionUnavailable(String),

    /// Encryption primitive failure or bad encryption parameters
    #[error("Encryption error: {0}")]
    Encryption(String),

    /// Unknown claim name passed to the named claim builder
    #[error("Invalid claim type \"{0}\"")]
    InvalidArgument(String),

    /// Claim value rejected by its validator at construction time
    #[error("Invalid data provided for claim \"{tag}\": {value}")]
    InvalidClaim {
        /// Wire tag of the claim (e.g. `exp`)
        tag: String,
        /// Rejected value, rendered as JSON
        value: String,
    },

    /// JSON serialization failed
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// Engine has no header or key to work with
    #[error("Not configured: {0}")]
    NotConfigured(String),
}

impl JwtError {
    /// Create a decode error
    #[inline]
    #[must_use]
    pub fn decode(msg: &str) -> Self {
        JwtError::Decode(msg.to_string())
    }

    /// Create an invalid key error
    #[inline]
    #[must_use]
    pub fn invalid_key(msg: &str) -> Self {
        JwtError::InvalidKey(msg.to_string())
    }

    /// Create an unsupported algorithm error
    #[inline]
    #[must_use]
    pub fn unsupported_algorithm(alg: &str) -> Self {
        JwtError::UnsupportedAlgorithm(alg.to_string())
    }

    /// Create a signing error
    #[inline]
    #[must_use]
    pub fn signature(msg: &str) -> Self {
        JwtError::Signature(msg.to_string())
    }

    /// Create a serialization error
    #[inline]
    #[must_use]
    pub fn serialization(msg: &str) -> Self {
        JwtError::Serialization(msg.to_string())
    }

    /// Create an encryption error
    #[inline]
    #[must_use]
    pub fn encryption(msg: &str) -> Self {
        JwtError::Encryption(msg.to_string())
    }

    /// Create a not-configured error
    #[inline]
    #[must_use]
    pub fn not_configured(msg: &str) -> Self {
        JwtError::NotConfigured(msg.to_string())
    }
}

impl From<serde_json::Error> for JwtError {
    fn from(err: serde_json::Error) -> Self {
        JwtError::Serialization(err.to_string())
    }
}
