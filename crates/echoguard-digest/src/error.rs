//! Digest error taxonomy

/// Errors from digest parsing or computation
#[derive(Debug, thiserror::Error)]
pub enum DigestError {
    /// Digest byte length is wrong
    #[error("invalid digest length: expected {expected}, got {actual}")]
    InvalidLength {
        /// Required byte count
        expected: usize,
        /// Byte count actually supplied
        actual: usize,
    },

    /// Hex decoding failed
    #[error("hex decode error: {0}")]
    HexDecode(#[from] hex::FromHexError),

    /// The digest provider itself failed
    #[error("digest provider failed: {0}")]
    Provider(String),
}
