//! Digest computation seam
//!
//! The tracker never calls Blake3 directly; it goes through [`Digester`] so
//! that failure handling stays observable. Blake3 itself cannot fail, but the
//! trait contract is fallible and the tracker must degrade gracefully when a
//! provider errors.

use crate::digest::ContentDigest;
use crate::error::DigestError;

/// Computes content digests for the change tracker
///
/// Implementations must be deterministic: identical byte content yields an
/// identical digest across calls and across instances.
pub trait Digester: Send + Sync + 'static {
    /// Compute the digest of exact byte content
    ///
    /// # Errors
    /// Returns [`DigestError::Provider`] when the underlying implementation
    /// fails. Callers must not crash on failure.
    fn digest(&self, content: &[u8]) -> Result<ContentDigest, DigestError>;
}

/// The default digester (Blake3, infallible)
#[derive(Debug, Clone, Copy, Default)]
pub struct Blake3Digester;

impl Digester for Blake3Digester {
    #[inline]
    fn digest(&self, content: &[u8]) -> Result<ContentDigest, DigestError> {
        Ok(ContentDigest::of(content))
    }
}
