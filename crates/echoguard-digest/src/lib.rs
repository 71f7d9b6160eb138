//! Echoguard digest primitives
//!
//! Content fingerprinting for the change tracker.
//!
//! # Core Concepts
//!
//! - [`ContentDigest`]: 32-byte Blake3 fingerprint of exact file content
//! - [`Digester`]: trait seam for digest computation, so the tracker can be
//!   exercised with failing or instrumented providers
//! - [`Blake3Digester`]: the default provider
//!
//! # Example
//!
//! ```rust
//! use echoguard_digest::{Blake3Digester, Digester};
//!
//! let digester = Blake3Digester;
//! let a = digester.digest(b"const Button = () => null").unwrap();
//! let b = digester.digest(b"const Button = () => null").unwrap();
//! assert_eq!(a, b);
//! ```

#![warn(unreachable_pub)]

mod digest;
mod digester;
mod error;

pub use digest::ContentDigest;
pub use digester::{Blake3Digester, Digester};
pub use error::DigestError;

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
