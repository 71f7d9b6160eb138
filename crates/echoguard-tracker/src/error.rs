//! Tracker error taxonomy
//!
//! Errors here only cover the write-intent side: a malformed registration
//! must stop the generator's write pipeline. The classification side never
//! surfaces errors; it degrades to a safe default instead (see
//! [`crate::Classification`]).

/// Errors surfaced by the change tracker
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum TrackerError {
    /// A tracked path must be a non-empty string
    #[error("tracked path must not be empty")]
    EmptyPath,
}
