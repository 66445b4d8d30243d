//! Error handling for the SDAI runtime
//!
//! This crate provides the single error tier of the library: every anomaly
//! that EXPRESS has no indeterminate fallback for (type mismatches, bound
//! violations, arithmetic domain errors) surfaces as an [`SdaiError`].
//! Everything EXPRESS can express as "no information" — indeterminate values,
//! UNKNOWN comparisons, undecidable membership — is an ordinary return value
//! in the type and aggregate crates, never an error.

mod error;

pub use error::*;

/// Result type for SDAI operations
pub type Result<T> = std::result::Result<T, SdaiError>;
