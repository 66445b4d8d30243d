//! EXPRESS (ISO 10303-11) type-system runtime for Rust
//!
//! This crate provides the value types and the aggregate engine that STEP
//! (ISO 10303) data models are built on:
//! - Three-valued LOGICAL/BOOLEAN with the EXPRESS truth tables
//! - REAL/INTEGER/NUMBER with significant-digit precision rounding and
//!   precision-aware comparison
//! - ARRAY/LIST/BAG/SET aggregates with bounds, optionality, uniqueness and
//!   BAG multiplicity over one generic engine
//! - Indeterminate (`?`) propagation throughout: comparisons against `?`
//!   yield UNKNOWN, membership over undecidable comparisons yields UNKNOWN,
//!   and only hard type/domain errors surface as `Result` errors
//!
//! # Example
//!
//! ```
//! use sdai::{Aggregate, ExpressType, Real, SIZEOF, VALUE_IN};
//!
//! let mut list = Aggregate::list(ExpressType::Real, 1, Some(5));
//! list.add_element(Real::with_precision(1.002, 3)?, 1)?;
//! assert_eq!(SIZEOF(&list).value(), Some(1));
//! assert!(VALUE_IN(&Real::with_precision(1.0019, 3)?, &list).is_true());
//! # Ok::<(), sdai::SdaiError>(())
//! ```

// Re-export all public APIs from internal crates
pub use sdai_aggregate as aggregate;
pub use sdai_diagnostics as diagnostics;
pub use sdai_types as types;

// Convenience re-exports
pub use sdai_aggregate::{
    Aggregate, Bounds, HIBOUND, HIINDEX, IN, LOBOUND, LOINDEX, MatchCount, SIZEOF, SearchOutcome,
    VALUE_IN, Value,
};
pub use sdai_diagnostics::{Result, SdaiError};
pub use sdai_types::{
    AggregateKind, Boolean, Compatibility, ExpressString, ExpressType, ExpressValue, Integer,
    Logical, Number, PRECISION_MAX, Real, Truth,
};
