//! EXPRESS simple types for the SDAI runtime
//!
//! This crate defines the value types of the EXPRESS language core:
//! - Three-valued `Truth` / `Logical` / `Boolean` with the fixed EXPRESS
//!   truth tables
//! - `Real` / `Integer` / `Number` with the significant-digit precision
//!   engine (rounding, precision-aware comparison, numeric promotion)
//! - `ExpressString` with the STEP physical-file text encoding
//! - The `ExpressType` descriptor and three-way compatibility classification
//! - The `ExpressValue` capability trait shared by every value type
//!
//! Indeterminate (`?`) is a state of every value type, not an error: an
//! indeterminate operand propagates UNKNOWN through comparisons and
//! indeterminacy through arithmetic.

pub mod generic;
pub mod logical;
pub mod number;
pub mod string;
pub mod type_system;

pub use generic::ExpressValue;
pub use logical::{Boolean, Logical, Truth};
pub use number::{
    DigitVec, Integer, Number, PRECISION_MAX, Real, Scientific, compare, round, round_decomposed,
    round_m,
};
pub use string::ExpressString;
pub use type_system::{AggregateKind, Compatibility, ExpressType};
