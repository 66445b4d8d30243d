//! EXPRESS aggregate engine
//!
//! This crate implements the shared semantics of the four EXPRESS aggregate
//! kinds (ARRAY, LIST, BAG, SET) atop one internal representation: an
//! ordered sequence of (element, multiplicity) slots. It provides:
//! - `Aggregate<T>`, generic over any [`sdai_types::ExpressValue`] basis type
//! - the tri-state search outcomes (`SearchOutcome`, `MatchCount`) that let
//!   membership distinguish "definitely absent" from "undecidable"
//! - the heterogeneous `Value` union used for SELECT-typed slots and
//!   aggregates over mixed basis types
//! - the EXPRESS-named builtin functions (`SIZEOF`, `LOBOUND`, `HIBOUND`,
//!   `LOINDEX`, `HIINDEX`, `IN`, `VALUE_IN`)

pub mod aggregate;
pub mod builtins;
pub mod value;

pub use aggregate::{Aggregate, Bounds, MatchCount, SearchOutcome};
pub use builtins::{HIBOUND, HIINDEX, IN, LOBOUND, LOINDEX, SIZEOF, VALUE_IN};
pub use value::Value;
