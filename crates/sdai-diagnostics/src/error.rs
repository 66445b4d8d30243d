//! Runtime errors for the SDAI value and aggregate engine

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors raised by the EXPRESS type-system runtime.
///
/// These are programmer or domain errors — situations where EXPRESS itself
/// has no indeterminate fallback. They are not recovered inside the library;
/// UNKNOWN results and undecidable searches are represented as domain values
/// by the callers instead.
#[derive(Debug, Error, Clone, PartialEq, Serialize, Deserialize)]
pub enum SdaiError {
    /// Runtime type incompatible with the declared type
    #[error("Type mismatch in {operation}: expected {expected}, found {found}")]
    TypeMismatch {
        operation: String,
        expected: String,
        found: String,
    },

    /// LOGICAL UNKNOWN assigned into a BOOLEAN-typed slot
    #[error("Cannot narrow LOGICAL UNKNOWN to BOOLEAN")]
    UnknownNotBoolean,

    /// Indeterminate element stored into a non-OPTIONAL aggregate
    #[error("Indeterminate element not allowed at index {index}: aggregate is not OPTIONAL")]
    IndeterminateElement { index: i64 },

    /// Element would violate the aggregate's UNIQUE constraint
    #[error("Duplicate element at index {index}: aggregate is UNIQUE")]
    DuplicateElement { index: i64 },

    /// Index outside the declared bound pair
    #[error("Index {index} violates declared bounds [{low}, {high}]")]
    BoundViolation { index: i64, low: i64, high: String },

    /// Index outside the currently populated range
    #[error("Index {index} out of range for aggregate of size {size}")]
    IndexOutOfRange { index: i64, size: usize },

    /// Repeat count misuse in element insertion
    #[error("Invalid element count {count} for {kind} aggregate")]
    InvalidCount { count: usize, kind: String },

    /// Mutation or indexed access on an aggregate whose bounds were never
    /// declared
    #[error("{operation} on an unbound aggregate")]
    UnboundAggregate { operation: String },

    /// Division (or DIV/MOD) by zero
    #[error("Division by zero in {operation}")]
    DivisionByZero { operation: String },

    /// Arithmetic domain violation (invalid exponentiation, non-finite result)
    #[error("Domain error in {operation}: {message}")]
    DomainError { operation: String, message: String },

    /// NaN or infinite input where a finite REAL is required
    #[error("Non-finite value in {operation}: {value}")]
    NotFinite { operation: String, value: f64 },
}

impl SdaiError {
    /// Create a type mismatch error
    pub fn type_mismatch(
        operation: impl Into<String>,
        expected: impl Into<String>,
        found: impl Into<String>,
    ) -> Self {
        Self::TypeMismatch {
            operation: operation.into(),
            expected: expected.into(),
            found: found.into(),
        }
    }

    /// Create a bound violation error; `high` is `None` for an unbounded pair
    pub fn bound_violation(index: i64, low: i64, high: Option<i64>) -> Self {
        Self::BoundViolation {
            index,
            low,
            high: high.map_or_else(|| "?".to_string(), |h| h.to_string()),
        }
    }

    /// Create a division-by-zero error
    pub fn division_by_zero(operation: impl Into<String>) -> Self {
        Self::DivisionByZero {
            operation: operation.into(),
        }
    }

    /// Create a domain error
    pub fn domain(operation: impl Into<String>, message: impl Into<String>) -> Self {
        Self::DomainError {
            operation: operation.into(),
            message: message.into(),
        }
    }

    /// Create a non-finite input error
    pub fn not_finite(operation: impl Into<String>, value: f64) -> Self {
        Self::NotFinite {
            operation: operation.into(),
            value,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display_names_operation() {
        let err = SdaiError::type_mismatch("add_element", "REAL", "STRING");
        assert_eq!(
            err.to_string(),
            "Type mismatch in add_element: expected REAL, found STRING"
        );

        let err = SdaiError::division_by_zero("MOD");
        assert_eq!(err.to_string(), "Division by zero in MOD");
    }

    #[test]
    fn test_bound_violation_unbounded_renders_question_mark() {
        let err = SdaiError::bound_violation(7, 1, None);
        assert_eq!(err.to_string(), "Index 7 violates declared bounds [1, ?]");

        let err = SdaiError::bound_violation(6, 1, Some(5));
        assert_eq!(err.to_string(), "Index 6 violates declared bounds [1, 5]");
    }
}
