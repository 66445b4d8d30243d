//! EXPRESS type descriptors
//!
//! This module defines the closed set of runtime type descriptors for the
//! EXPRESS core:
//! - `ExpressType` representing the simple types, the NUMBER supertype, the
//!   GENERIC supertype, and aggregate types
//! - `AggregateKind` naming the four aggregate flavors
//! - `Compatibility`, the three-way classification used when validating
//!   element insertion and heterogeneous comparison

use serde::{Deserialize, Serialize};
use std::fmt;

/// The four EXPRESS aggregate flavors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AggregateKind {
    /// Fixed index range, ordered, slots may be unset
    Array,
    /// Variable size, ordered, duplicates allowed
    List,
    /// Variable size, unordered, duplicates counted by multiplicity
    Bag,
    /// Variable size, unordered, elements unique
    Set,
}

impl AggregateKind {
    /// Get the EXPRESS keyword for this kind
    pub fn name(&self) -> &'static str {
        match self {
            Self::Array => "ARRAY",
            Self::List => "LIST",
            Self::Bag => "BAG",
            Self::Set => "SET",
        }
    }

    /// Whether insertion order is semantically significant for this kind
    pub fn is_ordered(&self) -> bool {
        matches!(self, Self::Array | Self::List)
    }
}

impl fmt::Display for AggregateKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// Runtime type descriptor for EXPRESS values.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum ExpressType {
    /// GENERIC - supertype of every type; the type of the untyped `?` literal
    Generic,
    /// Three-valued truth type
    Logical,
    /// Two-valued restriction of LOGICAL
    Boolean,
    /// Numeric supertype of REAL and INTEGER
    Number,
    /// Floating-point with declared significant-digit precision
    Real,
    /// Whole numbers
    Integer,
    /// Character strings
    String,
    /// Aggregate of a basis type
    #[serde(rename = "Aggregate")]
    Aggregate {
        /// Aggregate flavor
        kind: AggregateKind,
        /// Element type
        basis: Box<ExpressType>,
    },
}

impl ExpressType {
    /// Create an aggregate type descriptor
    pub fn aggregate(kind: AggregateKind, basis: ExpressType) -> Self {
        Self::Aggregate {
            kind,
            basis: Box::new(basis),
        }
    }

    /// Check if this is the GENERIC supertype
    pub fn is_generic(&self) -> bool {
        matches!(self, Self::Generic)
    }

    /// Check if this is a simple (non-aggregate) type
    pub fn is_simple(&self) -> bool {
        !matches!(self, Self::Aggregate { .. } | Self::Generic)
    }

    /// Check if this is a numeric type
    pub fn is_numeric(&self) -> bool {
        matches!(self, Self::Number | Self::Real | Self::Integer)
    }

    /// Check if this is a truth-valued type
    pub fn is_truth(&self) -> bool {
        matches!(self, Self::Logical | Self::Boolean)
    }

    /// Get the basis type for aggregate descriptors
    pub fn basis_type(&self) -> Option<&ExpressType> {
        match self {
            Self::Aggregate { basis, .. } => Some(basis),
            _ => None,
        }
    }

    /// Get the EXPRESS name of this type
    pub fn name(&self) -> String {
        match self {
            Self::Generic => "GENERIC".to_string(),
            Self::Logical => "LOGICAL".to_string(),
            Self::Boolean => "BOOLEAN".to_string(),
            Self::Number => "NUMBER".to_string(),
            Self::Real => "REAL".to_string(),
            Self::Integer => "INTEGER".to_string(),
            Self::String => "STRING".to_string(),
            Self::Aggregate { kind, basis } => format!("{} OF {}", kind.name(), basis.name()),
        }
    }

    /// Classify how a value of this type may occupy a slot declared as
    /// `target`.
    ///
    /// - identical types, and anything into GENERIC, are directly compatible;
    /// - the untyped indeterminate (GENERIC source) fits any slot - whether
    ///   the slot accepts it is the OPTIONAL constraint's business, not the
    ///   type system's;
    /// - BOOLEAN widens to LOGICAL, INTEGER widens to REAL, and both numeric
    ///   refinements widen to NUMBER, all with conversion;
    /// - aggregates are compatible only with aggregates of the same kind
    ///   whose basis types are recursively compatible, taking the weaker of
    ///   the basis classifications;
    /// - everything else, including the LOGICAL to BOOLEAN narrowing, is
    ///   incompatible.
    pub fn compatibility_with(&self, target: &ExpressType) -> Compatibility {
        use ExpressType::{Aggregate, Boolean, Generic, Integer, Logical, Number, Real};

        if self == target {
            return Compatibility::Compatible;
        }
        match (self, target) {
            (_, Generic) | (Generic, _) => Compatibility::Compatible,
            (Boolean, Logical)
            | (Integer, Real)
            | (Integer, Number)
            | (Real, Number) => Compatibility::CompatibleWithConversion,
            (
                Aggregate { kind: k1, basis: b1 },
                Aggregate { kind: k2, basis: b2 },
            ) if k1 == k2 => b1.compatibility_with(b2),
            _ => Compatibility::Incompatible,
        }
    }
}

impl fmt::Display for ExpressType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// Three-way type compatibility classification.
///
/// The derived order (Incompatible < CompatibleWithConversion < Compatible)
/// makes "the weaker of two classifications" a plain `min`.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub enum Compatibility {
    /// Value cannot occupy the slot
    Incompatible,
    /// Value fits after a widening conversion
    CompatibleWithConversion,
    /// Value fits directly
    Compatible,
}

impl Compatibility {
    /// Check if the classification permits the value at all
    pub fn is_compatible(&self) -> bool {
        !matches!(self, Self::Incompatible)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[test]
    fn test_identity_is_compatible() {
        assert_eq!(
            ExpressType::Real.compatibility_with(&ExpressType::Real),
            Compatibility::Compatible
        );
    }

    #[rstest]
    #[case(ExpressType::Boolean, ExpressType::Logical)]
    #[case(ExpressType::Integer, ExpressType::Real)]
    #[case(ExpressType::Integer, ExpressType::Number)]
    #[case(ExpressType::Real, ExpressType::Number)]
    fn test_widenings_need_conversion(#[case] from: ExpressType, #[case] to: ExpressType) {
        assert_eq!(
            from.compatibility_with(&to),
            Compatibility::CompatibleWithConversion
        );
    }

    #[test]
    fn test_narrowing_is_incompatible() {
        assert_eq!(
            ExpressType::Logical.compatibility_with(&ExpressType::Boolean),
            Compatibility::Incompatible
        );
        assert_eq!(
            ExpressType::Real.compatibility_with(&ExpressType::Integer),
            Compatibility::Incompatible
        );
    }

    #[test]
    fn test_generic_fits_everywhere() {
        assert_eq!(
            ExpressType::String.compatibility_with(&ExpressType::Generic),
            Compatibility::Compatible
        );
        assert_eq!(
            ExpressType::Generic.compatibility_with(&ExpressType::Real),
            Compatibility::Compatible
        );
    }

    #[test]
    fn test_aggregate_compatibility_recurses_on_basis() {
        let list_int = ExpressType::aggregate(AggregateKind::List, ExpressType::Integer);
        let list_real = ExpressType::aggregate(AggregateKind::List, ExpressType::Real);
        let set_real = ExpressType::aggregate(AggregateKind::Set, ExpressType::Real);

        assert_eq!(
            list_int.compatibility_with(&list_real),
            Compatibility::CompatibleWithConversion
        );
        assert_eq!(
            list_int.compatibility_with(&set_real),
            Compatibility::Incompatible
        );
        assert_eq!(
            list_real.compatibility_with(&list_int),
            Compatibility::Incompatible
        );
    }

    #[test]
    fn test_type_names() {
        assert_eq!(ExpressType::Logical.name(), "LOGICAL");
        assert_eq!(
            ExpressType::aggregate(AggregateKind::Bag, ExpressType::Real).name(),
            "BAG OF REAL"
        );
    }
}
