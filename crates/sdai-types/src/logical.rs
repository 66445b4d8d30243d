//! LOGICAL and BOOLEAN truth types
//!
//! Implements the EXPRESS three-valued truth domain {FALSE, UNKNOWN, TRUE}
//! and its two-valued BOOLEAN restriction. All connectives follow the fixed
//! truth tables of the language; both operands are always evaluated (no
//! short-circuiting), since UNKNOWN must propagate per table rather than by
//! ordinary boolean evaluation order.

use crate::generic::ExpressValue;
use crate::type_system::ExpressType;
use sdai_diagnostics::SdaiError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::{BitAnd, BitOr, BitXor, Not};

/// The discrete truth domain, totally ordered FALSE < UNKNOWN < TRUE.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub enum Truth {
    False,
    Unknown,
    True,
}

impl fmt::Display for Truth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::False => write!(f, "F"),
            Self::Unknown => write!(f, "U"),
            Self::True => write!(f, "T"),
        }
    }
}

/// EXPRESS LOGICAL: one of {FALSE, UNKNOWN, TRUE}, or indeterminate (`?`).
///
/// An indeterminate LOGICAL participates in connectives as UNKNOWN and makes
/// every comparison against it UNKNOWN.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Logical {
    value: Option<Truth>,
}

impl Logical {
    /// The TRUE value
    pub const TRUE: Logical = Logical {
        value: Some(Truth::True),
    };
    /// The FALSE value
    pub const FALSE: Logical = Logical {
        value: Some(Truth::False),
    };
    /// The UNKNOWN value (a determinate value, distinct from `?`)
    pub const UNKNOWN: Logical = Logical {
        value: Some(Truth::Unknown),
    };

    /// Get the truth value, if determinate
    pub fn truth(&self) -> Option<Truth> {
        self.value
    }

    /// Check if this is exactly TRUE
    pub fn is_true(&self) -> bool {
        self.value == Some(Truth::True)
    }

    /// Check if this is exactly FALSE
    pub fn is_false(&self) -> bool {
        self.value == Some(Truth::False)
    }

    /// Check if this is exactly UNKNOWN
    pub fn is_unknown(&self) -> bool {
        self.value == Some(Truth::Unknown)
    }

    /// The truth value this LOGICAL contributes to a connective: an
    /// indeterminate operand participates as UNKNOWN.
    fn effective(&self) -> Truth {
        self.value.unwrap_or(Truth::Unknown)
    }

    /// `self < other` under FALSE < UNKNOWN < TRUE; UNKNOWN when either
    /// operand is indeterminate
    pub fn less(&self, other: &Logical) -> Logical {
        self.ordered(other, |a, b| a < b)
    }

    /// `self <= other`; UNKNOWN when either operand is indeterminate
    pub fn less_eq(&self, other: &Logical) -> Logical {
        self.ordered(other, |a, b| a <= b)
    }

    /// `self > other`; UNKNOWN when either operand is indeterminate
    pub fn greater(&self, other: &Logical) -> Logical {
        self.ordered(other, |a, b| a > b)
    }

    /// `self >= other`; UNKNOWN when either operand is indeterminate
    pub fn greater_eq(&self, other: &Logical) -> Logical {
        self.ordered(other, |a, b| a >= b)
    }

    fn ordered(&self, other: &Logical, cmp: impl Fn(Truth, Truth) -> bool) -> Logical {
        match (self.value, other.value) {
            (Some(a), Some(b)) => Logical::from(cmp(a, b)),
            _ => Logical::UNKNOWN,
        }
    }
}

impl From<Truth> for Logical {
    fn from(value: Truth) -> Self {
        Self { value: Some(value) }
    }
}

impl From<bool> for Logical {
    fn from(value: bool) -> Self {
        if value { Self::TRUE } else { Self::FALSE }
    }
}

/// NOT operator
///
/// | A | not A |
/// |---|-------|
/// | F | T     |
/// | U | U     |
/// | T | F     |
impl Not for Logical {
    type Output = Logical;

    fn not(self) -> Logical {
        match self.value {
            None => Logical::indeterminate(),
            Some(Truth::False) => Logical::TRUE,
            Some(Truth::Unknown) => Logical::UNKNOWN,
            Some(Truth::True) => Logical::FALSE,
        }
    }
}

/// AND operator
///
/// | A | B | A and B |
/// |---|---|---------|
/// | T | T | T       |
/// | T | U | U       |
/// | T | F | F       |
/// | U | T | U       |
/// | U | U | U       |
/// | U | F | F       |
/// | F | T | F       |
/// | F | U | F       |
/// | F | F | F       |
impl BitAnd for Logical {
    type Output = Logical;

    fn bitand(self, rhs: Logical) -> Logical {
        match (self.effective(), rhs.effective()) {
            (Truth::False, _) | (_, Truth::False) => Logical::FALSE,
            (Truth::True, Truth::True) => Logical::TRUE,
            _ => Logical::UNKNOWN,
        }
    }
}

/// OR operator
///
/// | A | B | A or B |
/// |---|---|--------|
/// | T | T | T      |
/// | T | U | T      |
/// | T | F | T      |
/// | U | T | T      |
/// | U | U | U      |
/// | U | F | U      |
/// | F | T | T      |
/// | F | U | U      |
/// | F | F | F      |
impl BitOr for Logical {
    type Output = Logical;

    fn bitor(self, rhs: Logical) -> Logical {
        match (self.effective(), rhs.effective()) {
            (Truth::True, _) | (_, Truth::True) => Logical::TRUE,
            (Truth::False, Truth::False) => Logical::FALSE,
            _ => Logical::UNKNOWN,
        }
    }
}

/// XOR operator
///
/// | A | B | A xor B |
/// |---|---|---------|
/// | T | T | F       |
/// | T | U | U       |
/// | T | F | T       |
/// | U | T | U       |
/// | U | U | U       |
/// | U | F | U       |
/// | F | T | T       |
/// | F | U | U       |
/// | F | F | F       |
impl BitXor for Logical {
    type Output = Logical;

    fn bitxor(self, rhs: Logical) -> Logical {
        match (self.effective(), rhs.effective()) {
            (Truth::Unknown, _) | (_, Truth::Unknown) => Logical::UNKNOWN,
            (a, b) => Logical::from(a != b),
        }
    }
}

impl fmt::Display for Logical {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.value {
            None => write!(f, "$"),
            Some(t) => write!(f, "{t}"),
        }
    }
}

impl ExpressValue for Logical {
    fn express_type(&self) -> ExpressType {
        ExpressType::Logical
    }

    fn is_determinate(&self) -> bool {
        self.value.is_some()
    }

    fn indeterminate() -> Self {
        Self { value: None }
    }

    fn is_equal(&self, other: &Self, _by_value: bool) -> Logical {
        match (self.value, other.value) {
            (Some(a), Some(b)) => Logical::from(a == b),
            _ => Logical::UNKNOWN,
        }
    }
}

/// EXPRESS BOOLEAN: TRUE or FALSE, or indeterminate (`?`).
///
/// BOOLEAN is a restriction of LOGICAL: it can never hold UNKNOWN. Widening
/// to LOGICAL is free; narrowing from LOGICAL fails on UNKNOWN.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Boolean {
    value: Option<bool>,
}

impl Boolean {
    /// The TRUE value
    pub const TRUE: Boolean = Boolean { value: Some(true) };
    /// The FALSE value
    pub const FALSE: Boolean = Boolean { value: Some(false) };

    /// Get the payload, if determinate
    pub fn value(&self) -> Option<bool> {
        self.value
    }

    /// Check if this is exactly TRUE
    pub fn is_true(&self) -> bool {
        self.value == Some(true)
    }

    /// Check if this is exactly FALSE
    pub fn is_false(&self) -> bool {
        self.value == Some(false)
    }

    /// Always false: BOOLEAN cannot hold UNKNOWN
    pub fn is_unknown(&self) -> bool {
        false
    }
}

impl From<bool> for Boolean {
    fn from(value: bool) -> Self {
        Self { value: Some(value) }
    }
}

impl From<Boolean> for Logical {
    fn from(value: Boolean) -> Self {
        match value.value {
            None => Logical::indeterminate(),
            Some(b) => Logical::from(b),
        }
    }
}

impl TryFrom<Logical> for Boolean {
    type Error = SdaiError;

    fn try_from(value: Logical) -> Result<Self, Self::Error> {
        match value.truth() {
            None => Ok(Boolean::indeterminate()),
            Some(Truth::True) => Ok(Boolean::TRUE),
            Some(Truth::False) => Ok(Boolean::FALSE),
            Some(Truth::Unknown) => Err(SdaiError::UnknownNotBoolean),
        }
    }
}

impl Not for Boolean {
    type Output = Boolean;

    fn not(self) -> Boolean {
        Boolean {
            value: self.value.map(|b| !b),
        }
    }
}

/// Connectives on BOOLEAN widen to LOGICAL: with an indeterminate operand
/// the table result is UNKNOWN, which BOOLEAN cannot carry.
impl BitAnd for Boolean {
    type Output = Logical;

    fn bitand(self, rhs: Boolean) -> Logical {
        Logical::from(self) & Logical::from(rhs)
    }
}

impl BitOr for Boolean {
    type Output = Logical;

    fn bitor(self, rhs: Boolean) -> Logical {
        Logical::from(self) | Logical::from(rhs)
    }
}

impl BitXor for Boolean {
    type Output = Logical;

    fn bitxor(self, rhs: Boolean) -> Logical {
        Logical::from(self) ^ Logical::from(rhs)
    }
}

impl fmt::Display for Boolean {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.value {
            None => write!(f, "$"),
            Some(true) => write!(f, "T"),
            Some(false) => write!(f, "F"),
        }
    }
}

impl ExpressValue for Boolean {
    fn express_type(&self) -> ExpressType {
        ExpressType::Boolean
    }

    fn is_determinate(&self) -> bool {
        self.value.is_some()
    }

    fn indeterminate() -> Self {
        Self { value: None }
    }

    fn is_equal(&self, other: &Self, _by_value: bool) -> Logical {
        match (self.value, other.value) {
            (Some(a), Some(b)) => Logical::from(a == b),
            _ => Logical::UNKNOWN,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn l(t: Truth) -> Logical {
        Logical::from(t)
    }

    #[rstest]
    #[case(Truth::True, Truth::True, Truth::True)]
    #[case(Truth::True, Truth::Unknown, Truth::Unknown)]
    #[case(Truth::True, Truth::False, Truth::False)]
    #[case(Truth::Unknown, Truth::True, Truth::Unknown)]
    #[case(Truth::Unknown, Truth::Unknown, Truth::Unknown)]
    #[case(Truth::Unknown, Truth::False, Truth::False)]
    #[case(Truth::False, Truth::True, Truth::False)]
    #[case(Truth::False, Truth::Unknown, Truth::False)]
    #[case(Truth::False, Truth::False, Truth::False)]
    fn test_and_table(#[case] a: Truth, #[case] b: Truth, #[case] expected: Truth) {
        assert_eq!((l(a) & l(b)).truth(), Some(expected));
    }

    #[rstest]
    #[case(Truth::True, Truth::True, Truth::True)]
    #[case(Truth::True, Truth::Unknown, Truth::True)]
    #[case(Truth::True, Truth::False, Truth::True)]
    #[case(Truth::Unknown, Truth::True, Truth::True)]
    #[case(Truth::Unknown, Truth::Unknown, Truth::Unknown)]
    #[case(Truth::Unknown, Truth::False, Truth::Unknown)]
    #[case(Truth::False, Truth::True, Truth::True)]
    #[case(Truth::False, Truth::Unknown, Truth::Unknown)]
    #[case(Truth::False, Truth::False, Truth::False)]
    fn test_or_table(#[case] a: Truth, #[case] b: Truth, #[case] expected: Truth) {
        assert_eq!((l(a) | l(b)).truth(), Some(expected));
    }

    #[rstest]
    #[case(Truth::True, Truth::True, Truth::False)]
    #[case(Truth::True, Truth::Unknown, Truth::Unknown)]
    #[case(Truth::True, Truth::False, Truth::True)]
    #[case(Truth::Unknown, Truth::True, Truth::Unknown)]
    #[case(Truth::Unknown, Truth::Unknown, Truth::Unknown)]
    #[case(Truth::Unknown, Truth::False, Truth::Unknown)]
    #[case(Truth::False, Truth::True, Truth::True)]
    #[case(Truth::False, Truth::Unknown, Truth::Unknown)]
    #[case(Truth::False, Truth::False, Truth::False)]
    fn test_xor_table(#[case] a: Truth, #[case] b: Truth, #[case] expected: Truth) {
        assert_eq!((l(a) ^ l(b)).truth(), Some(expected));
    }

    #[test]
    fn test_not_table() {
        assert!((!Logical::FALSE).is_true());
        assert!((!Logical::TRUE).is_false());
        assert!((!Logical::UNKNOWN).is_unknown());
        assert!(!(!Logical::indeterminate()).is_determinate());
    }

    #[test]
    fn test_connectives_treat_indeterminate_as_unknown() {
        assert!((Logical::TRUE & Logical::indeterminate()).is_unknown());
        assert!((Logical::FALSE & Logical::indeterminate()).is_false());
        assert!((Logical::TRUE | Logical::indeterminate()).is_true());
        assert!((Logical::FALSE | Logical::indeterminate()).is_unknown());
    }

    #[rstest]
    #[case(Truth::False, Truth::False, false)]
    #[case(Truth::False, Truth::Unknown, true)]
    #[case(Truth::False, Truth::True, true)]
    #[case(Truth::Unknown, Truth::False, false)]
    #[case(Truth::Unknown, Truth::Unknown, false)]
    #[case(Truth::Unknown, Truth::True, true)]
    #[case(Truth::True, Truth::False, false)]
    #[case(Truth::True, Truth::Unknown, false)]
    #[case(Truth::True, Truth::True, false)]
    fn test_total_order_less(#[case] a: Truth, #[case] b: Truth, #[case] expected: bool) {
        assert_eq!(l(a).less(&l(b)), Logical::from(expected));
    }

    #[test]
    fn test_comparison_with_indeterminate_is_unknown() {
        let q = Logical::indeterminate();
        assert!(Logical::TRUE.less(&q).is_unknown());
        assert!(q.greater_eq(&Logical::FALSE).is_unknown());
        assert!(q.less(&q).is_unknown());
        assert!(Logical::TRUE.is_equal(&q, true).is_unknown());
        assert!(q.is_equal(&q, true).is_unknown());
    }

    #[test]
    fn test_boolean_widening() {
        let wide = Logical::from(Boolean::TRUE);
        assert!(wide.is_true());
        assert!(!Logical::from(Boolean::indeterminate()).is_determinate());
    }

    #[test]
    fn test_boolean_narrowing_rejects_unknown() {
        assert_eq!(Boolean::try_from(Logical::TRUE), Ok(Boolean::TRUE));
        assert_eq!(Boolean::try_from(Logical::FALSE), Ok(Boolean::FALSE));
        assert_eq!(
            Boolean::try_from(Logical::UNKNOWN),
            Err(SdaiError::UnknownNotBoolean)
        );
        assert!(!Boolean::try_from(Logical::indeterminate())
            .unwrap()
            .is_determinate());
    }

    #[test]
    fn test_boolean_is_unknown_hardwired_false() {
        assert!(!Boolean::TRUE.is_unknown());
        assert!(!Boolean::FALSE.is_unknown());
        assert!(!Boolean::indeterminate().is_unknown());
    }

    #[test]
    fn test_print_values() {
        assert_eq!(Logical::TRUE.print_value(), "T");
        assert_eq!(Logical::FALSE.print_value(), "F");
        assert_eq!(Logical::UNKNOWN.print_value(), "U");
        assert_eq!(Logical::indeterminate().print_value(), "$");
        assert_eq!(Boolean::FALSE.print_value(), "F");
    }
}
