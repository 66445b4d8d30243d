//! Heterogeneous runtime values
//!
//! `Value` is the closed union of every EXPRESS value the runtime can hold:
//! the simple types, aggregates of further values, and the untyped
//! indeterminate literal. SELECT-typed slots and aggregates over mixed basis
//! types are expressed as `Aggregate<Value>`.

use crate::aggregate::Aggregate;
use sdai_diagnostics::Result;
use sdai_types::{Boolean, ExpressString, ExpressType, ExpressValue, Integer, Logical, Real};
use serde::{Deserialize, Serialize};
use std::fmt;

/// A runtime EXPRESS value of any type.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "value")]
pub enum Value {
    /// The untyped indeterminate literal (`?`)
    Indeterminate,
    /// Three-valued truth value
    Logical(Logical),
    /// Two-valued truth value
    Boolean(Boolean),
    /// Whole number
    Integer(Integer),
    /// Precision-rounded floating-point number
    Real(Real),
    /// Character string
    String(ExpressString),
    /// Aggregate over further values
    Aggregate(Box<Aggregate<Value>>),
}

impl Value {
    /// Create an INTEGER value
    pub fn integer(value: i64) -> Self {
        Self::Integer(Integer::from(value))
    }

    /// Create a REAL value at maximum precision; rejects NaN/infinities
    pub fn real(value: f64) -> Result<Self> {
        Ok(Self::Real(Real::new(value)?))
    }

    /// Create a STRING value
    pub fn string(value: impl Into<String>) -> Self {
        Self::String(ExpressString::from(value.into()))
    }

    /// Try to get as LOGICAL (BOOLEAN widens)
    pub fn as_logical(&self) -> Option<Logical> {
        match self {
            Self::Logical(l) => Some(*l),
            Self::Boolean(b) => Some(Logical::from(*b)),
            _ => None,
        }
    }

    /// Try to get as INTEGER
    pub fn as_integer(&self) -> Option<Integer> {
        match self {
            Self::Integer(i) => Some(*i),
            _ => None,
        }
    }

    /// Try to get as REAL (INTEGER widens)
    pub fn as_real(&self) -> Option<Real> {
        match self {
            Self::Real(r) => Some(*r),
            Self::Integer(i) => Some(i.to_real()),
            _ => None,
        }
    }

    /// Try to get as STRING
    pub fn as_string(&self) -> Option<&ExpressString> {
        match self {
            Self::String(s) => Some(s),
            _ => None,
        }
    }

    /// Try to get as an aggregate
    pub fn as_aggregate(&self) -> Option<&Aggregate<Value>> {
        match self {
            Self::Aggregate(a) => Some(a.as_ref()),
            _ => None,
        }
    }
}

impl From<Logical> for Value {
    fn from(value: Logical) -> Self {
        Self::Logical(value)
    }
}

impl From<Boolean> for Value {
    fn from(value: Boolean) -> Self {
        Self::Boolean(value)
    }
}

impl From<Integer> for Value {
    fn from(value: Integer) -> Self {
        Self::Integer(value)
    }
}

impl From<Real> for Value {
    fn from(value: Real) -> Self {
        Self::Real(value)
    }
}

impl From<ExpressString> for Value {
    fn from(value: ExpressString) -> Self {
        Self::String(value)
    }
}

impl From<Aggregate<Value>> for Value {
    fn from(value: Aggregate<Value>) -> Self {
        Self::Aggregate(Box::new(value))
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Indeterminate => write!(f, "$"),
            Self::Logical(l) => write!(f, "{l}"),
            Self::Boolean(b) => write!(f, "{b}"),
            Self::Integer(i) => write!(f, "{i}"),
            Self::Real(r) => write!(f, "{r}"),
            Self::String(s) => write!(f, "{s}"),
            Self::Aggregate(a) => write!(f, "{a}"),
        }
    }
}

impl ExpressValue for Value {
    fn express_type(&self) -> ExpressType {
        match self {
            Self::Indeterminate => ExpressType::Generic,
            Self::Logical(_) => ExpressType::Logical,
            Self::Boolean(_) => ExpressType::Boolean,
            Self::Integer(_) => ExpressType::Integer,
            Self::Real(_) => ExpressType::Real,
            Self::String(_) => ExpressType::String,
            Self::Aggregate(a) => a.express_type(),
        }
    }

    fn is_determinate(&self) -> bool {
        match self {
            Self::Indeterminate => false,
            Self::Logical(l) => l.is_determinate(),
            Self::Boolean(b) => b.is_determinate(),
            Self::Integer(i) => i.is_determinate(),
            Self::Real(r) => r.is_determinate(),
            Self::String(s) => s.is_determinate(),
            Self::Aggregate(a) => a.is_determinate(),
        }
    }

    fn indeterminate() -> Self {
        Self::Indeterminate
    }

    fn is_equal(&self, other: &Self, by_value: bool) -> Logical {
        if !self.is_determinate() || !other.is_determinate() {
            return Logical::UNKNOWN;
        }
        // Instance equality never crosses variants; value equality follows
        // the numeric promotion and BOOLEAN widening rules.
        match (self, other) {
            (Self::Logical(a), Self::Logical(b)) => a.is_equal(b, by_value),
            (Self::Boolean(a), Self::Boolean(b)) => a.is_equal(b, by_value),
            (Self::Integer(a), Self::Integer(b)) => a.is_equal(b, by_value),
            (Self::Real(a), Self::Real(b)) => a.is_equal(b, by_value),
            (Self::String(a), Self::String(b)) => a.is_equal(b, by_value),
            (Self::Aggregate(a), Self::Aggregate(b)) => a.is_equal(b.as_ref(), by_value),
            (Self::Logical(l), Self::Boolean(b)) | (Self::Boolean(b), Self::Logical(l))
                if by_value =>
            {
                l.is_equal(&Logical::from(*b), true)
            }
            (Self::Integer(i), Self::Real(r)) | (Self::Real(r), Self::Integer(i))
                if by_value =>
            {
                i.to_real().is_equal(r, true)
            }
            _ => Logical::FALSE,
        }
    }
}
