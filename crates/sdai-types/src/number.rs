//! NUMBER, REAL and INTEGER with the significant-digit precision engine
//!
//! REAL wraps a floating-point payload plus a declared count of significant
//! mantissa digits. Every exposed magnitude is pre-rounded to that precision,
//! and comparison is precision-aware: two REALs of different declared
//! precision are equal when they agree to the shorter precision. Arithmetic
//! results are always produced at [`PRECISION_MAX`]; input precision
//! propagates only through comparison and assignment.
//!
//! The rounding algorithm works on the decimal scientific decomposition of
//! the magnitude: round half away from zero at the cut digit, propagate the
//! carry through the mantissa, and on a carry out of the most significant
//! digit bump the exponent and reset the mantissa to a single leading 1.

use crate::generic::ExpressValue;
use crate::logical::Logical;
use crate::type_system::ExpressType;
use sdai_diagnostics::{Result, SdaiError};
use serde::{Deserialize, Serialize};
use smallvec::{SmallVec, smallvec};
use std::cmp::Ordering;
use std::fmt;
use std::ops::{Add, Mul, Neg, Sub};

/// Maximum significant-digit precision of the underlying representation:
/// the number of decimal digits `f64` is guaranteed to round-trip.
pub const PRECISION_MAX: u32 = f64::DIGITS;

/// Mantissa digit vector, most significant digit first.
pub type DigitVec = SmallVec<[u8; 20]>;

/// Decimal scientific decomposition of a magnitude:
/// `sign * d1.d2d3... * 10^exponent` with `d1 != 0` (sign 0 for zero).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Scientific {
    /// -1, 0 or 1
    pub sign: i8,
    /// Mantissa digits, most significant first; missing trailing digits are
    /// zero
    pub digits: DigitVec,
    /// Decimal exponent of the leading digit
    pub exponent: i32,
}

impl Scientific {
    /// Reassemble the floating-point value.
    pub fn value(&self) -> f64 {
        if self.sign == 0 || self.digits.iter().all(|&d| d == 0) {
            return 0.0;
        }
        let mut s = String::with_capacity(self.digits.len() + 8);
        if self.sign < 0 {
            s.push('-');
        }
        s.push(char::from(b'0' + self.digits[0]));
        if self.digits.len() > 1 {
            s.push('.');
            for &d in &self.digits[1..] {
                s.push(char::from(b'0' + d));
            }
        }
        s.push('e');
        s.push_str(&self.exponent.to_string());
        s.parse().expect("digit string is a valid float literal")
    }
}

/// Decompose a finite value into decimal scientific form using the shortest
/// round-trip representation of the payload.
fn decompose(value: f64) -> Scientific {
    debug_assert!(value.is_finite());
    if value == 0.0 {
        return Scientific {
            sign: 0,
            digits: smallvec![0],
            exponent: 0,
        };
    }
    let sign: i8 = if value < 0.0 { -1 } else { 1 };
    let text = format!("{:e}", value.abs());
    let (mantissa, exponent) = text
        .split_once('e')
        .expect("exponential float format always contains 'e'");
    let exponent: i32 = exponent
        .parse()
        .expect("exponential float format has a decimal exponent");
    let digits = mantissa
        .bytes()
        .filter(|&b| b != b'.')
        .map(|b| b - b'0')
        .collect();
    Scientific {
        sign,
        digits,
        exponent,
    }
}

/// Digit-vector rounding primitive.
///
/// Rounds `digits` at the cut position `precision` (half away from zero,
/// applied to the magnitude) and truncates the vector to at most `precision`
/// digits. Returns true when the carry propagated out of the most
/// significant digit; the vector is then reset to a single leading 1 and the
/// caller must bump the exponent.
///
/// `precision == 0` cuts at the leading digit itself: the result is either
/// the empty vector (rounded to zero) or a carried-out single 1.
pub fn round_m(digits: &mut DigitVec, precision: usize) -> bool {
    if digits.len() <= precision {
        return false;
    }
    let round_up = digits[precision] >= 5;
    digits.truncate(precision);
    if !round_up {
        return false;
    }
    for i in (0..digits.len()).rev() {
        if digits[i] == 9 {
            digits[i] = 0;
        } else {
            digits[i] += 1;
            return false;
        }
    }
    digits.clear();
    digits.push(1);
    true
}

/// Round a magnitude to `precision` significant digits, exposing the decimal
/// decomposition of the result.
pub fn round_decomposed(value: f64, precision: u32) -> Scientific {
    let mut sci = decompose(value);
    if sci.sign == 0 {
        return sci;
    }
    if round_m(&mut sci.digits, precision as usize) {
        sci.exponent += 1;
    }
    if sci.digits.is_empty() {
        // Precision 0 and the leading digit rounded down: the whole
        // magnitude vanished.
        sci.sign = 0;
        sci.exponent = 0;
        sci.digits.push(0);
    }
    sci
}

/// Round a magnitude to `precision` significant digits.
pub fn round(value: f64, precision: u32) -> f64 {
    round_decomposed(value, precision).value()
}

/// Precision-aware three-way comparison.
///
/// Signs first; for equal nonzero signs the decimal exponents; for equal
/// exponents the mantissa digits up to `min(precision_x, precision_y)`,
/// zero-padding the shorter mantissa. The magnitude ordering is reversed for
/// negative operands.
pub fn compare(x: f64, precision_x: u32, y: f64, precision_y: u32) -> Ordering {
    let a = round_decomposed(x, precision_x);
    let b = round_decomposed(y, precision_y);
    match a.sign.cmp(&b.sign) {
        Ordering::Equal => {}
        ord => return ord,
    }
    if a.sign == 0 {
        return Ordering::Equal;
    }
    let magnitude = match a.exponent.cmp(&b.exponent) {
        Ordering::Equal => {
            let common = precision_x.min(precision_y) as usize;
            let mut ord = Ordering::Equal;
            for i in 0..common {
                let da = a.digits.get(i).copied().unwrap_or(0);
                let db = b.digits.get(i).copied().unwrap_or(0);
                match da.cmp(&db) {
                    Ordering::Equal => {}
                    o => {
                        ord = o;
                        break;
                    }
                }
            }
            ord
        }
        ord => ord,
    };
    if a.sign < 0 { magnitude.reverse() } else { magnitude }
}

/// EXPRESS REAL: a floating-point payload pre-rounded to a declared
/// significant-digit precision, or indeterminate (`?`).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Real {
    value: Option<f64>,
    precision: u32,
}

impl Real {
    /// Create a REAL at maximum precision. Rejects NaN and infinities.
    pub fn new(value: f64) -> Result<Self> {
        Self::with_precision(value, PRECISION_MAX)
    }

    /// Create a REAL with a declared precision in `1..=PRECISION_MAX`.
    /// The payload is rounded to that precision immediately.
    pub fn with_precision(value: f64, precision: u32) -> Result<Self> {
        if !value.is_finite() {
            return Err(SdaiError::not_finite("REAL", value));
        }
        if precision == 0 || precision > PRECISION_MAX {
            return Err(SdaiError::domain(
                "REAL",
                format!("precision {precision} outside 1..={PRECISION_MAX}"),
            ));
        }
        Ok(Self {
            value: Some(round(value, precision)),
            precision,
        })
    }

    /// Internal constructor for arithmetic results: rounds to maximum
    /// precision, mapping a non-finite intermediate to indeterminate.
    fn from_computed(value: f64) -> Self {
        if value.is_finite() {
            Self {
                value: Some(round(value, PRECISION_MAX)),
                precision: PRECISION_MAX,
            }
        } else {
            Self::indeterminate()
        }
    }

    /// Get the rounded payload, if determinate
    pub fn value(&self) -> Option<f64> {
        self.value
    }

    /// The declared significant-digit precision of this slot
    pub fn precision(&self) -> u32 {
        self.precision
    }

    /// Assignment: re-round the incoming value to *this* slot's precision.
    /// Precision is a property of the storage slot, not of the value
    /// flowing through it.
    pub fn set(&mut self, source: &Real) {
        self.value = source.value.map(|v| round(v, self.precision));
    }

    /// Three-way comparison at the shorter of the two precisions; `None`
    /// when either operand is indeterminate
    pub fn compare(&self, other: &Real) -> Option<Ordering> {
        match (self.value, other.value) {
            (Some(a), Some(b)) => Some(compare(a, self.precision, b, other.precision)),
            _ => None,
        }
    }

    /// `self < other`; UNKNOWN when either operand is indeterminate
    pub fn less(&self, other: &Real) -> Logical {
        self.relation(other, |ord| ord == Ordering::Less)
    }

    /// `self <= other`; UNKNOWN when either operand is indeterminate
    pub fn less_eq(&self, other: &Real) -> Logical {
        self.relation(other, |ord| ord != Ordering::Greater)
    }

    /// `self > other`; UNKNOWN when either operand is indeterminate
    pub fn greater(&self, other: &Real) -> Logical {
        self.relation(other, |ord| ord == Ordering::Greater)
    }

    /// `self >= other`; UNKNOWN when either operand is indeterminate
    pub fn greater_eq(&self, other: &Real) -> Logical {
        self.relation(other, |ord| ord != Ordering::Less)
    }

    fn relation(&self, other: &Real, test: impl Fn(Ordering) -> bool) -> Logical {
        match self.compare(other) {
            Some(ord) => Logical::from(test(ord)),
            None => Logical::UNKNOWN,
        }
    }

    /// REAL division. Division by a determinate zero is an error; an
    /// indeterminate operand propagates indeterminacy.
    pub fn checked_div(&self, rhs: &Real) -> Result<Real> {
        if rhs.value == Some(0.0) {
            return Err(SdaiError::division_by_zero("/"));
        }
        match (self.value, rhs.value) {
            (Some(a), Some(b)) => Ok(Real::from_computed(a / b)),
            _ => Ok(Real::indeterminate()),
        }
    }

    /// Exponentiation. Domain violations (zero to a negative power, a
    /// negative base to a fractional power) are errors.
    pub fn power(&self, exponent: &Real) -> Result<Real> {
        match (self.value, exponent.value) {
            (Some(base), Some(exp)) => {
                let result = base.powf(exp);
                if result.is_finite() {
                    Ok(Real::from_computed(result))
                } else {
                    Err(SdaiError::domain(
                        "**",
                        format!("{base} ** {exp} is undefined"),
                    ))
                }
            }
            _ => Ok(Real::indeterminate()),
        }
    }

    /// EXPRESS DIV: operands truncated toward zero to integers, then
    /// integer-divided. Returns INTEGER; divisor zero is an error.
    pub fn int_div(&self, rhs: &Real) -> Result<Integer> {
        if let Some(d) = rhs.value
            && d.trunc() == 0.0
        {
            return Err(SdaiError::division_by_zero("DIV"));
        }
        match (self.value, rhs.value) {
            (Some(a), Some(b)) => Ok(Integer {
                value: (a.trunc() as i64).checked_div(b.trunc() as i64),
            }),
            _ => Ok(Integer::indeterminate()),
        }
    }

    /// EXPRESS MOD: `a - b * (a DIV b)`; the remainder follows the
    /// dividend's sign. Returns INTEGER; divisor zero is an error.
    pub fn modulo(&self, rhs: &Real) -> Result<Integer> {
        if let Some(d) = rhs.value
            && d.trunc() == 0.0
        {
            return Err(SdaiError::division_by_zero("MOD"));
        }
        match (self.value, rhs.value) {
            (Some(a), Some(b)) => Ok(Integer {
                value: (a.trunc() as i64).checked_rem(b.trunc() as i64),
            }),
            _ => Ok(Integer::indeterminate()),
        }
    }

    fn binary(self, rhs: Real, op: impl Fn(f64, f64) -> f64) -> Real {
        match (self.value, rhs.value) {
            (Some(a), Some(b)) => Real::from_computed(op(a, b)),
            _ => Real::indeterminate(),
        }
    }
}

impl Add for Real {
    type Output = Real;

    fn add(self, rhs: Real) -> Real {
        self.binary(rhs, |a, b| a + b)
    }
}

impl Sub for Real {
    type Output = Real;

    fn sub(self, rhs: Real) -> Real {
        self.binary(rhs, |a, b| a - b)
    }
}

impl Mul for Real {
    type Output = Real;

    fn mul(self, rhs: Real) -> Real {
        self.binary(rhs, |a, b| a * b)
    }
}

impl Neg for Real {
    type Output = Real;

    fn neg(self) -> Real {
        match self.value {
            Some(v) => Real {
                value: Some(-v),
                precision: self.precision,
            },
            None => Real::indeterminate(),
        }
    }
}

impl Add<Integer> for Real {
    type Output = Real;

    fn add(self, rhs: Integer) -> Real {
        self + rhs.to_real()
    }
}

impl Sub<Integer> for Real {
    type Output = Real;

    fn sub(self, rhs: Integer) -> Real {
        self - rhs.to_real()
    }
}

impl Mul<Integer> for Real {
    type Output = Real;

    fn mul(self, rhs: Integer) -> Real {
        self * rhs.to_real()
    }
}

impl fmt::Display for Real {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let Some(v) = self.value else {
            return write!(f, "$");
        };
        let sci = decompose(v);
        if sci.sign == 0 {
            return write!(f, "0.0");
        }
        if sci.sign < 0 {
            write!(f, "-")?;
        }
        write!(f, "{}.", sci.digits[0])?;
        if sci.digits.len() > 1 {
            for &d in &sci.digits[1..] {
                write!(f, "{d}")?;
            }
        } else {
            write!(f, "0")?;
        }
        write!(f, "E{}", sci.exponent)
    }
}

impl ExpressValue for Real {
    fn express_type(&self) -> ExpressType {
        ExpressType::Real
    }

    fn is_determinate(&self) -> bool {
        self.value.is_some()
    }

    fn indeterminate() -> Self {
        Self {
            value: None,
            precision: PRECISION_MAX,
        }
    }

    fn is_equal(&self, other: &Self, by_value: bool) -> Logical {
        match (self.value, other.value) {
            (Some(a), Some(b)) => {
                if by_value {
                    Logical::from(
                        compare(a, self.precision, b, other.precision) == Ordering::Equal,
                    )
                } else {
                    Logical::from(a == b && self.precision == other.precision)
                }
            }
            _ => Logical::UNKNOWN,
        }
    }
}

/// EXPRESS INTEGER, or indeterminate (`?`).
///
/// Overflowing `+ - *` yields the indeterminate INTEGER: EXPRESS has an
/// indeterminate fallback for undefined numeric results, so no error is
/// raised.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Integer {
    value: Option<i64>,
}

impl Integer {
    /// Get the payload, if determinate
    pub fn value(&self) -> Option<i64> {
        self.value
    }

    /// Widen to REAL at maximum precision
    pub fn to_real(&self) -> Real {
        match self.value {
            Some(v) => Real::from_computed(v as f64),
            None => Real::indeterminate(),
        }
    }

    /// Three-way comparison; `None` when either operand is indeterminate
    pub fn compare(&self, other: &Integer) -> Option<Ordering> {
        match (self.value, other.value) {
            (Some(a), Some(b)) => Some(a.cmp(&b)),
            _ => None,
        }
    }

    /// `self < other`; UNKNOWN when either operand is indeterminate
    pub fn less(&self, other: &Integer) -> Logical {
        match self.compare(other) {
            Some(ord) => Logical::from(ord == Ordering::Less),
            None => Logical::UNKNOWN,
        }
    }

    /// `self <= other`; UNKNOWN when either operand is indeterminate
    pub fn less_eq(&self, other: &Integer) -> Logical {
        match self.compare(other) {
            Some(ord) => Logical::from(ord != Ordering::Greater),
            None => Logical::UNKNOWN,
        }
    }

    /// `self > other`; UNKNOWN when either operand is indeterminate
    pub fn greater(&self, other: &Integer) -> Logical {
        match self.compare(other) {
            Some(ord) => Logical::from(ord == Ordering::Greater),
            None => Logical::UNKNOWN,
        }
    }

    /// `self >= other`; UNKNOWN when either operand is indeterminate
    pub fn greater_eq(&self, other: &Integer) -> Logical {
        match self.compare(other) {
            Some(ord) => Logical::from(ord != Ordering::Less),
            None => Logical::UNKNOWN,
        }
    }

    /// Integer division truncating toward zero; divisor zero is an error
    pub fn int_div(&self, rhs: &Integer) -> Result<Integer> {
        if rhs.value == Some(0) {
            return Err(SdaiError::division_by_zero("DIV"));
        }
        match (self.value, rhs.value) {
            (Some(a), Some(b)) => Ok(Integer {
                value: a.checked_div(b),
            }),
            _ => Ok(Integer::indeterminate()),
        }
    }

    /// `a - b * (a DIV b)`; divisor zero is an error
    pub fn modulo(&self, rhs: &Integer) -> Result<Integer> {
        if rhs.value == Some(0) {
            return Err(SdaiError::division_by_zero("MOD"));
        }
        match (self.value, rhs.value) {
            (Some(a), Some(b)) => Ok(Integer {
                value: a.checked_rem(b),
            }),
            _ => Ok(Integer::indeterminate()),
        }
    }

    /// Exponentiation, producing REAL at maximum precision
    pub fn power(&self, exponent: &Integer) -> Result<Real> {
        self.to_real().power(&exponent.to_real())
    }

    fn binary(self, rhs: Integer, op: impl Fn(i64, i64) -> Option<i64>) -> Integer {
        match (self.value, rhs.value) {
            (Some(a), Some(b)) => Integer { value: op(a, b) },
            _ => Integer::indeterminate(),
        }
    }
}

impl From<i64> for Integer {
    fn from(value: i64) -> Self {
        Self { value: Some(value) }
    }
}

impl Add for Integer {
    type Output = Integer;

    fn add(self, rhs: Integer) -> Integer {
        self.binary(rhs, i64::checked_add)
    }
}

impl Sub for Integer {
    type Output = Integer;

    fn sub(self, rhs: Integer) -> Integer {
        self.binary(rhs, i64::checked_sub)
    }
}

impl Mul for Integer {
    type Output = Integer;

    fn mul(self, rhs: Integer) -> Integer {
        self.binary(rhs, i64::checked_mul)
    }
}

impl Neg for Integer {
    type Output = Integer;

    fn neg(self) -> Integer {
        Integer {
            value: self.value.and_then(i64::checked_neg),
        }
    }
}

impl Add<Real> for Integer {
    type Output = Real;

    fn add(self, rhs: Real) -> Real {
        self.to_real() + rhs
    }
}

impl Sub<Real> for Integer {
    type Output = Real;

    fn sub(self, rhs: Real) -> Real {
        self.to_real() - rhs
    }
}

impl Mul<Real> for Integer {
    type Output = Real;

    fn mul(self, rhs: Real) -> Real {
        self.to_real() * rhs
    }
}

impl fmt::Display for Integer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.value {
            None => write!(f, "$"),
            Some(v) => write!(f, "{v}"),
        }
    }
}

impl ExpressValue for Integer {
    fn express_type(&self) -> ExpressType {
        ExpressType::Integer
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

/// NUMBER: the runtime union of the two numeric refinements.
///
/// The NUMBER supertype exists as a type descriptor; a runtime value always
/// carries its concrete refinement, and `express_type` reports that
/// refinement.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "value")]
pub enum Number {
    Integer(Integer),
    Real(Real),
}

impl Number {
    /// Widen either refinement to REAL
    pub fn to_real(&self) -> Real {
        match self {
            Self::Integer(i) => i.to_real(),
            Self::Real(r) => *r,
        }
    }

    /// Division always yields REAL; divisor zero is an error
    pub fn checked_div(&self, rhs: &Number) -> Result<Real> {
        self.to_real().checked_div(&rhs.to_real())
    }

    /// Exponentiation, producing REAL at maximum precision
    pub fn power(&self, exponent: &Number) -> Result<Real> {
        self.to_real().power(&exponent.to_real())
    }

    /// EXPRESS DIV, producing INTEGER
    pub fn int_div(&self, rhs: &Number) -> Result<Integer> {
        match (self, rhs) {
            (Self::Integer(a), Self::Integer(b)) => a.int_div(b),
            (a, b) => a.to_real().int_div(&b.to_real()),
        }
    }

    /// EXPRESS MOD, producing INTEGER
    pub fn modulo(&self, rhs: &Number) -> Result<Integer> {
        match (self, rhs) {
            (Self::Integer(a), Self::Integer(b)) => a.modulo(b),
            (a, b) => a.to_real().modulo(&b.to_real()),
        }
    }
}

impl From<Integer> for Number {
    fn from(value: Integer) -> Self {
        Self::Integer(value)
    }
}

impl From<Real> for Number {
    fn from(value: Real) -> Self {
        Self::Real(value)
    }
}

impl Add for Number {
    type Output = Number;

    fn add(self, rhs: Number) -> Number {
        match (self, rhs) {
            (Self::Integer(a), Self::Integer(b)) => Number::Integer(a + b),
            (a, b) => Number::Real(a.to_real() + b.to_real()),
        }
    }
}

impl Sub for Number {
    type Output = Number;

    fn sub(self, rhs: Number) -> Number {
        match (self, rhs) {
            (Self::Integer(a), Self::Integer(b)) => Number::Integer(a - b),
            (a, b) => Number::Real(a.to_real() - b.to_real()),
        }
    }
}

impl Mul for Number {
    type Output = Number;

    fn mul(self, rhs: Number) -> Number {
        match (self, rhs) {
            (Self::Integer(a), Self::Integer(b)) => Number::Integer(a * b),
            (a, b) => Number::Real(a.to_real() * b.to_real()),
        }
    }
}

impl fmt::Display for Number {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Integer(i) => write!(f, "{i}"),
            Self::Real(r) => write!(f, "{r}"),
        }
    }
}

impl ExpressValue for Number {
    fn express_type(&self) -> ExpressType {
        match self {
            Self::Integer(_) => ExpressType::Integer,
            Self::Real(_) => ExpressType::Real,
        }
    }

    fn is_determinate(&self) -> bool {
        match self {
            Self::Integer(i) => i.is_determinate(),
            Self::Real(r) => r.is_determinate(),
        }
    }

    fn indeterminate() -> Self {
        Self::Real(Real::indeterminate())
    }

    fn is_equal(&self, other: &Self, by_value: bool) -> Logical {
        match (self, other) {
            (Self::Integer(a), Self::Integer(b)) => a.is_equal(b, by_value),
            (a, b) => a.to_real().is_equal(&b.to_real(), by_value),
        }
    }
}
