//! The shared capability contract of every EXPRESS value
//!
//! Simple types, the runtime value union, and aggregates all implement
//! [`ExpressValue`]. The aggregate engine is written entirely against this
//! trait; no downcasting to concrete types happens outside the
//! element-insertion compatibility check.

use crate::logical::Logical;
use crate::type_system::{Compatibility, ExpressType};
use std::fmt;

/// Capabilities common to every EXPRESS value type.
pub trait ExpressValue: Clone + fmt::Debug + fmt::Display {
    /// The runtime type descriptor of this value
    fn express_type(&self) -> ExpressType;

    /// Whether this value holds a payload. An indeterminate (`?`) value
    /// compares as UNKNOWN against anything and its payload is meaningless.
    fn is_determinate(&self) -> bool;

    /// The indeterminate value of this type.
    ///
    /// This is the explicit default-value provider used by aggregates for
    /// unset slots and out-of-range reads; it is constructed fresh and never
    /// shared mutably.
    fn indeterminate() -> Self;

    /// EXPRESS equality. `by_value` selects value equality (`=`) against
    /// instance equality (`:=:`, identical stored representation). Either
    /// operand indeterminate yields UNKNOWN, never FALSE.
    fn is_equal(&self, other: &Self, by_value: bool) -> Logical;

    /// Canonical STEP physical-file text for this value; `$` when
    /// indeterminate.
    fn print_value(&self) -> String {
        self.to_string()
    }

    /// Classify whether this value may occupy a slot declared as `target`
    fn compatibility_with(&self, target: &ExpressType) -> Compatibility {
        self.express_type().compatibility_with(target)
    }
}
