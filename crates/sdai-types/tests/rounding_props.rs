//! Property tests for the rounding and precision-aware comparison engine

use proptest::prelude::*;
use sdai_types::{PRECISION_MAX, compare, round};
use std::cmp::Ordering;

proptest! {
    /// Rounding is idempotent: re-rounding an already rounded value at the
    /// same precision changes nothing.
    #[test]
    fn round_is_idempotent(
        x in -1.0e12_f64..1.0e12,
        p in 1u32..=PRECISION_MAX,
    ) {
        let once = round(x, p);
        prop_assert_eq!(round(once, p), once);
    }

    /// Rounding never flips the sign.
    #[test]
    fn round_preserves_sign(
        x in -1.0e12_f64..1.0e12,
        p in 1u32..=PRECISION_MAX,
    ) {
        let rounded = round(x, p);
        prop_assert!(rounded == 0.0 || rounded.signum() == x.signum());
    }

    /// Comparison is antisymmetric.
    #[test]
    fn compare_is_antisymmetric(
        x in -1.0e9_f64..1.0e9,
        y in -1.0e9_f64..1.0e9,
        px in 1u32..=PRECISION_MAX,
        py in 1u32..=PRECISION_MAX,
    ) {
        prop_assert_eq!(compare(x, px, y, py), compare(y, py, x, px).reverse());
    }

    /// A value compares equal to itself at its own precision.
    #[test]
    fn compare_is_reflexive(
        x in -1.0e9_f64..1.0e9,
        p in 1u32..=PRECISION_MAX,
    ) {
        prop_assert_eq!(compare(x, p, x, p), Ordering::Equal);
    }

    /// Rounding to a coarser precision never increases the digit count that
    /// comparison sees: a value and its coarser rounding agree at the
    /// coarser precision.
    #[test]
    fn coarser_rounding_compares_equal(
        x in -1.0e9_f64..1.0e9,
        p in 1u32..=PRECISION_MAX,
    ) {
        let coarse = round(x, p);
        prop_assert_eq!(compare(x, p, coarse, PRECISION_MAX), Ordering::Equal);
    }
}
