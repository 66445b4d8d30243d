//! Behavior tests for the aggregate engine
//!
//! These exercise the engine the way generated entity code uses it: via the
//! checked/unchecked mutation paths and the EXPRESS-named builtins.

use pretty_assertions::assert_eq;
use sdai_aggregate::{Aggregate, HIBOUND, IN, MatchCount, SIZEOF, SearchOutcome, VALUE_IN, Value};
use sdai_diagnostics::SdaiError;
use sdai_types::{AggregateKind, ExpressType, ExpressValue, Integer, Logical, Real};

fn real3(v: f64) -> Real {
    Real::with_precision(v, 3).unwrap()
}

#[test]
fn list_of_reals_end_to_end() {
    let mut list = Aggregate::list(ExpressType::Real, 1, Some(5));
    list.add_element(real3(1.001), 1).unwrap();
    list.add_element(real3(1.002), 1).unwrap();
    list.add_element(real3(1.003), 1).unwrap();

    assert_eq!(SIZEOF(&list).value(), Some(3));
    assert_eq!(HIBOUND(&list).value(), Some(5));

    let second = list.get(&Integer::from(2));
    assert!(second.is_equal(&real3(1.002), true).is_true());

    // Index 6 exceeds the declared upper cardinality bound of 5.
    let err = list.set_element(6, Real::new(2.0).unwrap()).unwrap_err();
    assert!(matches!(err, SdaiError::BoundViolation { .. }));
}

#[test]
fn bag_multiplicity_vs_set_uniqueness() {
    let mut bag = Aggregate::bag(ExpressType::Real, 0, None);
    bag.add_element(real3(7.5), 1).unwrap();
    bag.add_element(real3(7.5), 1).unwrap();
    assert_eq!(bag.len(), 2);
    assert_eq!(bag.distinct_len(), 1);
    assert_eq!(
        bag.check_same_element(&real3(7.5), true),
        MatchCount::Matches(2)
    );

    let mut set = Aggregate::set(ExpressType::Real, 0, None);
    set.set_element(1, real3(7.5)).unwrap();
    assert!(matches!(
        set.set_element(2, real3(7.5)),
        Err(SdaiError::DuplicateElement { .. })
    ));
}

#[test]
fn tri_state_membership_search() {
    let mut bag = Aggregate::bag(ExpressType::Real, 0, None).with_optional();
    bag.add_element(Real::indeterminate(), 1).unwrap();

    // One indeterminate element, no match: undecidable, not absent.
    assert_eq!(
        bag.check_same_element(&real3(1.0), true),
        MatchCount::Undecidable(1)
    );
    assert_eq!(
        bag.find_same_element(&real3(1.0), true),
        SearchOutcome::Undecidable
    );
    assert!(VALUE_IN(&real3(1.0), &bag).is_unknown());

    bag.add_element(real3(2.0), 1).unwrap();
    // Now one comparison is decidable, so a miss is Absent...
    assert_eq!(
        bag.find_same_element(&real3(1.0), true),
        SearchOutcome::Absent
    );
    // ...but counting still reports the undecidable slot.
    assert_eq!(
        bag.check_same_element(&real3(1.0), true),
        MatchCount::Undecidable(1)
    );
}

#[test]
fn membership_over_unbound_aggregate_is_unknown() {
    let unbound: Aggregate<Real> = Aggregate::unbound(AggregateKind::List, ExpressType::Real);
    assert!(IN(&Real::new(1.0).unwrap(), &unbound).is_unknown());
    assert!(!SIZEOF(&unbound).is_determinate());
}

#[test]
fn heterogeneous_aggregate_over_values() {
    let mut select = Aggregate::list(ExpressType::Generic, 0, None);
    select.add_element(Value::integer(3), 1).unwrap();
    select.add_element(Value::real(3.0).unwrap(), 1).unwrap();
    select.add_element(Value::string("three"), 1).unwrap();

    // Value equality crosses the numeric variants, so the INTEGER 3 is
    // found twice.
    assert_eq!(
        select.check_same_element(&Value::integer(3), true),
        MatchCount::Matches(2)
    );
    // Instance equality does not cross variants.
    assert_eq!(
        select.check_same_element(&Value::integer(3), false),
        MatchCount::Matches(1)
    );
    assert!(VALUE_IN(&Value::string("three"), &select).is_true());
    assert!(VALUE_IN(&Value::string("four"), &select).is_false());
}

#[test]
fn typed_aggregate_rejects_incompatible_value() {
    let mut reals = Aggregate::list(ExpressType::Real, 0, None);
    assert!(reals.add_element(Value::real(1.0).unwrap(), 1).is_ok());
    // INTEGER widens into a REAL-typed aggregate.
    assert!(reals.add_element(Value::integer(1), 1).is_ok());
    // The untyped indeterminate fits any basis type.
    assert!(reals.add_element(Value::Indeterminate, 1).is_ok());
    assert!(matches!(
        reals.add_element(Value::string("1.0"), 1),
        Err(SdaiError::TypeMismatch { .. })
    ));
}

#[test]
fn nested_aggregate_equality() {
    let mut inner_a = Aggregate::list(ExpressType::Integer, 0, None);
    inner_a.add_element(Value::integer(1), 1).unwrap();
    let mut inner_b = Aggregate::list(ExpressType::Integer, 0, None);
    inner_b.add_element(Value::integer(1), 1).unwrap();

    let mut outer_a = Aggregate::set(
        ExpressType::aggregate(AggregateKind::List, ExpressType::Integer),
        0,
        None,
    );
    outer_a.add_element(Value::from(inner_a), 1).unwrap();
    let mut outer_b = Aggregate::set(
        ExpressType::aggregate(AggregateKind::List, ExpressType::Integer),
        0,
        None,
    );
    outer_b.add_element(Value::from(inner_b), 1).unwrap();

    assert!(outer_a.is_equal(&outer_b, true).is_true());
}

#[test]
fn logic_flows_through_membership() {
    // TRUE and UNKNOWN is UNKNOWN; FALSE and UNKNOWN is FALSE (per table,
    // not simple propagation) - exercised through a membership result.
    let mut bag = Aggregate::bag(ExpressType::Real, 0, None).with_optional();
    bag.add_element(Real::indeterminate(), 1).unwrap();
    let membership = VALUE_IN(&Real::new(1.0).unwrap(), &bag); // UNKNOWN

    assert!((Logical::TRUE & membership).is_unknown());
    assert!((Logical::FALSE & membership).is_false());
    assert!((Logical::TRUE | membership).is_true());
}

#[test]
fn array_slots_start_unset() {
    let mut arr: Aggregate<Integer> = Aggregate::array(ExpressType::Integer, 1, 3);
    assert_eq!(SIZEOF(&arr).value(), Some(3));
    assert!(!arr.get(&Integer::from(2)).is_determinate());

    arr.set_element(2, Integer::from(42)).unwrap();
    assert!(arr.get(&Integer::from(2)).is_determinate());
    assert_eq!(arr.print_value(), "($,42,$)");
}
