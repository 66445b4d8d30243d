//! Serialization round-trips for the runtime value union

use pretty_assertions::assert_eq;
use sdai_aggregate::{Aggregate, Value};
use sdai_types::{ExpressType, ExpressValue, Logical, Real};

#[test]
fn value_union_round_trips_through_json() {
    let mut list = Aggregate::list(ExpressType::Generic, 0, Some(10)).with_optional();
    list.add_element(Value::integer(42), 1).unwrap();
    list.add_element(Value::real(1.5).unwrap(), 1).unwrap();
    list.add_element(Value::from(Logical::UNKNOWN), 1).unwrap();
    list.add_element(Value::Indeterminate, 1).unwrap();
    let value = Value::from(list);

    let json = serde_json::to_string(&value).unwrap();
    let back: Value = serde_json::from_str(&json).unwrap();
    assert_eq!(value, back);
}

#[test]
fn indeterminate_real_round_trips() {
    let value = Value::from(Real::indeterminate());
    let json = serde_json::to_string(&value).unwrap();
    let back: Value = serde_json::from_str(&json).unwrap();
    assert_eq!(value, back);
}
