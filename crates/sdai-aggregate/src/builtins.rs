//! EXPRESS builtin functions over aggregates
//!
//! These free functions carry the EXPRESS surface names so that code written
//! against the engine reads like the EXPRESS source it mirrors. Where
//! EXPRESS defines a result of `?` (an unbounded HIBOUND, any query on an
//! unbound aggregate), the returned value is indeterminate rather than an
//! error.

use crate::aggregate::Aggregate;
use sdai_types::{ExpressValue, Integer, Logical};

/// Number of elements currently stored (the sum of BAG multiplicities)
#[allow(non_snake_case)]
pub fn SIZEOF<T: ExpressValue>(aggregate: &Aggregate<T>) -> Integer {
    if aggregate.is_determinate() {
        Integer::from(aggregate.len() as i64)
    } else {
        Integer::indeterminate()
    }
}

/// Declared lower bound
#[allow(non_snake_case)]
pub fn LOBOUND<T: ExpressValue>(aggregate: &Aggregate<T>) -> Integer {
    match aggregate.lobound() {
        Some(low) => Integer::from(low),
        None => Integer::indeterminate(),
    }
}

/// Declared upper bound; indeterminate when unbounded
#[allow(non_snake_case)]
pub fn HIBOUND<T: ExpressValue>(aggregate: &Aggregate<T>) -> Integer {
    match aggregate.hibound() {
        Some(high) => Integer::from(high),
        None => Integer::indeterminate(),
    }
}

/// Lowest valid index: the declared origin for ARRAY, 1 otherwise
#[allow(non_snake_case)]
pub fn LOINDEX<T: ExpressValue>(aggregate: &Aggregate<T>) -> Integer {
    match aggregate.loindex() {
        Some(low) => Integer::from(low),
        None => Integer::indeterminate(),
    }
}

/// Highest populated index: the declared top for ARRAY, the size otherwise
#[allow(non_snake_case)]
pub fn HIINDEX<T: ExpressValue>(aggregate: &Aggregate<T>) -> Integer {
    match aggregate.hiindex() {
        Some(high) => Integer::from(high),
        None => Integer::indeterminate(),
    }
}

/// Instance-based membership. UNKNOWN when the search is undecidable.
#[allow(non_snake_case)]
pub fn IN<T: ExpressValue>(element: &T, aggregate: &Aggregate<T>) -> Logical {
    if !aggregate.is_determinate() {
        return Logical::UNKNOWN;
    }
    aggregate.check_same_element(element, false).as_logical()
}

/// Value-based membership. UNKNOWN when the search is undecidable.
#[allow(non_snake_case)]
pub fn VALUE_IN<T: ExpressValue>(element: &T, aggregate: &Aggregate<T>) -> Logical {
    if !aggregate.is_determinate() {
        return Logical::UNKNOWN;
    }
    aggregate.check_same_element(element, true).as_logical()
}
