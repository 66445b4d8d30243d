//! The generic aggregate collection engine
//!
//! One storage scheme serves all four EXPRESS aggregate kinds: an ordered
//! sequence of (element, multiplicity) slots. Multiplicity above 1 arises
//! only for BAG; every other kind keeps one slot per element. The reported
//! size is always the sum of multiplicities.
//!
//! Mutation is two-tier: `add_element` and `get_mut` are the unchecked bulk
//! paths (type compatibility is still enforced on insertion), while
//! `set_element` re-validates the optionality, uniqueness and bound
//! constraints of the aggregate before storing.

use sdai_diagnostics::{Result, SdaiError};
use sdai_types::{AggregateKind, ExpressType, ExpressValue, Integer, Logical};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Declared bound pair: index range for ARRAY, cardinality range otherwise.
/// `high = None` means unbounded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Bounds {
    pub low: i64,
    pub high: Option<i64>,
}

/// One stored element together with its multiplicity.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
struct Slot<T> {
    element: T,
    count: usize,
}

/// Outcome of searching the distinct-slot domain for an equal element.
///
/// The index counts distinct slots (BAG multiplicities collapse to one
/// slot), starting at 0.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SearchOutcome {
    /// First slot whose element is equal
    Found(usize),
    /// No equal element; at least one comparison was decidable
    Absent,
    /// Every comparison attempted returned UNKNOWN
    Undecidable,
}

/// Outcome of counting elements equal to a probe, accounting for BAG
/// multiplicity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MatchCount {
    /// Total number of equal elements found (at least 1)
    Matches(usize),
    /// Nothing equal, and every comparison was decidable
    NoMatch,
    /// Nothing equal, but this many comparisons returned UNKNOWN
    Undecidable(usize),
}

impl MatchCount {
    /// Membership as a LOGICAL: present, absent, or UNKNOWN.
    pub fn as_logical(&self) -> Logical {
        match self {
            Self::Matches(_) => Logical::TRUE,
            Self::NoMatch => Logical::FALSE,
            Self::Undecidable(_) => Logical::UNKNOWN,
        }
    }
}

/// An EXPRESS aggregate over a basis value type.
///
/// The kind-defining flags (`optional`, `unique`, ordering) and the declared
/// bound pair are fixed at construction. An aggregate constructed without
/// bounds is **unbound** and indeterminate until [`Aggregate::bind`] is
/// called.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Aggregate<T: ExpressValue> {
    kind: AggregateKind,
    basis: ExpressType,
    optional: bool,
    unique: bool,
    bounds: Option<Bounds>,
    slots: Vec<Slot<T>>,
    size: usize,
    undef: T,
}

impl<T: ExpressValue> Aggregate<T> {
    fn with_bounds(
        kind: AggregateKind,
        basis: ExpressType,
        optional: bool,
        unique: bool,
        bounds: Option<Bounds>,
    ) -> Self {
        Self {
            kind,
            basis,
            optional,
            unique,
            bounds,
            slots: Vec::new(),
            size: 0,
            undef: T::indeterminate(),
        }
    }

    /// ARRAY over the declared index range `[low, high]`, pre-sized with
    /// unset (indeterminate) slots.
    pub fn array(basis: ExpressType, low: i64, high: i64) -> Self {
        let mut agg = Self::with_bounds(
            AggregateKind::Array,
            basis,
            false,
            false,
            Some(Bounds {
                low,
                high: Some(high),
            }),
        );
        agg.fill_unset();
        agg
    }

    /// LIST with the declared cardinality range
    pub fn list(basis: ExpressType, low: i64, high: Option<i64>) -> Self {
        Self::with_bounds(AggregateKind::List, basis, false, false, Some(Bounds { low, high }))
    }

    /// BAG with the declared cardinality range
    pub fn bag(basis: ExpressType, low: i64, high: Option<i64>) -> Self {
        Self::with_bounds(AggregateKind::Bag, basis, false, false, Some(Bounds { low, high }))
    }

    /// SET with the declared cardinality range; elements are unique
    pub fn set(basis: ExpressType, low: i64, high: Option<i64>) -> Self {
        Self::with_bounds(AggregateKind::Set, basis, false, true, Some(Bounds { low, high }))
    }

    /// An aggregate whose bounds are not yet known; indeterminate until
    /// bound
    pub fn unbound(kind: AggregateKind, basis: ExpressType) -> Self {
        Self::with_bounds(kind, basis, false, kind == AggregateKind::Set, None)
    }

    /// Allow indeterminate elements in slots (the OPTIONAL modifier)
    pub fn with_optional(mut self) -> Self {
        self.optional = true;
        self
    }

    /// Forbid instance-equal elements (the UNIQUE modifier)
    pub fn with_unique(mut self) -> Self {
        self.unique = true;
        self
    }

    /// Fix the bounds of an unbound aggregate, making it determinate. Has no
    /// effect when bounds were already declared.
    pub fn bind(&mut self, low: i64, high: Option<i64>) {
        if self.bounds.is_none() {
            self.bounds = Some(Bounds { low, high });
            if self.kind == AggregateKind::Array {
                self.fill_unset();
            }
        }
    }

    fn fill_unset(&mut self) {
        if let Some(b) = self.bounds
            && let Some(high) = b.high
        {
            let len = (high - b.low + 1).max(0) as usize;
            self.slots = (0..len)
                .map(|_| Slot {
                    element: T::indeterminate(),
                    count: 1,
                })
                .collect();
            self.size = len;
        }
    }

    /// Aggregate flavor
    pub fn kind(&self) -> AggregateKind {
        self.kind
    }

    /// Declared basis type
    pub fn basis(&self) -> &ExpressType {
        &self.basis
    }

    /// Whether slots may hold indeterminate elements
    pub fn is_optional(&self) -> bool {
        self.optional
    }

    /// Whether instance-equal elements are forbidden
    pub fn has_unique_constraint(&self) -> bool {
        self.unique
    }

    /// Whether insertion order is semantically significant
    pub fn is_ordered(&self) -> bool {
        self.kind.is_ordered()
    }

    /// Current element count: the sum of all multiplicities
    pub fn len(&self) -> usize {
        self.size
    }

    /// Whether no elements are stored
    pub fn is_empty(&self) -> bool {
        self.size == 0
    }

    /// Number of distinct slots (the unique-index domain; BAG multiplicities
    /// collapse to one slot)
    pub fn distinct_len(&self) -> usize {
        self.slots.len()
    }

    /// Declared lower bound; `None` while unbound
    pub fn lobound(&self) -> Option<i64> {
        self.bounds.map(|b| b.low)
    }

    /// Declared upper bound; `None` while unbound or when the upper bound is
    /// unbounded
    pub fn hibound(&self) -> Option<i64> {
        self.bounds.and_then(|b| b.high)
    }

    /// Whether an upper bound was declared
    pub fn is_bounded(&self) -> bool {
        self.bounds.is_some_and(|b| b.high.is_some())
    }

    /// Lowest valid index: the declared origin for ARRAY, 1 otherwise;
    /// `None` while unbound
    pub fn loindex(&self) -> Option<i64> {
        match self.kind {
            AggregateKind::Array => self.bounds.map(|b| b.low),
            _ => self.bounds.map(|_| 1),
        }
    }

    /// Highest populated index: the declared top for ARRAY, the current size
    /// otherwise; `None` while unbound
    pub fn hiindex(&self) -> Option<i64> {
        match self.kind {
            AggregateKind::Array => self.bounds.and_then(|b| b.high),
            _ => self.bounds.map(|_| self.size as i64),
        }
    }

    fn origin(&self) -> i64 {
        match (self.kind, self.bounds) {
            (AggregateKind::Array, Some(b)) => b.low,
            _ => 1,
        }
    }

    /// Map an EXPRESS index to (slot position, offset within multiplicity)
    fn locate(&self, index: i64) -> Option<(usize, usize)> {
        let origin = self.origin();
        if index < origin {
            return None;
        }
        let mut remaining = (index - origin) as usize;
        for (pos, slot) in self.slots.iter().enumerate() {
            if remaining < slot.count {
                return Some((pos, remaining));
            }
            remaining -= slot.count;
        }
        None
    }

    /// Unchecked indexed read.
    ///
    /// Indexing with an indeterminate index, or outside the populated range,
    /// yields the aggregate's indeterminate sentinel rather than an error.
    pub fn get(&self, index: &Integer) -> &T {
        match index.value().and_then(|i| self.locate(i)) {
            Some((pos, _)) => &self.slots[pos].element,
            None => &self.undef,
        }
    }

    /// Unchecked mutable access by index.
    ///
    /// No uniqueness, optionality or bound constraint is re-validated here;
    /// callers needing EXPRESS assignment-with-constraint-checking semantics
    /// must use [`Aggregate::set_element`]. For a BAG the returned element is
    /// shared by the whole multiplicity group.
    pub fn get_mut(&mut self, index: i64) -> Option<&mut T> {
        let (pos, _) = self.locate(index)?;
        Some(&mut self.slots[pos].element)
    }

    /// Iterate the elements in storage order, repeating BAG slots per
    /// multiplicity
    pub fn iter(&self) -> impl Iterator<Item = &T> {
        self.slots
            .iter()
            .flat_map(|slot| std::iter::repeat_n(&slot.element, slot.count))
    }

    /// Append without constraint validation.
    ///
    /// The element's runtime type must be compatible with the basis type,
    /// and `count` must be 1 for every kind except BAG (and never 0). A BAG
    /// merges an element value-equal to an existing slot into that slot's
    /// multiplicity.
    pub fn add_element(&mut self, element: T, count: usize) -> Result<()> {
        if !element.compatibility_with(&self.basis).is_compatible() {
            return Err(SdaiError::type_mismatch(
                "add_element",
                self.basis.name(),
                element.express_type().name(),
            ));
        }
        if count == 0 || (count > 1 && self.kind != AggregateKind::Bag) {
            return Err(SdaiError::InvalidCount {
                count,
                kind: self.kind.name().to_string(),
            });
        }
        if self.kind == AggregateKind::Bag
            && element.is_determinate()
            && let Some(slot) = self
                .slots
                .iter_mut()
                .find(|slot| slot.element.is_equal(&element, true).is_true())
        {
            slot.count += count;
            self.size += count;
            return Ok(());
        }
        self.slots.push(Slot { element, count });
        self.size += count;
        Ok(())
    }

    /// Checked assignment: validates type compatibility, optionality, the
    /// declared bounds and the uniqueness constraint, then stores through
    /// the unchecked path.
    ///
    /// For LIST/BAG/SET the index may be `size + 1` to append; holes are
    /// rejected.
    pub fn set_element(&mut self, index: i64, element: T) -> Result<()> {
        if !element.compatibility_with(&self.basis).is_compatible() {
            return Err(SdaiError::type_mismatch(
                "set_element",
                self.basis.name(),
                element.express_type().name(),
            ));
        }
        if !self.optional && !element.is_determinate() {
            return Err(SdaiError::IndeterminateElement { index });
        }
        let Some(bounds) = self.bounds else {
            return Err(SdaiError::UnboundAggregate {
                operation: "set_element".to_string(),
            });
        };

        let target = if self.kind == AggregateKind::Array {
            let high = bounds.high.unwrap_or(i64::MAX);
            if index < bounds.low || index > high {
                return Err(SdaiError::bound_violation(index, bounds.low, bounds.high));
            }
            self.locate(index)
        } else {
            if let Some(high) = bounds.high
                && index > high
            {
                return Err(SdaiError::bound_violation(index, bounds.low, bounds.high));
            }
            if index < 1 {
                return Err(SdaiError::bound_violation(index, 1, bounds.high));
            }
            if index as usize > self.size + 1 {
                return Err(SdaiError::IndexOutOfRange {
                    index,
                    size: self.size,
                });
            }
            self.locate(index)
        };

        if self.unique && element.is_determinate() {
            let duplicate = self.slots.iter().enumerate().any(|(pos, slot)| {
                Some(pos) != target.map(|(p, _)| p)
                    && slot.element.is_equal(&element, false).is_true()
            });
            if duplicate {
                return Err(SdaiError::DuplicateElement { index });
            }
        }

        match target {
            Some((pos, _)) => {
                let slot = &mut self.slots[pos];
                if slot.count == 1 {
                    slot.element = element;
                } else {
                    // Peel one occurrence off a BAG multiplicity group.
                    slot.count -= 1;
                    self.slots.insert(pos + 1, Slot { element, count: 1 });
                }
            }
            None => {
                self.slots.push(Slot { element, count: 1 });
                self.size += 1;
            }
        }
        Ok(())
    }

    /// Discard all elements; the aggregate stays bound and can be
    /// repopulated
    pub fn clear(&mut self) {
        self.slots.clear();
        self.size = 0;
    }

    /// Find the unique index of the first element equal to `rhs`.
    ///
    /// Returns [`SearchOutcome::Undecidable`] only when every comparison
    /// attempted returned UNKNOWN — membership must distinguish "definitely
    /// absent" from "undecidable".
    pub fn find_same_element(&self, rhs: &T, by_value: bool) -> SearchOutcome {
        let mut unknowns = 0usize;
        for (pos, slot) in self.slots.iter().enumerate() {
            let eq = slot.element.is_equal(rhs, by_value);
            if eq.is_true() {
                return SearchOutcome::Found(pos);
            }
            if !eq.is_false() {
                unknowns += 1;
            }
        }
        if !self.slots.is_empty() && unknowns == self.slots.len() {
            SearchOutcome::Undecidable
        } else {
            SearchOutcome::Absent
        }
    }

    /// Count the elements equal to `rhs` across all slots, accounting for
    /// BAG multiplicity.
    pub fn check_same_element(&self, rhs: &T, by_value: bool) -> MatchCount {
        let mut matches = 0usize;
        let mut unknowns = 0usize;
        for slot in &self.slots {
            let eq = slot.element.is_equal(rhs, by_value);
            if eq.is_true() {
                matches += slot.count;
            } else if !eq.is_false() {
                unknowns += 1;
            }
        }
        if matches > 0 {
            MatchCount::Matches(matches)
        } else if unknowns > 0 {
            MatchCount::Undecidable(unknowns)
        } else {
            MatchCount::NoMatch
        }
    }

    /// Element at a position in the distinct-slot domain (the unique-index
    /// space returned by [`Aggregate::find_same_element`]). Out-of-bound
    /// access is an error, not an indeterminate read.
    pub fn distinct_element(&self, unique_index: usize) -> Result<&T> {
        self.slots
            .get(unique_index)
            .map(|slot| &slot.element)
            .ok_or(SdaiError::IndexOutOfRange {
                index: unique_index as i64,
                size: self.slots.len(),
            })
    }

    /// Multiplicity of the slot at a unique index; above 1 only for BAG
    pub fn multiplicity(&self, unique_index: usize) -> Result<usize> {
        self.slots
            .get(unique_index)
            .map(|slot| slot.count)
            .ok_or(SdaiError::IndexOutOfRange {
                index: unique_index as i64,
                size: self.slots.len(),
            })
    }

    /// True iff no stored element is instance-equal to `rhs`. UNKNOWN
    /// comparisons never count as found, so an indeterminate `rhs` is always
    /// unique.
    pub fn is_unique(&self, rhs: &T) -> bool {
        !self
            .slots
            .iter()
            .any(|slot| slot.element.is_equal(rhs, false).is_true())
    }
}

impl<T: ExpressValue> fmt::Display for Aggregate<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.bounds.is_none() {
            return write!(f, "$");
        }
        write!(f, "(")?;
        for (i, element) in self.iter().enumerate() {
            if i > 0 {
                write!(f, ",")?;
            }
            write!(f, "{}", element.print_value())?;
        }
        write!(f, ")")
    }
}

impl<T: ExpressValue> ExpressValue for Aggregate<T> {
    fn express_type(&self) -> ExpressType {
        ExpressType::aggregate(self.kind, self.basis.clone())
    }

    fn is_determinate(&self) -> bool {
        self.bounds.is_some()
    }

    fn indeterminate() -> Self {
        Self::unbound(AggregateKind::List, ExpressType::Generic)
    }

    fn is_equal(&self, other: &Self, by_value: bool) -> Logical {
        if !self.is_determinate() || !other.is_determinate() {
            return Logical::UNKNOWN;
        }
        if self.kind != other.kind || self.size != other.size {
            return Logical::FALSE;
        }
        let mut unknown = false;
        if self.is_ordered() {
            for (a, b) in self.slots.iter().zip(&other.slots) {
                let eq = a.element.is_equal(&b.element, by_value);
                if eq.is_false() {
                    return Logical::FALSE;
                }
                if !eq.is_true() {
                    unknown = true;
                }
            }
        } else {
            // Multiset comparison: with equal total sizes, matching every
            // distinct element's multiplicity in one direction suffices.
            for slot in &self.slots {
                let mine = self.check_same_element(&slot.element, by_value);
                let theirs = other.check_same_element(&slot.element, by_value);
                match (mine, theirs) {
                    (MatchCount::Matches(a), MatchCount::Matches(b)) => {
                        if a != b {
                            return Logical::FALSE;
                        }
                    }
                    (MatchCount::Matches(_), MatchCount::NoMatch) => return Logical::FALSE,
                    _ => unknown = true,
                }
            }
        }
        if unknown {
            Logical::UNKNOWN
        } else {
            Logical::TRUE
        }
    }
}
