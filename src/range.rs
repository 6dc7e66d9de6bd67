use std::{
	cmp::Ordering,
	fmt,
	ops::RangeInclusive
};
use crate::util::{
	Metric,
	is_followed_by
};

mod relation;

pub use relation::*;

/// Closed interval `[min, max]` over a discrete metric.
///
/// A range is empty when `min > max`. The default range is empty, with
/// `min` set to `T::MAX` and `max` set to `T::MIN`, so that it is the
/// identity of [`DiscreteRange::hull`].
///
/// # Ordering
///
/// The comparison operators are **containment tests**, not positional
/// comparisons:
///
/// ```
/// use ip_space::DiscreteRange;
///
/// let outer = DiscreteRange::new(1u32, 10);
/// let inner = DiscreteRange::new(3u32, 4);
/// let left = DiscreteRange::new(0u32, 2);
///
/// assert!(inner < outer); // strict subset
/// assert!(outer >= outer); // non-strict superset
/// assert!(!(left < outer) && !(left > outer)); // incomparable
/// ```
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct DiscreteRange<T> {
	min: T,
	max: T
}

impl<T: Metric> DiscreteRange<T> {
	pub fn new(min: T, max: T) -> DiscreteRange<T> {
		DiscreteRange { min, max }
	}

	/// Range containing only `value`.
	pub fn singleton(value: T) -> DiscreteRange<T> {
		DiscreteRange { min: value, max: value }
	}

	/// Range covering the whole metric.
	pub fn all() -> DiscreteRange<T> {
		DiscreteRange { min: T::MIN, max: T::MAX }
	}

	#[inline]
	pub fn min(&self) -> T {
		self.min
	}

	#[inline]
	pub fn max(&self) -> T {
		self.max
	}

	pub fn assign(&mut self, min: T, max: T) -> &mut Self {
		self.min = min;
		self.max = max;
		self
	}

	pub fn assign_min(&mut self, min: T) -> &mut Self {
		self.min = min;
		self
	}

	pub fn assign_max(&mut self, max: T) -> &mut Self {
		self.max = max;
		self
	}

	/// Reset to the empty range.
	pub fn clear(&mut self) -> &mut Self {
		*self = Self::default();
		self
	}

	#[inline]
	pub fn is_empty(&self) -> bool {
		self.min > self.max
	}

	pub fn is_singleton(&self) -> bool {
		self.min == self.max
	}

	/// Whether this range covers the whole metric.
	pub fn is_maximal(&self) -> bool {
		self.min == T::MIN && self.max == T::MAX
	}

	#[inline]
	pub fn contains(&self, value: T) -> bool {
		self.min <= value && value <= self.max
	}

	pub fn has_intersection_with(&self, that: &Self) -> bool {
		!self.intersection(that).is_empty()
	}

	pub fn is_subset_of(&self, that: &Self) -> bool {
		that.min <= self.min && self.max <= that.max
	}

	pub fn is_superset_of(&self, that: &Self) -> bool {
		that.is_subset_of(self)
	}

	pub fn is_strict_subset_of(&self, that: &Self) -> bool {
		self.is_subset_of(that) && self != that
	}

	pub fn is_strict_superset_of(&self, that: &Self) -> bool {
		that.is_strict_subset_of(self)
	}

	/// Whether `that` starts immediately after this range ends.
	///
	/// Never true when `self.max` is the metric maximum.
	pub fn is_left_adjacent_to(&self, that: &Self) -> bool {
		is_followed_by(self.max, that.min)
	}

	/// Whether the ranges are disjoint and touch on either side.
	pub fn is_adjacent_to(&self, that: &Self) -> bool {
		self.is_left_adjacent_to(that) || that.is_left_adjacent_to(self)
	}

	/// Whether the union of the two ranges is itself a range.
	pub fn is_compatible_with(&self, that: &Self) -> bool {
		self.has_intersection_with(that) || self.is_adjacent_to(that)
	}

	pub fn relationship(&self, that: &Self) -> Relation {
		if self.has_intersection_with(that) {
			if self == that {
				Relation::Equal
			} else if self.is_subset_of(that) {
				Relation::Subset
			} else if self.is_superset_of(that) {
				Relation::Superset
			} else {
				Relation::Overlap
			}
		} else if self.is_adjacent_to(that) {
			Relation::Adjacent
		} else {
			Relation::None
		}
	}

	/// How the left edge of `that` relates to the right edge of `self`.
	pub fn left_edge_relationship(&self, that: &Self) -> EdgeRelation {
		if self.max < that.max {
			if is_followed_by(self.max, that.min) {
				EdgeRelation::Adjacent
			} else if self.max < that.min {
				EdgeRelation::Gap
			} else {
				EdgeRelation::Overlap
			}
		} else {
			EdgeRelation::None
		}
	}

	/// Common part of both ranges, possibly empty.
	pub fn intersection(&self, that: &Self) -> Self {
		DiscreteRange {
			min: std::cmp::max(self.min, that.min),
			max: std::cmp::min(self.max, that.max)
		}
	}

	/// Smallest range containing both ranges.
	///
	/// An empty operand is ignored.
	pub fn hull(&self, that: &Self) -> Self {
		if self.is_empty() {
			*that
		} else if that.is_empty() {
			*self
		} else {
			DiscreteRange {
				min: std::cmp::min(self.min, that.min),
				max: std::cmp::max(self.max, that.max)
			}
		}
	}
}

impl<T: Metric> Default for DiscreteRange<T> {
	fn default() -> Self {
		DiscreteRange { min: T::MAX, max: T::MIN }
	}
}

impl<T: Metric> PartialOrd for DiscreteRange<T> {
	/// Containment order: `Less` for a strict subset, `Greater` for a strict
	/// superset, `None` when neither contains the other.
	fn partial_cmp(&self, that: &Self) -> Option<Ordering> {
		if self == that {
			Some(Ordering::Equal)
		} else if self.is_subset_of(that) {
			Some(Ordering::Less)
		} else if self.is_superset_of(that) {
			Some(Ordering::Greater)
		} else {
			None
		}
	}
}

impl<T: Metric> From<T> for DiscreteRange<T> {
	fn from(value: T) -> Self {
		DiscreteRange::singleton(value)
	}
}

impl<T: Metric> From<RangeInclusive<T>> for DiscreteRange<T> {
	fn from(range: RangeInclusive<T>) -> Self {
		let (min, max) = range.into_inner();
		DiscreteRange::new(min, max)
	}
}

impl<T: fmt::Debug> fmt::Debug for DiscreteRange<T> {
	fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
		write!(f, "[{:?}, {:?}]", self.min, self.max)
	}
}
