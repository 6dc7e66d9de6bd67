use std::fmt::Debug;

mod partial_enum;

pub use partial_enum::*;

/// Totally ordered scalar with successor/predecessor and bounds.
///
/// This is the key type of every range and space in this crate. It is
/// implemented for anything that is `PartialEnum + Ord + Copy + Debug`, which
/// includes the primitive integers and the address types of [`crate::ip`].
pub trait Metric: PartialEnum + Ord + Copy + Debug {}

impl<T: PartialEnum + Ord + Copy + Debug> Metric for T {}

/// `a.succ() == Some(b)`, without overflowing at `T::MAX`.
#[inline]
pub(crate) fn is_followed_by<T: Metric>(a: T, b: T) -> bool {
	a.succ() == Some(b)
}
