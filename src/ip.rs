//! IPv4 and IPv6 addresses, masks, ranges and networks.
//!
//! The address types are discrete metrics, so they can key a
//! [`DiscreteRange`](crate::DiscreteRange) or a
//! [`DiscreteSpace`](crate::generic::DiscreteSpace) directly.
use std::{
	fmt,
	hash::Hash,
	str::FromStr
};
use crate::{
	ParseError,
	util::Metric
};

mod addr;
mod endpoint;
mod ip4;
mod ip6;
mod mask;
mod net;
mod parse;
mod range;

pub use addr::*;
pub use endpoint::*;
pub use ip4::*;
pub use ip6::*;
pub use mask::*;
pub use net::*;
pub use range::*;

/// Address family.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Family {
	Ip4,
	Ip6
}

impl fmt::Display for Family {
	fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
		match self {
			Family::Ip4 => write!(f, "IPv4"),
			Family::Ip6 => write!(f, "IPv6")
		}
	}
}

/// Operations shared by [`Ip4Addr`] and [`Ip6Addr`].
pub trait IpFamily: Metric + Hash + fmt::Display + FromStr<Err = ParseError> {
	/// Number of bits in an address.
	const WIDTH: u8;

	const FAMILY: Family;

	/// First address of the network of `mask` containing this address.
	fn network(self, mask: IpMask) -> Self;

	/// Last address of the network of `mask` containing this address.
	fn broadcast(self, mask: IpMask) -> Self;

	/// Mask of the widest network whose first address is this address.
	fn mask_for(self) -> IpMask;

	/// The mask this address spells out, if its bits are a run of ones
	/// followed by a run of zeros.
	fn as_mask(self) -> Option<IpMask>;
}
