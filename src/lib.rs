//! An *IP space* is a map from ranges of IP addresses to payloads. Rather
//! than storing one entry per address, consecutive addresses with the same
//! payload are kept as a single range, so a space holding a few networks
//! stays small no matter how many addresses those networks cover.
//!
//! This library provides the [`IpSpace<P>`] map and the [`IpRangeSet`] set
//! over both IPv4 and IPv6, built on the family-agnostic
//! [`DiscreteSpace<M, P>`](generic::DiscreteSpace), a red-black interval
//! tree over any discrete metric. The [`ip`] module holds the address,
//! mask, range and network types.
//!
//! ## Usage
//!
//! Ranges are given as anything convertible to an [`IpRange`]: a single
//! address, a family-specific range or network, or parsed text in the
//! `min-max`, `addr/mask` or single address forms.
//!
//! ```
//! use ip_space::{IpSpace, IpRange};
//!
//! let mut space: IpSpace<u32> = IpSpace::new();
//! space.mark("10.0.0.0/8".parse::<IpRange>().unwrap(), 1);
//! space.mark("10.1.0.0-10.1.0.255".parse::<IpRange>().unwrap(), 2);
//! assert_eq!(space.len(), 3);
//! assert_eq!(space.find("10.1.0.7".parse().unwrap()).map(|(_, p)| *p), Some(2));
//! assert_eq!(space.find("10.2.0.7".parse().unwrap()).map(|(_, p)| *p), Some(1));
//! ```
//!
//! Beside `mark`, which overwrites, a space can `fill` only what is not
//! mapped yet, `erase` a range, or `blend` a value into the existing
//! payloads:
//!
//! ```
//! # use ip_space::{IpSpace, IpRange};
//! let mut space: IpSpace<u32> = IpSpace::new();
//! let range = |text: &str| text.parse::<IpRange>().unwrap();
//! let or = |acc: &mut u32, bits: &u32| { *acc |= *bits; true };
//!
//! space.blend(range("10.0.0.0-10.0.0.99"), &0b01, or);
//! space.blend(range("10.0.0.50-10.0.0.149"), &0b10, or);
//! space.fill(range("10.0.0.0-10.0.0.255"), 0b100);
//! space.erase(range("10.0.0.200"));
//!
//! let ranges: Vec<String> = space.iter().map(|(r, p)| format!("{} {}", r, p)).collect();
//! assert_eq!(ranges, [
//!   "10.0.0.0-10.0.0.49 1",
//!   "10.0.0.50-10.0.0.99 3",
//!   "10.0.0.100-10.0.0.149 2",
//!   "10.0.0.150-10.0.0.199 4",
//!   "10.0.0.201-10.0.0.255 4"
//! ]);
//! ```
//!
//! ### Networks
//!
//! Any range decomposes into the smallest list of CIDR networks covering
//! it exactly:
//!
//! ```
//! use ip_space::ip::Ip4Range;
//!
//! let range: Ip4Range = "10.33.45.19-10.33.45.76".parse().unwrap();
//! let nets: Vec<String> = range.networks().map(|n| n.to_string()).collect();
//! assert_eq!(nets, [
//!   "10.33.45.19/32",
//!   "10.33.45.20/30",
//!   "10.33.45.24/29",
//!   "10.33.45.32/27",
//!   "10.33.45.64/29",
//!   "10.33.45.72/30",
//!   "10.33.45.76/32"
//! ]);
//! ```
mod error;
pub mod generic;
pub mod ip;
mod range;
mod space;
pub mod util;

#[cfg(feature = "serde")]
mod serde;

#[cfg(test)]
mod proptests;

pub use error::ParseError;
pub use ip::{
	Family,
	Ip4Addr,
	Ip6Addr,
	IpAddr,
	IpMask,
	IpNet,
	IpRange
};
pub use range::*;
pub use space::*;
