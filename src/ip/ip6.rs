use std::{
	fmt,
	net::Ipv6Addr,
	ops::{
		BitAnd,
		BitAndAssign,
		BitOr,
		BitOrAssign,
		Not,
		Shl,
		Shr
	},
	str::FromStr
};
use log::debug;
use crate::{
	ParseError,
	util::PartialEnum
};
use super::{
	Family,
	Ip4Addr,
	IpFamily,
	IpMask,
	parse::parse_ip6
};

/// IPv6 address.
///
/// The value is kept as a single 128 bit integer so that the natural
/// integer order is the address order. It splits into a most significant
/// and a least significant 64 bit word, and into eight 16 bit quads in
/// text order.
#[derive(Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Ip6Addr(u128);

impl Ip6Addr {
	pub const WIDTH: u8 = 128;
	pub const N_QUADS: usize = 8;
	pub const ANY: Ip6Addr = Ip6Addr(0);
	pub const LOOPBACK: Ip6Addr = Ip6Addr(1);

	pub const fn from_bits(bits: u128) -> Ip6Addr {
		Ip6Addr(bits)
	}

	pub const fn to_bits(self) -> u128 {
		self.0
	}

	/// Address from its most and least significant words.
	pub const fn from_words(msw: u64, lsw: u64) -> Ip6Addr {
		Ip6Addr((msw as u128) << 64 | lsw as u128)
	}

	/// Most and least significant words, in that order.
	pub const fn words(self) -> [u64; 2] {
		[(self.0 >> 64) as u64, self.0 as u64]
	}

	pub fn from_quads(quads: [u16; 8]) -> Ip6Addr {
		Ip6Addr(quads.into_iter().fold(0, |acc, q| acc << 16 | q as u128))
	}

	pub fn quads(self) -> [u16; 8] {
		Ipv6Addr::from(self.0).segments()
	}

	/// Quad `idx`, in text order.
	///
	/// # Panics
	///
	/// Panics if `idx >= 8`.
	pub fn quad(self, idx: usize) -> u16 {
		self.quads()[idx]
	}

	pub const fn octets(self) -> [u8; 16] {
		self.0.to_be_bytes()
	}

	/// Octet `idx`, in network order.
	///
	/// # Panics
	///
	/// Panics if `idx >= 16`.
	pub fn octet(self, idx: usize) -> u8 {
		self.octets()[idx]
	}

	/// Parse `text` into this address.
	///
	/// On failure the address is reset to [`Ip6Addr::ANY`] and `false` is
	/// returned.
	pub fn load(&mut self, text: &str) -> bool {
		match text.parse() {
			Ok(addr) => {
				*self = addr;
				true
			},
			Err(_) => {
				*self = Ip6Addr::ANY;
				false
			}
		}
	}

	pub fn is_any(self) -> bool {
		self.0 == 0
	}

	/// `::1`.
	pub fn is_loopback(self) -> bool {
		self.0 == 1
	}

	/// In `ff00::/8`.
	pub fn is_multicast(self) -> bool {
		self.octet(0) == 0xFF
	}

	/// In `fe80::/10`.
	pub fn is_link_local(self) -> bool {
		self.octet(0) == 0xFE && self.octet(1) & 0xC0 == 0x80
	}

	/// In the unique local network `fc00::/7`.
	pub fn is_private(self) -> bool {
		self.octet(0) & 0xFE == 0xFC
	}

	/// In `::ffff:0:0/96`.
	pub fn is_mapped_ip4(self) -> bool {
		self.0 >> 32 == 0xFFFF
	}

	/// The embedded IPv4 address of an IPv4-mapped address.
	pub fn to_mapped_ip4(self) -> Option<Ip4Addr> {
		self.is_mapped_ip4().then(|| Ip4Addr::from_bits(self.0 as u32))
	}

	fn mask_bits(mask: IpMask) -> u128 {
		match mask.width() {
			0 => 0,
			w if w < Self::WIDTH => u128::MAX << (Self::WIDTH - w),
			_ => u128::MAX
		}
	}
}

impl PartialEnum for Ip6Addr {
	const MIN: Ip6Addr = Ip6Addr(0);
	const MAX: Ip6Addr = Ip6Addr(u128::MAX);

	fn pred(&self) -> Option<Self> {
		self.0.checked_sub(1).map(Ip6Addr)
	}

	fn succ(&self) -> Option<Self> {
		self.0.checked_add(1).map(Ip6Addr)
	}
}

impl IpFamily for Ip6Addr {
	const WIDTH: u8 = 128;
	const FAMILY: Family = Family::Ip6;

	fn network(self, mask: IpMask) -> Self {
		Ip6Addr(self.0 & Self::mask_bits(mask))
	}

	fn broadcast(self, mask: IpMask) -> Self {
		Ip6Addr(self.0 | !Self::mask_bits(mask))
	}

	fn mask_for(self) -> IpMask {
		IpMask::new(Self::WIDTH - self.0.trailing_zeros() as u8)
	}

	fn as_mask(self) -> Option<IpMask> {
		let width = self.0.leading_ones() as u8;
		let mask = IpMask::new(width);
		(Self::mask_bits(mask) == self.0).then_some(mask)
	}
}

/// IPv4-mapped address `::ffff:a.b.c.d`.
impl From<Ip4Addr> for Ip6Addr {
	fn from(addr: Ip4Addr) -> Self {
		Ip6Addr(0xFFFF << 32 | addr.to_bits() as u128)
	}
}

impl FromStr for Ip6Addr {
	type Err = ParseError;

	fn from_str(text: &str) -> Result<Self, ParseError> {
		parse_ip6(text).map(Ip6Addr).map_err(|e| {
			debug!("{}", e);
			e
		})
	}
}

impl fmt::Display for Ip6Addr {
	fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
		fmt::Display::fmt(&Ipv6Addr::from(self.0), f)
	}
}

impl fmt::Debug for Ip6Addr {
	fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
		fmt::Display::fmt(self, f)
	}
}

impl From<Ipv6Addr> for Ip6Addr {
	fn from(addr: Ipv6Addr) -> Self {
		Ip6Addr(addr.into())
	}
}

impl From<Ip6Addr> for Ipv6Addr {
	fn from(addr: Ip6Addr) -> Self {
		Ipv6Addr::from(addr.0)
	}
}

impl From<[u8; 16]> for Ip6Addr {
	fn from(octets: [u8; 16]) -> Self {
		Ip6Addr(u128::from_be_bytes(octets))
	}
}

impl BitAnd<IpMask> for Ip6Addr {
	type Output = Ip6Addr;

	fn bitand(self, mask: IpMask) -> Ip6Addr {
		self.network(mask)
	}
}

impl BitOr<IpMask> for Ip6Addr {
	type Output = Ip6Addr;

	fn bitor(self, mask: IpMask) -> Ip6Addr {
		self.broadcast(mask)
	}
}

impl BitAndAssign<IpMask> for Ip6Addr {
	fn bitand_assign(&mut self, mask: IpMask) {
		*self = *self & mask
	}
}

impl BitOrAssign<IpMask> for Ip6Addr {
	fn bitor_assign(&mut self, mask: IpMask) {
		*self = *self | mask
	}
}

impl BitAnd for Ip6Addr {
	type Output = Ip6Addr;

	fn bitand(self, that: Ip6Addr) -> Ip6Addr {
		Ip6Addr(self.0 & that.0)
	}
}

impl BitOr for Ip6Addr {
	type Output = Ip6Addr;

	fn bitor(self, that: Ip6Addr) -> Ip6Addr {
		Ip6Addr(self.0 | that.0)
	}
}

impl Not for Ip6Addr {
	type Output = Ip6Addr;

	fn not(self) -> Ip6Addr {
		Ip6Addr(!self.0)
	}
}

impl Shl<u32> for Ip6Addr {
	type Output = Ip6Addr;

	fn shl(self, n: u32) -> Ip6Addr {
		Ip6Addr(self.0.checked_shl(n).unwrap_or(0))
	}
}

impl Shr<u32> for Ip6Addr {
	type Output = Ip6Addr;

	fn shr(self, n: u32) -> Ip6Addr {
		Ip6Addr(self.0.checked_shr(n).unwrap_or(0))
	}
}
