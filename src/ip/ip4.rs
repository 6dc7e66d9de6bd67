use std::{
	fmt,
	net::Ipv4Addr,
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
	IpFamily,
	IpMask,
	parse::parse_ip4
};

/// IPv4 address, held in host order.
#[derive(Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Ip4Addr(u32);

impl Ip4Addr {
	pub const WIDTH: u8 = 32;
	pub const ANY: Ip4Addr = Ip4Addr(0);
	pub const LOOPBACK: Ip4Addr = Ip4Addr(0x7F000001);
	pub const BROADCAST: Ip4Addr = Ip4Addr(u32::MAX);

	pub const fn new(a: u8, b: u8, c: u8, d: u8) -> Ip4Addr {
		Ip4Addr(u32::from_be_bytes([a, b, c, d]))
	}

	/// Address from its host order value.
	pub const fn from_bits(bits: u32) -> Ip4Addr {
		Ip4Addr(bits)
	}

	/// Host order value.
	pub const fn to_bits(self) -> u32 {
		self.0
	}

	/// Address from a network order value.
	pub const fn from_network_order(n: u32) -> Ip4Addr {
		Ip4Addr(u32::from_be(n))
	}

	pub const fn to_network_order(self) -> u32 {
		self.0.to_be()
	}

	pub const fn octets(self) -> [u8; 4] {
		self.0.to_be_bytes()
	}

	/// Octet `idx`, in text order.
	///
	/// # Panics
	///
	/// Panics if `idx >= 4`.
	pub fn octet(self, idx: usize) -> u8 {
		self.octets()[idx]
	}

	/// Parse `text` into this address.
	///
	/// On failure the address is reset to [`Ip4Addr::ANY`] and `false` is
	/// returned.
	pub fn load(&mut self, text: &str) -> bool {
		match text.parse() {
			Ok(addr) => {
				*self = addr;
				true
			},
			Err(_) => {
				*self = Ip4Addr::ANY;
				false
			}
		}
	}

	pub fn is_any(self) -> bool {
		self.0 == 0
	}

	/// In `127.0.0.0/8`.
	pub fn is_loopback(self) -> bool {
		self.0 >> 24 == 0x7F
	}

	/// In `224.0.0.0/4`.
	pub fn is_multicast(self) -> bool {
		self.0 & 0xF0000000 == 0xE0000000
	}

	/// In `169.254.0.0/16`.
	pub fn is_link_local(self) -> bool {
		self.0 & 0xFFFF0000 == 0xA9FE0000
	}

	/// In one of the RFC 1918 private networks or the `100.64.0.0/10`
	/// carrier grade NAT network.
	pub fn is_private(self) -> bool {
		self.0 & 0xFF000000 == 0x0A000000
			|| self.0 & 0xFFC00000 == 0x64400000
			|| self.0 & 0xFFF00000 == 0xAC100000
			|| self.0 & 0xFFFF0000 == 0xC0A80000
	}

	fn mask_bits(mask: IpMask) -> u32 {
		match mask.width() {
			0 => 0,
			w if w < Self::WIDTH => u32::MAX << (Self::WIDTH - w),
			_ => u32::MAX
		}
	}
}

impl PartialEnum for Ip4Addr {
	const MIN: Ip4Addr = Ip4Addr(0);
	const MAX: Ip4Addr = Ip4Addr(u32::MAX);

	fn pred(&self) -> Option<Self> {
		self.0.checked_sub(1).map(Ip4Addr)
	}

	fn succ(&self) -> Option<Self> {
		self.0.checked_add(1).map(Ip4Addr)
	}
}

impl IpFamily for Ip4Addr {
	const WIDTH: u8 = 32;
	const FAMILY: Family = Family::Ip4;

	fn network(self, mask: IpMask) -> Self {
		Ip4Addr(self.0 & Self::mask_bits(mask))
	}

	fn broadcast(self, mask: IpMask) -> Self {
		Ip4Addr(self.0 | !Self::mask_bits(mask))
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

impl FromStr for Ip4Addr {
	type Err = ParseError;

	fn from_str(text: &str) -> Result<Self, ParseError> {
		parse_ip4(text).map(Ip4Addr).map_err(|e| {
			debug!("{}", e);
			e
		})
	}
}

impl fmt::Display for Ip4Addr {
	fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
		fmt::Display::fmt(&Ipv4Addr::from(self.0), f)
	}
}

impl fmt::Debug for Ip4Addr {
	fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
		fmt::Display::fmt(self, f)
	}
}

impl From<Ipv4Addr> for Ip4Addr {
	fn from(addr: Ipv4Addr) -> Self {
		Ip4Addr(addr.into())
	}
}

impl From<Ip4Addr> for Ipv4Addr {
	fn from(addr: Ip4Addr) -> Self {
		Ipv4Addr::from(addr.0)
	}
}

impl From<[u8; 4]> for Ip4Addr {
	fn from(octets: [u8; 4]) -> Self {
		Ip4Addr(u32::from_be_bytes(octets))
	}
}

impl BitAnd<IpMask> for Ip4Addr {
	type Output = Ip4Addr;

	fn bitand(self, mask: IpMask) -> Ip4Addr {
		self.network(mask)
	}
}

impl BitOr<IpMask> for Ip4Addr {
	type Output = Ip4Addr;

	fn bitor(self, mask: IpMask) -> Ip4Addr {
		self.broadcast(mask)
	}
}

impl BitAndAssign<IpMask> for Ip4Addr {
	fn bitand_assign(&mut self, mask: IpMask) {
		*self = *self & mask
	}
}

impl BitOrAssign<IpMask> for Ip4Addr {
	fn bitor_assign(&mut self, mask: IpMask) {
		*self = *self | mask
	}
}

impl BitAnd for Ip4Addr {
	type Output = Ip4Addr;

	fn bitand(self, that: Ip4Addr) -> Ip4Addr {
		Ip4Addr(self.0 & that.0)
	}
}

impl BitOr for Ip4Addr {
	type Output = Ip4Addr;

	fn bitor(self, that: Ip4Addr) -> Ip4Addr {
		Ip4Addr(self.0 | that.0)
	}
}

impl Not for Ip4Addr {
	type Output = Ip4Addr;

	fn not(self) -> Ip4Addr {
		Ip4Addr(!self.0)
	}
}

impl Shl<u32> for Ip4Addr {
	type Output = Ip4Addr;

	fn shl(self, n: u32) -> Ip4Addr {
		Ip4Addr(self.0.checked_shl(n).unwrap_or(0))
	}
}

impl Shr<u32> for Ip4Addr {
	type Output = Ip4Addr;

	fn shr(self, n: u32) -> Ip4Addr {
		Ip4Addr(self.0.checked_shr(n).unwrap_or(0))
	}
}
