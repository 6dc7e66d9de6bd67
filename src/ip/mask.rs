use std::{
	fmt,
	ops::{
		ShlAssign,
		ShrAssign
	},
	str::FromStr
};
use crate::ParseError;
use super::{
	Ip4Addr,
	Ip6Addr,
	IpFamily
};

/// Network mask, held as a prefix width.
///
/// The default mask is invalid. Masks order by width, so a wider network
/// has a smaller mask.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct IpMask(u8);

impl IpMask {
	const INVALID: u8 = u8::MAX;

	pub const fn new(width: u8) -> IpMask {
		IpMask(width)
	}

	pub fn is_valid(&self) -> bool {
		self.0 < Self::INVALID
	}

	pub fn width(&self) -> u8 {
		self.0
	}

	pub fn clear(&mut self) {
		self.0 = Self::INVALID
	}

	/// Parse a decimal width.
	///
	/// On failure the mask is reset to the invalid mask and `false` is
	/// returned.
	pub fn load(&mut self, text: &str) -> bool {
		match text.parse() {
			Ok(mask) => {
				*self = mask;
				true
			},
			Err(_) => {
				self.clear();
				false
			}
		}
	}

	/// The mask as an IPv4 address, all ones if wider than IPv4.
	pub fn as_ip4(&self) -> Ip4Addr {
		Ip4Addr::BROADCAST & *self
	}

	/// The mask as an IPv6 address.
	pub fn as_ip6(&self) -> Ip6Addr {
		Ip6Addr::from_bits(u128::MAX) & *self
	}

	/// Mask of the widest network starting at `addr`.
	pub fn mask_for<A: IpFamily>(addr: A) -> IpMask {
		addr.mask_for()
	}
}

impl Default for IpMask {
	fn default() -> Self {
		IpMask(Self::INVALID)
	}
}

/// Cover more addresses, dropping `n` bits of width.
impl ShlAssign<u8> for IpMask {
	fn shl_assign(&mut self, n: u8) {
		self.0 = self.0.saturating_sub(n)
	}
}

/// Cover fewer addresses, adding `n` bits of width.
impl ShrAssign<u8> for IpMask {
	fn shr_assign(&mut self, n: u8) {
		self.0 = self.0.saturating_add(n)
	}
}

impl FromStr for IpMask {
	type Err = ParseError;

	fn from_str(text: &str) -> Result<Self, ParseError> {
		if text.is_empty() || !text.bytes().all(|b| b.is_ascii_digit()) {
			return Err(ParseError::Mask(text.to_string()))
		}

		match text.parse::<u8>() {
			Ok(width) if width < Self::INVALID => Ok(IpMask(width)),
			_ => Err(ParseError::Mask(text.to_string()))
		}
	}
}

impl fmt::Display for IpMask {
	fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
		if self.is_valid() {
			write!(f, "{}", self.0)
		} else {
			write!(f, "*invalid*")
		}
	}
}

impl fmt::Debug for IpMask {
	fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
		write!(f, "/{}", self)
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::util::PartialEnum;

	#[test]
	fn as_address() {
		assert_eq!(IpMask::new(24).as_ip4(), Ip4Addr::new(255, 255, 255, 0));
		assert_eq!(IpMask::new(32).as_ip4(), Ip4Addr::BROADCAST);
		assert_eq!(IpMask::new(0).as_ip4(), Ip4Addr::ANY);
		assert_eq!(IpMask::new(128).as_ip6(), <Ip6Addr as PartialEnum>::MAX);
		assert_eq!(IpMask::new(0).as_ip6(), Ip6Addr::ANY);
	}

	#[test]
	fn shifts() {
		let mut mask = IpMask::new(24);
		mask <<= 2;
		assert_eq!(mask.width(), 22);
		mask >>= 10;
		assert_eq!(mask.width(), 32);
		assert!(IpMask::new(8) < IpMask::new(9));
	}

	#[test]
	fn load() {
		let mut mask = IpMask::default();
		assert!(!mask.is_valid());
		assert!(mask.load("16"));
		assert_eq!(mask, IpMask::new(16));
		assert!(!mask.load("16x"));
		assert!(!mask.is_valid());
		assert!(!mask.load("+1"));
		assert_eq!(IpMask::mask_for(Ip4Addr::new(10, 0, 0, 0)), IpMask::new(7));
		assert_eq!(IpMask::mask_for(Ip4Addr::new(11, 0, 0, 0)), IpMask::new(8));
		assert_eq!(IpMask::mask_for(Ip4Addr::new(172, 16, 0, 0)), IpMask::new(12));
	}
}
