use std::{
	fmt,
	net,
	ops::{
		BitAnd,
		BitOr
	},
	str::FromStr
};
use crate::ParseError;
use super::{
	Family,
	Ip4Addr,
	Ip6Addr,
	IpFamily,
	IpMask
};

/// Address of either family, or no address at all.
///
/// Addresses order as `None < V4 < V6`, then by value within a family.
#[derive(Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum IpAddr {
	#[default]
	None,
	V4(Ip4Addr),
	V6(Ip6Addr)
}

impl IpAddr {
	pub fn family(&self) -> Option<Family> {
		match self {
			IpAddr::None => None,
			IpAddr::V4(_) => Some(Family::Ip4),
			IpAddr::V6(_) => Some(Family::Ip6)
		}
	}

	pub fn is_valid(&self) -> bool {
		!matches!(self, IpAddr::None)
	}

	pub fn is_ip4(&self) -> bool {
		matches!(self, IpAddr::V4(_))
	}

	pub fn is_ip6(&self) -> bool {
		matches!(self, IpAddr::V6(_))
	}

	pub fn as_ip4(&self) -> Option<Ip4Addr> {
		match self {
			IpAddr::V4(addr) => Some(*addr),
			_ => None
		}
	}

	pub fn as_ip6(&self) -> Option<Ip6Addr> {
		match self {
			IpAddr::V6(addr) => Some(*addr),
			_ => None
		}
	}

	/// The IPv4 address, or [`Ip4Addr::ANY`] for any other family.
	pub fn ip4(&self) -> Ip4Addr {
		self.as_ip4().unwrap_or_default()
	}

	/// The IPv6 address, or [`Ip6Addr::ANY`] for any other family.
	pub fn ip6(&self) -> Ip6Addr {
		self.as_ip6().unwrap_or_default()
	}

	/// Parse `text` into this address.
	///
	/// On failure the address is reset to [`IpAddr::None`] and `false` is
	/// returned.
	pub fn load(&mut self, text: &str) -> bool {
		*self = text.parse().unwrap_or_default();
		self.is_valid()
	}

	pub fn is_any(&self) -> bool {
		match self {
			IpAddr::None => false,
			IpAddr::V4(a) => a.is_any(),
			IpAddr::V6(a) => a.is_any()
		}
	}

	pub fn is_loopback(&self) -> bool {
		match self {
			IpAddr::None => false,
			IpAddr::V4(a) => a.is_loopback(),
			IpAddr::V6(a) => a.is_loopback()
		}
	}

	pub fn is_multicast(&self) -> bool {
		match self {
			IpAddr::None => false,
			IpAddr::V4(a) => a.is_multicast(),
			IpAddr::V6(a) => a.is_multicast()
		}
	}

	pub fn is_link_local(&self) -> bool {
		match self {
			IpAddr::None => false,
			IpAddr::V4(a) => a.is_link_local(),
			IpAddr::V6(a) => a.is_link_local()
		}
	}

	pub fn is_private(&self) -> bool {
		match self {
			IpAddr::None => false,
			IpAddr::V4(a) => a.is_private(),
			IpAddr::V6(a) => a.is_private()
		}
	}

	/// The standard library address, if there is one.
	pub fn to_std(&self) -> Option<net::IpAddr> {
		match self {
			IpAddr::None => None,
			IpAddr::V4(a) => Some(net::IpAddr::V4((*a).into())),
			IpAddr::V6(a) => Some(net::IpAddr::V6((*a).into()))
		}
	}

	/// Mask of the widest network starting at this address.
	pub fn mask_for(&self) -> IpMask {
		match self {
			IpAddr::None => IpMask::default(),
			IpAddr::V4(a) => a.mask_for(),
			IpAddr::V6(a) => a.mask_for()
		}
	}
}

impl FromStr for IpAddr {
	type Err = ParseError;

	/// Text with a `:` is read as IPv6, anything else as IPv4.
	fn from_str(text: &str) -> Result<Self, ParseError> {
		let text = text.trim_start();
		if text.contains(':') {
			text.parse().map(IpAddr::V6)
		} else {
			text.parse().map(IpAddr::V4)
		}
	}
}

impl fmt::Display for IpAddr {
	fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
		match self {
			IpAddr::None => write!(f, "*invalid*"),
			IpAddr::V4(a) => fmt::Display::fmt(a, f),
			IpAddr::V6(a) => fmt::Display::fmt(a, f)
		}
	}
}

impl fmt::Debug for IpAddr {
	fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
		fmt::Display::fmt(self, f)
	}
}

impl From<Ip4Addr> for IpAddr {
	fn from(addr: Ip4Addr) -> Self {
		IpAddr::V4(addr)
	}
}

impl From<Ip6Addr> for IpAddr {
	fn from(addr: Ip6Addr) -> Self {
		IpAddr::V6(addr)
	}
}

impl From<net::IpAddr> for IpAddr {
	fn from(addr: net::IpAddr) -> Self {
		match addr {
			net::IpAddr::V4(a) => IpAddr::V4(a.into()),
			net::IpAddr::V6(a) => IpAddr::V6(a.into())
		}
	}
}

impl From<net::SocketAddr> for IpAddr {
	fn from(addr: net::SocketAddr) -> Self {
		addr.ip().into()
	}
}

impl PartialEq<Ip4Addr> for IpAddr {
	fn eq(&self, that: &Ip4Addr) -> bool {
		self.as_ip4() == Some(*that)
	}
}

impl PartialEq<Ip6Addr> for IpAddr {
	fn eq(&self, that: &Ip6Addr) -> bool {
		self.as_ip6() == Some(*that)
	}
}

impl BitAnd<IpMask> for IpAddr {
	type Output = IpAddr;

	fn bitand(self, mask: IpMask) -> IpAddr {
		match self {
			IpAddr::None => IpAddr::None,
			IpAddr::V4(a) => IpAddr::V4(a & mask),
			IpAddr::V6(a) => IpAddr::V6(a & mask)
		}
	}
}

impl BitOr<IpMask> for IpAddr {
	type Output = IpAddr;

	fn bitor(self, mask: IpMask) -> IpAddr {
		match self {
			IpAddr::None => IpAddr::None,
			IpAddr::V4(a) => IpAddr::V4(a | mask),
			IpAddr::V6(a) => IpAddr::V6(a | mask)
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	fn ip(text: &str) -> IpAddr {
		text.parse().unwrap()
	}

	#[test]
	fn family_order() {
		let none = IpAddr::None;
		let v4 = ip("255.255.255.255");
		let v6 = ip("::");
		assert!(none < v4 && v4 < v6);
		assert!(ip("10.0.0.1") < ip("10.0.0.2"));
		assert_ne!(ip("::ffff:10.0.0.1"), ip("10.0.0.1"));
	}

	#[test]
	fn detection() {
		assert!(ip("172.16.0.1").is_ip4());
		assert!(ip("0").is_ip4());
		assert!(ip("  ::1").is_ip6());
		assert!(ip("[::1]").is_ip6());
		assert!("foo".parse::<IpAddr>().is_err());

		let mut addr = ip("10.1.1.1");
		assert!(!addr.load("1.2.3.4.5"));
		assert_eq!(addr, IpAddr::None);
		assert_eq!(addr.family(), None);
	}

	#[test]
	fn dispatch() {
		let b3 = ip("192.168.56.24");
		assert_eq!(b3 & IpMask::new(24), Ip4Addr::new(192, 168, 56, 0));
		assert_eq!(b3 | IpMask::new(24), Ip4Addr::new(192, 168, 56, 255));
		assert!(ip("FF02::19").is_multicast());
		assert!(ip("FE80::56").is_link_local());
		assert_eq!(ip("10.0.0.0").ip6(), Ip6Addr::ANY);
		assert_eq!(ip("10.0.0.0").as_ip6(), None);
		assert_eq!(ip("10.0.0.0").mask_for(), IpMask::new(7));
		assert_eq!(ip("11.0.0.0").mask_for(), IpMask::new(8));
	}

	#[test]
	fn std_interop() {
		let socket: net::SocketAddr = "[fe80::1]:80".parse().unwrap();
		assert_eq!(IpAddr::from(socket), ip("fe80::1"));
		assert_eq!(ip("10.2.3.4").to_std(), Some(net::IpAddr::V4(net::Ipv4Addr::new(10, 2, 3, 4))));
	}
}
