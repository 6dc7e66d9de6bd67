use std::{
	fmt,
	str::FromStr
};
use crate::{
	DiscreteRange,
	ParseError
};
use super::{
	Family,
	Ip4Addr,
	Ip6Addr,
	IpAddr,
	IpFamily,
	IpMask,
	IpNet,
	IpNetSource,
	Net,
	NetSource,
	net::parse_mask
};

pub type Ip4Range = DiscreteRange<Ip4Addr>;
pub type Ip6Range = DiscreteRange<Ip6Addr>;

impl<A: IpFamily> DiscreteRange<A> {
	/// Range covering the network of `mask` containing `addr`.
	pub fn from_net(addr: A, mask: IpMask) -> DiscreteRange<A> {
		Net::new(addr, mask).as_range()
	}

	/// Parse `text` into this range.
	///
	/// On failure the range is cleared and `false` is returned.
	pub fn load(&mut self, text: &str) -> bool {
		match text.parse() {
			Ok(range) => {
				*self = range;
				true
			},
			Err(_) => {
				self.clear();
				false
			}
		}
	}

	/// Smallest sequence of networks covering exactly this range.
	pub fn networks(&self) -> NetSource<A> {
		NetSource::new(*self)
	}

	/// The mask of the network this range is, if it is exactly one network.
	pub fn network_mask(&self) -> Option<IpMask> {
		self.networks()
			.next()
			.filter(|net| net.as_range() == *self)
			.map(|net| net.mask())
	}
}

/// Accepts a single address, `min-max`, or `addr/mask` where the mask is
/// a width or an address.
impl<A: IpFamily> FromStr for DiscreteRange<A> {
	type Err = ParseError;

	fn from_str(text: &str) -> Result<Self, ParseError> {
		let text = text.trim();
		if text.is_empty() {
			return Err(ParseError::Empty)
		}

		if let Some((addr, mask)) = text.split_once('/') {
			let addr: A = addr.trim().parse()?;
			Ok(DiscreteRange::from_net(addr, parse_mask::<A>(mask)?))
		} else if let Some((min, max)) = text.split_once('-') {
			let min: A = min.trim().parse()?;
			let max: A = max.trim().parse()?;
			if min <= max {
				Ok(DiscreteRange::new(min, max))
			} else {
				Err(ParseError::Range(text.to_string()))
			}
		} else {
			text.parse().map(DiscreteRange::singleton)
		}
	}
}

impl<A: IpFamily> fmt::Display for DiscreteRange<A> {
	fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
		if self.is_empty() {
			write!(f, "*empty*")
		} else {
			write!(f, "{}-{}", self.min(), self.max())
		}
	}
}

/// Range of addresses of either family.
#[derive(Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum IpRange {
	#[default]
	None,
	V4(Ip4Range),
	V6(Ip6Range)
}

impl IpRange {
	/// Range from `min` to `max`, or [`IpRange::None`] if the two
	/// addresses are not of the same family.
	pub fn new(min: IpAddr, max: IpAddr) -> IpRange {
		match (min, max) {
			(IpAddr::V4(a), IpAddr::V4(b)) => IpRange::V4(DiscreteRange::new(a, b)),
			(IpAddr::V6(a), IpAddr::V6(b)) => IpRange::V6(DiscreteRange::new(a, b)),
			_ => IpRange::None
		}
	}

	pub fn from_net(addr: IpAddr, mask: IpMask) -> IpRange {
		IpNet::new(addr, mask).as_range()
	}

	pub fn family(&self) -> Option<Family> {
		match self {
			IpRange::None => None,
			IpRange::V4(_) => Some(Family::Ip4),
			IpRange::V6(_) => Some(Family::Ip6)
		}
	}

	pub fn is_empty(&self) -> bool {
		match self {
			IpRange::None => true,
			IpRange::V4(r) => r.is_empty(),
			IpRange::V6(r) => r.is_empty()
		}
	}

	pub fn min(&self) -> IpAddr {
		match self {
			IpRange::None => IpAddr::None,
			IpRange::V4(r) => IpAddr::V4(r.min()),
			IpRange::V6(r) => IpAddr::V6(r.min())
		}
	}

	pub fn max(&self) -> IpAddr {
		match self {
			IpRange::None => IpAddr::None,
			IpRange::V4(r) => IpAddr::V4(r.max()),
			IpRange::V6(r) => IpAddr::V6(r.max())
		}
	}

	pub fn contains(&self, addr: IpAddr) -> bool {
		match (self, addr) {
			(IpRange::V4(r), IpAddr::V4(a)) => r.contains(a),
			(IpRange::V6(r), IpAddr::V6(a)) => r.contains(a),
			_ => false
		}
	}

	pub fn as_ip4(&self) -> Option<Ip4Range> {
		match self {
			IpRange::V4(r) => Some(*r),
			_ => None
		}
	}

	pub fn as_ip6(&self) -> Option<Ip6Range> {
		match self {
			IpRange::V6(r) => Some(*r),
			_ => None
		}
	}

	/// Parse `text` into this range.
	///
	/// On failure the range is reset to [`IpRange::None`] and `false` is
	/// returned.
	pub fn load(&mut self, text: &str) -> bool {
		*self = text.parse().unwrap_or_default();
		!matches!(self, IpRange::None)
	}

	pub fn networks(&self) -> IpNetSource {
		match self {
			IpRange::None => IpNetSource::None,
			IpRange::V4(r) => IpNetSource::V4(r.networks()),
			IpRange::V6(r) => IpNetSource::V6(r.networks())
		}
	}

	pub fn network_mask(&self) -> Option<IpMask> {
		match self {
			IpRange::None => None,
			IpRange::V4(r) => r.network_mask(),
			IpRange::V6(r) => r.network_mask()
		}
	}
}

impl FromStr for IpRange {
	type Err = ParseError;

	/// Text with a `:` is read as an IPv6 range, anything else as IPv4.
	fn from_str(text: &str) -> Result<Self, ParseError> {
		let text = text.trim();
		if text.is_empty() {
			Err(ParseError::Empty)
		} else if text.contains(':') {
			text.parse().map(IpRange::V6)
		} else {
			text.parse().map(IpRange::V4)
		}
	}
}

impl fmt::Display for IpRange {
	fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
		match self {
			IpRange::None => write!(f, "*invalid*"),
			IpRange::V4(r) => fmt::Display::fmt(r, f),
			IpRange::V6(r) => fmt::Display::fmt(r, f)
		}
	}
}

impl fmt::Debug for IpRange {
	fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
		fmt::Display::fmt(self, f)
	}
}

impl From<Ip4Range> for IpRange {
	fn from(range: Ip4Range) -> Self {
		IpRange::V4(range)
	}
}

impl From<Ip6Range> for IpRange {
	fn from(range: Ip6Range) -> Self {
		IpRange::V6(range)
	}
}

impl From<IpNet> for IpRange {
	fn from(net: IpNet) -> Self {
		net.as_range()
	}
}

impl From<IpAddr> for IpRange {
	fn from(addr: IpAddr) -> Self {
		IpRange::new(addr, addr)
	}
}

impl From<Ip4Addr> for IpRange {
	fn from(addr: Ip4Addr) -> Self {
		IpRange::V4(DiscreteRange::singleton(addr))
	}
}

impl From<Ip6Addr> for IpRange {
	fn from(addr: Ip6Addr) -> Self {
		IpRange::V6(DiscreteRange::singleton(addr))
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn text_forms() {
		let r1: Ip4Range = "10.1.0.0-10.1.0.127".parse().unwrap();
		assert_eq!(r1.min(), Ip4Addr::new(10, 1, 0, 0));
		assert_eq!(r1.max(), Ip4Addr::new(10, 1, 0, 127));
		assert_eq!(r1.to_string(), "10.1.0.0-10.1.0.127");

		let r2: Ip4Range = "10.1.0.0/25".parse().unwrap();
		assert_eq!(r1, r2);

		let r3: Ip4Range = " 172.16.0.7 ".parse().unwrap();
		assert!(r3.is_singleton());

		assert_eq!("".parse::<Ip4Range>(), Err(ParseError::Empty));
		assert!(matches!("10.0.0.9-10.0.0.1".parse::<Ip4Range>(), Err(ParseError::Range(_))));
		assert!("10.0.0.1-".parse::<Ip4Range>().is_err());
	}

	#[test]
	fn load_wrong_family() {
		let mut r4 = Ip4Range::default();
		let mut r6 = Ip6Range::default();
		assert!(!r4.load("1337:0::0:dead-1337::beef"));
		assert!(r4.is_empty());
		assert!(!r6.load("10.1.1.1-10.1.1.2"));
		assert!(r6.is_empty());
		assert!(r6.load("1337::beef-1337:0::0:dead"));
		assert!(r4.load("10.1.1.1-10.1.1.2"));
	}

	#[test]
	fn network_mask() {
		let r1: Ip4Range = "10.1.0.0-10.1.255.255".parse().unwrap();
		assert_eq!(r1.network_mask(), Some(IpMask::new(16)));

		let r2: Ip4Range = "10.1.0.1-10.1.255.255".parse().unwrap();
		assert_eq!(r2.network_mask(), None);

		let r3: Ip6Range = "::/0".parse().unwrap();
		assert!(r3.is_maximal());
		assert_eq!(r3.network_mask(), Some(IpMask::new(0)));

		let r4: IpRange = "1337::/64".parse().unwrap();
		assert_eq!(r4.network_mask(), Some(IpMask::new(64)));
		assert_eq!(Ip4Range::default().network_mask(), None);
	}

	#[test]
	fn family_dispatch() {
		let r: IpRange = "::1-::ffff".parse().unwrap();
		assert_eq!(r.family(), Some(Family::Ip6));
		assert!(r.contains("::10".parse().unwrap()));
		assert!(!r.contains("0.0.0.16".parse().unwrap()));

		let mixed = IpRange::new("10.0.0.1".parse().unwrap(), "::1".parse().unwrap());
		assert_eq!(mixed, IpRange::None);
		assert!(mixed.is_empty());

		let mut r = IpRange::default();
		assert!(r.load("192.168.0.0/16"));
		assert_eq!(r.as_ip4().map(|r| r.max()), Some(Ip4Addr::new(192, 168, 255, 255)));
		assert!(!r.load("192.168.0.0/33"));
		assert_eq!(r, IpRange::None);
	}
}
