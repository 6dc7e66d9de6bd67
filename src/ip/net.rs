use std::{
	fmt,
	str::FromStr
};
use log::trace;
use crate::{
	DiscreteRange,
	ParseError,
	util::PartialEnum
};
use super::{
	Family,
	Ip4Addr,
	Ip6Addr,
	IpAddr,
	IpFamily,
	IpMask,
	IpRange
};

/// Parse the mask part of a network, either as a width or as an address
/// whose bits form a mask.
pub(crate) fn parse_mask<A: IpFamily>(text: &str) -> Result<IpMask, ParseError> {
	let text = text.trim();
	if text.contains(['.', ':']) {
		let addr: A = text.parse().map_err(|_| ParseError::Mask(text.to_string()))?;
		addr.as_mask().ok_or_else(|| ParseError::Mask(text.to_string()))
	} else {
		let mask: IpMask = text.parse()?;
		if mask.width() <= A::WIDTH {
			Ok(mask)
		} else {
			Err(ParseError::Mask(text.to_string()))
		}
	}
}

/// CIDR network: an address and a mask, with the address normalized to
/// the first address of the network.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct Net<A> {
	addr: A,
	mask: IpMask
}

pub type Ip4Net = Net<Ip4Addr>;
pub type Ip6Net = Net<Ip6Addr>;

impl<A: IpFamily> Net<A> {
	/// Network of `mask` containing `addr`.
	///
	/// A mask wider than the family gives an invalid network.
	pub fn new(addr: A, mask: IpMask) -> Net<A> {
		if mask.width() > A::WIDTH {
			return Net {
				addr,
				mask: IpMask::default()
			}
		}

		Net {
			addr: addr.network(mask),
			mask
		}
	}

	pub fn is_valid(&self) -> bool {
		self.mask.is_valid()
	}

	pub fn mask(&self) -> IpMask {
		self.mask
	}

	/// First address of the network.
	pub fn min(&self) -> A {
		self.addr
	}

	/// Last address of the network.
	pub fn max(&self) -> A {
		self.addr.broadcast(self.mask)
	}

	pub fn lower_bound(&self) -> A {
		self.min()
	}

	pub fn upper_bound(&self) -> A {
		self.max()
	}

	pub fn as_range(&self) -> DiscreteRange<A> {
		if self.is_valid() {
			DiscreteRange::new(self.min(), self.max())
		} else {
			DiscreteRange::default()
		}
	}

	pub fn contains(&self, addr: A) -> bool {
		self.is_valid() && addr.network(self.mask) == self.addr
	}

	pub fn clear(&mut self) {
		*self = Self::default()
	}

	/// Parse `addr/mask` into this network.
	///
	/// On failure the network is reset to the invalid network and `false`
	/// is returned.
	pub fn load(&mut self, text: &str) -> bool {
		match text.parse() {
			Ok(net) => {
				*self = net;
				true
			},
			Err(_) => {
				self.clear();
				false
			}
		}
	}
}

impl<A: IpFamily> Default for Net<A> {
	fn default() -> Self {
		Net {
			addr: A::MIN,
			mask: IpMask::default()
		}
	}
}

impl<A: IpFamily> FromStr for Net<A> {
	type Err = ParseError;

	fn from_str(text: &str) -> Result<Self, ParseError> {
		let (addr, mask) = text.split_once('/').ok_or_else(|| ParseError::Net(text.to_string()))?;
		let addr: A = addr.trim().parse()?;
		Ok(Net::new(addr, parse_mask::<A>(mask)?))
	}
}

impl<A: IpFamily> fmt::Display for Net<A> {
	fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
		write!(f, "{}/{}", self.addr, self.mask)
	}
}

impl<A: IpFamily> fmt::Debug for Net<A> {
	fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
		fmt::Display::fmt(self, f)
	}
}

/// Network of either family.
#[derive(Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum IpNet {
	#[default]
	None,
	V4(Ip4Net),
	V6(Ip6Net)
}

impl IpNet {
	/// Network of `mask` containing `addr`.
	pub fn new(addr: IpAddr, mask: IpMask) -> IpNet {
		match addr {
			IpAddr::None => IpNet::None,
			IpAddr::V4(a) => IpNet::V4(Net::new(a, mask)),
			IpAddr::V6(a) => IpNet::V6(Net::new(a, mask))
		}
	}

	pub fn family(&self) -> Option<Family> {
		match self {
			IpNet::None => None,
			IpNet::V4(_) => Some(Family::Ip4),
			IpNet::V6(_) => Some(Family::Ip6)
		}
	}

	pub fn is_valid(&self) -> bool {
		match self {
			IpNet::None => false,
			IpNet::V4(n) => n.is_valid(),
			IpNet::V6(n) => n.is_valid()
		}
	}

	pub fn mask(&self) -> IpMask {
		match self {
			IpNet::None => IpMask::default(),
			IpNet::V4(n) => n.mask(),
			IpNet::V6(n) => n.mask()
		}
	}

	pub fn min(&self) -> IpAddr {
		match self {
			IpNet::None => IpAddr::None,
			IpNet::V4(n) => IpAddr::V4(n.min()),
			IpNet::V6(n) => IpAddr::V6(n.min())
		}
	}

	pub fn max(&self) -> IpAddr {
		match self {
			IpNet::None => IpAddr::None,
			IpNet::V4(n) => IpAddr::V4(n.max()),
			IpNet::V6(n) => IpAddr::V6(n.max())
		}
	}

	pub fn as_range(&self) -> IpRange {
		match self {
			IpNet::None => IpRange::None,
			IpNet::V4(n) => IpRange::V4(n.as_range()),
			IpNet::V6(n) => IpRange::V6(n.as_range())
		}
	}

	pub fn load(&mut self, text: &str) -> bool {
		*self = text.parse().unwrap_or_default();
		self.is_valid()
	}
}

impl FromStr for IpNet {
	type Err = ParseError;

	fn from_str(text: &str) -> Result<Self, ParseError> {
		let (addr, _) = text.split_once('/').ok_or_else(|| ParseError::Net(text.to_string()))?;
		if addr.contains(':') {
			text.parse().map(IpNet::V6)
		} else {
			text.parse().map(IpNet::V4)
		}
	}
}

impl fmt::Display for IpNet {
	fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
		match self {
			IpNet::None => write!(f, "*invalid*"),
			IpNet::V4(n) => fmt::Display::fmt(n, f),
			IpNet::V6(n) => fmt::Display::fmt(n, f)
		}
	}
}

impl fmt::Debug for IpNet {
	fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
		fmt::Display::fmt(self, f)
	}
}

impl From<Ip4Net> for IpNet {
	fn from(net: Ip4Net) -> Self {
		IpNet::V4(net)
	}
}

impl From<Ip6Net> for IpNet {
	fn from(net: Ip6Net) -> Self {
		IpNet::V6(net)
	}
}

/// Iterator over the smallest sequence of networks covering a range,
/// in ascending order.
///
/// Each network is the widest one that starts at the first remaining
/// address and does not extend past the end of the range.
#[derive(Clone)]
pub struct NetSource<A> {
	range: DiscreteRange<A>,
	mask: IpMask
}

impl<A: IpFamily> NetSource<A> {
	pub fn new(range: DiscreteRange<A>) -> NetSource<A> {
		let mut source = NetSource {
			range,
			mask: IpMask::new(A::WIDTH)
		};

		if !range.is_empty() {
			source.search_wider()
		}

		source
	}

	pub fn is_empty(&self) -> bool {
		self.range.is_empty()
	}

	/// Whether the network of `mask` at the start of the range fits in it.
	fn fits(&self, mask: IpMask) -> bool {
		let min = self.range.min();
		min.network(mask) == min && min.broadcast(mask) <= self.range.max()
	}

	fn search_wider(&mut self) {
		while self.mask.width() > 0 {
			let mut mask = self.mask;
			mask <<= 1;
			if !self.fits(mask) {
				break
			}
			self.mask = mask
		}
	}

	fn search_narrower(&mut self) {
		while self.mask.width() < A::WIDTH && !self.fits(self.mask) {
			self.mask >>= 1
		}
	}
}

impl<A: IpFamily> Iterator for NetSource<A> {
	type Item = Net<A>;

	fn next(&mut self) -> Option<Net<A>> {
		if self.range.is_empty() {
			return None
		}

		let net = Net {
			addr: self.range.min(),
			mask: self.mask
		};
		trace!("network {}", net);

		match net.max().succ() {
			Some(next) if next <= self.range.max() => {
				self.range.assign_min(next);
				if self.fits(self.mask) {
					self.search_wider()
				} else {
					self.search_narrower()
				}
			},
			_ => {
				self.range.clear();
			}
		}

		Some(net)
	}
}

impl<A: IpFamily> std::iter::FusedIterator for NetSource<A> {}

/// Network decomposition of a range of either family.
#[derive(Clone)]
pub enum IpNetSource {
	None,
	V4(NetSource<Ip4Addr>),
	V6(NetSource<Ip6Addr>)
}

impl Iterator for IpNetSource {
	type Item = IpNet;

	fn next(&mut self) -> Option<IpNet> {
		match self {
			IpNetSource::None => None,
			IpNetSource::V4(source) => source.next().map(IpNet::V4),
			IpNetSource::V6(source) => source.next().map(IpNet::V6)
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn mask_as_address() {
		let n1: Ip4Net = "10.0.0.0/255.255.0.0".parse().unwrap();
		assert_eq!(n1.mask().width(), 16);

		let n2: Ip6Net = "BEEF:1337:dead::/FFFF:FFFF:FFFF:C000::".parse().unwrap();
		assert_eq!(n2.mask().width(), 50);

		let n3: IpNet = "10.0.0.0/255.255.0.0".parse().unwrap();
		assert_eq!(n3.mask().width(), 16);

		let n4: IpNet = "BEEF:1337:dead::/FFFF:FFFF:FFFF:C000::".parse().unwrap();
		assert_eq!(n4.mask().width(), 50);

		let mut n5 = IpNet::default();
		assert!(!n5.load("BEEF:1337:dead::/FFFF:FFFF:FFFF:000C::"));
		assert!(!n5.is_valid());
	}

	#[test]
	fn as_range() {
		let n1: Ip4Net = "0/1".parse().unwrap();
		assert_eq!(n1.as_range(), DiscreteRange::new(Ip4Addr::ANY, Ip4Addr::new(127, 255, 255, 255)));

		let a = Ip4Addr::new(8, 8, 8, 8);
		assert_eq!(Net::new(a, IpMask::new(32)).as_range(), DiscreteRange::singleton(a));

		let n0: Ip4Net = "0/0".parse().unwrap();
		assert!(n0.as_range().is_maximal());

		let a6: Ip6Addr = "2001:1f2d:c587:24c3:9128:3349:3cee:143".parse().unwrap();
		let n6 = Net::new(a6, IpMask::new(96));
		assert_eq!(n6.min(), "2001:1f2d:c587:24c3:9128:3349::".parse().unwrap());
		assert!(n6.contains(a6));
	}

	#[test]
	fn oversized_mask() {
		let n4 = Net::new(Ip4Addr::ANY, IpMask::new(40));
		assert!(!n4.is_valid());
		assert!(n4.as_range().is_empty());
		assert!(!n4.contains(Ip4Addr::ANY));

		let n6 = Net::new(Ip6Addr::LOOPBACK, IpMask::new(129));
		assert!(!n6.is_valid());
		assert!(Net::new(Ip6Addr::LOOPBACK, IpMask::new(128)).is_valid());

		let n = IpNet::new(IpAddr::V4(Ip4Addr::LOOPBACK), IpMask::new(33));
		assert!(!n.is_valid());
		assert!(n.as_range().is_empty());
	}

	#[test]
	fn default_is_invalid() {
		let n: Ip4Net = Net::default();
		assert!(!n.is_valid());
		assert_eq!(n.min(), Ip4Addr::MIN);
		assert!(n.as_range().is_empty());
	}

	#[test]
	fn invalid_text() {
		assert!("10.0.0.0".parse::<Ip4Net>().is_err());
		assert!("10.0.0.0/33".parse::<Ip4Net>().is_err());
		assert!("10.0.0.0/".parse::<Ip4Net>().is_err());
		assert!("::/129".parse::<Ip6Net>().is_err());
		assert_eq!("10.1.2.3/8".parse::<Ip4Net>().map(|n| n.to_string()), Ok("10.0.0.0/8".to_string()));
	}
}
