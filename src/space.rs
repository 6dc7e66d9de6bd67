use std::fmt;
use crate::{
	generic::{
		self,
		DiscreteSpace
	},
	ip::{
		Family,
		Ip4Addr,
		Ip4Range,
		Ip6Addr,
		Ip6Range,
		IpAddr,
		IpRange
	}
};

/// Map from ranges of IP addresses of both families to payloads.
///
/// IPv4 and IPv6 ranges are kept in separate spaces. Operations taking an
/// [`IpRange`] are routed to the space of its family, and iteration visits
/// every IPv4 range before any IPv6 range.
///
/// ```
/// use ip_space::{IpSpace, IpRange};
///
/// let mut space: IpSpace<&str> = IpSpace::new();
/// space.mark("10.0.0.0/8".parse::<IpRange>().unwrap(), "private");
/// space.mark("fc00::/7".parse::<IpRange>().unwrap(), "private");
/// space.mark("10.1.0.0-10.1.0.255".parse::<IpRange>().unwrap(), "lab");
///
/// assert_eq!(space.len(), 4);
/// assert_eq!(space.find("10.1.0.7".parse().unwrap()).map(|(_, p)| *p), Some("lab"));
/// assert_eq!(space.find("fd00::1".parse().unwrap()).map(|(_, p)| *p), Some("private"));
/// assert!(space.find("192.168.1.1".parse().unwrap()).is_none());
/// ```
#[derive(Clone)]
pub struct IpSpace<P> {
	ip4: DiscreteSpace<Ip4Addr, P>,
	ip6: DiscreteSpace<Ip6Addr, P>
}

impl<P> IpSpace<P> {
	pub fn new() -> IpSpace<P> {
		IpSpace {
			ip4: DiscreteSpace::new(),
			ip6: DiscreteSpace::new()
		}
	}

	/// Number of stored ranges, of both families.
	pub fn len(&self) -> usize {
		self.ip4.len() + self.ip6.len()
	}

	pub fn len_family(&self, family: Family) -> usize {
		match family {
			Family::Ip4 => self.ip4.len(),
			Family::Ip6 => self.ip6.len()
		}
	}

	pub fn is_empty(&self) -> bool {
		self.ip4.is_empty() && self.ip6.is_empty()
	}

	pub fn clear(&mut self) {
		self.ip4.clear();
		self.ip6.clear()
	}

	/// Set the payload of every address in `range` to `payload`.
	pub fn mark<R: Into<IpRange>>(&mut self, range: R, payload: P) where P: PartialEq + Clone {
		match range.into() {
			IpRange::None => (),
			IpRange::V4(r) => self.ip4.mark(r, payload),
			IpRange::V6(r) => self.ip6.mark(r, payload)
		}
	}

	/// Set the payload of every unmapped address in `range` to `payload`.
	pub fn fill<R: Into<IpRange>>(&mut self, range: R, payload: P) where P: PartialEq + Clone {
		match range.into() {
			IpRange::None => (),
			IpRange::V4(r) => self.ip4.fill(r, payload),
			IpRange::V6(r) => self.ip6.fill(r, payload)
		}
	}

	/// Unmap every address in `range`.
	pub fn erase<R: Into<IpRange>>(&mut self, range: R) where P: Clone {
		match range.into() {
			IpRange::None => (),
			IpRange::V4(r) => self.ip4.erase(r),
			IpRange::V6(r) => self.ip6.erase(r)
		}
	}

	/// Combine `color` into the payload of every address in `range`.
	///
	/// See [`DiscreteSpace::blend`].
	pub fn blend<R, U, F>(&mut self, range: R, color: &U, blender: F)
	where
		R: Into<IpRange>,
		P: Default + PartialEq + Clone,
		F: FnMut(&mut P, &U) -> bool
	{
		match range.into() {
			IpRange::None => (),
			IpRange::V4(r) => self.ip4.blend(r, color, blender),
			IpRange::V6(r) => self.ip6.blend(r, color, blender)
		}
	}

	/// Find the range containing `addr` and its payload.
	pub fn find(&self, addr: IpAddr) -> Option<(IpRange, &P)> {
		match addr {
			IpAddr::None => None,
			IpAddr::V4(a) => self.find_ip4(a).map(|(r, p)| (IpRange::V4(*r), p)),
			IpAddr::V6(a) => self.find_ip6(a).map(|(r, p)| (IpRange::V6(*r), p))
		}
	}

	pub fn find_ip4(&self, addr: Ip4Addr) -> Option<(&Ip4Range, &P)> {
		self.ip4.find(addr)
	}

	pub fn find_ip6(&self, addr: Ip6Addr) -> Option<(&Ip6Range, &P)> {
		self.ip6.find(addr)
	}

	pub fn contains(&self, addr: IpAddr) -> bool {
		match addr {
			IpAddr::None => false,
			IpAddr::V4(a) => self.ip4.contains(a),
			IpAddr::V6(a) => self.ip6.contains(a)
		}
	}

	pub fn iter(&self) -> Iter<'_, P> {
		Iter {
			ip4: self.ip4.iter(),
			ip6: self.ip6.iter()
		}
	}

	pub fn iter_ip4(&self) -> generic::Iter<'_, Ip4Addr, P> {
		self.ip4.iter()
	}

	pub fn iter_ip6(&self) -> generic::Iter<'_, Ip6Addr, P> {
		self.ip6.iter()
	}

	/// Iterate over the stored ranges that overlap `range`.
	pub fn intersection<R: Into<IpRange>>(&self, range: R) -> Iter<'_, P> {
		let range = range.into();
		Iter {
			ip4: self.ip4.intersection(range.as_ip4().unwrap_or_default()),
			ip6: self.ip6.intersection(range.as_ip6().unwrap_or_default())
		}
	}

	/// Check the invariants of both family spaces.
	pub fn validate(&self) -> bool where P: PartialEq {
		self.ip4.validate() && self.ip6.validate()
	}
}

impl<P> Default for IpSpace<P> {
	fn default() -> Self {
		Self::new()
	}
}

impl<P: fmt::Debug> fmt::Debug for IpSpace<P> {
	fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
		f.debug_map().entries(self.iter()).finish()
	}
}

impl<'a, P> IntoIterator for &'a IpSpace<P> {
	type Item = (IpRange, &'a P);
	type IntoIter = Iter<'a, P>;

	fn into_iter(self) -> Iter<'a, P> {
		self.iter()
	}
}

/// Iterator over the ranges of an [`IpSpace`], IPv4 first.
pub struct Iter<'a, P> {
	ip4: generic::Iter<'a, Ip4Addr, P>,
	ip6: generic::Iter<'a, Ip6Addr, P>
}

impl<'a, P> Clone for Iter<'a, P> {
	fn clone(&self) -> Self {
		Iter {
			ip4: self.ip4.clone(),
			ip6: self.ip6.clone()
		}
	}
}

impl<'a, P> Iterator for Iter<'a, P> {
	type Item = (IpRange, &'a P);

	fn next(&mut self) -> Option<Self::Item> {
		match self.ip4.next() {
			Some((r, p)) => Some((IpRange::V4(*r), p)),
			None => self.ip6.next().map(|(r, p)| (IpRange::V6(*r), p))
		}
	}
}

impl<'a, P> DoubleEndedIterator for Iter<'a, P> {
	fn next_back(&mut self) -> Option<Self::Item> {
		match self.ip6.next_back() {
			Some((r, p)) => Some((IpRange::V6(*r), p)),
			None => self.ip4.next_back().map(|(r, p)| (IpRange::V4(*r), p))
		}
	}
}

impl<'a, P> std::iter::FusedIterator for Iter<'a, P> {}

/// Set of IP addresses of both families, stored as ranges.
///
/// ```
/// use ip_space::{IpRangeSet, IpRange};
///
/// let mut set = IpRangeSet::new();
/// set.mark("10.0.0.0-10.0.0.9".parse::<IpRange>().unwrap());
/// set.mark("10.0.0.10-10.0.0.19".parse::<IpRange>().unwrap());
/// assert_eq!(set.len(), 1);
/// assert!(set.contains("10.0.0.15".parse().unwrap()));
/// ```
#[derive(Clone, Default)]
pub struct IpRangeSet {
	space: IpSpace<()>
}

impl IpRangeSet {
	pub fn new() -> IpRangeSet {
		IpRangeSet::default()
	}

	pub fn len(&self) -> usize {
		self.space.len()
	}

	pub fn is_empty(&self) -> bool {
		self.space.is_empty()
	}

	pub fn clear(&mut self) {
		self.space.clear()
	}

	/// Add every address in `range`.
	pub fn mark<R: Into<IpRange>>(&mut self, range: R) {
		self.space.mark(range, ())
	}

	/// Add every address in `range`. Same as [`IpRangeSet::mark`] since
	/// there is no payload to preserve.
	pub fn fill<R: Into<IpRange>>(&mut self, range: R) {
		self.space.fill(range, ())
	}

	/// Remove every address in `range`.
	pub fn erase<R: Into<IpRange>>(&mut self, range: R) {
		self.space.erase(range)
	}

	pub fn contains(&self, addr: IpAddr) -> bool {
		self.space.contains(addr)
	}

	pub fn iter(&self) -> impl DoubleEndedIterator<Item = IpRange> + '_ {
		self.space.iter().map(|(r, _)| r)
	}
}

impl fmt::Debug for IpRangeSet {
	fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
		f.debug_set().entries(self.iter()).finish()
	}
}
