use std::{
	fmt,
	net::SocketAddr,
	str::FromStr
};
use log::debug;
use crate::ParseError;
use super::IpAddr;

/// Socket address: an IP address and a port.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Endpoint(SocketAddr);

impl Endpoint {
	pub fn new(addr: IpAddr, port: u16) -> Option<Endpoint> {
		addr.to_std().map(|addr| Endpoint(SocketAddr::new(addr, port)))
	}

	/// Split `text` into host, port and trailing text.
	///
	/// The host may be bracketed, in which case the port follows the
	/// closing bracket. An unbracketed host with more than one colon is
	/// taken whole as an IPv6 address. The port is the run of digits after
	/// the colon; when there are none, the colon is left in the trailing
	/// text. Returns `None` if no host is found.
	///
	/// ```
	/// use ip_space::ip::Endpoint;
	///
	/// assert_eq!(Endpoint::tokenize("[::1]:99"), Some(("::1", Some("99"), "")));
	/// assert_eq!(Endpoint::tokenize("127.0.0.1:8080-Bob"), Some(("127.0.0.1", Some("8080"), "-Bob")));
	/// assert_eq!(Endpoint::tokenize("127.0.0.1:"), Some(("127.0.0.1", None, ":")));
	/// ```
	pub fn tokenize(text: &str) -> Option<(&str, Option<&str>, &str)> {
		let text = text.trim_start();

		// `port` starts at the colon.
		let (host, port) = if let Some(bracketed) = text.strip_prefix('[') {
			let (host, tail) = match bracketed.find(']') {
				Some(i) => (&bracketed[..i], &bracketed[i + 1..]),
				None => (bracketed, "")
			};
			if !tail.starts_with(':') {
				return non_empty(host, None, tail)
			}
			(host, tail)
		} else {
			match (text.find(':'), text.rfind(':')) {
				(Some(first), Some(last)) if first == last => (&text[..last], &text[last..]),
				_ => return non_empty(text, None, "")
			}
		};

		let digits = port[1..].bytes().take_while(u8::is_ascii_digit).count();
		if digits == 0 {
			non_empty(host, None, port)
		} else {
			non_empty(host, Some(&port[1..=digits]), &port[digits + 1..])
		}
	}

	pub fn addr(&self) -> IpAddr {
		self.0.ip().into()
	}

	pub fn port(&self) -> u16 {
		self.0.port()
	}

	pub fn to_socket_addr(&self) -> SocketAddr {
		self.0
	}
}

fn non_empty<'a>(host: &'a str, port: Option<&'a str>, rest: &'a str) -> Option<(&'a str, Option<&'a str>, &'a str)> {
	if host.is_empty() {
		None
	} else {
		Some((host, port, rest))
	}
}

/// Accepts `host`, `host:port` or `[host]:port` where `host` is a numeric
/// address. A missing port is port 0.
impl FromStr for Endpoint {
	type Err = ParseError;

	fn from_str(text: &str) -> Result<Self, ParseError> {
		let text = text.trim();
		let (host, port, rest) = Endpoint::tokenize(text).ok_or(ParseError::Empty)?;
		if !rest.is_empty() {
			debug!("trailing text in endpoint `{}`", text);
			return Err(ParseError::Endpoint(text.to_string()))
		}

		let addr: IpAddr = host.parse()?;
		let port = match port {
			Some(port) => port.parse().map_err(|_| ParseError::Port(text.to_string()))?,
			None => 0
		};

		Endpoint::new(addr, port).ok_or_else(|| ParseError::Endpoint(text.to_string()))
	}
}

impl fmt::Display for Endpoint {
	fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
		fmt::Display::fmt(&self.0, f)
	}
}

impl fmt::Debug for Endpoint {
	fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
		fmt::Display::fmt(&self.0, f)
	}
}

impl From<SocketAddr> for Endpoint {
	fn from(addr: SocketAddr) -> Self {
		Endpoint(addr)
	}
}

impl From<Endpoint> for SocketAddr {
	fn from(ep: Endpoint) -> Self {
		ep.0
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::ip::Ip4Addr;

	#[test]
	fn tokenize() {
		let cases: &[(&str, &str, Option<&str>, &str)] = &[
			("::", "::", None, ""),
			("[::1]:99", "::1", Some("99"), ""),
			("127.0.0.1:8080", "127.0.0.1", Some("8080"), ""),
			("127.0.0.1:8080-Bob", "127.0.0.1", Some("8080"), "-Bob"),
			("127.0.0.1:", "127.0.0.1", None, ":"),
			("foo.example.com", "foo.example.com", None, ""),
			("foo.example.com:99", "foo.example.com", Some("99"), ""),
			("ffee::24c3:3349:3cee:0143", "ffee::24c3:3349:3cee:0143", None, ""),
			("fe80:88b5:4a:20c:29ff:feae:1c33:8080", "fe80:88b5:4a:20c:29ff:feae:1c33:8080", None, ""),
			("[ffee::24c3:3349:3cee:0143]", "ffee::24c3:3349:3cee:0143", None, ""),
			("[ffee::24c3:3349:3cee:0143]:80", "ffee::24c3:3349:3cee:0143", Some("80"), ""),
			("[ffee::24c3:3349:3cee:0143]:8080x", "ffee::24c3:3349:3cee:0143", Some("8080"), "x")
		];

		for &(text, host, port, rest) in cases {
			assert_eq!(Endpoint::tokenize(text), Some((host, port, rest)), "tokenizing {}", text);
		}

		assert_eq!(Endpoint::tokenize(""), None);
		assert_eq!(Endpoint::tokenize("[]:80"), None);
	}

	#[test]
	fn parse() {
		let ep: Endpoint = "172.96.12.134:80".parse().unwrap();
		assert_eq!(ep.addr(), Ip4Addr::new(172, 96, 12, 134));
		assert_eq!(ep.port(), 80);

		let ep: Endpoint = "172.96.12.134".parse().unwrap();
		assert_eq!(ep.addr(), Ip4Addr::new(172, 96, 12, 134));
		assert_eq!(ep.port(), 0);

		let ep: Endpoint = "[fe80::1]:8080".parse().unwrap();
		assert_eq!(ep.to_socket_addr(), "[fe80::1]:8080".parse::<SocketAddr>().unwrap());

		assert!(matches!("10.0.0.1:99999".parse::<Endpoint>(), Err(ParseError::Port(_))));
		assert!(matches!("10.0.0.1:80x".parse::<Endpoint>(), Err(ParseError::Endpoint(_))));
		assert!("foo.example.com:80".parse::<Endpoint>().is_err());
	}
}
