//! Text forms of addresses.
use crate::ParseError;

/// Drop one pair of enclosing brackets, if present.
///
/// Fails on an unbalanced opening bracket.
pub(crate) fn strip_brackets(text: &str) -> Option<&str> {
	match text.strip_prefix('[') {
		Some(inner) => inner.strip_suffix(']'),
		None => Some(text)
	}
}

/// One component of an `inet_aton` address: decimal, `0x` hex or
/// leading-zero octal.
fn parse_component(text: &str) -> Option<u32> {
	if let Some(hex) = text.strip_prefix("0x").or_else(|| text.strip_prefix("0X")) {
		if hex.is_empty() || !hex.bytes().all(|b| b.is_ascii_hexdigit()) {
			return None
		}
		return u32::from_str_radix(hex, 16).ok()
	}

	if text.is_empty() || !text.bytes().all(|b| b.is_ascii_digit()) {
		return None
	}

	match text.strip_prefix('0') {
		Some(octal) if !octal.is_empty() => u32::from_str_radix(octal, 8).ok(),
		_ => text.parse().ok()
	}
}

/// Parse an IPv4 address in any of the `inet_aton` forms.
///
/// `a.b.c.d`, `a.b.c`, `a.b` and `a` are accepted. In the truncated forms
/// the last component covers all the remaining octets.
pub(crate) fn parse_ip4(text: &str) -> Result<u32, ParseError> {
	let src = strip_brackets(text).ok_or_else(|| ParseError::Ip4(text.to_string()))?;
	if src.is_empty() {
		return Err(ParseError::Empty)
	}

	let parts: Vec<&str> = src.split('.').collect();
	if parts.len() > 4 {
		return Err(ParseError::Ip4(text.to_string()))
	}

	let (last, octets) = match parts.split_last() {
		Some(split) => split,
		None => return Err(ParseError::Empty)
	};

	let mut value: u32 = 0;
	for octet in octets {
		match parse_component(octet) {
			Some(x) if x <= 0xFF => value = value << 8 | x,
			_ => return Err(ParseError::Ip4(text.to_string()))
		}
	}

	let last = parse_component(last).ok_or_else(|| ParseError::Ip4(text.to_string()))?;
	let bits = 8 * (4 - octets.len() as u32);
	if bits == 32 {
		Ok(last)
	} else if last >> bits == 0 {
		Ok(value << bits | last)
	} else {
		Err(ParseError::Ip4(text.to_string()))
	}
}

/// Hex groups of an IPv6 address fragment, possibly ending with a dotted
/// IPv4 address.
fn parse_groups(text: &str, dotted_tail: bool) -> Option<Vec<u16>> {
	let mut groups = Vec::new();
	if text.is_empty() {
		return Some(groups)
	}

	let mut pieces = text.split(':').peekable();
	while let Some(piece) = pieces.next() {
		if piece.contains('.') {
			if !dotted_tail || pieces.peek().is_some() || piece.split('.').count() != 4 {
				return None
			}
			let ip4 = parse_ip4(piece).ok()?;
			groups.push((ip4 >> 16) as u16);
			groups.push(ip4 as u16);
		} else {
			if piece.is_empty() || piece.len() > 4 || !piece.bytes().all(|b| b.is_ascii_hexdigit()) {
				return None
			}
			groups.push(u16::from_str_radix(piece, 16).ok()?);
		}
	}

	Some(groups)
}

/// Parse an IPv6 address, with optional `::` compression, enclosing
/// brackets and trailing dotted IPv4 address.
pub(crate) fn parse_ip6(text: &str) -> Result<u128, ParseError> {
	let err = || ParseError::Ip6(text.to_string());
	let src = strip_brackets(text).ok_or_else(err)?;
	if src.is_empty() {
		return Err(ParseError::Empty)
	}

	let (head, tail) = match src.find("::") {
		Some(i) => (&src[..i], Some(&src[i + 2..])),
		None => (src, None)
	};

	let groups = match tail {
		None => {
			let groups = parse_groups(head, true).ok_or_else(err)?;
			if groups.len() != 8 {
				return Err(err())
			}
			groups
		},
		Some(tail) => {
			if tail.contains("::") {
				return Err(err())
			}
			let head = parse_groups(head, false).ok_or_else(err)?;
			let tail = parse_groups(tail, true).ok_or_else(err)?;
			if head.len() + tail.len() >= 8 {
				return Err(err())
			}
			let mut groups = head;
			groups.resize(8 - tail.len(), 0);
			groups.extend(tail);
			groups
		}
	};

	Ok(groups.into_iter().fold(0u128, |acc, g| acc << 16 | g as u128))
}
