use thiserror::Error;

/// Error raised when text does not hold a valid address, mask, range,
/// network or endpoint.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ParseError {
	#[error("empty text")]
	Empty,
	#[error("invalid IPv4 address `{0}`")]
	Ip4(String),
	#[error("invalid IPv6 address `{0}`")]
	Ip6(String),
	#[error("invalid network mask `{0}`")]
	Mask(String),
	#[error("invalid address range `{0}`")]
	Range(String),
	#[error("invalid network `{0}`")]
	Net(String),
	#[error("invalid endpoint `{0}`")]
	Endpoint(String),
	#[error("invalid port in `{0}`")]
	Port(String)
}
