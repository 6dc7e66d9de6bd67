use std::{
	fmt,
	marker::PhantomData,
	str::FromStr
};
use serde::{
	de::Error,
	ser::{
		SerializeSeq,
		SerializeTuple
	},
	Deserialize,
	Deserializer,
	Serialize,
	Serializer
};
use crate::{
	DiscreteRange,
	IpRangeSet,
	IpSpace,
	generic::DiscreteSpace,
	ip::{
		Endpoint,
		Ip4Addr,
		Ip6Addr,
		IpAddr,
		IpFamily,
		IpMask,
		IpNet,
		IpRange,
		Net
	},
	util::Metric
};

/// Visitor reading a value from its text form.
struct TextVisitor<T> {
	expecting: &'static str,
	t: PhantomData<T>
}

impl<T> TextVisitor<T> {
	fn new(expecting: &'static str) -> Self {
		TextVisitor {
			expecting,
			t: PhantomData
		}
	}
}

impl<'de, T> serde::de::Visitor<'de> for TextVisitor<T>
where
	T: FromStr,
	T::Err: fmt::Display
{
	type Value = T;

	fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
		write!(formatter, "{}", self.expecting)
	}

	fn visit_str<E: Error>(self, text: &str) -> Result<T, E> {
		text.parse().map_err(E::custom)
	}
}

macro_rules! text_serde {
	($ty:ty, $expecting:literal) => {
		impl Serialize for $ty {
			fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
				serializer.collect_str(self)
			}
		}

		impl<'de> Deserialize<'de> for $ty {
			fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
				deserializer.deserialize_str(TextVisitor::new($expecting))
			}
		}
	};
}

text_serde!(Ip4Addr, "an IPv4 address");
text_serde!(Ip6Addr, "an IPv6 address");
text_serde!(IpAddr, "an IP address");
text_serde!(IpMask, "a network mask width");
text_serde!(IpRange, "an IP address range");
text_serde!(IpNet, "an IP network");
text_serde!(Endpoint, "an IP endpoint");

impl<A: IpFamily> Serialize for Net<A> {
	fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
		serializer.collect_str(self)
	}
}

impl<'de, A: IpFamily> Deserialize<'de> for Net<A> {
	fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
		deserializer.deserialize_str(TextVisitor::new("an IP network"))
	}
}

impl<T: Serialize> Serialize for DiscreteRange<T> where T: Metric {
	fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
		let mut t = serializer.serialize_tuple(2)?;
		t.serialize_element(&self.min())?;
		t.serialize_element(&self.max())?;
		t.end()
	}
}

impl<'de, T: Metric + Deserialize<'de>> Deserialize<'de> for DiscreteRange<T> {
	fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
		struct Visitor<T>(PhantomData<T>);

		impl<'de, T: Metric + Deserialize<'de>> serde::de::Visitor<'de> for Visitor<T> {
			type Value = DiscreteRange<T>;

			fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
				write!(formatter, "a discrete range")
			}

			fn visit_seq<A>(self, mut seq: A) -> Result<Self::Value, A::Error>
			where
				A: serde::de::SeqAccess<'de>
			{
				let min = seq.next_element()?.ok_or_else(|| A::Error::custom("missing lower bound"))?;
				let max = seq.next_element()?.ok_or_else(|| A::Error::custom("missing upper bound"))?;
				Ok(DiscreteRange::new(min, max))
			}
		}

		deserializer.deserialize_tuple(2, Visitor(PhantomData))
	}
}

impl<M: Metric + Serialize, P: Serialize> Serialize for DiscreteSpace<M, P> {
	fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
		let mut seq = serializer.serialize_seq(Some(self.len()))?;
		for entry in self {
			seq.serialize_element(&entry)?;
		}

		seq.end()
	}
}

impl<'de, M, P> Deserialize<'de> for DiscreteSpace<M, P>
where
	M: Metric + Deserialize<'de>,
	P: PartialEq + Clone + Deserialize<'de>
{
	fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
		struct Visitor<M, P>(PhantomData<(M, P)>);

		impl<'de, M, P> serde::de::Visitor<'de> for Visitor<M, P>
		where
			M: Metric + Deserialize<'de>,
			P: PartialEq + Clone + Deserialize<'de>
		{
			type Value = DiscreteSpace<M, P>;

			fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
				write!(formatter, "a discrete space")
			}

			fn visit_seq<A>(self, mut seq: A) -> Result<Self::Value, A::Error>
			where
				A: serde::de::SeqAccess<'de>
			{
				let mut result = DiscreteSpace::new();
				while let Some((range, payload)) = seq.next_element::<(DiscreteRange<M>, P)>()? {
					result.mark(range, payload)
				}

				Ok(result)
			}
		}

		deserializer.deserialize_seq(Visitor(PhantomData))
	}
}

impl<P: Serialize> Serialize for IpSpace<P> {
	fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
		let mut seq = serializer.serialize_seq(Some(self.len()))?;
		for entry in self {
			seq.serialize_element(&entry)?;
		}

		seq.end()
	}
}

impl<'de, P: PartialEq + Clone + Deserialize<'de>> Deserialize<'de> for IpSpace<P> {
	fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
		struct Visitor<P>(PhantomData<P>);

		impl<'de, P: PartialEq + Clone + Deserialize<'de>> serde::de::Visitor<'de> for Visitor<P> {
			type Value = IpSpace<P>;

			fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
				write!(formatter, "an IP space")
			}

			fn visit_seq<A>(self, mut seq: A) -> Result<Self::Value, A::Error>
			where
				A: serde::de::SeqAccess<'de>
			{
				let mut result = IpSpace::new();
				while let Some((range, payload)) = seq.next_element::<(IpRange, P)>()? {
					if range == IpRange::None {
						return Err(A::Error::custom("invalid range"))
					}

					result.mark(range, payload)
				}

				Ok(result)
			}
		}

		deserializer.deserialize_seq(Visitor(PhantomData))
	}
}

impl Serialize for IpRangeSet {
	fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
		let mut seq = serializer.serialize_seq(Some(self.len()))?;
		for range in self.iter() {
			seq.serialize_element(&range)?;
		}

		seq.end()
	}
}

impl<'de> Deserialize<'de> for IpRangeSet {
	fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
		let ranges = Vec::<IpRange>::deserialize(deserializer)?;
		let mut result = IpRangeSet::new();
		for range in ranges {
			result.mark(range)
		}

		Ok(result)
	}
}
