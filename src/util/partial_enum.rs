/// Discrete type with a successor, a predecessor and bounds.
pub trait PartialEnum: Sized {
	const MIN: Self;
	const MAX: Self;

	/// Previous value, `None` at `MIN`.
	fn pred(&self) -> Option<Self>;

	/// Next value, `None` at `MAX`.
	fn succ(&self) -> Option<Self>;
}

macro_rules! impl_partial_enum {
	($($ty:ty),*) => {
		$(
			impl PartialEnum for $ty {
				const MIN: $ty = <$ty>::MIN;
				const MAX: $ty = <$ty>::MAX;

				fn pred(&self) -> Option<Self> {
					self.checked_sub(1)
				}

				fn succ(&self) -> Option<Self> {
					self.checked_add(1)
				}
			}
		)*
	};
}

impl_partial_enum!(u8, u16, u32, u64, u128, usize, i8, i16, i32, i64, i128, isize);

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn bounds() {
		assert_eq!(<u8 as PartialEnum>::MAX.succ(), None);
		assert_eq!(<u8 as PartialEnum>::MIN.pred(), None);
		assert_eq!(PartialEnum::succ(&41u32), Some(42));
		assert_eq!(PartialEnum::pred(&0i16), Some(-1));
		assert_eq!(<i16 as PartialEnum>::MIN, i16::MIN);
	}
}
