use std::collections::BTreeMap;
use proptest::prelude::*;
use rand::{
	Rng,
	SeedableRng,
	rngs::StdRng
};
use crate::generic::DiscreteSpace;

#[derive(Clone, Debug)]
enum Op {
	Mark(u8, u8, u8),
	Fill(u8, u8, u8),
	Erase(u8, u8),
	Blend(u8, u8, u8),
	Find(u8)
}

/// Payloads cycle through `0..4`, and blending to `0` unmaps.
fn rotate(acc: &mut u8, step: &u8) -> bool {
	*acc = (*acc + *step) % 4;
	*acc != 0
}

fn ops_strategy() -> impl Strategy<Value = Vec<Op>> {
	let payload = 1u8..4;
	let op = prop_oneof![
		30 => (any::<u8>(), any::<u8>(), payload.clone()).prop_map(|(a, b, p)| Op::Mark(a, b, p)),
		20 => (any::<u8>(), any::<u8>(), payload.clone()).prop_map(|(a, b, p)| Op::Fill(a, b, p)),
		20 => (any::<u8>(), any::<u8>()).prop_map(|(a, b)| Op::Erase(a, b)),
		20 => (any::<u8>(), any::<u8>(), payload).prop_map(|(a, b, c)| Op::Blend(a, b, c)),
		10 => any::<u8>().prop_map(Op::Find),
	];
	prop::collection::vec(op, 0..=200)
}

/// Maximal runs of consecutive keys holding the same payload.
fn coalesce<K: Copy + Into<u64>>(model: &BTreeMap<K, u8>) -> Vec<(u64, u64, u8)> {
	let mut runs: Vec<(u64, u64, u8)> = Vec::new();
	for (&k, &p) in model {
		let k = k.into();
		match runs.last_mut() {
			Some((_, max, q)) if *max + 1 == k && *q == p => *max = k,
			_ => runs.push((k, k, p))
		}
	}

	runs
}

fn ranges<M: crate::util::Metric + Into<u64>>(space: &DiscreteSpace<M, u8>) -> Vec<(u64, u64, u8)> {
	space.iter().map(|(r, p)| (r.min().into(), r.max().into(), *p)).collect()
}

proptest! {
	#![proptest_config(ProptestConfig {
		cases: 256,
		.. ProptestConfig::default()
	})]

	#[test]
	fn prop_equivalence(ops in ops_strategy()) {
		let mut space: DiscreteSpace<u8, u8> = DiscreteSpace::new();
		let mut model: BTreeMap<u8, u8> = BTreeMap::new();

		for op in ops {
			match op {
				Op::Mark(a, b, p) => {
					space.mark(a..=b, p);
					for k in a..=b {
						model.insert(k, p);
					}
				},
				Op::Fill(a, b, p) => {
					space.fill(a..=b, p);
					for k in a..=b {
						model.entry(k).or_insert(p);
					}
				},
				Op::Erase(a, b) => {
					space.erase(a..=b);
					for k in a..=b {
						model.remove(&k);
					}
				},
				Op::Blend(a, b, c) => {
					space.blend(a..=b, &c, rotate);
					for k in a..=b {
						let mut v = model.get(&k).copied().unwrap_or(0);
						if rotate(&mut v, &c) {
							model.insert(k, v);
						} else {
							model.remove(&k);
						}
					}
				},
				Op::Find(k) => {
					prop_assert_eq!(space.find(k).map(|(_, p)| *p), model.get(&k).copied());
				}
			}

			prop_assert!(space.validate());
		}

		prop_assert_eq!(ranges(&space), coalesce(&model));
	}

	#[test]
	fn prop_intersection(ops in ops_strategy(), a in any::<u8>(), b in any::<u8>()) {
		let mut space: DiscreteSpace<u8, u8> = DiscreteSpace::new();
		for op in ops {
			if let Op::Mark(a, b, p) = op {
				space.mark(a..=b, p)
			}
		}

		let query = crate::DiscreteRange::new(a, b);
		let got: Vec<_> = space.intersection(query).map(|(r, p)| (*r, *p)).collect();
		let expected: Vec<_> = space.iter().filter(|(r, _)| r.has_intersection_with(&query)).map(|(r, p)| (*r, *p)).collect();
		prop_assert_eq!(&got, &expected);

		let mut reversed: Vec<_> = space.intersection(query).rev().map(|(r, p)| (*r, *p)).collect();
		reversed.reverse();
		prop_assert_eq!(got, reversed);
	}
}

#[test]
fn random_churn() {
	let mut rng = StdRng::seed_from_u64(0x1b5ace);
	let mut space: DiscreteSpace<u16, u8> = DiscreteSpace::new();
	let mut model: BTreeMap<u16, u8> = BTreeMap::new();

	for i in 0..4000 {
		let a: u16 = rng.gen();
		let b = a.saturating_add(rng.gen_range(0..512));
		let p = rng.gen_range(1..4u8);
		match rng.gen_range(0..4) {
			0 => {
				space.mark(a..=b, p);
				for k in a..=b {
					model.insert(k, p);
				}
			},
			1 => {
				space.fill(a..=b, p);
				for k in a..=b {
					model.entry(k).or_insert(p);
				}
			},
			2 => {
				space.erase(a..=b);
				for k in a..=b {
					model.remove(&k);
				}
			},
			_ => {
				space.blend(a..=b, &p, rotate);
				for k in a..=b {
					let mut v = model.get(&k).copied().unwrap_or(0);
					if rotate(&mut v, &p) {
						model.insert(k, v);
					} else {
						model.remove(&k);
					}
				}
			}
		}

		if i % 100 == 0 {
			assert!(space.validate());
		}
	}

	assert!(space.validate());
	assert_eq!(ranges(&space), coalesce(&model));
}
