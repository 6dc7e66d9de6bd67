use std::fmt;
use log::trace;
use crate::{
	DiscreteRange,
	util::{
		Metric,
		PartialEnum,
		is_followed_by
	}
};
use super::{
	NodeArena,
	NodeId,
	rb::{
		self,
		Color,
		Direction,
		Tree
	}
};

/// Map from disjoint ranges of a discrete metric to payloads.
///
/// Stored ranges never overlap, and two adjacent ranges never hold equal
/// payloads: every mutating operation merges what it writes with equal
/// neighbors.
///
/// ```
/// use ip_space::generic::DiscreteSpace;
///
/// let mut space: DiscreteSpace<u32, char> = DiscreteSpace::new();
/// space.mark(10..=19, 'a');
/// space.mark(20..=29, 'a');
/// space.fill(0..=39, 'b');
/// assert_eq!(space.len(), 3);
/// assert_eq!(space.find(25).map(|(_, p)| *p), Some('a'));
/// assert_eq!(space.find(35).map(|(_, p)| *p), Some('b'));
/// ```
#[derive(Clone)]
pub struct DiscreteSpace<M, P> {
	nodes: NodeArena<M, P>,
	root: Option<NodeId>,
	head: Option<NodeId>,
	tail: Option<NodeId>
}

impl<M: Metric, P> DiscreteSpace<M, P> {
	/// Create a new empty space.
	pub fn new() -> DiscreteSpace<M, P> {
		DiscreteSpace {
			nodes: NodeArena::new(),
			root: None,
			head: None,
			tail: None
		}
	}

	/// Number of stored ranges.
	pub fn len(&self) -> usize {
		self.nodes.len()
	}

	pub fn is_empty(&self) -> bool {
		self.root.is_none()
	}

	/// Remove every range, dropping the payloads.
	pub fn clear(&mut self) {
		self.nodes.clear();
		self.root = None;
		self.head = None;
		self.tail = None;
	}

	pub fn iter(&self) -> Iter<'_, M, P> {
		Iter {
			nodes: &self.nodes,
			front: self.head,
			back: self.tail
		}
	}

	fn find_node(&self, metric: M) -> Option<NodeId> {
		let mut current = self.root;
		while let Some(id) = current {
			let node = &self.nodes[id];
			if metric < node.range.min() {
				if !node.hull.contains(metric) {
					return None
				}
				current = node.links.left
			} else if metric > node.range.max() {
				if !node.hull.contains(metric) {
					return None
				}
				current = node.links.right
			} else {
				return Some(id)
			}
		}

		None
	}

	/// Find the range containing `metric`.
	pub fn find(&self, metric: M) -> Option<(&DiscreteRange<M>, &P)> {
		self.find_node(metric).map(|id| {
			let node = &self.nodes[id];
			(&node.range, &node.payload)
		})
	}

	pub fn contains(&self, metric: M) -> bool {
		self.find_node(metric).is_some()
	}

	/// Rightmost node starting at or before `target`.
	fn lower_node(&self, target: M) -> Option<NodeId> {
		if let Some(tail) = self.tail {
			if self.nodes[tail].range.min() <= target {
				return Some(tail)
			}
		}

		let mut best = None;
		let mut current = self.root;
		while let Some(id) = current {
			let node = &self.nodes[id];
			if node.range.min() <= target {
				best = Some(id);
				current = node.links.right
			} else {
				current = node.links.left
			}
		}

		best
	}

	/// Leftmost node starting strictly after `target`.
	fn upper_node(&self, target: M) -> Option<NodeId> {
		if let Some(tail) = self.tail {
			if self.nodes[tail].range.min() <= target {
				return None
			}
		}

		let mut best = None;
		let mut current = self.root;
		while let Some(id) = current {
			let node = &self.nodes[id];
			if node.range.min() > target {
				best = Some(id);
				current = node.links.left
			} else {
				current = node.links.right
			}
		}

		best
	}

	/// The last stored range starting at or before `target`.
	pub fn lower_bound(&self, target: M) -> Option<(&DiscreteRange<M>, &P)> {
		self.lower_node(target).map(|id| {
			let node = &self.nodes[id];
			(&node.range, &node.payload)
		})
	}

	/// The first stored range starting after `target`.
	pub fn upper_bound(&self, target: M) -> Option<(&DiscreteRange<M>, &P)> {
		self.upper_node(target).map(|id| {
			let node = &self.nodes[id];
			(&node.range, &node.payload)
		})
	}

	/// Iterate over the stored ranges that overlap `range`.
	pub fn intersection<R: Into<DiscreteRange<M>>>(&self, range: R) -> Iter<'_, M, P> {
		let range = range.into();
		let empty = Iter {
			nodes: &self.nodes,
			front: None,
			back: None
		};

		if range.is_empty() {
			return empty
		}

		let first = match self.lower_node(range.min()) {
			Some(n) if self.nodes[n].range.max() >= range.min() => Some(n),
			Some(n) => self.nodes[n].next(),
			None => self.head
		};

		match first {
			Some(first) if self.nodes[first].range.min() <= range.max() => {
				let last = match self.upper_node(range.max()) {
					Some(upper) => self.nodes[upper].prev(),
					None => self.tail
				};

				Iter {
					nodes: &self.nodes,
					front: Some(first),
					back: last
				}
			},
			_ => empty
		}
	}

	fn set_range(&mut self, id: NodeId, range: DiscreteRange<M>) {
		self.nodes[id].range = range;
		rb::ripple_structure_fixup(&mut self.nodes, id)
	}

	fn set_min(&mut self, id: NodeId, min: M) {
		let max = self.nodes[id].range.max();
		self.set_range(id, DiscreteRange::new(min, max))
	}

	fn set_max(&mut self, id: NodeId, max: M) {
		let min = self.nodes[id].range.min();
		self.set_range(id, DiscreteRange::new(min, max))
	}

	/// Hang the detached node `id` under `parent` and rebalance.
	fn link(&mut self, parent: Option<NodeId>, dir: Direction, id: NodeId) {
		match parent {
			Some(parent) => {
				rb::set_child(&mut self.nodes, parent, dir, Some(id));
				rb::ripple_structure_fixup(&mut self.nodes, id);
				self.root = Some(rb::rebalance_after_insert(&mut self.nodes, id))
			},
			None => {
				self.nodes.links_mut(id).color = Color::Black;
				self.root = Some(id)
			}
		}
	}

	/// Insert `id` right after `spot` in key order.
	fn insert_after(&mut self, spot: NodeId, id: NodeId) {
		let next = self.nodes[spot].next();
		match (self.nodes[spot].links.right, next) {
			(Some(_), Some(next)) => self.link(Some(next), Direction::Left, id),
			_ => self.link(Some(spot), Direction::Right, id)
		}

		let links = self.nodes.links_mut(id);
		links.prev = Some(spot);
		links.next = next;
		self.nodes.links_mut(spot).next = Some(id);
		match next {
			Some(next) => self.nodes.links_mut(next).prev = Some(id),
			None => self.tail = Some(id)
		}
	}

	/// Insert `id` right before `spot` in key order, or at the end.
	fn insert_before(&mut self, spot: Option<NodeId>, id: NodeId) {
		let Some(spot) = spot else {
			return self.append(id)
		};

		let prev = self.nodes[spot].prev();
		match (self.nodes[spot].links.left, prev) {
			(Some(_), Some(prev)) => self.link(Some(prev), Direction::Right, id),
			_ => self.link(Some(spot), Direction::Left, id)
		}

		let links = self.nodes.links_mut(id);
		links.next = Some(spot);
		links.prev = prev;
		self.nodes.links_mut(spot).prev = Some(id);
		match prev {
			Some(prev) => self.nodes.links_mut(prev).next = Some(id),
			None => self.head = Some(id)
		}
	}

	fn append(&mut self, id: NodeId) {
		match self.tail {
			Some(tail) => self.insert_after(tail, id),
			None => {
				self.link(None, Direction::Left, id);
				self.head = Some(id);
				self.tail = Some(id)
			}
		}
	}

	/// Unlink and free `id`.
	fn remove_node(&mut self, id: NodeId) -> Option<P> {
		let links = *self.nodes.links(id);
		match links.prev {
			Some(prev) => self.nodes.links_mut(prev).next = links.next,
			None => self.head = links.next
		}
		match links.next {
			Some(next) => self.nodes.links_mut(next).prev = links.prev,
			None => self.tail = links.prev
		}

		self.root = rb::remove(&mut self.nodes, id);
		self.nodes.destroy(id)
	}

	/// Map every element of `range` to `payload`, whatever it was mapped to
	/// before.
	pub fn mark<R: Into<DiscreteRange<M>>>(&mut self, range: R, payload: P) where P: PartialEq + Clone {
		let range = range.into();
		if range.is_empty() {
			return
		}

		trace!("mark {:?}", range);
		let (lo, hi) = (range.min(), range.max());

		// node that ends up holding `range`.
		let mut target: Option<NodeId> = None;

		let cur = match self.lower_node(lo) {
			None => self.head,
			Some(n) => {
				let n_range = self.nodes[n].range;
				if n_range.max() < lo {
					if is_followed_by(n_range.max(), lo) && self.nodes[n].payload == payload {
						target = Some(n)
					}
					self.nodes[n].next()
				} else if self.nodes[n].payload == payload {
					if n_range.max() >= hi {
						return
					}
					target = Some(n);
					self.nodes[n].next()
				} else if n_range.min() < lo {
					let Some(before) = lo.pred() else {
						return
					};

					if n_range.max() > hi {
						// strictly inside `n`, split it in three.
						let Some(after) = hi.succ() else {
							return
						};
						let right_payload = self.nodes[n].payload.clone();
						self.set_max(n, before);
						let middle = self.nodes.make(range, payload);
						self.insert_after(n, middle);
						let right = self.nodes.make(DiscreteRange::new(after, n_range.max()), right_payload);
						self.insert_after(middle, right);
						return
					}

					self.set_max(n, before);
					self.nodes[n].next()
				} else {
					// `n` starts at `lo`.
					if let Some(prev) = self.nodes[n].prev() {
						let prev_node = &self.nodes[prev];
						if is_followed_by(prev_node.range.max(), lo) && prev_node.payload == payload {
							target = Some(prev)
						}
					}

					if n_range.max() > hi {
						let Some(after) = hi.succ() else {
							return
						};
						self.set_min(n, after);
						match target {
							Some(prev) => self.set_max(prev, hi),
							None => {
								let id = self.nodes.make(range, payload);
								self.insert_before(Some(n), id)
							}
						}
						return
					}

					match target {
						Some(_) => Some(n),
						None => {
							// fully overwritten, reuse it.
							self.nodes[n].payload = payload.clone();
							target = Some(n);
							self.nodes[n].next()
						}
					}
				}
			}
		};

		let target = match target {
			Some(target) => {
				if self.nodes[target].range.max() < hi {
					self.set_max(target, hi)
				}
				target
			},
			None => {
				let id = self.nodes.make(range, payload.clone());
				self.insert_before(cur, id);
				id
			}
		};

		let mut cur = cur;
		while let Some(c) = cur {
			let c_range = self.nodes[c].range;
			if c_range.min() > hi && !is_followed_by(hi, c_range.min()) {
				break
			}

			let next = self.nodes[c].next();
			if c_range.max() <= hi {
				self.remove_node(c);
				cur = next;
				continue
			}

			if self.nodes[c].payload == payload {
				self.remove_node(c);
				self.set_max(target, c_range.max())
			} else if c_range.min() <= hi {
				if let Some(after) = hi.succ() {
					self.set_min(c, after)
				}
			}

			break
		}
	}

	/// Map the unmapped elements of `range` to `payload`.
	///
	/// Elements already mapped keep their payload.
	pub fn fill<R: Into<DiscreteRange<M>>>(&mut self, range: R, payload: P) where P: PartialEq + Clone {
		let range = range.into();
		if range.is_empty() {
			return
		}

		trace!("fill {:?}", range);
		let hi = range.max();
		let mut lo = range.min();
		let mut prev: Option<NodeId> = None;
		let mut cur = self.lower_node(lo).or(self.head);

		loop {
			if let Some(c) = cur {
				let c_range = self.nodes[c].range;
				if c_range.min() <= lo {
					if c_range.max() >= hi {
						return
					}

					if c_range.max() >= lo {
						match c_range.max().succ() {
							Some(after) => lo = after,
							None => return
						}
					}

					prev = Some(c);
					cur = self.nodes[c].next();
					continue
				}
			}

			// `[lo, gap_max]` is unmapped, `cur` is the first node after it.
			let bound = match cur {
				Some(c) if self.nodes[c].range.min() <= hi => Some((c, self.nodes[c].range.min())),
				_ => None
			};

			let gap_max = match bound {
				Some((_, min)) => match min.pred() {
					Some(gap_max) => gap_max,
					None => return
				},
				None => hi
			};

			let left = prev.filter(|&p| {
				is_followed_by(self.nodes[p].range.max(), lo) && self.nodes[p].payload == payload
			});
			let right = cur.filter(|&c| {
				is_followed_by(gap_max, self.nodes[c].range.min()) && self.nodes[c].payload == payload
			});

			let covering = match (left, right) {
				(Some(l), Some(r)) => {
					// the gap joins two equal ranges.
					let r_max = self.nodes[r].range.max();
					self.remove_node(r);
					self.set_max(l, r_max);
					Some(l)
				},
				(Some(l), None) => {
					self.set_max(l, gap_max);
					None
				},
				(None, Some(r)) => {
					self.set_min(r, lo);
					None
				},
				(None, None) => {
					let id = self.nodes.make(DiscreteRange::new(lo, gap_max), payload.clone());
					self.insert_before(cur, id);
					None
				}
			};

			match bound {
				Some((c, min)) => {
					lo = min;
					prev = None;
					cur = Some(covering.unwrap_or(c))
				},
				None => return
			}
		}
	}

	/// Unmap every element of `range`.
	pub fn erase<R: Into<DiscreteRange<M>>>(&mut self, range: R) where P: Clone {
		let range = range.into();
		if range.is_empty() {
			return
		}

		trace!("erase {:?}", range);
		let (lo, hi) = (range.min(), range.max());
		let mut cur = self.lower_node(lo).or(self.head);

		while let Some(c) = cur {
			let c_range = self.nodes[c].range;
			if c_range.min() > hi {
				break
			}

			let next = self.nodes[c].next();
			if c_range.max() >= lo {
				if c_range.min() >= lo {
					if c_range.max() > hi {
						if let Some(after) = hi.succ() {
							self.set_min(c, after)
						}
						break
					}
					self.remove_node(c);
				} else {
					let Some(before) = lo.pred() else {
						break
					};

					if c_range.max() > hi {
						// hole in the middle of `c`.
						let Some(after) = hi.succ() else {
							break
						};
						let payload = self.nodes[c].payload.clone();
						self.set_max(c, before);
						let right = self.nodes.make(DiscreteRange::new(after, c_range.max()), payload);
						self.insert_after(c, right);
						break
					}

					self.set_max(c, before)
				}
			}

			cur = next
		}
	}

	/// Blend `color` into every element of `range`.
	///
	/// Mapped elements have their payload updated by `blender(payload,
	/// color)`. If the blender returns `false` the element is unmapped.
	/// Unmapped elements get a default payload blended with `color`, unless
	/// that blend returns `false`, in which case they stay unmapped.
	///
	/// ```
	/// use ip_space::generic::DiscreteSpace;
	///
	/// let mut space: DiscreteSpace<u32, u32> = DiscreteSpace::new();
	/// let or = |acc: &mut u32, bits: &u32| { *acc |= *bits; true };
	/// space.blend(0..=9, &1, or);
	/// space.blend(5..=14, &2, or);
	/// let ranges: Vec<_> = space.iter().map(|(r, p)| (r.min(), r.max(), *p)).collect();
	/// assert_eq!(ranges, [(0, 4, 1), (5, 9, 3), (10, 14, 2)]);
	/// ```
	pub fn blend<R, U, F>(&mut self, range: R, color: &U, mut blender: F)
	where
		R: Into<DiscreteRange<M>>,
		P: Default + PartialEq + Clone,
		F: FnMut(&mut P, &U) -> bool
	{
		let range = range.into();
		if range.is_empty() {
			return
		}

		trace!("blend {:?}", range);
		let mut plain = P::default();
		let plain = if blender(&mut plain, color) {
			Some(plain)
		} else {
			None
		};

		// resulting payload of each part of `range`, `None` to unmap.
		let mut parts: Vec<(DiscreteRange<M>, Option<P>)> = Vec::new();
		let mut lo = Some(range.min());
		for (r, payload) in self.intersection(range) {
			let part = r.intersection(&range);
			if let (Some(l), Some(plain)) = (lo, &plain) {
				if l < part.min() {
					if let Some(before) = part.min().pred() {
						parts.push((DiscreteRange::new(l, before), Some(plain.clone())))
					}
				}
			}

			let mut blended = payload.clone();
			if blender(&mut blended, color) {
				if blended != *payload {
					parts.push((part, Some(blended)))
				}
			} else {
				parts.push((part, None))
			}

			lo = part.max().succ()
		}

		if let (Some(l), Some(plain)) = (lo, plain) {
			if l <= range.max() {
				parts.push((DiscreteRange::new(l, range.max()), Some(plain)))
			}
		}

		for (part, payload) in parts {
			match payload {
				Some(payload) => self.mark(part, payload),
				None => self.erase(part)
			}
		}
	}

	/// Check the tree, list, hull and coalescing invariants.
	///
	/// This walks the whole structure and is meant for tests.
	pub fn validate(&self) -> bool where P: PartialEq {
		if let Some(root) = self.root {
			let links = self.nodes.links(root);
			if links.parent.is_some() || links.color != Color::Black {
				return false
			}
		}

		if rb::validate(&self.nodes, self.root) == 0 {
			return false
		}

		let mut in_order = Vec::new();
		if !self.validate_subtree(self.root, &mut in_order) {
			return false
		}

		let mut listed = Vec::new();
		let mut prev: Option<NodeId> = None;
		let mut current = self.head;
		while let Some(id) = current {
			let node = &self.nodes[id];
			if node.prev() != prev || node.range.is_empty() {
				return false
			}

			if let Some(prev) = prev {
				let prev_node = &self.nodes[prev];
				if prev_node.range.max() >= node.range.min() {
					return false
				}

				if prev_node.range.is_left_adjacent_to(&node.range) && prev_node.payload == node.payload {
					return false
				}
			}

			listed.push(id);
			prev = current;
			current = node.next()
		}

		prev == self.tail && listed == in_order && listed.len() == self.nodes.len()
	}

	fn validate_subtree(&self, id: Option<NodeId>, out: &mut Vec<NodeId>) -> bool {
		let Some(id) = id else {
			return true
		};

		let node = &self.nodes[id];
		let mut hull = node.range;
		for child in [node.links.left, node.links.right].into_iter().flatten() {
			hull = hull.hull(&self.nodes[child].hull)
		}

		if hull != node.hull {
			return false
		}

		if !self.validate_subtree(node.links.left, out) {
			return false
		}
		out.push(id);
		self.validate_subtree(node.links.right, out)
	}
}

impl<M: Metric, P> Default for DiscreteSpace<M, P> {
	fn default() -> Self {
		Self::new()
	}
}

impl<M: Metric, P: fmt::Debug> fmt::Debug for DiscreteSpace<M, P> {
	fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
		f.debug_map().entries(self.iter()).finish()
	}
}

impl<'a, M: Metric, P> IntoIterator for &'a DiscreteSpace<M, P> {
	type Item = (&'a DiscreteRange<M>, &'a P);
	type IntoIter = Iter<'a, M, P>;

	fn into_iter(self) -> Iter<'a, M, P> {
		self.iter()
	}
}

/// Iterator over the ranges of a [`DiscreteSpace`], in ascending order.
pub struct Iter<'a, M, P> {
	nodes: &'a NodeArena<M, P>,
	front: Option<NodeId>,
	back: Option<NodeId>
}

impl<'a, M, P> Clone for Iter<'a, M, P> {
	fn clone(&self) -> Self {
		Iter {
			nodes: self.nodes,
			front: self.front,
			back: self.back
		}
	}
}

impl<'a, M: Metric, P> Iterator for Iter<'a, M, P> {
	type Item = (&'a DiscreteRange<M>, &'a P);

	fn next(&mut self) -> Option<Self::Item> {
		let id = self.front?;
		let nodes = self.nodes;
		let node = &nodes[id];
		if self.front == self.back {
			self.front = None;
			self.back = None
		} else {
			self.front = node.next()
		}

		Some((node.range(), node.payload()))
	}
}

impl<'a, M: Metric, P> DoubleEndedIterator for Iter<'a, M, P> {
	fn next_back(&mut self) -> Option<Self::Item> {
		let id = self.back?;
		let nodes = self.nodes;
		let node = &nodes[id];
		if self.front == self.back {
			self.front = None;
			self.back = None
		} else {
			self.back = node.prev()
		}

		Some((node.range(), node.payload()))
	}
}

impl<'a, M: Metric, P> std::iter::FusedIterator for Iter<'a, M, P> {}

#[cfg(test)]
mod tests {
	use super::*;

	fn ranges<P: Clone>(space: &DiscreteSpace<u32, P>) -> Vec<(u32, u32, P)> {
		space.iter().map(|(r, p)| (r.min(), r.max(), p.clone())).collect()
	}

	#[test]
	fn mark_split_and_merge() {
		let mut space: DiscreteSpace<u32, i32> = DiscreteSpace::new();
		space.mark(0..=99, 1);
		space.mark(40..=49, 2);
		assert_eq!(ranges(&space), [(0, 39, 1), (40, 49, 2), (50, 99, 1)]);
		assert!(space.validate());

		space.mark(40..=49, 1);
		assert_eq!(ranges(&space), [(0, 99, 1)]);
		assert!(space.validate());
	}

	#[test]
	fn mark_reuses_node_starting_at_lo() {
		let mut space: DiscreteSpace<u32, i32> = DiscreteSpace::new();
		space.mark(10..=19, 1);
		space.mark(20..=29, 2);
		space.mark(30..=39, 3);
		space.mark(20..=34, 1);
		assert_eq!(ranges(&space), [(10, 34, 1), (35, 39, 3)]);
		assert!(space.validate());
	}

	#[test]
	fn mark_at_metric_bounds() {
		let mut space: DiscreteSpace<u8, bool> = DiscreteSpace::new();
		space.mark(0..=255, true);
		space.mark(255, false);
		space.mark(0, false);
		assert_eq!(space.len(), 3);
		space.mark(1..=255, false);
		assert_eq!(space.len(), 1);
		assert!(space.validate());
	}

	#[test]
	fn fill_bridges_gap() {
		let mut space: DiscreteSpace<u32, i32> = DiscreteSpace::new();
		space.mark(0..=9, 1);
		space.mark(20..=29, 1);
		space.mark(40..=49, 2);
		space.fill(5..=45, 1);
		assert_eq!(ranges(&space), [(0, 39, 1), (40, 49, 2)]);
		assert!(space.validate());
	}

	#[test]
	fn erase_hole() {
		let mut space: DiscreteSpace<u32, i32> = DiscreteSpace::new();
		space.mark(0..=99, 1);
		space.erase(10..=19);
		assert_eq!(ranges(&space), [(0, 9, 1), (20, 99, 1)]);
		space.erase(0..=u32::MAX);
		assert!(space.is_empty());
		assert!(space.validate());
	}

	#[test]
	fn blend_false_unmaps() {
		let mut space: DiscreteSpace<u32, u32> = DiscreteSpace::new();
		space.mark(0..=9, 3);
		space.mark(20..=29, 1);
		// clear the given bits, dropping payloads that become empty.
		let clear = |acc: &mut u32, bits: &u32| {
			*acc &= !*bits;
			*acc != 0
		};
		space.blend(5..=25, &1, clear);
		assert_eq!(ranges(&space), [(0, 4, 3), (5, 9, 2), (26, 29, 1)]);
		assert!(space.validate());
	}

	#[test]
	fn intersection_bounds() {
		let mut space: DiscreteSpace<u32, i32> = DiscreteSpace::new();
		for i in 0..10u32 {
			space.mark(i * 10..=i * 10 + 4, i as i32);
		}

		let hit: Vec<_> = space.intersection(13..=31).map(|(_, p)| *p).collect();
		assert_eq!(hit, [1, 2, 3]);
		assert_eq!(space.intersection(5..=9).count(), 0);
		assert_eq!(space.intersection(200..=300).count(), 0);
		let back: Vec<_> = space.intersection(0..=24).rev().map(|(_, p)| *p).collect();
		assert_eq!(back, [2, 1, 0]);
	}
}
