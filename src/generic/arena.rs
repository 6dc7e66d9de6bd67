use std::ops::{
	Index,
	IndexMut
};
use slab::Slab;
use crate::{
	DiscreteRange,
	util::Metric
};
use super::{
	Node,
	NodeId,
	rb::{
		Links,
		Tree
	}
};

/// Slab storage for the nodes of a space.
///
/// Freed slots are recycled by later insertions, and the whole storage
/// is released at once by [`NodeArena::clear`] or on drop.
#[derive(Debug, Clone)]
pub(crate) struct NodeArena<M, P> {
	nodes: Slab<Node<M, P>>
}

impl<M, P> NodeArena<M, P> {
	pub fn new() -> Self {
		NodeArena { nodes: Slab::new() }
	}

	pub fn len(&self) -> usize {
		self.nodes.len()
	}

	pub fn clear(&mut self) {
		self.nodes.clear()
	}
}

impl<M: Metric, P> NodeArena<M, P> {
	/// Allocate a detached node.
	pub fn make(&mut self, range: DiscreteRange<M>, payload: P) -> NodeId {
		self.nodes.insert(Node::new(range, payload))
	}

	/// Release a node, returning its payload.
	///
	/// The node must already be unlinked from the tree and the list.
	pub fn destroy(&mut self, id: NodeId) -> Option<P> {
		self.nodes.try_remove(id).map(|node| node.payload)
	}
}

impl<M, P> Default for NodeArena<M, P> {
	fn default() -> Self {
		Self::new()
	}
}

impl<M, P> Index<NodeId> for NodeArena<M, P> {
	type Output = Node<M, P>;

	fn index(&self, id: NodeId) -> &Node<M, P> {
		&self.nodes[id]
	}
}

impl<M, P> IndexMut<NodeId> for NodeArena<M, P> {
	fn index_mut(&mut self, id: NodeId) -> &mut Node<M, P> {
		&mut self.nodes[id]
	}
}

impl<M: Metric, P> Tree for NodeArena<M, P> {
	fn links(&self, id: NodeId) -> &Links {
		&self.nodes[id].links
	}

	fn links_mut(&mut self, id: NodeId) -> &mut Links {
		&mut self.nodes[id].links
	}

	fn structure_fixup(&mut self, id: NodeId) {
		let node = &self.nodes[id];
		let min = match node.links.left {
			Some(left) => self.nodes[left].hull.min(),
			None => node.range.min()
		};
		let max = match node.links.right {
			Some(right) => self.nodes[right].hull.max(),
			None => node.range.max()
		};
		self.nodes[id].hull = DiscreteRange::new(min, max)
	}
}
