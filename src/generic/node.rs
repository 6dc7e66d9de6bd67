use crate::{
	DiscreteRange,
	util::Metric
};
use super::rb::Links;

/// Node of a [`super::DiscreteSpace`].
///
/// `hull` is the smallest range covering the node's range and every
/// range stored below it in the tree.
#[derive(Debug, Clone)]
pub struct Node<M, P> {
	pub(crate) links: Links,
	pub(crate) range: DiscreteRange<M>,
	pub(crate) hull: DiscreteRange<M>,
	pub(crate) payload: P
}

impl<M: Metric, P> Node<M, P> {
	pub(crate) fn new(range: DiscreteRange<M>, payload: P) -> Node<M, P> {
		Node {
			links: Links::default(),
			range,
			hull: range,
			payload
		}
	}

	pub fn range(&self) -> &DiscreteRange<M> {
		&self.range
	}

	pub fn payload(&self) -> &P {
		&self.payload
	}

	pub(crate) fn next(&self) -> Option<usize> {
		self.links.next
	}

	pub(crate) fn prev(&self) -> Option<usize> {
		self.links.prev
	}
}
