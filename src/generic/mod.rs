//! Interval map over any discrete metric.
mod arena;
mod node;
mod rb;
pub mod space;

pub(crate) use arena::NodeArena;
pub(crate) use node::Node;
pub use space::{
	DiscreteSpace,
	Iter
};

/// Index of a node in its space's arena.
pub type NodeId = usize;
