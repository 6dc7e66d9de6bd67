//! Red-black tree primitive over index-addressed nodes.
//!
//! The tree does not own its nodes. Any container implementing [`Tree`]
//! gives access to the [`Links`] of a node by id, and gets a chance to
//! recompute its per-node aggregate through [`Tree::structure_fixup`]
//! whenever the shape below a node changes.
//!
//! The `next`/`prev` links thread the nodes in key order. They are
//! stored here but never touched by these routines: keeping them in sync
//! is the container's job when it splices nodes in and out.
use super::NodeId;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Color {
	Red,
	Black
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
	Left,
	Right
}

impl Direction {
	pub fn flip(self) -> Direction {
		match self {
			Direction::Left => Direction::Right,
			Direction::Right => Direction::Left
		}
	}
}

/// Tree and list links of a node.
#[derive(Debug, Clone, Copy)]
pub struct Links {
	pub color: Color,
	pub parent: Option<NodeId>,
	pub left: Option<NodeId>,
	pub right: Option<NodeId>,
	pub next: Option<NodeId>,
	pub prev: Option<NodeId>
}

impl Default for Links {
	fn default() -> Self {
		Links {
			color: Color::Red,
			parent: None,
			left: None,
			right: None,
			next: None,
			prev: None
		}
	}
}

impl Links {
	pub fn child(&self, dir: Direction) -> Option<NodeId> {
		match dir {
			Direction::Left => self.left,
			Direction::Right => self.right
		}
	}

	fn child_mut(&mut self, dir: Direction) -> &mut Option<NodeId> {
		match dir {
			Direction::Left => &mut self.left,
			Direction::Right => &mut self.right
		}
	}
}

pub trait Tree {
	fn links(&self, id: NodeId) -> &Links;

	fn links_mut(&mut self, id: NodeId) -> &mut Links;

	/// Recompute the aggregate of `id` from its own data and its children.
	fn structure_fixup(&mut self, id: NodeId);
}

fn color<T: Tree + ?Sized>(tree: &T, id: Option<NodeId>) -> Color {
	match id {
		Some(id) => tree.links(id).color,
		None => Color::Black
	}
}

fn is_red<T: Tree + ?Sized>(tree: &T, id: Option<NodeId>) -> bool {
	color(tree, id) == Color::Red
}

fn set_color<T: Tree + ?Sized>(tree: &mut T, id: Option<NodeId>, c: Color) {
	if let Some(id) = id {
		tree.links_mut(id).color = c
	}
}

/// Which child of its parent `id` is, if it has a parent.
pub fn child_direction<T: Tree + ?Sized>(tree: &T, id: NodeId) -> Option<Direction> {
	let parent = tree.links(id).parent?;
	if tree.links(parent).left == Some(id) {
		Some(Direction::Left)
	} else {
		Some(Direction::Right)
	}
}

/// Set the `dir` child of `id` to `child`, updating the child's parent.
pub fn set_child<T: Tree + ?Sized>(tree: &mut T, id: NodeId, dir: Direction, child: Option<NodeId>) {
	*tree.links_mut(id).child_mut(dir) = child;
	if let Some(child) = child {
		tree.links_mut(child).parent = Some(id)
	}
}

/// Put `replacement` where `id` hangs under its parent.
fn replace_in_parent<T: Tree + ?Sized>(tree: &mut T, id: NodeId, replacement: Option<NodeId>) {
	let parent = tree.links(id).parent;
	match parent {
		Some(parent) => {
			let dir = if tree.links(parent).left == Some(id) {
				Direction::Left
			} else {
				Direction::Right
			};
			set_child(tree, parent, dir, replacement)
		},
		None => {
			if let Some(r) = replacement {
				tree.links_mut(r).parent = None
			}
		}
	}
}

/// Rotate the subtree at `id` so that `id` moves down in direction `dir`.
///
/// Returns the node now at the top of the subtree. The aggregate of the
/// subtree top is unchanged, so ancestors need no fixup.
pub fn rotate<T: Tree + ?Sized>(tree: &mut T, id: NodeId, dir: Direction) -> NodeId {
	let other = dir.flip();
	let Some(child) = tree.links(id).child(other) else {
		return id
	};

	let grandchild = tree.links(child).child(dir);
	set_child(tree, id, other, grandchild);
	replace_in_parent(tree, id, Some(child));
	set_child(tree, child, dir, Some(id));

	tree.structure_fixup(id);
	tree.structure_fixup(child);
	child
}

/// Call the structure fixup on `id` and every ancestor up to the root.
pub fn ripple_structure_fixup<T: Tree + ?Sized>(tree: &mut T, id: NodeId) {
	let mut current = Some(id);
	while let Some(id) = current {
		tree.structure_fixup(id);
		current = tree.links(id).parent
	}
}

fn root_of<T: Tree + ?Sized>(tree: &T, mut id: NodeId) -> NodeId {
	while let Some(parent) = tree.links(id).parent {
		id = parent
	}
	id
}

/// Restore the red-black properties after `id` was linked in as a leaf.
///
/// The aggregates along the path to the root must already be up to date.
/// Returns the new root.
pub fn rebalance_after_insert<T: Tree + ?Sized>(tree: &mut T, id: NodeId) -> NodeId {
	tree.links_mut(id).color = Color::Red;
	let mut x = id;

	loop {
		let Some(mut parent) = tree.links(x).parent else {
			break
		};

		if tree.links(parent).color == Color::Black {
			break
		}

		let Some(grandparent) = tree.links(parent).parent else {
			break
		};

		let Some(parent_dir) = child_direction(tree, parent) else {
			break
		};

		let uncle = tree.links(grandparent).child(parent_dir.flip());
		if is_red(tree, uncle) {
			set_color(tree, Some(parent), Color::Black);
			set_color(tree, uncle, Color::Black);
			set_color(tree, Some(grandparent), Color::Red);
			x = grandparent;
		} else {
			if child_direction(tree, x) == Some(parent_dir.flip()) {
				// inner child, straighten first.
				rotate(tree, parent, parent_dir);
				x = parent;
				parent = match tree.links(x).parent {
					Some(p) => p,
					None => break
				};
			}

			set_color(tree, Some(parent), Color::Black);
			set_color(tree, Some(grandparent), Color::Red);
			rotate(tree, grandparent, parent_dir.flip());
		}
	}

	let root = root_of(tree, x);
	tree.links_mut(root).color = Color::Black;
	root
}

fn leftmost<T: Tree + ?Sized>(tree: &T, mut id: NodeId) -> NodeId {
	while let Some(left) = tree.links(id).left {
		id = left
	}
	id
}

/// Unlink `id` from the tree and rebalance.
///
/// Returns the new root, or `None` if the tree is now empty. The removed
/// node's links are left as they were.
pub fn remove<T: Tree + ?Sized>(tree: &mut T, id: NodeId) -> Option<NodeId> {
	let links = *tree.links(id);
	let removed_color;
	let x;
	let x_parent;

	match (links.left, links.right) {
		(Some(left), Some(right)) => {
			let successor = leftmost(tree, right);
			removed_color = tree.links(successor).color;
			x = tree.links(successor).right;

			if tree.links(successor).parent == Some(id) {
				x_parent = Some(successor);
			} else {
				x_parent = tree.links(successor).parent;
				replace_in_parent(tree, successor, x);
				set_child(tree, successor, Direction::Right, Some(right));
			}

			replace_in_parent(tree, id, Some(successor));
			set_child(tree, successor, Direction::Left, Some(left));
			tree.links_mut(successor).color = links.color;
		},
		(left, right) => {
			removed_color = links.color;
			x = left.or(right);
			x_parent = links.parent;
			replace_in_parent(tree, id, x);
		}
	}

	if let Some(p) = x_parent {
		ripple_structure_fixup(tree, p)
	}

	let anchor = x_parent.or(x)?;

	if removed_color == Color::Black {
		rebalance_after_remove(tree, x, x_parent);
	}

	let root = root_of(tree, anchor);
	tree.links_mut(root).color = Color::Black;
	Some(root)
}

/// Fix a missing black on the `x` side of `parent`.
fn rebalance_after_remove<T: Tree + ?Sized>(tree: &mut T, mut x: Option<NodeId>, mut parent: Option<NodeId>) {
	while !is_red(tree, x) {
		let Some(p) = parent else {
			break
		};

		let dir = if tree.links(p).left == x {
			Direction::Left
		} else {
			Direction::Right
		};

		let mut sibling = tree.links(p).child(dir.flip());
		if is_red(tree, sibling) {
			set_color(tree, sibling, Color::Black);
			set_color(tree, Some(p), Color::Red);
			rotate(tree, p, dir);
			sibling = tree.links(p).child(dir.flip());
		}

		let Some(s) = sibling else {
			break
		};

		let near = tree.links(s).child(dir);
		let far = tree.links(s).child(dir.flip());
		if !is_red(tree, near) && !is_red(tree, far) {
			set_color(tree, Some(s), Color::Red);
			x = Some(p);
			parent = tree.links(p).parent;
		} else {
			let mut s = s;
			if !is_red(tree, far) {
				set_color(tree, near, Color::Black);
				set_color(tree, Some(s), Color::Red);
				rotate(tree, s, dir.flip());
				match tree.links(p).child(dir.flip()) {
					Some(new_s) => s = new_s,
					None => break
				}
			}

			let parent_color = tree.links(p).color;
			set_color(tree, Some(s), parent_color);
			set_color(tree, Some(p), Color::Black);
			let far = tree.links(s).child(dir.flip());
			set_color(tree, far, Color::Black);
			rotate(tree, p, dir);
			x = None;
			break
		}
	}

	set_color(tree, x, Color::Black)
}

/// Check the red-black properties of the subtree at `id`.
///
/// Returns the black height, or 0 if a property is violated.
pub fn validate<T: Tree + ?Sized>(tree: &T, id: Option<NodeId>) -> usize {
	match id {
		None => 1,
		Some(id) => {
			let links = tree.links(id);
			for child in [links.left, links.right].into_iter().flatten() {
				if tree.links(child).parent != Some(id) {
					return 0
				}

				if links.color == Color::Red && tree.links(child).color == Color::Red {
					return 0
				}
			}

			let left = validate(tree, links.left);
			let right = validate(tree, links.right);
			if left == 0 || left != right {
				return 0
			}

			match links.color {
				Color::Black => left + 1,
				Color::Red => left
			}
		}
	}
}
