/// Relationship between two ranges.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Relation {
	/// Disjoint and not adjacent.
	None,
	Equal,
	/// The left range is contained in the right range.
	Subset,
	/// The left range contains the right range.
	Superset,
	/// The ranges intersect but neither contains the other.
	Overlap,
	/// Disjoint, with no element between them.
	Adjacent
}

/// Relationship between the right edge of a range and the left edge of
/// another range.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EdgeRelation {
	/// The second range does not extend past the first.
	None,
	/// There is at least one element between the edges.
	Gap,
	/// The second range starts right after the first.
	Adjacent,
	/// The second range starts inside the first.
	Overlap
}
