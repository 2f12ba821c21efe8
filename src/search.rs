//! Search
//!
//! Resolve a query to a single chord, or answer whether a note grouping
//! appears anywhere along a tree's branches.

use crate::catalog::{filtered_catalog, ChordCandidate, Query};
use crate::chord_tree::{ChordNode, ChordTree};
use tracing::trace;

/// The one candidate matching `query`, if exactly one does.
///
/// Zero matches and several matches are both "no unique solution".
pub fn solution(tree: &ChordTree, query: &Query) -> Option<ChordCandidate> {
    let mut matches = filtered_catalog(tree, query)
        .into_iter()
        .filter_map(|slot| slot.candidate);
    let first = matches.next()?;
    match matches.next() {
        None => Some(first),
        Some(_) => None,
    }
}

/// Whether some branch below `node` collects `required` query hits.
///
/// Walks the node, counts it when its pitch class is queried, and accepts as
/// soon as the running count reaches `required`, without finishing the path.
/// A pitch class met twice on one branch counts twice. Leaves end a branch.
pub fn exists(query: &Query, node: &ChordNode, matches_so_far: usize, required: usize) -> bool {
    let found = matches_so_far + usize::from(query.contains(node.pitch()));
    if found >= required {
        trace!(at = %node.note(), found, required, "grouping threshold reached");
        return true;
    }
    match node.children() {
        Some(kids) => kids
            .into_iter()
            .any(|kid| exists(query, kid, found, required)),
        None => false,
    }
}

/// [`exists`] from the tree root, requiring as many hits as the tree's depth.
///
/// An empty or partly unrecognized query is never found.
pub fn exists_in(tree: &ChordTree, query: &Query) -> bool {
    query.is_matchable() && exists(query, tree.root(), 0, tree.depth())
}
