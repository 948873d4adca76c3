//! Hierarchical tree reconstruction over flat parent-linked records.
//!
//! Organizations, assessment categories, and permission modules are all
//! stored as flat rows carrying a self-referential parent pointer and a
//! caller-maintained depth. This module rebuilds the nested forest from such
//! a list, optionally restricted to a keyword-matched subset extended by its
//! full ancestor/descendant closure.

use std::collections::{HashMap, HashSet, VecDeque};

use serde::Serialize;

use crate::types::DbId;

// ---------------------------------------------------------------------------
// Node abstraction
// ---------------------------------------------------------------------------

/// Uniform shape shared by every tree-backed record kind.
pub trait HierarchyNode {
    /// Unique id of this record.
    fn node_id(&self) -> DbId;

    /// Parent record id; `None` marks a root.
    fn parent_id(&self) -> Option<DbId>;

    /// Depth of this record: 1 for roots, `parent.level + 1` otherwise.
    ///
    /// Maintained by whoever creates the record. The reconstructor trusts
    /// this value and never recomputes depth from the parent chain.
    fn level(&self) -> i32;

    /// Display text used for keyword matching.
    fn display_name(&self) -> &str;
}

// ---------------------------------------------------------------------------
// Output shapes
// ---------------------------------------------------------------------------

/// A record with its reconstructed children attached.
#[derive(Debug, Clone, Serialize)]
pub struct TreeNode<T> {
    #[serde(flatten)]
    pub record: T,
    pub children: Vec<TreeNode<T>>,
}

/// A reconstructed forest plus the number of records it contains.
#[derive(Debug, Clone, Serialize)]
pub struct Forest<T> {
    pub list: Vec<TreeNode<T>>,
    pub count: usize,
}

impl<T> Forest<T> {
    fn empty() -> Self {
        Self {
            list: Vec::new(),
            count: 0,
        }
    }
}

// ---------------------------------------------------------------------------
// Reconstruction
// ---------------------------------------------------------------------------

/// Rebuild the full forest from a flat list.
///
/// Roots are the records whose `level` equals the minimum level present in
/// the list, which is not necessarily 1 when only a subtree was loaded.
/// Sibling order follows the input order.
pub fn build_forest<T>(flat: &[T]) -> Forest<T>
where
    T: HierarchyNode + Clone,
{
    let candidates: HashSet<DbId> = flat.iter().map(|n| n.node_id()).collect();
    assemble(flat, &candidates)
}

/// Rebuild the forest restricted to records whose display name contains
/// `keyword`, extended by every ancestor and every descendant of each match.
///
/// Matching is a case-sensitive substring test. An empty keyword disables
/// filtering entirely; a keyword with no matches yields an empty forest
/// with count 0 (no fallback to the full list).
pub fn build_filtered_forest<T>(flat: &[T], keyword: &str) -> Forest<T>
where
    T: HierarchyNode + Clone,
{
    if keyword.is_empty() {
        return build_forest(flat);
    }

    let matched: Vec<&T> = flat
        .iter()
        .filter(|n| n.display_name().contains(keyword))
        .collect();
    if matched.is_empty() {
        return Forest::empty();
    }

    let candidates = closure_of(flat, &matched);
    assemble(flat, &candidates)
}

/// Compute the ancestor/descendant closure of `matched` within `flat`.
///
/// The result is keyed by record id, so a record reached through several
/// matches is counted once. A `parent_id` that resolves to no record in the
/// list silently terminates the upward walk (the record is treated as a
/// root); a cyclic parent chain terminates on the first revisited id.
fn closure_of<T: HierarchyNode>(flat: &[T], matched: &[&T]) -> HashSet<DbId> {
    let by_id: HashMap<DbId, &T> = flat.iter().map(|n| (n.node_id(), n)).collect();
    let mut closure: HashSet<DbId> = HashSet::new();

    for node in matched {
        closure.insert(node.node_id());

        // Walk ancestors until a root, an unresolvable parent, or a cycle.
        let mut walked: HashSet<DbId> = HashSet::new();
        walked.insert(node.node_id());
        let mut current = node.parent_id();
        while let Some(pid) = current {
            if !walked.insert(pid) {
                break;
            }
            match by_id.get(&pid) {
                Some(parent) => {
                    closure.insert(pid);
                    current = parent.parent_id();
                }
                None => break,
            }
        }

        // Walk descendants breadth-first, guarding against revisits.
        let mut seen: HashSet<DbId> = HashSet::new();
        seen.insert(node.node_id());
        let mut queue: VecDeque<DbId> = VecDeque::new();
        queue.push_back(node.node_id());
        while let Some(id) = queue.pop_front() {
            for child in flat.iter().filter(|n| n.parent_id() == Some(id)) {
                if seen.insert(child.node_id()) {
                    closure.insert(child.node_id());
                    queue.push_back(child.node_id());
                }
            }
        }
    }

    closure
}

/// Assemble the nested forest from the candidate subset of `flat`.
fn assemble<T>(flat: &[T], candidates: &HashSet<DbId>) -> Forest<T>
where
    T: HierarchyNode + Clone,
{
    let top_level = flat
        .iter()
        .filter(|n| candidates.contains(&n.node_id()))
        .map(|n| n.level())
        .min();
    let Some(top_level) = top_level else {
        return Forest::empty();
    };

    let mut visited: HashSet<DbId> = HashSet::new();
    let mut list = Vec::new();
    for root in flat {
        if candidates.contains(&root.node_id())
            && root.level() == top_level
            && !visited.contains(&root.node_id())
        {
            list.push(attach_children(root, flat, candidates, &mut visited));
        }
    }

    Forest {
        list,
        count: candidates.len(),
    }
}

/// Recursively attach children drawn from the candidate set.
///
/// Recursion depth is bounded by the hierarchy depth for acyclic input;
/// the `visited` set turns a cyclic parent graph into a finite tree instead
/// of an infinite recursion. Candidate scans are linear per node, which is
/// fine at organizational-hierarchy scale.
fn attach_children<T>(
    node: &T,
    flat: &[T],
    candidates: &HashSet<DbId>,
    visited: &mut HashSet<DbId>,
) -> TreeNode<T>
where
    T: HierarchyNode + Clone,
{
    visited.insert(node.node_id());
    let mut children = Vec::new();
    for child in flat {
        if child.parent_id() == Some(node.node_id())
            && candidates.contains(&child.node_id())
            && !visited.contains(&child.node_id())
        {
            children.push(attach_children(child, flat, candidates, visited));
        }
    }
    TreeNode {
        record: node.clone(),
        children,
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
