//! Arena-backed allocation forest with copy-on-write snapshots.

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use generational_arena::{Arena, Index};
use tracing::instrument;

use crate::domain::entities::NodeId;

/// Immutable payload of a row in the allocation table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NodeData {
    /// Stable identifier, unique within the tree
    pub id: NodeId,
    /// Display name
    pub label: String,
}

impl fmt::Display for NodeData {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label)
    }
}

/// Tree node in the arena-based hierarchy structure.
#[derive(Debug, Clone)]
pub struct TreeNode {
    /// Identity and label, shared by every snapshot
    pub data: Arc<NodeData>,
    /// Current amount; derived from the children for internal nodes
    pub value: f64,
    /// Index of parent node in the arena, None for root nodes
    pub parent: Option<Index>,
    /// Indices of child nodes in the arena, in display order
    pub children: Vec<Index>,
}

impl TreeNode {
    pub fn is_leaf(&self) -> bool {
        self.children.is_empty()
    }

    pub fn id(&self) -> &NodeId {
        &self.data.id
    }
}

/// Arena-based forest holding one snapshot of the allocation table.
///
/// Cloning a `TreeArena` is cheap: nodes live behind `Arc` and the id index
/// and root list are shared. Writers go through [`TreeArena::node_mut`], which
/// copies a node only if another snapshot still references it, so two
/// snapshots share every node that was not rewritten in between.
#[derive(Debug, Clone)]
pub struct TreeArena {
    /// Arena storage for all tree nodes
    arena: Arena<Arc<TreeNode>>,
    /// Root nodes in display order
    roots: Arc<Vec<Index>>,
    /// Lookup from stable id to arena slot
    ids: Arc<HashMap<NodeId, Index>>,
}

impl Default for TreeArena {
    fn default() -> Self {
        Self::new()
    }
}

impl TreeArena {
    pub fn new() -> Self {
        Self {
            arena: Arena::new(),
            roots: Arc::new(Vec::new()),
            ids: Arc::new(HashMap::new()),
        }
    }

    /// Insert a node below `parent` (or as a new root) and return its index.
    ///
    /// The caller guarantees id uniqueness; the builder checks it before
    /// inserting.
    #[instrument(level = "trace", skip(self))]
    pub fn insert_node(&mut self, data: NodeData, value: f64, parent: Option<Index>) -> Index {
        let id = data.id.clone();
        let node = TreeNode {
            data: Arc::new(data),
            value,
            parent,
            children: Vec::new(),
        };
        let node_idx = self.arena.insert(Arc::new(node));

        if let Some(parent_idx) = parent {
            if let Some(parent) = self.node_mut(parent_idx) {
                parent.children.push(node_idx);
            }
        } else {
            Arc::make_mut(&mut self.roots).push(node_idx);
        }
        Arc::make_mut(&mut self.ids).insert(id, node_idx);

        node_idx
    }

    #[instrument(level = "trace", skip(self))]
    pub fn get_node(&self, idx: Index) -> Option<&TreeNode> {
        self.arena.get(idx).map(|node| node.as_ref())
    }

    /// Mutable access with copy-on-write semantics.
    #[instrument(level = "trace", skip(self))]
    pub fn node_mut(&mut self, idx: Index) -> Option<&mut TreeNode> {
        self.arena.get_mut(idx).map(Arc::make_mut)
    }

    #[instrument(level = "trace", skip(self))]
    pub fn index_of(&self, id: &NodeId) -> Option<Index> {
        self.ids.get(id).copied()
    }

    pub fn find(&self, id: &NodeId) -> Option<&TreeNode> {
        self.index_of(id).and_then(|idx| self.get_node(idx))
    }

    /// Current value of the node with `id`.
    pub fn value_of(&self, id: &NodeId) -> Option<f64> {
        self.find(id).map(|node| node.value)
    }

    pub fn roots(&self) -> &[Index] {
        &self.roots
    }

    pub fn len(&self) -> usize {
        self.arena.len()
    }

    pub fn is_empty(&self) -> bool {
        self.arena.is_empty()
    }

    /// True when both snapshots hold the very same allocation for `id`.
    pub fn shares_node_with(&self, other: &TreeArena, id: &NodeId) -> bool {
        match (
            self.index_of(id).and_then(|idx| self.arena.get(idx)),
            other.index_of(id).and_then(|idx| other.arena.get(idx)),
        ) {
            (Some(a), Some(b)) => Arc::ptr_eq(a, b),
            _ => false,
        }
    }

    /// Pre-order traversal over the whole forest, yielding the depth of each node.
    #[instrument(level = "trace", skip(self))]
    pub fn iter(&self) -> TreeIterator {
        TreeIterator::new(self)
    }

    #[instrument(level = "trace", skip(self))]
    pub fn iter_postorder(&self) -> PostOrderIterator {
        PostOrderIterator::new(self)
    }

    /// Collects the indices of all leaf nodes in display order.
    #[instrument(level = "debug", skip(self))]
    pub fn leaf_nodes(&self) -> Vec<Index> {
        self.iter()
            .filter(|(_, node, _)| node.is_leaf())
            .map(|(idx, _, _)| idx)
            .collect()
    }
}

pub struct TreeIterator<'a> {
    arena: &'a TreeArena,
    stack: Vec<(Index, usize)>,
}

impl<'a> TreeIterator<'a> {
    fn new(arena: &'a TreeArena) -> Self {
        // Push roots in reverse order for left-to-right traversal
        let stack = arena.roots().iter().rev().map(|&root| (root, 0)).collect();
        Self { arena, stack }
    }
}

impl<'a> Iterator for TreeIterator<'a> {
    type Item = (Index, &'a TreeNode, usize);

    fn next(&mut self) -> Option<Self::Item> {
        while let Some((current_idx, depth)) = self.stack.pop() {
            if let Some(node) = self.arena.get_node(current_idx) {
                for &child in node.children.iter().rev() {
                    self.stack.push((child, depth + 1));
                }
                return Some((current_idx, node, depth));
            }
        }
        None
    }
}

pub struct PostOrderIterator<'a> {
    arena: &'a TreeArena,
    stack: Vec<(Index, bool)>,
}

impl<'a> PostOrderIterator<'a> {
    fn new(arena: &'a TreeArena) -> Self {
        let stack = arena
            .roots()
            .iter()
            .rev()
            .map(|&root| (root, false))
            .collect();
        Self { arena, stack }
    }
}

impl<'a> Iterator for PostOrderIterator<'a> {
    type Item = (Index, &'a TreeNode);

    fn next(&mut self) -> Option<Self::Item> {
        while let Some((current_idx, visited)) = self.stack.pop() {
            if let Some(node) = self.arena.get_node(current_idx) {
                if !visited {
                    self.stack.push((current_idx, true));
                    for &child in node.children.iter().rev() {
                        self.stack.push((child, false));
                    }
                } else {
                    return Some((current_idx, node));
                }
            }
        }
        None
    }
}
