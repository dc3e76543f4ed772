//! Search tree for motion planners
//!
//! Nodes live in a flat arena and refer to each other by [`NodeId`]. A node
//! owns the ids of its children and keeps its parent id for walking back to
//! the root, so branching planners can attach any number of children to a
//! node without shared mutable pointers.

use crate::kinematics::{ControlInput, VehicleState};

/// Index of a node in its [`SearchTree`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct NodeId(pub usize);

/// A node in the motion search tree
#[derive(Debug, Clone, PartialEq)]
pub struct SearchNode {
    pub state: VehicleState,
    /// Input that produced `state` from the parent; `None` for a root
    pub input: Option<ControlInput>,
    pub parent: Option<NodeId>,
    pub children: Vec<NodeId>,
}

impl SearchNode {
    pub fn is_root(&self) -> bool {
        self.parent.is_none()
    }

    pub fn is_leaf(&self) -> bool {
        self.children.is_empty()
    }
}

/// Arena of search nodes
#[derive(Debug, Clone, Default)]
pub struct SearchTree {
    nodes: Vec<SearchNode>,
}

impl SearchTree {
    pub fn new() -> Self {
        Self { nodes: Vec::new() }
    }

    /// Add a node with no parent and no input
    pub fn add_root(&mut self, state: VehicleState) -> NodeId {
        self.push(SearchNode {
            state,
            input: None,
            parent: None,
            children: Vec::new(),
        })
    }

    /// Add a node reached from `parent` by applying `input`.
    ///
    /// # Panics
    /// If `parent` does not belong to this tree.
    pub fn add_child(&mut self, parent: NodeId, state: VehicleState, input: ControlInput) -> NodeId {
        assert!(parent.0 < self.nodes.len(), "unknown parent node {:?}", parent);
        let id = self.push(SearchNode {
            state,
            input: Some(input),
            parent: Some(parent),
            children: Vec::new(),
        });
        self.nodes[parent.0].children.push(id);
        id
    }

    fn push(&mut self, node: SearchNode) -> NodeId {
        self.nodes.push(node);
        NodeId(self.nodes.len() - 1)
    }

    pub fn node(&self, id: NodeId) -> Option<&SearchNode> {
        self.nodes.get(id.0)
    }

    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.node(id).and_then(|n| n.parent)
    }

    pub fn children(&self, id: NodeId) -> &[NodeId] {
        self.node(id).map(|n| n.children.as_slice()).unwrap_or(&[])
    }

    /// Node ids from the root down to `id`, empty if `id` is unknown
    pub fn path_ids(&self, id: NodeId) -> Vec<NodeId> {
        let mut ids = Vec::new();
        let mut current = self.node(id).map(|_| id);

        while let Some(index) = current {
            ids.push(index);
            current = self.parent(index);
        }

        ids.reverse();
        ids
    }

    /// States from the root down to `id`
    pub fn path_to(&self, id: NodeId) -> Vec<VehicleState> {
        self.path_ids(id)
            .into_iter()
            .filter_map(|i| self.node(i).map(|n| n.state))
            .collect()
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (NodeId, &SearchNode)> {
        self.nodes.iter().enumerate().map(|(i, n)| (NodeId(i), n))
    }

    pub fn clear(&mut self) {
        self.nodes.clear();
    }
}
