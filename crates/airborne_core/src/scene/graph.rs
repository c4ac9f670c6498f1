//! Arena-backed scene tree
//!
//! Nodes live in a slotmap; [`NodeId`] keys are stable across removals of
//! other nodes and double as the identity used to exclude self-collisions.
//! Parent links are plain keys, never a second ownership edge.

use slotmap::SlotMap;
use thiserror::Error;

use crate::foundation::math::Mat4;

use super::node::Node;

slotmap::new_key_type! {
    /// Stable, non-owning handle to a node in the scene arena
    pub struct NodeId;
}

/// Structural errors raised by tree mutation
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum SceneError {
    /// A node id did not resolve in the arena
    #[error("node id does not exist in this scene graph")]
    MissingNode,

    /// Attaching would make a node an ancestor of itself
    #[error("attach would create a cycle in the scene tree")]
    WouldCreateCycle,
}

/// The scene tree: arena of nodes plus a distinguished root
pub struct SceneGraph {
    nodes: SlotMap<NodeId, Node>,
    root: NodeId,
}

impl Default for SceneGraph {
    fn default() -> Self {
        Self::new()
    }
}

impl SceneGraph {
    /// Create a graph containing only an empty, non-collidable root
    pub fn new() -> Self {
        let mut nodes = SlotMap::with_key();
        let root = nodes.insert(Node::new().with_collidable(false));
        Self { nodes, root }
    }

    /// The root node id
    pub fn root(&self) -> NodeId {
        self.root
    }

    /// Number of nodes in the arena, root included
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Whether the arena holds only the root
    pub fn is_empty(&self) -> bool {
        self.nodes.len() <= 1
    }

    /// Whether `id` resolves to a live node
    pub fn contains(&self, id: NodeId) -> bool {
        self.nodes.contains_key(id)
    }

    /// Insert a standalone (root-less) node into the arena
    pub fn insert(&mut self, node: Node) -> NodeId {
        self.nodes.insert(node)
    }

    /// Insert a node and attach it under `parent` in one step
    pub fn spawn(&mut self, parent: NodeId, node: Node) -> Result<NodeId, SceneError> {
        let id = self.insert(node);
        self.attach(parent, id)?;
        Ok(id)
    }

    /// Shared access to a node
    pub fn get(&self, id: NodeId) -> Option<&Node> {
        self.nodes.get(id)
    }

    /// Exclusive access to a node
    pub fn get_mut(&mut self, id: NodeId) -> Option<&mut Node> {
        self.nodes.get_mut(id)
    }

    /// A node's parent, if any
    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.nodes.get(id).and_then(Node::parent)
    }

    /// A node's children in insertion order
    pub fn children(&self, id: NodeId) -> &[NodeId] {
        self.nodes.get(id).map_or(&[], Node::children)
    }

    /// Whether `node` is `ancestor` itself or sits below it
    fn is_self_or_descendant(&self, ancestor: NodeId, node: NodeId) -> bool {
        let mut current = Some(node);
        while let Some(id) = current {
            if id == ancestor {
                return true;
            }
            current = self.parent(id);
        }
        false
    }

    /// Attach `child` under `parent`, detaching it from any prior parent
    ///
    /// Reparenting is idempotent: a node is never owned by two parents.
    /// Attaching a node to itself or to one of its own descendants is
    /// rejected rather than corrupting the tree into a cycle.
    pub fn attach(&mut self, parent: NodeId, child: NodeId) -> Result<(), SceneError> {
        if !self.contains(parent) || !self.contains(child) {
            return Err(SceneError::MissingNode);
        }
        if self.is_self_or_descendant(child, parent) {
            return Err(SceneError::WouldCreateCycle);
        }

        if let Some(old_parent) = self.parent(child) {
            self.detach(old_parent, child);
        }

        self.nodes[parent].children.push(child);
        self.nodes[child].parent = Some(parent);
        Ok(())
    }

    /// Detach `child` from `parent`; a no-op when `child` is not actually a
    /// child of `parent`
    pub fn detach(&mut self, parent: NodeId, child: NodeId) {
        let Some(parent_node) = self.nodes.get_mut(parent) else {
            return;
        };
        let Some(index) = parent_node.children.iter().position(|&c| c == child) else {
            log::debug!("detach: {child:?} is not a child of {parent:?}, ignoring");
            return;
        };
        parent_node.children.remove(index);
        if let Some(child_node) = self.nodes.get_mut(child) {
            child_node.parent = None;
        }
    }

    /// Remove a node and its whole subtree from the arena
    pub fn remove(&mut self, id: NodeId) {
        if let Some(parent) = self.parent(id) {
            self.detach(parent, id);
        }
        for node in self.collect_descendants(id) {
            self.nodes.remove(node);
        }
    }

    /// Pre-order snapshot of `start` and everything below it
    ///
    /// Passes that mutate nodes while walking (integration, collision) iterate
    /// this snapshot instead of borrowing the tree during the walk.
    pub fn collect_descendants(&self, start: NodeId) -> Vec<NodeId> {
        let mut out = Vec::new();
        self.collect_into(start, &mut out);
        out
    }

    fn collect_into(&self, id: NodeId, out: &mut Vec<NodeId>) {
        if !self.contains(id) {
            return;
        }
        out.push(id);
        for &child in self.children(id) {
            self.collect_into(child, out);
        }
    }

    /// Depth-first traversal with pre- and post-order hooks
    ///
    /// `pre` runs before descending into a node's children, `post` after all
    /// of them have been visited. Sibling order is insertion order.
    pub fn traverse<Pre, Post>(&self, start: NodeId, pre: &mut Pre, post: &mut Post)
    where
        Pre: FnMut(NodeId, &Node),
        Post: FnMut(NodeId, &Node),
    {
        let Some(node) = self.nodes.get(start) else {
            return;
        };
        pre(start, node);
        for &child in &node.children {
            self.traverse(child, pre, post);
        }
        post(start, node);
    }

    /// Pre-order-only traversal convenience
    pub fn traverse_pre<F>(&self, start: NodeId, pre: &mut F)
    where
        F: FnMut(NodeId, &Node),
    {
        self.traverse(start, pre, &mut |_, _| {});
    }

    /// Reorder a node's children (e.g. back-to-front for transparency)
    ///
    /// Every child's components are synchronized before comparison, so the
    /// comparator can read transforms through [`Node::components`] without
    /// cloning. Subsequent traversals follow the new order.
    pub fn sort_children_by<F>(&mut self, parent: NodeId, mut compare: F)
    where
        F: FnMut(&Node, &Node) -> std::cmp::Ordering,
    {
        let Some(parent_node) = self.nodes.get_mut(parent) else {
            return;
        };
        let mut children = std::mem::take(&mut parent_node.children);
        for &child in &children {
            if let Some(node) = self.nodes.get_mut(child) {
                node.sync_components();
            }
        }
        children.sort_by(|&a, &b| compare(&self.nodes[a], &self.nodes[b]));
        self.nodes[parent].children = children;
    }

    /// World transform of a node: the product of every ancestor's local
    /// matrix down to the node itself
    ///
    /// Recomputed on every call by walking to the root; trees in this domain
    /// are shallow, so correctness is bought at O(depth) per query. A node
    /// with no parent returns its local matrix.
    pub fn world_matrix(&mut self, id: NodeId) -> Mat4 {
        if !self.contains(id) {
            log::warn!("world_matrix: {id:?} is not in the scene graph");
            return Mat4::identity();
        }

        let mut chain = Vec::new();
        let mut current = Some(id);
        while let Some(node) = current {
            chain.push(node);
            current = self.parent(node);
        }

        let mut world = Mat4::identity();
        for &node in chain.iter().rev() {
            world *= self.nodes[node].local_matrix();
        }
        world
    }
}
