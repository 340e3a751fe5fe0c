use cgmath::{Matrix4, SquareMatrix};
use log::warn;

use super::node::{Node, NodeId};

/// Main scene containing the node hierarchy
///
/// Nodes live in a slot arena; removal frees the slot and every lookup on a
/// freed handle returns `None`. A root node is always present and cannot be
/// removed.
pub struct Scene {
    slots: Vec<Option<Node>>,
    free: Vec<usize>,
    root: NodeId,
}

impl Scene {
    /// Creates a new scene with an empty root node
    pub fn new() -> Self {
        let root = Node::new("scene");
        Self {
            slots: vec![Some(root)],
            free: Vec::new(),
            root: NodeId(0),
        }
    }

    /// Handle of the scene root
    pub fn root(&self) -> NodeId {
        self.root
    }

    /// Adds a node as a child of `parent`
    ///
    /// A vanished parent handle falls back to the root so a late asset
    /// completion can never orphan its subtree.
    pub fn add_child(&mut self, parent: NodeId, mut node: Node) -> NodeId {
        let parent = if self.node(parent).is_some() {
            parent
        } else {
            warn!(
                "parent node {} no longer exists, attaching '{}' to the scene root",
                parent.index(),
                node.name
            );
            self.root
        };

        node.parent = Some(parent);
        let id = match self.free.pop() {
            Some(index) => {
                self.slots[index] = Some(node);
                NodeId(index)
            }
            None => {
                self.slots.push(Some(node));
                NodeId(self.slots.len() - 1)
            }
        };

        if let Some(parent_node) = self.slot_mut(parent) {
            parent_node.children.push(id);
        }
        id
    }

    /// Immutable node access, `None` for removed or unknown handles
    pub fn node(&self, id: NodeId) -> Option<&Node> {
        self.slots.get(id.0).and_then(|slot| slot.as_ref())
    }

    /// Mutable node access
    pub fn node_mut(&mut self, id: NodeId) -> Option<&mut Node> {
        self.slot_mut(id)
    }

    /// Parent handle of `id`, `None` at the root or for stale handles
    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.node(id).and_then(|node| node.parent)
    }

    /// World transform of `id`: the product of local transforms from the
    /// root down. Stale handles yield identity.
    pub fn world_matrix(&self, id: NodeId) -> Matrix4<f32> {
        let mut matrix = match self.node(id) {
            Some(node) => node.transform,
            None => return Matrix4::identity(),
        };
        let mut current = self.parent(id);
        while let Some(ancestor) = current {
            if let Some(node) = self.node(ancestor) {
                matrix = node.transform * matrix;
                current = node.parent;
            } else {
                break;
            }
        }
        matrix
    }

    /// All nodes of the subtree rooted at `id`, inclusive, depth first
    pub fn descendants(&self, id: NodeId) -> Vec<NodeId> {
        let mut out = Vec::new();
        let mut stack = vec![id];
        while let Some(current) = stack.pop() {
            if let Some(node) = self.node(current) {
                out.push(current);
                stack.extend(node.children.iter().copied());
            }
        }
        out
    }

    /// Depth-first search for a node by name within the subtree at `within`
    ///
    /// This is how the hall floor is located after model load.
    pub fn find_by_name(&self, within: NodeId, name: &str) -> Option<NodeId> {
        self.descendants(within)
            .into_iter()
            .find(|id| self.node(*id).map(|n| n.name == name).unwrap_or(false))
    }

    /// Removes the subtree rooted at `id` and returns every removed handle
    ///
    /// The caller is responsible for dropping registry entries for the
    /// returned handles. Removing the root is refused.
    pub fn remove_subtree(&mut self, id: NodeId) -> Vec<NodeId> {
        if id == self.root {
            warn!("refusing to remove the scene root");
            return Vec::new();
        }

        let removed = self.descendants(id);
        if removed.is_empty() {
            return removed;
        }

        // Detach from the parent's child list first
        if let Some(parent) = self.parent(id) {
            if let Some(parent_node) = self.slot_mut(parent) {
                parent_node.children.retain(|child| *child != id);
            }
        }

        for node_id in &removed {
            self.slots[node_id.0] = None;
            self.free.push(node_id.0);
        }
        removed
    }

    /// Number of live nodes, including the root
    pub fn node_count(&self) -> usize {
        self.slots.iter().filter(|slot| slot.is_some()).count()
    }

    fn slot_mut(&mut self, id: NodeId) -> Option<&mut Node> {
        self.slots.get_mut(id.0).and_then(|slot| slot.as_mut())
    }
}

impl Default for Scene {
    fn default() -> Self {
        Self::new()
    }
}
