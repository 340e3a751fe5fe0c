use cgmath::{Matrix4, SquareMatrix};

use super::mesh::Mesh;

/// Stable handle to a node in the scene arena
///
/// Copyable and cheap to hash; handles to removed nodes resolve to `None`
/// on lookup rather than erroring.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(pub(crate) usize);

impl NodeId {
    /// Raw arena index, exposed for diagnostics and logging
    pub fn index(&self) -> usize {
        self.0
    }
}

/// A single scene graph node
///
/// Carries a display name (the hall model's floor is located by name), a
/// local transform relative to the parent, and an optional mesh payload.
pub struct Node {
    pub name: String,
    pub transform: Matrix4<f32>,
    pub mesh: Option<Mesh>,
    pub visible: bool,
    pub(crate) parent: Option<NodeId>,
    pub(crate) children: Vec<NodeId>,
}

impl Node {
    /// Create an empty node with identity transform
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            transform: Matrix4::identity(),
            mesh: None,
            visible: true,
            parent: None,
            children: Vec::new(),
        }
    }

    /// Attach a mesh payload
    pub fn with_mesh(mut self, mesh: Mesh) -> Self {
        self.mesh = Some(mesh);
        self
    }

    /// Set the local transform
    pub fn with_transform(mut self, transform: Matrix4<f32>) -> Self {
        self.transform = transform;
        self
    }

    /// Parent handle, `None` for the scene root
    pub fn parent(&self) -> Option<NodeId> {
        self.parent
    }

    /// Child handles in insertion order
    pub fn children(&self) -> &[NodeId] {
        &self.children
    }
}
