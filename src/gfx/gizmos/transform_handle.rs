use cgmath::{Matrix4, Vector3};
use log::debug;

use crate::gfx::scene::{NodeId, Scene};

/// Editing operation the handle currently applies
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransformMode {
    Translate,
    Rotate,
    Scale,
}

/// On-screen transform gizmo for interactive object editing
///
/// At most one object is attached at a time; attaching a new target
/// implicitly releases the previous one. Drawing the handle is the rendering
/// collaborator's concern; this type owns the attachment state and applies
/// edits to the attached node.
pub struct TransformHandle {
    attached: Option<NodeId>,
    pub mode: TransformMode,
}

impl TransformHandle {
    pub fn new() -> Self {
        Self {
            attached: None,
            mode: TransformMode::Translate,
        }
    }

    /// Attaches the handle to `node`, releasing any previous target
    pub fn attach(&mut self, node: NodeId) {
        if let Some(previous) = self.attached {
            if previous != node {
                debug!(
                    "transform handle moving from node {} to node {}",
                    previous.index(),
                    node.index()
                );
            }
        }
        self.attached = Some(node);
    }

    /// Releases the current target, returning it
    pub fn detach(&mut self) -> Option<NodeId> {
        self.attached.take()
    }

    pub fn attached(&self) -> Option<NodeId> {
        self.attached
    }

    pub fn is_attached(&self) -> bool {
        self.attached.is_some()
    }

    /// Translates the attached node by `delta` in its parent's space
    ///
    /// A stale or missing attachment is silently released.
    pub fn translate_attached(&mut self, scene: &mut Scene, delta: Vector3<f32>) {
        let Some(id) = self.attached else { return };
        match scene.node_mut(id) {
            Some(node) => {
                node.transform = Matrix4::from_translation(delta) * node.transform;
            }
            None => {
                self.attached = None;
            }
        }
    }
}

impl Default for TransformHandle {
    fn default() -> Self {
        Self::new()
    }
}
