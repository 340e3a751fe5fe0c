use std::collections::HashMap;

use log::debug;

use crate::gfx::scene::{NodeId, Scene};

/// Authored data attached to a picture panel
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PictureData {
    pub id: String,
    pub url: String,
    pub title: Option<String>,
}

/// Opaque handle forwarded to the video playback collaborator
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VideoHandle(pub String);

/// Semantic metadata carried by an interactive object
///
/// Exactly one variant per registered node. `playing` is mutated only by the
/// action dispatcher.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ObjectMetadata {
    Picture(PictureData),
    Video { handle: VideoHandle, playing: bool },
    Floor,
    /// Ray-targetable but without semantic payload
    None,
}

/// Side table mapping scene nodes to their logical-object metadata
///
/// Ray intersection reports the *leaf* mesh that was hit (one polygon of a
/// picture frame, say), while metadata lives at the logical object root.
/// [`ObjectRegistry::resolve_ancestor`] bridges the two by walking the
/// parent chain. The registry holds node handles only, never nodes; entries
/// must be dropped when their node leaves the scene.
pub struct ObjectRegistry {
    entries: HashMap<NodeId, ObjectMetadata>,
}

impl ObjectRegistry {
    pub fn new() -> Self {
        Self {
            entries: HashMap::new(),
        }
    }

    /// Adds `node` to the interactive set with the given metadata
    ///
    /// Re-registering replaces the previous metadata.
    pub fn register(&mut self, node: NodeId, metadata: ObjectMetadata) {
        debug!("registering node {} as {:?}", node.index(), metadata);
        self.entries.insert(node, metadata);
    }

    /// Removes `node` from the interactive set
    pub fn unregister(&mut self, node: NodeId) {
        self.entries.remove(&node);
    }

    /// Metadata for `node`, if registered
    pub fn metadata(&self, node: NodeId) -> Option<&ObjectMetadata> {
        self.entries.get(&node)
    }

    /// Mutable metadata access, used by the dispatcher to toggle playback
    pub fn metadata_mut(&mut self, node: NodeId) -> Option<&mut ObjectMetadata> {
        self.entries.get_mut(&node)
    }

    /// The ray-target candidate set
    pub fn interactive_nodes(&self) -> impl Iterator<Item = NodeId> + '_ {
        self.entries.keys().copied()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Walks the parent chain from `node` (inclusive) to the nearest
    /// registered ancestor
    ///
    /// Returns `None` when no metadata-bearing ancestor exists before the
    /// scene root, and for detached or stale handles. Never panics.
    pub fn resolve_ancestor(&self, scene: &Scene, node: NodeId) -> Option<NodeId> {
        let mut current = Some(node);
        while let Some(id) = current {
            // A handle that no longer resolves to a live node ends the walk
            scene.node(id)?;
            if self.entries.contains_key(&id) {
                return Some(id);
            }
            current = scene.parent(id);
        }
        None
    }
}

impl Default for ObjectRegistry {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gfx::scene::Node;

    fn picture(id: &str) -> ObjectMetadata {
        ObjectMetadata::Picture(PictureData {
            id: id.into(),
            url: format!("assets/{id}.jpg"),
            title: None,
        })
    }

    #[test]
    fn test_resolve_leaf_to_object_root() {
        let mut scene = Scene::new();
        let panel = scene.add_child(scene.root(), Node::new("panel"));
        let frame = scene.add_child(panel, Node::new("frame"));
        let polygon = scene.add_child(frame, Node::new("polygon"));

        let mut registry = ObjectRegistry::new();
        registry.register(panel, picture("p1"));

        assert_eq!(registry.resolve_ancestor(&scene, polygon), Some(panel));
        // Inclusive of the node itself
        assert_eq!(registry.resolve_ancestor(&scene, panel), Some(panel));
    }

    #[test]
    fn test_resolve_without_metadata_is_none() {
        let mut scene = Scene::new();
        let bare = scene.add_child(scene.root(), Node::new("bare"));
        let registry = ObjectRegistry::new();
        assert_eq!(registry.resolve_ancestor(&scene, bare), None);
    }

    #[test]
    fn test_resolve_detached_node_is_none() {
        let mut scene = Scene::new();
        let panel = scene.add_child(scene.root(), Node::new("panel"));
        let mut registry = ObjectRegistry::new();
        registry.register(panel, picture("p1"));

        scene.remove_subtree(panel);
        // Even with a stale registry entry the walk ends cleanly
        assert_eq!(registry.resolve_ancestor(&scene, panel), None);
    }

    #[test]
    fn test_unregister_drops_entry() {
        let mut scene = Scene::new();
        let panel = scene.add_child(scene.root(), Node::new("panel"));
        let mut registry = ObjectRegistry::new();
        registry.register(panel, picture("p1"));
        assert_eq!(registry.len(), 1);

        registry.unregister(panel);
        assert!(registry.is_empty());
        assert_eq!(registry.resolve_ancestor(&scene, panel), None);
    }

    #[test]
    fn test_nearest_ancestor_wins() {
        let mut scene = Scene::new();
        let outer = scene.add_child(scene.root(), Node::new("outer"));
        let inner = scene.add_child(outer, Node::new("inner"));
        let leaf = scene.add_child(inner, Node::new("leaf"));

        let mut registry = ObjectRegistry::new();
        registry.register(outer, picture("outer"));
        registry.register(inner, picture("inner"));

        assert_eq!(registry.resolve_ancestor(&scene, leaf), Some(inner));
    }
}
