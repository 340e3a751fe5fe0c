//! # Scene Graph
//!
//! Arena-backed scene graph for the walkthrough: nodes with parent/child
//! links, local transforms, and optional mesh payloads. Ray targeting walks
//! this hierarchy to find leaf meshes, and the object registry resolves leaf
//! hits back to the logical object root through the parent chain.

pub mod mesh;
pub mod node;
pub mod scene;

pub use mesh::Mesh;
pub use node::{Node, NodeId};
pub use scene::Scene;
