//! # Procedural Geometry Generation
//!
//! This module provides functions to generate the flat primitive shapes the
//! walkthrough scene is assembled from, eliminating the need for external
//! model files for floors and panel surfaces.
//!
//! ## Supported Primitives
//!
//! - **Floor plane**: horizontal plane in the XZ plane, normal pointing up
//! - **Panel quad**: vertical quad in the XY plane, used for picture and
//!   video surfaces
//!
//! ## Usage
//!
//! ```rust
//! use galleria::gfx::geometry::{generate_floor_plane, generate_panel_quad};
//!
//! // Generate a 20x20 floor with 4 subdivisions per side
//! let floor = generate_floor_plane(20.0, 20.0, 4, 4);
//!
//! // Generate a 1.6x0.9 panel surface
//! let panel = generate_panel_quad(1.6, 0.9);
//! ```

pub mod primitives;

pub use primitives::*;

/// Represents generated geometry data ready for mesh construction
#[derive(Debug, Clone)]
pub struct GeometryData {
    /// Vertex positions (x, y, z)
    pub vertices: Vec<[f32; 3]>,
    /// Texture coordinates (u, v)
    pub tex_coords: Vec<[f32; 2]>,
    /// Normal vectors (x, y, z)
    pub normals: Vec<[f32; 3]>,
    /// Triangle indices (counter-clockwise winding)
    pub indices: Vec<u32>,
}

impl GeometryData {
    /// Create a new empty geometry data structure
    pub fn new() -> Self {
        Self {
            vertices: Vec::new(),
            tex_coords: Vec::new(),
            normals: Vec::new(),
            indices: Vec::new(),
        }
    }

    /// Get the number of vertices in this geometry
    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    /// Get the number of triangles in this geometry
    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }
}

impl Default for GeometryData {
    fn default() -> Self {
        Self::new()
    }
}
