//! # Primitive Shape Generation
//!
//! Generators for the flat shapes the exhibition scene is built from.
//! All shapes are generated with proper normals and texture coordinates.

use super::GeometryData;

/// Generate a horizontal floor plane in the XZ plane (Y-up coordinate system)
///
/// # Arguments
/// * `width` - Extent of the plane along X
/// * `depth` - Extent of the plane along Z
/// * `width_segments` - Number of subdivisions along width
/// * `depth_segments` - Number of subdivisions along depth
///
/// Returns a plane centered at the origin with the normal pointing up
/// (positive Y), the orientation a walkable floor is expected to have.
pub fn generate_floor_plane(
    width: f32,
    depth: f32,
    width_segments: u32,
    depth_segments: u32,
) -> GeometryData {
    let mut data = GeometryData::new();

    let w_segs = width_segments.max(1);
    let d_segs = depth_segments.max(1);

    // Generate vertices
    for z in 0..=d_segs {
        let v = z as f32 / d_segs as f32;
        let pos_z = (v - 0.5) * depth;

        for x in 0..=w_segs {
            let u = x as f32 / w_segs as f32;
            let pos_x = (u - 0.5) * width;

            data.vertices.push([pos_x, 0.0, pos_z]);
            data.normals.push([0.0, 1.0, 0.0]);
            data.tex_coords.push([u, v]);
        }
    }

    // Generate indices (counter-clockwise winding when viewed from above)
    for z in 0..d_segs {
        for x in 0..w_segs {
            let i = z * (w_segs + 1) + x;
            let next_row = i + w_segs + 1;

            // First triangle
            data.indices.push(i);
            data.indices.push(next_row);
            data.indices.push(i + 1);

            // Second triangle
            data.indices.push(next_row);
            data.indices.push(next_row + 1);
            data.indices.push(i + 1);
        }
    }

    data
}

/// Generate a vertical panel quad in the XY plane
///
/// # Arguments
/// * `width` - Extent of the quad along X
/// * `height` - Extent of the quad along Y
///
/// Returns a single quad centered at the origin facing positive Z, the
/// orientation a wall-mounted picture or video surface is expected to have.
/// Position and rotation are applied through the owning node's transform.
pub fn generate_panel_quad(width: f32, height: f32) -> GeometryData {
    let mut data = GeometryData::new();

    let half_w = width * 0.5;
    let half_h = height * 0.5;

    data.vertices = vec![
        [-half_w, -half_h, 0.0],
        [half_w, -half_h, 0.0],
        [half_w, half_h, 0.0],
        [-half_w, half_h, 0.0],
    ];
    data.normals = vec![[0.0, 0.0, 1.0]; 4];
    data.tex_coords = vec![[0.0, 1.0], [1.0, 1.0], [1.0, 0.0], [0.0, 0.0]];

    // Two counter-clockwise triangles
    data.indices = vec![0, 1, 2, 2, 3, 0];

    data
}

/// Fit a source aspect ratio into a square of side `max_dimension`
///
/// Returns `(width, height)` such that the larger side equals
/// `max_dimension` and the source aspect ratio is preserved. Used to size
/// panel quads from decoded image dimensions.
pub fn fit_within(source_width: u32, source_height: u32, max_dimension: f32) -> (f32, f32) {
    let aspect = source_width.max(1) as f32 / source_height.max(1) as f32;
    if aspect >= 1.0 {
        (max_dimension, max_dimension / aspect)
    } else {
        (max_dimension * aspect, max_dimension)
    }
}
