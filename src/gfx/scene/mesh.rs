use cgmath::Vector3;

use crate::gfx::geometry::GeometryData;

/// Triangle mesh payload of a scene node
///
/// Stores vertex data in CPU memory together with the local-space bounds
/// used by ray targeting. GPU upload is the rendering collaborator's concern.
pub struct Mesh {
    vertices: Vec<[f32; 3]>,
    normals: Vec<[f32; 3]>,
    tex_coords: Vec<[f32; 2]>,
    indices: Vec<u32>,
    bounds_min: Vector3<f32>,
    bounds_max: Vector3<f32>,
}

impl Mesh {
    /// Create a mesh from flat position/normal/index arrays as produced by
    /// OBJ decoding (three floats per vertex)
    pub fn new(positions: Vec<f32>, normals: Vec<f32>, indices: Vec<u32>) -> Self {
        let mut vertices = Vec::with_capacity(positions.len() / 3);
        let mut vertex_normals = Vec::with_capacity(positions.len() / 3);
        for i in 0..positions.len() / 3 {
            vertices.push([positions[i * 3], positions[i * 3 + 1], positions[i * 3 + 2]]);
            if normals.len() == positions.len() {
                vertex_normals.push([normals[i * 3], normals[i * 3 + 1], normals[i * 3 + 2]]);
            }
        }

        Self::from_arrays(vertices, vertex_normals, Vec::new(), indices)
    }

    /// Create a mesh from generated geometry
    pub fn from_geometry(data: GeometryData) -> Self {
        Self::from_arrays(data.vertices, data.normals, data.tex_coords, data.indices)
    }

    fn from_arrays(
        vertices: Vec<[f32; 3]>,
        normals: Vec<[f32; 3]>,
        tex_coords: Vec<[f32; 2]>,
        indices: Vec<u32>,
    ) -> Self {
        let (bounds_min, bounds_max) = compute_bounds(&vertices);
        Self {
            vertices,
            normals,
            tex_coords,
            indices,
            bounds_min,
            bounds_max,
        }
    }

    pub fn vertices(&self) -> &[[f32; 3]] {
        &self.vertices
    }

    pub fn normals(&self) -> &[[f32; 3]] {
        &self.normals
    }

    pub fn tex_coords(&self) -> &[[f32; 2]] {
        &self.tex_coords
    }

    pub fn indices(&self) -> &[u32] {
        &self.indices
    }

    pub fn vertex_count(&self) -> u32 {
        self.vertices.len() as u32
    }

    pub fn triangle_count(&self) -> u32 {
        self.indices.len() as u32 / 3
    }

    /// Local-space bounding box, precomputed at construction
    pub fn bounds(&self) -> (Vector3<f32>, Vector3<f32>) {
        (self.bounds_min, self.bounds_max)
    }
}

fn compute_bounds(vertices: &[[f32; 3]]) -> (Vector3<f32>, Vector3<f32>) {
    if vertices.is_empty() {
        return (Vector3::new(0.0, 0.0, 0.0), Vector3::new(0.0, 0.0, 0.0));
    }

    let mut min = Vector3::new(vertices[0][0], vertices[0][1], vertices[0][2]);
    let mut max = min;
    for v in vertices.iter().skip(1) {
        min.x = min.x.min(v[0]);
        min.y = min.y.min(v[1]);
        min.z = min.z.min(v[2]);
        max.x = max.x.max(v[0]);
        max.y = max.y.max(v[1]);
        max.z = max.z.max(v[2]);
    }
    (min, max)
}
