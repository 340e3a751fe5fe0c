//! # Ray Targeting
//!
//! Converts 2D viewport coordinates into 3D spatial queries against the
//! scene. Clicking a panel or the floor starts here.
//!
//! ## How it works
//!
//! 1. **Screen to Ray**: the viewport coordinate is normalized to device
//!    coordinates (Y inverted) and unprojected through the inverse
//!    view-projection matrix into a world-space ray
//! 2. **Ray-Object Intersection**: the ray is tested against the world-space
//!    bounding boxes of every interactive node and its descendants
//! 3. **Targeting**: the nearest intersected leaf node and its hit point are
//!    reported; the caller resolves the leaf to a logical object
//!
//! A query that misses all geometry, or runs against an empty interactive
//! set, returns `None` — a valid outcome, not an error.

use cgmath::{ElementWise, InnerSpace, Matrix4, SquareMatrix, Vector3, Vector4};

use crate::gfx::{
    camera::walk_camera::{Camera, WalkCamera},
    scene::{NodeId, Scene},
};

/// A 3D ray for intersection testing
#[derive(Debug, Clone, Copy)]
pub struct Ray {
    /// Ray origin point in world space
    pub origin: Vector3<f32>,
    /// Ray direction (normalized)
    pub direction: Vector3<f32>,
}

impl Ray {
    /// Create a new ray
    pub fn new(origin: Vector3<f32>, direction: Vector3<f32>) -> Self {
        Self {
            origin,
            direction: direction.normalize(),
        }
    }

    /// Get a point along the ray at distance t
    pub fn point_at(&self, t: f32) -> Vector3<f32> {
        self.origin + self.direction * t
    }
}

/// Axis-aligned bounding box for intersection testing
#[derive(Debug, Clone, Copy)]
pub struct Aabb {
    /// Minimum corner of the bounding box
    pub min: Vector3<f32>,
    /// Maximum corner of the bounding box
    pub max: Vector3<f32>,
}

impl Aabb {
    /// Create a new AABB
    pub fn new(min: Vector3<f32>, max: Vector3<f32>) -> Self {
        Self { min, max }
    }

    /// Test ray-AABB intersection using the slab method
    /// Returns the distance to the intersection point, or None if no intersection
    pub fn intersect_ray(&self, ray: &Ray) -> Option<f32> {
        let inv_dir = Vector3::new(
            1.0 / ray.direction.x,
            1.0 / ray.direction.y,
            1.0 / ray.direction.z,
        );

        let t_min = (self.min - ray.origin).mul_element_wise(inv_dir);
        let t_max = (self.max - ray.origin).mul_element_wise(inv_dir);

        let t1 = Vector3::new(
            t_min.x.min(t_max.x),
            t_min.y.min(t_max.y),
            t_min.z.min(t_max.z),
        );
        let t2 = Vector3::new(
            t_min.x.max(t_max.x),
            t_min.y.max(t_max.y),
            t_min.z.max(t_max.z),
        );

        let t_near = t1.x.max(t1.y.max(t1.z));
        let t_far = t2.x.min(t2.y.min(t2.z));

        if t_near <= t_far && t_far >= 0.0 {
            Some(if t_near >= 0.0 { t_near } else { t_far })
        } else {
            None
        }
    }

    /// Apply a transformation matrix to the AABB
    pub fn transform(&self, matrix: &Matrix4<f32>) -> Self {
        // Transform all 8 corners and recompute the bounds
        let corners = [
            Vector3::new(self.min.x, self.min.y, self.min.z),
            Vector3::new(self.max.x, self.min.y, self.min.z),
            Vector3::new(self.min.x, self.max.y, self.min.z),
            Vector3::new(self.min.x, self.min.y, self.max.z),
            Vector3::new(self.max.x, self.max.y, self.min.z),
            Vector3::new(self.max.x, self.min.y, self.max.z),
            Vector3::new(self.min.x, self.max.y, self.max.z),
            Vector3::new(self.max.x, self.max.y, self.max.z),
        ];

        let mut min = Vector3::new(f32::MAX, f32::MAX, f32::MAX);
        let mut max = Vector3::new(f32::MIN, f32::MIN, f32::MIN);
        for corner in &corners {
            let homogeneous = Vector4::new(corner.x, corner.y, corner.z, 1.0);
            let transformed = matrix * homogeneous;
            let p = Vector3::new(
                transformed.x / transformed.w,
                transformed.y / transformed.w,
                transformed.z / transformed.w,
            );
            min.x = min.x.min(p.x);
            min.y = min.y.min(p.y);
            min.z = min.z.min(p.z);
            max.x = max.x.max(p.x);
            max.y = max.y.max(p.y);
            max.z = max.z.max(p.z);
        }

        Self::new(min, max)
    }
}

/// Result of a targeting query
#[derive(Debug, Clone, Copy)]
pub struct RayHit {
    /// World space intersection point
    pub point: Vector3<f32>,
    /// Distance from the ray origin to the intersection point
    pub distance: f32,
    /// The intersected leaf node
    pub node: NodeId,
}

/// Convert screen coordinates to a world-space ray
pub fn screen_to_ray(
    screen_pos: (f32, f32),
    screen_size: (f32, f32),
    camera: &WalkCamera,
) -> Ray {
    let (mouse_x, mouse_y) = screen_pos;
    let (screen_width, screen_height) = screen_size;

    // Normalized device coordinates (-1 to 1); screen Y grows downward while
    // device Y grows upward, so Y is flipped
    let ndc_x = (2.0 * mouse_x) / screen_width - 1.0;
    let ndc_y = 1.0 - (2.0 * mouse_y) / screen_height;

    let view_proj = camera.build_view_projection_matrix();
    let inv_view_proj = view_proj.invert().unwrap_or_else(Matrix4::identity);

    // Unproject the near and far plane points for that device coordinate
    let near_point = Vector4::new(ndc_x, ndc_y, -1.0, 1.0);
    let far_point = Vector4::new(ndc_x, ndc_y, 1.0, 1.0);

    let world_near = inv_view_proj * near_point;
    let world_far = inv_view_proj * far_point;

    let near_3d = Vector3::new(
        world_near.x / world_near.w,
        world_near.y / world_near.w,
        world_near.z / world_near.w,
    );
    let far_3d = Vector3::new(
        world_far.x / world_far.w,
        world_far.y / world_far.w,
        world_far.z / world_far.w,
    );

    Ray::new(near_3d, far_3d - near_3d)
}

/// Find the nearest mesh intersection among `candidates` and their descendants
///
/// `candidates` is the registry's interactive set; the hit reports the leaf
/// node whose mesh was intersected, which the caller resolves back to a
/// logical object through the registry's ancestor walk.
pub fn pick(
    ray: &Ray,
    scene: &Scene,
    candidates: impl IntoIterator<Item = NodeId>,
) -> Option<RayHit> {
    let mut closest: Option<RayHit> = None;

    for root in candidates {
        for id in scene.descendants(root) {
            let Some(node) = scene.node(id) else { continue };
            if !node.visible {
                continue;
            }
            let Some(mesh) = node.mesh.as_ref() else { continue };

            let (min, max) = mesh.bounds();
            let world_aabb = Aabb::new(min, max).transform(&scene.world_matrix(id));

            if let Some(distance) = world_aabb.intersect_ray(ray) {
                if closest.map_or(true, |hit| distance < hit.distance) {
                    closest = Some(RayHit {
                        point: ray.point_at(distance),
                        distance,
                        node: id,
                    });
                }
            }
        }
    }

    closest
}
