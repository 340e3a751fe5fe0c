use cgmath::*;

/// Minimum eye-to-target separation. Below this the look direction becomes
/// degenerate and the view matrix collapses.
pub const MIN_LOOK_SEPARATION: f32 = 1e-4;

pub trait Camera: Sized {
    fn build_view_projection_matrix(&self) -> Matrix4<f32>;
}

/// The camera's eye position and look-at point
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CameraPose {
    pub position: Vector3<f32>,
    pub target: Vector3<f32>,
}

/// First-person walkthrough camera
///
/// Unlike an orbit camera there is no pivot distance; the eye walks the hall
/// and the target is a point it looks at. Zoom narrows the field of view
/// rather than dollying the eye.
#[derive(Debug, Clone, Copy)]
pub struct WalkCamera {
    pub position: Vector3<f32>,
    pub target: Vector3<f32>,
    pub up: Vector3<f32>,
    pub aspect: f32,
    pub fovy: Rad<f32>,
    pub znear: f32,
    pub zfar: f32,
    pub zoom: f32,
}

impl Camera for WalkCamera {
    fn build_view_projection_matrix(&self) -> Matrix4<f32> {
        let eye = Point3::from_vec(self.position);
        let target = Point3::from_vec(self.target);
        let view = Matrix4::look_at_rh(eye, target, self.up);
        let proj = perspective(self.effective_fovy(), self.aspect, self.znear, self.zfar);
        proj * view
    }
}

impl WalkCamera {
    pub fn new(position: Vector3<f32>, target: Vector3<f32>, aspect: f32) -> Self {
        let mut camera = Self {
            position,
            target,
            up: Vector3::unit_y(),
            aspect,
            fovy: Rad(std::f32::consts::PI / 3.0),
            znear: 0.1,
            zfar: 1000.0,
            zoom: 1.0,
        };
        camera.enforce_separation();
        camera
    }

    /// Field of view after applying the zoom factor
    pub fn effective_fovy(&self) -> Rad<f32> {
        Rad(self.fovy.0 / self.zoom.max(f32::EPSILON))
    }

    pub fn pose(&self) -> CameraPose {
        CameraPose {
            position: self.position,
            target: self.target,
        }
    }

    pub fn set_pose(&mut self, pose: CameraPose) {
        self.position = pose.position;
        self.target = pose.target;
        self.enforce_separation();
    }

    /// Unit look direction; falls back to -Z while the pose is degenerate
    pub fn look_dir(&self) -> Vector3<f32> {
        let dir = self.target - self.position;
        if dir.magnitude2() < MIN_LOOK_SEPARATION * MIN_LOOK_SEPARATION {
            -Vector3::unit_z()
        } else {
            dir.normalize()
        }
    }

    pub fn resize_projection(&mut self, width: u32, height: u32) {
        self.aspect = width as f32 / height.max(1) as f32;
    }

    /// Pushes the target away from the eye when the two would coincide
    pub(crate) fn enforce_separation(&mut self) {
        let dir = self.target - self.position;
        if dir.magnitude2() < MIN_LOOK_SEPARATION * MIN_LOOK_SEPARATION {
            self.target = self.position + self.look_dir() * MIN_LOOK_SEPARATION;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_degenerate_pose_is_separated() {
        let mut camera = WalkCamera::new(Vector3::new(1.0, 2.0, 3.0), Vector3::new(1.0, 2.0, 3.0), 1.0);
        assert!((camera.target - camera.position).magnitude() >= MIN_LOOK_SEPARATION * 0.999);

        camera.set_pose(CameraPose {
            position: Vector3::new(0.0, 0.0, 0.0),
            target: Vector3::new(0.0, 0.0, 0.0),
        });
        assert!((camera.target - camera.position).magnitude() >= MIN_LOOK_SEPARATION * 0.999);
    }

    #[test]
    fn test_zoom_narrows_fov() {
        let mut camera = WalkCamera::new(Vector3::new(0.0, 2.0, 0.0), Vector3::new(2.0, 2.0, 2.0), 1.6);
        let wide = camera.effective_fovy();
        camera.zoom = 2.0;
        assert!(camera.effective_fovy().0 < wide.0);
    }

    #[test]
    fn test_resize_updates_aspect() {
        let mut camera = WalkCamera::new(Vector3::new(0.0, 2.0, 0.0), Vector3::new(2.0, 2.0, 2.0), 1.0);
        camera.resize_projection(1920, 1080);
        assert!((camera.aspect - 1920.0 / 1080.0).abs() < 1e-6);
    }
}
