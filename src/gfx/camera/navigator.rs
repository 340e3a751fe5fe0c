use cgmath::{InnerSpace, Vector3};

use super::walk_camera::{CameraPose, WalkCamera, MIN_LOOK_SEPARATION};

/// Distance below which an in-flight interpolation snaps to its goal
const CONVERGENCE_EPS: f32 = 1e-4;

/// One requested camera transition. Never persisted; a newer request
/// supersedes an in-flight one.
#[derive(Debug, Clone, Copy)]
pub struct NavigationRequest {
    pub destination: Vector3<f32>,
    pub look_at: Vector3<f32>,
    pub animate: bool,
}

#[derive(Debug, Clone, Copy)]
struct SavedState {
    pose: CameraPose,
    zoom: f32,
}

/// Damped camera motion controller
///
/// Owns the live [`WalkCamera`] and interpolates it toward goal poses. The
/// interpolation state is advanced by [`CameraNavigator::update`] every frame
/// whether or not a transition is pending; transition requests only set
/// goals, which keeps retargeting free of discontinuities.
pub struct CameraNavigator {
    camera: WalkCamera,
    goal_position: Option<Vector3<f32>>,
    goal_target: Option<Vector3<f32>>,
    goal_zoom: Option<f32>,
    saved: Option<SavedState>,
    /// Exponential damping rate per second
    pub damping: f32,
    pub min_zoom: f32,
    pub max_zoom: f32,
    /// Set by snap-style mutations so the next update reports a change
    dirty: bool,
}

impl CameraNavigator {
    pub fn new(camera: WalkCamera) -> Self {
        Self {
            camera,
            goal_position: None,
            goal_target: None,
            goal_zoom: None,
            saved: None,
            damping: 8.0,
            min_zoom: 0.5,
            max_zoom: 5.0,
            dirty: true,
        }
    }

    pub fn camera(&self) -> &WalkCamera {
        &self.camera
    }

    pub fn camera_mut(&mut self) -> &mut WalkCamera {
        &mut self.camera
    }

    pub fn pose(&self) -> CameraPose {
        self.camera.pose()
    }

    /// Whether any interpolation is still in flight
    pub fn is_animating(&self) -> bool {
        self.goal_position.is_some() || self.goal_target.is_some() || self.goal_zoom.is_some()
    }

    /// Advances in-flight interpolation by `dt` seconds
    ///
    /// Returns whether the pose changed enough to warrant a re-render. Idle
    /// calls return `false` and mutate nothing, so the render loop can call
    /// this unconditionally and skip redundant frames.
    pub fn update(&mut self, dt: f32) -> bool {
        let mut changed = std::mem::take(&mut self.dirty);
        let t = 1.0 - (-self.damping * dt.max(0.0)).exp();

        if let Some(goal) = self.goal_position {
            let delta = goal - self.camera.position;
            if delta.magnitude() <= CONVERGENCE_EPS {
                self.camera.position = goal;
                self.goal_position = None;
            } else {
                self.camera.position += delta * t;
            }
            changed = true;
        }

        if let Some(goal) = self.goal_target {
            let delta = goal - self.camera.target;
            if delta.magnitude() <= CONVERGENCE_EPS {
                self.camera.target = goal;
                self.goal_target = None;
            } else {
                self.camera.target += delta * t;
            }
            changed = true;
        }

        if let Some(goal) = self.goal_zoom {
            let delta = goal - self.camera.zoom;
            if delta.abs() <= CONVERGENCE_EPS {
                self.camera.zoom = goal;
                self.goal_zoom = None;
            } else {
                self.camera.zoom += delta * t;
            }
            changed = true;
        }

        if changed {
            self.camera.enforce_separation();
        }
        changed
    }

    /// Begins a transition of the pose toward the request
    ///
    /// With `animate: false` the pose snaps immediately (one-frame
    /// convergence). Concurrent calls supersede the in-flight goal; the last
    /// call wins.
    pub fn fly_to(&mut self, request: NavigationRequest) {
        let look_at = separated_look_at(request.destination, request.look_at);
        if request.animate {
            self.goal_position = Some(request.destination);
            self.goal_target = Some(look_at);
        } else {
            self.camera.position = request.destination;
            self.camera.target = look_at;
            self.camera.enforce_separation();
            self.goal_position = None;
            self.goal_target = None;
            self.dirty = true;
        }
    }

    /// Interpolated zoom change, independent of any pose transition
    pub fn zoom_to(&mut self, factor: f32) {
        self.goal_zoom = Some(factor.clamp(self.min_zoom, self.max_zoom));
    }

    /// Relative zoom step, used by the wheel controller
    pub fn zoom_by(&mut self, delta: f32) {
        let base = self.goal_zoom.unwrap_or(self.camera.zoom);
        self.zoom_to(base + delta);
    }

    /// Snapshot the full pose and zoom for a later restore
    pub fn save_state(&mut self) {
        self.saved = Some(SavedState {
            pose: self.camera.pose(),
            zoom: self.camera.zoom,
        });
    }

    /// Recall the saved pose, cancelling any in-flight transition
    ///
    /// A restore with no prior save is a no-op.
    pub fn restore_state(&mut self) {
        if let Some(saved) = self.saved {
            self.camera.set_pose(saved.pose);
            self.camera.zoom = saved.zoom;
            self.goal_position = None;
            self.goal_target = None;
            self.goal_zoom = None;
            self.dirty = true;
        }
    }
}

/// Nudges a look-at point away from the destination when the two would
/// coincide, keeping the goal pose non-degenerate before it is ever applied
fn separated_look_at(destination: Vector3<f32>, look_at: Vector3<f32>) -> Vector3<f32> {
    let dir = look_at - destination;
    if dir.magnitude2() < MIN_LOOK_SEPARATION * MIN_LOOK_SEPARATION {
        destination - Vector3::unit_z() * MIN_LOOK_SEPARATION
    } else {
        look_at
    }
}
