use cgmath::{InnerSpace, Vector3};
use winit::{
    dpi::PhysicalPosition,
    event::{DeviceEvent, ElementState, MouseScrollDelta},
    window::Window,
};

use super::navigator::CameraNavigator;

/// Pitch is kept just short of straight up/down so the view matrix never
/// degenerates against the world up vector.
const PITCH_LIMIT: f32 = std::f32::consts::FRAC_PI_2 - 0.01;

/// Continuous pointer-drag input for the walkthrough camera
///
/// Dragging turns the viewer's head (yaw/pitch of the look target around the
/// eye); the scroll wheel drives the navigator's zoom. Click-vs-drag
/// classification is handled separately by the gesture classifier; this
/// controller only applies continuous motion.
pub struct CameraController {
    pub rotate_speed: f32,
    pub zoom_speed: f32,
    is_mouse_pressed: bool,
}

impl CameraController {
    pub fn new(rotate_speed: f32, zoom_speed: f32) -> Self {
        Self {
            rotate_speed,
            zoom_speed,
            is_mouse_pressed: false,
        }
    }

    pub fn process_events(
        &mut self,
        event: &DeviceEvent,
        window: &Window,
        navigator: &mut CameraNavigator,
    ) {
        match event {
            DeviceEvent::Button {
                button: 0, // Left Mouse Button
                state,
            } => {
                self.is_mouse_pressed = *state == ElementState::Pressed;
            }
            DeviceEvent::MouseWheel { delta, .. } => {
                let scroll_amount = -match delta {
                    MouseScrollDelta::LineDelta(_, scroll) => scroll * 1.0,
                    MouseScrollDelta::PixelDelta(PhysicalPosition { y: scroll, .. }) => {
                        *scroll as f32
                    }
                };
                navigator.zoom_by(-scroll_amount * self.zoom_speed);
                window.request_redraw();
            }
            DeviceEvent::MouseMotion { delta } => {
                if self.is_mouse_pressed {
                    self.turn_look_direction(
                        navigator,
                        -delta.0 as f32 * self.rotate_speed,
                        -delta.1 as f32 * self.rotate_speed,
                    );
                    window.request_redraw();
                }
            }
            _ => (),
        }
    }

    /// Returns true while a drag-look is in progress
    pub fn is_rotating(&self) -> bool {
        self.is_mouse_pressed
    }

    /// Rotates the look target around the eye by yaw/pitch deltas in radians
    fn turn_look_direction(&self, navigator: &mut CameraNavigator, d_yaw: f32, d_pitch: f32) {
        let camera = navigator.camera_mut();
        let offset = camera.target - camera.position;
        let radius = offset.magnitude().max(1e-6);

        let mut yaw = offset.x.atan2(offset.z);
        let mut pitch = (offset.y / radius).clamp(-1.0, 1.0).asin();

        yaw += d_yaw;
        pitch = (pitch + d_pitch).clamp(-PITCH_LIMIT, PITCH_LIMIT);

        camera.target = camera.position
            + Vector3::new(
                radius * yaw.sin() * pitch.cos(),
                radius * pitch.sin(),
                radius * yaw.cos() * pitch.cos(),
            );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gfx::camera::walk_camera::WalkCamera;

    #[test]
    fn test_turn_preserves_eye_and_radius() {
        let camera = WalkCamera::new(Vector3::new(0.0, 2.0, 0.0), Vector3::new(0.0, 2.0, 3.0), 1.0);
        let mut navigator = CameraNavigator::new(camera);
        let controller = CameraController::new(0.005, 0.1);

        let eye_before = navigator.camera().position;
        let radius_before =
            (navigator.camera().target - navigator.camera().position).magnitude();

        controller.turn_look_direction(&mut navigator, 0.3, 0.1);

        let eye_after = navigator.camera().position;
        let radius_after = (navigator.camera().target - navigator.camera().position).magnitude();
        assert_eq!(eye_before, eye_after);
        assert!((radius_before - radius_after).abs() < 1e-4);
    }

    #[test]
    fn test_pitch_clamped_short_of_vertical() {
        let camera = WalkCamera::new(Vector3::new(0.0, 2.0, 0.0), Vector3::new(0.0, 2.0, 3.0), 1.0);
        let mut navigator = CameraNavigator::new(camera);
        let controller = CameraController::new(0.005, 0.1);

        // Crank pitch far past vertical
        for _ in 0..100 {
            controller.turn_look_direction(&mut navigator, 0.0, 0.5);
        }
        let offset = navigator.camera().target - navigator.camera().position;
        let pitch = (offset.y / offset.magnitude()).asin();
        assert!(pitch <= PITCH_LIMIT + 1e-4);
    }
}
