pub mod camera_controller;
pub mod navigator;
pub mod walk_camera;

// Re-export main types
pub use camera_controller::CameraController;
pub use navigator::{CameraNavigator, NavigationRequest};
pub use walk_camera::{Camera, CameraPose, WalkCamera};
