//! # Graphics Module
//!
//! Spatial state and queries for the walkthrough: camera systems, scene
//! graph, ray targeting, procedural panel geometry, and the transform
//! handle. Actual drawing is delegated to an external rendering
//! collaborator through [`RenderBackend`].
//!
//! ## Architecture Overview
//!
//! - **Camera System** ([`camera`]) - walkthrough camera with damped fly-to
//!   navigation
//! - **Scene Graph** ([`scene`]) - node hierarchy with parent/child links
//! - **Ray Targeting** ([`picking`]) - viewport coordinate to scene
//!   intersection queries
//! - **Geometry** ([`geometry`]) - procedural floor and panel surfaces
//! - **Gizmos** ([`gizmos`]) - transform handle editing affordance

pub mod camera;
pub mod geometry;
pub mod gizmos;
pub mod picking;
pub mod scene;

use camera::WalkCamera;
use scene::Scene;

/// Drawing collaborator interface
///
/// The engine owns what to draw (scene, camera) and when (the update tick's
/// changed flag); how pixels get on screen is the backend's concern. The
/// engine never assumes a particular graphics API.
pub trait RenderBackend {
    /// Adjust the drawable surface to a new pixel size
    fn resize(&mut self, width: u32, height: u32);

    /// Draw one frame of the scene from the camera's pose
    fn render(&mut self, scene: &Scene, camera: &WalkCamera);
}
