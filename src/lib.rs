// src/lib.rs
//! Galleria Walkthrough Engine
//!
//! An interactive 3D exhibition-hall walkthrough built on winit and cgmath:
//! click the floor to travel there, click panels to open pictures or toggle
//! videos, drag to look around.

pub mod app;
pub mod assets;
pub mod engine;
pub mod gfx;
pub mod interact;
pub mod prelude;

// Re-export main types for convenience
pub use app::GalleriaApp;
pub use engine::{Engine, EngineConfig};

/// Creates a default Galleria application instance
pub fn default() -> GalleriaApp {
    GalleriaApp::new()
}
