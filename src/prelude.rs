//! # Galleria Prelude
//!
//! This module provides a convenient way to import commonly used types from
//! the walkthrough engine. It's designed to reduce boilerplate imports in
//! typical integrations.
//!
//! ## Usage
//!
//! ```rust
//! use galleria::prelude::*;
//! ```
//!
//! This brings all essential types into scope, allowing you to write:
//!
//! ```no_run
//! use galleria::prelude::*;
//!
//! fn main() -> anyhow::Result<()> {
//!     let mut app = galleria::default();
//!
//!     app.load_hall(HallParams {
//!         url: "assets/hall.obj".into(),
//!         transform: AssetTransform::default(),
//!         floor_name: "plane".into(),
//!         on_progress: None,
//!     })?;
//!
//!     app.engine().set_on_picture_click(|picture| {
//!         println!("opened {}", picture.id);
//!     });
//!
//!     app.run();
//!     Ok(())
//! }
//! ```

// Re-export core application types
pub use crate::app::GalleriaApp;
pub use crate::default;
pub use crate::engine::{Engine, EngineConfig};

// Re-export graphics and scene types
pub use crate::gfx::camera::{CameraNavigator, CameraPose, NavigationRequest, WalkCamera};
pub use crate::gfx::geometry::{generate_floor_plane, generate_panel_quad, GeometryData};
pub use crate::gfx::gizmos::{TransformHandle, TransformMode};
pub use crate::gfx::picking::{Ray, RayHit};
pub use crate::gfx::scene::{Mesh, Node, NodeId, Scene};
pub use crate::gfx::RenderBackend;

// Re-export interaction types
pub use crate::interact::{
    ClickOutcome, Gesture, GestureClassifier, ObjectMetadata, ObjectRegistry, PictureData,
    VideoHandle, VideoPlayback,
};

// Re-export asset loading types
pub use crate::assets::{
    AssetError, AssetTransform, HallParams, PictureItem, VideoItem,
};

// Re-export common external dependencies
pub use cgmath::{InnerSpace, Vector3, Zero};
