//! # Asset Loading
//!
//! Sequences model, picture, and video loads and registers the resulting
//! nodes as interactive objects. Batch loads are best-effort: each panel is
//! an independent future, and a decode failure is logged and skipped
//! without aborting its siblings — a gallery with one broken image still
//! shows every other panel.

pub mod loader;

use thiserror::Error;

pub use loader::{load_hall, load_pictures, load_videos, AssetTransform, HallParams, PictureItem, VideoItem};

/// Failures raised while decoding or wiring an asset
///
/// Always isolated per asset: batch operations log these and continue.
#[derive(Debug, Error)]
pub enum AssetError {
    #[error("failed to decode model '{path}': {source}")]
    Model {
        path: String,
        #[source]
        source: tobj::LoadError,
    },

    #[error("failed to decode image '{path}': {source}")]
    Image {
        path: String,
        #[source]
        source: image::ImageError,
    },

    #[error("floor object '{name}' not found in hall model")]
    MissingFloor { name: String },
}
