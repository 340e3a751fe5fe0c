//! # Interaction
//!
//! Everything between a raw pointer event and a semantic effect: the
//! click-vs-drag classifier, the registry mapping scene nodes to logical
//! object metadata, and the dispatcher that turns a resolved hit into
//! exactly one of floor navigation, editing attachment, or a callback.

pub mod dispatcher;
pub mod gesture;
pub mod registry;

pub use dispatcher::{ClickOutcome, VideoPlayback};
pub use gesture::{Gesture, GestureClassifier};
pub use registry::{ObjectMetadata, ObjectRegistry, PictureData, VideoHandle};
