//! # Gizmos
//!
//! Editing affordances drawn over the scene. The walkthrough carries a
//! single gizmo: the transform handle attached to the selected object while
//! editing mode is active.

pub mod transform_handle;

pub use transform_handle::{TransformHandle, TransformMode};
