use cgmath::Vector3;
use log::debug;

use crate::gfx::camera::navigator::{CameraNavigator, NavigationRequest};
use crate::gfx::gizmos::TransformHandle;
use crate::gfx::picking::{Ray, RayHit};
use crate::gfx::scene::{NodeId, Scene};

use super::registry::{ObjectMetadata, ObjectRegistry, PictureData, VideoHandle};

/// How far beyond the floor hit point the arrival look-at is placed, along
/// the click ray. Must exceed the navigator's minimum look separation.
const LOOK_AHEAD: f32 = 1e-3;

/// Playback collaborator for video panels
pub trait VideoPlayback {
    fn play(&mut self, video: &VideoHandle);
    fn pause(&mut self, video: &VideoHandle);
}

/// Caller-supplied reaction to a picture panel click
pub type PictureClickCallback = Box<dyn Fn(&PictureData)>;

/// What a single click resolved to
///
/// A gesture resolves to exactly one variant; a floor hit never also
/// dispatches object actions.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ClickOutcome {
    /// The floor was hit and a camera transition started
    Navigate { destination: Vector3<f32> },
    /// A registered object was hit and its semantic action dispatched
    Select { object: NodeId },
    /// Miss, or geometry with no registered ancestor
    None,
}

/// Borrowed engine state the decision table operates on
pub struct ClickContext<'a> {
    pub scene: &'a Scene,
    pub registry: &'a mut ObjectRegistry,
    pub navigator: &'a mut CameraNavigator,
    pub transform_handle: &'a mut TransformHandle,
    pub floor_name: Option<&'a str>,
    pub eye_height: f32,
    pub edit_mode: bool,
    pub on_picture_click: Option<&'a PictureClickCallback>,
    pub video_playback: Option<&'a mut (dyn VideoPlayback + 'static)>,
}

/// Applies the click decision table to a targeting result
///
/// Priority order, first match wins:
/// 1. the leaf hit is the designated floor: fly the camera to the hit point
///    at eye height, looking slightly beyond it along the click ray;
/// 2. the leaf resolves to a registered object: attach the transform handle
///    while editing mode is active, then dispatch the metadata action
///    (picture callback, video play/pause toggle);
/// 3. anything else is a no-op.
///
/// Misses and metadata-less geometry are expected outcomes, never errors.
pub fn dispatch_click(ray: &Ray, hit: Option<RayHit>, ctx: ClickContext<'_>) -> ClickOutcome {
    let Some(hit) = hit else {
        return ClickOutcome::None;
    };

    // Floor branch: keyed on the leaf node's identity, not its metadata, so
    // a hall model whose floor was never registered still navigates
    if let (Some(floor_name), Some(node)) = (ctx.floor_name, ctx.scene.node(hit.node)) {
        if node.name == floor_name {
            let destination = Vector3::new(hit.point.x, ctx.eye_height, hit.point.z);
            let ahead = hit.point + ray.direction * LOOK_AHEAD;
            let look_at = Vector3::new(ahead.x, ctx.eye_height, ahead.z);

            debug!(
                "floor click at ({:.2}, {:.2}, {:.2}), navigating",
                hit.point.x, hit.point.y, hit.point.z
            );
            ctx.navigator.fly_to(NavigationRequest {
                destination,
                look_at,
                animate: true,
            });
            return ClickOutcome::Navigate { destination };
        }
    }

    // Object branch: resolve the leaf mesh to its logical object root
    if let Some(object) = ctx.registry.resolve_ancestor(ctx.scene, hit.node) {
        if ctx.edit_mode {
            ctx.transform_handle.attach(object);
        }

        match ctx.registry.metadata_mut(object) {
            Some(ObjectMetadata::Picture(data)) => {
                debug!("picture '{}' clicked", data.id);
                if let Some(callback) = ctx.on_picture_click {
                    callback(data);
                }
            }
            Some(ObjectMetadata::Video { handle, playing }) => {
                *playing = !*playing;
                debug!("video '{}' toggled, playing: {}", handle.0, *playing);
                if let Some(sink) = ctx.video_playback {
                    if *playing {
                        sink.play(handle);
                    } else {
                        sink.pause(handle);
                    }
                }
            }
            Some(ObjectMetadata::Floor) | Some(ObjectMetadata::None) | None => {}
        }
        return ClickOutcome::Select { object };
    }

    ClickOutcome::None
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gfx::camera::WalkCamera;
    use crate::gfx::scene::Node;
    use cgmath::InnerSpace;
    use std::cell::RefCell;
    use std::rc::Rc;

    struct RecordingSink {
        calls: Vec<String>,
    }

    impl VideoPlayback for RecordingSink {
        fn play(&mut self, video: &VideoHandle) {
            self.calls.push(format!("play:{}", video.0));
        }
        fn pause(&mut self, video: &VideoHandle) {
            self.calls.push(format!("pause:{}", video.0));
        }
    }

    struct Fixture {
        scene: Scene,
        registry: ObjectRegistry,
        navigator: CameraNavigator,
        handle: TransformHandle,
    }

    impl Fixture {
        fn new() -> Self {
            let camera =
                WalkCamera::new(Vector3::new(0.0, 2.0, 0.0), Vector3::new(2.0, 2.0, 2.0), 1.6);
            let mut navigator = CameraNavigator::new(camera);
            navigator.update(0.0);
            Self {
                scene: Scene::new(),
                registry: ObjectRegistry::new(),
                navigator,
                handle: TransformHandle::new(),
            }
        }

        fn ctx<'a>(
            &'a mut self,
            edit_mode: bool,
            on_picture_click: Option<&'a PictureClickCallback>,
            video_playback: Option<&'a mut (dyn VideoPlayback + 'static)>,
        ) -> ClickContext<'a> {
            ClickContext {
                scene: &self.scene,
                registry: &mut self.registry,
                navigator: &mut self.navigator,
                transform_handle: &mut self.handle,
                floor_name: Some("plane"),
                eye_height: 2.0,
                edit_mode,
                on_picture_click,
                video_playback,
            }
        }
    }

    fn downward_ray() -> Ray {
        Ray::new(Vector3::new(3.0, 5.0, 2.0), Vector3::new(0.0, -1.0, 0.0))
    }

    #[test]
    fn test_floor_hit_navigates_at_eye_height() {
        let mut fx = Fixture::new();
        let floor = fx.scene.add_child(fx.scene.root(), Node::new("plane"));
        let ray = downward_ray();
        let hit = RayHit {
            point: Vector3::new(3.0, 0.0, 2.0),
            distance: 5.0,
            node: floor,
        };

        let outcome = dispatch_click(&ray, Some(hit), fx.ctx(false, None, None));
        assert_eq!(
            outcome,
            ClickOutcome::Navigate {
                destination: Vector3::new(3.0, 2.0, 2.0)
            }
        );
        assert!(fx.navigator.is_animating());
    }

    #[test]
    fn test_picture_click_invokes_callback_once() {
        let mut fx = Fixture::new();
        let panel = fx.scene.add_child(fx.scene.root(), Node::new("panel"));
        fx.registry.register(
            panel,
            ObjectMetadata::Picture(PictureData {
                id: "p1".into(),
                url: "assets/p1.jpg".into(),
                title: None,
            }),
        );

        let clicked: Rc<RefCell<Vec<String>>> = Rc::new(RefCell::new(Vec::new()));
        let sink = clicked.clone();
        let callback: PictureClickCallback =
            Box::new(move |data| sink.borrow_mut().push(data.id.clone()));

        let ray = downward_ray();
        let hit = RayHit {
            point: Vector3::new(3.0, 1.5, 2.0),
            distance: 3.5,
            node: panel,
        };
        let outcome = dispatch_click(&ray, Some(hit), fx.ctx(false, Some(&callback), None));

        assert_eq!(outcome, ClickOutcome::Select { object: panel });
        assert_eq!(*clicked.borrow(), vec!["p1".to_string()]);
        // No editing mode, no attachment
        assert!(!fx.handle.is_attached());
    }

    #[test]
    fn test_video_click_toggles_and_forwards() {
        let mut fx = Fixture::new();
        let panel = fx.scene.add_child(fx.scene.root(), Node::new("video"));
        fx.registry.register(
            panel,
            ObjectMetadata::Video {
                handle: VideoHandle("v1".into()),
                playing: false,
            },
        );
        let mut sink = RecordingSink { calls: Vec::new() };

        let ray = downward_ray();
        let hit = RayHit {
            point: Vector3::new(3.0, 1.5, 2.0),
            distance: 3.5,
            node: panel,
        };

        dispatch_click(&ray, Some(hit), fx.ctx(false, None, Some(&mut sink)));
        assert_eq!(
            fx.registry.metadata(panel),
            Some(&ObjectMetadata::Video {
                handle: VideoHandle("v1".into()),
                playing: true,
            })
        );

        dispatch_click(&ray, Some(hit), fx.ctx(false, None, Some(&mut sink)));
        assert_eq!(
            fx.registry.metadata(panel),
            Some(&ObjectMetadata::Video {
                handle: VideoHandle("v1".into()),
                playing: false,
            })
        );
        assert_eq!(sink.calls, vec!["play:v1".to_string(), "pause:v1".to_string()]);
    }

    #[test]
    fn test_edit_mode_attaches_object_root() {
        let mut fx = Fixture::new();
        let panel = fx.scene.add_child(fx.scene.root(), Node::new("panel"));
        let leaf = fx.scene.add_child(panel, Node::new("frame"));
        fx.registry.register(panel, ObjectMetadata::None);

        let ray = downward_ray();
        let hit = RayHit {
            point: Vector3::new(0.0, 1.0, 0.0),
            distance: 1.0,
            node: leaf,
        };
        let outcome = dispatch_click(&ray, Some(hit), fx.ctx(true, None, None));

        assert_eq!(outcome, ClickOutcome::Select { object: panel });
        assert_eq!(fx.handle.attached(), Some(panel));
    }

    #[test]
    fn test_miss_is_a_noop() {
        let mut fx = Fixture::new();
        let ray = downward_ray();
        let outcome = dispatch_click(&ray, None, fx.ctx(true, None, None));

        assert_eq!(outcome, ClickOutcome::None);
        assert!(!fx.navigator.is_animating());
        assert!(!fx.handle.is_attached());
    }

    #[test]
    fn test_unregistered_geometry_is_a_noop() {
        let mut fx = Fixture::new();
        let bare = fx.scene.add_child(fx.scene.root(), Node::new("prop"));
        let ray = downward_ray();
        let hit = RayHit {
            point: Vector3::new(1.0, 0.5, 1.0),
            distance: 2.0,
            node: bare,
        };

        let outcome = dispatch_click(&ray, Some(hit), fx.ctx(true, None, None));
        assert_eq!(outcome, ClickOutcome::None);
        assert!(!fx.navigator.is_animating());
        assert!(!fx.handle.is_attached());
    }

    #[test]
    fn test_vertical_ray_still_produces_valid_look_at() {
        let mut fx = Fixture::new();
        let floor = fx.scene.add_child(fx.scene.root(), Node::new("plane"));
        // Straight-down ray: the look-ahead offset has no horizontal part,
        // so the navigator's separation floor must take over
        let ray = Ray::new(Vector3::new(3.0, 5.0, 2.0), Vector3::new(0.0, -1.0, 0.0));
        let hit = RayHit {
            point: Vector3::new(3.0, 0.0, 2.0),
            distance: 5.0,
            node: floor,
        };

        dispatch_click(&ray, Some(hit), fx.ctx(false, None, None));
        for _ in 0..600 {
            fx.navigator.update(1.0 / 60.0);
        }
        let pose = fx.navigator.pose();
        assert!((pose.target - pose.position).magnitude() > 0.0);
    }
}
