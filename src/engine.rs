use cgmath::Vector3;
use log::debug;

use crate::assets::{self, AssetError, HallParams, PictureItem, VideoItem};
use crate::gfx::camera::{CameraNavigator, NavigationRequest, WalkCamera};
use crate::gfx::gizmos::TransformHandle;
use crate::gfx::picking;
use crate::gfx::scene::{NodeId, Scene};
use crate::interact::dispatcher::{self, ClickContext, ClickOutcome, PictureClickCallback, VideoPlayback};
use crate::interact::gesture::{Gesture, GestureClassifier, DEFAULT_CLICK_THRESHOLD};
use crate::interact::registry::{ObjectRegistry, PictureData};

/// Tunable options recognized by [`Engine::new`]
pub struct EngineConfig {
    /// Initial camera eye position
    pub camera_position: Vector3<f32>,
    /// Initial camera look-at point
    pub camera_look_at: Vector3<f32>,
    /// Camera height above the floor during click-to-navigate travel
    pub eye_height: f32,
    /// Maximum side length of a picture/video panel quad
    pub max_panel_size: f32,
    /// Pixel distance separating a click from a drag
    pub click_threshold: f32,
    /// Whether clicking an object attaches the transform handle
    pub edit_mode: bool,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            camera_position: Vector3::new(0.0, 2.0, 0.0),
            camera_look_at: Vector3::new(2.0, 2.0, 2.0),
            eye_height: 2.0,
            max_panel_size: 3.0,
            click_threshold: DEFAULT_CLICK_THRESHOLD,
            edit_mode: false,
        }
    }
}

/// The interactive walkthrough engine
///
/// Owns the scene graph, object registry, gesture classifier, camera
/// navigator and transform handle as explicit per-instance state, so
/// multiple independent viewers can coexist in one process. The host shell
/// feeds it pointer and resize events and drives [`Engine::update`] once per
/// frame; everything else happens through the decision table in
/// [`crate::interact::dispatcher`].
pub struct Engine {
    scene: Scene,
    registry: ObjectRegistry,
    navigator: CameraNavigator,
    gesture: GestureClassifier,
    transform_handle: TransformHandle,
    floor_name: Option<String>,
    viewport: (u32, u32),
    eye_height: f32,
    max_panel_size: f32,
    edit_mode: bool,
    on_picture_click: Option<PictureClickCallback>,
    video_playback: Option<Box<dyn VideoPlayback>>,
}

impl Engine {
    pub fn new(config: EngineConfig) -> Self {
        let viewport = (1280, 720);
        let camera = WalkCamera::new(
            config.camera_position,
            config.camera_look_at,
            viewport.0 as f32 / viewport.1 as f32,
        );

        Self {
            scene: Scene::new(),
            registry: ObjectRegistry::new(),
            navigator: CameraNavigator::new(camera),
            gesture: GestureClassifier::new(config.click_threshold),
            transform_handle: TransformHandle::new(),
            floor_name: None,
            viewport,
            eye_height: config.eye_height,
            max_panel_size: config.max_panel_size,
            edit_mode: config.edit_mode,
            on_picture_click: None,
            video_playback: None,
        }
    }

    // Accessors

    pub fn scene(&self) -> &Scene {
        &self.scene
    }

    pub fn scene_mut(&mut self) -> &mut Scene {
        &mut self.scene
    }

    pub fn registry(&self) -> &ObjectRegistry {
        &self.registry
    }

    pub fn registry_mut(&mut self) -> &mut ObjectRegistry {
        &mut self.registry
    }

    pub fn camera(&self) -> &WalkCamera {
        self.navigator.camera()
    }

    pub fn navigator(&self) -> &CameraNavigator {
        &self.navigator
    }

    pub fn navigator_mut(&mut self) -> &mut CameraNavigator {
        &mut self.navigator
    }

    pub fn transform_handle(&self) -> &TransformHandle {
        &self.transform_handle
    }

    pub fn viewport_size(&self) -> (u32, u32) {
        self.viewport
    }

    // Configuration

    /// Names the walkable floor node for click-to-navigate travel
    pub fn set_floor_name(&mut self, name: impl Into<String>) {
        self.floor_name = Some(name.into());
    }

    pub fn set_edit_mode(&mut self, edit_mode: bool) {
        self.edit_mode = edit_mode;
        if !edit_mode {
            self.transform_handle.detach();
        }
    }

    /// Registers the reaction to a picture panel click
    pub fn set_on_picture_click<F>(&mut self, callback: F)
    where
        F: Fn(&PictureData) + 'static,
    {
        self.on_picture_click = Some(Box::new(callback));
    }

    /// Registers the video playback collaborator
    pub fn set_video_playback<P>(&mut self, playback: P)
    where
        P: VideoPlayback + 'static,
    {
        self.video_playback = Some(Box::new(playback));
    }

    // Frame loop

    /// Advances camera interpolation by `dt` seconds
    ///
    /// Returns whether the view changed and a re-render is warranted. Called
    /// unconditionally every frame by the host shell.
    pub fn update(&mut self, dt: f32) -> bool {
        self.navigator.update(dt)
    }

    /// Handles a viewport resize
    ///
    /// Idempotent and cheap: a notification that does not change the pixel
    /// size returns `false` without touching the projection.
    pub fn resize(&mut self, width: u32, height: u32) -> bool {
        if self.viewport == (width, height) {
            return false;
        }
        self.viewport = (width, height);
        self.navigator.camera_mut().resize_projection(width, height);
        debug!("viewport resized to {width}x{height}");
        true
    }

    // Pointer input

    /// Records the start of a pointer gesture, in viewport pixels
    pub fn on_pointer_down(&mut self, x: f32, y: f32) {
        self.gesture.pointer_down(x, y);
    }

    /// Completes a pointer gesture
    ///
    /// Drags (camera orbiting) produce `None`; clicks run the full
    /// targeting-and-dispatch pipeline and report what they resolved to.
    pub fn on_pointer_up(&mut self, x: f32, y: f32) -> Option<ClickOutcome> {
        match self.gesture.pointer_up(x, y) {
            Gesture::Drag => None,
            Gesture::Click => Some(self.handle_click(x, y)),
        }
    }

    /// Resolves a click at a viewport coordinate to exactly one effect
    pub fn handle_click(&mut self, x: f32, y: f32) -> ClickOutcome {
        let (width, height) = self.viewport;
        let ray = picking::screen_to_ray(
            (x, y),
            (width as f32, height as f32),
            self.navigator.camera(),
        );
        let candidates: Vec<NodeId> = self.registry.interactive_nodes().collect();
        let hit = picking::pick(&ray, &self.scene, candidates);

        dispatcher::dispatch_click(
            &ray,
            hit,
            ClickContext {
                scene: &self.scene,
                registry: &mut self.registry,
                navigator: &mut self.navigator,
                transform_handle: &mut self.transform_handle,
                floor_name: self.floor_name.as_deref(),
                eye_height: self.eye_height,
                edit_mode: self.edit_mode,
                on_picture_click: self.on_picture_click.as_ref(),
                video_playback: self.video_playback.as_deref_mut(),
            },
        )
    }

    /// Programmatic navigation trigger
    ///
    /// Keeps the current look direction while walking to the destination.
    pub fn move_to(&mut self, x: f32, y: f32, z: f32, animate: bool) {
        let destination = Vector3::new(x, y, z);
        let look_at = destination + self.navigator.camera().look_dir();
        self.navigator.fly_to(NavigationRequest {
            destination,
            look_at,
            animate,
        });
    }

    // Scene management

    /// Removes an object's subtree and drops every registry entry for it
    ///
    /// Also releases the transform handle when its target goes away, so no
    /// stale references accumulate anywhere.
    pub fn remove_object(&mut self, node: NodeId) {
        let removed = self.scene.remove_subtree(node);
        for id in &removed {
            self.registry.unregister(*id);
            if self.transform_handle.attached() == Some(*id) {
                self.transform_handle.detach();
            }
        }
    }

    // Asset loading

    /// Loads the exhibition hall model and registers its floor for
    /// click-to-navigate travel
    pub async fn load_hall(&mut self, params: HallParams) -> Result<NodeId, AssetError> {
        let floor_name = params.floor_name.clone();
        let hall = assets::load_hall(&mut self.scene, &mut self.registry, params).await?;
        self.floor_name = Some(floor_name);
        Ok(hall)
    }

    /// Loads a batch of picture panels, best effort
    pub async fn load_pictures(&mut self, items: Vec<PictureItem>) -> Vec<NodeId> {
        assets::load_pictures(&mut self.scene, &mut self.registry, self.max_panel_size, items)
            .await
    }

    /// Loads a batch of video panels, best effort
    pub async fn load_videos(&mut self, items: Vec<VideoItem>) -> Vec<NodeId> {
        assets::load_videos(&mut self.scene, &mut self.registry, self.max_panel_size, items).await
    }
}

impl Default for Engine {
    fn default() -> Self {
        Self::new(EngineConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gfx::geometry::{generate_floor_plane, generate_panel_quad};
    use crate::gfx::scene::{Mesh, Node};
    use crate::interact::registry::{ObjectMetadata, VideoHandle};
    use cgmath::{InnerSpace, Matrix4};
    use std::cell::RefCell;
    use std::rc::Rc;

    /// Engine with a 40x40 floor named "plane" and the camera at (3, 2, 5)
    /// looking at the floor point (3, 0, 2), so a viewport-center click
    /// lands exactly there.
    fn floor_engine() -> Engine {
        let mut engine = Engine::new(EngineConfig {
            camera_position: Vector3::new(3.0, 2.0, 5.0),
            camera_look_at: Vector3::new(3.0, 0.0, 2.0),
            ..EngineConfig::default()
        });

        let root = engine.scene().root();
        let floor = engine.scene_mut().add_child(
            root,
            Node::new("plane").with_mesh(Mesh::from_geometry(generate_floor_plane(
                40.0, 40.0, 1, 1,
            ))),
        );
        engine.registry_mut().register(floor, ObjectMetadata::Floor);
        engine.set_floor_name("plane");

        // Drain the initial-frame dirty flag
        engine.update(0.0);
        engine
    }

    fn center(engine: &Engine) -> (f32, f32) {
        let (w, h) = engine.viewport_size();
        (w as f32 / 2.0, h as f32 / 2.0)
    }

    fn settle(engine: &mut Engine) {
        for _ in 0..600 {
            engine.update(1.0 / 60.0);
        }
    }

    #[test]
    fn test_floor_click_navigates_to_hit_at_eye_height() {
        let mut engine = floor_engine();
        let (cx, cy) = center(&engine);

        engine.on_pointer_down(cx, cy);
        let outcome = engine.on_pointer_up(cx, cy).expect("click");

        match outcome {
            ClickOutcome::Navigate { destination } => {
                assert!((destination - Vector3::new(3.0, 2.0, 2.0)).magnitude() < 1e-2);
            }
            other => panic!("expected navigation, got {other:?}"),
        }

        settle(&mut engine);
        assert!((engine.camera().position - Vector3::new(3.0, 2.0, 2.0)).magnitude() < 1e-2);
    }

    #[test]
    fn test_drag_over_floor_does_not_navigate() {
        let mut engine = floor_engine();
        let (cx, cy) = center(&engine);
        let pose_before = engine.camera().pose();

        engine.on_pointer_down(cx, cy);
        assert_eq!(engine.on_pointer_up(cx + 40.0, cy + 40.0), None);

        settle(&mut engine);
        let pose_after = engine.camera().pose();
        assert!((pose_before.position - pose_after.position).magnitude() < 1e-6);
    }

    #[test]
    fn test_picture_click_fires_callback_once() {
        let mut engine = floor_engine();
        // Panel square directly in front of the camera's line of sight
        let root = engine.scene().root();
        let panel = engine.scene_mut().add_child(
            root,
            Node::new("panel")
                .with_mesh(Mesh::from_geometry(generate_panel_quad(2.0, 2.0)))
                .with_transform(Matrix4::from_translation(Vector3::new(3.0, 1.0, 3.0))),
        );
        engine.registry_mut().register(
            panel,
            ObjectMetadata::Picture(PictureData {
                id: "p1".into(),
                url: "assets/p1.jpg".into(),
                title: None,
            }),
        );

        let clicked: Rc<RefCell<Vec<String>>> = Rc::new(RefCell::new(Vec::new()));
        let sink = clicked.clone();
        engine.set_on_picture_click(move |data| sink.borrow_mut().push(data.id.clone()));

        let (cx, cy) = center(&engine);
        engine.on_pointer_down(cx, cy);
        let outcome = engine.on_pointer_up(cx, cy).expect("click");

        assert_eq!(outcome, ClickOutcome::Select { object: panel });
        assert_eq!(*clicked.borrow(), vec!["p1".to_string()]);
    }

    #[test]
    fn test_video_click_toggles_playing() {
        let mut engine = floor_engine();
        let root = engine.scene().root();
        let panel = engine.scene_mut().add_child(
            root,
            Node::new("video")
                .with_mesh(Mesh::from_geometry(generate_panel_quad(2.0, 2.0)))
                .with_transform(Matrix4::from_translation(Vector3::new(3.0, 1.0, 3.0))),
        );
        engine.registry_mut().register(
            panel,
            ObjectMetadata::Video {
                handle: VideoHandle("v1".into()),
                playing: false,
            },
        );

        let (cx, cy) = center(&engine);
        engine.handle_click(cx, cy);
        assert!(matches!(
            engine.registry().metadata(panel),
            Some(ObjectMetadata::Video { playing: true, .. })
        ));

        engine.handle_click(cx, cy);
        assert!(matches!(
            engine.registry().metadata(panel),
            Some(ObjectMetadata::Video { playing: false, .. })
        ));
    }

    #[test]
    fn test_miss_produces_no_effects() {
        let mut engine = floor_engine();
        let pose_before = engine.camera().pose();
        let (cx, _) = center(&engine);

        // Aim at the sky: top edge of the viewport
        engine.on_pointer_down(cx, 1.0);
        let outcome = engine.on_pointer_up(cx, 1.0).expect("click");

        assert_eq!(outcome, ClickOutcome::None);
        assert!(!engine.transform_handle().is_attached());
        settle(&mut engine);
        let pose_after = engine.camera().pose();
        assert!((pose_before.position - pose_after.position).magnitude() < 1e-6);
        assert!((pose_before.target - pose_after.target).magnitude() < 1e-6);
    }

    #[test]
    fn test_edit_mode_attaches_clicked_panel() {
        let mut engine = floor_engine();
        engine.set_edit_mode(true);
        let root = engine.scene().root();
        let panel = engine.scene_mut().add_child(
            root,
            Node::new("panel")
                .with_mesh(Mesh::from_geometry(generate_panel_quad(2.0, 2.0)))
                .with_transform(Matrix4::from_translation(Vector3::new(3.0, 1.0, 3.0))),
        );
        engine.registry_mut().register(panel, ObjectMetadata::None);

        let (cx, cy) = center(&engine);
        engine.handle_click(cx, cy);
        assert_eq!(engine.transform_handle().attached(), Some(panel));

        // Leaving edit mode releases the affordance
        engine.set_edit_mode(false);
        assert!(!engine.transform_handle().is_attached());
    }

    #[test]
    fn test_resize_is_idempotent() {
        let mut engine = floor_engine();
        assert!(engine.resize(800, 600));
        let aspect = engine.camera().aspect;

        assert!(!engine.resize(800, 600));
        assert_eq!(engine.camera().aspect, aspect);
    }

    #[test]
    fn test_move_to_supersedes_click_navigation() {
        let mut engine = floor_engine();
        let (cx, cy) = center(&engine);
        engine.handle_click(cx, cy);
        engine.move_to(-5.0, 2.0, -5.0, true);

        settle(&mut engine);
        assert!((engine.camera().position - Vector3::new(-5.0, 2.0, -5.0)).magnitude() < 1e-2);
    }

    #[test]
    fn test_remove_object_clears_registry_and_handle() {
        let mut engine = floor_engine();
        engine.set_edit_mode(true);
        let root = engine.scene().root();
        let panel = engine.scene_mut().add_child(
            root,
            Node::new("panel")
                .with_mesh(Mesh::from_geometry(generate_panel_quad(2.0, 2.0)))
                .with_transform(Matrix4::from_translation(Vector3::new(3.0, 1.0, 3.0))),
        );
        engine.registry_mut().register(panel, ObjectMetadata::None);

        let (cx, cy) = center(&engine);
        engine.handle_click(cx, cy);
        assert_eq!(engine.transform_handle().attached(), Some(panel));

        engine.remove_object(panel);
        assert!(engine.scene().node(panel).is_none());
        assert!(engine.registry().metadata(panel).is_none());
        assert!(!engine.transform_handle().is_attached());

        // A repeat click on the vacated spot falls through to the floor
        assert!(matches!(
            engine.handle_click(cx, cy),
            ClickOutcome::Navigate { .. }
        ));
    }
}
