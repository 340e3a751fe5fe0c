use std::sync::Arc;
use std::time::Instant;

use winit::{
    application::ApplicationHandler,
    dpi::PhysicalSize,
    event::{ElementState, MouseButton, WindowEvent},
    event_loop::{ActiveEventLoop, ControlFlow, EventLoop},
    window::{Window, WindowAttributes},
};

use crate::assets::{AssetError, HallParams, PictureItem, VideoItem};
use crate::engine::{Engine, EngineConfig};
use crate::gfx::camera::camera_controller::CameraController;
use crate::gfx::scene::NodeId;
use crate::gfx::RenderBackend;

pub struct GalleriaApp {
    event_loop: Option<EventLoop<()>>,
    app_state: AppState,
}

struct AppState {
    window: Option<Arc<Window>>,
    render_backend: Option<Box<dyn RenderBackend>>,
    engine: Engine,
    controller: CameraController,
    cursor: (f32, f32),
    last_frame: Option<Instant>,
}

impl GalleriaApp {
    /// Create a new walkthrough application with default settings
    pub fn new() -> Self {
        Self::with_config(EngineConfig::default())
    }

    /// Create a new walkthrough application with the given engine options
    pub fn with_config(config: EngineConfig) -> Self {
        let _ = env_logger::try_init();
        let event_loop = EventLoop::new().expect("Failed to create event loop");

        Self {
            event_loop: Some(event_loop),
            app_state: AppState {
                window: None,
                render_backend: None,
                engine: Engine::new(config),
                controller: CameraController::new(0.005, 0.1),
                cursor: (0.0, 0.0),
                last_frame: None,
            },
        }
    }

    /// Access the engine for configuration and scene setup
    pub fn engine(&mut self) -> &mut Engine {
        &mut self.app_state.engine
    }

    /// Install the rendering collaborator that draws each frame
    pub fn set_render_backend<B>(&mut self, backend: B)
    where
        B: RenderBackend + 'static,
    {
        self.app_state.render_backend = Some(Box::new(backend));
    }

    /// Load the exhibition hall model, blocking until it is registered
    pub fn load_hall(&mut self, params: HallParams) -> Result<NodeId, AssetError> {
        pollster::block_on(self.app_state.engine.load_hall(params))
    }

    /// Load a batch of picture panels, blocking until the batch settles
    pub fn load_pictures(&mut self, items: Vec<PictureItem>) -> Vec<NodeId> {
        pollster::block_on(self.app_state.engine.load_pictures(items))
    }

    /// Load a batch of video panels, blocking until the batch settles
    pub fn load_videos(&mut self, items: Vec<VideoItem>) -> Vec<NodeId> {
        pollster::block_on(self.app_state.engine.load_videos(items))
    }

    /// Run the application (consumes self and starts the event loop)
    pub fn run(mut self) {
        let event_loop = self.event_loop.take().expect("Event loop already consumed");
        event_loop.set_control_flow(ControlFlow::Poll);

        event_loop
            .run_app(&mut self.app_state)
            .expect("Failed to run event loop");
    }
}

impl Default for GalleriaApp {
    fn default() -> Self {
        Self::new()
    }
}

impl ApplicationHandler for AppState {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() {
            return;
        }

        if let Ok(window) = event_loop.create_window(
            WindowAttributes::default().with_inner_size(winit::dpi::LogicalSize::new(1200, 800)),
        ) {
            let window_handle = Arc::new(window);
            let (width, height) = window_handle.inner_size().into();

            self.engine.resize(width, height);
            if let Some(backend) = self.render_backend.as_mut() {
                backend.resize(width, height);
            }
            self.window = Some(window_handle);
        }
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        _window_id: winit::window::WindowId,
        event: WindowEvent,
    ) {
        let Some(window) = self.window.as_ref() else {
            return;
        };

        match event {
            WindowEvent::KeyboardInput {
                event:
                    winit::event::KeyEvent {
                        physical_key: winit::keyboard::PhysicalKey::Code(key_code),
                        ..
                    },
                ..
            } => {
                if matches!(key_code, winit::keyboard::KeyCode::Escape) {
                    event_loop.exit();
                }
            }
            WindowEvent::CursorMoved { position, .. } => {
                self.cursor = (position.x as f32, position.y as f32);
            }
            WindowEvent::MouseInput {
                state,
                button: MouseButton::Left,
                ..
            } => {
                let (x, y) = self.cursor;
                match state {
                    ElementState::Pressed => self.engine.on_pointer_down(x, y),
                    ElementState::Released => {
                        if self.engine.on_pointer_up(x, y).is_some() {
                            window.request_redraw();
                        }
                    }
                }
            }
            WindowEvent::Resized(PhysicalSize { width, height }) => {
                if self.engine.resize(width, height) {
                    if let Some(backend) = self.render_backend.as_mut() {
                        backend.resize(width, height);
                    }
                    window.request_redraw();
                }
            }
            WindowEvent::ScaleFactorChanged { .. } => {
                // The new physical size arrives in a follow-up Resized event
                window.request_redraw();
            }
            WindowEvent::CloseRequested => {
                event_loop.exit();
            }
            WindowEvent::RedrawRequested => {
                let now = Instant::now();
                let dt = self
                    .last_frame
                    .map(|last| now.saturating_duration_since(last).as_secs_f32())
                    .unwrap_or(1.0 / 60.0);
                self.last_frame = Some(now);

                if self.engine.update(dt) {
                    if let Some(backend) = self.render_backend.as_mut() {
                        backend.render(self.engine.scene(), self.engine.camera());
                    }
                }
            }
            _ => (),
        }
    }

    fn device_event(
        &mut self,
        _event_loop: &ActiveEventLoop,
        _device_id: winit::event::DeviceId,
        event: winit::event::DeviceEvent,
    ) {
        let Some(window) = self.window.as_ref() else {
            return;
        };

        self.controller
            .process_events(&event, window, self.engine.navigator_mut());
    }

    fn about_to_wait(&mut self, _event_loop: &ActiveEventLoop) {
        if let Some(ref window) = self.window {
            window.request_redraw();
        }
    }
}
