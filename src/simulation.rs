//! Simulation builder and runner

use std::sync::Arc;

use winit::{
    application::ApplicationHandler,
    dpi::LogicalSize,
    event::{DeviceEvent, DeviceId, ElementState, WindowEvent},
    event_loop::{ActiveEventLoop, ControlFlow, EventLoop},
    keyboard::{KeyCode, PhysicalKey},
    window::{CursorGrabMode, Window, WindowId},
};

use crate::animation::Task;
use crate::error::SimulationError;
use crate::gpu::{Camera, GpuState};
use crate::input::Input;
use crate::particle::ReportedPosition;
use crate::scene::Scene;
use crate::time::Time;
use crate::world::{World, SCATTERED_COUNT};

const DEFAULT_TITLE: &str = "Physics-Based Animation";
const DEFAULT_SIZE: (u32, u32) = (800, 600);
const DEFAULT_TIME_SCALE: f32 = 1.5;
/// How often the window title is refreshed with the frame rate, in frames.
const TITLE_REFRESH_FRAMES: u64 = 30;

/// A bouncing-particle simulation builder.
///
/// Use method chaining to configure, then call `.run()` to start.
///
/// ```ignore
/// use particle_bounce::prelude::*;
///
/// Simulation::new()
///     .with_task(Task::Collection)
///     .with_time_scale(1.5)
///     .run()?;
/// ```
pub struct Simulation {
    title: String,
    size: (u32, u32),
    task: Task,
    time_scale: f32,
    reported: ReportedPosition,
    world: Option<World>,
    camera: Camera,
}

impl Simulation {
    /// Create a new simulation with default settings.
    pub fn new() -> Self {
        Self {
            title: DEFAULT_TITLE.to_string(),
            size: DEFAULT_SIZE,
            task: Task::default(),
            time_scale: DEFAULT_TIME_SCALE,
            reported: ReportedPosition::default(),
            world: None,
            camera: Camera::default(),
        }
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    /// Set the window size in logical pixels.
    pub fn with_size(mut self, width: u32, height: u32) -> Self {
        self.size = (width, height);
        self
    }

    /// Choose which exercise to animate.
    pub fn with_task(mut self, task: Task) -> Self {
        self.task = task;
        self
    }

    /// Speed up (> 1) or slow down (< 1) the animation clock.
    pub fn with_time_scale(mut self, scale: f32) -> Self {
        self.time_scale = scale;
        self
    }

    /// Choose what particles report on the frame they hit the plane.
    pub fn with_reported_position(mut self, reported: ReportedPosition) -> Self {
        self.reported = reported;
        self
    }

    /// Animate these particles instead of a randomly scattered set.
    pub fn with_world(mut self, world: World) -> Self {
        self.world = Some(world);
        self
    }

    pub fn with_camera(mut self, camera: Camera) -> Self {
        self.camera = camera;
        self
    }

    fn validate(&self) -> Result<(), SimulationError> {
        if !self.time_scale.is_finite() || self.time_scale < 0.0 {
            return Err(SimulationError::InvalidTimeScale(self.time_scale));
        }
        Ok(())
    }

    /// Build the scene this configuration describes.
    pub fn build_scene(&mut self) -> Scene {
        let world = self
            .world
            .take()
            .unwrap_or_else(|| World::scattered(&mut rand::thread_rng(), SCATTERED_COUNT));
        Scene::new(self.task, world, self.reported)
    }

    /// Run the simulation. This blocks until the window is closed.
    pub fn run(mut self) -> Result<(), SimulationError> {
        self.validate()?;
        let scene = self.build_scene();
        log::info!(
            "Starting task {} ({:?}) with {} particle(s)",
            self.task.number(),
            self.task,
            scene.meshes().count() - 1
        );

        let mut time = Time::new();
        time.set_time_scale(self.time_scale);
        let context = FrameContext {
            camera: self.camera,
            input: Input::new(),
            time,
        };

        let event_loop = EventLoop::new()?;
        event_loop.set_control_flow(ControlFlow::Poll);

        let mut app = App::new(self.title, self.size, scene, context);
        event_loop.run_app(&mut app)?;

        match app.error.take() {
            Some(e) => Err(e),
            None => Ok(()),
        }
    }
}

impl Default for Simulation {
    fn default() -> Self {
        Self::new()
    }
}

/// Per-run state shared by the update and render steps.
pub struct FrameContext {
    pub camera: Camera,
    pub input: Input,
    pub time: Time,
}

impl FrameContext {
    /// Turn this frame's input into camera motion.
    pub fn apply_input(&mut self) {
        let dt = self.time.delta();
        for movement in self.input.movements() {
            self.camera.process_keyboard(movement, dt);
        }

        // Screen y grows downward, pitch grows upward
        let delta = self.input.mouse_delta();
        if delta != glam::Vec2::ZERO {
            self.camera.process_mouse_movement(delta.x, -delta.y);
        }

        let scroll = self.input.scroll_delta();
        if scroll != 0.0 {
            self.camera.process_mouse_scroll(scroll);
        }
    }
}

struct App {
    title: String,
    size: (u32, u32),
    window: Option<Arc<Window>>,
    gpu_state: Option<GpuState>,
    scene: Scene,
    context: FrameContext,
    error: Option<SimulationError>,
}

impl App {
    fn new(title: String, size: (u32, u32), scene: Scene, context: FrameContext) -> Self {
        Self {
            title,
            size,
            window: None,
            gpu_state: None,
            scene,
            context,
            error: None,
        }
    }

    fn init(&mut self, event_loop: &ActiveEventLoop) -> Result<(), SimulationError> {
        let window_attrs = Window::default_attributes()
            .with_title(self.title.as_str())
            .with_inner_size(LogicalSize::new(self.size.0, self.size.1))
            .with_resizable(false);

        let window = Arc::new(event_loop.create_window(window_attrs)?);
        grab_cursor(&window);

        let capacity = self.scene.meshes().count();
        let gpu_state = pollster::block_on(GpuState::new(window.clone(), capacity))?;

        self.window = Some(window);
        self.gpu_state = Some(gpu_state);
        // The first frame is time zero
        self.context.time.restart();
        Ok(())
    }

    fn frame(&mut self, event_loop: &ActiveEventLoop) {
        let (Some(window), Some(gpu_state)) = (&self.window, &mut self.gpu_state) else {
            return;
        };

        let current_time = self.context.time.update();
        self.context.apply_input();

        let bounces = self.scene.update(current_time, self.context.time.delta());
        if bounces > 0 {
            log::debug!("t={:.3}s: {} bounce(s)", current_time, bounces);
        }

        let view_proj = self.context.camera.view_proj(gpu_state.aspect());
        let instances = self.scene.instances();
        match gpu_state.render(view_proj, &instances) {
            Ok(()) => {}
            Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => gpu_state.reconfigure(),
            Err(wgpu::SurfaceError::OutOfMemory) => {
                log::error!("GPU out of memory, exiting");
                event_loop.exit();
            }
            Err(e) => log::warn!("Render error: {:?}", e),
        }

        self.context.input.end_frame();

        let frame = self.context.time.frame();
        if frame % TITLE_REFRESH_FRAMES == 0 {
            window.set_title(&format!("{} - {:.0} FPS", self.title, self.context.time.fps()));
        }
        window.request_redraw();
    }
}

/// Hide the cursor and keep it in the window for mouse look.
fn grab_cursor(window: &Window) {
    let grabbed = window
        .set_cursor_grab(CursorGrabMode::Locked)
        .or_else(|_| window.set_cursor_grab(CursorGrabMode::Confined));
    if let Err(e) = grabbed {
        log::warn!("Could not grab cursor: {}", e);
    }
    window.set_cursor_visible(false);
}

impl ApplicationHandler for App {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_none() {
            if let Err(e) = self.init(event_loop) {
                self.error = Some(e);
                event_loop.exit();
            }
        }
    }

    fn window_event(&mut self, event_loop: &ActiveEventLoop, _id: WindowId, event: WindowEvent) {
        self.context.input.handle_event(&event);

        match event {
            WindowEvent::CloseRequested => {
                event_loop.exit();
            }
            WindowEvent::KeyboardInput { event: key, .. }
                if key.physical_key == PhysicalKey::Code(KeyCode::Escape)
                    && key.state == ElementState::Pressed =>
            {
                event_loop.exit();
            }
            WindowEvent::Resized(physical_size) => {
                if let Some(gpu_state) = &mut self.gpu_state {
                    gpu_state.resize(physical_size);
                }
            }
            WindowEvent::RedrawRequested => self.frame(event_loop),
            _ => {}
        }
    }

    fn device_event(&mut self, _event_loop: &ActiveEventLoop, _id: DeviceId, event: DeviceEvent) {
        if let DeviceEvent::MouseMotion { delta } = event {
            self.context.input.handle_mouse_motion(delta);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::particle::Particle;
    use crate::world::GRAVITY;
    use glam::Vec3;

    #[test]
    fn test_builder_defaults() {
        let mut sim = Simulation::new();
        assert_eq!(sim.title, DEFAULT_TITLE);
        assert_eq!(sim.time_scale, 1.5);
        let scene = sim.build_scene();
        assert_eq!(scene.task(), Task::Collection);
        assert_eq!(scene.world().len(), SCATTERED_COUNT);
    }

    #[test]
    fn test_rejects_bad_time_scale() {
        for scale in [-0.5, f32::NAN, f32::INFINITY] {
            let sim = Simulation::new().with_time_scale(scale);
            assert!(matches!(sim.validate(), Err(SimulationError::InvalidTimeScale(_))));
        }
        assert!(Simulation::new().with_time_scale(0.0).validate().is_ok());
    }

    #[test]
    fn test_builder_uses_given_world() {
        let world = World::from_particles(vec![Particle::new(Vec3::Y, Vec3::ZERO, GRAVITY)]);
        let mut sim = Simulation::new()
            .with_task(Task::SingleBounce)
            .with_world(world)
            .with_reported_position(ReportedPosition::Unclamped);
        let scene = sim.build_scene();
        assert_eq!(scene.task(), Task::SingleBounce);
        assert_eq!(scene.world().len(), 1);
        assert_eq!(
            scene.world().particles()[0].reported_position(),
            ReportedPosition::Unclamped
        );
    }

    #[test]
    fn test_context_applies_movement_with_scaled_delta() {
        let mut context = FrameContext {
            camera: Camera::default(),
            input: Input::new(),
            time: Time::new(),
        };
        context.time.set_time_scale(2.0);
        context.time.advance(0.5);
        context.input.press(KeyCode::KeyW);
        context.input.press(KeyCode::ArrowLeft);

        context.apply_input();
        let expected = Vec3::new(-6.0, 5.0, 14.0);
        assert!((context.camera.position - expected).length() < 1e-4);
    }

    #[test]
    fn test_context_mouse_up_pitches_up() {
        let mut context = FrameContext {
            camera: Camera::default(),
            input: Input::new(),
            time: Time::new(),
        };
        context.input.handle_mouse_motion((0.0, -40.0));
        context.apply_input();
        assert_eq!(context.camera.pitch, 10.0);
    }
}
