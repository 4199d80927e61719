//! Input handling.
//!
//! The `Input` struct tracks keyboard and mouse state from raw window
//! events, separating instantaneous events (key just pressed) from
//! continuous state (key held down). Mouse look uses raw device motion so
//! it keeps working while the cursor is grabbed.

use glam::Vec2;
use std::collections::HashSet;
use winit::event::{ElementState, MouseScrollDelta, WindowEvent};
use winit::keyboard::{KeyCode, PhysicalKey};

use crate::gpu::Movement;

/// Keys that drive the camera. Each movement has a letter and an arrow key.
const MOVEMENT_BINDINGS: [(KeyCode, KeyCode, Movement); 4] = [
    (KeyCode::KeyW, KeyCode::ArrowUp, Movement::Forward),
    (KeyCode::KeyS, KeyCode::ArrowDown, Movement::Backward),
    (KeyCode::KeyA, KeyCode::ArrowLeft, Movement::Left),
    (KeyCode::KeyD, KeyCode::ArrowRight, Movement::Right),
];

/// Pixels per line for touchpad-style scroll deltas.
const PIXELS_PER_LINE: f32 = 100.0;

/// Keyboard and mouse state for the current frame.
#[derive(Debug)]
pub struct Input {
    keys_held: HashSet<KeyCode>,
    keys_pressed: HashSet<KeyCode>,
    keys_released: HashSet<KeyCode>,

    mouse_delta: Vec2,
    scroll_delta: f32,

    focused: bool,
}

impl Input {
    /// Create a new input tracker.
    pub fn new() -> Self {
        Self {
            keys_held: HashSet::new(),
            keys_pressed: HashSet::new(),
            keys_released: HashSet::new(),
            mouse_delta: Vec2::ZERO,
            scroll_delta: 0.0,
            focused: true,
        }
    }

    /// Check if a key was pressed this frame (just went down).
    pub fn key_pressed(&self, key: KeyCode) -> bool {
        self.keys_pressed.contains(&key)
    }

    /// Check if a key is currently held down.
    pub fn key_held(&self, key: KeyCode) -> bool {
        self.keys_held.contains(&key)
    }

    /// Check if a key was released this frame.
    pub fn key_released(&self, key: KeyCode) -> bool {
        self.keys_released.contains(&key)
    }

    /// Mouse movement accumulated this frame, in pixels. Y grows downward.
    pub fn mouse_delta(&self) -> Vec2 {
        self.mouse_delta
    }

    /// Scroll accumulated this frame, in lines. Positive scrolls up.
    pub fn scroll_delta(&self) -> f32 {
        self.scroll_delta
    }

    /// Camera movements whose keys are currently held.
    pub fn movements(&self) -> impl Iterator<Item = Movement> + '_ {
        MOVEMENT_BINDINGS
            .iter()
            .filter(|(key, alt, _)| self.key_held(*key) || self.key_held(*alt))
            .map(|(_, _, movement)| *movement)
    }

    /// Clear per-frame state. Call once the frame has consumed its input.
    pub(crate) fn end_frame(&mut self) {
        self.keys_pressed.clear();
        self.keys_released.clear();
        self.mouse_delta = Vec2::ZERO;
        self.scroll_delta = 0.0;
    }

    /// Process a winit window event.
    pub(crate) fn handle_event(&mut self, event: &WindowEvent) {
        match event {
            WindowEvent::KeyboardInput { event, .. } => {
                if let PhysicalKey::Code(key) = event.physical_key {
                    match event.state {
                        ElementState::Pressed => self.press(key),
                        ElementState::Released => self.release(key),
                    }
                }
            }
            WindowEvent::MouseWheel { delta, .. } => {
                self.scroll_delta += match delta {
                    MouseScrollDelta::LineDelta(_, y) => *y,
                    MouseScrollDelta::PixelDelta(pos) => pos.y as f32 / PIXELS_PER_LINE,
                };
            }
            WindowEvent::Focused(focused) => self.set_focused(*focused),
            _ => {}
        }
    }

    /// Process raw mouse motion from a device event.
    pub(crate) fn handle_mouse_motion(&mut self, (dx, dy): (f64, f64)) {
        if self.focused {
            self.mouse_delta += Vec2::new(dx as f32, dy as f32);
        }
    }

    pub(crate) fn press(&mut self, key: KeyCode) {
        // Key repeat must not fire another press
        if self.keys_held.insert(key) {
            self.keys_pressed.insert(key);
        }
    }

    pub(crate) fn release(&mut self, key: KeyCode) {
        self.keys_held.remove(&key);
        self.keys_released.insert(key);
    }

    fn set_focused(&mut self, focused: bool) {
        self.focused = focused;
        if !focused {
            // Releases that happen while unfocused never reach us
            self.keys_held.clear();
        }
    }
}

impl Default for Input {
    fn default() -> Self {
        Self::new()
    }
}
