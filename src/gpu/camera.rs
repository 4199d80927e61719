//! First-person fly camera.

use glam::{Mat4, Vec3};

/// Starting position: above the plane, looking at it from +Z.
pub const DEFAULT_POSITION: Vec3 = Vec3::new(0.0, 5.0, 20.0);
/// Units per second.
pub const DEFAULT_SPEED: f32 = 6.0;
/// Degrees per pixel of mouse movement.
pub const DEFAULT_SENSITIVITY: f32 = 0.25;
/// Vertical field of view in degrees.
pub const DEFAULT_ZOOM: f32 = 45.0;

const MIN_ZOOM: f32 = 1.0;
const MAX_PITCH: f32 = 89.0;
const NEAR: f32 = 0.1;
const FAR: f32 = 1000.0;

/// Direction of keyboard-driven camera movement.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Movement {
    Forward,
    Backward,
    Left,
    Right,
}

/// Camera that flies freely through the scene.
///
/// Angles are stored in degrees. A yaw of -90° looks down -Z.
#[derive(Debug, Clone)]
pub struct Camera {
    /// World position of the eye.
    pub position: Vec3,
    /// Horizontal look angle in degrees.
    pub yaw: f32,
    /// Vertical look angle in degrees, clamped to ±89.
    pub pitch: f32,
    /// Field of view in degrees.
    pub zoom: f32,
    /// Movement speed in units per second.
    pub speed: f32,
    /// Mouse look sensitivity in degrees per pixel.
    pub sensitivity: f32,
}

impl Camera {
    /// Create a camera at `position` looking down -Z.
    pub fn new(position: Vec3) -> Self {
        Self {
            position,
            yaw: -90.0,
            pitch: 0.0,
            zoom: DEFAULT_ZOOM,
            speed: DEFAULT_SPEED,
            sensitivity: DEFAULT_SENSITIVITY,
        }
    }

    /// Unit vector the camera looks along.
    pub fn front(&self) -> Vec3 {
        let (yaw, pitch) = (self.yaw.to_radians(), self.pitch.to_radians());
        Vec3::new(yaw.cos() * pitch.cos(), pitch.sin(), yaw.sin() * pitch.cos()).normalize()
    }

    pub fn right(&self) -> Vec3 {
        self.front().cross(Vec3::Y).normalize()
    }

    pub fn up(&self) -> Vec3 {
        self.right().cross(self.front()).normalize()
    }

    /// Move for `dt` seconds in `direction`.
    pub fn process_keyboard(&mut self, direction: Movement, dt: f32) {
        let velocity = self.speed * dt;
        match direction {
            Movement::Forward => self.position += self.front() * velocity,
            Movement::Backward => self.position -= self.front() * velocity,
            Movement::Left => self.position -= self.right() * velocity,
            Movement::Right => self.position += self.right() * velocity,
        }
    }

    /// Turn by a mouse offset in pixels. Positive `dy` looks up.
    pub fn process_mouse_movement(&mut self, dx: f32, dy: f32) {
        self.yaw += dx * self.sensitivity;
        self.pitch = (self.pitch + dy * self.sensitivity).clamp(-MAX_PITCH, MAX_PITCH);
    }

    /// Zoom in for positive `scroll`, out for negative.
    pub fn process_mouse_scroll(&mut self, scroll: f32) {
        self.zoom = (self.zoom - scroll).clamp(MIN_ZOOM, DEFAULT_ZOOM);
    }

    /// Calculate the view matrix for rendering.
    pub fn view_matrix(&self) -> Mat4 {
        Mat4::look_at_rh(self.position, self.position + self.front(), self.up())
    }

    pub fn projection_matrix(&self, aspect: f32) -> Mat4 {
        Mat4::perspective_rh(self.zoom.to_radians(), aspect, NEAR, FAR)
    }

    /// Combined projection * view.
    pub fn view_proj(&self, aspect: f32) -> Mat4 {
        self.projection_matrix(aspect) * self.view_matrix()
    }
}

impl Default for Camera {
    fn default() -> Self {
        Self::new(DEFAULT_POSITION)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn close(a: Vec3, b: Vec3) -> bool {
        (a - b).length() < 1e-5
    }

    #[test]
    fn test_default_looks_down_negative_z() {
        let camera = Camera::default();
        assert!(close(camera.front(), Vec3::NEG_Z));
        assert!(close(camera.right(), Vec3::X));
        assert!(close(camera.up(), Vec3::Y));
    }

    #[test]
    fn test_keyboard_moves_along_axes() {
        let mut camera = Camera::default();
        camera.process_keyboard(Movement::Forward, 1.0);
        assert!(close(camera.position, Vec3::new(0.0, 5.0, 14.0)));

        camera.process_keyboard(Movement::Right, 0.5);
        assert!(close(camera.position, Vec3::new(3.0, 5.0, 14.0)));

        camera.process_keyboard(Movement::Left, 0.5);
        camera.process_keyboard(Movement::Backward, 1.0);
        assert!(close(camera.position, DEFAULT_POSITION));
    }

    #[test]
    fn test_pitch_is_clamped() {
        let mut camera = Camera::default();
        camera.process_mouse_movement(0.0, 10_000.0);
        assert_eq!(camera.pitch, 89.0);
        camera.process_mouse_movement(0.0, -10_000.0);
        assert_eq!(camera.pitch, -89.0);
    }

    #[test]
    fn test_zoom_is_clamped() {
        let mut camera = Camera::default();
        camera.process_mouse_scroll(10.0);
        assert_eq!(camera.zoom, 35.0);
        camera.process_mouse_scroll(100.0);
        assert_eq!(camera.zoom, 1.0);
        camera.process_mouse_scroll(-100.0);
        assert_eq!(camera.zoom, 45.0);
    }

    #[test]
    fn test_view_maps_eye_to_origin() {
        let camera = Camera::default();
        let eye = camera.view_matrix().transform_point3(camera.position);
        assert!(close(eye, Vec3::ZERO));

        // The plane origin is straight ahead
        let target = camera.view_matrix().transform_point3(Vec3::new(0.0, 5.0, 0.0));
        assert!(close(target, Vec3::new(0.0, 0.0, -20.0)));
    }
}
