//! Quad meshes with a model transform.
//!
//! Every object in the scene is the same unit quad, placed by its own
//! translation, rotation and scale. The renderer only ever sees the
//! resulting [`MeshInstance`].

use bytemuck::{Pod, Zeroable};
use glam::{Mat4, Quat, Vec3, Vec4};

/// Corners of the unit quad, lying flat in the XZ plane.
pub const QUAD_VERTICES: [[f32; 3]; 4] = [
    [-1.0, 0.0, -1.0],
    [1.0, 0.0, -1.0],
    [1.0, 0.0, 1.0],
    [-1.0, 0.0, 1.0],
];

/// Two triangles covering [`QUAD_VERTICES`].
pub const QUAD_INDICES: [u16; 6] = [0, 1, 2, 0, 2, 3];

/// Per-instance data consumed by the vertex shader.
#[repr(C)]
#[derive(Debug, Copy, Clone, PartialEq, Pod, Zeroable)]
pub struct MeshInstance {
    pub model: [[f32; 4]; 4],
    pub color: [f32; 4],
}

impl MeshInstance {
    pub fn desc() -> wgpu::VertexBufferLayout<'static> {
        const ATTRS: [wgpu::VertexAttribute; 5] = wgpu::vertex_attr_array![
            1 => Float32x4,
            2 => Float32x4,
            3 => Float32x4,
            4 => Float32x4,
            5 => Float32x4
        ];
        wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<Self>() as wgpu::BufferAddress,
            step_mode: wgpu::VertexStepMode::Instance,
            attributes: &ATTRS,
        }
    }
}

/// Vertex layout of [`QUAD_VERTICES`].
pub fn quad_vertex_desc() -> wgpu::VertexBufferLayout<'static> {
    const ATTRS: [wgpu::VertexAttribute; 1] = wgpu::vertex_attr_array![0 => Float32x3];
    wgpu::VertexBufferLayout {
        array_stride: std::mem::size_of::<[f32; 3]>() as wgpu::BufferAddress,
        step_mode: wgpu::VertexStepMode::Vertex,
        attributes: &ATTRS,
    }
}

/// A unit quad placed in the world.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Mesh {
    translation: Vec3,
    rotation: Quat,
    scale: Vec3,
    color: Vec4,
}

impl Mesh {
    /// An untransformed white quad at the origin.
    pub fn quad() -> Self {
        Self {
            translation: Vec3::ZERO,
            rotation: Quat::IDENTITY,
            scale: Vec3::ONE,
            color: Vec4::ONE,
        }
    }

    pub fn with_color(mut self, color: Vec4) -> Self {
        self.color = color;
        self
    }

    /// Move the mesh by `offset`.
    pub fn translate(&mut self, offset: Vec3) -> &mut Self {
        self.translation += offset;
        self
    }

    /// Multiply the current scale component-wise.
    pub fn scale(&mut self, factor: Vec3) -> &mut Self {
        self.scale *= factor;
        self
    }

    /// Rotate by `angle` radians about `axis`, after any existing rotation.
    pub fn rotate(&mut self, angle: f32, axis: Vec3) -> &mut Self {
        self.rotation = (Quat::from_axis_angle(axis.normalize(), angle) * self.rotation).normalize();
        self
    }

    /// Place the mesh at `position`, keeping rotation and scale.
    pub fn set_pos(&mut self, position: Vec3) -> &mut Self {
        self.translation = position;
        self
    }

    pub fn position(&self) -> Vec3 {
        self.translation
    }

    pub fn color(&self) -> Vec4 {
        self.color
    }

    /// Model matrix: scale, then rotate, then translate.
    pub fn model(&self) -> Mat4 {
        Mat4::from_scale_rotation_translation(self.scale, self.rotation, self.translation)
    }

    pub fn to_instance(&self) -> MeshInstance {
        MeshInstance {
            model: self.model().to_cols_array_2d(),
            color: self.color.to_array(),
        }
    }
}

impl Default for Mesh {
    fn default() -> Self {
        Self::quad()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f32::consts::FRAC_PI_2;

    fn close(a: Vec3, b: Vec3) -> bool {
        (a - b).length() < 1e-5
    }

    #[test]
    fn test_translate_accumulates() {
        let mut mesh = Mesh::quad();
        mesh.translate(Vec3::new(0.0, 2.5, 0.0));
        mesh.translate(Vec3::new(0.0, -1.0, 0.0));
        assert_eq!(mesh.position(), Vec3::new(0.0, 1.5, 0.0));
    }

    #[test]
    fn test_set_pos_replaces_translation() {
        let mut mesh = Mesh::quad();
        mesh.translate(Vec3::new(4.0, 4.0, 4.0)).set_pos(Vec3::new(1.0, 2.0, 3.0));
        assert_eq!(mesh.position(), Vec3::new(1.0, 2.0, 3.0));
    }

    #[test]
    fn test_translation_is_not_scaled() {
        let mut mesh = Mesh::quad();
        mesh.translate(Vec3::new(0.0, 2.5, 0.0)).scale(Vec3::splat(0.1));
        let origin = mesh.model().transform_point3(Vec3::ZERO);
        assert!(close(origin, Vec3::new(0.0, 2.5, 0.0)));
    }

    #[test]
    fn test_upright_particle_faces_z() {
        let mut mesh = Mesh::quad();
        mesh.scale(Vec3::splat(0.1)).rotate(FRAC_PI_2, Vec3::X);

        // The far edge of the flat quad is lifted onto +Y
        let corner = mesh.model().transform_point3(Vec3::new(0.0, 0.0, -1.0));
        assert!(close(corner, Vec3::new(0.0, 0.1, 0.0)));
    }

    #[test]
    fn test_instance_carries_color_and_model() {
        let mut mesh = Mesh::quad().with_color(Vec4::new(0.2, 0.4, 1.0, 1.0));
        mesh.set_pos(Vec3::new(1.0, 2.0, 3.0));
        let instance = mesh.to_instance();

        assert_eq!(instance.color, [0.2, 0.4, 1.0, 1.0]);
        assert_eq!(instance.model[3], [1.0, 2.0, 3.0, 1.0]);
    }

    #[test]
    fn test_instance_layout_matches_stride() {
        assert_eq!(std::mem::size_of::<MeshInstance>(), 80);
        assert_eq!(MeshInstance::desc().array_stride, 80);
    }
}
