//! Error types.
//!
//! Particle updates cannot fail. These cover run configuration and the
//! window and GPU setup around the animation.

use std::fmt;

/// Renderer setup failures.
#[derive(Debug)]
pub enum GpuError {
    /// The window could not be turned into a render surface.
    SurfaceCreation(wgpu::CreateSurfaceError),
    /// No adapter can present to the window surface.
    NoAdapter,
    /// The adapter refused to open a device.
    DeviceCreation(wgpu::RequestDeviceError),
    /// The surface reports no usable texture format or alpha mode.
    UnsupportedSurface,
}

impl fmt::Display for GpuError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GpuError::SurfaceCreation(e) => write!(f, "cannot create render surface: {}", e),
            GpuError::NoAdapter => write!(f, "no graphics adapter can present to this window"),
            GpuError::DeviceCreation(e) => write!(f, "cannot open graphics device: {}", e),
            GpuError::UnsupportedSurface => write!(f, "render surface has no usable format or alpha mode"),
        }
    }
}

impl std::error::Error for GpuError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            GpuError::SurfaceCreation(e) => Some(e),
            GpuError::DeviceCreation(e) => Some(e),
            _ => None,
        }
    }
}

impl From<wgpu::CreateSurfaceError> for GpuError {
    fn from(e: wgpu::CreateSurfaceError) -> Self {
        GpuError::SurfaceCreation(e)
    }
}

impl From<wgpu::RequestDeviceError> for GpuError {
    fn from(e: wgpu::RequestDeviceError) -> Self {
        GpuError::DeviceCreation(e)
    }
}

/// Errors returned by [`Simulation::run`](crate::Simulation::run).
#[derive(Debug)]
pub enum SimulationError {
    /// Time scale is negative, infinite or NaN.
    InvalidTimeScale(f32),
    EventLoop(winit::error::EventLoopError),
    Window(winit::error::OsError),
    Gpu(GpuError),
}

impl fmt::Display for SimulationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SimulationError::InvalidTimeScale(scale) => {
                write!(f, "time scale must be a finite non-negative number, got {}", scale)
            }
            SimulationError::EventLoop(e) => write!(f, "event loop failed: {}", e),
            SimulationError::Window(e) => write!(f, "cannot open window: {}", e),
            SimulationError::Gpu(e) => write!(f, "renderer setup failed: {}", e),
        }
    }
}

impl std::error::Error for SimulationError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            SimulationError::InvalidTimeScale(_) => None,
            SimulationError::EventLoop(e) => Some(e),
            SimulationError::Window(e) => Some(e),
            SimulationError::Gpu(e) => Some(e),
        }
    }
}

impl From<winit::error::EventLoopError> for SimulationError {
    fn from(e: winit::error::EventLoopError) -> Self {
        SimulationError::EventLoop(e)
    }
}

impl From<winit::error::OsError> for SimulationError {
    fn from(e: winit::error::OsError) -> Self {
        SimulationError::Window(e)
    }
}

impl From<GpuError> for SimulationError {
    fn from(e: GpuError) -> Self {
        SimulationError::Gpu(e)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error;

    #[test]
    fn test_gpu_error_message() {
        let err = SimulationError::from(GpuError::NoAdapter);
        assert_eq!(
            err.to_string(),
            "renderer setup failed: no graphics adapter can present to this window"
        );
        assert!(err.source().is_some());
    }

    #[test]
    fn test_invalid_time_scale_message() {
        let err = SimulationError::InvalidTimeScale(-1.0);
        assert!(err.to_string().ends_with("got -1"));
        assert!(err.source().is_none());
    }

    #[test]
    fn test_unsupported_surface_has_no_source() {
        assert!(GpuError::UnsupportedSurface.source().is_none());
    }
}
