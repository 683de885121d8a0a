use kostka_common::VoxelColor;

use crate::uniform::UniformPayload;

/// Errors a backend can report for a single frame.
///
/// None of these stop the frame loop; the frame is skipped and the next one
/// retries.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum RenderError {
    #[error("surface lost or outdated")]
    SurfaceLost,
    #[error("timed out acquiring the next frame")]
    Timeout,
    #[error("out of GPU memory")]
    OutOfMemory,
    #[error("backend error: {0}")]
    Other(String),
}

/// The GPU-facing half of the frame loop.
///
/// Call order per frame is fixed by the loop: optional `resize`, optional
/// `upload_voxels`, `upload_uniforms`, `draw`, `present`.
pub trait FrameBackend {
    /// Update the viewport to a new drawable size.
    fn resize(&mut self, width: u32, height: u32);

    /// Replace the uniform block contents.
    fn upload_uniforms(&mut self, payload: &UniformPayload);

    /// Replace the entire voxel storage block.
    fn upload_voxels(&mut self, cells: &[VoxelColor]);

    /// Issue the single full-screen draw for this frame.
    fn draw(&mut self) -> Result<(), RenderError>;

    /// Present the drawn frame. Blocks for at most one vsync interval.
    fn present(&mut self);
}

/// One call observed by [`RecordingBackend`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BackendCall {
    Resize(u32, u32),
    Uniforms,
    Voxels,
    Draw,
    Present,
}

/// Headless backend that records what the frame loop asked of it.
#[derive(Debug, Default)]
pub struct RecordingBackend {
    calls: Vec<BackendCall>,
    last_uniforms: Option<UniformPayload>,
    voxels: Vec<VoxelColor>,
    viewport: Option<(u32, u32)>,
    /// When set, the next `draw` fails with this error.
    pub fail_next_draw: Option<RenderError>,
}

impl RecordingBackend {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn calls(&self) -> &[BackendCall] {
        &self.calls
    }

    pub fn count(&self, call: BackendCall) -> usize {
        self.calls.iter().filter(|c| **c == call).count()
    }

    pub fn uniform_uploads(&self) -> usize {
        self.count(BackendCall::Uniforms)
    }

    pub fn voxel_uploads(&self) -> usize {
        self.count(BackendCall::Voxels)
    }

    pub fn draws(&self) -> usize {
        self.count(BackendCall::Draw)
    }

    pub fn last_uniforms(&self) -> Option<&UniformPayload> {
        self.last_uniforms.as_ref()
    }

    /// Contents of the most recent voxel upload.
    pub fn voxels(&self) -> &[VoxelColor] {
        &self.voxels
    }

    pub fn viewport(&self) -> Option<(u32, u32)> {
        self.viewport
    }

    pub fn clear_calls(&mut self) {
        self.calls.clear();
    }
}

impl FrameBackend for RecordingBackend {
    fn resize(&mut self, width: u32, height: u32) {
        self.viewport = Some((width, height));
        self.calls.push(BackendCall::Resize(width, height));
    }

    fn upload_uniforms(&mut self, payload: &UniformPayload) {
        self.last_uniforms = Some(*payload);
        self.calls.push(BackendCall::Uniforms);
    }

    fn upload_voxels(&mut self, cells: &[VoxelColor]) {
        self.voxels.clear();
        self.voxels.extend_from_slice(cells);
        self.calls.push(BackendCall::Voxels);
    }

    fn draw(&mut self) -> Result<(), RenderError> {
        if let Some(err) = self.fail_next_draw.take() {
            return Err(err);
        }
        self.calls.push(BackendCall::Draw);
        Ok(())
    }

    fn present(&mut self) {
        self.calls.push(BackendCall::Present);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::{Vec2, Vec3};

    #[test]
    fn records_calls_in_order() {
        let mut backend = RecordingBackend::new();
        backend.resize(640, 480);
        backend.upload_voxels(&[VoxelColor::RED, VoxelColor::EMPTY]);
        backend.upload_uniforms(&UniformPayload::new(Vec3::ZERO, Vec3::X, Vec2::ONE));
        backend.draw().unwrap();
        backend.present();

        assert_eq!(
            backend.calls(),
            &[
                BackendCall::Resize(640, 480),
                BackendCall::Voxels,
                BackendCall::Uniforms,
                BackendCall::Draw,
                BackendCall::Present,
            ]
        );
        assert_eq!(backend.viewport(), Some((640, 480)));
        assert_eq!(backend.voxels(), &[VoxelColor::RED, VoxelColor::EMPTY]);
        assert_eq!(backend.last_uniforms().unwrap().direction(), Vec3::X);
    }

    #[test]
    fn injected_draw_failure_is_one_shot() {
        let mut backend = RecordingBackend::new();
        backend.fail_next_draw = Some(RenderError::SurfaceLost);
        assert_eq!(backend.draw(), Err(RenderError::SurfaceLost));
        assert!(backend.draw().is_ok());
        assert_eq!(backend.draws(), 1);
    }
}
