use glam::Vec2;
use kostka_common::{CellCoord, ViewerConfig, VoxelColor};
use kostka_input::{CaptureState, InputEvent, Intent, map_event};
use kostka_render::UniformPayload;

use crate::camera::Camera;
use crate::clock::FrameClock;
use crate::grid::VoxelGrid;

/// Side effects the platform layer must carry out after an intent.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlatformRequest {
    /// Enter (`true`) or leave (`false`) relative mouse mode.
    SetRelativeMouse(bool),
    /// Resize the drawable surface and viewport.
    Resize { width: u32, height: u32 },
}

/// Everything the frame loop mutates, owned in one place.
#[derive(Debug, Clone)]
pub struct SimulationState {
    pub camera: Camera,
    pub capture: CaptureState,
    pub grid: VoxelGrid,
    pub clock: FrameClock,
    screen_size: Vec2,
    running: bool,
    edits: u64,
}

impl SimulationState {
    /// Seeded grid, camera at `(3,3,3)` facing the origin, capture released.
    pub fn new(config: &ViewerConfig, start_ms: u64) -> Self {
        Self {
            camera: Camera::default().with_tuning(config.speed, config.sensitivity),
            capture: CaptureState::Released,
            grid: VoxelGrid::seeded(),
            clock: FrameClock::new(start_ms),
            screen_size: Vec2::new(config.window_width as f32, config.window_height as f32),
            running: true,
            edits: 0,
        }
    }

    pub fn screen_size(&self) -> Vec2 {
        self.screen_size
    }

    /// False once a quit intent has been applied.
    pub fn is_running(&self) -> bool {
        self.running
    }

    /// Number of click edits applied so far.
    pub fn edit_count(&self) -> u64 {
        self.edits
    }

    /// Map a raw event against the current capture state and apply it.
    pub fn handle_event(&mut self, event: &InputEvent) -> Option<PlatformRequest> {
        let intent = map_event(event, self.capture)?;
        self.apply(intent)
    }

    pub fn apply(&mut self, intent: Intent) -> Option<PlatformRequest> {
        match intent {
            Intent::RotateBy { dx, dy } => {
                self.camera.look(dx, dy);
                None
            }
            Intent::TranslateBy { movement, dt } => {
                self.camera.translate(movement, dt);
                None
            }
            Intent::ToggleCapture => {
                let state = self.capture.toggle();
                Some(PlatformRequest::SetRelativeMouse(state.is_capturing()))
            }
            Intent::EditVoxelAtCamera => {
                self.edit_at_camera();
                None
            }
            Intent::Resize { width, height } => {
                self.screen_size = Vec2::new(width as f32, height as f32);
                Some(PlatformRequest::Resize { width, height })
            }
            Intent::Quit => {
                tracing::info!("quit requested");
                self.running = false;
                None
            }
        }
    }

    /// Place the marker color in the cell containing the camera.
    fn edit_at_camera(&mut self) {
        let coord = CellCoord::from_position(self.camera.position);
        self.grid.set(coord, VoxelColor::MARKER);
        self.edits += 1;
        tracing::debug!(?coord, edits = self.edits, "voxel edit at camera");
    }

    /// Project camera and viewport into the uniform block layout.
    pub fn uniform_payload(&self) -> UniformPayload {
        UniformPayload::new(
            self.camera.position,
            self.camera.direction(),
            self.screen_size,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec3;
    use kostka_input::KeyCode;

    fn state() -> SimulationState {
        SimulationState::new(&ViewerConfig::default(), 0)
    }

    #[test]
    fn initial_state() {
        let s = state();
        assert_eq!(s.capture, CaptureState::Released);
        assert_eq!(s.screen_size(), Vec2::new(800.0, 600.0));
        assert!(s.is_running());
        assert_eq!(s.edit_count(), 0);
        assert_eq!(s.grid.filled_count(), 3);
    }

    #[test]
    fn config_tunes_camera() {
        let config = ViewerConfig {
            speed: 4.0,
            sensitivity: 0.01,
            ..ViewerConfig::default()
        };
        let s = SimulationState::new(&config, 0);
        assert_eq!(s.camera.speed, 4.0);
        assert_eq!(s.camera.sensitivity, 0.01);
    }

    #[test]
    fn first_click_captures_second_click_edits() {
        let mut s = state();
        let before = s.grid.cells().to_vec();

        let req = s.handle_event(&InputEvent::MouseButtonDown);
        assert_eq!(req, Some(PlatformRequest::SetRelativeMouse(true)));
        assert!(s.capture.is_capturing());
        assert_eq!(s.edit_count(), 0);
        assert_eq!(s.grid.cells(), before.as_slice());

        let req = s.handle_event(&InputEvent::MouseButtonDown);
        assert_eq!(req, None);
        assert!(s.capture.is_capturing());
        assert_eq!(s.edit_count(), 1);
        assert_eq!(s.grid.get(CellCoord::new(3, 3, 3)), VoxelColor::MARKER);
    }

    #[test]
    fn escape_releases_capture() {
        let mut s = state();
        s.handle_event(&InputEvent::MouseButtonDown);
        let req = s.handle_event(&InputEvent::KeyDown(KeyCode::Escape));
        assert_eq!(req, Some(PlatformRequest::SetRelativeMouse(false)));
        assert!(!s.capture.is_capturing());

        // A click after release captures again rather than editing.
        s.handle_event(&InputEvent::MouseButtonDown);
        assert_eq!(s.edit_count(), 0);
    }

    #[test]
    fn motion_only_rotates_while_capturing() {
        let mut s = state();
        let start = s.camera.direction();
        s.handle_event(&InputEvent::MouseMotion { dx: 50.0, dy: 20.0 });
        assert_eq!(s.camera.direction(), start);

        s.handle_event(&InputEvent::MouseButtonDown);
        s.handle_event(&InputEvent::MouseMotion { dx: 50.0, dy: 20.0 });
        assert_ne!(s.camera.direction(), start);
        assert!((s.camera.direction().length() - 1.0).abs() < 1e-5);
    }

    #[test]
    fn edit_uses_truncated_camera_position() {
        let mut s = state();
        s.camera.position = Vec3::new(5.9, 0.2, -0.7);
        s.apply(Intent::EditVoxelAtCamera);
        assert_eq!(s.grid.get(CellCoord::new(5, 0, 0)), VoxelColor::MARKER);
    }

    #[test]
    fn resize_only_touches_screen_size() {
        let mut s = state();
        let camera = s.camera.clone();
        let req = s.handle_event(&InputEvent::Resized {
            width: 1024,
            height: 768,
        });
        assert_eq!(
            req,
            Some(PlatformRequest::Resize {
                width: 1024,
                height: 768
            })
        );
        assert_eq!(s.screen_size(), Vec2::new(1024.0, 768.0));
        assert_eq!(s.camera, camera);
        assert_eq!(s.capture, CaptureState::Released);
        assert_eq!(s.uniform_payload().screen_size(), Vec2::new(1024.0, 768.0));
    }

    #[test]
    fn close_stops_running() {
        let mut s = state();
        s.handle_event(&InputEvent::CloseRequested);
        assert!(!s.is_running());
    }

    #[test]
    fn payload_mirrors_camera() {
        let s = state();
        let p = s.uniform_payload();
        assert_eq!(p.position(), Vec3::splat(3.0));
        assert_eq!(p.direction(), s.camera.direction());
    }
}
