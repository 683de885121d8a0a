use winit::keyboard::KeyCode;

use crate::capture::CaptureState;

/// A platform event, already stripped of windowing-library detail.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InputEvent {
    KeyDown(KeyCode),
    /// Any mouse button went down.
    MouseButtonDown,
    /// Relative pointer motion in pixels.
    MouseMotion { dx: f32, dy: f32 },
    Resized { width: u32, height: u32 },
    CloseRequested,
}

/// Set of translation directions active for one frame.
///
/// Directions compose additively; opposing directions cancel and diagonals
/// are not normalized.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Movement {
    pub forward: bool,
    pub back: bool,
    pub left: bool,
    pub right: bool,
    pub up: bool,
    pub down: bool,
}

impl Movement {
    pub const FORWARD: Self = Self {
        forward: true,
        back: false,
        left: false,
        right: false,
        up: false,
        down: false,
    };

    pub fn is_idle(&self) -> bool {
        *self == Self::default()
    }
}

/// A high-level request the simulation state understands.
///
/// Every raw event is reduced to one of these before it touches the camera,
/// the capture state or the voxel grid.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Intent {
    /// Mouse-look by raw pixel deltas; sensitivity is applied by the camera owner.
    RotateBy { dx: f32, dy: f32 },
    /// Translate the camera for `dt` seconds.
    TranslateBy { movement: Movement, dt: f32 },
    /// Flip between released and capturing.
    ToggleCapture,
    /// Write the marker color at the cell containing the camera.
    EditVoxelAtCamera,
    Resize { width: u32, height: u32 },
    Quit,
}

/// Map one raw event to an intent given the current capture state.
///
/// Returns `None` for events that have no effect in this state, e.g. motion
/// while released or Escape while already released.
pub fn map_event(event: &InputEvent, capture: CaptureState) -> Option<Intent> {
    match *event {
        InputEvent::KeyDown(KeyCode::Escape) if capture.is_capturing() => {
            Some(Intent::ToggleCapture)
        }
        InputEvent::KeyDown(_) => None,
        InputEvent::MouseButtonDown => Some(if capture.is_capturing() {
            Intent::EditVoxelAtCamera
        } else {
            Intent::ToggleCapture
        }),
        InputEvent::MouseMotion { dx, dy } if capture.is_capturing() => {
            Some(Intent::RotateBy { dx, dy })
        }
        InputEvent::MouseMotion { .. } => None,
        InputEvent::Resized { width, height } => Some(Intent::Resize { width, height }),
        InputEvent::CloseRequested => Some(Intent::Quit),
    }
}
