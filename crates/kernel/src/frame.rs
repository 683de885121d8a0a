use kostka_input::{InputEvent, Intent, Movement};
use kostka_render::{FrameBackend, RenderError};

use crate::state::{PlatformRequest, SimulationState};

/// Inputs gathered by the platform for one loop iteration.
#[derive(Debug, Clone, Copy)]
pub struct FrameInput<'a> {
    /// Monotonic timestamp for this iteration, in milliseconds.
    pub now_ms: u64,
    /// Events received since the previous iteration, oldest first.
    pub events: &'a [InputEvent],
    /// Held movement keys sampled at the start of the update phase.
    pub movement: Movement,
}

#[derive(Debug, Clone, PartialEq)]
pub enum FrameOutcome {
    /// Uniforms uploaded, drawn and presented.
    Rendered,
    /// The backend could not draw; nothing was presented this frame.
    Skipped(RenderError),
    /// A close signal was observed; no draw was issued.
    Quit,
}

#[derive(Debug, Clone, PartialEq)]
pub struct FrameReport {
    pub outcome: FrameOutcome,
    /// Seconds since the previous frame.
    pub delta_seconds: f32,
    /// Relative-mouse toggles for the platform, in order.
    pub requests: Vec<PlatformRequest>,
    /// Whether the voxel grid was re-uploaded this frame.
    pub voxels_uploaded: bool,
}

/// Run one iteration of the viewer loop.
///
/// Order: advance clock, drain events, translate from held keys, sync the
/// grid if dirty, upload uniforms, draw, present. Resize requests are applied
/// to the backend while draining; relative-mouse requests are returned for
/// the platform to apply.
pub fn step_frame<B: FrameBackend + ?Sized>(
    state: &mut SimulationState,
    backend: &mut B,
    input: FrameInput<'_>,
) -> FrameReport {
    let dt = state.clock.advance(input.now_ms);
    let mut requests = Vec::new();

    for event in input.events {
        match state.handle_event(event) {
            Some(PlatformRequest::Resize { width, height }) => backend.resize(width, height),
            Some(request) => requests.push(request),
            None => {}
        }
        if !state.is_running() {
            return FrameReport {
                outcome: FrameOutcome::Quit,
                delta_seconds: dt,
                requests,
                voxels_uploaded: false,
            };
        }
    }

    if !input.movement.is_idle() {
        state.apply(Intent::TranslateBy {
            movement: input.movement,
            dt,
        });
    }

    let voxels_uploaded = state.grid.sync_if_dirty(backend);
    backend.upload_uniforms(&state.uniform_payload());

    let outcome = match backend.draw() {
        Ok(()) => {
            backend.present();
            FrameOutcome::Rendered
        }
        Err(err) => {
            tracing::warn!("frame skipped: {err}");
            FrameOutcome::Skipped(err)
        }
    };

    let cam = &state.camera;
    tracing::trace!(
        position = ?cam.position,
        direction = ?cam.direction(),
        fps = if dt > 0.0 { 1.0 / dt } else { 0.0 },
        "frame"
    );

    FrameReport {
        outcome,
        delta_seconds: dt,
        requests,
        voxels_uploaded,
    }
}
