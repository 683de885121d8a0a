//! Rendering Adapter: renderer-agnostic frame backend.
//!
//! # Invariants
//! - Backends never mutate simulation state; they only receive uploads.
//! - The uniform layout here is the contract with the fragment stage.
//!
//! [`RecordingBackend`] implements the same trait without a GPU so the frame
//! loop can run headless.

mod backend;
mod uniform;

pub use backend::{BackendCall, FrameBackend, RecordingBackend, RenderError};
pub use uniform::UniformPayload;
