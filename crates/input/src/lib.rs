//! Input handling: platform events become a closed set of [`Intent`]s.
//!
//! # Invariants
//! - State machines downstream consume intents, never raw platform events.
//! - Mouse motion only produces an intent while input is captured.
//! - The click that starts capturing never also produces an edit.
//! - Events queued between frames are bounded and never include no-ops.

pub mod action;
pub mod capture;
pub mod keyboard;
pub mod queue;

pub use action::{InputEvent, Intent, Movement, map_event};
pub use capture::CaptureState;
pub use keyboard::KeyboardState;
pub use queue::EventQueue;
pub use winit::keyboard::KeyCode;
