use crate::action::{InputEvent, Intent, map_event};
use crate::capture::CaptureState;

/// Queue length past which consecutive mouse motion is merged.
pub const MAX_PENDING: usize = 256;

/// Events buffered between two frames.
///
/// The queue tracks the capture state its own events will leave behind, so
/// an event that could not change anything once the frame replays the queue
/// is never stored. Motion while released and plain key presses are dropped
/// on arrival, which keeps the queue short even when frames stop being drawn.
#[derive(Debug, Clone, Default)]
pub struct EventQueue {
    events: Vec<InputEvent>,
    capture: CaptureState,
}

impl EventQueue {
    pub fn new(capture: CaptureState) -> Self {
        Self {
            events: Vec::new(),
            capture,
        }
    }

    /// Queue `event`. Returns `false` if it was dropped as a no-op.
    ///
    /// A resize directly after another resize replaces it. Once the queue
    /// holds [`MAX_PENDING`] events, motion is added onto a trailing motion
    /// event instead of growing the queue.
    pub fn push(&mut self, event: InputEvent) -> bool {
        let Some(intent) = map_event(&event, self.capture) else {
            return false;
        };
        let full = self.events.len() >= MAX_PENDING;

        match (intent, self.events.last_mut()) {
            (Intent::Resize { .. }, Some(last @ InputEvent::Resized { .. })) => {
                *last = event;
                return true;
            }
            (Intent::RotateBy { dx, dy }, Some(InputEvent::MouseMotion { dx: sx, dy: sy }))
                if full =>
            {
                *sx += dx;
                *sy += dy;
                return true;
            }
            (Intent::ToggleCapture, _) => self.capture = self.capture.toggled(),
            _ => {}
        }
        self.events.push(event);
        true
    }

    /// Queued events, oldest first.
    pub fn events(&self) -> &[InputEvent] {
        &self.events
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    /// Capture state once every queued event has been applied.
    pub fn projected_capture(&self) -> CaptureState {
        self.capture
    }

    /// Forget consumed events. `capture` is the state the frame ended in.
    pub fn clear(&mut self, capture: CaptureState) {
        self.events.clear();
        self.capture = capture;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use winit::keyboard::KeyCode;

    fn motion(dx: f32, dy: f32) -> InputEvent {
        InputEvent::MouseMotion { dx, dy }
    }

    #[test]
    fn motion_while_released_is_not_queued() {
        let mut queue = EventQueue::default();
        for _ in 0..10_000 {
            assert!(!queue.push(motion(1.0, 1.0)));
        }
        assert!(queue.is_empty());
    }

    #[test]
    fn key_presses_other_than_escape_are_not_queued() {
        let mut queue = EventQueue::new(CaptureState::Capturing);
        assert!(!queue.push(InputEvent::KeyDown(KeyCode::KeyW)));
        assert!(queue.push(InputEvent::KeyDown(KeyCode::Escape)));
        assert_eq!(queue.len(), 1);
    }

    #[test]
    fn motion_after_capturing_click_is_kept() {
        let mut queue = EventQueue::default();
        queue.push(InputEvent::MouseButtonDown);
        assert!(queue.push(motion(3.0, -1.0)));
        assert_eq!(queue.projected_capture(), CaptureState::Capturing);
        assert_eq!(
            queue.events(),
            &[InputEvent::MouseButtonDown, motion(3.0, -1.0)]
        );
    }

    #[test]
    fn motion_after_escape_is_dropped() {
        let mut queue = EventQueue::new(CaptureState::Capturing);
        queue.push(InputEvent::KeyDown(KeyCode::Escape));
        assert!(!queue.push(motion(3.0, -1.0)));
        assert_eq!(queue.projected_capture(), CaptureState::Released);
    }

    #[test]
    fn repeated_resizes_keep_only_the_latest() {
        let mut queue = EventQueue::default();
        for size in 0..500 {
            queue.push(InputEvent::Resized {
                width: size,
                height: size,
            });
        }
        assert_eq!(
            queue.events(),
            &[InputEvent::Resized {
                width: 499,
                height: 499
            }]
        );
    }

    #[test]
    fn motion_is_merged_once_full() {
        let mut queue = EventQueue::new(CaptureState::Capturing);
        for _ in 0..MAX_PENDING + 100 {
            queue.push(motion(1.0, 0.5));
        }
        assert_eq!(queue.len(), MAX_PENDING);
        let (dx, dy) = queue
            .events()
            .iter()
            .fold((0.0, 0.0), |(x, y), e| match *e {
                InputEvent::MouseMotion { dx, dy } => (x + dx, y + dy),
                _ => (x, y),
            });
        assert_eq!(dx, (MAX_PENDING + 100) as f32);
        assert_eq!(dy, (MAX_PENDING + 100) as f32 * 0.5);
    }

    #[test]
    fn clear_adopts_frame_capture_state() {
        let mut queue = EventQueue::default();
        queue.push(InputEvent::MouseButtonDown);
        queue.clear(CaptureState::Capturing);
        assert!(queue.is_empty());
        assert!(queue.push(motion(1.0, 0.0)));
    }
}
