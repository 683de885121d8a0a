/// Whether mouse-look and click-to-edit are active.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum CaptureState {
    #[default]
    Released,
    Capturing,
}

impl CaptureState {
    pub fn is_capturing(self) -> bool {
        self == Self::Capturing
    }

    /// The state a toggle would move to, without changing `self`.
    pub fn toggled(self) -> CaptureState {
        match self {
            Self::Released => Self::Capturing,
            Self::Capturing => Self::Released,
        }
    }

    /// Flip the state and return the new one.
    ///
    /// Callers mirror the returned state into the platform's relative mouse
    /// mode. Only transitions request a mode change.
    pub fn toggle(&mut self) -> CaptureState {
        *self = self.toggled();
        tracing::debug!(state = ?*self, "input capture changed");
        *self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn starts_released() {
        assert_eq!(CaptureState::default(), CaptureState::Released);
        assert!(!CaptureState::default().is_capturing());
    }

    #[test]
    fn toggle_round_trips() {
        let mut state = CaptureState::default();
        assert_eq!(state.toggle(), CaptureState::Capturing);
        assert!(state.is_capturing());
        assert_eq!(state.toggle(), CaptureState::Released);
        assert!(!state.is_capturing());
    }
}
