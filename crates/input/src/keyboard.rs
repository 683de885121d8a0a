use std::collections::HashSet;
use winit::keyboard::KeyCode;

use crate::action::Movement;

/// Continuous keyboard state: which keys are held right now.
///
/// Movement is read from this snapshot each frame rather than from key
/// events, so a held key moves the camera every frame until released.
#[derive(Debug, Default, Clone)]
pub struct KeyboardState {
    held: HashSet<KeyCode>,
}

impl KeyboardState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set(&mut self, key: KeyCode, pressed: bool) {
        if pressed {
            self.held.insert(key);
        } else {
            self.held.remove(&key);
        }
    }

    pub fn is_held(&self, key: KeyCode) -> bool {
        self.held.contains(&key)
    }

    /// Release everything, e.g. when the window loses focus.
    pub fn clear(&mut self) {
        self.held.clear();
    }

    /// W/S forward and back, A/D strafe, Space up, left Ctrl down.
    pub fn movement(&self) -> Movement {
        Movement {
            forward: self.is_held(KeyCode::KeyW),
            back: self.is_held(KeyCode::KeyS),
            left: self.is_held(KeyCode::KeyA),
            right: self.is_held(KeyCode::KeyD),
            up: self.is_held(KeyCode::Space),
            down: self.is_held(KeyCode::ControlLeft),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn press_and_release() {
        let mut keys = KeyboardState::new();
        assert!(!keys.is_held(KeyCode::KeyW));
        keys.set(KeyCode::KeyW, true);
        assert!(keys.is_held(KeyCode::KeyW));
        keys.set(KeyCode::KeyW, false);
        assert!(!keys.is_held(KeyCode::KeyW));
    }

    #[test]
    fn movement_bindings() {
        let mut keys = KeyboardState::new();
        keys.set(KeyCode::KeyW, true);
        keys.set(KeyCode::KeyD, true);
        keys.set(KeyCode::ControlLeft, true);
        let m = keys.movement();
        assert!(m.forward && m.right && m.down);
        assert!(!m.back && !m.left && !m.up);
    }

    #[test]
    fn right_ctrl_does_not_descend() {
        let mut keys = KeyboardState::new();
        keys.set(KeyCode::ControlRight, true);
        assert!(keys.movement().is_idle());
    }

    #[test]
    fn clear_releases_all() {
        let mut keys = KeyboardState::new();
        keys.set(KeyCode::Space, true);
        keys.clear();
        assert!(keys.movement().is_idle());
    }
}
