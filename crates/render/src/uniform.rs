use bytemuck::{Pod, Zeroable};
use glam::{Vec2, Vec3};

/// Per-frame uniform block: camera plus viewport.
///
/// Matches the std140/WGSL layout `{ vec3 position; vec3 direction; vec2 screen_size; }`:
/// each `vec3` occupies a 16-byte slot and the struct is padded to 48 bytes.
/// Padding is always zero.
#[repr(C)]
#[derive(Debug, Copy, Clone, PartialEq, Pod, Zeroable)]
pub struct UniformPayload {
    pub position: [f32; 3],
    _pad0: f32,
    pub direction: [f32; 3],
    _pad1: f32,
    pub screen_size: [f32; 2],
    _pad2: [f32; 2],
}

impl UniformPayload {
    pub fn new(position: Vec3, direction: Vec3, screen_size: Vec2) -> Self {
        Self {
            position: position.to_array(),
            _pad0: 0.0,
            direction: direction.to_array(),
            _pad1: 0.0,
            screen_size: screen_size.to_array(),
            _pad2: [0.0; 2],
        }
    }

    pub fn position(&self) -> Vec3 {
        Vec3::from_array(self.position)
    }

    pub fn direction(&self) -> Vec3 {
        Vec3::from_array(self.direction)
    }

    pub fn screen_size(&self) -> Vec2 {
        Vec2::from_array(self.screen_size)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::mem::{offset_of, size_of};

    #[test]
    fn layout_matches_shader_block() {
        assert_eq!(size_of::<UniformPayload>(), 48);
        assert_eq!(offset_of!(UniformPayload, position), 0);
        assert_eq!(offset_of!(UniformPayload, direction), 16);
        assert_eq!(offset_of!(UniformPayload, screen_size), 32);
    }

    #[test]
    fn padding_is_zeroed() {
        let payload = UniformPayload::new(Vec3::splat(3.0), Vec3::NEG_X, Vec2::new(800.0, 600.0));
        let words: [f32; 12] = bytemuck::cast(payload);
        assert_eq!(words[3], 0.0);
        assert_eq!(words[7], 0.0);
        assert_eq!(&words[10..12], &[0.0, 0.0]);
        assert_eq!(payload.screen_size(), Vec2::new(800.0, 600.0));
    }
}
