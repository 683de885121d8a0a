//! wgpu frame backend for the kostka viewer.
//!
//! Draws one full-screen triangle per frame; the fragment stage raymarches
//! the voxel grid from the camera in the uniform block.
//!
//! # Invariants
//! - Uniform block at group 0 binding 0, voxel storage at group 1 binding 0.
//! - Voxel uploads always replace the whole storage buffer.
//! - A frame that fails to acquire a surface texture is skipped, never retried in place.

mod gpu;
mod shaders;

pub use gpu::WgpuBackend;
pub use shaders::RAYMARCH_SHADER;
