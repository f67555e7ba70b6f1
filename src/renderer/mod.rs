//! WebGPU instanced rendering module
//!
//! One shared mesh, one material, one instance-rate buffer of per-body
//! transforms, one draw call per frame.

pub mod camera;
pub mod instance;
pub mod pipeline;
pub mod projection;

pub use camera::Camera;
pub use instance::{InstanceBuffer, InstanceRaw};
pub use pipeline::RenderState;
pub use projection::{InstanceSet, lift};
