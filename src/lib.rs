//! Driftfield - a physics-driven instanced backdrop
//!
//! Core modules:
//! - `profile`: Device/accessibility capability resolution
//! - `config`: Data-driven backdrop tuning
//! - `sim`: Deterministic 2D rigid body simulation
//! - `renderer`: WebGPU instanced rendering pipeline
//! - `assets`: Async mesh acquisition
//! - `session`: Per-frame simulation/render pipeline context

pub mod assets;
pub mod config;
pub mod pointer;
pub mod profile;
pub mod renderer;
pub mod session;
pub mod sim;

pub use config::BackdropConfig;
pub use profile::{CapabilityProfile, Signals};
pub use session::Session;

use glam::Vec2;

/// Backdrop constants
pub mod consts {
    /// Fixed nominal simulation timestep in milliseconds.
    ///
    /// The scheduler always steps with this constant, never the measured
    /// frame delta. Variable-timestep integration was deliberately
    /// rejected: identical tick sequences must produce identical body
    /// trajectories regardless of display refresh jitter.
    pub const STEP_DT_MS: f32 = 1000.0 / 60.0;

    /// Arena dimensions in world units
    pub const WORLD_WIDTH: f32 = 40.0;
    pub const WORLD_HEIGHT: f32 = 30.0;
    pub const WALL_THICKNESS: f32 = 1.0;

    /// Spawn region half-extents (slightly inside the walls)
    pub const SPAWN_HALF_WIDTH: f32 = 17.5;
    pub const SPAWN_HALF_HEIGHT: f32 = 12.5;

    /// Dynamic body defaults
    pub const BODY_RADIUS: f32 = 0.3;
    pub const BODY_DENSITY: f32 = 1.0;

    /// Speed clamp for simulation stability (world units/s)
    pub const MAX_BODY_SPEED: f32 = 20.0;

    /// Camera placement
    pub const CAMERA_Z: f32 = 25.0;
    pub const CAMERA_FOV_DEG: f32 = 50.0;
    pub const CAMERA_NEAR: f32 = 0.1;
    pub const CAMERA_FAR: f32 = 1000.0;
}

/// Convert a screen-space position to normalized device coordinates.
///
/// Screen origin is top-left; NDC is [-1, 1]² with +y up.
#[inline]
pub fn screen_to_ndc(x: f32, y: f32, width: f32, height: f32) -> Vec2 {
    Vec2::new((x / width) * 2.0 - 1.0, -(y / height) * 2.0 + 1.0)
}
