//! Deterministic 2D rigid body simulation
//!
//! All physics lives here. This module must be pure and deterministic:
//! - Fixed timestep only
//! - Seeded RNG only (initial layout)
//! - Stable iteration order (by body index)
//! - No rendering or platform dependencies

pub mod body;
pub mod collision;
pub mod force;
pub mod world;

pub use body::{Body, BodySpec, Boundary, WallSide};
pub use collision::{Contact, circle_boundary_contact, circle_circle_contact};
pub use force::PointerField;
pub use world::World;
