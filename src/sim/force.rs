//! Pointer force field
//!
//! A radial push away from the pointer with linear falloff: maximal at
//! zero distance, exactly zero at and beyond the radius. Applied
//! directly to body velocities as a per-step impulse, so the visible
//! effect scales with the step rate.

use glam::Vec2;

use super::world::World;

#[derive(Debug, Clone, Copy)]
pub struct PointerField {
    /// Influence radius in world units
    pub radius: f32,
    /// Velocity kick at zero distance, per step
    pub strength: f32,
}

impl PointerField {
    pub fn new(radius: f32, strength: f32) -> Self {
        Self { radius, strength }
    }

    /// Push every body within `radius` of `pointer` away from it.
    ///
    /// A body exactly at the pointer has no defined direction; it is
    /// skipped for the step rather than risking a NaN in its state.
    pub fn apply(&self, world: &mut World, pointer: Vec2) {
        for body in world.bodies_mut() {
            let delta = body.pos - pointer;
            let dist = delta.length();
            if dist <= f32::EPSILON {
                continue;
            }
            if dist < self.radius {
                let falloff = 1.0 - dist / self.radius;
                body.vel += (delta / dist) * (self.strength * falloff);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::BackdropConfig;
    use crate::sim::body::BodySpec;
    use proptest::prelude::*;

    fn world_with_body(pos: Vec2) -> World {
        let mut world = World::new(&BackdropConfig::default());
        world.add_body(BodySpec {
            pos,
            ..Default::default()
        });
        world
    }

    #[test]
    fn test_body_at_pointer_is_skipped_not_nan() {
        let pointer = Vec2::new(3.0, -2.0);
        let mut world = world_with_body(pointer);
        PointerField::new(20.0, 0.4).apply(&mut world, pointer);

        let vel = world.bodies()[0].vel;
        assert!(vel.is_finite());
        assert_eq!(vel, Vec2::ZERO);
    }

    #[test]
    fn test_zero_force_at_radius_boundary() {
        let field = PointerField::new(20.0, 0.4);
        let mut world = world_with_body(Vec2::new(20.0, 0.0));
        field.apply(&mut world, Vec2::ZERO);
        assert_eq!(world.bodies()[0].vel, Vec2::ZERO);
    }

    #[test]
    fn test_zero_force_outside_radius() {
        let field = PointerField::new(20.0, 0.4);
        let mut world = world_with_body(Vec2::new(25.0, 0.0));
        field.apply(&mut world, Vec2::ZERO);
        assert_eq!(world.bodies()[0].vel, Vec2::ZERO);
    }

    #[test]
    fn test_force_points_away_from_pointer() {
        let field = PointerField::new(20.0, 0.4);
        let mut world = world_with_body(Vec2::new(5.0, 0.0));
        field.apply(&mut world, Vec2::ZERO);

        let vel = world.bodies()[0].vel;
        assert!(vel.x > 0.0);
        assert_eq!(vel.y, 0.0);
        // Linear falloff: at 1/4 of the radius, 3/4 of the strength
        assert!((vel.x - 0.4 * 0.75).abs() < 1e-5);
    }

    #[test]
    fn test_falloff_is_monotonic() {
        let field = PointerField::new(20.0, 0.4);
        let mut near = world_with_body(Vec2::new(2.0, 0.0));
        let mut far = world_with_body(Vec2::new(15.0, 0.0));
        field.apply(&mut near, Vec2::ZERO);
        field.apply(&mut far, Vec2::ZERO);
        assert!(near.bodies()[0].vel.length() > far.bodies()[0].vel.length());
    }

    proptest! {
        /// No pointer/body placement produces non-finite velocity.
        #[test]
        fn prop_apply_never_produces_nan(
            bx in -20.0f32..20.0,
            by in -15.0f32..15.0,
            px in -20.0f32..20.0,
            py in -15.0f32..15.0,
        ) {
            let mut world = world_with_body(Vec2::new(bx, by));
            PointerField::new(20.0, 0.4).apply(&mut world, Vec2::new(px, py));
            prop_assert!(world.bodies()[0].vel.is_finite());
        }
    }
}
