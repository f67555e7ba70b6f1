//! Instance projection layer
//!
//! Reads body state out of the world and writes per-instance model
//! matrices, performing the 2D→3D lift: a periodic depth offset phased
//! by index, and the single 2D angle decorrelated across three rotation
//! axes. Pure presentation policy, not physical law.

use glam::{EulerRot, Mat4, Quat, Vec2, Vec3};

use super::instance::InstanceRaw;
use crate::sim::World;

/// Depth oscillation amplitude in world units
pub const DEPTH_AMPLITUDE: f32 = 0.5;
/// Slow uniform drift rate on the y rotation axis, radians/s
pub const DRIFT_RATE: f32 = 0.1;

/// Lift a 2D body pose into a 3D instance transform.
///
/// Deterministic in its arguments alone. The index offsets the depth
/// phase so instances desynchronize instead of pulsing in lockstep;
/// the axis weights on the rotation are stylistic, chosen so a single
/// spinning body tumbles rather than rotating flat.
pub fn lift(pos: Vec2, angle: f32, index: usize, time_secs: f32, scale: f32) -> Mat4 {
    let z = (time_secs + index as f32).sin() * DEPTH_AMPLITUDE;
    let rotation = Quat::from_euler(
        EulerRot::XYZ,
        angle * 0.5,
        angle * 0.3 + time_secs * DRIFT_RATE,
        angle,
    );
    Mat4::from_scale_rotation_translation(
        Vec3::splat(scale),
        rotation,
        Vec3::new(pos.x, pos.y, z),
    )
}

/// The dense sequence of per-body instance transforms.
///
/// Same index as the body it mirrors; the length is fixed at
/// construction and equals the world's body count for the whole
/// session.
pub struct InstanceSet {
    instances: Vec<InstanceRaw>,
    scale: f32,
}

impl InstanceSet {
    /// Build the instance sequence from the world's initial pose.
    pub fn new(world: &World, scale: f32) -> Self {
        let mut set = Self {
            instances: vec![InstanceRaw::from_mat4(Mat4::IDENTITY); world.len()],
            scale,
        };
        set.sync(world, 0.0);
        set
    }

    /// Refresh every transform from current body state.
    ///
    /// A pure read of the world; must run after the physics step and
    /// before the render call of the same frame.
    pub fn sync(&mut self, world: &World, time_secs: f32) {
        debug_assert_eq!(self.instances.len(), world.len());
        for (index, (instance, body)) in
            self.instances.iter_mut().zip(world.bodies()).enumerate()
        {
            *instance = InstanceRaw::from_mat4(lift(
                body.pos,
                body.angle,
                index,
                time_secs,
                self.scale,
            ));
        }
    }

    pub fn raw(&self) -> &[InstanceRaw] {
        &self.instances
    }

    pub fn len(&self) -> usize {
        self.instances.len()
    }

    pub fn is_empty(&self) -> bool {
        self.instances.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::BackdropConfig;

    fn world_of(count: usize) -> World {
        let mut world = World::new(&BackdropConfig::default());
        world.spawn(count, 11);
        world
    }

    #[test]
    fn test_instance_count_matches_body_count() {
        let world = world_of(64);
        let mut set = InstanceSet::new(&world, 0.3);
        assert_eq!(set.len(), world.len());
        set.sync(&world, 1.5);
        assert_eq!(set.len(), world.len());
    }

    #[test]
    fn test_sync_does_not_mutate_world() {
        let mut world = world_of(16);
        world.step(crate::consts::STEP_DT_MS);
        let before: Vec<_> = world.bodies().iter().map(|b| (b.pos, b.angle)).collect();

        let mut set = InstanceSet::new(&world, 0.3);
        set.sync(&world, 2.0);

        for (body, (pos, angle)) in world.bodies().iter().zip(before) {
            assert_eq!(body.pos, pos);
            assert_eq!(body.angle, angle);
        }
    }

    #[test]
    fn test_lift_translation_carries_body_position() {
        let m = lift(Vec2::new(3.0, -4.0), 0.0, 0, 0.0, 0.3);
        let col = m.col(3);
        assert!((col.x - 3.0).abs() < 1e-5);
        assert!((col.y - -4.0).abs() < 1e-5);
    }

    #[test]
    fn test_lift_depth_is_bounded() {
        for index in 0..32 {
            for tick in 0..100 {
                let t = tick as f32 * 0.37;
                let m = lift(Vec2::ZERO, 1.0, index, t, 0.3);
                assert!(m.col(3).z.abs() <= DEPTH_AMPLITUDE + 1e-5);
            }
        }
    }

    #[test]
    fn test_lift_phase_desynchronizes_indices() {
        let a = lift(Vec2::ZERO, 0.0, 0, 1.0, 0.3);
        let b = lift(Vec2::ZERO, 0.0, 1, 1.0, 0.3);
        assert_ne!(a.col(3).z, b.col(3).z);
    }

    #[test]
    fn test_lift_is_deterministic() {
        let a = lift(Vec2::new(1.0, 2.0), 0.7, 5, 3.25, 0.3);
        let b = lift(Vec2::new(1.0, 2.0), 0.7, 5, 3.25, 0.3);
        assert_eq!(a, b);
    }
}
