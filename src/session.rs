//! Per-page session: owns the world, the pointer force field, and the
//! instance set, and advances them together once per animation frame.
//!
//! A session with `simulate` off never steps the world; the bodies keep
//! their spawn placement and only the time-driven parts of the lift
//! (depth bob, slow Y drift) move.

use crate::config::BackdropConfig;
use crate::consts;
use crate::pointer::PointerState;
use crate::profile::CapabilityProfile;
use crate::renderer::InstanceSet;
use crate::sim::{PointerField, World};

pub struct Session {
    pub profile: CapabilityProfile,
    pub world: World,
    pub field: PointerField,
    pub pointer: PointerState,
    pub instances: InstanceSet,
    ticks: u64,
}

impl Session {
    pub fn new(config: &BackdropConfig, profile: CapabilityProfile) -> Self {
        let mut world = World::new(config);
        world.spawn(profile.instance_count, config.spawn_seed);
        let instances = InstanceSet::new(&world, config.instance_scale);
        Self {
            profile,
            world,
            field: PointerField::new(config.force_radius, config.force_strength),
            pointer: PointerState::default(),
            instances,
            ticks: 0,
        }
    }

    /// Advance one frame: step physics at the fixed nominal dt, apply the
    /// pointer force, then refresh the instance transforms.
    pub fn advance(&mut self, time_secs: f32) {
        if self.profile.simulate {
            self.world.step(consts::STEP_DT_MS);
            self.field.apply(&mut self.world, self.pointer.world);
            self.ticks += 1;
        }
        self.instances.sync(&self.world, time_secs);
    }

    pub fn ticks(&self) -> u64 {
        self.ticks
    }
}
