//! The rigid body world
//!
//! Owns the dense body sequence and the four arena boundaries, and
//! advances them with fixed-step semi-implicit integration. Given
//! identical initial bodies and an identical sequence of `step` calls,
//! two worlds produce identical trajectories: there is no wall-clock
//! input and every loop runs in index order.

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use super::body::{Body, BodySpec, Boundary};
use super::collision::{
    circle_boundary_contact, circle_circle_contact, resolve_boundary, resolve_pair,
};
use crate::config::BackdropConfig;
use crate::consts;

pub struct World {
    bodies: Vec<Body>,
    boundaries: [Boundary; 4],
    gravity: Vec2,
    friction: f32,
    restitution: f32,
    body_collisions: bool,
}

impl World {
    pub fn new(config: &BackdropConfig) -> Self {
        Self {
            bodies: Vec::new(),
            boundaries: Boundary::arena(consts::WORLD_WIDTH, consts::WORLD_HEIGHT),
            gravity: Vec2::new(0.0, -config.gravity),
            friction: config.friction,
            restitution: config.restitution,
            body_collisions: config.body_collisions,
        }
    }

    /// Add a dynamic body. Startup only: the body count is fixed once
    /// the session begins and indices are stable for its lifetime.
    pub fn add_body(&mut self, spec: BodySpec) -> usize {
        self.bodies
            .push(Body::new(spec, self.friction, self.restitution));
        self.bodies.len() - 1
    }

    /// Spawn `count` bodies at seeded-random poses inside the arena.
    pub fn spawn(&mut self, count: usize, seed: u64) {
        let mut rng = Pcg32::seed_from_u64(seed);
        for _ in 0..count {
            let spec = BodySpec {
                pos: Vec2::new(
                    rng.random_range(-consts::SPAWN_HALF_WIDTH..consts::SPAWN_HALF_WIDTH),
                    rng.random_range(-consts::SPAWN_HALF_HEIGHT..consts::SPAWN_HALF_HEIGHT),
                ),
                vel: Vec2::ZERO,
                angle: rng.random_range(0.0..std::f32::consts::TAU),
                angular_vel: rng.random_range(-2.0..2.0),
                ..Default::default()
            };
            self.add_body(spec);
        }
    }

    #[inline]
    pub fn bodies(&self) -> &[Body] {
        &self.bodies
    }

    #[inline]
    pub(crate) fn bodies_mut(&mut self) -> &mut [Body] {
        &mut self.bodies
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.bodies.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.bodies.is_empty()
    }

    pub fn boundaries(&self) -> &[Boundary; 4] {
        &self.boundaries
    }

    /// Advance every dynamic body by `dt_ms` milliseconds.
    ///
    /// Semi-implicit Euler, then boundary contacts, then (when enabled)
    /// pairwise body contacts in strict index order.
    pub fn step(&mut self, dt_ms: f32) {
        let dt = dt_ms / 1000.0;

        for body in &mut self.bodies {
            body.vel += self.gravity * dt;
            let speed_sq = body.vel.length_squared();
            if speed_sq > consts::MAX_BODY_SPEED * consts::MAX_BODY_SPEED {
                body.vel *= consts::MAX_BODY_SPEED / speed_sq.sqrt();
            }
            body.pos += body.vel * dt;
            body.angle += body.angular_vel * dt;
        }

        for body in &mut self.bodies {
            for boundary in &self.boundaries {
                if let Some(contact) = circle_boundary_contact(body.pos, body.radius, boundary) {
                    resolve_boundary(body, &contact);
                }
            }
        }

        if self.body_collisions {
            for i in 0..self.bodies.len() {
                let (head, tail) = self.bodies.split_at_mut(i + 1);
                let a = &mut head[i];
                for b in tail.iter_mut() {
                    if let Some(contact) =
                        circle_circle_contact(a.pos, a.radius, b.pos, b.radius)
                    {
                        resolve_pair(a, b, &contact);
                    }
                }
            }
        }
    }
}
