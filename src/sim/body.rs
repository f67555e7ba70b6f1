//! Body and boundary types

use glam::Vec2;

/// Construction parameters for a dynamic body.
///
/// Values are not validated at the type level; a non-positive radius or
/// density is a caller defect and construction fails fast.
#[derive(Debug, Clone, Copy)]
pub struct BodySpec {
    pub pos: Vec2,
    pub vel: Vec2,
    pub angle: f32,
    pub angular_vel: f32,
    pub radius: f32,
    pub density: f32,
}

impl Default for BodySpec {
    fn default() -> Self {
        Self {
            pos: Vec2::ZERO,
            vel: Vec2::ZERO,
            angle: 0.0,
            angular_vel: 0.0,
            radius: crate::consts::BODY_RADIUS,
            density: crate::consts::BODY_DENSITY,
        }
    }
}

/// A dynamic circular rigid body.
///
/// Identity is the index in the world's dense body sequence; bodies are
/// created once at startup and never removed.
#[derive(Debug, Clone, Copy)]
pub struct Body {
    pub pos: Vec2,
    pub vel: Vec2,
    /// Orientation in radians
    pub angle: f32,
    /// Angular velocity in radians/s
    pub angular_vel: f32,
    pub radius: f32,
    pub friction: f32,
    pub restitution: f32,
    mass: f32,
}

impl Body {
    pub fn new(spec: BodySpec, friction: f32, restitution: f32) -> Self {
        assert!(spec.radius > 0.0, "body radius must be positive");
        assert!(spec.density > 0.0, "body density must be positive");

        Self {
            pos: spec.pos,
            vel: spec.vel,
            angle: spec.angle,
            angular_vel: spec.angular_vel,
            radius: spec.radius,
            friction,
            restitution,
            mass: spec.density * std::f32::consts::PI * spec.radius * spec.radius,
        }
    }

    #[inline]
    pub fn mass(&self) -> f32 {
        self.mass
    }

    #[inline]
    pub fn inv_mass(&self) -> f32 {
        1.0 / self.mass
    }
}

/// The side of the arena a boundary closes off
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WallSide {
    Ground,
    Ceiling,
    Left,
    Right,
}

/// A static boundary: the inward-facing half-plane `normal · p >= offset`.
///
/// Infinite mass, never integrated; participates only in collision
/// response against dynamic bodies.
#[derive(Debug, Clone, Copy)]
pub struct Boundary {
    pub side: WallSide,
    /// Unit normal pointing into the arena
    pub normal: Vec2,
    /// Signed distance of the inner wall face from the origin along `normal`
    pub offset: f32,
}

impl Boundary {
    /// The four walls of a centered `width` x `height` arena
    pub fn arena(width: f32, height: f32) -> [Boundary; 4] {
        let hw = width / 2.0;
        let hh = height / 2.0;
        [
            Boundary {
                side: WallSide::Ground,
                normal: Vec2::Y,
                offset: -hh,
            },
            Boundary {
                side: WallSide::Ceiling,
                normal: -Vec2::Y,
                offset: -hh,
            },
            Boundary {
                side: WallSide::Left,
                normal: Vec2::X,
                offset: -hw,
            },
            Boundary {
                side: WallSide::Right,
                normal: -Vec2::X,
                offset: -hw,
            },
        ]
    }
}
