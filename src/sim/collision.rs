//! Collision detection and response
//!
//! Circle-vs-half-plane for the arena walls, circle-vs-circle for
//! body pairs. Response is positional correction plus a restitution
//! impulse on the normal component, with tangential friction damping.

use glam::Vec2;

use super::body::{Body, Boundary};

/// Below this approach speed a contact does not bounce; the normal
/// velocity is killed instead so bodies settle rather than
/// micro-bouncing on gravity forever.
pub const RESTING_SPEED: f32 = 0.25;

/// A detected overlap
#[derive(Debug, Clone, Copy)]
pub struct Contact {
    /// Unit normal pointing away from the surface (toward the body for
    /// boundary contacts, from the first body to the second for pairs)
    pub normal: Vec2,
    /// Overlap depth along the normal
    pub penetration: f32,
}

/// Check a body against a boundary half-plane.
///
/// Catches any penetration depth, so a body that crossed the wall face
/// entirely within one step is still pushed back; escape through a
/// wall is not possible.
pub fn circle_boundary_contact(pos: Vec2, radius: f32, boundary: &Boundary) -> Option<Contact> {
    let clearance = boundary.normal.dot(pos) - boundary.offset - radius;
    if clearance < 0.0 {
        Some(Contact {
            normal: boundary.normal,
            penetration: -clearance,
        })
    } else {
        None
    }
}

/// Check two circles for overlap. Returns `None` when separated, and
/// also for the degenerate concentric case (no meaningful normal).
pub fn circle_circle_contact(pa: Vec2, ra: f32, pb: Vec2, rb: f32) -> Option<Contact> {
    let delta = pb - pa;
    let dist_sq = delta.length_squared();
    let min_dist = ra + rb;
    if dist_sq >= min_dist * min_dist {
        return None;
    }
    let dist = dist_sq.sqrt();
    if dist <= f32::EPSILON {
        return None;
    }
    Some(Contact {
        normal: delta / dist,
        penetration: min_dist - dist,
    })
}

/// Resolve a body-boundary contact in place.
///
/// Projects the body out of the wall, reflects the normal velocity
/// scaled by restitution (or kills it below the resting threshold),
/// damps the tangential velocity by friction, and nudges the spin
/// toward rolling on the contact.
pub fn resolve_boundary(body: &mut Body, contact: &Contact) {
    body.pos += contact.normal * contact.penetration;

    let vn = body.vel.dot(contact.normal);
    if vn >= 0.0 {
        return; // already separating
    }

    let tangent = Vec2::new(-contact.normal.y, contact.normal.x);
    let vt = body.vel.dot(tangent);

    let bounced = if -vn > RESTING_SPEED {
        -vn * body.restitution
    } else {
        0.0
    };
    let vt = vt * (1.0 - body.friction);

    body.vel = contact.normal * bounced + tangent * vt;
    // Slip couples into spin; full rolling would be vt / radius
    body.angular_vel += (vt / body.radius - body.angular_vel) * body.friction;
}

/// Resolve a contact between two dynamic bodies in place.
///
/// Positional correction is split by inverse mass; the normal impulse
/// uses the pair's mean restitution.
pub fn resolve_pair(a: &mut Body, b: &mut Body, contact: &Contact) {
    let inv_a = a.inv_mass();
    let inv_b = b.inv_mass();
    let inv_sum = inv_a + inv_b;

    let correction = contact.normal * (contact.penetration / inv_sum);
    a.pos -= correction * inv_a;
    b.pos += correction * inv_b;

    let rel_vn = (b.vel - a.vel).dot(contact.normal);
    if rel_vn >= 0.0 {
        return;
    }

    let restitution = if -rel_vn > RESTING_SPEED {
        (a.restitution + b.restitution) / 2.0
    } else {
        0.0
    };
    let j = -(1.0 + restitution) * rel_vn / inv_sum;
    let impulse = contact.normal * j;
    a.vel -= impulse * inv_a;
    b.vel += impulse * inv_b;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::body::{BodySpec, WallSide};

    fn ground() -> Boundary {
        Boundary {
            side: WallSide::Ground,
            normal: Vec2::Y,
            offset: -15.0,
        }
    }

    fn body_at(pos: Vec2, vel: Vec2) -> Body {
        Body::new(
            BodySpec {
                pos,
                vel,
                ..Default::default()
            },
            0.1,
            0.6,
        )
    }

    #[test]
    fn test_boundary_contact_detected_when_overlapping() {
        let contact = circle_boundary_contact(Vec2::new(0.0, -14.9), 0.3, &ground());
        let contact = contact.expect("overlapping body should contact");
        assert!((contact.penetration - 0.2).abs() < 1e-5);
        assert_eq!(contact.normal, Vec2::Y);
    }

    #[test]
    fn test_boundary_contact_none_when_clear() {
        assert!(circle_boundary_contact(Vec2::new(0.0, -14.0), 0.3, &ground()).is_none());
    }

    #[test]
    fn test_boundary_contact_catches_deep_penetration() {
        // Body fully past the wall face still yields a contact
        let contact = circle_boundary_contact(Vec2::new(0.0, -20.0), 0.3, &ground());
        assert!(contact.is_some());
    }

    #[test]
    fn test_resolve_boundary_reflects_and_separates() {
        let mut body = body_at(Vec2::new(0.0, -14.9), Vec2::new(0.0, -5.0));
        let contact = circle_boundary_contact(body.pos, body.radius, &ground()).unwrap();
        resolve_boundary(&mut body, &contact);

        assert!(body.pos.y >= -15.0 + body.radius - 1e-4);
        assert!((body.vel.y - 3.0).abs() < 1e-4, "vy = {}", body.vel.y);
    }

    #[test]
    fn test_resolve_boundary_kills_slow_bounce() {
        let mut body = body_at(Vec2::new(0.0, -14.8), Vec2::new(0.0, -0.1));
        let contact = circle_boundary_contact(body.pos, body.radius, &ground()).unwrap();
        resolve_boundary(&mut body, &contact);
        assert_eq!(body.vel.y, 0.0);
    }

    #[test]
    fn test_resolve_boundary_ignores_separating_body() {
        let mut body = body_at(Vec2::new(0.0, -14.9), Vec2::new(1.0, 2.0));
        let contact = circle_boundary_contact(body.pos, body.radius, &ground()).unwrap();
        resolve_boundary(&mut body, &contact);
        // Pushed out, velocity untouched
        assert_eq!(body.vel, Vec2::new(1.0, 2.0));
    }

    #[test]
    fn test_circle_circle_concentric_is_degenerate() {
        assert!(circle_circle_contact(Vec2::ZERO, 0.3, Vec2::ZERO, 0.3).is_none());
    }

    #[test]
    fn test_resolve_pair_separates_equal_masses() {
        let mut a = body_at(Vec2::new(-0.2, 0.0), Vec2::new(1.0, 0.0));
        let mut b = body_at(Vec2::new(0.2, 0.0), Vec2::new(-1.0, 0.0));
        let contact = circle_circle_contact(a.pos, a.radius, b.pos, b.radius).unwrap();
        resolve_pair(&mut a, &mut b, &contact);

        let dist = (b.pos - a.pos).length();
        assert!(dist >= a.radius + b.radius - 1e-4);
        // Head-on equal masses exchange momentum direction
        assert!(a.vel.x < 0.0 && b.vel.x > 0.0);
    }
}
