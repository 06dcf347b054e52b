//! Ball-ball collision detection and response
//!
//! Impulse-based response with radius standing in for mass: the impulse is
//! split so each ball's velocity change is inversely proportional to its
//! radius. Small balls get knocked around more than big ones.

use glam::Vec2;

use super::state::Ball;

/// Normal used when two centers coincide exactly
pub const COINCIDENT_NORMAL: Vec2 = Vec2::X;

/// What [`resolve`] did with a pair
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContactOutcome {
    /// Already moving apart along the normal, nothing changed
    Separating,
    /// Impulse and de-penetration applied
    Resolved,
    /// Centers coincided; resolved along [`COINCIDENT_NORMAL`]
    Coincident,
}

/// True if both balls are active and their circles overlap.
///
/// Touching (distance == sum of radii) is not an overlap.
pub fn overlaps(a: &Ball, b: &Ball) -> bool {
    if !a.is_active() || !b.is_active() {
        return false;
    }
    let reach = a.radius() + b.radius();
    a.pos.distance_squared(b.pos) < reach * reach
}

/// Resolve an overlapping pair in place.
///
/// `a` and `b` must be different balls. The normal points from `a` to `b`.
pub fn resolve(a: &mut Ball, b: &mut Ball, restitution: f32) -> ContactOutcome {
    let delta = b.pos - a.pos;
    let distance = delta.length();

    let (normal, outcome) = if distance > 0.0 {
        (delta / distance, ContactOutcome::Resolved)
    } else {
        (COINCIDENT_NORMAL, ContactOutcome::Coincident)
    };

    let rel_vel = b.vel - a.vel;
    let vel_along_normal = rel_vel.dot(normal);

    // Moving apart already - leave them alone
    if vel_along_normal > 0.0 {
        return ContactOutcome::Separating;
    }

    let inv_a = 1.0 / a.radius();
    let inv_b = 1.0 / b.radius();

    let j = -(1.0 + restitution) * vel_along_normal / (inv_a + inv_b);
    let impulse = normal * j;

    a.vel -= impulse * inv_a;
    b.vel += impulse * inv_b;

    // Split the overlap evenly so the pair ends exactly touching
    let overlap = a.radius() + b.radius() - distance;
    let push = normal * (overlap * 0.5);
    a.pos -= push;
    b.pos += push;

    outcome
}
