//! Pairwise elastic collision response between bodies
//!
//! Impulse is exchanged along the contact normal only; tangential velocity
//! is left untouched (frictionless circles). Positions are never corrected,
//! so overlapping bodies may interpenetrate for a few ticks.

use super::body::Body;

/// Apply an elastic impulse to two overlapping, approaching bodies
///
/// `epsilon` is added to the center distance before normalizing so that
/// coincident centers do not divide by zero. Returns `true` if an impulse
/// was applied; `false` when the bodies do not overlap or are already
/// separating along the normal.
pub fn resolve(a: &mut Body, b: &mut Body, epsilon: f32) -> bool {
    let delta = a.pos - b.pos;
    let distance = delta.length();

    if distance >= a.radius + b.radius {
        return false;
    }

    let normal = delta / (distance + epsilon);
    let rel = (a.vel - b.vel).dot(normal);
    if rel > 0.0 {
        return false;
    }

    let mass_sum = a.mass + b.mass;
    let ratio_a = 2.0 * b.mass / mass_sum;
    let ratio_b = 2.0 * a.mass / mass_sum;

    a.vel -= ratio_a * rel * normal;
    b.vel += ratio_b * rel * normal;
    true
}
