//! Per-ball integration: gravity, explicit Euler, and boundary bounces
//!
//! The world has a floor and two side walls but no ceiling; a ball thrown
//! upward simply leaves the top and falls back.

use super::state::Ball;
use crate::config::SimConfig;

/// Which boundaries a ball touched during [`advance`]
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BoundaryHits {
    pub floor: bool,
    pub left: bool,
    pub right: bool,
}

impl BoundaryHits {
    pub fn any(&self) -> bool {
        self.floor || self.left || self.right
    }
}

/// Advance one ball by one fixed step. Inactive balls are left untouched.
pub fn advance(ball: &mut Ball, config: &SimConfig) -> BoundaryHits {
    let mut hits = BoundaryHits::default();
    if !ball.is_active() {
        return hits;
    }

    // No terminal velocity
    ball.vel.y += config.gravity;
    ball.pos += ball.vel;

    let r = ball.radius();
    let bounds = config.world;

    if ball.pos.y + r > bounds.height {
        ball.pos.y = bounds.height - r;
        ball.vel.y = -ball.vel.y * config.bounce_damping;
        // Contact drag
        ball.vel.x *= config.floor_friction;
        hits.floor = true;
    }

    if ball.pos.x - r < 0.0 {
        ball.pos.x = r;
        ball.vel.x = -ball.vel.x * config.bounce_damping;
        hits.left = true;
    } else if ball.pos.x + r > bounds.width {
        ball.pos.x = bounds.width - r;
        ball.vel.x = -ball.vel.x * config.bounce_damping;
        hits.right = true;
    }

    hits
}
