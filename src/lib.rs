//! Gravity Balls - a bouncing-ball physics core
//!
//! Core modules:
//! - `sim`: Deterministic simulation (integration, collisions, ball pool)
//! - `config`: Data-driven physics tuning
//! - `render`: Instance data for whatever surface draws the balls
//! - `error`: Crate error type

pub mod config;
pub mod error;
pub mod render;
pub mod sim;

pub use config::SimConfig;
pub use error::SimError;

/// Default simulation constants
pub mod consts {
    /// World dimensions
    pub const WORLD_WIDTH: f32 = 800.0;
    pub const WORLD_HEIGHT: f32 = 600.0;

    /// Ball pool size
    pub const MAX_BALLS: usize = 100;
    /// Hard upper bound for a configured pool
    pub const MAX_CAPACITY: usize = 4096;

    /// Downward acceleration, units per step²
    pub const GRAVITY: f32 = 0.5;
    /// Velocity kept after hitting the floor or a wall
    pub const BOUNCE_DAMPING: f32 = 0.7;
    /// Horizontal velocity kept on floor contact
    pub const FLOOR_FRICTION: f32 = 0.95;
    /// Ball-ball coefficient of restitution
    pub const COLLISION_RESTITUTION: f32 = 0.9;

    /// Spawned radius range (max exclusive)
    pub const MIN_RADIUS: f32 = 10.0;
    pub const MAX_RADIUS: f32 = 30.0;

    /// Balls enter near the top of the world
    pub const SPAWN_Y: f32 = 50.0;
    /// Spawned horizontal speed is drawn from [-SPAWN_SPEED, SPAWN_SPEED)
    pub const SPAWN_SPEED: f32 = 5.0;

    /// Steps per second the host is expected to run (for logging only)
    pub const STEPS_PER_SECOND: u32 = 60;
}

/// Convert an 8-bit RGBA color to normalized floats
#[inline]
pub fn rgba_to_f32(color: [u8; 4]) -> [f32; 4] {
    color.map(|c| c as f32 / 255.0)
}
