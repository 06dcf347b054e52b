//! Simulation state: balls, the fixed-capacity pool, and the world
//!
//! Everything here is serializable so a world can be snapshotted and resumed
//! with an identical RNG stream.

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::step::{StepStats, step};
use crate::config::SimConfig;
use crate::error::SimError;

/// Index of a slot in the ball pool
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct BallId(pub u32);

impl BallId {
    #[inline]
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

/// A ball entity
///
/// The radius is fixed at creation and doubles as the mass proxy in
/// ball-ball collisions, so it is only readable from outside.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Ball {
    pub pos: Vec2,
    pub vel: Vec2,
    radius: f32,
    /// RGBA, cosmetic only
    pub color: [u8; 4],
    active: bool,
}

impl Ball {
    /// Create an active ball
    pub fn new(pos: Vec2, vel: Vec2, radius: f32) -> Self {
        Self {
            pos,
            vel,
            radius,
            color: [255, 255, 255, 255],
            active: true,
        }
    }

    pub fn with_color(mut self, color: [u8; 4]) -> Self {
        self.color = color;
        self
    }

    /// An unused pool slot
    fn empty() -> Self {
        Self {
            pos: Vec2::ZERO,
            vel: Vec2::ZERO,
            radius: 0.0,
            color: [0, 0, 0, 0],
            active: false,
        }
    }

    #[inline]
    pub fn radius(&self) -> f32 {
        self.radius
    }

    #[inline]
    pub fn is_active(&self) -> bool {
        self.active
    }

    /// Positive finite radius and finite motion. Anything else would turn
    /// into NaN the first time the ball collides.
    pub fn is_well_formed(&self) -> bool {
        self.radius > 0.0 && self.radius.is_finite() && self.pos.is_finite() && self.vel.is_finite()
    }

    /// Kinetic energy with radius standing in for mass
    pub fn kinetic_energy(&self) -> f32 {
        0.5 * self.radius * self.vel.length_squared()
    }
}

/// Fixed-capacity arena of ball slots
///
/// Slots are handed out in order up to `capacity` and never reused: a
/// deactivated ball keeps its slot as a tombstone.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BallPool {
    slots: Vec<Ball>,
    /// Slots `[0, used)` have been spawned into
    used: usize,
}

impl BallPool {
    pub fn new(capacity: usize) -> Self {
        Self {
            slots: vec![Ball::empty(); capacity],
            used: 0,
        }
    }

    #[inline]
    pub fn capacity(&self) -> usize {
        self.slots.len()
    }

    #[inline]
    pub fn is_full(&self) -> bool {
        self.used == self.slots.len()
    }

    /// Number of slots ever spawned into (active or tombstoned)
    #[inline]
    pub fn used(&self) -> usize {
        self.used
    }

    pub fn active_count(&self) -> usize {
        self.iter_active().count()
    }

    /// Place a ball in the next free slot, or `None` if the pool is full or
    /// the ball is not well formed. A declined spawn leaves the pool untouched.
    pub fn spawn(&mut self, ball: Ball) -> Option<BallId> {
        if self.is_full() || !ball.is_well_formed() {
            return None;
        }
        let id = BallId(self.used as u32);
        self.slots[self.used] = Ball {
            active: true,
            ..ball
        };
        self.used += 1;
        Some(id)
    }

    /// Tombstone a ball. Returns false if it was not active.
    pub fn deactivate(&mut self, id: BallId) -> bool {
        match self.slots[..self.used].get_mut(id.index()) {
            Some(ball) if ball.active => {
                ball.active = false;
                true
            }
            _ => false,
        }
    }

    pub fn get(&self, id: BallId) -> Option<&Ball> {
        self.slots[..self.used].get(id.index())
    }

    pub fn get_mut(&mut self, id: BallId) -> Option<&mut Ball> {
        self.slots[..self.used].get_mut(id.index())
    }

    /// Spawned slots in index order, including tombstones
    pub fn slots(&self) -> &[Ball] {
        &self.slots[..self.used]
    }

    pub fn slots_mut(&mut self) -> &mut [Ball] {
        &mut self.slots[..self.used]
    }

    pub fn iter_active(&self) -> impl Iterator<Item = (BallId, &Ball)> {
        self.slots()
            .iter()
            .enumerate()
            .filter(|(_, b)| b.active)
            .map(|(i, b)| (BallId(i as u32), b))
    }

    /// Two distinct slots mutably at once
    pub fn pair_mut(&mut self, a: BallId, b: BallId) -> (&mut Ball, &mut Ball) {
        pair_mut(self.slots_mut(), a.index(), b.index())
    }
}

/// Borrow slots `i` and `j` mutably. Panics if `i == j` or either is out of range.
pub fn pair_mut(slots: &mut [Ball], i: usize, j: usize) -> (&mut Ball, &mut Ball) {
    assert_ne!(i, j, "a ball cannot collide with itself");
    if i < j {
        let (head, tail) = slots.split_at_mut(j);
        (&mut head[i], &mut tail[0])
    } else {
        let (head, tail) = slots.split_at_mut(i);
        (&mut tail[0], &mut head[j])
    }
}

/// Complete simulation state (deterministic, serializable)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct World {
    config: SimConfig,
    pool: BallPool,
    /// Run seed for reproducibility
    seed: u64,
    rng: Pcg32,
    /// Steps taken so far
    steps: u64,
}

impl World {
    /// Create an empty world with the given seed. The config is fixed for
    /// the life of the world.
    pub fn new(config: SimConfig, seed: u64) -> Result<Self, SimError> {
        config.validate()?;
        let pool = BallPool::new(config.capacity);
        Ok(Self {
            config,
            pool,
            seed,
            rng: Pcg32::seed_from_u64(seed),
            steps: 0,
        })
    }

    pub fn config(&self) -> &SimConfig {
        &self.config
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    pub fn steps(&self) -> u64 {
        self.steps
    }

    pub fn pool(&self) -> &BallPool {
        &self.pool
    }

    pub fn pool_mut(&mut self) -> &mut BallPool {
        &mut self.pool
    }

    pub fn ball(&self, id: BallId) -> Option<&Ball> {
        self.pool.get(id)
    }

    /// Spawn a ball at `(x, spawn_y)` with a random horizontal speed, radius
    /// and color. Returns `None` without touching anything when the pool is full.
    pub fn spawn(&mut self, x: f32) -> Option<BallId> {
        if self.pool.is_full() {
            log::debug!("Spawn declined, pool full ({} balls)", self.pool.capacity());
            return None;
        }

        let speed = self.config.spawn_speed;
        let vx = if speed > 0.0 {
            self.rng.random_range(-speed..speed)
        } else {
            0.0
        };
        let radius = self
            .rng
            .random_range(self.config.min_radius..self.config.max_radius);
        let color = [
            self.rng.random::<u8>(),
            self.rng.random::<u8>(),
            self.rng.random::<u8>(),
            255,
        ];

        let ball = Ball::new(Vec2::new(x, self.config.spawn_y), Vec2::new(vx, 0.0), radius)
            .with_color(color);
        let id = self.pool.spawn(ball)?;
        log::debug!("Spawned ball {} at x={:.1} r={:.1} vx={:.2}", id.0, x, radius, vx);
        Some(id)
    }

    /// Spawn a ball with exact initial conditions. Returns `None` when the
    /// pool is full or the radius/position/velocity is unusable.
    pub fn spawn_ball(&mut self, pos: Vec2, vel: Vec2, radius: f32) -> Option<BallId> {
        let ball = Ball::new(pos, vel, radius);
        if !ball.is_well_formed() {
            log::warn!(
                "Spawn declined, bad ball r={} pos={} vel={}",
                radius,
                pos,
                vel
            );
            return None;
        }
        let id = self.pool.spawn(ball);
        if id.is_none() {
            log::debug!("Spawn declined, pool full ({} balls)", self.pool.capacity());
        }
        id
    }

    /// Advance one fixed step: integrate every ball, then resolve contacts
    pub fn step(&mut self) -> StepStats {
        self.steps += 1;
        step(&mut self.pool, &self.config)
    }

    /// Total kinetic energy of active balls
    pub fn kinetic_energy(&self) -> f32 {
        self.pool.iter_active().map(|(_, b)| b.kinetic_energy()).sum()
    }

    /// Serialize the whole world, RNG stream included
    pub fn to_json(&self) -> Result<String, SimError> {
        Ok(serde_json::to_string(self)?)
    }

    /// Restore a snapshot written by [`World::to_json`]
    pub fn from_json(json: &str) -> Result<Self, SimError> {
        let world: World = serde_json::from_str(json)?;
        world.config.validate()?;
        if world.pool.capacity() != world.config.capacity || world.pool.used > world.pool.capacity()
        {
            return Err(SimError::invalid(
                "capacity",
                "snapshot pool does not match its config",
            ));
        }
        if let Some(i) = world.pool.slots().iter().position(|b| !b.is_well_formed()) {
            return Err(SimError::invalid(
                "pool",
                format!("ball {} needs a positive finite radius and finite motion", i),
            ));
        }
        Ok(world)
    }
}
