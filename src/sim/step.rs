//! Fixed step driver
//!
//! One step integrates every active ball, then scans all unordered pairs
//! once and resolves the overlapping ones. Rendering reads the pool only
//! after a step has completed.

use super::collision::{ContactOutcome, overlaps, resolve};
use super::integrate::advance;
use super::state::{BallPool, pair_mut};
use crate::config::SimConfig;

/// Counters for a single step
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StepStats {
    /// Active balls integrated
    pub integrated: usize,
    /// Floor or wall bounces
    pub boundary_hits: usize,
    /// Unordered active pairs tested
    pub pairs_tested: usize,
    /// Pairs found overlapping
    pub contacts: usize,
    pub resolved: usize,
    pub separating: usize,
    pub coincident: usize,
}

/// Advance the pool by one fixed step
pub fn step(pool: &mut BallPool, config: &SimConfig) -> StepStats {
    let mut stats = StepStats::default();

    for ball in pool.slots_mut().iter_mut().filter(|b| b.is_active()) {
        if advance(ball, config).any() {
            stats.boundary_hits += 1;
        }
        stats.integrated += 1;
    }

    // Plain O(n²) scan; the pool is small
    let slots = pool.slots_mut();
    for i in 0..slots.len() {
        if !slots[i].is_active() {
            continue;
        }
        for j in (i + 1)..slots.len() {
            if !slots[j].is_active() {
                continue;
            }
            stats.pairs_tested += 1;
            if !overlaps(&slots[i], &slots[j]) {
                continue;
            }
            stats.contacts += 1;

            let (a, b) = pair_mut(slots, i, j);
            match resolve(a, b, config.restitution) {
                ContactOutcome::Resolved => stats.resolved += 1,
                ContactOutcome::Separating => stats.separating += 1,
                ContactOutcome::Coincident => {
                    log::warn!("Balls {} and {} share a center, using fallback normal", i, j);
                    stats.coincident += 1;
                }
            }
        }
    }

    log::trace!(
        "step: {} balls, {} pairs, {} contacts ({} resolved, {} separating, {} coincident)",
        stats.integrated,
        stats.pairs_tested,
        stats.contacts,
        stats.resolved,
        stats.separating,
        stats.coincident
    );

    stats
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::state::{Ball, World};
    use glam::Vec2;

    #[test]
    fn test_empty_pool() {
        let mut pool = BallPool::new(10);
        let stats = step(&mut pool, &SimConfig::default());
        assert_eq!(stats, StepStats::default());
    }

    #[test]
    fn test_every_pair_tested_once() {
        let config = SimConfig::default();
        let mut pool = BallPool::new(10);
        for i in 0..5 {
            pool.spawn(Ball::new(Vec2::new(100.0 + 120.0 * i as f32, 100.0), Vec2::ZERO, 10.0));
        }
        let stats = step(&mut pool, &config);
        assert_eq!(stats.integrated, 5);
        assert_eq!(stats.pairs_tested, 10);
        assert_eq!(stats.contacts, 0);
    }

    #[test]
    fn test_tombstones_skipped() {
        let config = SimConfig::default();
        let mut pool = BallPool::new(4);
        let a = pool.spawn(Ball::new(Vec2::new(100.0, 100.0), Vec2::ZERO, 20.0)).unwrap();
        let b = pool.spawn(Ball::new(Vec2::new(110.0, 100.0), Vec2::ZERO, 20.0)).unwrap();
        pool.spawn(Ball::new(Vec2::new(400.0, 100.0), Vec2::ZERO, 20.0));
        pool.deactivate(b);
        let frozen = pool.get(b).unwrap().clone();

        let stats = step(&mut pool, &config);
        assert_eq!(stats.integrated, 2);
        assert_eq!(stats.pairs_tested, 1);
        assert_eq!(stats.contacts, 0);
        assert_eq!(pool.get(b), Some(&frozen));
        assert_eq!(pool.get(a).unwrap().vel.y, 0.5);
    }

    #[test]
    fn test_overlapping_pair_resolved() {
        let config = SimConfig::default();
        let mut pool = BallPool::new(2);
        let a = pool.spawn(Ball::new(Vec2::new(100.0, 300.0), Vec2::new(2.0, 0.0), 20.0)).unwrap();
        let b = pool.spawn(Ball::new(Vec2::new(134.0, 300.0), Vec2::new(-2.0, 0.0), 20.0)).unwrap();

        let stats = step(&mut pool, &config);
        assert_eq!(stats.contacts, 1);
        assert_eq!(stats.resolved, 1);

        let (a, b) = (pool.get(a).unwrap(), pool.get(b).unwrap());
        assert!(a.vel.x < 0.0 && b.vel.x > 0.0);
        assert!((a.pos.distance(b.pos) - 40.0).abs() < 1e-3);
    }

    #[test]
    fn test_coincident_pair_counted() {
        let config = SimConfig::default();
        let mut pool = BallPool::new(2);
        pool.spawn(Ball::new(Vec2::new(300.0, 300.0), Vec2::ZERO, 15.0));
        pool.spawn(Ball::new(Vec2::new(300.0, 300.0), Vec2::ZERO, 15.0));

        let stats = step(&mut pool, &config);
        assert_eq!(stats.coincident, 1);
        assert!(pool.slots().iter().all(|b| b.pos.is_finite() && b.vel.is_finite()));
    }

    #[test]
    fn test_world_step_counts() {
        let mut world = World::new(SimConfig::default(), 7).unwrap();
        world.spawn(400.0);
        world.step();
        world.step();
        assert_eq!(world.steps(), 2);
    }

    #[test]
    fn test_crowded_pile_stays_finite() {
        let mut world = World::new(SimConfig::default(), 2024).unwrap();
        for i in 0..40 {
            world.spawn(20.0 + 19.0 * i as f32);
        }
        let radii: Vec<f32> = world.pool().slots().iter().map(|b| b.radius()).collect();

        for _ in 0..2000 {
            world.step();
        }
        assert_eq!(world.pool().active_count(), 40);
        for (id, ball) in world.pool().iter_active() {
            assert!(ball.pos.is_finite() && ball.vel.is_finite());
            assert_eq!(ball.radius(), radii[id.index()]);
        }
        assert!(world.kinetic_energy().is_finite());
    }
}
