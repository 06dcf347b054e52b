//! Instance data for drawing balls
//!
//! The crate does not draw anything itself. A renderer uploads these
//! instances once per frame, after the step has finished.

use bytemuck::{Pod, Zeroable};

use crate::rgba_to_f32;
use crate::sim::World;

/// One filled circle
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, Pod, Zeroable)]
pub struct BallInstance {
    pub center: [f32; 2],
    pub radius: f32,
    pub _pad: f32,
    pub color: [f32; 4],
}

impl BallInstance {
    pub const fn new(x: f32, y: f32, radius: f32, color: [f32; 4]) -> Self {
        Self {
            center: [x, y],
            radius,
            _pad: 0.0,
            color,
        }
    }
}

/// Active balls in slot order
pub fn extract_instances(world: &World) -> Vec<BallInstance> {
    world
        .pool()
        .iter_active()
        .map(|(_, ball)| {
            BallInstance::new(ball.pos.x, ball.pos.y, ball.radius(), rgba_to_f32(ball.color))
        })
        .collect()
}

/// Raw bytes for a vertex/instance buffer
pub fn instance_bytes(instances: &[BallInstance]) -> &[u8] {
    bytemuck::cast_slice(instances)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::SimConfig;
    use glam::Vec2;

    #[test]
    fn test_only_active_balls_extracted() {
        let mut world = World::new(SimConfig::default(), 1).unwrap();
        world.spawn_ball(Vec2::new(10.0, 20.0), Vec2::ZERO, 12.0);
        let hidden = world.spawn_ball(Vec2::new(30.0, 40.0), Vec2::ZERO, 14.0).unwrap();
        world.spawn_ball(Vec2::new(50.0, 60.0), Vec2::ZERO, 16.0);
        world.pool_mut().deactivate(hidden);

        let instances = extract_instances(&world);
        assert_eq!(instances.len(), 2);
        assert_eq!(instances[0].center, [10.0, 20.0]);
        assert_eq!(instances[1].radius, 16.0);
        assert_eq!(instances[0].color, [1.0, 1.0, 1.0, 1.0]);
    }

    #[test]
    fn test_instance_layout() {
        assert_eq!(std::mem::size_of::<BallInstance>(), 32);
        let instances = [BallInstance::new(1.0, 2.0, 3.0, [0.0; 4]); 3];
        assert_eq!(instance_bytes(&instances).len(), 96);
    }
}
