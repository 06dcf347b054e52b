//! Simulation configuration
//!
//! Loaded from JSON on native; every field falls back to the demo defaults.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::error::SimError;

/// Axis-aligned world rectangle. Origin top-left, +y points down.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WorldBounds {
    pub width: f32,
    pub height: f32,
}

impl Default for WorldBounds {
    fn default() -> Self {
        Self {
            width: WORLD_WIDTH,
            height: WORLD_HEIGHT,
        }
    }
}

/// Physics tuning and pool sizing
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimConfig {
    pub world: WorldBounds,

    // === Integration ===
    /// Added to vertical velocity every step
    pub gravity: f32,
    /// Velocity multiplier on floor/wall bounce (< 1)
    pub bounce_damping: f32,
    /// Horizontal velocity multiplier on floor contact (< 1)
    pub floor_friction: f32,

    // === Ball-ball contacts ===
    pub restitution: f32,

    // === Spawning ===
    pub min_radius: f32,
    pub max_radius: f32,
    pub spawn_y: f32,
    /// Horizontal spawn velocity is uniform in [-spawn_speed, spawn_speed)
    pub spawn_speed: f32,
    pub capacity: usize,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            world: WorldBounds::default(),

            gravity: GRAVITY,
            bounce_damping: BOUNCE_DAMPING,
            floor_friction: FLOOR_FRICTION,

            restitution: COLLISION_RESTITUTION,

            min_radius: MIN_RADIUS,
            max_radius: MAX_RADIUS,
            spawn_y: SPAWN_Y,
            spawn_speed: SPAWN_SPEED,
            capacity: MAX_BALLS,
        }
    }
}

impl SimConfig {
    /// Parse and validate a JSON config
    pub fn from_json(json: &str) -> Result<Self, SimError> {
        let config: SimConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Load a config file from disk
    pub fn load(path: impl AsRef<Path>) -> Result<Self, SimError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path)?;
        let config = Self::from_json(&json)?;
        log::info!("Loaded config from {}", path.display());
        Ok(config)
    }

    pub fn to_json(&self) -> Result<String, SimError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Check every value is in range
    pub fn validate(&self) -> Result<(), SimError> {
        let floats = [
            ("world.width", self.world.width),
            ("world.height", self.world.height),
            ("gravity", self.gravity),
            ("bounce_damping", self.bounce_damping),
            ("floor_friction", self.floor_friction),
            ("restitution", self.restitution),
            ("min_radius", self.min_radius),
            ("max_radius", self.max_radius),
            ("spawn_y", self.spawn_y),
            ("spawn_speed", self.spawn_speed),
        ];
        for (field, value) in floats {
            if !value.is_finite() {
                return Err(SimError::invalid(field, "must be finite"));
            }
        }

        if self.world.width <= 0.0 || self.world.height <= 0.0 {
            return Err(SimError::invalid("world", "dimensions must be positive"));
        }
        if self.min_radius <= 0.0 {
            return Err(SimError::invalid("min_radius", "must be positive"));
        }
        if self.max_radius <= self.min_radius {
            return Err(SimError::invalid(
                "max_radius",
                format!("must exceed min_radius ({})", self.min_radius),
            ));
        }
        for (field, value) in [
            ("bounce_damping", self.bounce_damping),
            ("floor_friction", self.floor_friction),
            ("restitution", self.restitution),
        ] {
            if !(0.0..1.0).contains(&value) {
                return Err(SimError::invalid(field, "must be in [0, 1)"));
            }
        }
        if self.spawn_speed < 0.0 {
            return Err(SimError::invalid("spawn_speed", "must not be negative"));
        }
        if self.capacity == 0 || self.capacity > MAX_CAPACITY {
            return Err(SimError::invalid(
                "capacity",
                format!("must be in 1..={}", MAX_CAPACITY),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_valid() {
        let config = SimConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.capacity, 100);
        assert_eq!(config.world.height, 600.0);
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let config = SimConfig::from_json(r#"{ "gravity": 0.25, "capacity": 10 }"#).unwrap();
        assert_eq!(config.gravity, 0.25);
        assert_eq!(config.capacity, 10);
        assert_eq!(config.bounce_damping, BOUNCE_DAMPING);
        assert_eq!(config.world, WorldBounds::default());
    }

    #[test]
    fn test_rejects_undamped_bounce() {
        let err = SimConfig::from_json(r#"{ "bounce_damping": 1.0 }"#).unwrap_err();
        assert!(matches!(
            err,
            SimError::InvalidConfig {
                field: "bounce_damping",
                ..
            }
        ));
    }

    #[test]
    fn test_rejects_inverted_radius_range() {
        let config = SimConfig {
            min_radius: 20.0,
            max_radius: 10.0,
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_rejects_zero_capacity() {
        let config = SimConfig {
            capacity: 0,
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_malformed_json() {
        let err = SimConfig::from_json("{ gravity: ").unwrap_err();
        assert!(matches!(err, SimError::Parse(_)));
    }

    #[test]
    fn test_json_round_trip() {
        let config = SimConfig {
            gravity: 0.3,
            ..Default::default()
        };
        let json = config.to_json().unwrap();
        assert_eq!(SimConfig::from_json(&json).unwrap(), config);
    }

    #[test]
    fn test_missing_file() {
        let err = SimConfig::load("/nonexistent/gravity-balls.json").unwrap_err();
        assert!(matches!(err, SimError::Io(_)));
    }
}
