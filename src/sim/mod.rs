//! Deterministic simulation module
//!
//! All physics lives here. This module must be pure and deterministic:
//! - Fixed step only
//! - Seeded RNG only
//! - Stable iteration order (by slot index)
//! - No rendering or platform dependencies

pub mod collision;
pub mod integrate;
pub mod state;
pub mod step;

pub use collision::{COINCIDENT_NORMAL, ContactOutcome, overlaps, resolve};
pub use integrate::{BoundaryHits, advance};
pub use state::{Ball, BallId, BallPool, World, pair_mut};
pub use step::{StepStats, step};
