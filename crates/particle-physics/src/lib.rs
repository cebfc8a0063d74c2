//! # Particle Physics
//!
//! Per-particle math for the particle field: motion integration, edge
//! reflection, pointer repulsion and proximity links. Nothing in here knows
//! about windows, GPUs or timers.

pub mod color;
pub mod config;
pub mod constants;
pub mod forces;
pub mod links;
pub mod particle;

pub use color::*;
pub use config::*;
pub use constants::*;
pub use forces::*;
pub use links::*;
pub use particle::*;
