//! # Particle Simulation
//!
//! The frame-driven particle field: per-frame update, proximity lines and
//! dots drawn through a [`Canvas`], pointer/touch/resize input, and a
//! [`Stage`] that owns one field per drawing surface.

pub mod canvas;
pub mod debounce;
pub mod field;
pub mod stage;

pub use canvas::*;
pub use debounce::*;
pub use field::*;
pub use stage::*;
