//! Deterministic tick loop and orchestration for the Cogito simulation.
//!
//! This crate wires the layers together: it owns the [`World`], the
//! single seeded random generator, and the event sink, and drives the
//! per-tick pipeline (metabolism, message processing, perception,
//! decision, physics resolution, commit, reflection) for every agent in
//! registration order.
//!
//! # Modules
//!
//! - [`controller`] -- The [`Controller`] trait for externally driven
//!   tests
//! - [`sim`] -- The [`Simulation`] driver and [`SimConfig`]
//!
//! [`World`]: cogito_world::World

pub mod controller;
pub mod sim;

pub use controller::Controller;
pub use sim::{SimConfig, Simulation};
