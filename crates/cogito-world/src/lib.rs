//! World graph and entity registries for the Cogito simulation.
//!
//! This crate models the physical substrate: a static graph of locations,
//! a central object registry, and the agent roster. It owns all
//! authoritative state; every mutation goes through the simulation loop's
//! commit step.
//!
//! # Modules
//!
//! - [`world`] -- The [`World`] container and its queries/mutations.

pub mod world;

pub use world::{LocationNode, World};
