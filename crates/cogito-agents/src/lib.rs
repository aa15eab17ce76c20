//! The cognitive core: everything that happens inside an agent's head.
//!
//! This crate turns local perception into a single committed action per
//! tick. It sits between `cogito-types`/`cogito-world` (the data) and
//! `cogito-core` (the loop that commits the results). Nothing here
//! mutates the world -- the mind mutates only its own agent, and every
//! world change flows back through physics effects.
//!
//! # Modules
//!
//! - [`config`] -- Behavioral thresholds ([`MindConfig`])
//! - [`communication`] -- Inbox drain and cognitive-map merging
//! - [`goals`] -- Strategic goal ranking ([`goals::Goal`])
//! - [`imagination`] -- The forward model (plan safety projection)
//! - [`memory`] -- Long-term visit/food counters and region prediction
//! - [`mind`] -- The perceive/decide pipeline ([`mind::perceive`],
//!   [`mind::decide`])
//! - [`planner`] -- Scored multi-goal BFS over the cognitive map
//! - [`reflection`] -- Per-location aversion learned from history
//! - [`social`] -- Trust, reputation, stories, altruism, imitation

pub mod communication;
pub mod config;
pub mod goals;
pub mod imagination;
pub mod memory;
pub mod mind;
pub mod planner;
pub mod reflection;
pub mod social;

// Re-export primary types at crate root for convenience.
pub use config::MindConfig;
pub use goals::Goal;
pub use imagination::ProjectedState;
pub use planner::Plan;
