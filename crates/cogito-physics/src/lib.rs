//! Pure action resolution rules for the Cogito simulation.
//!
//! Physics is a stateless rules engine: `(&World, &Agent, &Action)` in,
//! owned [`Effect`] out. Nothing here mutates anything -- purity is
//! enforced by the borrow types -- and nothing here fails hard: an
//! illegal action resolves to an unsuccessful effect with a descriptive
//! message. The simulation loop alone commits effects to the world.
//!
//! # Modules
//!
//! - [`rules`] -- The per-action rule functions and the metabolism rule.
//!
//! [`Effect`]: cogito_types::Effect

pub mod rules;

pub use rules::{apply_action, metabolism, valid_actions};

// ---------------------------------------------------------------------------
// Cost constants
// ---------------------------------------------------------------------------

/// Baseline energy drained from every alive agent each tick.
pub const METABOLISM_COST: i64 = 1;

/// Energy cost of moving to a neighboring location.
pub const MOVE_COST: i64 = 5;

/// Energy cost of a COMMUNICATE action.
pub const COMM_COST: i64 = 2;

/// Energy cost of picking an object up.
pub const PICKUP_COST: i64 = 2;

/// Energy cost of dropping a carried object.
pub const DROP_COST: i64 = 1;

/// Energy cost of extracting a cooperative resource.
pub const EXTRACT_COST: i64 = 3;

/// Energy cost of using a tool on an obstacle.
pub const USE_COST: i64 = 2;
