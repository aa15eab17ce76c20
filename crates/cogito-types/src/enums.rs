//! Enumeration types for the Cogito simulation.
//!
//! All enums are closed tagged unions and serialize with
//! SCREAMING_SNAKE_CASE tags so that event-log consumers see the same
//! names the simulation uses internally ("COOP_FOOD", "EXPLORE", ...).

use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Object kinds
// ---------------------------------------------------------------------------

/// The kind of a passive object in the world.
///
/// The same tags are stored in agents' cognitive maps to describe what
/// was last seen at a location.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ObjectKind {
    /// Edible resource; `value` is the energy restored on consumption.
    Food,
    /// Impassable scenery. Inert in the current rule set.
    Barrier,
    /// A carryable tool; `tool_type` names what it unlocks.
    Tool,
    /// Environmental danger; `value` is the energy drained per tick
    /// from every agent standing on it.
    Hazard,
    /// Food that needs `required_agents` co-located agents to extract.
    CoopFood,
    /// A blocker that is removed with USE, possibly requiring a tool
    /// and/or several co-located agents.
    Obstacle,
}

// ---------------------------------------------------------------------------
// Strategic goals
// ---------------------------------------------------------------------------

/// A strategic goal an agent can pursue.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum GoalKind {
    /// Find energy before starving.
    Survival,
    /// Help, follow, or inform other agents.
    Social,
    /// Expand the cognitive map.
    Explore,
    /// Reserved for long-horizon objectives.
    LongTerm,
}

// ---------------------------------------------------------------------------
// Story topics
// ---------------------------------------------------------------------------

/// The topic of a story an agent generates or retells.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum StoryTopic {
    /// A warning about a dangerous location.
    Hazard,
    /// A tip about a food-rich location.
    Food,
}
