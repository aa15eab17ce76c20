//! Perception payloads delivered to agents each tick.
//!
//! A [`Perception`] is everything an agent is allowed to know about the
//! world at its location: visible objects broken out by kind, the local
//! neighbor list, nearby agents (co-located and one hop away), and a
//! snapshot of its own inventory. Perceptions are also the unit stored
//! in short-term memory, so they derive `Clone` and serde traits.

use serde::{Deserialize, Serialize};

use crate::actions::Action;
use crate::enums::ObjectKind;
use crate::ids::{AgentId, LocationId, ObjectId};

// ---------------------------------------------------------------------------
// Sightings
// ---------------------------------------------------------------------------

/// A cooperative food resource seen at the current location.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CoopFoodSighting {
    /// The resource object.
    pub id: ObjectId,
    /// How many co-located alive agents extraction requires.
    pub required_agents: u32,
    /// Energy the extractor gains.
    pub value: i64,
}

/// A tool seen at a location, or remembered in the cognitive map.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ToolInfo {
    /// The tool object.
    pub id: ObjectId,
    /// What the tool unlocks (matched against an obstacle's
    /// `tool_required`), if the tool is typed at all.
    pub tool_type: Option<String>,
}

/// An obstacle seen at a location, or remembered in the cognitive map.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ObstacleInfo {
    /// The obstacle object.
    pub id: ObjectId,
    /// The tool type needed to remove it, if any.
    pub tool_required: Option<String>,
    /// How many co-located alive agents removal requires.
    pub required_agents: u32,
}

/// Another agent seen during perception.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VisibleAgent {
    /// The observed agent.
    pub id: AgentId,
    /// Where it was seen.
    pub location_id: LocationId,
    /// Its energy at observation time.
    pub energy: i64,
    /// The last action it committed, if it has acted yet.
    pub last_action: Option<Action>,
    /// 0 when co-located, 1 when in an adjacent location.
    pub distance: u32,
}

/// A carried object, resolved against the world registry so the mind can
/// reason about kinds and tool types without consulting the world.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CarriedItem {
    /// The carried object.
    pub id: ObjectId,
    /// Its kind.
    pub kind: ObjectKind,
    /// Its tool type, when the object is a typed tool.
    pub tool_type: Option<String>,
}

// ---------------------------------------------------------------------------
// Perception
// ---------------------------------------------------------------------------

/// Everything an agent perceives during one tick.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Perception {
    /// The tick this perception was gathered.
    pub tick: u64,
    /// The agent's location.
    pub location_id: LocationId,
    /// The agent's energy after metabolism.
    pub energy: i64,
    /// Food objects here.
    pub visible_food: Vec<ObjectId>,
    /// Hazard objects here.
    pub visible_hazards: Vec<ObjectId>,
    /// Cooperative food here, with extraction requirements.
    pub visible_coop_food: Vec<CoopFoodSighting>,
    /// Tools here.
    pub visible_tools: Vec<ToolInfo>,
    /// Obstacles here.
    pub visible_obstacles: Vec<ObstacleInfo>,
    /// Neighboring locations, in world order.
    pub neighbors: Vec<LocationId>,
    /// The subset of neighbors the agent has already visited.
    pub visited_neighbors: Vec<LocationId>,
    /// Alive agents co-located (distance 0) or adjacent (distance 1).
    pub visible_agents: Vec<VisibleAgent>,
    /// Snapshot of the agent's inventory.
    pub inventory: Vec<CarriedItem>,
}
