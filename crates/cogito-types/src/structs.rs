//! Core entity structs: objects, agents, and the agent's belief state.
//!
//! Objects are owned by the world registry; location object-lists and
//! agent inventories hold ids into it. The [`Agent`] aggregate carries
//! all per-agent cognitive state (memory, cognitive map, plans, trust,
//! reputation, stories) so that the behavior layer can stay a set of
//! pure-ish functions over `&mut Agent`.
//!
//! Collections are `BTreeMap`/`BTreeSet` so iteration order -- and with
//! it the whole simulation -- is deterministic.

use std::collections::{BTreeMap, BTreeSet, VecDeque};

use serde::{Deserialize, Serialize};

use crate::actions::Action;
use crate::enums::{GoalKind, ObjectKind, StoryTopic};
use crate::ids::{AgentId, LocationId, ObjectId};
use crate::messages::Message;
use crate::perception::{ObstacleInfo, Perception, ToolInfo};

// ---------------------------------------------------------------------------
// Objects
// ---------------------------------------------------------------------------

/// A passive object in the world.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Object {
    /// Unique identifier.
    pub id: ObjectId,
    /// What the object is.
    pub kind: ObjectKind,
    /// Energy for food, damage per tick for hazards.
    pub value: i64,
    /// Where the object lies; empty while carried in an inventory.
    pub location_id: LocationId,
    /// Co-located alive agents required for EXTRACT (coop food) or
    /// USE (multi-agent obstacles). 1 means no cooperation needed.
    pub required_agents: u32,
    /// Tool type an obstacle demands, if any.
    pub tool_required: Option<String>,
    /// The tool type this object provides, when it is a tool.
    pub tool_type: Option<String>,
}

impl Object {
    /// Create an object with no cooperation or tool requirements.
    pub fn new(
        id: impl Into<ObjectId>,
        kind: ObjectKind,
        value: i64,
        location_id: impl Into<LocationId>,
    ) -> Self {
        Self {
            id: id.into(),
            kind,
            value,
            location_id: location_id.into(),
            required_agents: 1,
            tool_required: None,
            tool_type: None,
        }
    }
}

// ---------------------------------------------------------------------------
// Cognitive map
// ---------------------------------------------------------------------------

/// What an agent believes about one location.
///
/// The node for the agent's current location is authoritative each tick
/// (observation overwrites neighbors and tags); nodes learned from
/// messages are merged additively.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CognitiveNode {
    /// Believed neighbors, in discovery order.
    pub neighbors: Vec<LocationId>,
    /// Kind tags last associated with the location.
    pub tags: BTreeSet<ObjectKind>,
    /// Tools believed to be there.
    pub tools: Vec<ToolInfo>,
    /// Obstacles believed to be there.
    pub obstacles: Vec<ObstacleInfo>,
    /// Who asked for extraction help there, if anyone.
    pub requester_id: Option<AgentId>,
    /// The tick this node was last confirmed by observation.
    pub last_tick: u64,
}

// ---------------------------------------------------------------------------
// Long-term patterns, stories, history
// ---------------------------------------------------------------------------

/// Visit/food frequency counters for one location.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct SpatialPattern {
    /// How often the agent has perceived this location.
    pub total_visits: f64,
    /// How often food was visible during those visits.
    pub food_hits: f64,
}

/// A piece of cultural knowledge an agent can retell.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Story {
    /// What the story is about.
    pub topic: StoryTopic,
    /// The location it refers to.
    pub location_id: LocationId,
    /// When the underlying observation happened.
    pub tick: u64,
    /// Who this agent heard it from (itself for first-hand stories).
    pub source: AgentId,
    /// How much the originator believed it, in [0, 1].
    pub veracity: f64,
}

/// One entry in an agent's action history.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistoryEntry {
    /// The tick the action was committed.
    pub tick: u64,
    /// The committed action.
    pub action: Action,
    /// Whether physics accepted it.
    pub success: bool,
    /// The energy it cost.
    pub energy_cost: i64,
}

/// The last observation an agent holds about a peer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SocialNote {
    /// Where the peer was last seen.
    pub location_id: LocationId,
    /// Its energy at the time.
    pub energy: i64,
    /// The last action it was seen to commit.
    pub last_action: Option<Action>,
    /// 0 for co-located, 1 for adjacent.
    pub distance: u32,
}

// ---------------------------------------------------------------------------
// Skills
// ---------------------------------------------------------------------------

/// Per-agent multipliers applied to planner base scores. Successful
/// actions raise them slightly, biasing future plans toward what the
/// agent is already good at.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SkillSet {
    /// Multiplier for food and cooperative-extraction goals.
    pub extract: f64,
    /// Multiplier for obstacle and tool-fetch goals.
    pub tool_use: f64,
    /// Multiplier for frontier goals.
    pub explore: f64,
}

impl Default for SkillSet {
    fn default() -> Self {
        Self {
            extract: 1.0,
            tool_use: 1.0,
            explore: 1.0,
        }
    }
}

// ---------------------------------------------------------------------------
// Agents
// ---------------------------------------------------------------------------

/// An agent capable of perception, planning, and action.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Agent {
    /// Unique identifier.
    pub id: AgentId,
    /// Display name.
    pub name: String,
    /// Current location; must be a world-graph key while non-empty.
    pub location_id: LocationId,
    /// Current energy. At or below zero the agent is dead.
    pub energy: i64,
    /// Whether the agent still acts.
    pub is_alive: bool,
    /// The last tick the simulation processed this agent.
    pub last_tick_updated: u64,
    /// Short-term memory: the most recent perceptions, bounded.
    pub memory: VecDeque<Perception>,
    /// Every location the agent has stood in.
    pub visited_locations: BTreeSet<LocationId>,
    /// The agent's internal model of the world graph and contents.
    pub cognitive_map: BTreeMap<LocationId, CognitiveNode>,
    /// Pending messages, drained FIFO at the start of each tick.
    pub inbox: VecDeque<Message>,
    /// Committed actions and their outcomes.
    pub action_history: Vec<HistoryEntry>,
    /// Per-location aversion scores; below the avoidance cutoff a
    /// location is skipped in planning and movement.
    pub reflection_scores: BTreeMap<LocationId, f64>,
    /// Queued actions from the current plan.
    pub plan_queue: VecDeque<Action>,
    /// The destination of the current plan, if one is active.
    pub planned_target: Option<LocationId>,
    /// Last observation per known peer.
    pub social_map: BTreeMap<AgentId, SocialNote>,
    /// Trust per peer, clamped to [0, 1]. Unknown peers read as 0.5.
    pub trust: BTreeMap<AgentId, f64>,
    /// Reputation per peer, clamped to [-2, 2]. Unknown peers read as 0.
    pub reputation: BTreeMap<AgentId, f64>,
    /// The goal currently steering the mind.
    pub current_goal: GoalKind,
    /// Previous goals, pushed on every switch.
    pub goal_history: Vec<GoalKind>,
    /// Visit/food counters per location.
    pub spatial_patterns: BTreeMap<LocationId, SpatialPattern>,
    /// Stories the agent can retell, oldest first.
    pub stories: Vec<Story>,
    /// Ids of carried objects, in pickup order.
    pub inventory: Vec<ObjectId>,
    /// Home base, chosen at the first exploration tick.
    pub home_location_id: Option<LocationId>,
    /// The most recent action, observable by nearby agents.
    pub last_action: Option<Action>,
    /// Planner score multipliers.
    pub skills: SkillSet,
}

impl Agent {
    /// Create an alive agent with default cognitive state.
    pub fn new(
        id: impl Into<AgentId>,
        name: impl Into<String>,
        location_id: impl Into<LocationId>,
        energy: i64,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            location_id: location_id.into(),
            energy,
            is_alive: true,
            last_tick_updated: 0,
            memory: VecDeque::new(),
            visited_locations: BTreeSet::new(),
            cognitive_map: BTreeMap::new(),
            inbox: VecDeque::new(),
            action_history: Vec::new(),
            reflection_scores: BTreeMap::new(),
            plan_queue: VecDeque::new(),
            planned_target: None,
            social_map: BTreeMap::new(),
            trust: BTreeMap::new(),
            reputation: BTreeMap::new(),
            current_goal: GoalKind::Explore,
            goal_history: Vec::new(),
            spatial_patterns: BTreeMap::new(),
            stories: Vec::new(),
            inventory: Vec::new(),
            home_location_id: None,
            last_action: None,
            skills: SkillSet::default(),
        }
    }

    /// Whether the agent carries the given object.
    pub fn carries(&self, object_id: &ObjectId) -> bool {
        self.inventory.contains(object_id)
    }
}
