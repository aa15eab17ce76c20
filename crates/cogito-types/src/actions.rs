//! Actions agents commit and the effects physics derives from them.
//!
//! Per-action payloads live in the enum variants rather than in a grab-bag
//! of optional fields, so an [`Action`] is always well-formed by
//! construction. An [`Effect`] is the pure description of what an action
//! would do to the world; only the simulation loop commits it.

use serde::{Deserialize, Serialize};

use crate::ids::{AgentId, LocationId, ObjectId};

// ---------------------------------------------------------------------------
// Communication intents
// ---------------------------------------------------------------------------

/// What a COMMUNICATE action is trying to say.
///
/// The simulation loop translates the intent into concrete messages in
/// recipients' inboxes; physics only charges the communication cost.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum CommIntent {
    /// Share the whole cognitive map with every other agent.
    Broadcast,
    /// Warn everyone about a hazard at the speaker's location.
    Alarm,
    /// Ask everyone for help extracting a cooperative resource here.
    HelpCall,
    /// Ask everyone for help with a multi-agent obstacle.
    PuzzleHelp {
        /// The obstacle that needs more participants.
        object_id: ObjectId,
    },
    /// Tell one co-located listener the most recent story.
    Story {
        /// The listener.
        listener: AgentId,
    },
    /// Share the highest-value known information with one agent.
    Share {
        /// The recipient.
        listener: AgentId,
    },
}

// ---------------------------------------------------------------------------
// Actions
// ---------------------------------------------------------------------------

/// An action an agent can commit during its tick.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Action {
    /// Do nothing this tick.
    Wait,
    /// Move to a neighboring location.
    Move {
        /// The destination location.
        target: LocationId,
    },
    /// Eat a food object at the current location.
    Consume {
        /// The food object.
        object_id: ObjectId,
    },
    /// Speak; the payload says what and to whom.
    Communicate {
        /// What the speaker is trying to say.
        intent: CommIntent,
    },
    /// Take an object at the current location into the inventory.
    Pickup {
        /// The object to carry.
        object_id: ObjectId,
    },
    /// Place a carried object at the current location.
    Drop {
        /// The carried object.
        object_id: ObjectId,
    },
    /// Harvest a cooperative resource at the current location.
    Extract {
        /// The cooperative resource.
        object_id: ObjectId,
    },
    /// Apply a tool (or bare hands) to an obstacle here.
    Use {
        /// The obstacle.
        object_id: ObjectId,
    },
}

impl Action {
    /// The SCREAMING_SNAKE_CASE name of the action, as logged in
    /// DECISION records.
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Wait => "WAIT",
            Self::Move { .. } => "MOVE",
            Self::Consume { .. } => "CONSUME",
            Self::Communicate { .. } => "COMMUNICATE",
            Self::Pickup { .. } => "PICKUP",
            Self::Drop { .. } => "DROP",
            Self::Extract { .. } => "EXTRACT",
            Self::Use { .. } => "USE",
        }
    }

    /// The movement destination, if this is a MOVE.
    pub const fn move_target(&self) -> Option<&LocationId> {
        match self {
            Self::Move { target } => Some(target),
            _ => None,
        }
    }
}

// ---------------------------------------------------------------------------
// Effects
// ---------------------------------------------------------------------------

/// The pure outcome of applying an action under the physics rules.
///
/// Physics never mutates the world or the agent; it returns an `Effect`
/// and the simulation loop alone commits the described deltas.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Effect {
    /// The acting agent.
    pub agent_id: AgentId,
    /// The action this effect resolves.
    pub action: Action,
    /// Whether the action is legal in the current state.
    pub success: bool,
    /// Energy the agent pays.
    pub energy_cost: i64,
    /// Energy the agent gains.
    pub energy_gain: i64,
    /// New location for the agent, when the action relocates it.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub new_location_id: Option<LocationId>,
    /// Object leaving the world or a location index (consumed,
    /// extracted, used up, or picked up).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub removed_object_id: Option<ObjectId>,
    /// Object re-entering a location index (dropped from an inventory).
    /// The object itself stays owned by the world registry.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub added_object_id: Option<ObjectId>,
    /// Human-readable description of the outcome.
    pub message: String,
}

impl Effect {
    /// A baseline effect with no energy deltas or object transfers.
    pub fn new(agent_id: AgentId, action: Action, success: bool, message: impl Into<String>) -> Self {
        Self {
            agent_id,
            action,
            success,
            energy_cost: 0,
            energy_gain: 0,
            new_location_id: None,
            removed_object_id: None,
            added_object_id: None,
            message: message.into(),
        }
    }

    /// A failed effect with a descriptive message and no deltas.
    pub fn failure(agent_id: AgentId, action: Action, message: impl Into<String>) -> Self {
        Self::new(agent_id, action, false, message)
    }
}
