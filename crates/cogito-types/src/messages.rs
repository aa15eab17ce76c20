//! Inter-agent messages.
//!
//! Messages are produced by the simulation loop when it translates a
//! successful COMMUNICATE effect, buffered for one tick, and drained from
//! the recipient's inbox at the start of its next tick. The payload is a
//! closed enum; a variant with a missing optional field (an alarm without
//! a location) is processed as a no-op on that field.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::ids::{AgentId, LocationId};
use crate::perception::ObstacleInfo;
use crate::structs::{CognitiveNode, Story};

/// The payload of an inter-agent message.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum MessagePayload {
    /// A partial cognitive map to merge additively.
    MapUpdate {
        /// Location knowledge keyed by location id.
        nodes: BTreeMap<LocationId, CognitiveNode>,
    },
    /// A hazard warning.
    Alarm {
        /// Where the hazard is. Absent means the warning is ignored.
        location_id: Option<LocationId>,
    },
    /// A request for extraction helpers.
    HelpCall {
        /// Where the cooperative resource is. Absent means ignored.
        location_id: Option<LocationId>,
    },
    /// A request for obstacle helpers, with the obstacle's metadata.
    PuzzleHelp {
        /// Where the obstacle is.
        location_id: LocationId,
        /// The obstacle(s) needing attention.
        obstacles: Vec<ObstacleInfo>,
    },
    /// A retold story.
    Story {
        /// The story being shared.
        story: Story,
    },
}

impl MessagePayload {
    /// The SCREAMING_SNAKE_CASE tag of this payload.
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::MapUpdate { .. } => "MAP_UPDATE",
            Self::Alarm { .. } => "ALARM",
            Self::HelpCall { .. } => "HELP_CALL",
            Self::PuzzleHelp { .. } => "PUZZLE_HELP",
            Self::Story { .. } => "STORY",
        }
    }
}

/// A message sitting in an agent's inbox.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Message {
    /// Who sent it.
    pub sender_id: AgentId,
    /// The tick it was sent.
    pub tick: u64,
    /// What it says.
    pub payload: MessagePayload,
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn payload_tags_match_record_names() {
        let alarm = MessagePayload::Alarm { location_id: None };
        assert_eq!(alarm.kind(), "ALARM");
        let json = serde_json::to_value(&alarm).unwrap();
        assert_eq!(json["type"], "ALARM");
    }
}
