//! Inbox processing: merging received messages into the agent's beliefs.
//!
//! Messages are drained FIFO. Map updates merge additively and earn the
//! sender trust (more when they reveal food the receiver did not know
//! about). Alarms, help calls, and stories adjust reflection scores for
//! the referenced location, gated on at-least-neutral trust in the
//! sender. Puzzle help merges obstacle metadata so the planner can see
//! the puzzle. A message missing its location is a no-op.

use std::collections::BTreeMap;

use cogito_types::{Agent, CognitiveNode, LocationId, Message, MessagePayload, ObjectKind, StoryTopic};

use crate::config::MindConfig;
use crate::reflection;
use crate::social;

/// Base trust credit for any map update.
const MAP_UPDATE_TRUST_CREDIT: f64 = 0.05;

/// Extra trust per location whose food was news to the receiver.
const FOOD_REVEAL_TRUST_BONUS: f64 = 0.15;

/// Reflection delta applied by a believed alarm.
const ALARM_SCORE_DELTA: f64 = -2.0;

/// Reflection delta applied by a believed help call.
const HELP_CALL_SCORE_DELTA: f64 = 1.0;

/// Reflection delta applied by a believed hazard story.
const STORY_HAZARD_SCORE_DELTA: f64 = -1.5;

/// Reflection delta applied by a believed food story.
const STORY_FOOD_SCORE_DELTA: f64 = 0.5;

/// Drain the agent's inbox and apply every message. Returns the number
/// of messages processed.
pub fn process_messages(agent: &mut Agent, config: &MindConfig) -> usize {
    let messages: Vec<Message> = agent.inbox.drain(..).collect();
    let count = messages.len();

    for message in messages {
        let sender = message.sender_id;
        match message.payload {
            MessagePayload::Alarm { location_id } => {
                let Some(location) = location_id else {
                    continue;
                };
                if social::trust_for(agent, &sender, config) >= config.initial_trust {
                    reflection::update_score(agent, &location, ALARM_SCORE_DELTA);
                }
            }
            MessagePayload::HelpCall { location_id } => {
                let Some(location) = location_id else {
                    continue;
                };
                if social::trust_for(agent, &sender, config) >= config.initial_trust {
                    let node = agent.cognitive_map.entry(location.clone()).or_default();
                    node.tags.insert(ObjectKind::CoopFood);
                    node.requester_id = Some(sender);
                    reflection::update_score(agent, &location, HELP_CALL_SCORE_DELTA);
                }
            }
            MessagePayload::Story { story } => {
                if social::trust_for(agent, &sender, config) >= config.initial_trust {
                    let (delta, tag) = match story.topic {
                        StoryTopic::Hazard => (STORY_HAZARD_SCORE_DELTA, ObjectKind::Hazard),
                        StoryTopic::Food => (STORY_FOOD_SCORE_DELTA, ObjectKind::Food),
                    };
                    reflection::update_score(agent, &story.location_id, delta);
                    agent
                        .cognitive_map
                        .entry(story.location_id.clone())
                        .or_default()
                        .tags
                        .insert(tag);
                    // Retain the story as hearsay, attributed to whoever
                    // told it to us.
                    let mut retold = story;
                    retold.source = sender;
                    agent.stories.push(retold);
                }
            }
            MessagePayload::PuzzleHelp {
                location_id,
                obstacles,
            } => {
                let node = agent.cognitive_map.entry(location_id).or_default();
                node.tags.insert(ObjectKind::Obstacle);
                for incoming in obstacles {
                    if !node.obstacles.iter().any(|o| o.id == incoming.id) {
                        node.obstacles.push(incoming);
                    }
                }
            }
            MessagePayload::MapUpdate { nodes } => {
                let mut credit = MAP_UPDATE_TRUST_CREDIT;
                for (location, node) in &nodes {
                    if node.tags.contains(&ObjectKind::Food) && !knows_food_at(agent, location) {
                        credit += FOOD_REVEAL_TRUST_BONUS;
                    }
                }
                social::record_interaction(agent, &sender, credit, config);
                merge_map(agent, nodes);
            }
        }
    }

    count
}

/// Merge external map knowledge additively.
///
/// Unknown locations are inserted wholesale. Known locations take the
/// union of neighbors and the incoming tag set (last writer wins for
/// tags -- sharing is "what I see", not a diff).
pub fn merge_map(agent: &mut Agent, nodes: BTreeMap<LocationId, CognitiveNode>) {
    for (location, incoming) in nodes {
        match agent.cognitive_map.entry(location) {
            std::collections::btree_map::Entry::Vacant(entry) => {
                entry.insert(incoming);
            }
            std::collections::btree_map::Entry::Occupied(mut entry) => {
                let node = entry.get_mut();
                for neighbor in incoming.neighbors {
                    if !node.neighbors.contains(&neighbor) {
                        node.neighbors.push(neighbor);
                    }
                }
                node.tags = incoming.tags;
            }
        }
    }
}

fn knows_food_at(agent: &Agent, location: &LocationId) -> bool {
    agent
        .cognitive_map
        .get(location)
        .is_some_and(|node| node.tags.contains(&ObjectKind::Food))
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::float_cmp)]
mod tests {
    use cogito_types::{AgentId, ObstacleInfo, Story};

    use super::*;

    fn message(sender: &str, payload: MessagePayload) -> Message {
        Message {
            sender_id: AgentId::new(sender),
            tick: 0,
            payload,
        }
    }

    fn map_update(location: &str, tags: &[ObjectKind]) -> MessagePayload {
        let mut node = CognitiveNode::default();
        for tag in tags {
            node.tags.insert(*tag);
        }
        let mut nodes = BTreeMap::new();
        nodes.insert(LocationId::new(location), node);
        MessagePayload::MapUpdate { nodes }
    }

    #[test]
    fn alarm_from_trusted_sender_marks_danger() {
        let config = MindConfig::default();
        let mut agent = Agent::new("a1", "One", "A", 100);
        agent.inbox.push_back(message(
            "witness",
            MessagePayload::Alarm {
                location_id: Some(LocationId::new("Danger")),
            },
        ));
        let processed = process_messages(&mut agent, &config);
        assert_eq!(processed, 1);
        assert_eq!(
            reflection::score_for(&agent, &LocationId::new("Danger")),
            -2.0
        );
    }

    #[test]
    fn alarm_from_distrusted_sender_is_ignored() {
        let config = MindConfig::default();
        let mut agent = Agent::new("a1", "One", "A", 100);
        agent.trust.insert(AgentId::new("liar"), 0.1);
        agent.inbox.push_back(message(
            "liar",
            MessagePayload::Alarm {
                location_id: Some(LocationId::new("Danger")),
            },
        ));
        process_messages(&mut agent, &config);
        assert_eq!(
            reflection::score_for(&agent, &LocationId::new("Danger")),
            0.0
        );
    }

    #[test]
    fn alarm_without_location_is_a_no_op() {
        let config = MindConfig::default();
        let mut agent = Agent::new("a1", "One", "A", 100);
        agent
            .inbox
            .push_back(message("witness", MessagePayload::Alarm { location_id: None }));
        let processed = process_messages(&mut agent, &config);
        assert_eq!(processed, 1);
        assert!(agent.reflection_scores.is_empty());
    }

    #[test]
    fn help_call_tags_the_location_and_remembers_the_requester() {
        let config = MindConfig::default();
        let mut agent = Agent::new("a1", "One", "A", 100);
        agent.inbox.push_back(message(
            "friend",
            MessagePayload::HelpCall {
                location_id: Some(LocationId::new("Cliff")),
            },
        ));
        process_messages(&mut agent, &config);
        let node = agent.cognitive_map.get(&LocationId::new("Cliff")).unwrap();
        assert!(node.tags.contains(&ObjectKind::CoopFood));
        assert_eq!(node.requester_id, Some(AgentId::new("friend")));
        assert_eq!(
            reflection::score_for(&agent, &LocationId::new("Cliff")),
            1.0
        );
    }

    #[test]
    fn map_update_earns_base_trust() {
        let config = MindConfig::default();
        let mut agent = Agent::new("a1", "One", "A", 100);
        agent
            .inbox
            .push_back(message("peer", map_update("B", &[])));
        process_messages(&mut agent, &config);
        let trust = social::trust_for(&agent, &AgentId::new("peer"), &config);
        assert!((trust - 0.55).abs() < 1e-9);
    }

    #[test]
    fn revealing_food_earns_extra_trust() {
        let config = MindConfig::default();
        let mut agent = Agent::new("a1", "One", "A", 100);
        agent
            .inbox
            .push_back(message("peer", map_update("B", &[ObjectKind::Food])));
        process_messages(&mut agent, &config);
        let trust = social::trust_for(&agent, &AgentId::new("peer"), &config);
        assert!((trust - 0.7).abs() < 1e-9);
        // The food is now known; a repeat earns only the base credit.
        agent
            .inbox
            .push_back(message("peer", map_update("B", &[ObjectKind::Food])));
        process_messages(&mut agent, &config);
        let trust = social::trust_for(&agent, &AgentId::new("peer"), &config);
        assert!((trust - 0.75).abs() < 1e-9);
    }

    #[test]
    fn merge_unions_neighbors_and_overwrites_tags() {
        let mut agent = Agent::new("a1", "One", "A", 100);
        let mut known = CognitiveNode {
            neighbors: vec![LocationId::new("B")],
            ..CognitiveNode::default()
        };
        known.tags.insert(ObjectKind::Hazard);
        agent.cognitive_map.insert(LocationId::new("X"), known);

        let mut incoming = CognitiveNode {
            neighbors: vec![LocationId::new("B"), LocationId::new("C")],
            ..CognitiveNode::default()
        };
        incoming.tags.insert(ObjectKind::Food);
        let mut nodes = BTreeMap::new();
        nodes.insert(LocationId::new("X"), incoming);
        merge_map(&mut agent, nodes);

        let node = agent.cognitive_map.get(&LocationId::new("X")).unwrap();
        assert_eq!(node.neighbors.len(), 2);
        assert!(node.tags.contains(&ObjectKind::Food));
        assert!(!node.tags.contains(&ObjectKind::Hazard));
    }

    #[test]
    fn believed_story_adjusts_scores_and_is_retold_with_new_source() {
        let config = MindConfig::default();
        let mut agent = Agent::new("a1", "One", "A", 100);
        agent.inbox.push_back(message(
            "bard",
            MessagePayload::Story {
                story: Story {
                    topic: StoryTopic::Hazard,
                    location_id: LocationId::new("Swamp"),
                    tick: 3,
                    source: AgentId::new("original-witness"),
                    veracity: 1.0,
                },
            },
        ));
        process_messages(&mut agent, &config);
        assert_eq!(
            reflection::score_for(&agent, &LocationId::new("Swamp")),
            -1.5
        );
        let retained = agent.stories.last().unwrap();
        assert_eq!(retained.source, AgentId::new("bard"));
        let node = agent.cognitive_map.get(&LocationId::new("Swamp")).unwrap();
        assert!(node.tags.contains(&ObjectKind::Hazard));
    }

    #[test]
    fn puzzle_help_merges_obstacle_metadata() {
        let config = MindConfig::default();
        let mut agent = Agent::new("a1", "One", "A", 100);
        let obstacle = ObstacleInfo {
            id: cogito_types::ObjectId::new("gate"),
            tool_required: None,
            required_agents: 2,
        };
        agent.inbox.push_back(message(
            "caller",
            MessagePayload::PuzzleHelp {
                location_id: LocationId::new("Pass"),
                obstacles: vec![obstacle.clone()],
            },
        ));
        // Duplicate delivery must not duplicate the metadata.
        agent.inbox.push_back(message(
            "caller",
            MessagePayload::PuzzleHelp {
                location_id: LocationId::new("Pass"),
                obstacles: vec![obstacle],
            },
        ));
        process_messages(&mut agent, &config);
        let node = agent.cognitive_map.get(&LocationId::new("Pass")).unwrap();
        assert!(node.tags.contains(&ObjectKind::Obstacle));
        assert_eq!(node.obstacles.len(), 1);
    }
}
