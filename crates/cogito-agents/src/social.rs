//! The social layer: trust, reputation, stories, and cooperative
//! decisions.
//!
//! Trust is a fast-moving per-peer score in [0, 1], seeded at a neutral
//! default on first sight and nudged by every interaction. Reputation
//! is a slower aggregate in [-2, 2] earned through observed cooperation;
//! reputation changes bleed into trust at half strength. Both clamp on
//! every update -- no silent drift beyond bounds.
//!
//! Stories are the cultural layer: impactful observations (hazards,
//! cooperative food) become retellable stories, deduplicated per topic
//! and location inside a time window.

use cogito_types::{
    Action, Agent, AgentId, CommIntent, LocationId, ObjectKind, Perception, SocialNote, Story,
    StoryTopic, VisibleAgent,
};

use crate::config::MindConfig;
use crate::reflection;

/// Lowest possible reputation.
const REPUTATION_MIN: f64 = -2.0;

/// Highest possible reputation.
const REPUTATION_MAX: f64 = 2.0;

/// Fraction of a reputation delta that also moves trust.
const REPUTATION_TRUST_COUPLING: f64 = 0.5;

/// The trust this agent holds for a peer, defaulting to the configured
/// neutral value for strangers.
pub fn trust_for(agent: &Agent, other: &AgentId, config: &MindConfig) -> f64 {
    agent
        .trust
        .get(other)
        .copied()
        .unwrap_or(config.initial_trust)
}

/// The reputation this agent holds for a peer (0 for strangers).
pub fn reputation_for(agent: &Agent, other: &AgentId) -> f64 {
    agent.reputation.get(other).copied().unwrap_or(0.0)
}

/// Record a sighting of a peer: refresh the social note and seed trust
/// for first encounters.
pub fn note_seen_agent(agent: &mut Agent, seen: &VisibleAgent, config: &MindConfig) {
    agent.social_map.insert(
        seen.id.clone(),
        SocialNote {
            location_id: seen.location_id.clone(),
            energy: seen.energy,
            last_action: seen.last_action.clone(),
            distance: seen.distance,
        },
    );
    agent
        .trust
        .entry(seen.id.clone())
        .or_insert(config.initial_trust);
}

/// Nudge trust for a peer by `delta`, clamped to [0, 1].
pub fn record_interaction(agent: &mut Agent, other: &AgentId, delta: f64, config: &MindConfig) {
    let current = trust_for(agent, other, config);
    agent
        .trust
        .insert(other.clone(), (current + delta).clamp(0.0, 1.0));
}

/// Nudge reputation for a peer by `delta`, clamped to [-2, 2], and move
/// trust by half the delta.
pub fn update_reputation(agent: &mut Agent, other: &AgentId, delta: f64, config: &MindConfig) {
    let current = reputation_for(agent, other);
    agent.reputation.insert(
        other.clone(),
        (current + delta).clamp(REPUTATION_MIN, REPUTATION_MAX),
    );
    record_interaction(agent, other, delta * REPUTATION_TRUST_COUPLING, config);
}

/// The most valuable single fact this agent could share: the first
/// known food location in its cognitive map, if any.
pub fn highest_value_info(agent: &Agent) -> Option<LocationId> {
    agent
        .cognitive_map
        .iter()
        .find(|(_, node)| node.tags.contains(&ObjectKind::Food))
        .map(|(location, _)| location.clone())
}

/// Decide whether to altruistically share information with a needy
/// trusted peer.
///
/// Requires the agent itself to be comfortable (energy at or above the
/// altruism threshold); the first visible peer below the needy ceiling
/// with at least neutral trust gets a targeted share.
pub fn decide_cooperation(
    agent: &Agent,
    perception: &Perception,
    config: &MindConfig,
) -> Option<Action> {
    if perception.visible_agents.is_empty() {
        return None;
    }
    if agent.energy < config.altruism_energy_threshold {
        return None;
    }
    for seen in &perception.visible_agents {
        let trust = trust_for(agent, &seen.id, config);
        if seen.energy < config.needy_energy_threshold && trust >= config.initial_trust {
            return Some(Action::Communicate {
                intent: CommIntent::Share {
                    listener: seen.id.clone(),
                },
            });
        }
    }
    None
}

/// Pick a trusted adjacent peer's location to imitate, if any.
///
/// Only peers one hop away qualify (co-located peers teach nothing
/// about where to go), trust must clear the imitation threshold, and
/// known-dangerous destinations are skipped.
pub fn observation_to_imitate(
    agent: &Agent,
    perception: &Perception,
    config: &MindConfig,
) -> Option<LocationId> {
    for seen in &perception.visible_agents {
        if seen.distance != 1 {
            continue;
        }
        if trust_for(agent, &seen.id, config) < config.imitation_trust_threshold {
            continue;
        }
        if reflection::is_avoided(agent, &seen.location_id, config) {
            continue;
        }
        return Some(seen.location_id.clone());
    }
    None
}

/// Turn impactful observations into stories.
///
/// A visible hazard yields a HAZARD story, visible cooperative food a
/// FOOD story; duplicates for the same topic and location inside the
/// dedup window are suppressed.
pub fn generate_story(agent: &mut Agent, perception: &Perception, config: &MindConfig) {
    if !perception.visible_hazards.is_empty() {
        push_story(agent, StoryTopic::Hazard, perception, config);
    }
    if !perception.visible_coop_food.is_empty() {
        push_story(agent, StoryTopic::Food, perception, config);
    }
}

fn push_story(agent: &mut Agent, topic: StoryTopic, perception: &Perception, config: &MindConfig) {
    // A story is recent while its tick + window still exceeds the
    // current tick; written addition-side so early ticks cannot
    // underflow the horizon.
    let already_told = agent.stories.iter().any(|s| {
        s.topic == topic
            && s.location_id == perception.location_id
            && s.tick.saturating_add(config.story_dedup_window) > perception.tick
    });
    if already_told {
        return;
    }
    agent.stories.push(Story {
        topic,
        location_id: perception.location_id.clone(),
        tick: perception.tick,
        source: agent.id.clone(),
        veracity: 1.0,
    });
}

/// The story an agent would retell right now: the most recent one.
pub fn select_story(agent: &Agent) -> Option<&Story> {
    agent.stories.last()
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::float_cmp)]
mod tests {
    use cogito_types::{CognitiveNode, CoopFoodSighting, ObjectId};

    use super::*;

    fn seen(id: &str, location: &str, energy: i64, distance: u32) -> VisibleAgent {
        VisibleAgent {
            id: AgentId::new(id),
            location_id: LocationId::new(location),
            energy,
            last_action: None,
            distance,
        }
    }

    fn perception_with_agents(agents: Vec<VisibleAgent>) -> Perception {
        Perception {
            tick: 0,
            location_id: LocationId::new("A"),
            energy: 100,
            visible_food: Vec::new(),
            visible_hazards: Vec::new(),
            visible_coop_food: Vec::new(),
            visible_tools: Vec::new(),
            visible_obstacles: Vec::new(),
            neighbors: vec![LocationId::new("B")],
            visited_neighbors: Vec::new(),
            visible_agents: agents,
            inventory: Vec::new(),
        }
    }

    #[test]
    fn trust_clamps_to_unit_interval() {
        let config = MindConfig::default();
        let mut agent = Agent::new("a1", "One", "A", 100);
        let peer = AgentId::new("p1");
        record_interaction(&mut agent, &peer, 5.0, &config);
        assert_eq!(trust_for(&agent, &peer, &config), 1.0);
        record_interaction(&mut agent, &peer, -9.0, &config);
        assert_eq!(trust_for(&agent, &peer, &config), 0.0);
    }

    #[test]
    fn reputation_clamps_and_bleeds_into_trust() {
        let config = MindConfig::default();
        let mut agent = Agent::new("a1", "One", "A", 100);
        let peer = AgentId::new("p1");
        update_reputation(&mut agent, &peer, 0.5, &config);
        assert_eq!(reputation_for(&agent, &peer), 0.5);
        // Trust moved by half the delta from the neutral 0.5.
        assert_eq!(trust_for(&agent, &peer, &config), 0.75);
        update_reputation(&mut agent, &peer, 10.0, &config);
        assert_eq!(reputation_for(&agent, &peer), 2.0);
    }

    #[test]
    fn altruism_requires_comfort() {
        let config = MindConfig::default();
        let poor = Agent::new("a1", "One", "A", 40);
        let perception = perception_with_agents(vec![seen("p1", "A", 10, 0)]);
        assert!(decide_cooperation(&poor, &perception, &config).is_none());

        let rich = Agent::new("a2", "Two", "A", 90);
        let action = decide_cooperation(&rich, &perception, &config);
        assert!(matches!(
            action,
            Some(Action::Communicate {
                intent: CommIntent::Share { .. }
            })
        ));
    }

    #[test]
    fn imitation_needs_high_trust_and_distance_one() {
        let config = MindConfig::default();
        let mut agent = Agent::new("a1", "One", "A", 100);
        let perception = perception_with_agents(vec![seen("leader", "B", 90, 1)]);
        // Default trust 0.5 is below the 0.7 threshold.
        assert!(observation_to_imitate(&agent, &perception, &config).is_none());

        agent.trust.insert(AgentId::new("leader"), 0.9);
        assert_eq!(
            observation_to_imitate(&agent, &perception, &config),
            Some(LocationId::new("B"))
        );

        // Known danger blocks imitation.
        agent
            .reflection_scores
            .insert(LocationId::new("B"), -2.0);
        assert!(observation_to_imitate(&agent, &perception, &config).is_none());
    }

    #[test]
    fn stories_deduplicate_within_the_window() {
        let config = MindConfig::default();
        let mut agent = Agent::new("a1", "One", "A", 100);
        let mut perception = perception_with_agents(Vec::new());
        perception.visible_hazards.push(ObjectId::new("pit"));
        generate_story(&mut agent, &perception, &config);
        generate_story(&mut agent, &perception, &config);
        assert_eq!(agent.stories.len(), 1);

        // Far enough in the future the story can be retold.
        perception.tick = 30;
        generate_story(&mut agent, &perception, &config);
        assert_eq!(agent.stories.len(), 2);
    }

    #[test]
    fn coop_food_generates_a_food_story() {
        let config = MindConfig::default();
        let mut agent = Agent::new("a1", "One", "A", 100);
        let mut perception = perception_with_agents(Vec::new());
        perception.visible_coop_food.push(CoopFoodSighting {
            id: ObjectId::new("boulder"),
            required_agents: 2,
            value: 100,
        });
        generate_story(&mut agent, &perception, &config);
        assert_eq!(
            select_story(&agent).map(|s| s.topic),
            Some(StoryTopic::Food)
        );
    }

    #[test]
    fn highest_value_info_is_the_first_known_food() {
        let mut agent = Agent::new("a1", "One", "A", 100);
        assert!(highest_value_info(&agent).is_none());
        let mut node = CognitiveNode::default();
        node.tags.insert(ObjectKind::Food);
        agent.cognitive_map.insert(LocationId::new("Meadow"), node);
        assert_eq!(
            highest_value_info(&agent),
            Some(LocationId::new("Meadow"))
        );
    }
}
