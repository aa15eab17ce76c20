//! Strategic goal selection.
//!
//! Each tick the goal manager ranks candidate goals and the mind adopts
//! the highest-priority one. Survival outranks everything once energy
//! drops far enough; social goals appear when a comfortable agent sees
//! needy peers or trusted leaders; exploration is the ever-present
//! default.

use cogito_types::{Agent, AgentId, GoalKind, Perception};

use crate::config::MindConfig;
use crate::social;

/// Energy below which survival becomes a strategic concern. The mind's
/// reactive eating threshold is lower; strategy starts worrying earlier.
const SURVIVAL_WORRY_THRESHOLD: i64 = 40;

/// Priority gained per point of energy deficit below the worry line.
const SURVIVAL_PRIORITY_SCALE: f64 = 2.5;

/// Priority of helping a needy visible peer.
const SOCIAL_AID_PRIORITY: f64 = 50.0;

/// Priority of following a trusted visible leader.
const SOCIAL_FOLLOW_PRIORITY: f64 = 30.0;

/// Baseline priority of exploration.
const EXPLORE_BASE_PRIORITY: f64 = 10.0;

/// A ranked goal candidate.
#[derive(Debug, Clone, PartialEq)]
pub struct Goal {
    /// The goal's strategic tag.
    pub kind: GoalKind,
    /// Its computed priority; highest wins.
    pub priority: f64,
    /// The peer this goal is about, for social goals.
    pub target: Option<AgentId>,
}

/// Enumerate every candidate goal with its priority, highest first on
/// ties going to the earliest enumerated.
pub fn evaluate_goals(agent: &Agent, perception: &Perception, config: &MindConfig) -> Vec<Goal> {
    let mut goals = Vec::new();

    // Survival scales with the energy deficit.
    if perception.energy < SURVIVAL_WORRY_THRESHOLD {
        let deficit = SURVIVAL_WORRY_THRESHOLD.saturating_sub(perception.energy);
        let deficit = i32::try_from(deficit).map(f64::from).unwrap_or(0.0);
        goals.push(Goal {
            kind: GoalKind::Survival,
            priority: deficit * SURVIVAL_PRIORITY_SCALE,
            target: None,
        });
    }

    // Aid: only the comfortable help.
    if perception.energy > config.altruism_energy_threshold {
        for seen in &perception.visible_agents {
            if seen.energy < config.needy_energy_threshold {
                goals.push(Goal {
                    kind: GoalKind::Social,
                    priority: SOCIAL_AID_PRIORITY,
                    target: Some(seen.id.clone()),
                });
            }
        }
    }

    // Following: trusted leaders are worth staying close to.
    for seen in &perception.visible_agents {
        if social::trust_for(agent, &seen.id, config) > config.leader_trust_threshold {
            goals.push(Goal {
                kind: GoalKind::Social,
                priority: SOCIAL_FOLLOW_PRIORITY,
                target: Some(seen.id.clone()),
            });
        }
    }

    goals.push(Goal {
        kind: GoalKind::Explore,
        priority: EXPLORE_BASE_PRIORITY,
        target: None,
    });

    goals
}

/// The single goal steering this tick.
pub fn select_top_goal(agent: &Agent, perception: &Perception, config: &MindConfig) -> Goal {
    let goals = evaluate_goals(agent, perception, config);
    let mut best = Goal {
        kind: GoalKind::Explore,
        priority: 0.0,
        target: None,
    };
    for goal in goals {
        if goal.priority > best.priority {
            best = goal;
        }
    }
    best
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::float_cmp)]
mod tests {
    use cogito_types::{LocationId, VisibleAgent};

    use super::*;

    fn perception(energy: i64, agents: Vec<VisibleAgent>) -> Perception {
        Perception {
            tick: 0,
            location_id: LocationId::new("A"),
            energy,
            visible_food: Vec::new(),
            visible_hazards: Vec::new(),
            visible_coop_food: Vec::new(),
            visible_tools: Vec::new(),
            visible_obstacles: Vec::new(),
            neighbors: Vec::new(),
            visited_neighbors: Vec::new(),
            visible_agents: agents,
            inventory: Vec::new(),
        }
    }

    fn seen(id: &str, energy: i64) -> VisibleAgent {
        VisibleAgent {
            id: AgentId::new(id),
            location_id: LocationId::new("A"),
            energy,
            last_action: None,
            distance: 0,
        }
    }

    #[test]
    fn healthy_loner_explores() {
        let agent = Agent::new("a1", "One", "A", 100);
        let goal = select_top_goal(&agent, &perception(100, Vec::new()), &MindConfig::default());
        assert_eq!(goal.kind, GoalKind::Explore);
    }

    #[test]
    fn hunger_escalates_to_survival() {
        let agent = Agent::new("a1", "One", "A", 20);
        let goal = select_top_goal(&agent, &perception(20, Vec::new()), &MindConfig::default());
        assert_eq!(goal.kind, GoalKind::Survival);
        assert_eq!(goal.priority, 50.0);
    }

    #[test]
    fn rich_agent_prioritizes_needy_peers() {
        let agent = Agent::new("a1", "One", "A", 90);
        let goal = select_top_goal(
            &agent,
            &perception(90, vec![seen("starving", 10)]),
            &MindConfig::default(),
        );
        assert_eq!(goal.kind, GoalKind::Social);
        assert_eq!(goal.target, Some(AgentId::new("starving")));
    }

    #[test]
    fn trusted_leader_beats_exploration() {
        let mut agent = Agent::new("a1", "One", "A", 50);
        agent.trust.insert(AgentId::new("leader"), 0.8);
        let goal = select_top_goal(
            &agent,
            &perception(50, vec![seen("leader", 80)]),
            &MindConfig::default(),
        );
        assert_eq!(goal.kind, GoalKind::Social);
        assert_eq!(goal.priority, SOCIAL_FOLLOW_PRIORITY);
    }

    #[test]
    fn deep_hunger_outranks_social_pull() {
        let mut agent = Agent::new("a1", "One", "A", 10);
        agent.trust.insert(AgentId::new("leader"), 0.9);
        let goal = select_top_goal(
            &agent,
            &perception(10, vec![seen("leader", 80)]),
            &MindConfig::default(),
        );
        // (40 - 10) * 2.5 = 75 > 30.
        assert_eq!(goal.kind, GoalKind::Survival);
        assert_eq!(goal.priority, 75.0);
    }
}
