//! Meta-reflection: per-location aversion scores learned from history.
//!
//! After every committed action the agent re-examines a window of its
//! recent history. Moving to the same location too often inside the
//! window reads as ping-ponging and earns the location a score penalty.
//! External events (alarms, hazard stories, help calls) adjust the same
//! scores through [`update_score`]. Scores below the avoidance cutoff
//! make planning and movement skip the location.

use std::collections::BTreeMap;

use cogito_types::{Agent, LocationId};

use crate::config::MindConfig;

/// Examine recent history and penalize over-visited move targets.
///
/// Counts MOVE targets inside the configured window; any target visited
/// more than `repeat_limit` times gets `inefficiency_penalty` subtracted
/// from its reflection score.
pub fn reflect(agent: &mut Agent, config: &MindConfig) {
    if agent.action_history.is_empty() {
        return;
    }

    let mut move_targets: BTreeMap<LocationId, usize> = BTreeMap::new();
    for entry in agent.action_history.iter().rev().take(config.reflection_window) {
        if let Some(target) = entry.action.move_target() {
            let count = move_targets.entry(target.clone()).or_insert(0);
            *count = count.saturating_add(1);
        }
    }

    for (target, count) in move_targets {
        if count > config.repeat_limit {
            let score = agent.reflection_scores.entry(target.clone()).or_insert(0.0);
            *score -= config.inefficiency_penalty;
            tracing::debug!(agent = %agent.id, location = %target, score = *score, "repetition penalty");
        }
    }
}

/// The reflection score of a location (0 when unscored).
pub fn score_for(agent: &Agent, location: &LocationId) -> f64 {
    agent.reflection_scores.get(location).copied().unwrap_or(0.0)
}

/// Apply an external delta to a location's score (alarms, stories,
/// help calls).
pub fn update_score(agent: &mut Agent, location: &LocationId, delta: f64) {
    let score = agent
        .reflection_scores
        .entry(location.clone())
        .or_insert(0.0);
    *score += delta;
}

/// Whether a location should be avoided under the configured cutoff.
pub fn is_avoided(agent: &Agent, location: &LocationId, config: &MindConfig) -> bool {
    score_for(agent, location) < config.avoidance_cutoff
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::float_cmp)]
mod tests {
    use cogito_types::{Action, HistoryEntry};

    use super::*;

    fn move_entry(tick: u64, target: &str) -> HistoryEntry {
        HistoryEntry {
            tick,
            action: Action::Move {
                target: LocationId::new(target),
            },
            success: true,
            energy_cost: 5,
        }
    }

    #[test]
    fn repeated_target_earns_a_penalty() {
        let mut agent = Agent::new("a1", "One", "A", 100);
        for tick in 0..4 {
            agent.action_history.push(move_entry(tick, "B"));
        }
        reflect(&mut agent, &MindConfig::default());
        assert_eq!(score_for(&agent, &LocationId::new("B")), -0.5);
    }

    #[test]
    fn three_visits_stay_unpenalized() {
        let mut agent = Agent::new("a1", "One", "A", 100);
        for tick in 0..3 {
            agent.action_history.push(move_entry(tick, "B"));
        }
        reflect(&mut agent, &MindConfig::default());
        assert_eq!(score_for(&agent, &LocationId::new("B")), 0.0);
    }

    #[test]
    fn only_the_window_counts() {
        let mut agent = Agent::new("a1", "One", "A", 100);
        // Four old visits pushed out of the window by 20 waits.
        for tick in 0..4 {
            agent.action_history.push(move_entry(tick, "B"));
        }
        for tick in 4..24 {
            agent.action_history.push(HistoryEntry {
                tick,
                action: Action::Wait,
                success: true,
                energy_cost: 0,
            });
        }
        reflect(&mut agent, &MindConfig::default());
        assert_eq!(score_for(&agent, &LocationId::new("B")), 0.0);
    }

    #[test]
    fn external_deltas_accumulate() {
        let mut agent = Agent::new("a1", "One", "A", 100);
        let danger = LocationId::new("Danger");
        update_score(&mut agent, &danger, -2.0);
        update_score(&mut agent, &danger, -1.5);
        assert_eq!(score_for(&agent, &danger), -3.5);
        assert!(is_avoided(&agent, &danger, &MindConfig::default()));
    }
}
