//! Long-term spatial memory: visit and food-hit frequency counters.
//!
//! Every perception bumps the counters for the perceived location; the
//! analyzer predicts the most food-likely region from the accumulated
//! hit ratios. This is the agent's only statistical model of the world --
//! deliberately simple frequency counting, no learning beyond it.

use cogito_types::{Agent, LocationId, Perception};

/// Update the counters for the perceived location.
///
/// `total_visits` always increments; `food_hits` increments only when
/// food was visible.
pub fn update_patterns(agent: &mut Agent, perception: &Perception) {
    let pattern = agent
        .spatial_patterns
        .entry(perception.location_id.clone())
        .or_default();
    pattern.total_visits += 1.0;
    if !perception.visible_food.is_empty() {
        pattern.food_hits += 1.0;
    }
}

/// The historical food hit rate for a location (0 when unvisited).
pub fn food_hit_rate(agent: &Agent, location: &LocationId) -> f64 {
    agent
        .spatial_patterns
        .get(location)
        .map_or(0.0, |p| {
            if p.total_visits <= 0.0 {
                0.0
            } else {
                p.food_hits / p.total_visits
            }
        })
}

/// The location with the highest positive food hit rate, if any.
///
/// Locations with fewer than one recorded visit are ignored. Ties
/// resolve to the lexicographically first location id, because the
/// pattern map iterates in key order.
pub fn predict_resource_location(agent: &Agent) -> Option<LocationId> {
    let mut best: Option<(&LocationId, f64)> = None;
    for (location, pattern) in &agent.spatial_patterns {
        if pattern.total_visits < 1.0 {
            continue;
        }
        let rate = pattern.food_hits / pattern.total_visits;
        if rate <= 0.0 {
            continue;
        }
        if best.is_none_or(|(_, best_rate)| rate > best_rate) {
            best = Some((location, rate));
        }
    }
    best.map(|(location, _)| location.clone())
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::float_cmp)]
mod tests {
    use cogito_types::{ObjectId, SpatialPattern};

    use super::*;

    fn bare_perception(location: &str, food: bool) -> Perception {
        Perception {
            tick: 0,
            location_id: LocationId::new(location),
            energy: 100,
            visible_food: if food {
                vec![ObjectId::new("berry")]
            } else {
                Vec::new()
            },
            visible_hazards: Vec::new(),
            visible_coop_food: Vec::new(),
            visible_tools: Vec::new(),
            visible_obstacles: Vec::new(),
            neighbors: Vec::new(),
            visited_neighbors: Vec::new(),
            visible_agents: Vec::new(),
            inventory: Vec::new(),
        }
    }

    #[test]
    fn counters_track_visits_and_hits() {
        let mut agent = Agent::new("a1", "One", "A", 100);
        update_patterns(&mut agent, &bare_perception("A", true));
        update_patterns(&mut agent, &bare_perception("A", false));
        let pattern = agent
            .spatial_patterns
            .get(&LocationId::new("A"))
            .copied()
            .unwrap();
        assert_eq!(pattern.total_visits, 2.0);
        assert_eq!(pattern.food_hits, 1.0);
        assert_eq!(food_hit_rate(&agent, &LocationId::new("A")), 0.5);
    }

    #[test]
    fn prediction_prefers_the_best_ratio() {
        let mut agent = Agent::new("a1", "One", "A", 100);
        agent.spatial_patterns.insert(
            LocationId::new("Meadow"),
            SpatialPattern {
                total_visits: 4.0,
                food_hits: 1.0,
            },
        );
        agent.spatial_patterns.insert(
            LocationId::new("Kitchen"),
            SpatialPattern {
                total_visits: 5.0,
                food_hits: 5.0,
            },
        );
        assert_eq!(
            predict_resource_location(&agent),
            Some(LocationId::new("Kitchen"))
        );
    }

    #[test]
    fn zero_hit_history_predicts_nothing() {
        let mut agent = Agent::new("a1", "One", "A", 100);
        agent.spatial_patterns.insert(
            LocationId::new("Desert"),
            SpatialPattern {
                total_visits: 10.0,
                food_hits: 0.0,
            },
        );
        assert_eq!(predict_resource_location(&agent), None);
    }

    #[test]
    fn ties_resolve_to_the_first_key() {
        let mut agent = Agent::new("a1", "One", "A", 100);
        for name in ["Beta", "Alpha"] {
            agent.spatial_patterns.insert(
                LocationId::new(name),
                SpatialPattern {
                    total_visits: 2.0,
                    food_hits: 2.0,
                },
            );
        }
        assert_eq!(
            predict_resource_location(&agent),
            Some(LocationId::new("Alpha"))
        );
    }
}
