//! The planner: scored multi-goal breadth-first search over the
//! cognitive map.
//!
//! Candidate goals are enumerated from what the agent believes (food,
//! cooperative food, obstacles, tools), what it has never seen
//! (frontiers), what it has not seen lately (stale nodes), and where
//! food has historically been (likely regions, with a probabilistic
//! fallback). Each candidate gets a base score -- scaled by the agent's
//! skills -- and a BFS over the map, skipping avoided nodes, discounts
//! the score by path length. The best reachable candidate becomes a
//! sequence of MOVE actions.

use std::collections::{BTreeMap, BTreeSet, VecDeque};

use cogito_types::{Action, Agent, CarriedItem, LocationId, ObjectKind};

use crate::config::MindConfig;
use crate::memory;
use crate::reflection;

/// Base score for a remembered food location.
const FOOD_BASE: f64 = 100.0;

/// Base score for a cooperative food location.
const COOP_FOOD_BASE: f64 = 120.0;

/// Score contribution per point of the requester's reputation.
const COOP_REPUTATION_WEIGHT: f64 = 20.0;

/// Base score for an obstacle needing no tool.
const OBSTACLE_PLAIN_BASE: f64 = 90.0;

/// Base score for an obstacle whose tool the agent carries.
const OBSTACLE_TOOLED_BASE: f64 = 110.0;

/// Base score for fetching a known tool an obstacle needs.
const GET_TOOL_BASE: f64 = 115.0;

/// Base score for an unexplored frontier.
const FRONTIER_BASE: f64 = 50.0;

/// Base score for a node not confirmed in a long time.
const STALE_FRONTIER_BASE: f64 = 45.0;

/// Base score for a statistically food-likely region.
const LIKELY_REGION_BASE: f64 = 75.0;

/// Hit ratio above which a region counts as food-likely.
const LIKELY_REGION_RATIO: f64 = 0.3;

/// Base score for the analyzer's best-region fallback.
const PROBABLE_FOOD_BASE: f64 = 30.0;

/// A generated plan: the moves to walk and where they lead.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Plan {
    /// MOVE actions along the chosen path, in order.
    pub steps: Vec<Action>,
    /// The goal location the path ends at.
    pub target: LocationId,
}

/// A scored goal candidate.
#[derive(Debug, Clone)]
struct Candidate {
    score: f64,
    target: LocationId,
    kind: &'static str,
}

/// Generate the best multi-step plan from the agent's beliefs, or
/// `None` when no scored candidate is reachable.
///
/// `carried` is the inventory snapshot from the current perception; the
/// planner needs it to tell tooled obstacles from tool-fetch goals.
pub fn generate_plan(agent: &Agent, carried: &[CarriedItem], config: &MindConfig) -> Option<Plan> {
    if agent.cognitive_map.is_empty() {
        return None;
    }
    let current = agent.location_id.clone();

    let mut candidates = enumerate_candidates(agent, carried, &current, config);

    // Probabilistic fallback: with nothing else to chase, head for the
    // historically most food-likely region.
    if candidates.is_empty()
        && let Some(likely) = memory::predict_resource_location(agent)
        && likely != current
    {
        candidates.push(Candidate {
            score: PROBABLE_FOOD_BASE,
            target: likely,
            kind: "PROBABLE_FOOD",
        });
    }

    if candidates.is_empty() {
        return None;
    }

    let paths = reachable_paths(agent, &current, config);

    let mut best: Option<(Vec<LocationId>, LocationId, &'static str)> = None;
    let mut best_score = -1.0;
    for candidate in candidates {
        let Some(path) = paths.get(&candidate.target) else {
            continue;
        };
        let hops = u32::try_from(path.len()).unwrap_or(u32::MAX);
        let final_score = candidate.score - f64::from(hops);
        if final_score > best_score {
            best_score = final_score;
            best = Some((path.clone(), candidate.target.clone(), candidate.kind));
        }
    }

    let (path, target, kind) = best?;
    if path.is_empty() {
        return None;
    }
    tracing::debug!(agent = %agent.id, %target, kind, score = best_score, "plan selected");
    let steps = path
        .into_iter()
        .map(|step| Action::Move { target: step })
        .collect();
    Some(Plan { steps, target })
}

/// Enumerate scored candidates from the cognitive map, frontiers, stale
/// nodes, and likely regions.
fn enumerate_candidates(
    agent: &Agent,
    carried: &[CarriedItem],
    current: &LocationId,
    config: &MindConfig,
) -> Vec<Candidate> {
    let mut candidates = Vec::new();
    let map = &agent.cognitive_map;

    let extract_skill = agent.skills.extract;
    let use_skill = agent.skills.tool_use;
    let explore_skill = agent.skills.explore;

    for (location, node) in map {
        if location == current {
            continue;
        }

        if node.tags.contains(&ObjectKind::Food) {
            candidates.push(Candidate {
                score: FOOD_BASE * extract_skill,
                target: location.clone(),
                kind: "FOOD",
            });
        }

        if node.tags.contains(&ObjectKind::CoopFood) {
            let mut base = COOP_FOOD_BASE;
            if let Some(requester) = &node.requester_id {
                let reputation = agent.reputation.get(requester).copied().unwrap_or(0.0);
                base += reputation * COOP_REPUTATION_WEIGHT;
            }
            candidates.push(Candidate {
                score: base * extract_skill,
                target: location.clone(),
                kind: "COOP_FOOD",
            });
        }

        if node.tags.contains(&ObjectKind::Obstacle) {
            for obstacle in &node.obstacles {
                let Some(required) = obstacle
                    .tool_required
                    .as_deref()
                    .filter(|t| !t.is_empty())
                else {
                    candidates.push(Candidate {
                        score: OBSTACLE_PLAIN_BASE,
                        target: location.clone(),
                        kind: "OBSTACLE",
                    });
                    continue;
                };

                let has_tool = carried
                    .iter()
                    .any(|item| item.tool_type.as_deref() == Some(required));
                if has_tool {
                    candidates.push(Candidate {
                        score: OBSTACLE_TOOLED_BASE * use_skill,
                        target: location.clone(),
                        kind: "OBSTACLE",
                    });
                } else if let Some(tool_location) = find_tool_in_map(agent, required) {
                    // Head for the tool; when the tool is already here,
                    // head for the obstacle instead.
                    let target = if tool_location == *current {
                        location.clone()
                    } else {
                        tool_location
                    };
                    candidates.push(Candidate {
                        score: GET_TOOL_BASE * use_skill,
                        target,
                        kind: "GET_TOOL",
                    });
                }
            }
        }
    }

    // Frontiers: neighbor ids referenced somewhere but never visited
    // as map nodes.
    let known: BTreeSet<&LocationId> = map.keys().collect();
    let mut frontiers: BTreeSet<LocationId> = BTreeSet::new();
    for node in map.values() {
        for neighbor in &node.neighbors {
            if !known.contains(neighbor) {
                frontiers.insert(neighbor.clone());
            }
        }
    }
    for frontier in frontiers {
        candidates.push(Candidate {
            score: FRONTIER_BASE * explore_skill,
            target: frontier,
            kind: "FRONTIER",
        });
    }

    // Stale nodes: not confirmed by observation in a long time.
    for (location, node) in map {
        if location == current {
            continue;
        }
        if agent.last_tick_updated.saturating_sub(node.last_tick) > config.stale_threshold {
            candidates.push(Candidate {
                score: STALE_FRONTIER_BASE,
                target: location.clone(),
                kind: "STALE_FRONTIER",
            });
        }
    }

    // Likely regions from the memory analyzer's counters.
    for (location, pattern) in &agent.spatial_patterns {
        if location == current {
            continue;
        }
        let ratio = pattern.food_hits / pattern.total_visits.max(1.0);
        if ratio > LIKELY_REGION_RATIO && map.contains_key(location) {
            candidates.push(Candidate {
                score: LIKELY_REGION_BASE,
                target: location.clone(),
                kind: "LIKELY_REGION",
            });
        }
    }

    candidates
}

/// BFS from the current location over believed neighbors, skipping
/// avoided nodes. Returns each reached location with its path.
fn reachable_paths(
    agent: &Agent,
    current: &LocationId,
    config: &MindConfig,
) -> BTreeMap<LocationId, Vec<LocationId>> {
    let mut paths: BTreeMap<LocationId, Vec<LocationId>> = BTreeMap::new();
    let mut visited: BTreeSet<LocationId> = BTreeSet::new();
    let mut queue: VecDeque<(LocationId, Vec<LocationId>)> = VecDeque::new();

    visited.insert(current.clone());
    queue.push_back((current.clone(), Vec::new()));

    while let Some((location, path)) = queue.pop_front() {
        paths.insert(location.clone(), path.clone());

        let Some(node) = agent.cognitive_map.get(&location) else {
            continue;
        };
        for neighbor in &node.neighbors {
            if visited.contains(neighbor) {
                continue;
            }
            if reflection::is_avoided(agent, neighbor, config) {
                continue;
            }
            visited.insert(neighbor.clone());
            let mut next_path = path.clone();
            next_path.push(neighbor.clone());
            queue.push_back((neighbor.clone(), next_path));
        }
    }

    paths
}

/// Search the cognitive map for a tool of the required type.
fn find_tool_in_map(agent: &Agent, required: &str) -> Option<LocationId> {
    for (location, node) in &agent.cognitive_map {
        if node
            .tools
            .iter()
            .any(|tool| tool.tool_type.as_deref() == Some(required))
        {
            return Some(location.clone());
        }
    }
    None
}
