//! The forward model: offline projection of a plan against a copy of
//! agent state.
//!
//! Before committing to a plan, an agent "imagines" executing it: a
//! projected `(energy, location, alive)` triple is stepped through the
//! plan without consulting the world. Each step pays metabolism; moves
//! pay the move cost and relocate the projection; an imagined CONSUME
//! optimistically assumes a fixed gain. The projection stops at the
//! first predicted death.

use cogito_physics::{COMM_COST, METABOLISM_COST, MOVE_COST};
use cogito_types::{Action, Agent, LocationId};

use crate::config::MindConfig;

/// One step of an imagined plan execution.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectedState {
    /// Projected energy after the step.
    pub energy: i64,
    /// Projected location after the step.
    pub location_id: LocationId,
    /// Whether the projection is still alive.
    pub alive: bool,
}

/// Project a plan from the agent's current state.
///
/// The returned sequence starts with the current state and appends one
/// projected state per simulated step, stopping early on predicted
/// death or when a move becomes unaffordable.
pub fn simulate_plan(agent: &Agent, plan: &[Action], config: &MindConfig) -> Vec<ProjectedState> {
    let mut energy = agent.energy;
    let mut location = agent.location_id.clone();
    let mut states = vec![ProjectedState {
        energy,
        location_id: location.clone(),
        alive: agent.is_alive,
    }];

    for action in plan {
        energy = energy.saturating_sub(METABOLISM_COST);
        if energy <= 0 {
            states.push(ProjectedState {
                energy,
                location_id: location,
                alive: false,
            });
            break;
        }

        match action {
            Action::Move { target } => {
                if energy >= MOVE_COST {
                    energy = energy.saturating_sub(MOVE_COST);
                    location = target.clone();
                } else {
                    // The plan stalls: alive but stuck.
                    states.push(ProjectedState {
                        energy,
                        location_id: location,
                        alive: true,
                    });
                    break;
                }
            }
            Action::Consume { .. } => {
                energy = energy.saturating_add(config.assumed_food_gain);
            }
            Action::Communicate { .. } => {
                energy = energy.saturating_sub(COMM_COST);
            }
            _ => {}
        }

        let alive = energy > 0;
        states.push(ProjectedState {
            energy,
            location_id: location.clone(),
            alive,
        });
        if !alive {
            break;
        }
    }

    states
}

/// Whether a plan is predicted to leave the agent alive and above the
/// configured safety margin.
///
/// An empty plan is safe.
pub fn is_plan_safe(agent: &Agent, plan: &[Action], config: &MindConfig) -> bool {
    if plan.is_empty() {
        return true;
    }
    let states = simulate_plan(agent, plan, config);
    if states.iter().any(|s| !s.alive) {
        return false;
    }
    states
        .last()
        .is_none_or(|s| s.energy >= config.safety_margin)
}
