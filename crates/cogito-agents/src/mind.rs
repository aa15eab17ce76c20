//! The per-tick cognitive pipeline: perceive, then decide.
//!
//! Perception is active: gathering what is visible also updates memory,
//! the visited set, the cognitive map (authoritative for the current
//! location), social notes, cooperative-extraction credit, and the
//! long-term pattern counters.
//!
//! Decision runs a fixed phase order:
//!
//! 1. story generation for impactful observations
//! 2. strategic goal selection (switching clears any plan)
//! 3. reactive interrupts: survival eating, tool pickup, obstacle
//!    handling, hoarding at home
//! 4. plan validation (forward model, then reflection on the next hop)
//! 5. plan execution
//! 6. cooperative extraction or a help call
//! 7. hazard alarm
//! 8. goal-specific generation (social / survival / explore)
//! 9. fallback: a random safe move, preferring unvisited neighbors
//!
//! The only randomness in the whole pipeline is the fallback move
//! choice, drawn from the simulation's single seeded generator.

use std::collections::BTreeSet;

use rand::Rng;

use cogito_types::{
    Action, Agent, AgentId, CarriedItem, CognitiveNode, CommIntent, CoopFoodSighting, GoalKind,
    LocationId, ObjectKind, ObstacleInfo, Perception, ToolInfo, VisibleAgent,
};
use cogito_world::World;

use crate::config::MindConfig;
use crate::goals;
use crate::imagination;
use crate::memory;
use crate::planner::{self, Plan};
use crate::reflection;
use crate::social;

/// Reputation credited to each observed participant of a cooperative
/// extraction.
const COOP_PARTICIPATION_CREDIT: f64 = 0.5;

// ---------------------------------------------------------------------------
// Perception
// ---------------------------------------------------------------------------

/// Gather what the agent can see without mutating anything.
pub fn observe(world: &World, agent: &Agent) -> Perception {
    let location = agent.location_id.clone();
    let neighbors: Vec<_> = world.neighbors(&location).to_vec();

    let mut visible_food = Vec::new();
    let mut visible_hazards = Vec::new();
    let mut visible_coop_food = Vec::new();
    let mut visible_tools = Vec::new();
    let mut visible_obstacles = Vec::new();
    for object in world.objects_at(&location) {
        match object.kind {
            ObjectKind::Food => visible_food.push(object.id.clone()),
            ObjectKind::Hazard => visible_hazards.push(object.id.clone()),
            ObjectKind::CoopFood => visible_coop_food.push(CoopFoodSighting {
                id: object.id.clone(),
                required_agents: object.required_agents,
                value: object.value,
            }),
            ObjectKind::Tool => visible_tools.push(ToolInfo {
                id: object.id.clone(),
                tool_type: object.tool_type.clone(),
            }),
            ObjectKind::Obstacle => visible_obstacles.push(ObstacleInfo {
                id: object.id.clone(),
                tool_required: object.tool_required.clone(),
                required_agents: object.required_agents,
            }),
            ObjectKind::Barrier => {}
        }
    }

    let mut visible_agents = Vec::new();
    for other in world.agents() {
        if other.id == agent.id || !other.is_alive {
            continue;
        }
        let distance = if other.location_id == location {
            0
        } else if neighbors.contains(&other.location_id) {
            1
        } else {
            continue;
        };
        visible_agents.push(VisibleAgent {
            id: other.id.clone(),
            location_id: other.location_id.clone(),
            energy: other.energy,
            last_action: other.last_action.clone(),
            distance,
        });
    }

    let inventory = agent
        .inventory
        .iter()
        .filter_map(|object_id| world.get_object(object_id))
        .map(|object| CarriedItem {
            id: object.id.clone(),
            kind: object.kind,
            tool_type: object.tool_type.clone(),
        })
        .collect();

    let visited_neighbors = neighbors
        .iter()
        .filter(|n| agent.visited_locations.contains(*n))
        .cloned()
        .collect();

    Perception {
        tick: agent.last_tick_updated,
        location_id: location,
        energy: agent.energy,
        visible_food,
        visible_hazards,
        visible_coop_food,
        visible_tools,
        visible_obstacles,
        neighbors,
        visited_neighbors,
        visible_agents,
        inventory,
    }
}

/// Fold a perception into the agent's cognitive state.
pub fn integrate(agent: &mut Agent, perception: &Perception, config: &MindConfig) {
    // Cooperative-extraction detection must compare against the
    // previous perception before the new one lands in memory: a
    // cooperative resource that vanished while the same peers stayed
    // co-located was extracted together.
    let participants = coop_participants(agent, perception);

    agent.memory.push_back(perception.clone());
    while agent.memory.len() > config.memory_capacity {
        agent.memory.pop_front();
    }
    agent.visited_locations.insert(perception.location_id.clone());

    // Observation is authoritative for the current node.
    let node = agent
        .cognitive_map
        .entry(perception.location_id.clone())
        .or_insert_with(CognitiveNode::default);
    node.neighbors = perception.neighbors.clone();
    node.tags = observed_tags(perception);
    node.tools = perception.visible_tools.clone();
    node.obstacles = perception.visible_obstacles.clone();
    node.last_tick = perception.tick;

    for seen in &perception.visible_agents {
        social::note_seen_agent(agent, seen, config);
    }

    for participant in participants {
        social::update_reputation(agent, &participant, COOP_PARTICIPATION_CREDIT, config);
    }

    memory::update_patterns(agent, perception);
}

/// Perceive: gather, then integrate. Returns the perception for the
/// decision phase. `None` when the agent id is unknown.
pub fn perceive(world: &mut World, agent_id: &AgentId, config: &MindConfig) -> Option<Perception> {
    let perception = {
        let agent = world.get_agent(agent_id)?;
        observe(world, agent)
    };
    let agent = world.get_agent_mut(agent_id)?;
    integrate(agent, &perception, config);
    Some(perception)
}

fn observed_tags(perception: &Perception) -> BTreeSet<ObjectKind> {
    let mut tags = BTreeSet::new();
    if !perception.visible_food.is_empty() {
        tags.insert(ObjectKind::Food);
    }
    if !perception.visible_hazards.is_empty() {
        tags.insert(ObjectKind::Hazard);
    }
    if !perception.visible_coop_food.is_empty() {
        tags.insert(ObjectKind::CoopFood);
    }
    if !perception.visible_tools.is_empty() {
        tags.insert(ObjectKind::Tool);
    }
    if !perception.visible_obstacles.is_empty() {
        tags.insert(ObjectKind::Obstacle);
    }
    tags
}

fn coop_participants(agent: &Agent, perception: &Perception) -> Vec<AgentId> {
    let Some(previous) = agent.memory.back() else {
        return Vec::new();
    };
    if previous.location_id != perception.location_id
        || previous.visible_coop_food.is_empty()
        || !perception.visible_coop_food.is_empty()
    {
        return Vec::new();
    }
    let before: BTreeSet<&AgentId> = previous
        .visible_agents
        .iter()
        .filter(|a| a.distance == 0)
        .map(|a| &a.id)
        .collect();
    let after: BTreeSet<&AgentId> = perception
        .visible_agents
        .iter()
        .filter(|a| a.distance == 0)
        .map(|a| &a.id)
        .collect();
    before
        .intersection(&after)
        .map(|id| (*id).clone())
        .collect()
}

// ---------------------------------------------------------------------------
// Decision
// ---------------------------------------------------------------------------

/// Run the decision pipeline and commit to a single action.
pub fn decide(
    agent: &mut Agent,
    perception: &Perception,
    rng: &mut impl Rng,
    config: &MindConfig,
) -> Action {
    // Stories first: impactful observations become culture even when a
    // reactive interrupt decides the action.
    social::generate_story(agent, perception, config);

    // Strategic goal selection; a switch invalidates the current plan.
    let top = goals::select_top_goal(agent, perception, config);
    if agent.current_goal != top.kind {
        if !agent.plan_queue.is_empty() {
            clear_plan(agent);
        }
        agent.goal_history.push(agent.current_goal);
        agent.current_goal = top.kind;
    }

    // Reactive interrupt: eat what is in front of a hungry agent.
    if perception.energy < config.survival_threshold
        && let Some(food) = perception.visible_food.first()
    {
        return Action::Consume {
            object_id: food.clone(),
        };
    }

    // Reactive interrupt: pick up a tool we are not already carrying.
    if let Some(tool) = perception.visible_tools.first()
        && !agent.carries(&tool.id)
    {
        return Action::Pickup {
            object_id: tool.id.clone(),
        };
    }

    // Reactive interrupt: deal with obstacles in front of us.
    let here = agents_here(perception);
    for obstacle in &perception.visible_obstacles {
        if obstacle.required_agents > 1 && here < u64::from(obstacle.required_agents) {
            if perception.energy > config.comm_energy_floor {
                return Action::Communicate {
                    intent: CommIntent::PuzzleHelp {
                        object_id: obstacle.id.clone(),
                    },
                };
            }
            return Action::Wait;
        }
        let usable = match obstacle.tool_required.as_deref() {
            None | Some("") => true,
            Some(required) => carries_tool(perception, required),
        };
        if usable {
            return Action::Use {
                object_id: obstacle.id.clone(),
            };
        }
    }

    // Reactive interrupt: hoard at home.
    if let Some(home) = agent.home_location_id.clone()
        && perception.location_id == home
    {
        if perception.energy >= config.hoard_energy_threshold
            && let Some(food) = perception.visible_food.first()
        {
            return Action::Pickup {
                object_id: food.clone(),
            };
        }
        if let Some(item) = perception
            .inventory
            .iter()
            .find(|item| item.kind == ObjectKind::Food)
        {
            return Action::Drop {
                object_id: item.id.clone(),
            };
        }
    }

    // Plan validation: imagination first, then the aversion check on
    // the next hop.
    if !agent.plan_queue.is_empty() {
        let steps: Vec<Action> = agent.plan_queue.iter().cloned().collect();
        if !imagination::is_plan_safe(agent, &steps, config) {
            clear_plan(agent);
        } else if let Some(target) = agent
            .plan_queue
            .front()
            .and_then(Action::move_target)
            .cloned()
            && reflection::is_avoided(agent, &target, config)
        {
            clear_plan(agent);
        }
    }

    // Plan execution.
    if let Some(next) = agent.plan_queue.pop_front() {
        return next;
    }

    // Cooperative extraction, or a call for helpers.
    if let Some(coop) = perception.visible_coop_food.first() {
        if here >= u64::from(coop.required_agents) {
            return Action::Extract {
                object_id: coop.id.clone(),
            };
        }
        if perception.energy > config.comm_energy_floor {
            return Action::Communicate {
                intent: CommIntent::HelpCall,
            };
        }
    }

    // Hazard alarm: warn everyone.
    if !perception.visible_hazards.is_empty() {
        return Action::Communicate {
            intent: CommIntent::Alarm,
        };
    }

    // Goal-specific generation.
    match agent.current_goal {
        GoalKind::Social => decide_social(agent, perception, config),
        GoalKind::Survival => decide_survival(agent, perception, rng, config),
        GoalKind::Explore | GoalKind::LongTerm => decide_explore(agent, perception, rng, config),
    }
}

fn decide_social(agent: &mut Agent, perception: &Perception, config: &MindConfig) -> Action {
    // Direct help for a needy trusted peer comes first.
    if let Some(action) = social::decide_cooperation(agent, perception, config) {
        return action;
    }

    // Gossip: retell a story to a co-located listener.
    if let Some(listener) = perception.visible_agents.iter().find(|a| a.distance == 0)
        && social::select_story(agent).is_some()
    {
        return Action::Communicate {
            intent: CommIntent::Story {
                listener: listener.id.clone(),
            },
        };
    }

    // Imitation: follow a trusted adjacent peer.
    if let Some(target) = social::observation_to_imitate(agent, perception, config) {
        return Action::Move { target };
    }

    Action::Wait
}

fn decide_survival(
    agent: &mut Agent,
    perception: &Perception,
    rng: &mut impl Rng,
    config: &MindConfig,
) -> Action {
    if let Some(plan) = planner::generate_plan(agent, &perception.inventory, config)
        && imagination::is_plan_safe(agent, &plan.steps, config)
        && let Some(action) = adopt_plan(agent, plan)
    {
        return action;
    }
    if let Some(food) = perception.visible_food.first() {
        return Action::Consume {
            object_id: food.clone(),
        };
    }
    choose_move(agent, perception, rng, config)
}

fn decide_explore(
    agent: &mut Agent,
    perception: &Perception,
    rng: &mut impl Rng,
    config: &MindConfig,
) -> Action {
    // The first exploration tick claims a home base.
    if agent.home_location_id.is_none() {
        agent.home_location_id = Some(perception.location_id.clone());
    }

    // Opportunistic eating while not yet full.
    if perception.energy < config.explore_eat_threshold
        && let Some(food) = perception.visible_food.first()
    {
        return Action::Consume {
            object_id: food.clone(),
        };
    }

    if let Some(plan) = planner::generate_plan(agent, &perception.inventory, config)
        && imagination::is_plan_safe(agent, &plan.steps, config)
        && let Some(action) = adopt_plan(agent, plan)
    {
        return action;
    }

    choose_move(agent, perception, rng, config)
}

/// Fallback movement: a random safe neighbor, preferring unvisited
/// ones. "Safe" means the location is not avoided and a one-step move
/// is predicted survivable. With no safe option the agent waits.
fn choose_move(
    agent: &Agent,
    perception: &Perception,
    rng: &mut impl Rng,
    config: &MindConfig,
) -> Action {
    if perception.neighbors.is_empty() {
        return Action::Wait;
    }

    let safe_unvisited: Vec<&LocationId> = perception
        .neighbors
        .iter()
        .filter(|n| !agent.visited_locations.contains(*n))
        .filter(|n| safe_step(agent, n, config))
        .collect();
    let pool: Vec<&LocationId> = if safe_unvisited.is_empty() {
        perception
            .neighbors
            .iter()
            .filter(|n| safe_step(agent, n, config))
            .collect()
    } else {
        safe_unvisited
    };

    if pool.is_empty() {
        return Action::Wait;
    }
    let index = rng.random_range(0..pool.len());
    pool.get(index).map_or(Action::Wait, |choice| Action::Move {
        target: (*choice).clone(),
    })
}

/// Whether a one-step move to `target` is both unavoided and predicted
/// survivable.
fn safe_step(agent: &Agent, target: &LocationId, config: &MindConfig) -> bool {
    if reflection::is_avoided(agent, target, config) {
        return false;
    }
    let probe = [Action::Move {
        target: target.clone(),
    }];
    imagination::is_plan_safe(agent, &probe, config)
}

fn adopt_plan(agent: &mut Agent, plan: Plan) -> Option<Action> {
    agent.plan_queue = plan.steps.into_iter().collect();
    agent.planned_target = Some(plan.target);
    agent.plan_queue.pop_front()
}

/// Drop the current plan and its target.
pub fn clear_plan(agent: &mut Agent) {
    agent.plan_queue.clear();
    agent.planned_target = None;
}

fn agents_here(perception: &Perception) -> u64 {
    let others = perception
        .visible_agents
        .iter()
        .filter(|a| a.distance == 0)
        .count();
    u64::try_from(others).unwrap_or(u64::MAX).saturating_add(1)
}

fn carries_tool(perception: &Perception, required: &str) -> bool {
    perception
        .inventory
        .iter()
        .any(|item| item.tool_type.as_deref() == Some(required))
}
