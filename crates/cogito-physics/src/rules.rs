//! The per-action rule functions.
//!
//! Each rule checks preconditions from cheapest to most involved and
//! returns a failed [`Effect`] with a descriptive message at the first
//! violation. Success effects describe energy deltas and object
//! transfers but never apply them.

use cogito_types::{Action, Agent, CommIntent, Effect, LocationId, ObjectId, ObjectKind};
use cogito_world::World;

use crate::{
    COMM_COST, DROP_COST, EXTRACT_COST, METABOLISM_COST, MOVE_COST, PICKUP_COST, USE_COST,
};

/// Resolve one action into its effect.
pub fn apply_action(world: &World, agent: &Agent, action: &Action) -> Effect {
    match action {
        Action::Wait => Effect {
            energy_cost: 0,
            ..Effect::new(agent.id.clone(), Action::Wait, true, "Waited")
        },
        Action::Move { target } => rule_move(world, agent, target),
        Action::Consume { object_id } => rule_consume(world, agent, object_id),
        Action::Communicate { intent } => rule_communicate(agent, intent),
        Action::Pickup { object_id } => rule_pickup(world, agent, object_id),
        Action::Drop { object_id } => rule_drop(agent, object_id),
        Action::Extract { object_id } => rule_extract(world, agent, object_id),
        Action::Use { object_id } => rule_use(world, agent, object_id),
    }
}

/// Resolve the implicit per-tick metabolism charge.
///
/// The cost is the metabolism baseline plus the value of every hazard
/// at the agent's location.
pub fn metabolism(world: &World, agent: &Agent) -> Effect {
    let mut cost = METABOLISM_COST;
    for object in world.objects_at(&agent.location_id) {
        if object.kind == ObjectKind::Hazard {
            cost = cost.saturating_add(object.value);
        }
    }
    let message = if cost > METABOLISM_COST {
        "Metabolism + Hazard"
    } else {
        "Metabolism"
    };
    Effect {
        energy_cost: cost,
        ..Effect::new(agent.id.clone(), Action::Wait, true, message)
    }
}

/// Enumerate the currently legal action menu for an agent.
///
/// The order is deterministic: WAIT, one MOVE per neighbor, one
/// CONSUME/EXTRACT per edible object in location order, COMMUNICATE,
/// and one DROP per carried object.
pub fn valid_actions(world: &World, agent: &Agent) -> Vec<Action> {
    let mut actions = vec![Action::Wait];

    for neighbor in world.neighbors(&agent.location_id) {
        actions.push(Action::Move {
            target: neighbor.clone(),
        });
    }

    for object in world.objects_at(&agent.location_id) {
        match object.kind {
            ObjectKind::Food => actions.push(Action::Consume {
                object_id: object.id.clone(),
            }),
            ObjectKind::CoopFood => actions.push(Action::Extract {
                object_id: object.id.clone(),
            }),
            _ => {}
        }
    }

    actions.push(Action::Communicate {
        intent: CommIntent::Broadcast,
    });

    for object_id in &agent.inventory {
        actions.push(Action::Drop {
            object_id: object_id.clone(),
        });
    }

    actions
}

// ---------------------------------------------------------------------------
// Individual rules
// ---------------------------------------------------------------------------

fn rule_move(world: &World, agent: &Agent, target: &LocationId) -> Effect {
    let action = Action::Move {
        target: target.clone(),
    };
    if !world.neighbors(&agent.location_id).contains(target) {
        let message = format!("Cannot move to {target} from {}", agent.location_id);
        return Effect::failure(agent.id.clone(), action, message);
    }
    if agent.energy < MOVE_COST {
        return Effect::failure(agent.id.clone(), action, "Not enough energy");
    }
    Effect {
        energy_cost: MOVE_COST,
        new_location_id: Some(target.clone()),
        ..Effect::new(
            agent.id.clone(),
            action,
            true,
            format!("Moved to {target}"),
        )
    }
}

fn rule_consume(world: &World, agent: &Agent, object_id: &ObjectId) -> Effect {
    let action = Action::Consume {
        object_id: object_id.clone(),
    };
    let Some(object) = world
        .objects_at(&agent.location_id)
        .into_iter()
        .find(|o| o.id == *object_id)
    else {
        return Effect::failure(agent.id.clone(), action, "Object not found");
    };
    if object.kind != ObjectKind::Food {
        return Effect::failure(agent.id.clone(), action, "Cannot eat that");
    }
    Effect {
        energy_gain: object.value,
        removed_object_id: Some(object_id.clone()),
        ..Effect::new(agent.id.clone(), action, true, "Ate FOOD")
    }
}

fn rule_communicate(agent: &Agent, intent: &CommIntent) -> Effect {
    // Physics only charges the cost; the simulation loop translates the
    // intent into message dispatch.
    let action = Action::Communicate {
        intent: intent.clone(),
    };
    Effect {
        energy_cost: COMM_COST,
        ..Effect::new(agent.id.clone(), action, true, "Broadcasted info")
    }
}

fn rule_pickup(world: &World, agent: &Agent, object_id: &ObjectId) -> Effect {
    let action = Action::Pickup {
        object_id: object_id.clone(),
    };
    if !world
        .objects_at(&agent.location_id)
        .iter()
        .any(|o| o.id == *object_id)
    {
        return Effect::failure(agent.id.clone(), action, "Object not found");
    }
    if agent.energy < PICKUP_COST {
        return Effect::failure(agent.id.clone(), action, "Not enough energy");
    }
    let kind = world
        .get_object(object_id)
        .map_or("OBJECT", |o| kind_name(o.kind));
    Effect {
        energy_cost: PICKUP_COST,
        removed_object_id: Some(object_id.clone()),
        ..Effect::new(
            agent.id.clone(),
            action,
            true,
            format!("Picked up {kind}"),
        )
    }
}

fn rule_drop(agent: &Agent, object_id: &ObjectId) -> Effect {
    let action = Action::Drop {
        object_id: object_id.clone(),
    };
    if !agent.carries(object_id) {
        return Effect::failure(agent.id.clone(), action, "Object not in inventory");
    }
    if agent.energy < DROP_COST {
        return Effect::failure(agent.id.clone(), action, "Not enough energy");
    }
    Effect {
        energy_cost: DROP_COST,
        added_object_id: Some(object_id.clone()),
        ..Effect::new(agent.id.clone(), action, true, "Dropped object")
    }
}

fn rule_extract(world: &World, agent: &Agent, object_id: &ObjectId) -> Effect {
    let action = Action::Extract {
        object_id: object_id.clone(),
    };
    let Some(object) = world.get_object(object_id) else {
        return Effect::failure(agent.id.clone(), action, "Object not found at location");
    };
    if object.location_id != agent.location_id {
        return Effect::failure(agent.id.clone(), action, "Object not found at location");
    }
    if agent.energy < EXTRACT_COST {
        return Effect::failure(agent.id.clone(), action, "Not enough energy");
    }
    let present = world.alive_agents_at(&agent.location_id);
    let present_u64 = u64::try_from(present).unwrap_or(u64::MAX);
    if present_u64 < u64::from(object.required_agents) {
        let message = format!(
            "Need {} agents, only {present} present",
            object.required_agents
        );
        return Effect::failure(agent.id.clone(), action, message);
    }
    // The energy gain goes to the acting agent only; participants are
    // credited through reputation, not energy.
    Effect {
        energy_cost: EXTRACT_COST,
        energy_gain: object.value,
        removed_object_id: Some(object_id.clone()),
        ..Effect::new(
            agent.id.clone(),
            action,
            true,
            format!("Successfully extracted {object_id}"),
        )
    }
}

fn rule_use(world: &World, agent: &Agent, object_id: &ObjectId) -> Effect {
    let action = Action::Use {
        object_id: object_id.clone(),
    };
    let Some(object) = world.get_object(object_id) else {
        return Effect::failure(agent.id.clone(), action, "Obstacle not found at location");
    };
    if object.location_id != agent.location_id {
        return Effect::failure(agent.id.clone(), action, "Obstacle not found at location");
    }
    if object.kind != ObjectKind::Obstacle {
        return Effect::failure(agent.id.clone(), action, "Target is not a usable obstacle");
    }
    if agent.energy < USE_COST {
        return Effect::failure(agent.id.clone(), action, "Not enough energy");
    }
    if object.required_agents > 1 {
        let present = world.alive_agents_at(&agent.location_id);
        let present_u64 = u64::try_from(present).unwrap_or(u64::MAX);
        if present_u64 < u64::from(object.required_agents) {
            let message = format!("Need {} agents", object.required_agents);
            return Effect::failure(agent.id.clone(), action, message);
        }
    }
    if let Some(required) = object.tool_required.as_deref()
        && !required.is_empty()
    {
        let has_tool = agent.inventory.iter().any(|oid| {
            world.get_object(oid).is_some_and(|item| {
                item.kind == ObjectKind::Tool && item.tool_type.as_deref() == Some(required)
            })
        });
        if !has_tool {
            let message = format!("Need a {required} to use this");
            return Effect::failure(agent.id.clone(), action, message);
        }
        return Effect {
            energy_cost: USE_COST,
            removed_object_id: Some(object_id.clone()),
            ..Effect::new(
                agent.id.clone(),
                action,
                true,
                format!("Successfully used tool on {object_id}"),
            )
        };
    }
    // No tool required: the obstacle works like a switch.
    Effect {
        energy_cost: USE_COST,
        removed_object_id: Some(object_id.clone()),
        ..Effect::new(agent.id.clone(), action, true, format!("Used {object_id}"))
    }
}

const fn kind_name(kind: ObjectKind) -> &'static str {
    match kind {
        ObjectKind::Food => "FOOD",
        ObjectKind::Barrier => "BARRIER",
        ObjectKind::Tool => "TOOL",
        ObjectKind::Hazard => "HAZARD",
        ObjectKind::CoopFood => "COOP_FOOD",
        ObjectKind::Obstacle => "OBSTACLE",
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use cogito_types::{AgentId, Object};

    use super::*;

    fn corridor_world() -> World {
        let mut world = World::new();
        world.add_location("A", vec![LocationId::new("B")]);
        world.add_location("B", vec![LocationId::new("A"), LocationId::new("C")]);
        world.add_location("C", vec![LocationId::new("B")]);
        world
    }

    #[test]
    fn move_to_non_neighbor_fails() {
        let world = corridor_world();
        let agent = Agent::new("a1", "One", "A", 100);
        let effect = rule_move(&world, &agent, &LocationId::new("C"));
        assert!(!effect.success);
        assert!(effect.new_location_id.is_none());
    }

    #[test]
    fn move_without_energy_fails() {
        let world = corridor_world();
        let agent = Agent::new("a1", "One", "A", 4);
        let effect = rule_move(&world, &agent, &LocationId::new("B"));
        assert!(!effect.success);
        assert_eq!(effect.message, "Not enough energy");
    }

    #[test]
    fn move_succeeds_with_cost_and_destination() {
        let world = corridor_world();
        let agent = Agent::new("a1", "One", "A", 100);
        let effect = rule_move(&world, &agent, &LocationId::new("B"));
        assert!(effect.success);
        assert_eq!(effect.energy_cost, MOVE_COST);
        assert_eq!(effect.new_location_id, Some(LocationId::new("B")));
    }

    #[test]
    fn consume_requires_food_kind() {
        let mut world = corridor_world();
        world.add_object(Object::new("rock", ObjectKind::Barrier, 0, "A"));
        let agent = Agent::new("a1", "One", "A", 100);
        let effect = rule_consume(&world, &agent, &ObjectId::new("rock"));
        assert!(!effect.success);
        assert_eq!(effect.message, "Cannot eat that");
    }

    #[test]
    fn consume_yields_the_object_value() {
        let mut world = corridor_world();
        world.add_object(Object::new("berry", ObjectKind::Food, 10, "A"));
        let agent = Agent::new("a1", "One", "A", 100);
        let effect = rule_consume(&world, &agent, &ObjectId::new("berry"));
        assert!(effect.success);
        assert_eq!(effect.energy_gain, 10);
        assert_eq!(effect.removed_object_id, Some(ObjectId::new("berry")));
    }

    #[test]
    fn extract_needs_enough_participants() {
        let mut world = corridor_world();
        let mut boulder = Object::new("boulder", ObjectKind::CoopFood, 100, "A");
        boulder.required_agents = 2;
        world.add_object(boulder);
        world.add_agent(Agent::new("a1", "One", "A", 100));
        let solo = world.get_agent(&AgentId::new("a1")).unwrap().clone();
        let effect = rule_extract(&world, &solo, &ObjectId::new("boulder"));
        assert!(!effect.success);
        assert!(effect.message.starts_with("Need 2 agents"));

        world.add_agent(Agent::new("a2", "Two", "A", 100));
        let effect = rule_extract(
            &world,
            &world.get_agent(&AgentId::new("a1")).unwrap().clone(),
            &ObjectId::new("boulder"),
        );
        assert!(effect.success);
        assert_eq!(effect.energy_gain, 100);
    }

    #[test]
    fn use_demands_the_matching_tool() {
        let mut world = corridor_world();
        let mut chest = Object::new("chest", ObjectKind::Obstacle, 0, "A");
        chest.tool_required = Some("KEY".to_owned());
        world.add_object(chest);
        let mut key = Object::new("key", ObjectKind::Tool, 0, "A");
        key.tool_type = Some("KEY".to_owned());
        world.add_object(key);

        let mut agent = Agent::new("a1", "One", "A", 100);
        world.add_agent(agent.clone());
        let effect = rule_use(&world, &agent, &ObjectId::new("chest"));
        assert!(!effect.success);
        assert_eq!(effect.message, "Need a KEY to use this");

        agent.inventory.push(ObjectId::new("key"));
        let effect = rule_use(&world, &agent, &ObjectId::new("chest"));
        assert!(effect.success);
        assert_eq!(effect.removed_object_id, Some(ObjectId::new("chest")));
    }

    #[test]
    fn multi_agent_obstacle_reports_needed_agents() {
        let mut world = corridor_world();
        let mut gate = Object::new("gate", ObjectKind::Obstacle, 0, "A");
        gate.required_agents = 3;
        world.add_object(gate);
        world.add_agent(Agent::new("a1", "One", "A", 100));
        let agent = world.get_agent(&AgentId::new("a1")).unwrap().clone();
        let effect = rule_use(&world, &agent, &ObjectId::new("gate"));
        assert!(!effect.success);
        assert_eq!(effect.message, "Need 3 agents");
    }

    #[test]
    fn switch_obstacle_needs_no_tool() {
        let mut world = corridor_world();
        world.add_object(Object::new("lever", ObjectKind::Obstacle, 0, "A"));
        let agent = Agent::new("a1", "One", "A", 100);
        let effect = rule_use(&world, &agent, &ObjectId::new("lever"));
        assert!(effect.success);
    }

    #[test]
    fn metabolism_adds_hazard_damage() {
        let mut world = corridor_world();
        world.add_object(Object::new("pit", ObjectKind::Hazard, 10, "A"));
        let agent = Agent::new("a1", "One", "A", 100);
        let effect = metabolism(&world, &agent);
        assert_eq!(effect.energy_cost, 11);
        assert_eq!(effect.message, "Metabolism + Hazard");
    }

    #[test]
    fn valid_actions_enumerate_in_order() {
        let mut world = corridor_world();
        world.add_object(Object::new("berry", ObjectKind::Food, 10, "A"));
        let mut agent = Agent::new("a1", "One", "A", 100);
        agent.inventory.push(ObjectId::new("held"));
        let actions = valid_actions(&world, &agent);
        assert_eq!(actions.first(), Some(&Action::Wait));
        assert!(actions.iter().any(|a| a.name() == "MOVE"));
        assert!(actions.iter().any(|a| a.name() == "CONSUME"));
        assert!(actions.iter().any(|a| a.name() == "COMMUNICATE"));
        assert_eq!(actions.last().map(Action::name), Some("DROP"));
    }
}
