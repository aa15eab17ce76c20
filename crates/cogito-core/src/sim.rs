//! The simulation loop: the deterministic per-tick driver.
//!
//! Per tick, each registered agent is processed in registration order:
//!
//! 1. stamp the tick; skip the dead
//! 2. commit metabolism (hazards included); a death here ends the step
//! 3. drain the inbox into the cognitive map and scores
//! 4. perceive (logged), then decide -- via the cognitive pipeline or a
//!    test [`Controller`]
//! 5. resolve the action through physics; a failed effect clears any
//!    plan; a successful COMMUNICATE is translated into messages
//! 6. commit the effect: energy (death on depletion), relocation,
//!    object transfers, skill experience
//! 7. append history, run meta-reflection, emit periodic status records
//!
//! Messages produced during a tick are buffered and appended to inboxes
//! only after every agent has stepped, so a message is never visible
//! before the receiver's next tick. All randomness is drawn from one
//! generator seeded at construction; two simulations built identically
//! evolve identically, tick for tick.
//!
//! [`Controller`]: crate::controller::Controller

use std::collections::BTreeMap;

use rand::SeedableRng;
use rand::rngs::StdRng;
use serde::{Deserialize, Serialize};
use serde_json::{Value, json};
use tracing::{debug, info};

use cogito_agents::{MindConfig, communication, mind, reflection, social};
use cogito_events::{EventKind, EventRecord, EventSink};
use cogito_physics as physics;
use cogito_types::{
    Action, Agent, AgentId, CognitiveNode, CommIntent, Effect, HistoryEntry, LocationId, Message,
    MessagePayload, Object, ObjectKind, ObstacleInfo,
};
use cogito_world::World;

use crate::controller::Controller;

/// Skill experience gained by a successful cooperative extraction.
const SKILL_GAIN_EXTRACT: f64 = 0.1;

/// Skill experience gained by a successful tool use.
const SKILL_GAIN_USE: f64 = 0.1;

/// Skill experience gained by a completed move. Movement is frequent,
/// so the gain is smaller.
const SKILL_GAIN_MOVE: f64 = 0.02;

/// Construction-time parameters of a simulation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SimConfig {
    /// Seed for the single random generator.
    pub seed: u64,
    /// Every how many ticks reflection/trust snapshots are recorded.
    pub status_interval: u64,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            seed: 42,
            status_interval: 5,
        }
    }
}

/// The deterministic tick driver. Owns the world, the event sink, the
/// pending-message buffer, and the only random generator.
#[derive(Debug)]
pub struct Simulation<S: EventSink> {
    world: World,
    sink: S,
    rng: StdRng,
    tick_count: u64,
    pending_messages: Vec<(AgentId, Message)>,
    config: SimConfig,
    mind_config: MindConfig,
}

impl<S: EventSink> Simulation<S> {
    /// Create a simulation with the given seed and default thresholds.
    pub fn new(seed: u64, sink: S) -> Self {
        Self::with_config(
            SimConfig {
                seed,
                ..SimConfig::default()
            },
            MindConfig::default(),
            sink,
        )
    }

    /// Create a simulation with explicit configuration.
    pub fn with_config(config: SimConfig, mind_config: MindConfig, sink: S) -> Self {
        Self {
            world: World::new(),
            sink,
            rng: StdRng::seed_from_u64(config.seed),
            tick_count: 0,
            pending_messages: Vec::new(),
            config,
            mind_config,
        }
    }

    // -------------------------------------------------------------------
    // Construction surface
    // -------------------------------------------------------------------

    /// Add a location node to the world graph.
    pub fn add_location(&mut self, id: impl Into<LocationId>, neighbors: Vec<LocationId>) {
        self.world.add_location(id, neighbors);
    }

    /// Register an agent.
    pub fn add_agent(&mut self, agent: Agent) {
        self.world.add_agent(agent);
    }

    /// Register an object.
    pub fn add_object(&mut self, object: Object) {
        self.world.add_object(object);
    }

    /// The authoritative world state.
    pub const fn world(&self) -> &World {
        &self.world
    }

    /// Mutable world access for test setup.
    pub const fn world_mut(&mut self) -> &mut World {
        &mut self.world
    }

    /// The event sink, for inspection after a run.
    pub const fn sink(&self) -> &S {
        &self.sink
    }

    /// Ticks completed so far.
    pub const fn tick_count(&self) -> u64 {
        self.tick_count
    }

    // -------------------------------------------------------------------
    // Driving
    // -------------------------------------------------------------------

    /// Run up to `max_ticks` ticks, stopping early when every agent is
    /// dead. A controller, when given, bypasses the cognitive pipeline
    /// for every agent.
    pub fn run(&mut self, max_ticks: u64, mut controller: Option<&mut dyn Controller>) {
        info!(seed = self.config.seed, max_ticks, "simulation started");
        for _ in 0..max_ticks {
            self.tick(controller.as_deref_mut());
            if !self.world.any_alive() {
                info!(tick = self.tick_count, "all agents dead, stopping");
                break;
            }
        }
    }

    /// Execute one atomic tick of the universe.
    pub fn tick<'c>(&mut self, mut controller: Option<&mut (dyn Controller + 'c)>) {
        let tick = self.tick_count;
        debug!(tick, "tick started");

        let roster: Vec<AgentId> = self.world.roster().to_vec();
        for agent_id in &roster {
            self.step_agent(agent_id, controller.as_deref_mut());
        }

        // Deferred delivery: messages produced this tick become visible
        // at the receivers' next message-processing phase.
        let pending = std::mem::take(&mut self.pending_messages);
        for (receiver, message) in pending {
            if let Some(agent) = self.world.get_agent_mut(&receiver) {
                agent.inbox.push_back(message);
            }
        }

        self.tick_count = self.tick_count.saturating_add(1);
    }

    // -------------------------------------------------------------------
    // Per-agent step
    // -------------------------------------------------------------------

    fn step_agent<'c>(&mut self, agent_id: &AgentId, controller: Option<&mut (dyn Controller + 'c)>) {
        let tick = self.tick_count;

        {
            let Some(agent) = self.world.get_agent_mut(agent_id) else {
                return;
            };
            agent.last_tick_updated = tick;
            if !agent.is_alive {
                return;
            }
        }

        // Metabolism, hazards included. A death here ends the step; the
        // DEATH record is emitted by the commit.
        let metabolic = {
            let Some(agent) = self.world.get_agent(agent_id) else {
                return;
            };
            physics::metabolism(&self.world, agent)
        };
        self.commit_effect(&metabolic);
        if !self.world.get_agent(agent_id).is_some_and(|a| a.is_alive) {
            return;
        }

        // Drain the inbox.
        let processed = {
            let Some(agent) = self.world.get_agent_mut(agent_id) else {
                return;
            };
            communication::process_messages(agent, &self.mind_config)
        };
        if processed > 0 {
            self.record(
                EventKind::InfoUpdate,
                json!({"agent_id": agent_id, "msgs": processed}),
            );
        }

        // Perceive.
        let Some(perception) = mind::perceive(&mut self.world, agent_id, &self.mind_config) else {
            return;
        };
        self.record(
            EventKind::Perception,
            json!({
                "agent_id": agent_id,
                "data": serde_json::to_value(&perception).unwrap_or(Value::Null),
            }),
        );

        // Decide, either through the pipeline or a test controller.
        let old_goal;
        let was_planning;
        let action = if let Some(override_controller) = controller {
            let Some(agent) = self.world.get_agent(agent_id) else {
                return;
            };
            old_goal = agent.current_goal;
            was_planning = !agent.plan_queue.is_empty();
            override_controller.decide(agent, &self.world)
        } else {
            let Some(agent) = self.world.get_agent_mut(agent_id) else {
                return;
            };
            old_goal = agent.current_goal;
            was_planning = !agent.plan_queue.is_empty();
            mind::decide(agent, &perception, &mut self.rng, &self.mind_config)
        };

        // Record what the decision did to the agent's plans and goals.
        let (new_goal, now_planning, planned_target, queued_steps) = {
            let Some(agent) = self.world.get_agent_mut(agent_id) else {
                return;
            };
            agent.last_action = Some(action.clone());
            (
                agent.current_goal,
                !agent.plan_queue.is_empty(),
                agent.planned_target.clone(),
                agent.plan_queue.len(),
            )
        };
        if old_goal != new_goal {
            self.record(
                EventKind::GoalSwitch,
                json!({"agent_id": agent_id, "old": old_goal, "new": new_goal}),
            );
        }
        if was_planning && !now_planning {
            self.record(
                EventKind::ImaginationAbort,
                json!({"agent_id": agent_id, "reason": "Predicted failure"}),
            );
        }
        if !was_planning && now_planning {
            // The first step was already popped for execution.
            self.record(
                EventKind::PlanGenerated,
                json!({
                    "agent_id": agent_id,
                    "target": planned_target,
                    "steps": queued_steps.saturating_add(1),
                }),
            );
        }
        self.record(
            EventKind::Decision,
            json!({
                "agent_id": agent_id,
                "action": action.name(),
                "target": action_target(&action),
            }),
        );

        // Resolve through physics.
        let mut effect = {
            let Some(agent) = self.world.get_agent(agent_id) else {
                return;
            };
            physics::apply_action(&self.world, agent, &action)
        };

        // A failed effect invalidates the rest of the plan.
        if !effect.success {
            let Some(agent) = self.world.get_agent_mut(agent_id) else {
                return;
            };
            if !agent.plan_queue.is_empty() {
                mind::clear_plan(agent);
                effect.message.push_str(" (plan aborted)");
            }
        }

        // Translate a successful COMMUNICATE into message dispatch.
        if effect.success
            && let Action::Communicate { intent } = &effect.action
        {
            let intent = intent.clone();
            self.dispatch_communication(agent_id, &intent);
        }

        // Commit.
        self.commit_effect(&effect);

        // History and meta-reflection.
        {
            let Some(agent) = self.world.get_agent_mut(agent_id) else {
                return;
            };
            agent.action_history.push(HistoryEntry {
                tick,
                action: effect.action.clone(),
                success: effect.success,
                energy_cost: effect.energy_cost,
            });
            reflection::reflect(agent, &self.mind_config);
        }

        // Periodic reflection and trust snapshots.
        if self.config.status_interval > 0
            && tick.checked_rem(self.config.status_interval) == Some(0)
        {
            self.record_status(agent_id);
        }

        // Effects and the per-tick state summary.
        self.record(
            EventKind::Effect,
            serde_json::to_value(&metabolic).unwrap_or(Value::Null),
        );
        self.record(
            EventKind::Effect,
            serde_json::to_value(&effect).unwrap_or(Value::Null),
        );
        if let Some(agent) = self.world.get_agent(agent_id) {
            let state = json!({
                "agent_id": agent_id,
                "loc": agent.location_id,
                "energy": agent.energy,
                "alive": agent.is_alive,
            });
            self.record(EventKind::State, state);
        }
    }

    fn record_status(&mut self, agent_id: &AgentId) {
        let Some(agent) = self.world.get_agent(agent_id) else {
            return;
        };
        let avoid_list: BTreeMap<String, f64> = agent
            .reflection_scores
            .iter()
            .filter(|(_, score)| **score < 0.0)
            .map(|(location, score)| (location.to_string(), *score))
            .collect();
        let trust: BTreeMap<String, f64> = agent
            .trust
            .iter()
            .map(|(peer, value)| (peer.to_string(), *value))
            .collect();
        let agent_id = agent_id.clone();
        if !avoid_list.is_empty() {
            self.record(
                EventKind::Reflection,
                json!({"agent_id": agent_id, "avoid_list": avoid_list}),
            );
        }
        if !trust.is_empty() {
            self.record(
                EventKind::SocialStatus,
                json!({"agent_id": agent_id, "trust": trust}),
            );
        }
    }

    // -------------------------------------------------------------------
    // Communication translation
    // -------------------------------------------------------------------

    fn dispatch_communication(&mut self, sender_id: &AgentId, intent: &CommIntent) {
        let Some(location) = self
            .world
            .get_agent(sender_id)
            .map(|sender| sender.location_id.clone())
        else {
            return;
        };

        match intent {
            CommIntent::Alarm => {
                self.broadcast(
                    sender_id,
                    MessagePayload::Alarm {
                        location_id: Some(location.clone()),
                    },
                );
                self.record(
                    EventKind::AlarmChirp,
                    json!({"sender": sender_id, "location": location}),
                );
            }
            CommIntent::HelpCall => {
                self.broadcast(
                    sender_id,
                    MessagePayload::HelpCall {
                        location_id: Some(location.clone()),
                    },
                );
                self.record(
                    EventKind::HelpCallSent,
                    json!({"sender": sender_id, "location": location}),
                );
            }
            CommIntent::PuzzleHelp { object_id } => {
                // A vanished puzzle makes the call a no-op.
                let Some(object) = self.world.get_object(object_id) else {
                    return;
                };
                let obstacles = vec![ObstacleInfo {
                    id: object.id.clone(),
                    tool_required: object.tool_required.clone(),
                    required_agents: object.required_agents,
                }];
                self.broadcast(
                    sender_id,
                    MessagePayload::PuzzleHelp {
                        location_id: location.clone(),
                        obstacles,
                    },
                );
                self.record(
                    EventKind::PuzzleHelpSent,
                    json!({"sender": sender_id, "location": location, "puzzle": object_id}),
                );
            }
            CommIntent::Story { listener } => {
                let Some(story) = self
                    .world
                    .get_agent(sender_id)
                    .and_then(|sender| social::select_story(sender).cloned())
                else {
                    return;
                };
                if self.world.get_agent(listener).is_none() {
                    return;
                }
                let topic = story.topic;
                self.send_to(sender_id, listener, MessagePayload::Story { story });
                self.record(
                    EventKind::StoryShared,
                    json!({"sender": sender_id, "receiver": listener, "topic": topic}),
                );
            }
            CommIntent::Share { listener } => {
                if self.world.get_agent(listener).is_none() {
                    return;
                }
                let known_food = self
                    .world
                    .get_agent(sender_id)
                    .and_then(social::highest_value_info);
                if let Some(food_location) = known_food {
                    let mut node = CognitiveNode::default();
                    node.tags.insert(ObjectKind::Food);
                    let mut nodes = BTreeMap::new();
                    nodes.insert(food_location.clone(), node);
                    self.send_to(sender_id, listener, MessagePayload::MapUpdate { nodes });
                    self.record(
                        EventKind::AltruisticAction,
                        json!({
                            "sender": sender_id,
                            "receiver": listener,
                            "location": food_location,
                        }),
                    );
                } else {
                    // Nothing specific to offer: share the whole map.
                    let nodes = self
                        .world
                        .get_agent(sender_id)
                        .map(|sender| sender.cognitive_map.clone())
                        .unwrap_or_default();
                    self.send_to(sender_id, listener, MessagePayload::MapUpdate { nodes });
                }
            }
            CommIntent::Broadcast => {
                let nodes = self
                    .world
                    .get_agent(sender_id)
                    .map(|sender| sender.cognitive_map.clone())
                    .unwrap_or_default();
                let payload_size = nodes.len();
                let receivers = self.world.roster().len().saturating_sub(1);
                self.broadcast(sender_id, MessagePayload::MapUpdate { nodes });
                self.record(
                    EventKind::Communication,
                    json!({
                        "sender": sender_id,
                        "receivers": receivers,
                        "payload_size": payload_size,
                    }),
                );
            }
        }
    }

    /// Buffer a message for every registered agent except the sender.
    fn broadcast(&mut self, sender_id: &AgentId, payload: MessagePayload) {
        let tick = self.tick_count;
        for receiver in self.world.roster().to_vec() {
            if receiver == *sender_id {
                continue;
            }
            self.pending_messages.push((
                receiver,
                Message {
                    sender_id: sender_id.clone(),
                    tick,
                    payload: payload.clone(),
                },
            ));
        }
    }

    /// Buffer a message for a single receiver.
    fn send_to(&mut self, sender_id: &AgentId, receiver: &AgentId, payload: MessagePayload) {
        self.pending_messages.push((
            receiver.clone(),
            Message {
                sender_id: sender_id.clone(),
                tick: self.tick_count,
                payload,
            },
        ));
    }

    // -------------------------------------------------------------------
    // Commit
    // -------------------------------------------------------------------

    /// Commit an effect to the world. The only place state changes.
    fn commit_effect(&mut self, effect: &Effect) {
        let tick = self.tick_count;

        let died = {
            let Some(agent) = self.world.get_agent_mut(&effect.agent_id) else {
                return;
            };
            agent.energy = agent
                .energy
                .saturating_sub(effect.energy_cost)
                .saturating_add(effect.energy_gain);
            let died = agent.is_alive && agent.energy <= 0;
            if died {
                agent.is_alive = false;
            }
            died
        };
        if died {
            info!(agent = %effect.agent_id, tick, "agent died");
            self.record(
                EventKind::Death,
                json!({"agent_id": effect.agent_id, "reason": "Starvation"}),
            );
        }

        if !effect.success {
            return;
        }

        // Successful actions teach.
        if let Some(agent) = self.world.get_agent_mut(&effect.agent_id) {
            match &effect.action {
                Action::Extract { .. } => agent.skills.extract += SKILL_GAIN_EXTRACT,
                Action::Use { .. } => agent.skills.tool_use += SKILL_GAIN_USE,
                Action::Move { .. } => agent.skills.explore += SKILL_GAIN_MOVE,
                _ => {}
            }
        }

        if let Some(new_location) = &effect.new_location_id {
            self.world.move_agent(&effect.agent_id, new_location.clone());
        }

        // Object transfers in and out of the inventory.
        match &effect.action {
            Action::Pickup { object_id } => {
                if self.world.get_object(object_id).is_some() {
                    self.world.unlist_object(object_id);
                    if let Some(agent) = self.world.get_agent_mut(&effect.agent_id) {
                        agent.inventory.push(object_id.clone());
                    }
                    self.record(
                        EventKind::InventoryAdd,
                        json!({"agent_id": effect.agent_id, "object_id": object_id}),
                    );
                }
            }
            Action::Drop { object_id } => {
                let location = {
                    let Some(agent) = self.world.get_agent_mut(&effect.agent_id) else {
                        return;
                    };
                    if !agent.carries(object_id) {
                        return;
                    }
                    agent.inventory.retain(|carried| carried != object_id);
                    agent.location_id.clone()
                };
                self.world.add_object_to_location(object_id, &location);
                self.record(
                    EventKind::InventoryRemove,
                    json!({"agent_id": effect.agent_id, "object_id": object_id}),
                );
            }
            _ => {}
        }

        // Object removal for consumption, extraction, and tool use.
        if let Some(removed) = &effect.removed_object_id {
            match &effect.action {
                Action::Consume { .. } => {
                    self.world.remove_object(removed);
                }
                Action::Extract { .. } => {
                    let participants: Vec<AgentId> = self
                        .world
                        .get_agent(&effect.agent_id)
                        .map(|actor| actor.location_id.clone())
                        .map_or_else(Vec::new, |location| {
                            self.world
                                .agents()
                                .filter(|a| a.is_alive && a.location_id == location)
                                .map(|a| a.id.clone())
                                .collect()
                        });
                    self.world.remove_object(removed);
                    self.record(
                        EventKind::CoopExtraction,
                        json!({
                            "agent_id": effect.agent_id,
                            "object_id": removed,
                            "participants": participants,
                        }),
                    );
                }
                Action::Use { .. } => {
                    self.world.remove_object(removed);
                    self.record(
                        EventKind::ObjectUsed,
                        json!({"agent_id": effect.agent_id, "object_id": removed}),
                    );
                }
                _ => {}
            }
        }
    }

    fn record(&mut self, kind: EventKind, fields: Value) {
        self.sink.append(EventRecord::new(self.tick_count, kind, fields));
    }
}

/// The log-friendly target of an action, mirroring the wire strings the
/// communication layer understands.
fn action_target(action: &Action) -> Option<String> {
    match action {
        Action::Wait => None,
        Action::Move { target } => Some(target.to_string()),
        Action::Consume { object_id }
        | Action::Pickup { object_id }
        | Action::Drop { object_id }
        | Action::Extract { object_id }
        | Action::Use { object_id } => Some(object_id.to_string()),
        Action::Communicate { intent } => match intent {
            CommIntent::Broadcast => None,
            CommIntent::Alarm => Some("ALARM".to_owned()),
            CommIntent::HelpCall => Some("HELP_CALL".to_owned()),
            CommIntent::PuzzleHelp { object_id } => Some(format!("PUZZLE_HELP:{object_id}")),
            CommIntent::Story { listener } => Some(format!("STORY:{listener}")),
            CommIntent::Share { listener } => Some(listener.to_string()),
        },
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use cogito_events::{MemorySink, NullSink};

    use super::*;

    fn wait_controller() -> impl Controller {
        |_agent: &Agent, _world: &World| Action::Wait
    }

    #[test]
    fn metabolism_drains_one_energy_per_tick() {
        let mut sim = Simulation::new(1, MemorySink::new());
        sim.add_location("A", Vec::new());
        sim.add_agent(Agent::new("a1", "One", "A", 10));
        let mut controller = wait_controller();
        sim.run(3, Some(&mut controller));
        let agent = sim.world().get_agent(&AgentId::new("a1")).unwrap();
        assert_eq!(agent.energy, 7);
        assert!(agent.is_alive);
    }

    #[test]
    fn starvation_kills_and_records_death() {
        let mut sim = Simulation::new(1, MemorySink::new());
        sim.add_location("A", Vec::new());
        sim.add_agent(Agent::new("a1", "One", "A", 2));
        let mut controller = wait_controller();
        sim.run(10, Some(&mut controller));
        let agent = sim.world().get_agent(&AgentId::new("a1")).unwrap();
        assert!(!agent.is_alive);
        assert!(agent.energy <= 0);
        assert_eq!(sim.sink().count_of(EventKind::Death), 1);
        // The run stops early once everyone is dead.
        assert!(sim.tick_count() < 10);
    }

    #[test]
    fn dead_agents_are_skipped() {
        let mut sim = Simulation::new(1, MemorySink::new());
        sim.add_location("A", Vec::new());
        let mut dead = Agent::new("a1", "One", "A", 0);
        dead.is_alive = false;
        sim.add_agent(dead);
        sim.add_agent(Agent::new("a2", "Two", "A", 50));
        let mut controller = wait_controller();
        sim.run(2, Some(&mut controller));
        // Only the living agent produced perceptions.
        let perceiving: Vec<&EventRecord> =
            sim.sink().of_kind(EventKind::Perception).collect();
        assert_eq!(perceiving.len(), 2);
        for record in perceiving {
            assert_eq!(record.field("agent_id"), Some(&json!("a2")));
        }
    }

    #[test]
    fn failed_action_clears_the_plan_and_annotates_the_effect() {
        let mut sim = Simulation::new(1, MemorySink::new());
        sim.add_location("A", Vec::new());
        sim.add_agent(Agent::new("a1", "One", "A", 100));
        {
            let agent = sim.world_mut().get_agent_mut(&AgentId::new("a1")).unwrap();
            agent.plan_queue.push_back(Action::Move {
                target: LocationId::new("Nowhere"),
            });
        }
        let mut controller = |_: &Agent, _: &World| Action::Move {
            target: LocationId::new("Nowhere"),
        };
        sim.tick(Some(&mut controller));
        let agent = sim.world().get_agent(&AgentId::new("a1")).unwrap();
        assert!(agent.plan_queue.is_empty());
        let annotated = sim.sink().of_kind(EventKind::Effect).any(|record| {
            record
                .field("message")
                .and_then(Value::as_str)
                .is_some_and(|m| m.ends_with("(plan aborted)"))
        });
        assert!(annotated);
    }

    #[test]
    fn broadcast_is_invisible_until_the_next_tick() {
        let mut sim = Simulation::new(1, MemorySink::new());
        sim.add_location("A", Vec::new());
        sim.add_agent(Agent::new("speaker", "Speaker", "A", 100));
        sim.add_agent(Agent::new("listener", "Listener", "A", 100));

        let speaker = AgentId::new("speaker");
        let mut controller = move |agent: &Agent, _world: &World| {
            if agent.id == speaker {
                Action::Communicate {
                    intent: CommIntent::Alarm,
                }
            } else {
                Action::Wait
            }
        };
        sim.tick(Some(&mut controller));
        // The listener stepped in the same tick and saw nothing...
        assert_eq!(sim.sink().count_of(EventKind::InfoUpdate), 0);
        let listener = sim.world().get_agent(&AgentId::new("listener")).unwrap();
        assert_eq!(listener.inbox.len(), 1);

        // ...but drains the alarm at its next tick.
        sim.tick(Some(&mut controller));
        assert_eq!(sim.sink().count_of(EventKind::InfoUpdate), 1);
    }

    #[test]
    fn identical_seeds_produce_identical_runs() {
        // No record inspection here, so the discarding sink suffices.
        let build = || {
            let mut sim = Simulation::new(99, NullSink);
            sim.add_location("A", vec![LocationId::new("B")]);
            sim.add_location("B", vec![LocationId::new("A"), LocationId::new("C")]);
            sim.add_location("C", vec![LocationId::new("B")]);
            sim.add_object(Object::new("berry", ObjectKind::Food, 30, "C"));
            sim.add_agent(Agent::new("a1", "One", "A", 60));
            sim.add_agent(Agent::new("a2", "Two", "B", 60));
            sim
        };
        let mut first = build();
        let mut second = build();
        for _ in 0..20 {
            first.tick(None);
            second.tick(None);
            for id in ["a1", "a2"] {
                let a = first.world().get_agent(&AgentId::new(id)).unwrap();
                let b = second.world().get_agent(&AgentId::new(id)).unwrap();
                assert_eq!(a, b);
            }
        }
    }
}
