//! The world: a static location graph plus entity registries.
//!
//! The graph (locations and their neighbor lists) is fixed after
//! construction. Objects live in a central registry and are referenced
//! by id from location object-lists and agent inventories; agents live
//! in their own registry with an insertion-order roster that fixes the
//! per-tick iteration order.
//!
//! Construction is deliberately unvalidated: duplicate ids overwrite,
//! dangling neighbor references are kept as-is. Illegal states never
//! panic here -- they surface later as unsuccessful action effects.
//! Mutating operations are only called by the simulation loop when it
//! commits an effect.

use std::collections::BTreeMap;

use cogito_types::{Agent, AgentId, LocationId, Object, ObjectId};

/// One node of the world graph.
#[derive(Debug, Clone, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct LocationNode {
    /// Directly reachable locations, in construction order.
    pub neighbors: Vec<LocationId>,
    /// Objects currently lying here, in insertion order.
    pub objects: Vec<ObjectId>,
}

/// The authoritative simulation state: graph, objects, agents.
#[derive(Debug, Clone, Default, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct World {
    /// The static location graph.
    locations: BTreeMap<LocationId, LocationNode>,
    /// The object registry. Carried objects stay registered with an
    /// empty location id; destroyed objects are removed.
    objects: BTreeMap<ObjectId, Object>,
    /// The agent registry. Dead agents are retained for observation.
    agents: BTreeMap<AgentId, Agent>,
    /// Agent ids in registration order; the tick iteration order.
    roster: Vec<AgentId>,
}

impl World {
    /// Create an empty world.
    pub const fn new() -> Self {
        Self {
            locations: BTreeMap::new(),
            objects: BTreeMap::new(),
            agents: BTreeMap::new(),
            roster: Vec::new(),
        }
    }

    // -------------------------------------------------------------------
    // Construction
    // -------------------------------------------------------------------

    /// Add a location node with its neighbor list.
    ///
    /// Re-adding an existing id replaces its neighbors and clears its
    /// object list.
    pub fn add_location(&mut self, id: impl Into<LocationId>, neighbors: Vec<LocationId>) {
        self.locations.insert(
            id.into(),
            LocationNode {
                neighbors,
                objects: Vec::new(),
            },
        );
    }

    /// Register an agent. First registration fixes its roster position.
    pub fn add_agent(&mut self, agent: Agent) {
        if !self.agents.contains_key(&agent.id) {
            self.roster.push(agent.id.clone());
        }
        self.agents.insert(agent.id.clone(), agent);
    }

    /// Register an object, indexing it under its location when that
    /// location exists in the graph.
    pub fn add_object(&mut self, object: Object) {
        let id = object.id.clone();
        let location = object.location_id.clone();
        self.objects.insert(id.clone(), object);
        if let Some(node) = self.locations.get_mut(&location)
            && !node.objects.contains(&id)
        {
            node.objects.push(id);
        }
    }

    // -------------------------------------------------------------------
    // Queries
    // -------------------------------------------------------------------

    /// Whether the location exists in the graph.
    pub fn contains_location(&self, id: &LocationId) -> bool {
        self.locations.contains_key(id)
    }

    /// The neighbor list of a location; empty for unknown locations.
    pub fn neighbors(&self, id: &LocationId) -> &[LocationId] {
        self.locations
            .get(id)
            .map_or(&[], |node| node.neighbors.as_slice())
    }

    /// Resolve the objects lying at a location, skipping stale ids.
    pub fn objects_at(&self, id: &LocationId) -> Vec<&Object> {
        self.locations.get(id).map_or_else(Vec::new, |node| {
            node.objects
                .iter()
                .filter_map(|oid| self.objects.get(oid))
                .collect()
        })
    }

    /// Look up an object by id.
    pub fn get_object(&self, id: &ObjectId) -> Option<&Object> {
        self.objects.get(id)
    }

    /// Iterate every registered object, carried ones included.
    pub fn objects(&self) -> impl Iterator<Item = &Object> {
        self.objects.values()
    }

    /// All location ids in the graph.
    pub fn location_ids(&self) -> Vec<LocationId> {
        self.locations.keys().cloned().collect()
    }

    /// The raw object-id list of a location; empty for unknown
    /// locations.
    pub fn object_ids_at(&self, id: &LocationId) -> &[ObjectId] {
        self.locations
            .get(id)
            .map_or(&[], |node| node.objects.as_slice())
    }

    /// Look up an agent by id.
    pub fn get_agent(&self, id: &AgentId) -> Option<&Agent> {
        self.agents.get(id)
    }

    /// Look up an agent mutably by id.
    pub fn get_agent_mut(&mut self, id: &AgentId) -> Option<&mut Agent> {
        self.agents.get_mut(id)
    }

    /// Iterate agents in registration order.
    pub fn agents(&self) -> impl Iterator<Item = &Agent> {
        self.roster.iter().filter_map(|id| self.agents.get(id))
    }

    /// Agent ids in registration order.
    pub fn roster(&self) -> &[AgentId] {
        &self.roster
    }

    /// Count alive agents standing at a location.
    pub fn alive_agents_at(&self, location: &LocationId) -> usize {
        self.agents()
            .filter(|a| a.is_alive && a.location_id == *location)
            .count()
    }

    /// Whether any registered agent is still alive.
    pub fn any_alive(&self) -> bool {
        self.agents().any(|a| a.is_alive)
    }

    /// Number of locations in the graph.
    pub fn location_count(&self) -> usize {
        self.locations.len()
    }

    // -------------------------------------------------------------------
    // Mutation (simulation-commit only)
    // -------------------------------------------------------------------

    /// Reassign an agent's location. No connectivity validation; the
    /// physics rules have already vouched for the move.
    pub fn move_agent(&mut self, agent_id: &AgentId, new_location: LocationId) {
        if let Some(agent) = self.agents.get_mut(agent_id) {
            agent.location_id = new_location;
        }
    }

    /// Remove an object from its location index but keep it registered,
    /// clearing its location id. Used when an object moves into an
    /// inventory.
    pub fn unlist_object(&mut self, object_id: &ObjectId) {
        let Some(object) = self.objects.get_mut(object_id) else {
            return;
        };
        let location = std::mem::take(&mut object.location_id);
        if let Some(node) = self.locations.get_mut(&location) {
            node.objects.retain(|oid| oid != object_id);
        }
    }

    /// Re-list a registered object at a location. Used when an object
    /// leaves an inventory.
    pub fn add_object_to_location(&mut self, object_id: &ObjectId, location: &LocationId) {
        if !self.locations.contains_key(location) {
            return;
        }
        let Some(object) = self.objects.get_mut(object_id) else {
            return;
        };
        object.location_id = location.clone();
        if let Some(node) = self.locations.get_mut(location)
            && !node.objects.contains(object_id)
        {
            node.objects.push(object_id.clone());
        }
    }

    /// Remove an object from existence: unlist it and drop it from the
    /// registry.
    pub fn remove_object(&mut self, object_id: &ObjectId) {
        self.unlist_object(object_id);
        self.objects.remove(object_id);
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use cogito_types::ObjectKind;

    use super::*;

    fn two_room_world() -> World {
        let mut world = World::new();
        world.add_location("A", vec![LocationId::new("B")]);
        world.add_location("B", vec![LocationId::new("A")]);
        world
    }

    #[test]
    fn objects_index_under_their_location() {
        let mut world = two_room_world();
        world.add_object(Object::new("berry", ObjectKind::Food, 10, "A"));
        let seen = world.objects_at(&LocationId::new("A"));
        assert_eq!(seen.len(), 1);
        assert_eq!(seen.first().map(|o| o.id.as_str()), Some("berry"));
        assert!(world.objects_at(&LocationId::new("B")).is_empty());
    }

    #[test]
    fn objects_at_unknown_location_stay_unindexed() {
        let mut world = two_room_world();
        world.add_object(Object::new("ghost", ObjectKind::Food, 5, "Nowhere"));
        assert!(world.get_object(&ObjectId::new("ghost")).is_some());
        assert!(world.objects_at(&LocationId::new("Nowhere")).is_empty());
    }

    #[test]
    fn unlist_keeps_object_registered() {
        let mut world = two_room_world();
        world.add_object(Object::new("key", ObjectKind::Tool, 0, "A"));
        world.unlist_object(&ObjectId::new("key"));
        assert!(world.objects_at(&LocationId::new("A")).is_empty());
        let key = world.get_object(&ObjectId::new("key")).unwrap();
        assert!(key.location_id.is_empty());
    }

    #[test]
    fn relist_restores_location_index() {
        let mut world = two_room_world();
        world.add_object(Object::new("key", ObjectKind::Tool, 0, "A"));
        world.unlist_object(&ObjectId::new("key"));
        world.add_object_to_location(&ObjectId::new("key"), &LocationId::new("B"));
        assert_eq!(world.objects_at(&LocationId::new("B")).len(), 1);
    }

    #[test]
    fn remove_object_deletes_from_registry() {
        let mut world = two_room_world();
        world.add_object(Object::new("berry", ObjectKind::Food, 10, "A"));
        world.remove_object(&ObjectId::new("berry"));
        assert!(world.get_object(&ObjectId::new("berry")).is_none());
        assert!(world.objects_at(&LocationId::new("A")).is_empty());
    }

    #[test]
    fn roster_preserves_registration_order() {
        let mut world = two_room_world();
        world.add_agent(Agent::new("zed", "Zed", "A", 100));
        world.add_agent(Agent::new("amy", "Amy", "A", 100));
        let order: Vec<&str> = world.agents().map(|a| a.id.as_str()).collect();
        assert_eq!(order, vec!["zed", "amy"]);
    }

    #[test]
    fn reregistering_an_agent_keeps_its_roster_slot() {
        let mut world = two_room_world();
        world.add_agent(Agent::new("zed", "Zed", "A", 100));
        world.add_agent(Agent::new("amy", "Amy", "A", 100));
        world.add_agent(Agent::new("zed", "Zed II", "B", 50));
        assert_eq!(world.roster().len(), 2);
        let zed = world.get_agent(&AgentId::new("zed")).unwrap();
        assert_eq!(zed.name, "Zed II");
    }

    #[test]
    fn dangling_neighbors_are_accepted() {
        let mut world = World::new();
        world.add_location("A", vec![LocationId::new("Missing")]);
        assert_eq!(world.neighbors(&LocationId::new("A")).len(), 1);
        assert!(!world.contains_location(&LocationId::new("Missing")));
    }

    #[test]
    fn alive_count_ignores_the_dead() {
        let mut world = two_room_world();
        world.add_agent(Agent::new("a1", "One", "A", 100));
        let mut dead = Agent::new("a2", "Two", "A", 0);
        dead.is_alive = false;
        world.add_agent(dead);
        assert_eq!(world.alive_agents_at(&LocationId::new("A")), 1);
    }
}
