//! Controller trait: an external source of agent decisions.
//!
//! The simulation normally routes decisions through the cognitive
//! pipeline. A [`Controller`] bypasses it entirely -- the function sees
//! the agent and the world and returns the action to commit. Tests use
//! this to script exact action sequences; any `FnMut(&Agent, &World) ->
//! Action` closure is a controller.

use cogito_types::{Action, Agent};
use cogito_world::World;

/// A source of agent decisions that bypasses the cognitive pipeline.
pub trait Controller {
    /// Choose the action for `agent` this tick.
    fn decide(&mut self, agent: &Agent, world: &World) -> Action;
}

impl<F> Controller for F
where
    F: FnMut(&Agent, &World) -> Action,
{
    fn decide(&mut self, agent: &Agent, world: &World) -> Action {
        self(agent, world)
    }
}
