//! Shared type definitions for the Cogito simulation.
//!
//! This crate is the single source of truth for the types used across the
//! Cogito workspace. It holds no behavior beyond constructors and trivial
//! accessors; physics, cognition, and the simulation loop all live in the
//! crates layered above.
//!
//! # Modules
//!
//! - [`ids`] -- Type-safe opaque-string wrappers for entity identifiers
//! - [`enums`] -- Enumeration types (object kinds, goals, story topics)
//! - [`actions`] -- Actions, communication intents, and physics effects
//! - [`messages`] -- Inter-agent messages and payloads
//! - [`perception`] -- The per-tick perception payload and sightings
//! - [`structs`] -- Core entity structs (objects, agents, belief state)

pub mod actions;
pub mod enums;
pub mod ids;
pub mod messages;
pub mod perception;
pub mod structs;

// Re-export all public types at crate root for convenience.
pub use actions::{Action, CommIntent, Effect};
pub use enums::{GoalKind, ObjectKind, StoryTopic};
pub use ids::{AgentId, LocationId, ObjectId};
pub use messages::{Message, MessagePayload};
pub use perception::{
    CarriedItem, CoopFoodSighting, ObstacleInfo, Perception, ToolInfo, VisibleAgent,
};
pub use structs::{
    Agent, CognitiveNode, HistoryEntry, Object, SkillSet, SocialNote, SpatialPattern, Story,
};
