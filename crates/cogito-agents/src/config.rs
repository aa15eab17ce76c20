//! Configurable parameters for the cognitive pipeline.
//!
//! Every behavioral threshold of the mind lives here with its canonical
//! default, so tests can tighten or relax individual behaviors without
//! touching the pipeline code.

use serde::{Deserialize, Serialize};

/// Tunable thresholds for perception, planning, and social behavior.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MindConfig {
    /// Below this energy the agent eats visible food immediately,
    /// overriding any plan (default: 30).
    pub survival_threshold: i64,

    /// Maximum number of perceptions retained in short-term memory
    /// (default: 10).
    pub memory_capacity: usize,

    /// Minimum energy required before spending energy on help calls
    /// (default: 20).
    pub comm_energy_floor: i64,

    /// Minimum energy at which an agent hoards visible food at home
    /// (default: 85).
    pub hoard_energy_threshold: i64,

    /// Below this energy an exploring agent eats food it happens upon
    /// (default: 95).
    pub explore_eat_threshold: i64,

    /// How many recent history entries reflection examines
    /// (default: 20).
    pub reflection_window: usize,

    /// Move-target repetitions tolerated inside the window before a
    /// location is penalized (default: 3).
    pub repeat_limit: usize,

    /// Reflection-score penalty applied per detected repetition
    /// (default: 0.5).
    pub inefficiency_penalty: f64,

    /// Reflection scores below this mark a location as avoided in
    /// planning and movement (default: -0.5).
    pub avoidance_cutoff: f64,

    /// A map node older than this many ticks becomes a stale-frontier
    /// goal (default: 50).
    pub stale_threshold: u64,

    /// Minimum projected final energy for a plan to count as safe
    /// (default: 5).
    pub safety_margin: i64,

    /// Energy gain the forward model assumes for an imagined CONSUME
    /// (default: 50).
    pub assumed_food_gain: i64,

    /// Trust assigned to agents never interacted with (default: 0.5).
    pub initial_trust: f64,

    /// Minimum own energy before helping others (default: 70).
    pub altruism_energy_threshold: i64,

    /// Peers below this energy count as needing help (default: 30).
    pub needy_energy_threshold: i64,

    /// Minimum trust before following a peer's location (default: 0.7).
    pub imitation_trust_threshold: f64,

    /// Trust above which a visible peer makes following worthwhile as a
    /// strategic goal (default: 0.6).
    pub leader_trust_threshold: f64,

    /// Window in ticks within which duplicate stories about the same
    /// topic and location are suppressed (default: 20).
    pub story_dedup_window: u64,
}

impl Default for MindConfig {
    fn default() -> Self {
        Self {
            survival_threshold: 30,
            memory_capacity: 10,
            comm_energy_floor: 20,
            hoard_energy_threshold: 85,
            explore_eat_threshold: 95,
            reflection_window: 20,
            repeat_limit: 3,
            inefficiency_penalty: 0.5,
            avoidance_cutoff: -0.5,
            stale_threshold: 50,
            safety_margin: 5,
            assumed_food_gain: 50,
            initial_trust: 0.5,
            altruism_energy_threshold: 70,
            needy_energy_threshold: 30,
            imitation_trust_threshold: 0.7,
            leader_trust_threshold: 0.6,
            story_dedup_window: 20,
        }
    }
}
