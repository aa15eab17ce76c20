//! Opaque string identifiers for all entities in the simulation.
//!
//! Every entity carries a strongly-typed ID wrapper to prevent accidental
//! mixing of identifiers at compile time. Identifiers are opaque strings:
//! world builders pass human-readable names ("Cave", "scout-1"), while
//! anonymous entities mint a random UUID v4 string.
//!
//! Equality, ordering, and hashing all delegate to the inner string, so
//! the wrappers are usable as `BTreeMap` keys throughout the workspace.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Generates a newtype wrapper around an owned string with standard derives.
macro_rules! define_id {
    (
        $(#[$meta:meta])*
        $name:ident
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(pub String);

        impl $name {
            /// Create an identifier from any string-like value.
            pub fn new(id: impl Into<String>) -> Self {
                Self(id.into())
            }

            /// Mint a random identifier (a UUID v4 rendered as a string).
            pub fn random() -> Self {
                Self(Uuid::new_v4().to_string())
            }

            /// Borrow the identifier as a string slice.
            pub fn as_str(&self) -> &str {
                &self.0
            }

            /// Whether this is the empty placeholder identifier.
            ///
            /// Objects held in an inventory carry an empty location id.
            pub fn is_empty(&self) -> bool {
                self.0.is_empty()
            }
        }

        impl core::fmt::Display for $name {
            fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl From<&str> for $name {
            fn from(id: &str) -> Self {
                Self(id.to_owned())
            }
        }

        impl From<String> for $name {
            fn from(id: String) -> Self {
                Self(id)
            }
        }
    };
}

define_id! {
    /// Unique identifier for an agent in the simulation.
    AgentId
}

define_id! {
    /// Unique identifier for a passive object.
    ObjectId
}

define_id! {
    /// Unique identifier for a location (node in the world graph).
    LocationId
}
