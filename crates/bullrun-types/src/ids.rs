//! Type-safe identifier wrappers around catalog id strings.
//!
//! Every catalog entry is keyed by a human-readable string id (`"NOVA"`,
//! `"merger-rumor"`). Wrapping each id space in its own newtype prevents a
//! chain id from being looked up in the story registry at compile time.
//!
//! Newtypes serialize as their inner string, so catalog YAML and persisted
//! game state stay plain text.

use serde::{Deserialize, Serialize};
use ts_rs::TS;

/// Generates a newtype wrapper around [`String`] with standard derives.
macro_rules! define_id {
    (
        $(#[$meta:meta])*
        $name:ident
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
        #[ts(export, export_to = "bindings/")]
        pub struct $name(pub String);

        impl $name {
            /// Create an identifier from any string-like value.
            pub fn new(id: impl Into<String>) -> Self {
                Self(id.into())
            }

            /// Borrow the identifier as a string slice.
            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl core::fmt::Display for $name {
            fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
                f.write_str(&self.0)
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
    /// Unique identifier for a tradable asset (ticker symbol).
    AssetId
}

define_id! {
    /// Unique identifier for a single-day market event headline.
    EventId
}

define_id! {
    /// Unique identifier for a rumor-to-resolution chain definition.
    ChainId
}

define_id! {
    /// Unique identifier for a multi-stage story definition.
    StoryId
}

define_id! {
    /// Unique identifier for a calendar-anchored scheduled event.
    ScheduledId
}

define_id! {
    /// Unique identifier for a flavor or quiet-filler headline.
    PoolId
}
