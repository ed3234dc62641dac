//! Domain models - core types for the whereabouts clock
//!
//! This module contains the canonical data types used throughout the system:
//! - `Person` - one member of the tracked roster
//! - `Location` - one named place from the configured registry
//! - `InboundEvent` - classified presence event consumed by the tracker
//! - `LocationRegistry` / `Roster` - the immutable startup configuration sets

pub mod registry;
pub mod types;

// Re-export commonly used types at module level
pub use registry::{LocationRegistry, Roster};
pub use types::{InboundEvent, Location, Person, WaypointEvent};
