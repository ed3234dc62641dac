//! IO modules - external system interfaces
//!
//! This module contains all external IO operations:
//! - `mqtt` - MQTT client receiving OwnTracks presence events
//! - `http` - State HTTP endpoint for the display frontend
//! - `waypoints` - Waypoint pass-through store (written by the tracker, read by the display)

pub mod http;
pub mod mqtt;
pub mod waypoints;

// Re-export commonly used types
pub use waypoints::WaypointStore;
