//! Shared types for the whereabouts clock

use serde::{Deserialize, Serialize};

/// Newtype wrapper for person identifiers to provide type safety
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Person(pub String);

impl Person {
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for Person {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

// Lets a HashMap<Person, _> be queried with a plain &str
impl std::borrow::Borrow<str> for Person {
    fn borrow(&self) -> &str {
        &self.0
    }
}

/// Newtype wrapper for location names to provide type safety
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Location(pub String);

impl Location {
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for Location {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Raw positional update, forwarded untouched to the display layer
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WaypointEvent {
    pub person: Person,
    /// Original wire payload; interpretation is the frontend's concern
    pub payload: serde_json::Value,
}

/// Classified presence event for internal processing
#[derive(Debug, Clone, PartialEq)]
pub enum InboundEvent {
    /// Person is in transit between known regions
    Traveling { person: Person },
    /// Person's device went dark; no recent information
    Lost { person: Person },
    /// Person reported inside one or more geofenced regions.
    /// Only the first region is authoritative.
    RegionUpdate { person: Person, regions: Vec<String> },
    /// Raw positional update, not interpreted by the tracker
    Waypoint(WaypointEvent),
}

impl InboundEvent {
    pub fn kind(&self) -> &'static str {
        match self {
            InboundEvent::Traveling { .. } => "traveling",
            InboundEvent::Lost { .. } => "lost",
            InboundEvent::RegionUpdate { .. } => "update",
            InboundEvent::Waypoint(_) => "waypoint",
        }
    }

    /// The person this event concerns
    pub fn person(&self) -> &Person {
        match self {
            InboundEvent::Traveling { person }
            | InboundEvent::Lost { person }
            | InboundEvent::RegionUpdate { person, .. } => person,
            InboundEvent::Waypoint(waypoint) => &waypoint.person,
        }
    }
}

/// OwnTracks-style wire payload, parsed permissively.
///
/// Unknown fields are ignored; classification into an [`InboundEvent`]
/// happens in the ingest bridge, not here.
#[derive(Debug, Deserialize)]
pub struct PresencePayload {
    #[serde(rename = "_type")]
    pub msg_type: String,
    /// Regions the device currently reports itself inside, first is primary
    #[serde(default)]
    pub inregions: Option<Vec<String>>,
    /// Transition direction ("enter" / "leave")
    #[serde(default)]
    pub event: Option<String>,
    /// Region name on transition messages
    #[serde(default)]
    pub desc: Option<String>,
    /// Device timestamp, epoch seconds; devices queue messages while
    /// offline, so this can lag far behind arrival time
    #[serde(default)]
    pub tst: Option<i64>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_person_borrow_as_str() {
        use std::collections::HashMap;
        let mut map = HashMap::new();
        map.insert(Person::new("Alice"), 1);
        assert_eq!(map.get("Alice"), Some(&1));
        assert_eq!(map.get("alice"), None);
    }

    #[test]
    fn test_event_kind() {
        let event = InboundEvent::Traveling { person: Person::new("Bob") };
        assert_eq!(event.kind(), "traveling");
        assert_eq!(event.person().as_str(), "Bob");
    }

    #[test]
    fn test_presence_payload_ignores_unknown_fields() {
        let json = r#"{"_type":"location","lat":64.1,"lon":-21.9,"inregions":["Home"]}"#;
        let payload: PresencePayload = serde_json::from_str(json).unwrap();
        assert_eq!(payload.msg_type, "location");
        assert_eq!(payload.inregions, Some(vec!["Home".to_string()]));
    }
}
