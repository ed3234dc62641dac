//! Waypoint pass-through store
//!
//! Holds the latest raw waypoint payload per person, written by the tracker
//! and read by the state HTTP server. Payloads are stored exactly as
//! received; interpreting them is the display frontend's concern.

use crate::domain::types::WaypointEvent;
use parking_lot::RwLock;
use std::collections::HashMap;
use std::sync::Arc;

#[derive(Debug, Clone, Default)]
pub struct WaypointStore {
    inner: Arc<RwLock<HashMap<String, serde_json::Value>>>,
}

impl WaypointStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record the latest waypoint for a person, replacing any previous one
    pub fn record(&self, event: &WaypointEvent) {
        self.inner.write().insert(event.person.as_str().to_string(), event.payload.clone());
    }

    pub fn get(&self, person: &str) -> Option<serde_json::Value> {
        self.inner.read().get(person).cloned()
    }

    pub fn len(&self) -> usize {
        self.inner.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.read().is_empty()
    }

    /// All stored waypoints as one JSON object keyed by person
    pub fn to_json(&self) -> serde_json::Value {
        let inner = self.inner.read();
        serde_json::Value::Object(inner.iter().map(|(k, v)| (k.clone(), v.clone())).collect())
    }
}
