//! Person whereabouts tracking
//!
//! The Tracker is the central event processor. It owns the person-to-location
//! map and is its only mutator: IO tasks feed it classified events over a
//! bounded channel, and the display layer observes the result through
//! published snapshots and the change notification signal.

mod handlers;

use crate::domain::registry::{LocationRegistry, Roster};
use crate::domain::types::{InboundEvent, Location, Person};
use crate::io::waypoints::WaypointStore;
use crate::services::notifier::ChangeNotifier;
use rustc_hash::FxHashMap;
use serde::Serialize;
use tokio::sync::{mpsc, watch};
use tracing::info;

/// One row of the published state: who is where
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PersonLocation {
    pub person: String,
    pub location: String,
}

/// Immutable copy of the full state, in roster order
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ClockSnapshot {
    pub people: Vec<PersonLocation>,
}

/// Central event processor for person location state
pub struct Tracker {
    /// Valid location names, fixed at startup
    pub(crate) registry: LocationRegistry,
    /// Tracked people, fixed at startup
    pub(crate) roster: Roster,
    /// Current location per person; the domain is exactly the roster
    pub(crate) state: FxHashMap<Person, Location>,
    /// Zero-payload "re-render" signal, one per accepted mutation
    pub(crate) changes: ChangeNotifier,
    /// Latest full-state snapshot for readers
    pub(crate) snapshot_tx: watch::Sender<ClockSnapshot>,
    /// Raw waypoint pass-through for the display layer
    pub(crate) waypoints: WaypointStore,
}

impl Tracker {
    /// Create a new Tracker. Every roster member starts out `Lost`; the
    /// initial snapshot is published before any event is processed.
    pub fn new(
        registry: LocationRegistry,
        roster: Roster,
        changes: ChangeNotifier,
        waypoints: WaypointStore,
    ) -> (Self, watch::Receiver<ClockSnapshot>) {
        let mut state = FxHashMap::default();
        for person in roster.people() {
            state.insert(person.clone(), registry.lost());
        }
        let (snapshot_tx, snapshot_rx) = watch::channel(snapshot_of(&roster, &state));
        let tracker = Self { registry, roster, state, changes, snapshot_tx, waypoints };
        (tracker, snapshot_rx)
    }

    /// Consume events until the channel closes or shutdown is signalled.
    /// Each event runs to completion before the next is considered.
    pub async fn run(
        &mut self,
        mut event_rx: mpsc::Receiver<InboundEvent>,
        mut shutdown: watch::Receiver<bool>,
    ) {
        loop {
            tokio::select! {
                event = event_rx.recv() => {
                    match event {
                        Some(e) => self.process_event(e),
                        None => break, // Channel closed
                    }
                }
                _ = shutdown.changed() => {
                    if *shutdown.borrow() {
                        info!("tracker_shutdown");
                        break;
                    }
                }
            }
        }
    }

    /// Apply one event, dispatching to the appropriate handler.
    /// Invalid events are discarded; this never fails.
    pub fn process_event(&mut self, event: InboundEvent) {
        match event {
            InboundEvent::Traveling { person } => self.handle_traveling(&person),
            InboundEvent::Lost { person } => self.handle_lost(&person),
            InboundEvent::RegionUpdate { person, regions } => {
                self.handle_region_update(&person, &regions);
            }
            InboundEvent::Waypoint(waypoint) => self.handle_waypoint(waypoint),
        }
    }

    /// Current location of a person, `None` for untracked identifiers.
    /// Tracked people always have a value (`Lost` before any event).
    pub fn location_of(&self, person: &str) -> Option<&Location> {
        self.state.get(person)
    }

    /// Copy of the current state, in roster order
    pub fn snapshot(&self) -> ClockSnapshot {
        snapshot_of(&self.roster, &self.state)
    }

    pub fn registry(&self) -> &LocationRegistry {
        &self.registry
    }

    pub fn roster(&self) -> &Roster {
        &self.roster
    }

    /// Number of tracked people
    pub fn tracked_count(&self) -> usize {
        self.state.len()
    }

    /// Publish a fresh snapshot and fire the change signal.
    /// Called once per accepted mutation, even when the value is unchanged.
    pub(crate) fn commit(&mut self) {
        self.snapshot_tx.send_replace(self.snapshot());
        self.changes.notify();
    }
}

fn snapshot_of(roster: &Roster, state: &FxHashMap<Person, Location>) -> ClockSnapshot {
    let people = roster
        .people()
        .iter()
        .filter_map(|person| {
            state.get(person.as_str()).map(|location| PersonLocation {
                person: person.as_str().to_string(),
                location: location.as_str().to_string(),
            })
        })
        .collect();
    ClockSnapshot { people }
}
