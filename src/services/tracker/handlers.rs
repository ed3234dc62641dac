//! Event handlers for the Tracker
//!
//! Each handler validates one event kind against the roster and registry,
//! then either writes the new location and commits or discards the event.
//! Discards are silent apart from a debug log; nothing here can fail or
//! halt the processing loop.

use super::Tracker;
use crate::domain::types::{Location, Person, WaypointEvent};
use tracing::{debug, info};

impl Tracker {
    /// Person is in transit between regions.
    ///
    /// Commits unconditionally for a roster member, even when the stored
    /// value is already `Traveling`: the display re-renders on every
    /// accepted event.
    pub(crate) fn handle_traveling(&mut self, person: &Person) {
        if !self.roster.contains(person.as_str()) {
            debug!(person = %person, "unknown_person_discarded");
            return;
        }
        let location = self.registry.traveling();
        info!(person = %person, location = %location, "location_updated");
        self.state.insert(person.clone(), location);
        self.commit();
    }

    /// No recent information for this person
    pub(crate) fn handle_lost(&mut self, person: &Person) {
        if !self.roster.contains(person.as_str()) {
            debug!(person = %person, "unknown_person_discarded");
            return;
        }
        let location = self.registry.lost();
        info!(person = %person, location = %location, "location_updated");
        self.state.insert(person.clone(), location);
        self.commit();
    }

    /// A device can sit inside several overlapping regions at once; only
    /// the first reported region is honored. Unregistered regions and empty
    /// region lists discard the event without touching state.
    pub(crate) fn handle_region_update(&mut self, person: &Person, regions: &[String]) {
        if !self.roster.contains(person.as_str()) {
            debug!(person = %person, "unknown_person_discarded");
            return;
        }
        let Some(region) = regions.first() else {
            debug!(person = %person, "empty_region_list_discarded");
            return;
        };
        if !self.registry.contains(region) {
            debug!(person = %person, region = %region, "unregistered_region_discarded");
            return;
        }
        info!(person = %person, location = %region, "location_updated");
        self.state.insert(person.clone(), Location::new(region.clone()));
        self.commit();
    }

    /// Raw positional update: stored untouched for the display layer.
    /// Never mutates the location map and never fires the change signal.
    pub(crate) fn handle_waypoint(&mut self, waypoint: WaypointEvent) {
        debug!(person = %waypoint.person, "waypoint_forwarded");
        self.waypoints.record(&waypoint);
    }
}
