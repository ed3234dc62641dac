//! Location registry and tracked-person roster
//!
//! Both sets are built once at startup from configuration and are immutable
//! afterwards. The registry always contains the two synthetic states `Lost`
//! and `Traveling`, appended if the configured list omits them.

use crate::domain::types::{Location, Person};
use rustc_hash::FxHashSet;

/// Synthetic state for a person with no recent information
pub const LOST: &str = "Lost";
/// Synthetic state for a person in transit between regions
pub const TRAVELING: &str = "Traveling";

/// The fixed set of valid location names, in display order
#[derive(Debug, Clone)]
pub struct LocationRegistry {
    names: Vec<Location>,
    index: FxHashSet<String>,
}

impl LocationRegistry {
    /// Build from the configured list: order-preserving dedup, then the two
    /// mandatory synthetic states are appended if missing. An empty list
    /// yields a registry with only the mandatory entries.
    pub fn new<I, S>(configured: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut names = Vec::new();
        let mut index = FxHashSet::default();
        for name in configured {
            let name = name.into();
            if index.insert(name.clone()) {
                names.push(Location(name));
            }
        }
        for mandatory in [LOST, TRAVELING] {
            if index.insert(mandatory.to_string()) {
                names.push(Location::new(mandatory));
            }
        }
        Self { names, index }
    }

    /// Exact, case-sensitive membership test
    pub fn contains(&self, name: &str) -> bool {
        self.index.contains(name)
    }

    /// Registered locations in display order
    pub fn names(&self) -> &[Location] {
        &self.names
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    /// Always false: the mandatory entries are unconditionally present
    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    pub fn lost(&self) -> Location {
        Location::new(LOST)
    }

    pub fn traveling(&self) -> Location {
        Location::new(TRAVELING)
    }
}

/// The fixed, ordered set of people the clock tracks
#[derive(Debug, Clone)]
pub struct Roster {
    people: Vec<Person>,
    index: FxHashSet<String>,
}

impl Roster {
    /// Order-preserving silent dedup of the configured identifiers.
    /// An empty roster is accepted: the clock then tracks nobody.
    pub fn new<I, S>(configured: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut people = Vec::new();
        let mut index = FxHashSet::default();
        for name in configured {
            let name = name.into();
            if index.insert(name.clone()) {
                people.push(Person(name));
            }
        }
        Self { people, index }
    }

    /// Exact, case-sensitive membership test
    pub fn contains(&self, name: &str) -> bool {
        self.index.contains(name)
    }

    /// Tracked people in configured order
    pub fn people(&self) -> &[Person] {
        &self.people
    }

    pub fn len(&self) -> usize {
        self.people.len()
    }

    pub fn is_empty(&self) -> bool {
        self.people.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn names_of(registry: &LocationRegistry) -> Vec<&str> {
        registry.names().iter().map(|l| l.as_str()).collect()
    }

    #[test]
    fn test_mandatory_states_appended() {
        let registry = LocationRegistry::new(["Home", "School", "Work"]);
        assert_eq!(names_of(&registry), vec!["Home", "School", "Work", "Lost", "Traveling"]);
        assert!(registry.contains("Lost"));
        assert!(registry.contains("Traveling"));
    }

    #[test]
    fn test_mandatory_states_not_duplicated() {
        let registry = LocationRegistry::new(["Traveling", "Home", "Lost"]);
        assert_eq!(names_of(&registry), vec!["Traveling", "Home", "Lost"]);
        assert_eq!(registry.len(), 3);
    }

    #[test]
    fn test_dedup_preserves_first_seen_order() {
        let registry = LocationRegistry::new(["Work", "Home", "Work", "School", "Home"]);
        assert_eq!(names_of(&registry), vec!["Work", "Home", "School", "Lost", "Traveling"]);
    }

    #[test]
    fn test_empty_locations_yield_only_mandatory() {
        let registry = LocationRegistry::new(Vec::<String>::new());
        assert_eq!(names_of(&registry), vec!["Lost", "Traveling"]);
        assert!(!registry.is_empty());
    }

    #[test]
    fn test_membership_is_case_sensitive() {
        let registry = LocationRegistry::new(["Home"]);
        assert!(registry.contains("Home"));
        assert!(!registry.contains("home"));
        assert!(!registry.contains(" Home"));
    }

    #[test]
    fn test_roster_dedup_first_wins() {
        let roster = Roster::new(["Alice", "Bob", "Alice", "Carol"]);
        let people: Vec<&str> = roster.people().iter().map(|p| p.as_str()).collect();
        assert_eq!(people, vec!["Alice", "Bob", "Carol"]);
        assert_eq!(roster.len(), 3);
    }

    #[test]
    fn test_empty_roster_is_accepted() {
        let roster = Roster::new(Vec::<String>::new());
        assert!(roster.is_empty());
        assert!(!roster.contains("Alice"));
    }
}
