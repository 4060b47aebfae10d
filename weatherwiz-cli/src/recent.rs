//! Session-scoped list of recently viewed cities.

use weatherwiz_core::Location;

/// How many cities the home menu remembers.
const CAPACITY: usize = 5;

/// Most-recent-first, bounded, deduplicated by resolved city identity
/// (name + country). Lives only for the session; never persisted.
#[derive(Debug, Default)]
pub struct RecentSearches {
    entries: Vec<Location>,
}

impl RecentSearches {
    pub fn push(&mut self, location: Location) {
        self.entries.retain(|entry| !same_city(entry, &location));
        self.entries.insert(0, location);
        self.entries.truncate(CAPACITY);
    }

    pub fn cities(&self) -> &[Location] {
        &self.entries
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

fn same_city(a: &Location, b: &Location) -> bool {
    a.name == b.name && a.country == b.country
}
