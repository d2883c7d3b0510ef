// ABOUTME: Authoritative in-memory ordered collection of workouts keyed by id
// ABOUTME: Supports add, lookup, removal, bulk replace, and stable sorted views
//
// SPDX-License-Identifier: MIT OR Apache-2.0

//! The workout registry.

use std::cmp::Ordering;

use tracing::warn;
use uuid::Uuid;

use crate::models::Workout;

/// Key for presentation-order views of the registry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortKey {
    /// Insertion/creation order.
    Default,
    /// Descending by distance.
    Distance,
    /// Descending by duration.
    Duration,
}

/// Ordered collection of workouts. Insertion order is the "default" sort
/// order; ids are unique within the registry at all times.
#[derive(Debug, Default)]
pub struct WorkoutRegistry {
    entries: Vec<Workout>,
}

impl WorkoutRegistry {
    /// Create an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a workout. A duplicate id violates the registry invariant and
    /// is dropped with a warning.
    pub fn add(&mut self, workout: Workout) {
        if self.find_by_id(workout.id).is_some() {
            warn!(id = %workout.id, "duplicate workout id, entry dropped");
            return;
        }
        self.entries.push(workout);
    }

    /// Look up a workout by id.
    #[must_use]
    pub fn find_by_id(&self, id: Uuid) -> Option<&Workout> {
        self.entries.iter().find(|w| w.id == id)
    }

    /// Mutable lookup by id.
    pub fn find_by_id_mut(&mut self, id: Uuid) -> Option<&mut Workout> {
        self.entries.iter_mut().find(|w| w.id == id)
    }

    /// Remove a workout by id, returning whether it was present.
    pub fn remove_by_id(&mut self, id: Uuid) -> bool {
        let before = self.entries.len();
        self.entries.retain(|w| w.id != id);
        self.entries.len() != before
    }

    /// Atomically replace the full contents, e.g. after a snapshot load.
    pub fn replace_all(&mut self, workouts: Vec<Workout>) {
        self.entries = workouts;
    }

    /// Remove every workout.
    pub fn clear(&mut self) {
        self.entries.clear();
    }

    /// Number of workouts.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the registry is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// The workouts in insertion order.
    #[must_use]
    pub fn entries(&self) -> &[Workout] {
        &self.entries
    }

    /// Iterate the workouts in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = &Workout> {
        self.entries.iter()
    }

    /// Non-mutating presentation view. `Default` is insertion order;
    /// `Distance`/`Duration` sort descending with a stable sort, so ties
    /// keep their creation order.
    #[must_use]
    pub fn sorted_view(&self, key: SortKey) -> Vec<&Workout> {
        let mut view: Vec<&Workout> = self.entries.iter().collect();
        match key {
            SortKey::Default => {}
            SortKey::Distance => view.sort_by(|a, b| descending(a.distance_km, b.distance_km)),
            SortKey::Duration => view.sort_by(|a, b| descending(a.duration_min, b.duration_min)),
        }
        view
    }
}

impl<'a> IntoIterator for &'a WorkoutRegistry {
    type Item = &'a Workout;
    type IntoIter = std::slice::Iter<'a, Workout>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}

fn descending(a: f64, b: f64) -> Ordering {
    b.partial_cmp(&a).unwrap_or(Ordering::Equal)
}
