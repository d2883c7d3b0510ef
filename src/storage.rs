// ABOUTME: Persistence adapter serializing the workout registry to a snapshot blob store
// ABOUTME: Full-collection JSON rewrites with explicit degraded-load reporting
//
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Snapshot persistence.
//!
//! The whole registry is persisted as one JSON array under a single blob;
//! every mutation rewrites the full snapshot. An absent or unparsable
//! snapshot loads as an empty registry, with the degradation reported
//! through [`SnapshotHealth`] rather than swallowed.

use std::fs;
use std::path::PathBuf;

use tracing::warn;

use crate::errors::StorageError;
use crate::models::Workout;

/// The external get/set-blob primitive the adapter writes through.
pub trait SnapshotStore {
    /// Read the current blob, `None` when nothing has been stored.
    fn read(&self) -> Option<String>;

    /// Overwrite the blob.
    ///
    /// # Errors
    ///
    /// Returns a [`StorageError`] when the backing store cannot be written.
    fn write(&mut self, blob: &str) -> Result<(), StorageError>;
}

/// Outcome classification of the last snapshot operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SnapshotHealth {
    /// The last load or save completed normally.
    Loaded,
    /// No snapshot existed; treated as an empty registry.
    Missing,
    /// A snapshot existed but could not be parsed; treated as empty.
    Unreadable,
    /// The last save failed; in-memory state is ahead of the store.
    WriteFailed,
}

/// In-memory store, used by tests and demos.
#[derive(Debug, Default)]
pub struct MemoryStore {
    blob: Option<String>,
}

impl MemoryStore {
    /// Create an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// The raw stored blob, if any.
    #[must_use]
    pub fn blob(&self) -> Option<&str> {
        self.blob.as_deref()
    }

    /// Seed the store with a pre-existing blob.
    pub fn set_blob(&mut self, blob: impl Into<String>) {
        self.blob = Some(blob.into());
    }
}

impl SnapshotStore for MemoryStore {
    fn read(&self) -> Option<String> {
        self.blob.clone()
    }

    fn write(&mut self, blob: &str) -> Result<(), StorageError> {
        self.blob = Some(blob.to_owned());
        Ok(())
    }
}

/// Single-file store persisting the snapshot as JSON on disk.
#[derive(Debug)]
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    /// Create a store backed by the given file path.
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// The backing file path.
    #[must_use]
    pub fn path(&self) -> &std::path::Path {
        &self.path
    }
}

impl SnapshotStore for JsonFileStore {
    fn read(&self) -> Option<String> {
        fs::read_to_string(&self.path).ok()
    }

    fn write(&mut self, blob: &str) -> Result<(), StorageError> {
        fs::write(&self.path, blob)?;
        Ok(())
    }
}

/// Adapter between the registry and a [`SnapshotStore`].
#[derive(Debug)]
pub struct WorkoutSnapshots<S> {
    store: S,
}

impl<S: SnapshotStore> WorkoutSnapshots<S> {
    /// Wrap a blob store.
    #[must_use]
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// Borrow the underlying store.
    #[must_use]
    pub fn store(&self) -> &S {
        &self.store
    }

    /// Serialize and write the full registry, overwriting any prior
    /// snapshot.
    ///
    /// # Errors
    ///
    /// Returns a [`StorageError`] when serialization or the store write
    /// fails; the caller decides whether to surface or absorb it.
    pub fn save(&mut self, workouts: &[Workout]) -> Result<(), StorageError> {
        let blob = serde_json::to_string(workouts)?;
        self.store.write(&blob)
    }

    /// Load and reconstruct the typed workouts, preserving ids.
    ///
    /// Never fails: an absent snapshot yields an empty collection with
    /// [`SnapshotHealth::Missing`], an unparsable one yields empty with
    /// [`SnapshotHealth::Unreadable`].
    #[must_use]
    pub fn load(&self) -> (Vec<Workout>, SnapshotHealth) {
        let Some(blob) = self.store.read() else {
            return (Vec::new(), SnapshotHealth::Missing);
        };
        match serde_json::from_str::<Vec<Workout>>(&blob) {
            Ok(workouts) => (workouts, SnapshotHealth::Loaded),
            Err(e) => {
                warn!(error = %e, "workout snapshot unreadable, starting empty");
                (Vec::new(), SnapshotHealth::Unreadable)
            }
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::enrichment::Enrichment;
    use crate::models::{GeoPoint, Shape, ShapeKind, Sport};
    use chrono::Utc;

    fn sample() -> Workout {
        Workout::new(
            Sport::Cycling {
                elevation_gain_m: 42.0,
            },
            Shape {
                kind: ShapeKind::Circle,
                points: vec![GeoPoint::new(52.5, 13.4)],
                radius_m: Some(120.0),
            },
            20.0,
            60.0,
            Enrichment::default(),
            Utc::now(),
        )
    }

    #[test]
    fn missing_snapshot_loads_empty() {
        let snapshots = WorkoutSnapshots::new(MemoryStore::new());
        let (workouts, health) = snapshots.load();
        assert!(workouts.is_empty());
        assert_eq!(health, SnapshotHealth::Missing);
    }

    #[test]
    fn corrupt_snapshot_loads_empty() {
        let mut store = MemoryStore::new();
        store.set_blob("not json {{{");
        let snapshots = WorkoutSnapshots::new(store);
        let (workouts, health) = snapshots.load();
        assert!(workouts.is_empty());
        assert_eq!(health, SnapshotHealth::Unreadable);
    }

    #[test]
    fn save_then_load_round_trips() {
        let mut snapshots = WorkoutSnapshots::new(MemoryStore::new());
        let original = vec![sample(), sample()];
        snapshots.save(&original).unwrap();
        let (loaded, health) = snapshots.load();
        assert_eq!(health, SnapshotHealth::Loaded);
        assert_eq!(loaded, original);
    }
}
