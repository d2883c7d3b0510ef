// ABOUTME: Map-based workout tracking engine: entities, registry, persistence, enrichment, sync
// ABOUTME: Keeps workouts, their list entries, and their map overlays mutually consistent
//
// SPDX-License-Identifier: MIT OR Apache-2.0

#![deny(unsafe_code)]

//! # mapout
//!
//! Engine for a map-based workout log: the user draws a shape (marker,
//! polyline, polygon, rectangle, circle), enters distance and duration, and
//! the engine creates a typed running or cycling workout, enriches it with a
//! reverse-geocoded place and the current weather, persists the collection,
//! and keeps the rendered list and the map overlays consistent across
//! create, edit, delete, sort, and reload.
//!
//! ## Modules
//!
//! - **models**: workout entities with derived pace/speed, shapes, points
//! - **registry**: the authoritative ordered in-memory collection
//! - **storage**: full-snapshot persistence with explicit degraded loads
//! - **enrichment**: best-effort concurrent geocoding + weather lookups
//! - **weather**: the static weather-code to label/icon table
//! - **controller**: the create/edit/delete/sort/reload state machine
//! - **surfaces**: the map-widget and sidebar boundary traits

/// Enrichment endpoint configuration.
pub mod config;
/// The list/map sync controller and its state machine.
pub mod controller;
/// Best-effort reverse-geocoding and weather enrichment.
pub mod enrichment;
/// Error taxonomy.
pub mod errors;
/// Workout entities, sports, shapes, and coordinates.
pub mod models;
/// The authoritative in-memory workout collection.
pub mod registry;
/// Snapshot persistence over a pluggable blob store.
pub mod storage;
/// Presentation boundary traits (map widget, sidebar list/form).
pub mod surfaces;
/// Weather-code lookup table.
pub mod weather;

pub use config::EnrichmentConfig;
pub use controller::{SyncController, DEFAULT_ZOOM};
pub use enrichment::{Enricher, Enrichment, HttpEnricher};
pub use errors::{StorageError, SyncError, ValidationError};
pub use models::{path_distance_km, GeoPoint, Shape, ShapeGeometry, ShapeKind, Sport, Workout};
pub use registry::{SortKey, WorkoutRegistry};
pub use storage::{JsonFileStore, MemoryStore, SnapshotHealth, SnapshotStore, WorkoutSnapshots};
pub use surfaces::{
    DrawnShape, FormPrefill, MapSurface, OverlayHandle, Sidebar, SportKind, WorkoutForm,
};
pub use weather::{glyph_for, WeatherGlyph, UNKNOWN_CONDITIONS};
