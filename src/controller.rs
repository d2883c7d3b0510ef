// ABOUTME: The list/map sync controller: create, edit, delete, sort, and reload state machine
// ABOUTME: Reconciles the registry against the sidebar list and map overlays after every transition
//
// SPDX-License-Identifier: MIT OR Apache-2.0

//! The sync controller.
//!
//! One coordinator owns the reconciliation between the workout registry and
//! the two presentation surfaces (sidebar list, map overlays). All mutation
//! happens in response to discrete events; the only suspension point is the
//! enrichment lookup for a freshly drawn shape, guarded by the `Enriching`
//! state so a single drawing can never commit twice.

use std::collections::HashMap;

use chrono::Utc;
use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::enrichment::{Enricher, Enrichment};
use crate::errors::{SyncError, ValidationError};
use crate::models::{path_distance_km, GeoPoint, Sport, Workout};
use crate::registry::{SortKey, WorkoutRegistry};
use crate::storage::{SnapshotHealth, SnapshotStore, WorkoutSnapshots};
use crate::surfaces::{
    DrawnShape, FormPrefill, MapSurface, OverlayHandle, Sidebar, SportKind, WorkoutForm,
};
use crate::weather::glyph_for;

/// Default map zoom used for centering operations.
pub const DEFAULT_ZOOM: u8 = 13;

/// Lifecycle of the single active form.
#[derive(Debug)]
enum ControllerState {
    /// No form open, nothing pending.
    Idle,
    /// A new shape was drawn; the form is open for metric entry.
    AwaitingShapeInput(DrawnShape),
    /// An existing workout's form is open for metric edits.
    AwaitingEdit(Uuid),
    /// Enrichment is in flight for a new shape; submissions are rejected.
    Enriching,
    /// Validation failed; the form is re-shown and the pending commit is
    /// retained for resubmission.
    Error(PendingCommit),
}

/// What a resubmission after a validation failure will commit.
#[derive(Debug)]
enum PendingCommit {
    /// A new shape, with its already-fetched enrichment (no re-enrichment
    /// on retry).
    NewShape {
        shape: DrawnShape,
        enrichment: Enrichment,
    },
    /// An in-place edit of an existing workout.
    Edit(Uuid),
}

/// Coordinator owning the registry, persistence, enrichment, and the two
/// presentation surfaces.
pub struct SyncController<M, L, S, E> {
    map: M,
    sidebar: L,
    snapshots: WorkoutSnapshots<S>,
    enricher: E,
    registry: WorkoutRegistry,
    /// Side mapping from workout id to its rendered overlay; the entity
    /// itself never holds presentation state.
    overlays: HashMap<Uuid, OverlayHandle>,
    state: ControllerState,
    storage_health: SnapshotHealth,
    show_all_next: bool,
    zoom: u8,
}

impl<M, L, S, E> SyncController<M, L, S, E>
where
    M: MapSurface,
    L: Sidebar,
    S: SnapshotStore,
    E: Enricher,
{
    /// Wire up a controller from its collaborators.
    pub fn new(map: M, sidebar: L, store: S, enricher: E) -> Self {
        Self {
            map,
            sidebar,
            snapshots: WorkoutSnapshots::new(store),
            enricher,
            registry: WorkoutRegistry::new(),
            overlays: HashMap::new(),
            state: ControllerState::Idle,
            storage_health: SnapshotHealth::Missing,
            show_all_next: true,
            zoom: DEFAULT_ZOOM,
        }
    }

    /// Load the persisted snapshot and render everything. A missing start
    /// position (geolocation denied) skips map centering but still renders
    /// the persisted workouts.
    pub fn start(&mut self, position: Option<GeoPoint>) {
        // A restart re-renders from scratch; tear down anything a previous
        // start left on either surface.
        self.sidebar.clear_entries();
        let stale: Vec<OverlayHandle> = self.overlays.drain().map(|(_, h)| h).collect();
        for handle in stale {
            self.map.remove_overlay(handle);
        }

        let (workouts, health) = self.snapshots.load();
        self.storage_health = health;
        self.registry.replace_all(workouts);

        if let Some(center) = position {
            self.map.set_view(center, self.zoom);
        }

        for workout in self.registry.entries() {
            let handle = self.map.add_overlay(
                &workout.geometry(),
                SportKind::from(workout.sport),
                &workout.popup_caption(),
            );
            self.overlays.insert(workout.id, handle);
            let glyph = glyph_for(workout.weather_code, workout.is_night());
            self.sidebar.render_entry(workout, &glyph);
        }
        self.sidebar.set_controls_visible(!self.registry.is_empty());
        self.state = ControllerState::Idle;
        info!(workouts = self.registry.len(), "controller started");
    }

    /// A shape-drawing interaction completed: capture it and open the entry
    /// form, suggesting the drawn path length as the distance where the
    /// shape has one. Opening the form preempts any other open form without
    /// committing it.
    ///
    /// # Errors
    ///
    /// Rejected while an enrichment is in flight.
    pub fn begin_shape(&mut self, shape: DrawnShape) -> Result<(), SyncError> {
        if matches!(self.state, ControllerState::Enriching) {
            return Err(SyncError::EnrichmentInFlight);
        }
        let mut prefill = FormPrefill::default();
        if shape.kind.has_path_length() {
            let km = path_distance_km(&shape.points);
            prefill.distance_km = Some((km * 100.0).round() / 100.0);
        }
        debug!(kind = ?shape.kind, "shape drawn, opening entry form");
        self.state = ControllerState::AwaitingShapeInput(shape);
        self.sidebar.open_form(&prefill);
        Ok(())
    }

    /// Open the form prefilled from an existing workout for an in-place
    /// edit. Preempts any other open form.
    ///
    /// # Errors
    ///
    /// Rejected while an enrichment is in flight or when the id is unknown.
    pub fn begin_edit(&mut self, id: Uuid) -> Result<(), SyncError> {
        if matches!(self.state, ControllerState::Enriching) {
            return Err(SyncError::EnrichmentInFlight);
        }
        let Some(workout) = self.registry.find_by_id(id) else {
            return Err(SyncError::UnknownWorkout(id));
        };
        let prefill = match workout.sport {
            Sport::Running { cadence } => FormPrefill {
                sport: Some(SportKind::Running),
                distance_km: Some(workout.distance_km),
                duration_min: Some(workout.duration_min),
                cadence: Some(cadence),
                elevation_gain_m: None,
            },
            Sport::Cycling { elevation_gain_m } => FormPrefill {
                sport: Some(SportKind::Cycling),
                distance_km: Some(workout.distance_km),
                duration_min: Some(workout.duration_min),
                cadence: None,
                elevation_gain_m: Some(elevation_gain_m),
            },
        };
        self.state = ControllerState::AwaitingEdit(id);
        self.sidebar.open_form(&prefill);
        Ok(())
    }

    /// Form submission: for a new shape, enrich its representative
    /// coordinate (first vertex) and commit; for an edit, commit in place
    /// with no re-enrichment; after a validation failure, retry the
    /// retained pending commit.
    ///
    /// # Errors
    ///
    /// [`SyncError::Validation`] re-opens the form and leaves registry, map,
    /// and storage untouched. [`SyncError::EnrichmentInFlight`] and
    /// [`SyncError::NoOpenForm`] are no-ops.
    pub async fn submit(&mut self, form: WorkoutForm) -> Result<Uuid, SyncError> {
        match std::mem::replace(&mut self.state, ControllerState::Idle) {
            ControllerState::Idle => Err(SyncError::NoOpenForm),
            ControllerState::Enriching => {
                self.state = ControllerState::Enriching;
                Err(SyncError::EnrichmentInFlight)
            }
            ControllerState::AwaitingShapeInput(shape) => {
                self.state = ControllerState::Enriching;
                let enrichment = match shape.points.first().copied() {
                    Some(point) => self.enricher.enrich(point.lat, point.lng).await,
                    None => Enrichment::default(),
                };
                self.commit_new(shape, enrichment, form)
            }
            ControllerState::AwaitingEdit(id) => self.commit_edit(id, form),
            ControllerState::Error(PendingCommit::NewShape { shape, enrichment }) => {
                self.commit_new(shape, enrichment, form)
            }
            ControllerState::Error(PendingCommit::Edit(id)) => self.commit_edit(id, form),
        }
    }

    /// Shared commit path for new workouts.
    fn commit_new(
        &mut self,
        shape: DrawnShape,
        enrichment: Enrichment,
        form: WorkoutForm,
    ) -> Result<Uuid, SyncError> {
        if let Err(invalid) = validate(&form) {
            self.reject(&form, invalid);
            self.state = ControllerState::Error(PendingCommit::NewShape { shape, enrichment });
            return Err(invalid.into());
        }

        let workout = Workout::new(
            sport_of(&form),
            shape.into(),
            form.distance_km,
            form.duration_min,
            enrichment,
            Utc::now(),
        );
        let id = workout.id;
        let handle = self
            .map
            .add_overlay(&workout.geometry(), form.sport, &workout.popup_caption());
        self.overlays.insert(id, handle);
        let glyph = glyph_for(workout.weather_code, workout.is_night());
        self.sidebar.render_entry(&workout, &glyph);
        self.sidebar.close_form();
        self.registry.add(workout);
        self.persist();
        self.sidebar.set_controls_visible(true);
        self.state = ControllerState::Idle;
        info!(%id, "workout committed");
        Ok(id)
    }

    /// Shared commit path for edits: in-place field update preserving id,
    /// date, shape, coordinates, overlay, and stored enrichment.
    fn commit_edit(&mut self, id: Uuid, form: WorkoutForm) -> Result<Uuid, SyncError> {
        if self.registry.find_by_id(id).is_none() {
            self.sidebar.close_form();
            self.state = ControllerState::Idle;
            return Err(SyncError::UnknownWorkout(id));
        }
        if let Err(invalid) = validate(&form) {
            self.reject(&form, invalid);
            self.state = ControllerState::Error(PendingCommit::Edit(id));
            return Err(invalid.into());
        }

        let sport = sport_of(&form);
        if let Some(workout) = self.registry.find_by_id_mut(id) {
            workout.distance_km = form.distance_km;
            workout.duration_min = form.duration_min;
            let sport_changed = workout.sport.name() != sport.name();
            workout.sport = sport;
            if sport_changed {
                workout.refresh_description();
            }
        }
        if let Some(workout) = self.registry.find_by_id(id) {
            let glyph = glyph_for(workout.weather_code, workout.is_night());
            self.sidebar.remove_entry(id);
            self.sidebar.render_entry(workout, &glyph);
        }
        self.sidebar.close_form();
        self.persist();
        self.state = ControllerState::Idle;
        info!(%id, "workout edited in place");
        Ok(id)
    }

    /// Remove a workout: its overlay, list entry, registry record, and
    /// snapshot presence. Returns whether it existed.
    pub fn delete(&mut self, id: Uuid) -> bool {
        if let Some(handle) = self.overlays.remove(&id) {
            self.map.remove_overlay(handle);
        }
        self.sidebar.remove_entry(id);
        let removed = self.registry.remove_by_id(id);
        if removed {
            self.persist();
            info!(%id, "workout deleted");
        }
        let editing_deleted = matches!(
            self.state,
            ControllerState::AwaitingEdit(editing)
                | ControllerState::Error(PendingCommit::Edit(editing)) if editing == id
        );
        if editing_deleted {
            self.sidebar.close_form();
            self.state = ControllerState::Idle;
        }
        self.sidebar.set_controls_visible(!self.registry.is_empty());
        removed
    }

    /// Remove every workout from the list, the map, the registry, and the
    /// snapshot. Idempotent.
    pub fn clear_all(&mut self) {
        self.sidebar.clear_entries();
        let handles: Vec<OverlayHandle> = self.overlays.drain().map(|(_, h)| h).collect();
        for handle in handles {
            self.map.remove_overlay(handle);
        }
        self.registry.clear();
        self.persist();
        self.sidebar.close_form();
        self.sidebar.set_controls_visible(false);
        self.state = ControllerState::Idle;
        info!("all workouts cleared");
    }

    /// Re-render the list in the given order. Purely presentational: the
    /// registry, overlays, and snapshot are untouched.
    pub fn sort(&mut self, key: SortKey) {
        debug!(?key, "re-rendering list");
        self.sidebar.clear_entries();
        for workout in self.registry.sorted_view(key) {
            let glyph = glyph_for(workout.weather_code, workout.is_night());
            self.sidebar.render_entry(workout, &glyph);
        }
    }

    /// A list entry was activated: center the map on the workout's first
    /// vertex and bump its click counter.
    ///
    /// # Errors
    ///
    /// Unknown ids are rejected.
    pub fn select(&mut self, id: Uuid) -> Result<(), SyncError> {
        let point = self
            .registry
            .find_by_id(id)
            .and_then(Workout::representative_point)
            .ok_or(SyncError::UnknownWorkout(id))?;
        self.map.set_view(point, self.zoom);
        if let Some(workout) = self.registry.find_by_id_mut(id) {
            workout.clicks += 1;
        }
        Ok(())
    }

    /// Alternate the map between fitting all workout overlays and centering
    /// on the caller-supplied current position.
    pub fn toggle_view(&mut self, position: Option<GeoPoint>) {
        if self.show_all_next {
            let handles: Vec<OverlayHandle> = self.overlays.values().copied().collect();
            if !handles.is_empty() {
                self.map.fit_bounds(&handles);
            }
        } else if let Some(center) = position {
            self.map.set_view(center, self.zoom);
        }
        self.show_all_next = !self.show_all_next;
    }

    /// Re-show the form with the submitted values and the validation
    /// message; no state has been mutated.
    fn reject(&mut self, form: &WorkoutForm, invalid: ValidationError) {
        self.sidebar.open_form(&FormPrefill {
            sport: Some(form.sport),
            distance_km: Some(form.distance_km),
            duration_min: Some(form.duration_min),
            cadence: Some(form.cadence),
            elevation_gain_m: Some(form.elevation_gain_m),
        });
        self.sidebar.show_error(&invalid.to_string());
    }

    fn persist(&mut self) {
        match self.snapshots.save(self.registry.entries()) {
            Ok(()) => self.storage_health = SnapshotHealth::Loaded,
            Err(e) => {
                warn!(error = %e, "snapshot save failed, in-memory state is ahead of storage");
                self.storage_health = SnapshotHealth::WriteFailed;
            }
        }
    }

    /// The authoritative workout collection.
    #[must_use]
    pub fn registry(&self) -> &WorkoutRegistry {
        &self.registry
    }

    /// The injected map surface.
    #[must_use]
    pub fn map(&self) -> &M {
        &self.map
    }

    /// The injected sidebar surface.
    #[must_use]
    pub fn sidebar(&self) -> &L {
        &self.sidebar
    }

    /// The underlying snapshot blob store.
    #[must_use]
    pub fn store(&self) -> &S {
        self.snapshots.store()
    }

    /// The injected enricher.
    #[must_use]
    pub fn enricher(&self) -> &E {
        &self.enricher
    }

    /// Outcome of the most recent snapshot operation.
    #[must_use]
    pub fn storage_health(&self) -> SnapshotHealth {
        self.storage_health
    }

    /// The overlay currently rendered for a workout, if any.
    #[must_use]
    pub fn overlay_for(&self, id: Uuid) -> Option<OverlayHandle> {
        self.overlays.get(&id).copied()
    }

    /// Whether no form is open and nothing is pending.
    #[must_use]
    pub fn is_idle(&self) -> bool {
        matches!(self.state, ControllerState::Idle)
    }
}

/// Finite-and-positive validation for the fields the selected sport
/// requires. Cycling elevation only has to be finite (zero and negative
/// climbs are accepted), mirroring the asymmetry of the original form.
fn validate(form: &WorkoutForm) -> Result<(), ValidationError> {
    let finite_positive = |v: f64| v.is_finite() && v > 0.0;
    let valid = match form.sport {
        SportKind::Running => {
            finite_positive(form.distance_km)
                && finite_positive(form.duration_min)
                && finite_positive(form.cadence)
        }
        SportKind::Cycling => {
            finite_positive(form.distance_km)
                && finite_positive(form.duration_min)
                && form.elevation_gain_m.is_finite()
        }
    };
    if valid {
        Ok(())
    } else {
        Err(ValidationError)
    }
}

fn sport_of(form: &WorkoutForm) -> Sport {
    match form.sport {
        SportKind::Running => Sport::Running {
            cadence: form.cadence,
        },
        SportKind::Cycling => Sport::Cycling {
            elevation_gain_m: form.elevation_gain_m,
        },
    }
}
