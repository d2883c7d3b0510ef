// ABOUTME: Shared test fixtures: recording surfaces, scripted enricher, failing store
// ABOUTME: Helpers to wire a controller and build shapes and form payloads
//
// SPDX-License-Identifier: MIT OR Apache-2.0

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![allow(dead_code)]
#![allow(missing_docs)]

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Once;

use async_trait::async_trait;
use uuid::Uuid;

use mapout::{
    DrawnShape, Enricher, Enrichment, FormPrefill, GeoPoint, MapSurface, MemoryStore,
    OverlayHandle, ShapeGeometry, ShapeKind, Sidebar, SnapshotStore, SportKind, StorageError,
    SyncController, WeatherGlyph, Workout, WorkoutForm,
};

static TRACING: Once = Once::new();

/// Install a subscriber honoring `RUST_LOG` once per test binary so
/// controller and storage logs show up in failing tests.
pub fn init_tracing() {
    TRACING.call_once(|| {
        let _ = tracing_subscriber::fmt()
            .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
            .with_test_writer()
            .try_init();
    });
}

/// Map surface that records every call.
#[derive(Debug, Default)]
pub struct RecordingMap {
    next_handle: u64,
    /// Live overlays: handle, shape kind, popup caption.
    pub overlays: Vec<(OverlayHandle, ShapeKind, String)>,
    /// Every `set_view` call.
    pub views: Vec<(GeoPoint, u8)>,
    /// Every `fit_bounds` call.
    pub fitted: Vec<Vec<OverlayHandle>>,
}

impl MapSurface for RecordingMap {
    fn add_overlay(
        &mut self,
        geometry: &ShapeGeometry<'_>,
        _sport: SportKind,
        caption: &str,
    ) -> OverlayHandle {
        self.next_handle += 1;
        let handle = OverlayHandle(self.next_handle);
        self.overlays.push((handle, geometry.kind, caption.to_owned()));
        handle
    }

    fn remove_overlay(&mut self, handle: OverlayHandle) {
        self.overlays.retain(|(h, _, _)| *h != handle);
    }

    fn set_view(&mut self, center: GeoPoint, zoom: u8) {
        self.views.push((center, zoom));
    }

    fn fit_bounds(&mut self, handles: &[OverlayHandle]) {
        self.fitted.push(handles.to_vec());
    }
}

/// Sidebar that records list entries, form state, and error messages.
#[derive(Debug, Default)]
pub struct RecordingSidebar {
    /// Rendered entries in order: id, description, weather label.
    pub entries: Vec<(Uuid, String, &'static str)>,
    pub form_open: bool,
    pub last_prefill: Option<FormPrefill>,
    pub errors: Vec<String>,
    pub controls_visible: bool,
}

impl Sidebar for RecordingSidebar {
    fn render_entry(&mut self, workout: &Workout, glyph: &WeatherGlyph) {
        self.entries
            .push((workout.id, workout.description.clone(), glyph.label));
    }

    fn remove_entry(&mut self, id: Uuid) {
        self.entries.retain(|(entry_id, _, _)| *entry_id != id);
    }

    fn clear_entries(&mut self) {
        self.entries.clear();
    }

    fn open_form(&mut self, prefill: &FormPrefill) {
        self.form_open = true;
        self.last_prefill = Some(*prefill);
    }

    fn close_form(&mut self) {
        self.form_open = false;
    }

    fn show_error(&mut self, message: &str) {
        self.errors.push(message.to_owned());
    }

    fn set_controls_visible(&mut self, visible: bool) {
        self.controls_visible = visible;
    }
}

/// Enricher returning a scripted result and counting invocations.
#[derive(Debug, Default)]
pub struct StubEnricher {
    pub result: Enrichment,
    calls: AtomicUsize,
}

impl StubEnricher {
    pub fn returning(result: Enrichment) -> Self {
        Self {
            result,
            calls: AtomicUsize::new(0),
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::Relaxed)
    }
}

#[async_trait]
impl Enricher for StubEnricher {
    async fn enrich(&self, _lat: f64, _lng: f64) -> Enrichment {
        self.calls.fetch_add(1, Ordering::Relaxed);
        self.result.clone()
    }
}

/// Store whose writes always fail; reads find nothing.
#[derive(Debug, Default)]
pub struct FailingStore;

impl SnapshotStore for FailingStore {
    fn read(&self) -> Option<String> {
        None
    }

    fn write(&mut self, _blob: &str) -> Result<(), StorageError> {
        Err(StorageError::Io(std::io::Error::other("disk full")))
    }
}

pub type TestController<S, E> = SyncController<RecordingMap, RecordingSidebar, S, E>;

pub fn controller_with(
    store: MemoryStore,
    enrichment: Enrichment,
) -> TestController<MemoryStore, StubEnricher> {
    init_tracing();
    SyncController::new(
        RecordingMap::default(),
        RecordingSidebar::default(),
        store,
        StubEnricher::returning(enrichment),
    )
}

pub fn controller() -> TestController<MemoryStore, StubEnricher> {
    controller_with(MemoryStore::new(), Enrichment::default())
}

pub fn marker_shape(lat: f64, lng: f64) -> DrawnShape {
    DrawnShape {
        kind: ShapeKind::Marker,
        handle: OverlayHandle(9000),
        points: vec![GeoPoint::new(lat, lng)],
        radius_m: None,
    }
}

pub fn circle_shape(lat: f64, lng: f64, radius_m: f64) -> DrawnShape {
    DrawnShape {
        kind: ShapeKind::Circle,
        handle: OverlayHandle(9001),
        points: vec![GeoPoint::new(lat, lng)],
        radius_m: Some(radius_m),
    }
}

pub fn polyline_shape(points: Vec<GeoPoint>) -> DrawnShape {
    DrawnShape {
        kind: ShapeKind::Polyline,
        handle: OverlayHandle(9002),
        points,
        radius_m: None,
    }
}

pub fn running_form(distance_km: f64, duration_min: f64, cadence: f64) -> WorkoutForm {
    WorkoutForm {
        sport: SportKind::Running,
        distance_km,
        duration_min,
        cadence,
        elevation_gain_m: 0.0,
    }
}

pub fn cycling_form(distance_km: f64, duration_min: f64, elevation_gain_m: f64) -> WorkoutForm {
    WorkoutForm {
        sport: SportKind::Cycling,
        distance_km,
        duration_min,
        cadence: 0.0,
        elevation_gain_m,
    }
}
