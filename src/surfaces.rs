// ABOUTME: Presentation-surface boundary traits consumed by the sync controller
// ABOUTME: Opaque map overlay handles, the sidebar list/form contract, and form payloads
//
// SPDX-License-Identifier: MIT OR Apache-2.0

//! External presentation boundaries.
//!
//! The controller never touches rendering directly; it drives a map widget
//! and a sidebar (workout list + entry form) through these traits. Overlay
//! handles are opaque: the controller only stores and passes them back.

use uuid::Uuid;

use crate::models::{GeoPoint, Shape, ShapeGeometry, ShapeKind, Sport, Workout};
use crate::weather::WeatherGlyph;

/// Opaque handle correlating a workout with its rendered map overlay.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct OverlayHandle(pub u64);

/// Which sport the entry form is set to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SportKind {
    /// Running: cadence field shown.
    Running,
    /// Cycling: elevation field shown.
    Cycling,
}

impl From<Sport> for SportKind {
    fn from(sport: Sport) -> Self {
        match sport {
            Sport::Running { .. } => Self::Running,
            Sport::Cycling { .. } => Self::Cycling,
        }
    }
}

/// A completed drawing interaction, as delivered by the map widget.
#[derive(Debug, Clone)]
pub struct DrawnShape {
    /// Kind of shape that was drawn.
    pub kind: ShapeKind,
    /// The widget's provisional handle for the drawn layer. The committed
    /// workout gets a freshly rendered overlay with its own handle.
    pub handle: OverlayHandle,
    /// Raw vertices of the drawing (one for marker/circle).
    pub points: Vec<GeoPoint>,
    /// Radius in meters for circles.
    pub radius_m: Option<f64>,
}

impl From<DrawnShape> for Shape {
    fn from(drawn: DrawnShape) -> Self {
        Self {
            kind: drawn.kind,
            points: drawn.points,
            radius_m: drawn.radius_m,
        }
    }
}

/// Raw numeric form fields as collected by the form glue. Fields that do
/// not apply to the selected sport are carried but ignored.
#[derive(Debug, Clone, Copy)]
pub struct WorkoutForm {
    /// Selected sport.
    pub sport: SportKind,
    /// Distance in kilometers.
    pub distance_km: f64,
    /// Duration in minutes.
    pub duration_min: f64,
    /// Cadence in steps per minute (running).
    pub cadence: f64,
    /// Elevation gain in meters (cycling).
    pub elevation_gain_m: f64,
}

/// Values the controller asks the form glue to pre-populate.
#[derive(Debug, Clone, Copy, Default)]
pub struct FormPrefill {
    /// Sport selection, `None` to leave the picker untouched.
    pub sport: Option<SportKind>,
    /// Suggested or previous distance.
    pub distance_km: Option<f64>,
    /// Previous duration.
    pub duration_min: Option<f64>,
    /// Previous cadence.
    pub cadence: Option<f64>,
    /// Previous elevation gain.
    pub elevation_gain_m: Option<f64>,
}

/// The map/draw widget, consumed through a narrow interface.
pub trait MapSurface {
    /// Render an overlay for the given geometry, binding the popup caption.
    /// Returns the handle the controller will use to remove it later.
    fn add_overlay(
        &mut self,
        geometry: &ShapeGeometry<'_>,
        sport: SportKind,
        caption: &str,
    ) -> OverlayHandle;

    /// Remove a previously added overlay.
    fn remove_overlay(&mut self, handle: OverlayHandle);

    /// Center the map on a point at the given zoom.
    fn set_view(&mut self, center: GeoPoint, zoom: u8);

    /// Fit the viewport around the given overlays.
    fn fit_bounds(&mut self, handles: &[OverlayHandle]);
}

/// The sidebar: rendered workout list plus the entry form.
pub trait Sidebar {
    /// Append a workout's list entry with its resolved weather glyph.
    fn render_entry(&mut self, workout: &Workout, glyph: &WeatherGlyph);

    /// Remove the list entry for a workout.
    fn remove_entry(&mut self, id: Uuid);

    /// Tear down all list entries (bulk clear and sort re-render).
    fn clear_entries(&mut self);

    /// Open the entry form, pre-populated as requested.
    fn open_form(&mut self, prefill: &FormPrefill);

    /// Close the entry form and clear its fields.
    fn close_form(&mut self);

    /// Surface a user-facing validation message.
    fn show_error(&mut self, message: &str);

    /// Show or hide the sort/clear/view controls (hidden while the list is
    /// empty).
    fn set_controls_visible(&mut self, visible: bool);
}
