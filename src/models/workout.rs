// ABOUTME: Workout entity model with running/cycling variants and derived metrics
// ABOUTME: Pace, speed, description, and popup caption semantics for logged workouts
//
// SPDX-License-Identifier: MIT OR Apache-2.0

use chrono::{DateTime, Timelike, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::shape::{GeoPoint, Shape, ShapeGeometry, ShapeKind};
use crate::enrichment::Enrichment;

/// Sport-specific data, tagged with `"type"` in the persisted snapshot.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum Sport {
    /// A run, with step cadence in steps per minute.
    Running {
        /// Steps per minute.
        cadence: f64,
    },
    /// A ride, with total climb in meters. Elevation gain is accepted
    /// unvalidated and may be zero or negative.
    Cycling {
        /// Elevation gain in meters.
        elevation_gain_m: f64,
    },
}

impl Sport {
    /// Lowercase sport name as used in the persisted `"type"` tag.
    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            Self::Running { .. } => "running",
            Self::Cycling { .. } => "cycling",
        }
    }

    /// Capitalized sport name for display.
    #[must_use]
    pub fn title(self) -> &'static str {
        match self {
            Self::Running { .. } => "Running",
            Self::Cycling { .. } => "Cycling",
        }
    }
}

/// A logged workout tied to a drawn map shape.
///
/// The `id` is assigned once at creation and restored verbatim when the
/// entity is reconstructed from a snapshot; it is the join key between the
/// registry, the rendered list, and the map overlays.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Workout {
    /// Stable unique identifier.
    pub id: Uuid,
    /// Creation timestamp; immutable, drives the description and the
    /// day/night weather icon choice.
    pub date: DateTime<Utc>,
    /// Kind of shape the workout was drawn as.
    pub shape: ShapeKind,
    /// Ordered vertices (length 1 for marker/circle).
    pub points: Vec<GeoPoint>,
    /// Radius in meters, present for circle shapes only.
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub radius_m: Option<f64>,
    /// Distance covered in kilometers.
    pub distance_km: f64,
    /// Duration in minutes.
    pub duration_min: f64,
    /// Precise place string (street, falling back to county).
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub location_primary: Option<String>,
    /// Coarse place string (region, falling back to country).
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub location_secondary: Option<String>,
    /// WMO weather classification code, absent when the lookup failed.
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub weather_code: Option<u8>,
    /// Human-readable summary computed once at construction.
    pub description: String,
    /// Times the list entry has been interacted with. Vestigial.
    #[serde(default)]
    pub clicks: u32,
    /// Sport discriminant plus its extra field.
    #[serde(flatten)]
    pub sport: Sport,
}

impl Workout {
    /// Construct a new workout with a fresh id, computing the description
    /// from sport and date.
    ///
    /// Derived metrics are intentionally unguarded against zero inputs; the
    /// commit path validates distance and duration before construction.
    #[must_use]
    pub fn new(
        sport: Sport,
        shape: Shape,
        distance_km: f64,
        duration_min: f64,
        enrichment: Enrichment,
        date: DateTime<Utc>,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            date,
            shape: shape.kind,
            points: shape.points,
            radius_m: shape.radius_m,
            distance_km,
            duration_min,
            location_primary: enrichment.location_primary,
            location_secondary: enrichment.location_secondary,
            weather_code: enrichment.weather_code,
            description: describe(sport, date),
            clicks: 0,
            sport,
        }
    }

    /// Pace in min/km; `Some` for running workouts only. Exact quotient,
    /// no rounding.
    #[must_use]
    pub fn pace_min_per_km(&self) -> Option<f64> {
        match self.sport {
            Sport::Running { .. } => Some(self.duration_min / self.distance_km),
            Sport::Cycling { .. } => None,
        }
    }

    /// Speed in km/h; `Some` for cycling workouts only. Exact quotient,
    /// no rounding.
    #[must_use]
    pub fn speed_kmh(&self) -> Option<f64> {
        match self.sport {
            Sport::Running { .. } => None,
            Sport::Cycling { .. } => Some(self.distance_km / (self.duration_min / 60.0)),
        }
    }

    /// The coordinate enrichment and map centering use: the first vertex.
    #[must_use]
    pub fn representative_point(&self) -> Option<GeoPoint> {
        self.points.first().copied()
    }

    /// Borrowed geometry for the map surface.
    #[must_use]
    pub fn geometry(&self) -> ShapeGeometry<'_> {
        ShapeGeometry {
            kind: self.shape,
            points: &self.points,
            radius_m: self.radius_m,
        }
    }

    /// Whether the workout happened in the evening (hour 18 or later),
    /// selecting the night variant of weather icons.
    #[must_use]
    pub fn is_night(&self) -> bool {
        self.date.hour() >= 18
    }

    /// Caption for the map overlay popup, preferring the enriched place
    /// strings and falling back to the plain description.
    #[must_use]
    pub fn popup_caption(&self) -> String {
        let (glyph, verb) = match self.sport {
            Sport::Running { .. } => ("\u{1f3c3}\u{200d}\u{2642}\u{fe0f}", "Run at"),
            Sport::Cycling { .. } => ("\u{1f6b4}\u{200d}\u{2640}\u{fe0f}", "Cycle at"),
        };
        match (&self.location_primary, &self.location_secondary) {
            (Some(primary), Some(secondary)) => format!("{glyph} {verb} {primary}, {secondary}."),
            (None, Some(secondary)) => format!("{glyph} {verb} {secondary}."),
            _ => format!("{glyph} {}", self.description),
        }
    }

    /// Recompute the stored description, needed when an edit changes the
    /// sport.
    pub fn refresh_description(&mut self) {
        self.description = describe(self.sport, self.date);
    }
}

fn describe(sport: Sport, date: DateTime<Utc>) -> String {
    format!("{} on {}", sport.title(), date.format("%B %-d, %H:%M"))
}
