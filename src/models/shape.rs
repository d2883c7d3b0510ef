// ABOUTME: Map shape primitives shared by the entity model and the map surface
// ABOUTME: Shape kinds, geographic points, and a haversine path-length helper
//
// SPDX-License-Identifier: MIT OR Apache-2.0

use serde::{Deserialize, Serialize};

/// Mean Earth radius in kilometers, used for haversine distances.
const EARTH_RADIUS_KM: f64 = 6371.0088;

/// The kind of shape a workout was drawn as.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ShapeKind {
    /// A single point marker.
    Marker,
    /// An open path of two or more vertices.
    Polyline,
    /// A closed ring of three or more vertices.
    Polygon,
    /// An axis-aligned rectangle given by its corner vertices.
    Rectangle,
    /// A circle given by its center and a radius in meters.
    Circle,
}

impl ShapeKind {
    /// Whether this shape is a multi-vertex path whose drawn length can be
    /// suggested as the workout distance.
    #[must_use]
    pub fn has_path_length(self) -> bool {
        matches!(self, Self::Polyline | Self::Polygon)
    }
}

/// A geographic coordinate.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeoPoint {
    /// Latitude in decimal degrees.
    pub lat: f64,
    /// Longitude in decimal degrees.
    pub lng: f64,
}

impl GeoPoint {
    /// Create a point from decimal-degree coordinates.
    #[must_use]
    pub fn new(lat: f64, lng: f64) -> Self {
        Self { lat, lng }
    }

    /// Great-circle distance to another point in kilometers.
    #[must_use]
    pub fn distance_km(self, other: Self) -> f64 {
        let d_lat = (other.lat - self.lat).to_radians();
        let d_lng = (other.lng - self.lng).to_radians();
        let a = (d_lat / 2.0).sin().powi(2)
            + self.lat.to_radians().cos() * other.lat.to_radians().cos() * (d_lng / 2.0).sin().powi(2);
        2.0 * EARTH_RADIUS_KM * a.sqrt().asin()
    }
}

/// Sum of segment lengths along an ordered sequence of vertices, in
/// kilometers. Zero for fewer than two points.
#[must_use]
pub fn path_distance_km(points: &[GeoPoint]) -> f64 {
    points
        .windows(2)
        .map(|pair| pair[0].distance_km(pair[1]))
        .sum()
}

/// Owned drawable geometry, grouping the fields a workout is constructed
/// from.
#[derive(Debug, Clone)]
pub struct Shape {
    /// Shape kind to draw.
    pub kind: ShapeKind,
    /// Ordered vertices (one for marker/circle).
    pub points: Vec<GeoPoint>,
    /// Radius in meters, circles only.
    pub radius_m: Option<f64>,
}

/// Borrowed view of a workout's drawable geometry, passed to the map surface.
#[derive(Debug, Clone, Copy)]
pub struct ShapeGeometry<'a> {
    /// Shape kind to draw.
    pub kind: ShapeKind,
    /// Ordered vertices (one for marker/circle).
    pub points: &'a [GeoPoint],
    /// Radius in meters, circles only.
    pub radius_m: Option<f64>,
}
