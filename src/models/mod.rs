// ABOUTME: Workout entity model (workouts, sports, shapes, coordinates)
// ABOUTME: Re-exports the entity types used across registry, storage, and controller
//
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Core data models.

/// Map shape primitives and geographic points.
pub mod shape;
/// The workout entity and its sport variants.
pub mod workout;

pub use shape::{path_distance_km, GeoPoint, Shape, ShapeGeometry, ShapeKind};
pub use workout::{Sport, Workout};
