// ABOUTME: Error types for the workout tracking engine
// ABOUTME: Validation, storage, and controller error enums built on thiserror
//
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Error taxonomy.
//!
//! Only [`ValidationError`] is ever surfaced to the user; storage and
//! enrichment failures degrade locally and are reported through
//! [`crate::storage::SnapshotHealth`] and absent enrichment fields.

use thiserror::Error;
use uuid::Uuid;

/// A required numeric form field was non-finite or non-positive.
///
/// Carries the exact user-facing message the form glue displays when a
/// submission is rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("Inputs have to be positive numbers!")]
pub struct ValidationError;

/// Failures of the underlying snapshot blob store.
#[derive(Debug, Error)]
pub enum StorageError {
    /// The backing store could not be written.
    #[error("snapshot write failed: {0}")]
    Io(#[from] std::io::Error),

    /// The registry could not be serialized.
    #[error("snapshot serialization failed: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Errors returned by the sync controller's operations.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum SyncError {
    /// Form fields failed validation; the form is re-shown with a message.
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// An enrichment lookup is still in flight; the request is a no-op.
    #[error("enrichment in flight, request rejected")]
    EnrichmentInFlight,

    /// A submission arrived with no form open.
    #[error("no form is open")]
    NoOpenForm,

    /// The referenced workout is not in the registry.
    #[error("unknown workout: {0}")]
    UnknownWorkout(Uuid),
}
