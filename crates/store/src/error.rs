//! Error types for the store layer.
//!
//! This module defines all error types used throughout the store layer,
//! following a hierarchy that separates entity-state errors, profile-binding
//! errors, search errors, validation errors, and backend errors.

// Error enum variant fields are self-documenting via their #[error(...)] messages
#![allow(missing_docs)]

use thiserror::Error;

use crate::types::{EntityKind, ProfileKind, Role};

/// The primary error type for all store operations.
///
/// This enum encompasses all possible errors that can occur during document
/// store operations, organized by category.
#[derive(Error, Debug)]
pub enum StoreError {
    /// Entity state errors
    #[error(transparent)]
    Entity(#[from] EntityError),

    /// Role-scoped profile binding errors
    #[error(transparent)]
    Profile(#[from] ProfileError),

    /// Search dispatch errors
    #[error(transparent)]
    Search(#[from] SearchError),

    /// Validation errors
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// Ownership errors
    #[error(transparent)]
    Ownership(#[from] OwnershipError),

    /// Backend-specific errors
    #[error(transparent)]
    Backend(#[from] BackendError),
}

/// Errors related to entity state.
#[derive(Error, Debug)]
pub enum EntityError {
    /// The requested record was not found.
    #[error("{kind} not found: {id}")]
    NotFound { kind: EntityKind, id: String },

    /// A record violating a unique field constraint already exists.
    #[error("{kind} with the same {field} already exists")]
    Duplicate { kind: EntityKind, field: &'static str },
}

/// Errors raised by the role-scoped profile binder.
#[derive(Error, Debug)]
pub enum ProfileError {
    /// The referenced user does not exist.
    #[error("user not found: {user_id}")]
    UserNotFound { user_id: String },

    /// The referenced user's role does not match the profile type.
    #[error("user role {actual} does not match {profile} (expected {expected})")]
    RoleMismatch {
        profile: ProfileKind,
        expected: Role,
        actual: Role,
    },

    /// A profile of this type already exists for the user.
    #[error("{profile} profile already exists for user {user_id}")]
    DuplicateProfile {
        profile: ProfileKind,
        user_id: String,
    },
}

/// Errors raised by the search-field dispatcher.
#[derive(Error, Debug)]
pub enum SearchError {
    /// The client-supplied search field is not recognized for this entity.
    #[error("invalid search field '{field}' for {kind}")]
    UnknownField { kind: EntityKind, field: String },
}

/// Errors related to input validation.
#[derive(Error, Debug)]
pub enum ValidationError {
    /// A required field is missing or malformed.
    #[error("invalid field '{field}': {message}")]
    InvalidField { field: String, message: String },

    /// A request body failed schema validation.
    #[error("invalid request: {message}")]
    InvalidBody { message: String },
}

/// Errors related to record ownership.
#[derive(Error, Debug)]
pub enum OwnershipError {
    /// The caller does not own the record it is trying to mutate.
    #[error("user {user_id} is not permitted to modify {kind} {id}")]
    NotOwner {
        kind: EntityKind,
        id: String,
        user_id: String,
    },
}

/// Errors originating in the storage backend.
#[derive(Error, Debug)]
pub enum BackendError {
    /// The underlying query failed.
    #[error("query failed on {kind}: {message}")]
    QueryFailed { kind: EntityKind, message: String },

    /// Catch-all for unexpected backend failures.
    #[error("backend failure: {message}")]
    Internal { message: String },
}

/// Result type alias for store operations.
pub type StoreResult<T> = Result<T, StoreError>;
