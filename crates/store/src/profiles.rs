//! The role-scoped profile binder.
//!
//! Caregiver, healthcare-professional, resident, and interview-candidate
//! profiles all bind one-to-one to a user holding the matching role. One
//! parameterized implementation covers all four, driven by the
//! [`ProfileKind`] metadata table.
//!
//! Guard order on create: the user must exist, its role must match the
//! profile type, and no profile of this type may already reference it. The
//! guards short-circuit before anything is written. The application-level
//! duplicate check is only the fast path; the backend's unique index on
//! `userId` is what actually closes the race, and its violation is reported
//! as the same duplicate error.

use serde_json::Value;
use tracing::debug;

use crate::core::DocumentStore;
use crate::error::{EntityError, ProfileError, StoreError, StoreResult, ValidationError};
use crate::query::{Condition, Filter};
use crate::types::{ProfileKind, Record, RecordId, Role};

/// Creates a profile of the given kind for a user.
pub async fn create_profile<S>(
    store: &S,
    kind: ProfileKind,
    user_id: &str,
    mut content: Value,
) -> StoreResult<Record>
where
    S: DocumentStore + ?Sized,
{
    let user = lookup_user(store, user_id).await?;
    let role = user_role(&user)?;
    if role != kind.expected_role() {
        return Err(ProfileError::RoleMismatch {
            profile: kind,
            expected: kind.expected_role(),
            actual: role,
        }
        .into());
    }
    if find_by_user(store, kind, user_id).await?.is_some() {
        return Err(duplicate(kind, user_id));
    }

    if let Some(map) = content.as_object_mut() {
        map.insert("userId".to_string(), Value::String(user.id.to_string()));
    }
    debug!(profile = %kind, user_id, "creating profile");
    match store.insert(kind.entity(), content).await {
        // Lost the race: another create slipped in between the check and
        // the insert. Same outcome as the fast-path check.
        Err(StoreError::Entity(EntityError::Duplicate { field: "userId", .. })) => {
            Err(duplicate(kind, user_id))
        }
        other => other,
    }
}

/// Updates a user's profile, creating one when none exists yet.
///
/// The create-on-absent branch runs the full create guards, so an update
/// against a user with a mismatched role still fails.
pub async fn upsert_profile<S>(
    store: &S,
    kind: ProfileKind,
    user_id: &str,
    changes: Value,
) -> StoreResult<Record>
where
    S: DocumentStore + ?Sized,
{
    match find_by_user(store, kind, user_id).await? {
        Some(existing) => {
            debug!(profile = %kind, user_id, id = %existing.id, "updating profile");
            store
                .update(kind.entity(), existing.id, changes)
                .await?
                .ok_or_else(|| not_found(kind, &existing.id.to_string()))
        }
        None => create_profile(store, kind, user_id, changes).await,
    }
}

/// Finds the profile of this kind bound to a user, if any.
pub async fn find_by_user<S>(
    store: &S,
    kind: ProfileKind,
    user_id: &str,
) -> StoreResult<Option<Record>>
where
    S: DocumentStore + ?Sized,
{
    let filter = Filter::all().and(Condition::eq("userId", user_id));
    store.find_one(kind.entity(), &filter).await
}

/// Fetches a profile by its own id.
pub async fn get_profile<S>(store: &S, kind: ProfileKind, id: &str) -> StoreResult<Record>
where
    S: DocumentStore + ?Sized,
{
    let record_id = RecordId::parse(id).ok_or_else(|| not_found(kind, id))?;
    store.require(kind.entity(), record_id).await
}

/// Deletes a profile by its own id. Absence is an error, unlike update.
pub async fn delete_profile<S>(store: &S, kind: ProfileKind, id: &str) -> StoreResult<()>
where
    S: DocumentStore + ?Sized,
{
    let record_id = RecordId::parse(id).ok_or_else(|| not_found(kind, id))?;
    if store.delete(kind.entity(), record_id).await? {
        debug!(profile = %kind, id, "deleted profile");
        Ok(())
    } else {
        Err(not_found(kind, id))
    }
}

async fn lookup_user<S>(store: &S, user_id: &str) -> StoreResult<Record>
where
    S: DocumentStore + ?Sized,
{
    let missing = || {
        StoreError::from(ProfileError::UserNotFound {
            user_id: user_id.to_string(),
        })
    };
    let id = RecordId::parse(user_id).ok_or_else(missing)?;
    store
        .get(crate::types::EntityKind::User, id)
        .await?
        .ok_or_else(missing)
}

fn user_role(user: &Record) -> StoreResult<Role> {
    let value = user.content.get("role").cloned().unwrap_or(Value::Null);
    serde_json::from_value(value).map_err(|_| {
        ValidationError::InvalidField {
            field: "role".to_string(),
            message: "user record carries no recognizable role".to_string(),
        }
        .into()
    })
}

fn duplicate(kind: ProfileKind, user_id: &str) -> StoreError {
    ProfileError::DuplicateProfile {
        profile: kind,
        user_id: user_id.to_string(),
    }
    .into()
}

fn not_found(kind: ProfileKind, id: &str) -> StoreError {
    EntityError::NotFound {
        kind: kind.entity(),
        id: id.to_string(),
    }
    .into()
}
