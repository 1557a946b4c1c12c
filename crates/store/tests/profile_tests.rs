//! Integration tests for the role-scoped profile binder.

use haven_store::backends::MemoryStore;
use haven_store::core::DocumentStore;
use haven_store::error::{EntityError, ProfileError, StoreError};
use haven_store::profiles;
use haven_store::types::{EntityKind, ProfileKind, RecordId};
use serde_json::json;

async fn seed_user(store: &MemoryStore, email: &str, role: &str) -> String {
    store
        .insert(
            EntityKind::User,
            json!({"name": "Test User", "email": email, "role": role, "active": true}),
        )
        .await
        .unwrap()
        .id
        .to_string()
}

#[tokio::test]
async fn create_binds_profile_to_user() {
    let store = MemoryStore::new();
    let user_id = seed_user(&store, "cg@example.com", "CAREGIVER").await;

    let profile = profiles::create_profile(
        &store,
        ProfileKind::Caregiver,
        &user_id,
        json!({"shiftPreference": "nights"}),
    )
    .await
    .unwrap();
    assert_eq!(profile.content["userId"], user_id);
    assert_eq!(profile.content["shiftPreference"], "nights");

    let found = profiles::find_by_user(&store, ProfileKind::Caregiver, &user_id)
        .await
        .unwrap();
    assert_eq!(found.unwrap().id, profile.id);
}

#[tokio::test]
async fn create_for_missing_user_fails() {
    let store = MemoryStore::new();
    let err = profiles::create_profile(
        &store,
        ProfileKind::Resident,
        &RecordId::new().to_string(),
        json!({}),
    )
    .await
    .unwrap_err();
    assert!(matches!(
        err,
        StoreError::Profile(ProfileError::UserNotFound { .. })
    ));

    // A malformed id gets the same answer as an unknown one.
    let err = profiles::create_profile(&store, ProfileKind::Resident, "garbage", json!({}))
        .await
        .unwrap_err();
    assert!(matches!(
        err,
        StoreError::Profile(ProfileError::UserNotFound { .. })
    ));
}

#[tokio::test]
async fn create_with_mismatched_role_fails() {
    let store = MemoryStore::new();
    let user_id = seed_user(&store, "res@example.com", "RESIDENT").await;

    let err = profiles::create_profile(&store, ProfileKind::Caregiver, &user_id, json!({}))
        .await
        .unwrap_err();
    match err {
        StoreError::Profile(ProfileError::RoleMismatch { profile, .. }) => {
            assert_eq!(profile, ProfileKind::Caregiver);
        }
        other => panic!("expected role mismatch, got {other}"),
    }

    // Nothing was written.
    let found = profiles::find_by_user(&store, ProfileKind::Caregiver, &user_id)
        .await
        .unwrap();
    assert!(found.is_none());
}

#[tokio::test]
async fn second_profile_for_same_user_fails() {
    let store = MemoryStore::new();
    let user_id = seed_user(&store, "cg@example.com", "CAREGIVER").await;
    profiles::create_profile(&store, ProfileKind::Caregiver, &user_id, json!({}))
        .await
        .unwrap();

    let err = profiles::create_profile(&store, ProfileKind::Caregiver, &user_id, json!({}))
        .await
        .unwrap_err();
    assert!(matches!(
        err,
        StoreError::Profile(ProfileError::DuplicateProfile { .. })
    ));
}

#[tokio::test]
async fn upsert_updates_existing_profile() {
    let store = MemoryStore::new();
    let user_id = seed_user(&store, "hp@example.com", "HEALTHCARE_PROFESSIONAL").await;
    let created = profiles::create_profile(
        &store,
        ProfileKind::HealthcareProfessional,
        &user_id,
        json!({"specialty": "physio"}),
    )
    .await
    .unwrap();

    let updated = profiles::upsert_profile(
        &store,
        ProfileKind::HealthcareProfessional,
        &user_id,
        json!({"specialty": "geriatrics"}),
    )
    .await
    .unwrap();
    assert_eq!(updated.id, created.id);
    assert_eq!(updated.content["specialty"], "geriatrics");
}

#[tokio::test]
async fn upsert_creates_when_absent() {
    let store = MemoryStore::new();
    let user_id = seed_user(&store, "ic@example.com", "INTERVIEW_CANDIDATE").await;

    let created = profiles::upsert_profile(
        &store,
        ProfileKind::InterviewCandidate,
        &user_id,
        json!({"position": "Senior Caregiver"}),
    )
    .await
    .unwrap();
    assert_eq!(created.content["userId"], user_id);
    assert_eq!(created.content["position"], "Senior Caregiver");
}

#[tokio::test]
async fn upsert_on_absent_profile_still_checks_role() {
    let store = MemoryStore::new();
    let user_id = seed_user(&store, "res@example.com", "RESIDENT").await;

    let err = profiles::upsert_profile(&store, ProfileKind::Caregiver, &user_id, json!({}))
        .await
        .unwrap_err();
    assert!(matches!(
        err,
        StoreError::Profile(ProfileError::RoleMismatch { .. })
    ));
}

#[tokio::test]
async fn delete_is_not_idempotent() {
    let store = MemoryStore::new();
    let user_id = seed_user(&store, "cg@example.com", "CAREGIVER").await;
    let profile = profiles::create_profile(&store, ProfileKind::Caregiver, &user_id, json!({}))
        .await
        .unwrap();
    let id = profile.id.to_string();

    profiles::delete_profile(&store, ProfileKind::Caregiver, &id)
        .await
        .unwrap();
    let err = profiles::delete_profile(&store, ProfileKind::Caregiver, &id)
        .await
        .unwrap_err();
    assert!(matches!(
        err,
        StoreError::Entity(EntityError::NotFound { .. })
    ));
}

#[tokio::test]
async fn get_profile_by_id() {
    let store = MemoryStore::new();
    let user_id = seed_user(&store, "cg@example.com", "CAREGIVER").await;
    let created = profiles::create_profile(&store, ProfileKind::Caregiver, &user_id, json!({}))
        .await
        .unwrap();

    let fetched = profiles::get_profile(&store, ProfileKind::Caregiver, &created.id.to_string())
        .await
        .unwrap();
    assert_eq!(fetched.id, created.id);

    let err = profiles::get_profile(&store, ProfileKind::Caregiver, "nonsense")
        .await
        .unwrap_err();
    assert!(matches!(
        err,
        StoreError::Entity(EntityError::NotFound { .. })
    ));
}
