//! Integration tests for search dispatch wired through the pipelines.

use haven_store::backends::MemoryStore;
use haven_store::core::{list_with_relations, paginate, DocumentStore, Join};
use haven_store::error::{SearchError, StoreError};
use haven_store::query::{dispatch, Filter, SearchStage};
use haven_store::types::{EntityKind, PageRequest};
use serde_json::json;

async fn seed_user(store: &MemoryStore, name: &str, email: &str, role: &str) -> String {
    store
        .insert(
            EntityKind::User,
            json!({"name": name, "email": email, "role": role, "active": true}),
        )
        .await
        .unwrap()
        .id
        .to_string()
}

#[tokio::test]
async fn user_search_by_email_substring() {
    let store = MemoryStore::new();
    seed_user(&store, "Alice", "alice@haven.example", "CAREGIVER").await;
    seed_user(&store, "Bob", "bob@other.example", "CAREGIVER").await;

    let dispatched = dispatch(EntityKind::User, "email", "HAVEN").unwrap();
    assert_eq!(dispatched.stage, SearchStage::Direct);
    let filter = Filter::all().and(dispatched.condition);

    let page = paginate(
        &store,
        EntityKind::User,
        &filter,
        &PageRequest::default(),
        &[],
    )
    .await
    .unwrap();
    assert_eq!(page.total, 1);
    assert_eq!(page.records[0]["name"], "Alice");
}

#[tokio::test]
async fn document_search_on_creator_email_runs_post_join() {
    let store = MemoryStore::new();
    let alice = seed_user(&store, "Alice", "alice@haven.example", "ADMINISTRATOR").await;
    let bob = seed_user(&store, "Bob", "bob@other.example", "ADMINISTRATOR").await;
    store
        .insert(
            EntityKind::Document,
            json!({"title": "Rota", "createdBy": alice, "associatedUsers": []}),
        )
        .await
        .unwrap();
    store
        .insert(
            EntityKind::Document,
            json!({"title": "Menu", "createdBy": bob, "associatedUsers": []}),
        )
        .await
        .unwrap();

    let dispatched = dispatch(EntityKind::Document, "createdBy.email", "haven").unwrap();
    assert_eq!(dispatched.stage, SearchStage::PostJoin);
    let post_join = Filter::all().and(dispatched.condition);

    let page = list_with_relations(
        &store,
        EntityKind::Document,
        &Filter::all(),
        &[Join::created_by(), Join::associated_users()],
        &post_join,
        &PageRequest::default(),
    )
    .await
    .unwrap();
    assert_eq!(page.total, 1);
    assert_eq!(page.records[0]["title"], "Rota");
}

#[tokio::test]
async fn document_id_search_with_invalid_id_matches_nothing() {
    let store = MemoryStore::new();
    store
        .insert(EntityKind::Document, json!({"title": "Rota"}))
        .await
        .unwrap();

    let dispatched = dispatch(EntityKind::Document, "documentId", "not-a-uuid").unwrap();
    let filter = Filter::all().and(dispatched.condition);
    let page = paginate(
        &store,
        EntityKind::Document,
        &filter,
        &PageRequest::default(),
        &[],
    )
    .await
    .unwrap();
    assert_eq!(page.total, 0);
    assert_eq!(page.total_pages, 0);
}

#[tokio::test]
async fn unknown_search_field_is_an_error() {
    let err = dispatch(EntityKind::Timesheet, "manager", "x").unwrap_err();
    let store_err: StoreError = err.into();
    assert!(matches!(
        store_err,
        StoreError::Search(SearchError::UnknownField { .. })
    ));
}

#[tokio::test]
async fn attendance_search_by_status() {
    let store = MemoryStore::new();
    let user = seed_user(&store, "Carl", "carl@haven.example", "CAREGIVER").await;
    store
        .insert(
            EntityKind::Attendance,
            json!({"userId": user, "date": "2026-08-28", "status": "PRESENT"}),
        )
        .await
        .unwrap();
    store
        .insert(
            EntityKind::Attendance,
            json!({"userId": user, "date": "2026-08-29", "status": "LATE"}),
        )
        .await
        .unwrap();

    let dispatched = dispatch(EntityKind::Attendance, "status", "late").unwrap();
    let filter = Filter::all().and(dispatched.condition);
    let page = list_with_relations(
        &store,
        EntityKind::Attendance,
        &filter,
        &[Join::user()],
        &Filter::all(),
        &PageRequest::default(),
    )
    .await
    .unwrap();
    assert_eq!(page.total, 1);
    assert_eq!(page.records[0]["date"], "2026-08-29");
}
