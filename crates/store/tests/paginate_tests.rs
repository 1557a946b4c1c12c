//! Integration tests for the paginator and the relation pipeline.

use haven_store::backends::MemoryStore;
use haven_store::core::{list_with_relations, paginate, DocumentStore, Expansion, Join};
use haven_store::query::{Condition, Filter};
use haven_store::types::{EntityKind, PageRequest, ALL_ON_ONE_PAGE_LIMIT};
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
async fn five_caregivers_limit_two_paginates_correctly() {
    let store = MemoryStore::new();
    for i in 0..5 {
        let user_id = seed_user(
            &store,
            &format!("Caregiver {i}"),
            &format!("cg{i}@example.com"),
            "CAREGIVER",
        )
        .await;
        store
            .insert(EntityKind::Caregiver, json!({"userId": user_id}))
            .await
            .unwrap();
    }

    let page1 = paginate(
        &store,
        EntityKind::Caregiver,
        &Filter::all(),
        &PageRequest::new(1, 2),
        &[],
    )
    .await
    .unwrap();
    assert_eq!(page1.total, 5);
    assert_eq!(page1.total_pages, 3);
    assert_eq!(page1.current_page, 1);
    assert_eq!(page1.limit, 2);
    assert_eq!(page1.records.len(), 2);

    let page3 = paginate(
        &store,
        EntityKind::Caregiver,
        &Filter::all(),
        &PageRequest::new(3, 2),
        &[],
    )
    .await
    .unwrap();
    assert_eq!(page3.records.len(), 1);
    assert_eq!(page3.current_page, 3);

    let beyond = paginate(
        &store,
        EntityKind::Caregiver,
        &Filter::all(),
        &PageRequest::new(4, 2),
        &[],
    )
    .await
    .unwrap();
    assert!(beyond.records.is_empty());
    assert_eq!(beyond.total, 5);
}

#[tokio::test]
async fn missing_pagination_returns_everything_as_page_one() {
    let store = MemoryStore::new();
    for i in 0..3 {
        seed_user(&store, &format!("U{i}"), &format!("u{i}@x.com"), "RESIDENT").await;
    }

    let page = paginate(
        &store,
        EntityKind::User,
        &Filter::all(),
        &PageRequest::default(),
        &[],
    )
    .await
    .unwrap();
    assert_eq!(page.records.len(), 3);
    assert_eq!(page.current_page, 1);
    assert_eq!(page.limit, ALL_ON_ONE_PAGE_LIMIT);
    assert_eq!(page.total_pages, 1);
}

#[tokio::test]
async fn expansion_replaces_user_id_with_selected_fields() {
    let store = MemoryStore::new();
    let user_id = seed_user(&store, "Rita", "rita@example.com", "RESIDENT").await;
    store
        .insert(
            EntityKind::Resident,
            json!({"userId": user_id, "roomNumber": "12A"}),
        )
        .await
        .unwrap();

    let page = paginate(
        &store,
        EntityKind::Resident,
        &Filter::all(),
        &PageRequest::default(),
        &[Expansion::user_id()],
    )
    .await
    .unwrap();
    let resident = &page.records[0];
    assert_eq!(resident["userId"]["name"], "Rita");
    assert_eq!(resident["userId"]["email"], "rita@example.com");
    // The projection keeps only the selected fields plus the id.
    assert!(resident["userId"].get("password").is_none());
    assert_eq!(resident["roomNumber"], "12A");
}

#[tokio::test]
async fn filter_sees_expanded_relations() {
    let store = MemoryStore::new();
    let rita = seed_user(&store, "Rita Smith", "rita@example.com", "RESIDENT").await;
    let omar = seed_user(&store, "Omar Jones", "omar@example.com", "RESIDENT").await;
    store
        .insert(EntityKind::Resident, json!({"userId": rita}))
        .await
        .unwrap();
    store
        .insert(EntityKind::Resident, json!({"userId": omar}))
        .await
        .unwrap();

    // The filter addresses the joined user's name, which only exists after
    // expansion.
    let filter = Filter::all().any_of(vec![
        Condition::contains("userId.name", "smith"),
        Condition::contains("userId.email", "smith"),
    ]);
    let page = paginate(
        &store,
        EntityKind::Resident,
        &filter,
        &PageRequest::default(),
        &[Expansion::user_id()],
    )
    .await
    .unwrap();
    assert_eq!(page.total, 1);
    assert_eq!(page.records[0]["userId"]["name"], "Rita Smith");
}

#[tokio::test]
async fn documents_relation_expands_unconditionally() {
    let store = MemoryStore::new();
    let user_id = seed_user(&store, "Carl", "carl@example.com", "CAREGIVER").await;
    let doc = store
        .insert(EntityKind::Document, json!({"title": "DBS check"}))
        .await
        .unwrap();
    store
        .insert(
            EntityKind::Caregiver,
            json!({"userId": user_id, "documents": [doc.id.to_string(), "not-a-real-id"]}),
        )
        .await
        .unwrap();

    let page = paginate(
        &store,
        EntityKind::Caregiver,
        &Filter::all(),
        &PageRequest::default(),
        &[],
    )
    .await
    .unwrap();
    let documents = page.records[0]["documents"].as_array().unwrap();
    // The unresolvable id is dropped, the real one is joined.
    assert_eq!(documents.len(), 1);
    assert_eq!(documents[0]["title"], "DBS check");
}

#[tokio::test]
async fn relation_pipeline_counts_after_post_join_match() {
    let store = MemoryStore::new();
    let alice = seed_user(&store, "Alice", "alice@example.com", "CAREGIVER").await;
    let bob = seed_user(&store, "Bob", "bob@example.com", "CAREGIVER").await;
    for i in 0..3 {
        store
            .insert(
                EntityKind::Timesheet,
                json!({"userId": alice, "date": format!("2026-08-0{}", i + 1), "status": "PENDING"}),
            )
            .await
            .unwrap();
    }
    store
        .insert(
            EntityKind::Timesheet,
            json!({"userId": bob, "date": "2026-08-04", "status": "PENDING"}),
        )
        .await
        .unwrap();

    let post_join = Filter::all().and(Condition::contains("user.name", "alice"));
    let page = list_with_relations(
        &store,
        EntityKind::Timesheet,
        &Filter::all(),
        &[Join::user()],
        &post_join,
        &PageRequest::new(1, 2),
    )
    .await
    .unwrap();

    // Bob's timesheet is excluded by the post-join match, and the totals
    // reflect that exclusion.
    assert_eq!(page.total, 3);
    assert_eq!(page.total_pages, 2);
    assert_eq!(page.records.len(), 2);
    assert_eq!(page.records[0]["user"]["name"], "Alice");
}

#[tokio::test]
async fn creator_join_collapses_to_single_object() {
    let store = MemoryStore::new();
    let creator = seed_user(&store, "Admin", "admin@example.com", "ADMINISTRATOR").await;
    let associate = seed_user(&store, "Carl", "carl@example.com", "CAREGIVER").await;
    store
        .insert(
            EntityKind::Document,
            json!({
                "title": "Fire drill log",
                "createdBy": creator,
                "associatedUsers": [associate]
            }),
        )
        .await
        .unwrap();

    let page = list_with_relations(
        &store,
        EntityKind::Document,
        &Filter::all(),
        &[Join::created_by(), Join::associated_users()],
        &Filter::all(),
        &PageRequest::default(),
    )
    .await
    .unwrap();
    let document = &page.records[0];
    assert_eq!(document["createdBy"]["email"], "admin@example.com");
    assert!(document["createdBy"].is_object());
    assert_eq!(document["associatedUsers"].as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn missing_creator_collapses_to_null() {
    let store = MemoryStore::new();
    store
        .insert(
            EntityKind::Document,
            json!({"title": "Orphaned", "createdBy": "not-an-id", "associatedUsers": []}),
        )
        .await
        .unwrap();

    let page = list_with_relations(
        &store,
        EntityKind::Document,
        &Filter::all(),
        &[Join::created_by()],
        &Filter::all(),
        &PageRequest::default(),
    )
    .await
    .unwrap();
    assert!(page.records[0]["createdBy"].is_null());
}
