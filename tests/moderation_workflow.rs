//! End-to-end moderation scenarios driven through the public catalog service and router.

use std::sync::Arc;

use axum::body::Body;
use axum::http::{header, Request, StatusCode};
use tower::ServiceExt;

use rentify::accounts::{UserDirectory, UserId};
use rentify::listings::{
    catalog_router, CatalogService, CatalogServiceError, InMemoryPropertyStore, ModerationError,
    ModerationStatus, PropertyId, PropertyRepository, ACTOR_HEADER,
};
use rentify::seed::SeedData;

fn catalog() -> (Arc<InMemoryPropertyStore>, Arc<CatalogService<InMemoryPropertyStore>>) {
    let seed = SeedData::default();
    let store = Arc::new(InMemoryPropertyStore::new(seed.properties));
    let service = Arc::new(CatalogService::new(
        Arc::clone(&store),
        UserDirectory::new(seed.users),
    ));
    (store, service)
}

fn admin() -> UserId {
    UserId::new("1")
}

#[test]
fn rejected_listing_is_approved_with_notes() {
    let (store, service) = catalog();
    let id = PropertyId::new("5");
    let before = store
        .find_by_id(&id)
        .expect("store readable")
        .expect("listing 5 seeded");
    assert_eq!(before.moderation_status, ModerationStatus::Rejected);

    service
        .moderate(
            &admin(),
            &id,
            ModerationStatus::Approved,
            Some("looks good".to_string()),
        )
        .expect("admin approves");

    let after = store
        .find_by_id(&id)
        .expect("store readable")
        .expect("listing 5 seeded");
    assert_eq!(after.moderation_status, ModerationStatus::Approved);
    assert_eq!(after.moderation_notes.as_deref(), Some("looks good"));
    assert!(after.updated_at > before.updated_at);
    assert_eq!(after.created_at, before.created_at);
}

#[test]
fn unknown_listing_is_reported_without_side_effects() {
    let (store, service) = catalog();
    let before = store.scan(&|_| true).expect("store readable");

    let status = service.moderate(
        &admin(),
        &PropertyId::new("999"),
        ModerationStatus::Approved,
        None,
    );
    assert!(matches!(
        status,
        Err(CatalogServiceError::Moderation(ModerationError::NotFound { .. }))
    ));

    let toggle = service.toggle_verification(&admin(), &PropertyId::new("999"));
    assert!(matches!(
        toggle,
        Err(CatalogServiceError::Moderation(ModerationError::NotFound { .. }))
    ));

    assert_eq!(store.scan(&|_| true).expect("store readable"), before);
}

#[test]
fn verification_round_trip_restores_every_listing() {
    let (store, service) = catalog();
    let original = store.scan(&|_| true).expect("store readable");

    for property in &original {
        service
            .toggle_verification(&admin(), &property.id)
            .expect("toggle on");
        service
            .toggle_verification(&admin(), &property.id)
            .expect("toggle off");
    }

    let restored = store.scan(&|_| true).expect("store readable");
    for (before, after) in original.iter().zip(&restored) {
        assert_eq!(before.id, after.id);
        assert_eq!(before.verified, after.verified);
        assert!(after.updated_at > before.updated_at);
    }
}

#[tokio::test]
async fn agent_cannot_moderate_over_http() {
    let (store, service) = catalog();
    let router = catalog_router(service);

    let response = router
        .oneshot(
            Request::put("/api/v1/admin/properties/6/moderation")
                .header(header::CONTENT_TYPE, "application/json")
                .header(ACTOR_HEADER, "3")
                .body(Body::from(r#"{"status":"rejected"}"#))
                .expect("request builds"),
        )
        .await
        .expect("route executes");

    assert_eq!(response.status(), StatusCode::FORBIDDEN);
    let untouched = store
        .find_by_id(&PropertyId::new("6"))
        .expect("store readable")
        .expect("listing 6 seeded");
    assert_eq!(untouched.moderation_status, ModerationStatus::Pending);
}
