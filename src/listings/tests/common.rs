use std::sync::Arc;

use axum::response::Response;
use chrono::{DateTime, TimeZone, Utc};
use serde_json::Value;

use crate::accounts::{UserDirectory, UserId};
use crate::listings::domain::{Property, PropertyId};
use crate::listings::moderation::{ModerationCapability, ModerationController};
use crate::listings::query::ListingQuery;
use crate::listings::service::CatalogService;
use crate::listings::store::{InMemoryPropertyStore, PropertyRepository, RepositoryError};
use crate::seed::{sample_properties, sample_users};

pub(super) fn store() -> Arc<InMemoryPropertyStore> {
    Arc::new(InMemoryPropertyStore::new(sample_properties()))
}

pub(super) fn query(store: &Arc<InMemoryPropertyStore>) -> ListingQuery<InMemoryPropertyStore> {
    ListingQuery::new(Arc::clone(store))
}

pub(super) fn controller(
    store: &Arc<InMemoryPropertyStore>,
) -> ModerationController<InMemoryPropertyStore> {
    ModerationController::new(Arc::clone(store))
}

/// Controller whose clock is stuck well before the seeded timestamps.
pub(super) fn frozen_controller(
    store: &Arc<InMemoryPropertyStore>,
) -> ModerationController<InMemoryPropertyStore> {
    ModerationController::with_clock(Arc::clone(store), frozen_now)
}

pub(super) fn frozen_now() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2020, 1, 1, 0, 0, 0)
        .single()
        .expect("valid instant")
}

pub(super) fn admin_capability() -> ModerationCapability {
    let admin = sample_users()
        .into_iter()
        .next()
        .expect("seeded admin");
    ModerationCapability::grant(&admin).expect("admin may moderate")
}

pub(super) fn admin_id() -> UserId {
    UserId::new("1")
}

pub(super) fn agent_id() -> UserId {
    UserId::new("2")
}

pub(super) fn id(raw: &str) -> PropertyId {
    PropertyId::new(raw)
}

pub(super) fn ids(listings: &[Property]) -> Vec<&str> {
    listings.iter().map(|property| property.id.as_str()).collect()
}

pub(super) fn snapshot(store: &InMemoryPropertyStore) -> Vec<Property> {
    store.scan(&|_| true).expect("store readable")
}

pub(super) fn service() -> Arc<CatalogService<InMemoryPropertyStore>> {
    Arc::new(CatalogService::new(
        store(),
        UserDirectory::new(sample_users()),
    ))
}

pub(super) struct UnavailableRepository;

impl PropertyRepository for UnavailableRepository {
    fn find_by_id(&self, _id: &PropertyId) -> Result<Option<Property>, RepositoryError> {
        Err(RepositoryError::Unavailable("listing backend offline".to_string()))
    }

    fn scan(
        &self,
        _predicate: &dyn Fn(&Property) -> bool,
    ) -> Result<Vec<Property>, RepositoryError> {
        Err(RepositoryError::Unavailable("listing backend offline".to_string()))
    }

    fn modify(
        &self,
        _id: &PropertyId,
        _mutation: &mut dyn FnMut(&mut Property),
    ) -> Result<Option<Property>, RepositoryError> {
        Err(RepositoryError::Unavailable("listing backend offline".to_string()))
    }

    fn len(&self) -> Result<usize, RepositoryError> {
        Err(RepositoryError::Unavailable("listing backend offline".to_string()))
    }
}

pub(super) async fn read_json_body(response: Response) -> Value {
    let body = axum::body::to_bytes(response.into_body(), 256 * 1024)
        .await
        .expect("read body");
    serde_json::from_slice(&body).expect("json payload")
}
