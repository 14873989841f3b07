//! Property catalog: the listing store, moderation lifecycle, and derived query views.

pub mod domain;
pub mod moderation;
pub mod query;
pub mod router;
pub mod service;
pub mod store;
pub mod summary;

#[cfg(test)]
mod tests;

pub use domain::{
    Coordinates, DealType, InvalidValue, Location, ModerationStatus, OwnerSummary, Property,
    PropertyId, PropertyType, Specifications,
};
pub use moderation::{ModerationCapability, ModerationController, ModerationError};
pub use query::{AdminStatusFilter, ListingFilter, ListingQuery};
pub use router::{catalog_router, ModerationRequest, ACTOR_HEADER};
pub use service::{CatalogService, CatalogServiceError, DashboardSummary};
pub use store::{InMemoryPropertyStore, PropertyRepository, RepositoryError};
pub use summary::ModerationSummary;
