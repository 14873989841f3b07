use std::collections::HashSet;
use std::sync::Arc;

use serde::Serialize;

use super::domain::{ModerationStatus, Property, PropertyId};
use super::moderation::{ModerationCapability, ModerationController, ModerationError};
use super::query::ListingQuery;
use super::store::{PropertyRepository, RepositoryError};
use super::summary::ModerationSummary;
use crate::accounts::{FavoritesRegistry, RoleSummary, UserDirectory, UserId};

/// Facade wiring the listing store, moderation controller, and account directory together.
///
/// Callers hand in the acting user's id; the service resolves it against the directory and
/// only then grants a [`ModerationCapability`].
pub struct CatalogService<R> {
    listings: ListingQuery<R>,
    moderation: ModerationController<R>,
    directory: UserDirectory,
    favorites: FavoritesRegistry,
}

impl<R> CatalogService<R>
where
    R: PropertyRepository + 'static,
{
    pub fn new(repository: Arc<R>, directory: UserDirectory) -> Self {
        let moderation = ModerationController::new(Arc::clone(&repository));
        Self::with_controller(repository, directory, moderation)
    }

    pub fn with_controller(
        repository: Arc<R>,
        directory: UserDirectory,
        moderation: ModerationController<R>,
    ) -> Self {
        Self {
            listings: ListingQuery::new(repository),
            moderation,
            directory,
            favorites: FavoritesRegistry::default(),
        }
    }

    pub fn listings(&self) -> &ListingQuery<R> {
        &self.listings
    }

    pub fn directory(&self) -> &UserDirectory {
        &self.directory
    }

    pub fn favorites(&self) -> &FavoritesRegistry {
        &self.favorites
    }

    /// Resolve `actor` and check it may moderate.
    pub fn authorize(&self, actor: &UserId) -> Result<ModerationCapability, CatalogServiceError> {
        let user = self
            .directory
            .find_by_id(actor)?
            .ok_or_else(|| CatalogServiceError::UnknownUser { id: actor.clone() })?;
        Ok(ModerationCapability::grant(&user)?)
    }

    pub fn moderate(
        &self,
        actor: &UserId,
        id: &PropertyId,
        status: ModerationStatus,
        notes: Option<String>,
    ) -> Result<Property, CatalogServiceError> {
        let capability = self.authorize(actor)?;
        Ok(self
            .moderation
            .set_moderation_status(&capability, id, status, notes)?)
    }

    pub fn toggle_verification(
        &self,
        actor: &UserId,
        id: &PropertyId,
    ) -> Result<Property, CatalogServiceError> {
        let capability = self.authorize(actor)?;
        Ok(self.moderation.toggle_verification(&capability, id)?)
    }

    pub fn dashboard(&self) -> Result<DashboardSummary, CatalogServiceError> {
        let listings = self.listings.all()?;
        Ok(DashboardSummary {
            properties: ModerationSummary::from_listings(&listings),
            users: self.directory.role_summary()?,
        })
    }

    /// Toggle a favorite for a known user. Returns `true` when the listing was added.
    pub fn toggle_favorite(
        &self,
        user: &UserId,
        property: &PropertyId,
    ) -> Result<bool, CatalogServiceError> {
        self.require_user(user)?;
        Ok(self.favorites.toggle(user, property)?)
    }

    /// Favorites for a known user, in store order. Ids with no matching listing are skipped.
    pub fn favorite_listings(&self, user: &UserId) -> Result<Vec<Property>, CatalogServiceError> {
        self.require_user(user)?;
        let ids: HashSet<PropertyId> = self.favorites.list(user)?.into_iter().collect();
        Ok(self
            .listings
            .filter_by_predicate(|property| ids.contains(&property.id))?)
    }

    fn require_user(&self, user: &UserId) -> Result<(), CatalogServiceError> {
        match self.directory.find_by_id(user)? {
            Some(_) => Ok(()),
            None => Err(CatalogServiceError::UnknownUser { id: user.clone() }),
        }
    }
}

/// Combined admin dashboard figures.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct DashboardSummary {
    pub properties: ModerationSummary,
    pub users: RoleSummary,
}

/// Error raised by the catalog service.
#[derive(Debug, thiserror::Error)]
pub enum CatalogServiceError {
    #[error("user {id} not found")]
    UnknownUser { id: UserId },
    #[error(transparent)]
    Moderation(#[from] ModerationError),
    #[error(transparent)]
    Repository(#[from] RepositoryError),
}
