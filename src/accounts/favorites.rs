use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard};

use super::domain::UserId;
use crate::listings::{PropertyId, RepositoryError};

/// Per-user favorite listings, kept in the order they were added.
///
/// Ids are not checked against the listing store.
#[derive(Debug, Default, Clone)]
pub struct FavoritesRegistry {
    entries: Arc<Mutex<HashMap<UserId, Vec<PropertyId>>>>,
}

impl FavoritesRegistry {
    fn lock(&self) -> Result<MutexGuard<'_, HashMap<UserId, Vec<PropertyId>>>, RepositoryError> {
        self.entries
            .lock()
            .map_err(|_| RepositoryError::Unavailable("favorites mutex poisoned".to_string()))
    }

    /// Add the listing if absent, remove it otherwise. Returns `true` when it was added.
    pub fn toggle(&self, user: &UserId, property: &PropertyId) -> Result<bool, RepositoryError> {
        let mut guard = self.lock()?;
        let favorites = guard.entry(user.clone()).or_default();
        if let Some(position) = favorites.iter().position(|id| id == property) {
            favorites.remove(position);
            Ok(false)
        } else {
            favorites.push(property.clone());
            Ok(true)
        }
    }

    pub fn is_favorite(&self, user: &UserId, property: &PropertyId) -> Result<bool, RepositoryError> {
        Ok(self
            .lock()?
            .get(user)
            .is_some_and(|favorites| favorites.contains(property)))
    }

    pub fn list(&self, user: &UserId) -> Result<Vec<PropertyId>, RepositoryError> {
        Ok(self.lock()?.get(user).cloned().unwrap_or_default())
    }

    pub fn clear(&self, user: &UserId) -> Result<(), RepositoryError> {
        self.lock()?.remove(user);
        Ok(())
    }
}
