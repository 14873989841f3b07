use std::sync::{Arc, Mutex, MutexGuard};

use super::domain::{Property, PropertyId};

/// Storage abstraction over the authoritative listing collection.
///
/// Implementations must preserve insertion order for every read. There is deliberately no
/// insert or delete: the record set is fixed once the store is built.
pub trait PropertyRepository: Send + Sync {
    fn find_by_id(&self, id: &PropertyId) -> Result<Option<Property>, RepositoryError>;

    /// Records matching `predicate`, in insertion order. The predicate runs on a snapshot,
    /// so it may read the store.
    fn scan(
        &self,
        predicate: &dyn Fn(&Property) -> bool,
    ) -> Result<Vec<Property>, RepositoryError>;

    /// Apply `mutation` to the record with `id` in place and return the updated copy.
    /// Returns `Ok(None)` without touching anything when the id is unknown. The store is
    /// locked while `mutation` runs, so it must not call back into the store.
    fn modify(
        &self,
        id: &PropertyId,
        mutation: &mut dyn FnMut(&mut Property),
    ) -> Result<Option<Property>, RepositoryError>;

    fn len(&self) -> Result<usize, RepositoryError>;

    fn is_empty(&self) -> Result<bool, RepositoryError> {
        Ok(self.len()? == 0)
    }
}

/// Error enumeration for repository failures.
#[derive(Debug, thiserror::Error)]
pub enum RepositoryError {
    #[error("repository unavailable: {0}")]
    Unavailable(String),
}

/// Ordered in-memory listing store, built once at startup and shared by handle.
///
/// Every read is a full linear scan; fine for the seeded catalog, but it does not scale.
#[derive(Debug, Default, Clone)]
pub struct InMemoryPropertyStore {
    records: Arc<Mutex<Vec<Property>>>,
}

impl InMemoryPropertyStore {
    pub fn new(records: Vec<Property>) -> Self {
        Self {
            records: Arc::new(Mutex::new(records)),
        }
    }

    fn lock(&self) -> Result<MutexGuard<'_, Vec<Property>>, RepositoryError> {
        self.records
            .lock()
            .map_err(|_| RepositoryError::Unavailable("listing store mutex poisoned".to_string()))
    }
}

impl PropertyRepository for InMemoryPropertyStore {
    fn find_by_id(&self, id: &PropertyId) -> Result<Option<Property>, RepositoryError> {
        let guard = self.lock()?;
        Ok(guard.iter().find(|property| &property.id == id).cloned())
    }

    fn scan(
        &self,
        predicate: &dyn Fn(&Property) -> bool,
    ) -> Result<Vec<Property>, RepositoryError> {
        let snapshot = self.lock()?.clone();
        Ok(snapshot
            .into_iter()
            .filter(|property| predicate(property))
            .collect())
    }

    fn modify(
        &self,
        id: &PropertyId,
        mutation: &mut dyn FnMut(&mut Property),
    ) -> Result<Option<Property>, RepositoryError> {
        let mut guard = self.lock()?;
        let Some(record) = guard.iter_mut().find(|property| &property.id == id) else {
            return Ok(None);
        };
        mutation(record);
        Ok(Some(record.clone()))
    }

    fn len(&self) -> Result<usize, RepositoryError> {
        Ok(self.lock()?.len())
    }
}
