use std::sync::Arc;

use chrono::{DateTime, Utc};
use tracing::info;

use super::domain::{InvalidValue, ModerationStatus, Property, PropertyId};
use super::store::{PropertyRepository, RepositoryError};
use crate::accounts::{User, UserId, UserRole};

/// Proof that the caller was authorized to moderate listings.
///
/// Only [`ModerationCapability::grant`] can build one, so every controller mutation carries
/// an explicit authorization check made at the boundary.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModerationCapability {
    actor: UserId,
}

impl ModerationCapability {
    pub fn grant(user: &User) -> Result<Self, ModerationError> {
        if user.role != UserRole::Admin {
            return Err(ModerationError::Forbidden {
                user_id: user.id.clone(),
                role: user.role,
            });
        }

        Ok(Self {
            actor: user.id.clone(),
        })
    }

    pub fn actor(&self) -> &UserId {
        &self.actor
    }
}

type Clock = Arc<dyn Fn() -> DateTime<Utc> + Send + Sync>;

/// Applies moderation status changes and verification toggles to stored listings.
///
/// Status transitions are unconstrained: pending, approved, and rejected may each move to
/// any other. Verification is independent of status.
pub struct ModerationController<R> {
    repository: Arc<R>,
    clock: Clock,
}

impl<R> Clone for ModerationController<R> {
    fn clone(&self) -> Self {
        Self {
            repository: Arc::clone(&self.repository),
            clock: Arc::clone(&self.clock),
        }
    }
}

impl<R> ModerationController<R>
where
    R: PropertyRepository + 'static,
{
    pub fn new(repository: Arc<R>) -> Self {
        Self::with_clock(repository, Utc::now)
    }

    pub fn with_clock<C>(repository: Arc<R>, clock: C) -> Self
    where
        C: Fn() -> DateTime<Utc> + Send + Sync + 'static,
    {
        Self {
            repository,
            clock: Arc::new(clock),
        }
    }

    /// Overwrite the status and notes of a listing.
    ///
    /// Passing `None` for `notes` clears any notes left by an earlier decision.
    pub fn set_moderation_status(
        &self,
        capability: &ModerationCapability,
        id: &PropertyId,
        status: ModerationStatus,
        notes: Option<String>,
    ) -> Result<Property, ModerationError> {
        let now = (self.clock)();
        let updated = self
            .repository
            .modify(id, &mut |property| {
                property.moderation_status = status;
                property.moderation_notes = notes.clone();
                property.touch(now);
            })?
            .ok_or_else(|| ModerationError::NotFound { id: id.clone() })?;

        info!(
            property_id = %id,
            actor = %capability.actor(),
            status = status.label(),
            has_notes = updated.moderation_notes.is_some(),
            "moderation status updated"
        );
        Ok(updated)
    }

    /// Flip the verified badge. Applying it twice restores the original value.
    pub fn toggle_verification(
        &self,
        capability: &ModerationCapability,
        id: &PropertyId,
    ) -> Result<Property, ModerationError> {
        let now = (self.clock)();
        let updated = self
            .repository
            .modify(id, &mut |property| {
                property.verified = !property.verified;
                property.touch(now);
            })?
            .ok_or_else(|| ModerationError::NotFound { id: id.clone() })?;

        info!(
            property_id = %id,
            actor = %capability.actor(),
            verified = updated.verified,
            "verification toggled"
        );
        Ok(updated)
    }
}

/// Error raised by the moderation controller.
#[derive(Debug, thiserror::Error)]
pub enum ModerationError {
    #[error("user {user_id} with role {role} may not moderate listings")]
    Forbidden { user_id: UserId, role: UserRole },
    #[error("property {id} not found")]
    NotFound { id: PropertyId },
    #[error(transparent)]
    Invalid(#[from] InvalidValue),
    #[error(transparent)]
    Repository(#[from] RepositoryError),
}
