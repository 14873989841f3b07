use std::str::FromStr;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use super::domain::{
    DealType, InvalidValue, ModerationStatus, Property, PropertyId, PropertyType,
};
use super::store::{PropertyRepository, RepositoryError};

/// Read-only views over the listing store.
///
/// Views are re-derived on every call and keep the store's insertion order. Nothing here
/// paginates or caches.
pub struct ListingQuery<R> {
    repository: Arc<R>,
}

impl<R> Clone for ListingQuery<R> {
    fn clone(&self) -> Self {
        Self {
            repository: Arc::clone(&self.repository),
        }
    }
}

impl<R> ListingQuery<R>
where
    R: PropertyRepository + 'static,
{
    pub fn new(repository: Arc<R>) -> Self {
        Self { repository }
    }

    pub fn find_by_id(&self, id: &PropertyId) -> Result<Option<Property>, RepositoryError> {
        self.repository.find_by_id(id)
    }

    /// Scan with an arbitrary predicate. It runs against a snapshot, so it may read the store.
    pub fn filter_by_predicate<F>(&self, predicate: F) -> Result<Vec<Property>, RepositoryError>
    where
        F: Fn(&Property) -> bool,
    {
        self.repository.scan(&predicate)
    }

    pub fn all(&self) -> Result<Vec<Property>, RepositoryError> {
        self.filter_by_predicate(|_| true)
    }

    pub fn featured(&self) -> Result<Vec<Property>, RepositoryError> {
        self.filter_by_predicate(|property| property.featured)
    }

    pub fn by_type(&self, kind: PropertyType) -> Result<Vec<Property>, RepositoryError> {
        self.filter_by_predicate(|property| property.property_type == kind)
    }

    pub fn by_deal_type(&self, deal: DealType) -> Result<Vec<Property>, RepositoryError> {
        self.filter_by_predicate(|property| property.deal_type == deal)
    }

    pub fn by_moderation_status(
        &self,
        status: ModerationStatus,
    ) -> Result<Vec<Property>, RepositoryError> {
        self.filter_by_predicate(|property| property.moderation_status == status)
    }

    pub fn verified(&self) -> Result<Vec<Property>, RepositoryError> {
        self.filter_by_predicate(|property| property.verified)
    }

    /// Free-text search across title, city, district, and type.
    pub fn search(&self, text: &str) -> Result<Vec<Property>, RepositoryError> {
        let needle = text.to_lowercase();
        self.filter_by_predicate(|property| matches_public_text(property, &needle))
    }

    /// Search as used by the browse screen: free text plus optional facets, all AND-ed.
    pub fn filter(&self, filter: &ListingFilter) -> Result<Vec<Property>, RepositoryError> {
        let needle = filter.query.as_deref().unwrap_or_default().to_lowercase();
        self.filter_by_predicate(|property| {
            matches_public_text(property, &needle) && filter.matches_facets(property)
        })
    }

    /// Admin listing search. Unlike [`ListingQuery::search`], district is not considered.
    pub fn admin_search(
        &self,
        text: &str,
        status: AdminStatusFilter,
    ) -> Result<Vec<Property>, RepositoryError> {
        let needle = text.to_lowercase();
        self.filter_by_predicate(|property| {
            let matches_text = contains(&property.title, &needle)
                || contains(&property.location.city, &needle)
                || contains(property.property_type.label(), &needle);
            matches_text && status.matches(property)
        })
    }
}

fn contains(haystack: &str, lowered_needle: &str) -> bool {
    haystack.to_lowercase().contains(lowered_needle)
}

fn matches_public_text(property: &Property, lowered_needle: &str) -> bool {
    lowered_needle.is_empty()
        || contains(&property.title, lowered_needle)
        || contains(&property.location.city, lowered_needle)
        || contains(&property.location.district, lowered_needle)
        || contains(property.property_type.label(), lowered_needle)
}

/// Browse filter built by the listing endpoint and CLI. Unset fields do not constrain.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ListingFilter {
    pub query: Option<String>,
    pub property_type: Option<PropertyType>,
    pub deal_type: Option<DealType>,
    pub status: Option<ModerationStatus>,
    pub verified: Option<bool>,
    pub featured: Option<bool>,
}

impl ListingFilter {
    fn matches_facets(&self, property: &Property) -> bool {
        self.property_type
            .map_or(true, |kind| property.property_type == kind)
            && self.deal_type.map_or(true, |deal| property.deal_type == deal)
            && self
                .status
                .map_or(true, |status| property.moderation_status == status)
            && self.verified.map_or(true, |flag| property.verified == flag)
            && self.featured.map_or(true, |flag| property.featured == flag)
    }
}

/// Status chips on the admin properties screen.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AdminStatusFilter {
    #[default]
    All,
    Verified,
    Pending,
    Approved,
    Rejected,
}

impl AdminStatusFilter {
    pub fn matches(self, property: &Property) -> bool {
        match self {
            AdminStatusFilter::All => true,
            AdminStatusFilter::Verified => property.verified,
            AdminStatusFilter::Pending => property.moderation_status == ModerationStatus::Pending,
            AdminStatusFilter::Approved => {
                property.moderation_status == ModerationStatus::Approved
            }
            AdminStatusFilter::Rejected => {
                property.moderation_status == ModerationStatus::Rejected
            }
        }
    }
}

impl FromStr for AdminStatusFilter {
    type Err = InvalidValue;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "all" => Ok(AdminStatusFilter::All),
            "verified" => Ok(AdminStatusFilter::Verified),
            other => other
                .parse::<ModerationStatus>()
                .map(AdminStatusFilter::from)
                .map_err(|_| InvalidValue::new("status filter", raw)),
        }
    }
}

impl From<ModerationStatus> for AdminStatusFilter {
    fn from(status: ModerationStatus) -> Self {
        match status {
            ModerationStatus::Pending => AdminStatusFilter::Pending,
            ModerationStatus::Approved => AdminStatusFilter::Approved,
            ModerationStatus::Rejected => AdminStatusFilter::Rejected,
        }
    }
}
