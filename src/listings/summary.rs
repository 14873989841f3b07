use serde::Serialize;

use super::domain::{ModerationStatus, Property};

/// Listing counts shown on the admin dashboard.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct ModerationSummary {
    pub total: usize,
    pub pending: usize,
    pub approved: usize,
    pub rejected: usize,
    pub verified: usize,
}

impl ModerationSummary {
    pub fn from_listings(listings: &[Property]) -> Self {
        listings
            .iter()
            .fold(Self::default(), |mut summary, property| {
                summary.total += 1;
                match property.moderation_status {
                    ModerationStatus::Pending => summary.pending += 1,
                    ModerationStatus::Approved => summary.approved += 1,
                    ModerationStatus::Rejected => summary.rejected += 1,
                }
                if property.verified {
                    summary.verified += 1;
                }
                summary
            })
    }
}
