//! Listing catalog, moderation lifecycle, and account directory backing the Rentify
//! property browser and its admin surface.

pub mod accounts;
pub mod config;
pub mod error;
pub mod listings;
pub mod seed;
pub mod telemetry;
