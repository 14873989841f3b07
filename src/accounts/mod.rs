//! Account directory and per-user favorites.

pub mod directory;
pub mod domain;
pub mod favorites;

pub use directory::{RoleFilter, RoleSummary, UserDirectory};
pub use domain::{User, UserId, UserRole};
pub use favorites::FavoritesRegistry;
