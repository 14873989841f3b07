use std::str::FromStr;
use std::sync::{Arc, Mutex, MutexGuard};

use serde::Serialize;

use super::domain::{User, UserId, UserRole};
use crate::listings::{InvalidValue, RepositoryError};

/// In-memory account directory seeded at startup.
#[derive(Debug, Default, Clone)]
pub struct UserDirectory {
    users: Arc<Mutex<Vec<User>>>,
}

impl UserDirectory {
    pub fn new(users: Vec<User>) -> Self {
        Self {
            users: Arc::new(Mutex::new(users)),
        }
    }

    fn lock(&self) -> Result<MutexGuard<'_, Vec<User>>, RepositoryError> {
        self.users
            .lock()
            .map_err(|_| RepositoryError::Unavailable("user directory mutex poisoned".to_string()))
    }

    pub fn find_by_id(&self, id: &UserId) -> Result<Option<User>, RepositoryError> {
        Ok(self.lock()?.iter().find(|user| &user.id == id).cloned())
    }

    /// The signed-in demo session: the first seeded account.
    pub fn current_user(&self) -> Result<Option<User>, RepositoryError> {
        Ok(self.lock()?.first().cloned())
    }

    /// Case-insensitive match on name, email, or id, narrowed by role.
    pub fn search(&self, text: &str, role: RoleFilter) -> Result<Vec<User>, RepositoryError> {
        let needle = text.to_lowercase();
        Ok(self
            .lock()?
            .iter()
            .filter(|user| {
                let matches_text = user.name.to_lowercase().contains(&needle)
                    || user.email.to_lowercase().contains(&needle)
                    || user.id.as_str().to_lowercase().contains(&needle);
                matches_text && role.matches(user.role)
            })
            .cloned()
            .collect())
    }

    pub fn role_summary(&self) -> Result<RoleSummary, RepositoryError> {
        let guard = self.lock()?;
        let count = |role: UserRole| guard.iter().filter(|user| user.role == role).count();
        Ok(RoleSummary {
            total: guard.len(),
            admins: count(UserRole::Admin),
            agents: count(UserRole::Agent),
            users: count(UserRole::User),
        })
    }
}

/// Role chips on the admin users screen.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum RoleFilter {
    #[default]
    All,
    Only(UserRole),
}

impl RoleFilter {
    pub fn matches(self, role: UserRole) -> bool {
        match self {
            RoleFilter::All => true,
            RoleFilter::Only(expected) => expected == role,
        }
    }
}

impl FromStr for RoleFilter {
    type Err = InvalidValue;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        if raw.trim().eq_ignore_ascii_case("all") {
            return Ok(RoleFilter::All);
        }
        raw.parse::<UserRole>().map(RoleFilter::Only)
    }
}

/// Account counts shown on the admin dashboard.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct RoleSummary {
    pub total: usize,
    pub admins: usize,
    pub agents: usize,
    pub users: usize,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::seed::sample_users;

    #[test]
    fn current_user_is_the_seeded_admin() {
        let directory = UserDirectory::new(sample_users());
        let current = directory
            .current_user()
            .expect("directory readable")
            .expect("seeded user");
        assert_eq!(current.role, UserRole::Admin);
        assert_eq!(current.email, "john.smith@example.com");
    }

    #[test]
    fn search_matches_email_and_respects_role_filter() {
        let directory = UserDirectory::new(sample_users());

        let emily = directory
            .search("EMILY.johnson@", RoleFilter::All)
            .expect("directory readable");
        assert_eq!(emily.len(), 1);
        assert_eq!(emily[0].name, "Emily Johnson");

        let agents = directory
            .search("", "agent".parse().expect("valid role"))
            .expect("directory readable");
        let names: Vec<_> = agents.iter().map(|user| user.name.as_str()).collect();
        assert_eq!(names, ["Emily Johnson", "Michael Brown"]);

        let regular = directory
            .search("", RoleFilter::Only(UserRole::User))
            .expect("directory readable");
        assert!(regular.is_empty());
    }

    #[test]
    fn role_summary_counts_each_role() {
        let directory = UserDirectory::new(sample_users());
        let summary = directory.role_summary().expect("directory readable");
        assert_eq!(
            summary,
            RoleSummary {
                total: 3,
                admins: 1,
                agents: 2,
                users: 0,
            }
        );
    }

    #[test]
    fn role_filter_rejects_unknown_roles() {
        assert_eq!("ALL".parse::<RoleFilter>(), Ok(RoleFilter::All));
        assert!("owner".parse::<RoleFilter>().is_err());
    }
}
