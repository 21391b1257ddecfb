//! Account registration and credential verification.

use std::sync::Arc;

use subtle::ConstantTimeEq;
use thiserror::Error;
use tracing::warn;
use uuid::Uuid;

use crate::application::password;
use crate::application::repos::{NewUserRecord, RepoError, UsersRepo};
use crate::domain::entities::UserRecord;

#[derive(Debug, Error)]
pub enum AccountError {
    #[error(transparent)]
    Repo(#[from] RepoError),
    #[error("password hashing failed: {0}")]
    Hash(String),
}

pub struct AccountService {
    users: Arc<dyn UsersRepo>,
    admin_secret: String,
}

impl AccountService {
    pub fn new(users: Arc<dyn UsersRepo>, admin_secret: String) -> Self {
        Self {
            users,
            admin_secret,
        }
    }

    /// Create an account. The admin flag is decided here, once, from the
    /// submitted secret; no exposed operation changes it afterwards.
    pub async fn register(
        &self,
        username: &str,
        password: &str,
        admin_field: &str,
    ) -> Result<UserRecord, AccountError> {
        let password_hash =
            password::hash(password).map_err(|err| AccountError::Hash(err.to_string()))?;
        let user = self
            .users
            .create_user(NewUserRecord {
                username: username.to_string(),
                password_hash,
                is_admin: secret_matches(&self.admin_secret, admin_field),
            })
            .await?;
        Ok(user)
    }

    /// `Some(user)` only when the username exists and the password matches.
    /// Unknown user and wrong password are indistinguishable to the caller.
    pub async fn verify_credentials(
        &self,
        username: &str,
        password: &str,
    ) -> Result<Option<UserRecord>, RepoError> {
        let Some(user) = self.users.find_user_by_username(username).await? else {
            return Ok(None);
        };
        match password::verify(password, &user.password_hash) {
            Ok(true) => Ok(Some(user)),
            Ok(false) => Ok(None),
            Err(err) => {
                warn!(
                    target = "foglio::accounts",
                    username = %user.username,
                    error = %err,
                    "stored password hash could not be parsed",
                );
                Ok(None)
            }
        }
    }

    pub async fn fetch(&self, id: Uuid) -> Result<Option<UserRecord>, RepoError> {
        self.users.find_user_by_id(id).await
    }
}

/// Exact match against the configured admin secret, in constant time.
fn secret_matches(secret: &str, submitted: &str) -> bool {
    let secret = secret.as_bytes();
    let submitted = submitted.as_bytes();
    submitted.len() == secret.len() && bool::from(submitted.ct_eq(secret))
}

#[cfg(test)]
mod tests {
    use super::secret_matches;

    #[test]
    fn exact_secret_grants() {
        assert!(secret_matches("letmein", "letmein"));
    }

    #[test]
    fn near_misses_do_not_grant() {
        assert!(!secret_matches("letmein", "letmein "));
        assert!(!secret_matches("letmein", "Letmein"));
        assert!(!secret_matches("letmein", "letmei"));
    }

    #[test]
    fn empty_submission_does_not_grant() {
        assert!(!secret_matches("letmein", ""));
    }
}
