use async_trait::async_trait;
use uuid::Uuid;

use crate::application::repos::{NewUserRecord, RepoError, UsersRepo};
use crate::domain::entities::UserRecord;

use super::{PostgresRepositories, util::map_sqlx_error};

const USER_COLUMNS: &str = "id, username, password_hash, is_admin, created_at";

#[async_trait]
impl UsersRepo for PostgresRepositories {
    async fn create_user(&self, user: NewUserRecord) -> Result<UserRecord, RepoError> {
        sqlx::query_as::<_, UserRecord>(&format!(
            "INSERT INTO users (username, password_hash, is_admin) \
             VALUES ($1, $2, $3) \
             RETURNING {USER_COLUMNS}"
        ))
        .bind(&user.username)
        .bind(&user.password_hash)
        .bind(user.is_admin)
        .fetch_one(self.pool())
        .await
        .map_err(map_sqlx_error)
    }

    async fn find_user_by_id(&self, id: Uuid) -> Result<Option<UserRecord>, RepoError> {
        sqlx::query_as::<_, UserRecord>(&format!(
            "SELECT {USER_COLUMNS} FROM users WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(self.pool())
        .await
        .map_err(map_sqlx_error)
    }

    async fn find_user_by_username(
        &self,
        username: &str,
    ) -> Result<Option<UserRecord>, RepoError> {
        sqlx::query_as::<_, UserRecord>(&format!(
            "SELECT {USER_COLUMNS} FROM users WHERE username = $1"
        ))
        .bind(username)
        .fetch_optional(self.pool())
        .await
        .map_err(map_sqlx_error)
    }
}
