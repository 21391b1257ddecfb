use async_trait::async_trait;
use uuid::Uuid;

use crate::application::repos::{PostContent, PostsRepo, RepoError};
use crate::domain::entities::PostRecord;

use super::{PostgresRepositories, util::map_sqlx_error};

const POST_COLUMNS: &str = "id, title, description, image, created_at";

#[async_trait]
impl PostsRepo for PostgresRepositories {
    async fn list_posts(&self) -> Result<Vec<PostRecord>, RepoError> {
        sqlx::query_as::<_, PostRecord>(&format!(
            "SELECT {POST_COLUMNS} FROM posts ORDER BY created_at DESC"
        ))
        .fetch_all(self.pool())
        .await
        .map_err(map_sqlx_error)
    }

    async fn search_posts(&self, pattern: &str) -> Result<Vec<PostRecord>, RepoError> {
        sqlx::query_as::<_, PostRecord>(&format!(
            "SELECT {POST_COLUMNS} FROM posts \
             WHERE title ~* $1 OR description ~* $1 \
             ORDER BY created_at DESC"
        ))
        .bind(pattern)
        .fetch_all(self.pool())
        .await
        .map_err(map_sqlx_error)
    }

    async fn find_post(&self, id: Uuid) -> Result<Option<PostRecord>, RepoError> {
        sqlx::query_as::<_, PostRecord>(&format!(
            "SELECT {POST_COLUMNS} FROM posts WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(self.pool())
        .await
        .map_err(map_sqlx_error)
    }

    async fn create_post(&self, content: PostContent) -> Result<PostRecord, RepoError> {
        sqlx::query_as::<_, PostRecord>(&format!(
            "INSERT INTO posts (title, description, image) \
             VALUES ($1, $2, $3) \
             RETURNING {POST_COLUMNS}"
        ))
        .bind(&content.title)
        .bind(&content.description)
        .bind(&content.image)
        .fetch_one(self.pool())
        .await
        .map_err(map_sqlx_error)
    }

    async fn update_post(&self, id: Uuid, content: PostContent) -> Result<PostRecord, RepoError> {
        sqlx::query_as::<_, PostRecord>(&format!(
            "UPDATE posts SET title = $2, description = $3, image = $4 \
             WHERE id = $1 \
             RETURNING {POST_COLUMNS}"
        ))
        .bind(id)
        .bind(&content.title)
        .bind(&content.description)
        .bind(&content.image)
        .fetch_optional(self.pool())
        .await
        .map_err(map_sqlx_error)?
        .ok_or(RepoError::NotFound)
    }

    async fn delete_post(&self, id: Uuid) -> Result<(), RepoError> {
        let result = sqlx::query("DELETE FROM posts WHERE id = $1")
            .bind(id)
            .execute(self.pool())
            .await
            .map_err(map_sqlx_error)?;
        if result.rows_affected() == 0 {
            return Err(RepoError::NotFound);
        }
        Ok(())
    }
}
