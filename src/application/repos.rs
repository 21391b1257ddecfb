//! Repository traits describing persistence adapters.

use async_trait::async_trait;
use thiserror::Error;
use uuid::Uuid;

use crate::domain::entities::{PostRecord, UserRecord};

#[derive(Debug, Error)]
pub enum RepoError {
    #[error("persistence error: {0}")]
    Persistence(String),
    #[error("duplicate record violates unique constraint `{constraint}`")]
    Duplicate { constraint: String },
    #[error("resource not found")]
    NotFound,
    #[error("invalid input: {message}")]
    InvalidInput { message: String },
    #[error("database timeout")]
    Timeout,
}

impl RepoError {
    pub fn from_persistence(err: impl std::fmt::Display) -> Self {
        Self::Persistence(err.to_string())
    }
}

/// Writable fields of a post, shared by create and update.
#[derive(Debug, Clone, PartialEq)]
pub struct PostContent {
    pub title: String,
    pub description: String,
    pub image: String,
}

#[async_trait]
pub trait PostsRepo: Send + Sync {
    /// All posts, newest first.
    async fn list_posts(&self) -> Result<Vec<PostRecord>, RepoError>;

    /// Posts whose title or description matches `pattern`, a pre-escaped
    /// case-insensitive substring pattern.
    async fn search_posts(&self, pattern: &str) -> Result<Vec<PostRecord>, RepoError>;

    async fn find_post(&self, id: Uuid) -> Result<Option<PostRecord>, RepoError>;

    async fn create_post(&self, content: PostContent) -> Result<PostRecord, RepoError>;

    /// Replaces the writable fields; `NotFound` when no row has `id`.
    async fn update_post(&self, id: Uuid, content: PostContent) -> Result<PostRecord, RepoError>;

    /// `NotFound` when no row has `id`.
    async fn delete_post(&self, id: Uuid) -> Result<(), RepoError>;
}

#[derive(Debug, Clone)]
pub struct NewUserRecord {
    pub username: String,
    pub password_hash: String,
    pub is_admin: bool,
}

#[async_trait]
pub trait UsersRepo: Send + Sync {
    /// `Duplicate` when the username is already taken.
    async fn create_user(&self, user: NewUserRecord) -> Result<UserRecord, RepoError>;

    async fn find_user_by_id(&self, id: Uuid) -> Result<Option<UserRecord>, RepoError>;

    async fn find_user_by_username(&self, username: &str)
    -> Result<Option<UserRecord>, RepoError>;
}
