//! Post listing, search, and authoring operations.

use std::sync::Arc;

use uuid::Uuid;

use crate::application::repos::{PostContent, PostsRepo, RepoError};
use crate::domain::entities::PostRecord;
use crate::domain::search::escape_pattern;

/// Submitted post fields before sanitization.
#[derive(Debug, Clone)]
pub struct PostDraft {
    pub title: String,
    pub description: String,
    pub image: String,
}

impl PostDraft {
    /// The description accepts rich text, so it is run through the HTML
    /// sanitizer before it reaches the store.
    fn into_content(self) -> PostContent {
        PostContent {
            title: self.title,
            description: ammonia::clean(&self.description),
            image: self.image,
        }
    }
}

#[derive(Debug)]
pub enum SearchOutcome {
    Matches(Vec<PostRecord>),
    NoMatches,
}

pub struct PostService {
    posts: Arc<dyn PostsRepo>,
}

impl PostService {
    pub fn new(posts: Arc<dyn PostsRepo>) -> Self {
        Self { posts }
    }

    pub async fn list(&self) -> Result<Vec<PostRecord>, RepoError> {
        self.posts.list_posts().await
    }

    /// Case-insensitive literal substring search across title and
    /// description. Metacharacters in the raw term are escaped first, so a
    /// term like `C++` matches only posts containing `C++`.
    pub async fn search(&self, term: &str) -> Result<SearchOutcome, RepoError> {
        let pattern = escape_pattern(term);
        let matches = self.posts.search_posts(&pattern).await?;
        if matches.is_empty() {
            Ok(SearchOutcome::NoMatches)
        } else {
            Ok(SearchOutcome::Matches(matches))
        }
    }

    pub async fn fetch(&self, id: Uuid) -> Result<Option<PostRecord>, RepoError> {
        self.posts.find_post(id).await
    }

    pub async fn create(&self, draft: PostDraft) -> Result<PostRecord, RepoError> {
        self.posts.create_post(draft.into_content()).await
    }

    pub async fn update(&self, id: Uuid, draft: PostDraft) -> Result<PostRecord, RepoError> {
        self.posts.update_post(id, draft.into_content()).await
    }

    pub async fn remove(&self, id: Uuid) -> Result<(), RepoError> {
        self.posts.delete_post(id).await
    }
}

#[cfg(test)]
mod tests {
    use super::PostDraft;

    #[test]
    fn draft_sanitizes_description_markup() {
        let draft = PostDraft {
            title: "T".into(),
            description: "<p>fine</p><script>alert(1)</script>".into(),
            image: "https://example.test/cover.png".into(),
        };
        let content = draft.into_content();
        assert_eq!(content.description, "<p>fine</p>");
    }

    #[test]
    fn draft_keeps_title_and_image_untouched() {
        let draft = PostDraft {
            title: "<b>T</b>".into(),
            description: "D".into(),
            image: "https://example.test/cover.png".into(),
        };
        let content = draft.into_content();
        assert_eq!(content.title, "<b>T</b>");
        assert_eq!(content.image, "https://example.test/cover.png");
    }
}
