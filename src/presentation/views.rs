use askama::{Error as AskamaError, Template};
use axum::{
    http::StatusCode,
    response::{Html, IntoResponse, Response},
};
use thiserror::Error;
use time::{format_description::FormatItem, macros::format_description};

use crate::application::error::HttpError;
use crate::domain::entities::{PostRecord, UserRecord};

#[derive(Debug, Error)]
#[error("{public_message}")]
pub struct TemplateRenderError {
    pub(crate) source: &'static str,
    pub(crate) public_message: &'static str,
    #[source]
    pub(crate) error: AskamaError,
}

impl From<TemplateRenderError> for HttpError {
    fn from(err: TemplateRenderError) -> Self {
        let TemplateRenderError {
            source,
            public_message,
            error,
        } = err;

        HttpError::from_error(
            source,
            StatusCode::INTERNAL_SERVER_ERROR,
            public_message,
            &error,
        )
    }
}

pub fn render_template<T: Template>(template: T) -> Result<Html<String>, HttpError> {
    template.render().map(Html).map_err(|err| {
        TemplateRenderError {
            source: "presentation::views::render_template",
            public_message: "Template rendering failed",
            error: err,
        }
        .into()
    })
}

pub fn render_template_response<T: Template>(template: T, status: StatusCode) -> Response {
    match render_template(template) {
        Ok(html) => (status, html).into_response(),
        Err(err) => err.into_response(),
    }
}

/// Per-request page furniture shared by every template.
#[derive(Clone)]
pub struct ChromeView {
    pub current_user: Option<UserChromeView>,
}

#[derive(Clone)]
pub struct UserChromeView {
    pub username: String,
    pub is_admin: bool,
}

impl ChromeView {
    pub fn from_user(user: Option<&UserRecord>) -> Self {
        Self {
            current_user: user.map(|user| UserChromeView {
                username: user.username.clone(),
                is_admin: user.is_admin,
            }),
        }
    }
}

const CREATED_FORMAT: &[FormatItem<'static>] =
    format_description!("[month repr:long] [day padding:none], [year]");

#[derive(Clone)]
pub struct PostView {
    pub id: String,
    pub title: String,
    /// Already sanitized; rendered without further escaping.
    pub description: String,
    pub image: String,
    pub created: String,
}

impl PostView {
    pub fn from_record(record: &PostRecord) -> Self {
        Self {
            id: record.id.to_string(),
            title: record.title.clone(),
            description: record.description.clone(),
            image: record.image.clone(),
            created: record
                .created_at
                .format(CREATED_FORMAT)
                .unwrap_or_else(|_| record.created_at.to_string()),
        }
    }

    fn from_records(records: &[PostRecord]) -> Vec<Self> {
        records.iter().map(Self::from_record).collect()
    }
}

#[derive(Template)]
#[template(path = "index.html")]
pub struct ListingTemplate {
    pub chrome: ChromeView,
    pub posts: Vec<PostView>,
    pub flash_error: Option<String>,
    pub search: Option<String>,
}

impl ListingTemplate {
    pub fn new(
        chrome: ChromeView,
        posts: Vec<PostRecord>,
        flash_error: Option<String>,
        search: Option<String>,
    ) -> Self {
        Self {
            chrome,
            posts: PostView::from_records(&posts),
            flash_error,
            search,
        }
    }
}

#[derive(Template)]
#[template(path = "show.html")]
pub struct PostDetailTemplate {
    pub chrome: ChromeView,
    pub post: PostView,
    pub posts: Vec<PostView>,
}

impl PostDetailTemplate {
    pub fn new(chrome: ChromeView, post: PostView, posts: Vec<PostRecord>) -> Self {
        Self {
            chrome,
            post,
            posts: PostView::from_records(&posts),
        }
    }
}

#[derive(Template)]
#[template(path = "new.html")]
pub struct NewPostTemplate {
    pub chrome: ChromeView,
}

impl NewPostTemplate {
    pub fn new(chrome: ChromeView) -> Self {
        Self { chrome }
    }
}

#[derive(Template)]
#[template(path = "edit.html")]
pub struct EditPostTemplate {
    pub chrome: ChromeView,
    pub post: PostView,
}

impl EditPostTemplate {
    pub fn new(chrome: ChromeView, post: PostView) -> Self {
        Self { chrome, post }
    }
}

#[derive(Template)]
#[template(path = "about.html")]
pub struct AboutTemplate {
    pub chrome: ChromeView,
}

impl AboutTemplate {
    pub fn new(chrome: ChromeView) -> Self {
        Self { chrome }
    }
}

#[derive(Template)]
#[template(path = "register.html")]
pub struct RegisterTemplate {
    pub chrome: ChromeView,
}

impl RegisterTemplate {
    pub fn new(chrome: ChromeView) -> Self {
        Self { chrome }
    }
}

#[derive(Template)]
#[template(path = "login.html")]
pub struct LoginTemplate {
    pub chrome: ChromeView,
}

impl LoginTemplate {
    pub fn new(chrome: ChromeView) -> Self {
        Self { chrome }
    }
}
