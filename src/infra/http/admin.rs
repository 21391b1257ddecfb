//! Admin-gated authoring routes: create, edit, update, delete.

use axum::{
    Extension, Form,
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Redirect, Response},
};
use serde::Deserialize;
use tracing::{error, info, warn};
use uuid::Uuid;

use crate::application::posts::PostDraft;
use crate::application::repos::RepoError;
use crate::presentation::views::{
    ChromeView, EditPostTemplate, NewPostTemplate, PostView, render_template_response,
};

use super::{HttpState, session::CurrentUser};

/// The authorization gate. Passes for an authenticated admin; everyone else
/// is sent home with no explanation beyond a log line. All-or-nothing.
fn authorize(current_user: &CurrentUser) -> Result<(), Response> {
    if current_user.admin().is_some() {
        return Ok(());
    }
    warn!(target = "foglio::http", "admin route refused");
    Err(Redirect::to("/").into_response())
}

#[derive(Debug, Deserialize)]
pub(super) struct PostForm {
    title: String,
    description: String,
    #[serde(default)]
    image: String,
}

impl From<PostForm> for PostDraft {
    fn from(form: PostForm) -> Self {
        PostDraft {
            title: form.title,
            description: form.description,
            image: form.image,
        }
    }
}

pub(super) async fn new_post_form(
    Extension(current_user): Extension<CurrentUser>,
) -> Response {
    if let Err(deny) = authorize(&current_user) {
        return deny;
    }
    render_template_response(
        NewPostTemplate::new(ChromeView::from_user(current_user.0.as_ref())),
        StatusCode::OK,
    )
}

pub(super) async fn create_post(
    State(state): State<HttpState>,
    Extension(current_user): Extension<CurrentUser>,
    Form(form): Form<PostForm>,
) -> Response {
    if let Err(deny) = authorize(&current_user) {
        return deny;
    }

    match state.posts.create(form.into()).await {
        Ok(post) => {
            info!(target = "foglio::http", id = %post.id, "post created");
            Redirect::to("/posts").into_response()
        }
        Err(err) => {
            error!(target = "foglio::http", error = %err, "post creation failed");
            render_template_response(
                NewPostTemplate::new(ChromeView::from_user(current_user.0.as_ref())),
                StatusCode::OK,
            )
        }
    }
}

pub(super) async fn edit_post_form(
    State(state): State<HttpState>,
    Extension(current_user): Extension<CurrentUser>,
    Path(id): Path<String>,
) -> Response {
    if let Err(deny) = authorize(&current_user) {
        return deny;
    }
    let Ok(id) = Uuid::parse_str(&id) else {
        return Redirect::to("/posts").into_response();
    };

    match state.posts.fetch(id).await {
        Ok(Some(post)) => render_template_response(
            EditPostTemplate::new(
                ChromeView::from_user(current_user.0.as_ref()),
                PostView::from_record(&post),
            ),
            StatusCode::OK,
        ),
        Ok(None) => Redirect::to("/posts").into_response(),
        Err(err) => {
            error!(target = "foglio::http", error = %err, %id, "post lookup failed");
            Redirect::to("/posts").into_response()
        }
    }
}

pub(super) async fn update_post(
    State(state): State<HttpState>,
    Extension(current_user): Extension<CurrentUser>,
    Path(id): Path<String>,
    Form(form): Form<PostForm>,
) -> Response {
    if let Err(deny) = authorize(&current_user) {
        return deny;
    }
    let Ok(id) = Uuid::parse_str(&id) else {
        return Redirect::to("/posts").into_response();
    };

    match state.posts.update(id, form.into()).await {
        Ok(_) => Redirect::to(&format!("/posts/{id}")).into_response(),
        Err(err) => {
            error!(target = "foglio::http", error = %err, %id, "post update failed");
            Redirect::to("/posts").into_response()
        }
    }
}

pub(super) async fn delete_post(
    State(state): State<HttpState>,
    Extension(current_user): Extension<CurrentUser>,
    Path(id): Path<String>,
) -> Response {
    if let Err(deny) = authorize(&current_user) {
        return deny;
    }
    let Ok(id) = Uuid::parse_str(&id) else {
        return Redirect::to("/posts").into_response();
    };

    // Success and failure both land on the listing; failure is log-only.
    match state.posts.remove(id).await {
        Ok(()) => info!(target = "foglio::http", %id, "post deleted"),
        Err(RepoError::NotFound) => {
            warn!(target = "foglio::http", %id, "delete of missing post");
        }
        Err(err) => {
            error!(target = "foglio::http", error = %err, %id, "post deletion failed");
        }
    }
    Redirect::to("/posts").into_response()
}
