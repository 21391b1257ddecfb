//! Public routes: listing, search, post detail, and the about page.

use axum::{
    Extension,
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Redirect, Response},
};
use serde::Deserialize;
use tower_sessions::Session;
use tracing::error;
use uuid::Uuid;

use crate::application::posts::SearchOutcome;
use crate::presentation::views::{
    AboutTemplate, ChromeView, ListingTemplate, PostDetailTemplate, PostView,
    render_template_response,
};

use super::{
    HttpState,
    session::{self, CurrentUser, FlashError},
};

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub(super) struct ListingQuery {
    search: Option<String>,
}

pub(super) async fn home() -> Redirect {
    Redirect::to("/posts")
}

pub(super) async fn list_posts(
    State(state): State<HttpState>,
    Extension(current_user): Extension<CurrentUser>,
    Extension(flash): Extension<FlashError>,
    session: Session,
    Query(query): Query<ListingQuery>,
) -> Response {
    let chrome = ChromeView::from_user(current_user.0.as_ref());
    let flash_error = flash.0;

    if let Some(term) = query.search.as_deref().filter(|term| !term.is_empty()) {
        return match state.posts.search(term).await {
            Ok(SearchOutcome::Matches(posts)) => render_template_response(
                ListingTemplate::new(chrome, posts, flash_error, Some(term.to_string())),
                StatusCode::OK,
            ),
            Ok(SearchOutcome::NoMatches) => {
                session::set_flash_error(
                    &session,
                    "Sorry, no blog entries match your query. Please try again",
                )
                .await;
                Redirect::to("/posts").into_response()
            }
            Err(err) => {
                error!(target = "foglio::http", error = %err, "post search failed");
                Redirect::to("/posts").into_response()
            }
        };
    }

    match state.posts.list().await {
        Ok(posts) => render_template_response(
            ListingTemplate::new(chrome, posts, flash_error, None),
            StatusCode::OK,
        ),
        Err(err) => {
            // The listing is the fallback target for every other failure, so
            // redirecting here would loop; render the empty page instead.
            error!(target = "foglio::http", error = %err, "post listing failed");
            render_template_response(
                ListingTemplate::new(chrome, Vec::new(), flash_error, None),
                StatusCode::OK,
            )
        }
    }
}

pub(super) async fn show_post(
    State(state): State<HttpState>,
    Extension(current_user): Extension<CurrentUser>,
    Path(id): Path<String>,
) -> Response {
    let Ok(id) = Uuid::parse_str(&id) else {
        return Redirect::to("/posts").into_response();
    };

    let post = match state.posts.fetch(id).await {
        Ok(Some(post)) => post,
        Ok(None) => return Redirect::to("/posts").into_response(),
        Err(err) => {
            error!(target = "foglio::http", error = %err, %id, "post lookup failed");
            return Redirect::to("/posts").into_response();
        }
    };

    // The detail page also shows the full list as a related-posts sidebar.
    match state.posts.list().await {
        Ok(posts) => render_template_response(
            PostDetailTemplate::new(
                ChromeView::from_user(current_user.0.as_ref()),
                PostView::from_record(&post),
                posts,
            ),
            StatusCode::OK,
        ),
        Err(err) => {
            error!(target = "foglio::http", error = %err, "post listing failed");
            Redirect::to("/posts").into_response()
        }
    }
}

pub(super) async fn about(Extension(current_user): Extension<CurrentUser>) -> Response {
    render_template_response(
        AboutTemplate::new(ChromeView::from_user(current_user.0.as_ref())),
        StatusCode::OK,
    )
}
