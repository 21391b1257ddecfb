mod admin;
mod auth;
mod middleware;
mod public;
mod session;

pub use session::CurrentUser;

use std::sync::Arc;

use axum::{
    Router,
    middleware::{from_fn, from_fn_with_state},
    routing::get,
};
use sha2::{Digest, Sha512};
use tower_sessions::{SessionManagerLayer, SessionStore, cookie::Key, service::CookieController};

use crate::application::{accounts::AccountService, posts::PostService};

use self::middleware::{log_responses, override_method, set_request_context};

#[derive(Clone)]
pub struct HttpState {
    pub posts: Arc<PostService>,
    pub accounts: Arc<AccountService>,
}

/// Derive the cookie-signing key from the configured secret. The digest
/// stretches arbitrary-length secrets to the 64 bytes the key requires.
pub fn session_signing_key(secret: &str) -> Key {
    let digest = Sha512::digest(secret.as_bytes());
    Key::from(digest.as_slice())
}

pub fn build_router<Store, C>(
    state: HttpState,
    sessions: SessionManagerLayer<Store, C>,
) -> Router
where
    Store: SessionStore + Clone,
    C: CookieController + Sync,
{
    Router::new()
        .route("/", get(public::home))
        .route("/posts", get(public::list_posts).post(admin::create_post))
        .route("/posts/new", get(admin::new_post_form))
        .route(
            "/posts/{id}",
            get(public::show_post)
                .put(admin::update_post)
                .delete(admin::delete_post),
        )
        .route("/posts/{id}/edit", get(admin::edit_post_form))
        .route("/about", get(public::about))
        .route("/register", get(auth::register_form).post(auth::register))
        .route("/login", get(auth::login_form).post(auth::login))
        .route("/logout", get(auth::logout))
        .with_state(state.clone())
        .layer(from_fn_with_state(state, session::resolve_current_user))
        .layer(sessions)
        .layer(from_fn(override_method))
        .layer(from_fn(log_responses))
        .layer(from_fn(set_request_context))
}
