//! Registration, login, and logout.

use axum::{
    Extension, Form,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Redirect, Response},
};
use serde::Deserialize;
use tower_sessions::Session;
use tracing::{error, info};

use crate::presentation::views::{
    ChromeView, LoginTemplate, RegisterTemplate, render_template_response,
};

use super::{
    HttpState,
    session::{self, CurrentUser},
};

#[derive(Debug, Deserialize)]
pub(super) struct RegisterForm {
    username: String,
    password: String,
    /// Compared against the configured admin secret; anything else leaves
    /// the account unprivileged.
    #[serde(default)]
    admin: String,
}

#[derive(Debug, Deserialize)]
pub(super) struct LoginForm {
    username: String,
    password: String,
}

pub(super) async fn register_form(Extension(current_user): Extension<CurrentUser>) -> Response {
    render_template_response(
        RegisterTemplate::new(ChromeView::from_user(current_user.0.as_ref())),
        StatusCode::OK,
    )
}

pub(super) async fn register(
    State(state): State<HttpState>,
    Extension(current_user): Extension<CurrentUser>,
    session: Session,
    Form(form): Form<RegisterForm>,
) -> Response {
    match state
        .accounts
        .register(&form.username, &form.password, &form.admin)
        .await
    {
        Ok(user) => {
            info!(
                target = "foglio::http",
                username = %user.username,
                is_admin = user.is_admin,
                "account registered",
            );
            session::log_in(&session, user.id).await;
            Redirect::to("/").into_response()
        }
        Err(err) => {
            error!(target = "foglio::http", error = %err, "registration failed");
            render_template_response(
                RegisterTemplate::new(ChromeView::from_user(current_user.0.as_ref())),
                StatusCode::OK,
            )
        }
    }
}

pub(super) async fn login_form(Extension(current_user): Extension<CurrentUser>) -> Response {
    render_template_response(
        LoginTemplate::new(ChromeView::from_user(current_user.0.as_ref())),
        StatusCode::OK,
    )
}

pub(super) async fn login(
    State(state): State<HttpState>,
    session: Session,
    Form(form): Form<LoginForm>,
) -> Response {
    match state
        .accounts
        .verify_credentials(&form.username, &form.password)
        .await
    {
        Ok(Some(user)) => {
            session::log_in(&session, user.id).await;
            Redirect::to("/").into_response()
        }
        // Unknown user and wrong password land in the same place.
        Ok(None) => Redirect::to("/login").into_response(),
        Err(err) => {
            error!(target = "foglio::http", error = %err, "credential check failed");
            Redirect::to("/login").into_response()
        }
    }
}

pub(super) async fn logout(session: Session) -> Response {
    session::log_out(&session).await;
    Redirect::to("/").into_response()
}
