//! Session-backed request context: current user and flash messages.

use axum::{body::Body, extract::State, http::Request, middleware::Next, response::Response};
use tower_sessions::Session;
use tracing::warn;
use uuid::Uuid;

use crate::domain::entities::UserRecord;

use super::HttpState;

const USER_ID_KEY: &str = "user_id";
const FLASH_ERROR_KEY: &str = "flash.error";

/// The authenticated user for this request, if any. Populated once per
/// request by [`resolve_current_user`]; handlers read it as an extension.
#[derive(Debug, Clone, Default)]
pub struct CurrentUser(pub Option<UserRecord>);

impl CurrentUser {
    pub fn admin(&self) -> Option<&UserRecord> {
        self.0.as_ref().filter(|user| user.is_admin)
    }
}

/// The flash message pending for this request, if any. Consumed from the
/// session once per request, whether or not the handler displays it.
#[derive(Debug, Clone, Default)]
pub struct FlashError(pub Option<String>);

pub async fn resolve_current_user(
    State(state): State<HttpState>,
    session: Session,
    mut request: Request<Body>,
    next: Next,
) -> Response {
    let user = match session.get::<Uuid>(USER_ID_KEY).await {
        Ok(Some(id)) => match state.accounts.fetch(id).await {
            Ok(user) => user,
            Err(err) => {
                warn!(
                    target = "foglio::http",
                    error = %err,
                    "failed to resolve session user",
                );
                None
            }
        },
        Ok(None) => None,
        Err(err) => {
            warn!(target = "foglio::http", error = %err, "failed to read session");
            None
        }
    };

    request.extensions_mut().insert(CurrentUser(user));
    request
        .extensions_mut()
        .insert(FlashError(take_flash_error(&session).await));
    next.run(request).await
}

/// Bind the session to a freshly authenticated user.
pub async fn log_in(session: &Session, user_id: Uuid) {
    if let Err(err) = session.cycle_id().await {
        warn!(target = "foglio::http", error = %err, "failed to cycle session id");
    }
    if let Err(err) = session.insert(USER_ID_KEY, user_id).await {
        warn!(target = "foglio::http", error = %err, "failed to persist session user");
    }
}

pub async fn log_out(session: &Session) {
    if let Err(err) = session.flush().await {
        warn!(target = "foglio::http", error = %err, "failed to destroy session");
    }
}

pub async fn set_flash_error(session: &Session, message: &str) {
    if let Err(err) = session.insert(FLASH_ERROR_KEY, message).await {
        warn!(target = "foglio::http", error = %err, "failed to store flash message");
    }
}

/// Read and discard the pending flash error, if any.
async fn take_flash_error(session: &Session) -> Option<String> {
    match session.remove::<String>(FLASH_ERROR_KEY).await {
        Ok(message) => message,
        Err(err) => {
            warn!(target = "foglio::http", error = %err, "failed to read flash message");
            None
        }
    }
}
