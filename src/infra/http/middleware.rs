use std::time::Instant;

use axum::{
    body::Body,
    http::{Method, Request, StatusCode, header::CONTENT_TYPE},
    middleware::Next,
    response::{IntoResponse, Response},
};
use http_body_util::BodyExt;
use tracing::{error, warn};
use uuid::Uuid;

use crate::application::error::ErrorReport;

#[derive(Clone)]
pub struct RequestContext {
    pub request_id: String,
}

pub async fn set_request_context(mut request: Request<Body>, next: Next) -> Response {
    let request_id = Uuid::new_v4().to_string();
    let ctx = RequestContext {
        request_id: request_id.clone(),
    };
    request.extensions_mut().insert(ctx.clone());

    let mut response = next.run(request).await;
    response.extensions_mut().insert(ctx);
    response
}

pub async fn log_responses(request: Request<Body>, next: Next) -> Response {
    let method = request.method().clone();
    let uri = request.uri().clone();
    let start = Instant::now();

    let request_id = request
        .extensions()
        .get::<RequestContext>()
        .map(|ctx| ctx.request_id.clone())
        .unwrap_or_default();

    let mut response = next.run(request).await;
    let status = response.status();

    if status.is_client_error() || status.is_server_error() {
        let elapsed_ms = start.elapsed().as_millis();
        let report = response.extensions_mut().remove::<ErrorReport>();
        let (source, messages) = match report {
            Some(report) => (report.source, report.messages),
            None => ("unknown", Vec::new()),
        };
        let detail = messages
            .first()
            .cloned()
            .unwrap_or_else(|| "no diagnostic available".to_string());

        if status.is_server_error() {
            error!(
                target = "foglio::http::response",
                status = status.as_u16(),
                method = %method,
                path = %uri.path(),
                query = uri.query().unwrap_or(""),
                elapsed_ms = elapsed_ms,
                source = source,
                detail = %detail,
                chain = ?messages,
                request_id = request_id,
                "request failed",
            );
        } else {
            warn!(
                target = "foglio::http::response",
                status = status.as_u16(),
                method = %method,
                path = %uri.path(),
                query = uri.query().unwrap_or(""),
                elapsed_ms = elapsed_ms,
                source = source,
                detail = %detail,
                chain = ?messages,
                request_id = request_id,
                "client request error",
            );
        }
    }

    response
}

const METHOD_OVERRIDE_FIELD: &str = "_method";

/// Rewrite POST form submissions carrying a `_method` field into the PUT or
/// DELETE request they stand for. HTML forms can only submit GET and POST.
pub async fn override_method(request: Request<Body>, next: Next) -> Response {
    if request.method() != Method::POST || !is_form_urlencoded(&request) {
        return next.run(request).await;
    }

    let (parts, body) = request.into_parts();
    let bytes = match body.collect().await {
        Ok(collected) => collected.to_bytes(),
        Err(err) => {
            warn!(
                target = "foglio::http",
                error = %err,
                "failed to buffer form body for method override",
            );
            return StatusCode::BAD_REQUEST.into_response();
        }
    };

    let mut request = Request::from_parts(parts, Body::from(bytes.clone()));
    if let Some(method) = override_from_form(&bytes) {
        *request.method_mut() = method;
    }
    next.run(request).await
}

fn is_form_urlencoded(request: &Request<Body>) -> bool {
    request
        .headers()
        .get(CONTENT_TYPE)
        .and_then(|value| value.to_str().ok())
        .is_some_and(|value| value.starts_with("application/x-www-form-urlencoded"))
}

fn override_from_form(bytes: &[u8]) -> Option<Method> {
    url::form_urlencoded::parse(bytes)
        .find(|(key, _)| key == METHOD_OVERRIDE_FIELD)
        .and_then(|(_, value)| match value.to_ascii_uppercase().as_str() {
            "PUT" => Some(Method::PUT),
            "DELETE" => Some(Method::DELETE),
            _ => None,
        })
}

#[cfg(test)]
mod tests {
    use axum::http::Method;

    use super::override_from_form;

    #[test]
    fn recognizes_put_and_delete() {
        assert_eq!(
            override_from_form(b"title=T&_method=PUT"),
            Some(Method::PUT)
        );
        assert_eq!(override_from_form(b"_method=delete"), Some(Method::DELETE));
    }

    #[test]
    fn ignores_other_values() {
        assert_eq!(override_from_form(b"title=T"), None);
        assert_eq!(override_from_form(b"_method=PATCH"), None);
        assert_eq!(override_from_form(b"_method="), None);
    }

    #[test]
    fn decodes_urlencoded_field_names() {
        assert_eq!(override_from_form(b"%5Fmethod=PUT"), Some(Method::PUT));
    }
}
