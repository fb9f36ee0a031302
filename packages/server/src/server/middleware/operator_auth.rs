use axum::{
    extract::{Extension, Request},
    http::HeaderMap,
    middleware::Next,
    response::{IntoResponse, Response},
};
use tracing::debug;

use crate::domains::operators::{require_moderator, Operator};
use crate::server::app::AxumAppState;

/// Header carrying the operator's API key
pub const AUTH_KEY_HEADER: &str = "Auth-Key";

/// Moderator resolved from the `Auth-Key` header
#[derive(Clone, Debug)]
pub struct AuthOperator(pub Operator);

/// Raw `Auth-Key` value, if present and valid UTF-8
pub fn extract_auth_key(headers: &HeaderMap) -> Option<&str> {
    headers.get(AUTH_KEY_HEADER)?.to_str().ok()
}

/// Moderator gate for the admin routes.
///
/// Missing, unknown and non-moderator keys are all rejected with 401. On
/// success the operator is added to the request extensions as
/// [`AuthOperator`].
pub async fn moderator_auth_middleware(
    Extension(state): Extension<AxumAppState>,
    mut request: Request,
    next: Next,
) -> Response {
    let operator = require_moderator(
        extract_auth_key(request.headers()),
        state.deps.operators.as_ref(),
    )
    .await;

    match operator {
        Ok(operator) => {
            debug!(operator = %operator.name, "Authenticated moderator");
            request.extensions_mut().insert(AuthOperator(operator));
            next.run(request).await
        }
        Err(e) => e.into_response(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    #[test]
    fn test_extract_auth_key() {
        let mut headers = HeaderMap::new();
        assert_eq!(extract_auth_key(&headers), None);

        headers.insert("auth-key", HeaderValue::from_static("abcDEF"));
        assert_eq!(extract_auth_key(&headers), Some("abcDEF"));
    }

    #[test]
    fn test_non_utf8_key_is_ignored() {
        let mut headers = HeaderMap::new();
        headers.insert(
            AUTH_KEY_HEADER,
            HeaderValue::from_bytes(&[0xff, 0xfe]).unwrap(),
        );
        assert_eq!(extract_auth_key(&headers), None);
    }
}
