//! Bearer token 検証 → AuthCtx を extensions に入れる
//!
//! This middleware never rejects a request on its own:
//! - no Authorization header / wrong scheme → continue unauthenticated
//! - verification failure → continue unauthenticated
//!
//! Handlers that require identity take `AuthCtxExtractor`, whose rejection
//! is 401. Extensions live exactly one request, so the installed identity
//! cannot leak across requests.

use axum::{
    Router,
    body::Body,
    extract::State,
    http::{HeaderMap, Request, header},
    middleware::{self, Next},
    response::Response,
};

use crate::api::v1::extractors::AuthCtx;
use crate::state::AppState;

/// Apply bearer authentication to the given router.
///
/// 例：
/// ```ignore
/// let v1 = api::v1::routes();
/// let v1 = middleware::bearer_auth::apply(v1, state.clone());
/// ```
pub fn apply(router: Router<AppState>, state: AppState) -> Router<AppState> {
    // axum 0.8 の from_fn は State extractor を受け取れないため、`from_fn_with_state` で明示的に state を渡す
    router.layer(middleware::from_fn_with_state(state, bearer_auth_middleware))
}

async fn bearer_auth_middleware(
    State(state): State<AppState>,
    mut req: Request<Body>,
    next: Next,
) -> Response {
    if let Some(token) = resolve_bearer(req.headers()) {
        match state.jwt.verify(token) {
            Some(user_id) => {
                // middleware → extractor への受け渡し
                req.extensions_mut().insert(AuthCtx::new(user_id));
            }
            None => {
                tracing::debug!("access token verification failed");
            }
        }
    }

    next.run(req).await
}

/// Extract the bearer credential from the Authorization header.
///
/// Absence or a malformed prefix is treated as "no credential", not an
/// error. The scheme match is exact (`Bearer ` with a single space).
fn resolve_bearer(headers: &HeaderMap) -> Option<&str> {
    headers
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.strip_prefix("Bearer "))
}
