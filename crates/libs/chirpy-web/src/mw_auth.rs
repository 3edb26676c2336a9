//! Authentication middleware for protecting routes.

use crate::prelude::*;
use axum::{extract::Request, middleware::Next, response::Response};

use super::ctx::Ctx;

/// Middleware that requires authentication for a route.
///
/// Rejects the request unless [`mw_ctx_resolver`](crate::ctx::resolver::mw_ctx_resolver)
/// resolved a valid context for it. The rejection is the same whatever the
/// reason the token was refused.
///
/// # Examples
///
/// ```rust,no_run
/// use axum::{Router, routing::get};
/// use chirpy_web::mw_auth::mw_require_auth;
///
/// let app: Router<()> = Router::new()
///     .route("/protected", get(protected_handler))
///     .route_layer(axum::middleware::from_fn(mw_require_auth));
///
/// async fn protected_handler() -> &'static str {
///     "This requires authentication"
/// }
/// ```
pub async fn mw_require_auth(ctx: Result<Ctx>, req: Request, next: Next) -> Result<Response> {
    ctx?;
    Ok(next.run(req).await)
}
