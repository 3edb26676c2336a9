//! Context resolver for extracting the authenticated user from HTTP requests.

use axum::{
    body::Body,
    extract::{FromRequestParts, Request, State},
    http::{HeaderMap, request::Parts},
    middleware::Next,
    response::Response,
};
use chirpy_auth::{AUTH_HEADER, AUTH_HEADER_PREFIX, jwt::validate_jwt, signing_secret::SigningSecret};
use chirpy_models::db::connection::DbConnection;
use tower_cookies::{Cookie, Cookies};
use tracing::debug;

use crate::auth::{authenticate, token_lifetime};
use crate::ctx::{Ctx, ctx_user::CtxUser};
use crate::prelude::*;
use crate::user::{UserLogin, UserLoginRequest};

/// The name of the cookie used to store authentication tokens.
pub const AUTH_TOKEN_COOKIE: &str = "auth-token";

/// Pulls the bearer token out of the `Authorization` header.
fn bearer_token(headers: &HeaderMap) -> Option<String> {
    headers
        .get(AUTH_HEADER)
        .and_then(|h| h.to_str().ok())
        .and_then(|s| s.strip_prefix(AUTH_HEADER_PREFIX))
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
}

/// The auth cookie, scoped to the whole site so removal matches what login set.
fn auth_cookie(value: String) -> Cookie<'static> {
    Cookie::build((AUTH_TOKEN_COOKIE, value))
        .path("/")
        .http_only(true)
        .build()
}

/// Middleware for resolving request context from authentication tokens.
///
/// Takes the token from the `Authorization: Bearer` header, falling back to
/// the auth cookie, validates it and adds the resulting
/// `Result<Ctx, chirpy_auth::Error>` to the request extensions. A cookie
/// token that fails to resolve is removed; a bad header leaves the cookie
/// untouched. A request
/// that fails to resolve keeps going; routes that need a [`Ctx`] reject it.
///
/// # Examples
///
/// ```rust
/// use axum::Router;
/// use chirpy_auth::signing_secret::SigningSecret;
/// use chirpy_web::ctx::resolver::mw_ctx_resolver;
///
/// let secret = SigningSecret::new("MySuperSecret").unwrap();
/// let app: Router<()> = Router::new()
///     .layer(axum::middleware::from_fn_with_state(secret, mw_ctx_resolver));
/// ```
pub async fn mw_ctx_resolver(
    State(secret): State<SigningSecret>,
    cookies: Cookies,
    headers: HeaderMap,
    mut req: Request<Body>,
    next: Next,
) -> Response {
    let (token, from_cookie) = match bearer_token(&headers) {
        Some(token) => (Some(token), false),
        None => {
            let token = cookies.get(AUTH_TOKEN_COOKIE).map(|c| c.value().to_string());
            let from_cookie = token.is_some();
            (token, from_cookie)
        }
    };
    let ctx = token
        .ok_or(chirpy_auth::Error::TokenMissing)
        .and_then(|token| validate_jwt(&token, &secret))
        .map(Ctx::new);

    if let Err(err) = &ctx {
        debug!("Request context not resolved: {err}");
        if from_cookie {
            cookies.remove(auth_cookie(String::new()));
        }
    }
    req.extensions_mut().insert(ctx);

    next.run(req).await
}

/// Logs in a user and sets the authentication cookie.
///
/// Authenticates the credentials and issues a session token whose lifetime
/// is the requested one, capped at one hour.
///
/// # Examples
///
/// ```rust,no_run
/// use chirpy_auth::signing_secret::SigningSecret;
/// use chirpy_models::db::connection::DbConnection;
/// use chirpy_web::ctx::resolver::login_user;
/// use chirpy_web::user::UserLoginRequest;
/// use tower_cookies::Cookies;
///
/// # fn example(
/// #     secret: &SigningSecret,
/// #     connection: &DbConnection,
/// #     cookies: &Cookies,
/// # ) -> Result<(), Box<dyn std::error::Error>> {
/// let request = UserLoginRequest::new("saul@bettercall.com", "123456");
///
/// let login = login_user(&request, secret, connection, cookies)?;
/// println!("User {} logged in", login.id);
/// # Ok(())
/// # }
/// ```
pub fn login_user(
    auth: &UserLoginRequest,
    secret: &SigningSecret,
    connection: &DbConnection,
    cookies: &Cookies,
) -> Result<UserLogin> {
    let user = authenticate(auth, connection)?;
    let token = CtxUser { id: user.id }
        .generate_token(secret, token_lifetime(auth.expires_in_seconds))?;

    cookies.add(auth_cookie(token.access_token.clone()));

    Ok(UserLogin {
        id: user.id,
        created_at: user.created_at,
        updated_at: user.updated_at,
        email: user.email,
        token: token.access_token,
    })
}

impl<S: Send + Sync> FromRequestParts<S> for Ctx {
    type Rejection = Error;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self> {
        Ok(parts
            .extensions
            .get::<std::result::Result<Ctx, chirpy_auth::Error>>()
            .ok_or(Error::CtxMissing)?
            .clone()?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mw_auth::mw_require_auth;
    use axum::{
        Router,
        body::to_bytes,
        http::{Request, StatusCode, header},
        middleware,
        routing::get,
    };
    use chrono::TimeDelta;
    use tower::ServiceExt;
    use tower_cookies::CookieManagerLayer;
    use uuid::Uuid;

    fn secret() -> SigningSecret {
        SigningSecret::new("resolver-test-secret").unwrap()
    }

    async fn whoami(ctx: Ctx) -> String {
        ctx.user.id.to_string()
    }

    async fn open(ctx: Result<Ctx>) -> &'static str {
        if ctx.is_ok() { "known" } else { "anonymous" }
    }

    fn app() -> Router {
        Router::new()
            .route("/whoami", get(whoami))
            .route_layer(middleware::from_fn(mw_require_auth))
            .route("/open", get(open))
            .layer(middleware::from_fn_with_state(secret(), mw_ctx_resolver))
            .layer(CookieManagerLayer::new())
    }

    fn token_for(user_id: &Uuid, expires_in: TimeDelta, secret: &SigningSecret) -> String {
        chirpy_auth::jwt::make_jwt(user_id, secret, expires_in).unwrap()
    }

    async fn call(req: Request<Body>) -> (StatusCode, String) {
        let response = app().oneshot(req).await.unwrap();
        let status = response.status();
        let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, String::from_utf8(body.to_vec()).unwrap())
    }

    fn with_bearer(path: &str, token: &str) -> Request<Body> {
        Request::builder()
            .uri(path)
            .header(header::AUTHORIZATION, format!("Bearer {token}"))
            .body(Body::empty())
            .unwrap()
    }

    #[tokio::test]
    async fn bearer_token_resolves_the_user() {
        let user_id = Uuid::new_v4();
        let token = token_for(&user_id, TimeDelta::hours(1), &secret());

        let (status, body) = call(with_bearer("/whoami", &token)).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, user_id.to_string());
    }

    #[tokio::test]
    async fn cookie_token_resolves_the_user() {
        let user_id = Uuid::new_v4();
        let token = token_for(&user_id, TimeDelta::hours(1), &secret());
        let req = Request::builder()
            .uri("/whoami")
            .header(header::COOKIE, format!("{AUTH_TOKEN_COOKIE}={token}"))
            .body(Body::empty())
            .unwrap();

        let (status, body) = call(req).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, user_id.to_string());
    }

    #[tokio::test]
    async fn rejected_tokens_are_indistinguishable() {
        let user_id = Uuid::new_v4();
        let expired = token_for(&user_id, -TimeDelta::hours(1), &secret());
        let forged = token_for(
            &user_id,
            TimeDelta::hours(1),
            &SigningSecret::new("someone-elses-secret").unwrap(),
        );

        let missing = Request::builder()
            .uri("/whoami")
            .body(Body::empty())
            .unwrap();
        let (missing_status, missing_body) = call(missing).await;
        assert_eq!(missing_status, StatusCode::UNAUTHORIZED);

        for token in [expired.as_str(), forged.as_str(), "garbage"] {
            let (status, body) = call(with_bearer("/whoami", token)).await;
            assert_eq!(status, missing_status);
            assert_eq!(body, missing_body);
        }
    }

    #[tokio::test]
    async fn bad_cookie_is_cleared() {
        let req = Request::builder()
            .uri("/open")
            .header(header::COOKIE, format!("{AUTH_TOKEN_COOKIE}=garbage"))
            .body(Body::empty())
            .unwrap();

        let response = app().oneshot(req).await.unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let set_cookie = response
            .headers()
            .get(header::SET_COOKIE)
            .and_then(|v| v.to_str().ok())
            .unwrap_or_default()
            .to_string();
        assert!(set_cookie.starts_with(&format!("{AUTH_TOKEN_COOKIE}=;")));
        assert!(set_cookie.contains("Path=/"));
        assert!(set_cookie.contains("Max-Age=0"));
        let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        assert_eq!(&body[..], b"anonymous");
    }

    #[tokio::test]
    async fn bad_header_leaves_the_cookie_alone() {
        let user_id = Uuid::new_v4();
        let token = token_for(&user_id, TimeDelta::hours(1), &secret());
        let req = Request::builder()
            .uri("/open")
            .header(header::AUTHORIZATION, "Bearer garbage")
            .header(header::COOKIE, format!("{AUTH_TOKEN_COOKIE}={token}"))
            .body(Body::empty())
            .unwrap();

        let response = app().oneshot(req).await.unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert!(response.headers().get(header::SET_COOKIE).is_none());
        let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        assert_eq!(&body[..], b"anonymous");
    }

    #[tokio::test]
    async fn unprotected_routes_see_the_context_when_present() {
        let token = token_for(&Uuid::new_v4(), TimeDelta::hours(1), &secret());

        let (_, body) = call(with_bearer("/open", &token)).await;
        assert_eq!(body, "known");

        let anonymous = Request::builder().uri("/open").body(Body::empty()).unwrap();
        let (status, body) = call(anonymous).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, "anonymous");
    }

    #[test]
    fn bearer_prefix_is_required() {
        let mut headers = HeaderMap::new();
        headers.insert(header::AUTHORIZATION, "Token abc".parse().unwrap());
        assert_eq!(bearer_token(&headers), None);

        headers.insert(header::AUTHORIZATION, "Bearer ".parse().unwrap());
        assert_eq!(bearer_token(&headers), None);

        headers.insert(header::AUTHORIZATION, "Bearer abc.def.ghi".parse().unwrap());
        assert_eq!(bearer_token(&headers).as_deref(), Some("abc.def.ghi"));
    }
}
