use std::path::Path;

use axum::{
    Json, Router,
    extract::{Path as UrlPath, Query, State},
    http::{StatusCode, header},
    middleware,
    response::{Html, IntoResponse},
    routing::{get, post},
};
use chirpy_models::user::User;
use chirpy_web::{
    chirp::{ChirpApi, ChirpPost, ChirpQuery, create_chirp, fetch_chirp, fetch_chirps},
    ctx::{
        Ctx,
        resolver::{login_user, mw_ctx_resolver},
    },
    error::Error as WebError,
    mw_auth::mw_require_auth,
    prelude::Result as WebResult,
    user::{UserApi, UserLogin, UserLoginRequest, UserPost, create_user},
};
use tokio::task::JoinHandle;
use tower_cookies::{CookieManagerLayer, Cookies};
use tower_http::{
    cors::CorsLayer,
    services::ServeDir,
    trace::{DefaultMakeSpan, TraceLayer},
};
use tracing::{info, warn};

use crate::config::ServerConfig;
use crate::metrics::mw_count_hits;
use crate::prelude::*;
use crate::state::AppState;

/// Builds the full application router.
pub fn router(state: AppState, filepath_root: &Path) -> Router {
    let protected_routes = Router::new()
        .route("/api/chirps", post(post_chirp))
        .route_layer(middleware::from_fn(mw_require_auth));

    let api_routes = Router::new()
        .route("/api/healthz", get(healthz))
        .route("/api/users", post(post_user))
        .route("/api/login", post(login))
        .route("/api/chirps", get(get_chirps))
        .route("/api/chirps/{chirp_id}", get(get_chirp));

    let admin_routes = Router::new()
        .route("/admin/metrics", get(admin_metrics))
        .route("/admin/reset", post(admin_reset));

    let app_routes = Router::new()
        .nest_service("/app", ServeDir::new(filepath_root))
        .layer(middleware::from_fn_with_state(
            state.metrics.clone(),
            mw_count_hits,
        ));

    Router::new()
        .merge(protected_routes)
        .merge(api_routes)
        .merge(admin_routes)
        .merge(app_routes)
        // Headers carry bearer tokens; keep them out of spans.
        .layer(TraceLayer::new_for_http().make_span_with(DefaultMakeSpan::default()))
        .layer(CorsLayer::permissive())
        .layer(middleware::from_fn_with_state(
            state.secret.clone(),
            mw_ctx_resolver,
        ))
        .layer(CookieManagerLayer::new())
        .with_state(state)
}

pub async fn setup_api(state: AppState, config: &ServerConfig) -> Result<JoinHandle<Result<()>>> {
    let app = router(state, &config.filepath_root);

    let listener = tokio::net::TcpListener::bind(config.addr).await?;
    tracing::debug!("listening on {}", listener.local_addr()?);
    let handle = tokio::spawn(async move {
        axum::serve(listener, app).await?;
        Ok(())
    });

    Ok(handle)
}

async fn healthz() -> impl IntoResponse {
    (
        [(header::CONTENT_TYPE, "text/plain; charset=utf-8")],
        "OK",
    )
}

async fn post_user(
    State(state): State<AppState>,
    Json(payload): Json<UserPost>,
) -> WebResult<(StatusCode, Json<UserApi>)> {
    let user = create_user(payload, &state.connection)?;
    Ok((StatusCode::CREATED, Json(user)))
}

async fn login(
    State(state): State<AppState>,
    cookies: Cookies,
    Json(payload): Json<UserLoginRequest>,
) -> WebResult<Json<UserLogin>> {
    Ok(Json(login_user(
        &payload,
        &state.secret,
        &state.connection,
        &cookies,
    )?))
}

#[axum::debug_handler]
async fn post_chirp(
    State(state): State<AppState>,
    ctx: Ctx,
    Json(payload): Json<ChirpPost>,
) -> WebResult<(StatusCode, Json<ChirpApi>)> {
    let chirp = create_chirp(&ctx, payload, &state.connection)?;
    Ok((StatusCode::CREATED, Json(chirp)))
}

async fn get_chirps(
    State(state): State<AppState>,
    Query(query): Query<ChirpQuery>,
) -> WebResult<Json<Vec<ChirpApi>>> {
    Ok(Json(fetch_chirps(&query, &state.connection)?))
}

async fn get_chirp(
    State(state): State<AppState>,
    UrlPath(chirp_id): UrlPath<String>,
) -> WebResult<Json<ChirpApi>> {
    Ok(Json(fetch_chirp(&chirp_id, &state.connection)?))
}

async fn admin_metrics(State(state): State<AppState>) -> Html<String> {
    Html(state.metrics.render())
}

async fn admin_reset(State(state): State<AppState>) -> WebResult<impl IntoResponse> {
    if !state.platform.is_dev() {
        warn!("Refusing reset outside the dev platform");
        return Err(WebError::Forbidden);
    }

    let deleted = User::delete_all(&state.connection)?;
    state.metrics.reset();
    info!("Reset hits and deleted {deleted} user(s)");

    Ok("Hits reset to 0 and database reset to initial state.")
}
