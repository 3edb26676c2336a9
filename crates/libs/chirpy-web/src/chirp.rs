//! Chirp validation, filtering and retrieval for web handlers.

use chirpy_models::{
    chirp::{Chirp, ChirpCreate, SortOrder},
    db::connection::DbConnection,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};
use uuid::Uuid;

use crate::ctx::Ctx;
use crate::prelude::*;

/// Maximum chirp length, in characters.
pub const MAX_CHIRP_LENGTH: usize = 140;

/// Words replaced by [`CENSORED`], compared case-insensitively.
pub const PROFANE_WORDS: [&str; 3] = ["kerfuffle", "sharbert", "fornax"];

/// Replacement for a profane word.
pub const CENSORED: &str = "****";

/// Public view of a chirp.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChirpApi {
    pub id: Uuid,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub body: String,
    pub user_id: Uuid,
}

/// Chirp creation payload. The author comes from the session token.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ChirpPost {
    pub body: String,
}

/// Listing filters.
#[derive(Debug, Default, Clone, Deserialize, Serialize)]
pub struct ChirpQuery {
    /// Only chirps written by this user.
    pub author_id: Option<Uuid>,
    /// Order on creation time, ascending by default.
    pub sort: Option<SortOrder>,
}

impl From<Chirp> for ChirpApi {
    fn from(value: Chirp) -> Self {
        Self {
            id: value.id,
            created_at: value.created_at,
            updated_at: value.updated_at,
            body: value.body,
            user_id: value.user_id,
        }
    }
}

/// Masks profane words.
///
/// The body is split on single spaces; a word is masked only when it matches
/// one of [`PROFANE_WORDS`] entirely, ignoring case. Punctuation attached to
/// a word keeps it from matching.
///
/// ```rust
/// use chirpy_web::chirp::clean_body;
///
/// assert_eq!(clean_body("What a Kerfuffle today"), "What a **** today");
/// assert_eq!(clean_body("Sharbert!"), "Sharbert!");
/// ```
pub fn clean_body(body: &str) -> String {
    body.split(' ')
        .map(|word| {
            let lowered = word.to_lowercase();
            if PROFANE_WORDS.contains(&lowered.as_str()) {
                CENSORED
            } else {
                word
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

/// Checks the length limit and returns the cleaned body.
pub fn validate_chirp(body: &str) -> Result<String> {
    let length = body.chars().count();
    if length > MAX_CHIRP_LENGTH {
        debug!("Rejecting chirp of {length} characters");
        return Err(Error::ChirpTooLong);
    }
    Ok(clean_body(body))
}

/// Creates a chirp attributed to the authenticated user.
///
/// # Examples
///
/// ```rust,no_run
/// use chirpy_web::chirp::{ChirpPost, create_chirp};
/// use chirpy_web::ctx::Ctx;
/// # use chirpy_models::db::connection::DbConnection;
///
/// # fn example(ctx: Ctx, connection: &DbConnection) -> Result<(), Box<dyn std::error::Error>> {
/// let payload = ChirpPost { body: String::from("Hello, world!") };
/// let chirp = create_chirp(&ctx, payload, connection)?;
/// assert_eq!(chirp.user_id, ctx.user.id);
/// # Ok(())
/// # }
/// ```
pub fn create_chirp(ctx: &Ctx, payload: ChirpPost, connection: &DbConnection) -> Result<ChirpApi> {
    let body = validate_chirp(&payload.body)?;
    let chirp = ChirpCreate::new(body, ctx.user.id).save(connection)?;
    info!("User {} posted chirp {}", chirp.user_id, chirp.id);
    Ok(chirp.into())
}

/// Lists chirps, optionally restricted to one author.
pub fn fetch_chirps(query: &ChirpQuery, connection: &DbConnection) -> Result<Vec<ChirpApi>> {
    let order = query.sort.unwrap_or_default();
    let chirps = match &query.author_id {
        Some(author) => Chirp::fetch_by_author(author, order, connection)?,
        None => Chirp::fetch_all(order, connection)?,
    };
    Ok(chirps.into_iter().map(ChirpApi::from).collect())
}

/// Fetches one chirp by its ID as given in the request path.
///
/// An ID that is not a UUID can't name a chirp, so it is reported the same
/// way as an unknown one.
pub fn fetch_chirp(chirp_id: &str, connection: &DbConnection) -> Result<ChirpApi> {
    let Ok(target) = Uuid::parse_str(chirp_id) else {
        return Err(Error::ChirpNotFound);
    };

    match Chirp::fetch_by_id(&target, connection) {
        Ok(chirp) => Ok(chirp.into()),
        Err(err) if err.is_not_found() => Err(Error::ChirpNotFound),
        Err(err) => Err(err.into()),
    }
}
