//! Chirps: short text posts owned by a user.

use chrono::{DateTime, Utc};
use diesel::pg::Pg;
use diesel::prelude::*;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::prelude::*;
use crate::user::User;
use crate::{db::connection::DbConnection, schema::chirps::dsl::*};

/// Listing order on `created_at`, ties broken by ID.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortOrder {
    /// Oldest first.
    #[default]
    Asc,
    /// Newest first.
    Desc,
}

/// A stored chirp.
#[derive(
    Debug, Clone, Queryable, Selectable, Identifiable, Associations, PartialEq, Serialize, Deserialize,
)]
#[diesel(belongs_to(User))]
#[diesel(table_name = crate::schema::chirps)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct Chirp {
    /// Unique chirp ID.
    pub id: Uuid,
    /// When this chirp was created.
    pub created_at: DateTime<Utc>,
    /// When this chirp was last updated.
    pub updated_at: DateTime<Utc>,
    /// The (already filtered) text.
    pub body: String,
    /// Author.
    pub user_id: Uuid,
}

/// Data for creating a new chirp.
#[derive(Insertable, PartialEq, Debug, Clone)]
#[diesel(table_name = crate::schema::chirps)]
pub struct ChirpCreate {
    /// The text to store.
    pub body: String,
    /// Author.
    pub user_id: Uuid,
}

impl ChirpCreate {
    /// Creates a new chirp creation request.
    pub fn new(text: String, author: Uuid) -> Self {
        Self {
            body: text,
            user_id: author,
        }
    }

    /// Saves the chirp to the database.
    pub fn save(self, connection: &DbConnection) -> Result<Chirp> {
        let conn = &mut connection.pool.get()?;
        Ok(diesel::insert_into(chirps)
            .values(&self)
            .returning(Chirp::as_returning())
            .get_result(conn)?)
    }
}

impl Chirp {
    /// Fetches a chirp by ID.
    pub fn fetch_by_id(target: &Uuid, connection: &DbConnection) -> Result<Self> {
        let conn = &mut connection.pool.get()?;
        Ok(Chirp::by_id(target)
            .select(Chirp::as_select())
            .get_result(conn)?)
    }

    /// Fetches every chirp.
    pub fn fetch_all(order: SortOrder, connection: &DbConnection) -> Result<Vec<Self>> {
        Self::fetch_ordered(None, order, connection)
    }

    /// Fetches every chirp written by `author`.
    pub fn fetch_by_author(
        author: &Uuid,
        order: SortOrder,
        connection: &DbConnection,
    ) -> Result<Vec<Self>> {
        Self::fetch_ordered(Some(*author), order, connection)
    }

    fn fetch_ordered(
        author: Option<Uuid>,
        order: SortOrder,
        connection: &DbConnection,
    ) -> Result<Vec<Self>> {
        let conn = &mut connection.pool.get()?;

        let mut query = chirps.into_boxed::<Pg>();
        if let Some(author) = author {
            query = query.filter(user_id.eq(author));
        }
        query = match order {
            SortOrder::Asc => query.order((created_at.asc(), id.asc())),
            SortOrder::Desc => query.order((created_at.desc(), id.desc())),
        };

        Ok(query.select(Chirp::as_select()).load(conn)?)
    }
}

impl Chirp {
    #[diesel::dsl::auto_type(no_type_alias)]
    pub fn by_id(target: &Uuid) -> _ {
        crate::schema::chirps::dsl::chirps.filter(id.eq(target))
    }
}
