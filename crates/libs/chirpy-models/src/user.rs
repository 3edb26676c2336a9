//! User accounts.

use chrono::{DateTime, Utc};
use diesel::prelude::*;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::prelude::*;
use crate::{db::connection::DbConnection, schema::users::dsl::*};

/// A registered user.
///
/// `hashed_password` is a PHC string; the plaintext is never stored.
#[derive(Debug, Clone, Queryable, Selectable, Identifiable, PartialEq, Serialize, Deserialize)]
#[diesel(table_name = crate::schema::users)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct User {
    /// Unique user ID.
    pub id: Uuid,
    /// When this user was created.
    pub created_at: DateTime<Utc>,
    /// When this user was last updated.
    pub updated_at: DateTime<Utc>,
    /// Login email, unique across users.
    pub email: String,
    /// Stored credential hash.
    pub hashed_password: String,
}

/// Data for creating a new user.
#[derive(Insertable, PartialEq, Debug, Clone)]
#[diesel(table_name = crate::schema::users)]
pub struct UserCreate {
    /// Login email.
    pub email: String,
    /// Credential hash, already computed.
    pub hashed_password: String,
}

impl UserCreate {
    /// Creates a new user creation request.
    pub fn new(address: String, password_hash: String) -> Self {
        Self {
            email: address,
            hashed_password: password_hash,
        }
    }

    /// Saves the user to the database.
    ///
    /// An already registered email fails with a unique violation, see
    /// [`Error::is_unique_violation`].
    pub fn save(self, connection: &DbConnection) -> Result<User> {
        let conn = &mut connection.pool.get()?;
        Ok(diesel::insert_into(users)
            .values(&self)
            .returning(User::as_returning())
            .get_result(conn)?)
    }
}

impl User {
    /// Fetches a user by ID.
    pub fn fetch_by_id(target: &Uuid, connection: &DbConnection) -> Result<Self> {
        let conn = &mut connection.pool.get()?;
        Ok(User::by_id(target)
            .select(User::as_select())
            .get_result(conn)?)
    }

    /// Fetches a user by email.
    pub fn fetch_by_email(target: &str, connection: &DbConnection) -> Result<Self> {
        let conn = &mut connection.pool.get()?;
        Ok(User::by_email(target)
            .select(User::as_select())
            .get_result(conn)?)
    }

    /// Deletes every user, and through the cascade every chirp.
    ///
    /// Returns the number of users removed.
    pub fn delete_all(connection: &DbConnection) -> Result<usize> {
        let conn = &mut connection.pool.get()?;
        Ok(diesel::delete(users).execute(conn)?)
    }
}

impl User {
    #[diesel::dsl::auto_type(no_type_alias)]
    pub fn by_id(target: &Uuid) -> _ {
        crate::schema::users::dsl::users.filter(id.eq(target))
    }

    #[diesel::dsl::auto_type(no_type_alias)]
    pub fn by_email(target: &str) -> _ {
        crate::schema::users::dsl::users.filter(email.eq(target))
    }
}
