//! Request context management for web handlers.
//!
//! A [`Ctx`] exists only for requests that presented a valid session token.
//! Handlers take it as an extractor to require authentication, and use
//! [`Ctx::user`] to attribute their writes.

use uuid::Uuid;

use crate::ctx::ctx_user::CtxUser;

pub mod ctx_user;
pub mod resolver;

/// Request context containing the authenticated identity.
#[derive(Clone, Debug)]
pub struct Ctx {
    /// The authenticated user.
    pub user: CtxUser,
}

impl Ctx {
    /// Creates a new request context.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use chirpy_web::ctx::Ctx;
    /// use uuid::Uuid;
    ///
    /// let user_id = Uuid::new_v4();
    /// let ctx = Ctx::new(user_id);
    /// assert_eq!(ctx.user.id, user_id);
    /// ```
    pub fn new(id: Uuid) -> Self {
        Self {
            user: CtxUser { id },
        }
    }
}
