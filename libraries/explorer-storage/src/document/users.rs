use super::{Connection, USERS};
use crate::error::{Result, StorageError};
use explorer_core::types::{NewUser, User, UserId};
use mongodb::bson::doc;

/// Get user by ID
pub(crate) async fn get_by_id(conn: &Connection, id: UserId) -> Result<Option<User>> {
    conn.bounded("find user", conn.users().find_one(doc! { "id": id }, None))
        .await
}

/// Find user by exact username
pub(crate) async fn get_by_username(conn: &Connection, username: &str) -> Result<Option<User>> {
    conn.bounded(
        "find user by username",
        conn.users().find_one(doc! { "username": username }, None),
    )
    .await
}

/// Register a user
///
/// The up-front check covers the common case. Concurrent registrations of
/// the same name are caught by the unique index created in `ensure_indexes`.
pub(crate) async fn create(conn: &Connection, user: NewUser) -> Result<User> {
    if get_by_username(conn, &user.username).await?.is_some() {
        return Err(StorageError::Conflict(format!(
            "username '{}' is already registered",
            user.username
        )));
    }

    let id = conn.next_id(USERS).await?;
    let user = user.into_user(id);

    conn.bounded("insert user", conn.users().insert_one(&user, None))
        .await?;

    tracing::debug!(user_id = id, "Created user");
    Ok(user)
}
