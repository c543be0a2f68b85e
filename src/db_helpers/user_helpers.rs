use sqlx::{Sqlite, SqlitePool};

use crate::errors::RequestError;
use crate::models::User;

pub async fn list_users_in_db(pool: &SqlitePool) -> Result<Vec<User>, RequestError> {
    let users = sqlx::query_as::<Sqlite, User>("SELECT username, name, avatar_url FROM users")
        .fetch_all(pool)
        .await?;
    Ok(users)
}

pub async fn get_user_by_username_in_db(
    pool: &SqlitePool,
    username: &str,
) -> Result<User, RequestError> {
    // Usernames are a closed alphabet; anything else is rejected before the
    // store is consulted.
    if !username
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || c == '_')
    {
        return Err(RequestError::InvalidUsernameFormat);
    }

    let user = sqlx::query_as::<Sqlite, User>(
        "SELECT username, name, avatar_url FROM users WHERE username = $1",
    )
    .bind(username.to_owned())
    .fetch_optional(pool)
    .await?;

    match user {
        Some(user) => Ok(user),
        None => Err(RequestError::NotFound("User not found")),
    }
}
