use sqlx::{Sqlite, SqlitePool};

use crate::data_formats::{NewCommentRequest, UpdateVotesRequest};
use crate::errors::RequestError;
use crate::models::Comment;

const COMMENT_COLUMNS: &str = "comment_id, article_id, author, body, votes, created_at";

pub async fn get_comments_for_article_in_db(
    pool: &SqlitePool,
    article_id: i64,
) -> Result<Vec<Comment>, RequestError> {
    let query = format!(
        "SELECT {COMMENT_COLUMNS} FROM comments \
         WHERE article_id = $1 \
         ORDER BY created_at DESC"
    );
    let comments = sqlx::query_as::<Sqlite, Comment>(&query)
        .bind(article_id)
        .fetch_all(pool)
        .await?;

    if comments.is_empty() {
        return Err(RequestError::NotFound("No comments found for this article"));
    }

    Ok(comments)
}

pub async fn add_comment_to_article_in_db(
    pool: &SqlitePool,
    article_id: i64,
    NewCommentRequest { username, body }: NewCommentRequest,
) -> Result<Comment, RequestError> {
    let (username, body) = match (username, body) {
        (Some(username), Some(body)) => (username, body),
        _ => return Err(RequestError::MissingFields),
    };

    let query = format!(
        "INSERT INTO comments (article_id, author, body) \
         VALUES ($1, $2, $3) \
         RETURNING {COMMENT_COLUMNS}"
    );
    let comment = sqlx::query_as::<Sqlite, Comment>(&query)
        .bind(article_id)
        .bind(username)
        .bind(body)
        .fetch_one(pool)
        .await
        .map_err(|e| RequestError::from_insert_error(e, "Article or user not found"))?;

    Ok(comment)
}

pub async fn update_comment_votes_in_db(
    pool: &SqlitePool,
    comment_id: i64,
    UpdateVotesRequest { inc_votes }: UpdateVotesRequest,
) -> Result<Comment, RequestError> {
    let inc_votes = inc_votes
        .and_then(|value| value.as_i64())
        .ok_or(RequestError::InvalidVoteValue)?;

    let query = format!(
        "UPDATE comments SET votes = votes + $1 \
         WHERE comment_id = $2 \
         RETURNING {COMMENT_COLUMNS}"
    );
    let comment = sqlx::query_as::<Sqlite, Comment>(&query)
        .bind(inc_votes)
        .bind(comment_id)
        .fetch_optional(pool)
        .await?;

    match comment {
        Some(comment) => Ok(comment),
        None => Err(RequestError::NotFound("Comment not found")),
    }
}

pub async fn delete_comment_in_db(
    pool: &SqlitePool,
    comment_id: i64,
) -> Result<(), RequestError> {
    let result = sqlx::query("DELETE FROM comments WHERE comment_id = $1")
        .bind(comment_id)
        .execute(pool)
        .await?;

    if result.rows_affected() == 0 {
        return Err(RequestError::NotFound("Comment not found"));
    }

    Ok(())
}
