use sqlx::{Sqlite, SqlitePool};

use crate::data_formats::NewTopicRequest;
use crate::errors::RequestError;
use crate::models::Topic;

pub async fn list_topics_in_db(pool: &SqlitePool) -> Result<Vec<Topic>, RequestError> {
    let topics = sqlx::query_as::<Sqlite, Topic>("SELECT slug, description FROM topics")
        .fetch_all(pool)
        .await?;
    Ok(topics)
}

pub async fn create_topic_in_db(
    pool: &SqlitePool,
    NewTopicRequest { slug, description }: NewTopicRequest,
) -> Result<Topic, RequestError> {
    let (slug, description) = match (slug, description) {
        (Some(slug), Some(description)) => (slug, description),
        _ => return Err(RequestError::MissingFields),
    };

    let topic = sqlx::query_as::<Sqlite, Topic>(
        "INSERT INTO topics (slug, description) \
         VALUES ($1, $2) \
         RETURNING slug, description",
    )
    .bind(slug)
    .bind(description)
    .fetch_one(pool)
    .await?;

    Ok(topic)
}
