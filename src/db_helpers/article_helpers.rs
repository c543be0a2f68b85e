use sqlx::{Row, Sqlite, SqlitePool};

use crate::data_formats::{ArticleQueryParams, NewArticleRequest, UpdateVotesRequest};
use crate::errors::RequestError;
use crate::models::{Article, ArticleSummary};

use super::ArticleQueryBuilder;

const DEFAULT_ARTICLE_IMG_URL: &str = "default_image_url";

const SINGLE_ARTICLE_QUERY: &str = "\
    SELECT articles.article_id AS article_id, \
           articles.author AS author, \
           articles.title AS title, \
           articles.body AS body, \
           articles.topic AS topic, \
           articles.article_img_url AS article_img_url, \
           articles.votes AS votes, \
           articles.created_at AS created_at, \
           COUNT(comments.comment_id) AS comment_count \
    FROM articles \
    LEFT JOIN comments ON comments.article_id = articles.article_id \
    WHERE articles.article_id = $1 \
    GROUP BY articles.article_id";

pub async fn list_articles_in_db(
    pool: &SqlitePool,
    ArticleQueryParams {
        sort_by,
        order,
        topic,
    }: ArticleQueryParams,
) -> Result<Vec<ArticleSummary>, RequestError> {
    let builder = ArticleQueryBuilder::new(sort_by, order, topic)?;
    let query = builder.build();

    let mut rows = sqlx::query_as::<Sqlite, ArticleSummary>(&query);
    if let Some(topic) = builder.topic() {
        rows = rows.bind(topic.to_owned());
    }
    let articles = rows.fetch_all(pool).await?;

    // An empty result under a topic filter is only fine when the topic itself
    // exists; otherwise the caller filtered by a topic we have never seen.
    if articles.is_empty() {
        if let Some(topic) = builder.topic() {
            let known = sqlx::query("SELECT slug FROM topics WHERE slug = $1")
                .bind(topic.to_owned())
                .fetch_optional(pool)
                .await?;
            if known.is_none() {
                return Err(RequestError::TopicNotFound);
            }
        }
    }

    Ok(articles)
}

pub async fn get_article_by_id_in_db(
    pool: &SqlitePool,
    article_id: i64,
) -> Result<Article, RequestError> {
    let article = sqlx::query_as::<Sqlite, Article>(SINGLE_ARTICLE_QUERY)
        .bind(article_id)
        .fetch_optional(pool)
        .await?;

    match article {
        Some(article) => Ok(article),
        None => Err(RequestError::NotFound("Article not found")),
    }
}

pub async fn update_article_votes_in_db(
    pool: &SqlitePool,
    article_id: i64,
    UpdateVotesRequest { inc_votes }: UpdateVotesRequest,
) -> Result<Article, RequestError> {
    let inc_votes = match inc_votes {
        None => return Err(RequestError::MissingFields),
        Some(value) => value.as_i64().ok_or(RequestError::InvalidVoteValue)?,
    };

    // Single statement, so concurrent increments on the same row never lose
    // an update.
    let result = sqlx::query("UPDATE articles SET votes = votes + $1 WHERE article_id = $2")
        .bind(inc_votes)
        .bind(article_id)
        .execute(pool)
        .await?;

    if result.rows_affected() == 0 {
        return Err(RequestError::NotFound("Article not found"));
    }

    // Refetch through the aggregating query so the payload carries
    // comment_count like every other article payload.
    get_article_by_id_in_db(pool, article_id).await
}

pub async fn create_article_in_db(
    pool: &SqlitePool,
    NewArticleRequest {
        author,
        title,
        body,
        topic,
        article_img_url,
    }: NewArticleRequest,
) -> Result<Article, RequestError> {
    let (author, title, body, topic) = match (author, title, body, topic) {
        (Some(author), Some(title), Some(body), Some(topic)) => (author, title, body, topic),
        _ => return Err(RequestError::MissingFields),
    };
    let article_img_url =
        article_img_url.unwrap_or_else(|| String::from(DEFAULT_ARTICLE_IMG_URL));

    let row = sqlx::query(
        "INSERT INTO articles (author, title, body, topic, article_img_url) \
         VALUES ($1, $2, $3, $4, $5) \
         RETURNING article_id",
    )
    .bind(author)
    .bind(title)
    .bind(body)
    .bind(topic)
    .bind(article_img_url)
    .fetch_one(pool)
    .await
    .map_err(|e| RequestError::from_insert_error(e, "User or topic not found"))?;

    let article_id: i64 = row.try_get("article_id")?;

    // Freshly inserted, so the count is necessarily zero, but going back
    // through the aggregating query keeps that invariant in one place.
    get_article_by_id_in_db(pool, article_id).await
}

pub async fn delete_article_in_db(
    pool: &SqlitePool,
    article_id: i64,
) -> Result<(), RequestError> {
    let mut tx = pool.begin().await?;

    // Comments first; the transaction keeps the intermediate state from ever
    // being observable.
    sqlx::query("DELETE FROM comments WHERE article_id = $1")
        .bind(article_id)
        .execute(&mut tx)
        .await?;

    let result = sqlx::query("DELETE FROM articles WHERE article_id = $1")
        .bind(article_id)
        .execute(&mut tx)
        .await?;

    if result.rows_affected() == 0 {
        return Err(RequestError::NotFound("Article not found"));
    }

    tx.commit().await?;
    Ok(())
}
