use std::sync::Arc;

use axum::{
    extract::{Path, Query},
    http::{StatusCode, Uri},
    Extension, Json,
};
use sqlx::SqlitePool;

use crate::{
    data_formats::{
        ArticleQueryParams, ArticleWrapper, CommentWrapper, MultipleArticlesWrapper,
        MultipleCommentsWrapper, MultipleTopicsWrapper, MultipleUsersWrapper, NewArticleRequest,
        NewCommentRequest, NewTopicRequest, TopicWrapper, UpdateVotesRequest, UserWrapper,
    },
    db_helpers::{
        add_comment_to_article_in_db, create_article_in_db, create_topic_in_db,
        delete_article_in_db, delete_comment_in_db, get_article_by_id_in_db,
        get_comments_for_article_in_db, get_user_by_username_in_db, list_articles_in_db,
        list_topics_in_db, list_users_in_db, parse_id, update_article_votes_in_db,
        update_comment_votes_in_db,
    },
    errors::RequestErrorJson,
};

type JsonResult<T> = Result<Json<T>, (StatusCode, Json<RequestErrorJson>)>;
type CreatedJsonResult<T> = Result<(StatusCode, Json<T>), (StatusCode, Json<RequestErrorJson>)>;
type NoContentResult = Result<StatusCode, (StatusCode, Json<RequestErrorJson>)>;

// ----------------- Helper Handlers -----------------
pub async fn alive() -> &'static str {
    "alive"
}

pub async fn not_found(uri: Uri) -> Result<(), (StatusCode, String)> {
    Err((
        StatusCode::NOT_FOUND,
        format!("URL {} provided was not found", uri),
    ))
}

// ----------------- Topic Handlers -----------------
pub async fn get_topics(Extension(pool): Extension<Arc<SqlitePool>>) -> JsonResult<MultipleTopicsWrapper> {
    let topics = list_topics_in_db(&pool)
        .await
        .map_err(|e| e.to_json_response())?;
    Ok(Json(MultipleTopicsWrapper { topics }))
}

pub async fn post_topic(
    Extension(pool): Extension<Arc<SqlitePool>>,
    Json(request): Json<NewTopicRequest>,
) -> CreatedJsonResult<TopicWrapper> {
    let topic = create_topic_in_db(&pool, request)
        .await
        .map_err(|e| e.to_json_response())?;
    Ok((StatusCode::CREATED, Json(TopicWrapper { topic })))
}

// ----------------- Article Handlers -----------------
pub async fn get_articles(
    Extension(pool): Extension<Arc<SqlitePool>>,
    Query(params): Query<ArticleQueryParams>,
) -> JsonResult<MultipleArticlesWrapper> {
    let articles = list_articles_in_db(&pool, params)
        .await
        .map_err(|e| e.to_json_response())?;
    Ok(Json(MultipleArticlesWrapper { articles }))
}

pub async fn get_article_by_id(
    Extension(pool): Extension<Arc<SqlitePool>>,
    Path(article_id): Path<String>,
) -> JsonResult<ArticleWrapper> {
    let article_id =
        parse_id(&article_id, "Invalid article ID type").map_err(|e| e.to_json_response())?;
    let article = get_article_by_id_in_db(&pool, article_id)
        .await
        .map_err(|e| e.to_json_response())?;
    Ok(Json(ArticleWrapper { article }))
}

pub async fn post_article(
    Extension(pool): Extension<Arc<SqlitePool>>,
    Json(request): Json<NewArticleRequest>,
) -> CreatedJsonResult<ArticleWrapper> {
    let article = create_article_in_db(&pool, request)
        .await
        .map_err(|e| e.to_json_response())?;
    Ok((StatusCode::CREATED, Json(ArticleWrapper { article })))
}

pub async fn patch_article_votes(
    Extension(pool): Extension<Arc<SqlitePool>>,
    Path(article_id): Path<String>,
    Json(request): Json<UpdateVotesRequest>,
) -> JsonResult<ArticleWrapper> {
    let article_id =
        parse_id(&article_id, "Invalid article ID type").map_err(|e| e.to_json_response())?;
    let article = update_article_votes_in_db(&pool, article_id, request)
        .await
        .map_err(|e| e.to_json_response())?;
    Ok(Json(ArticleWrapper { article }))
}

pub async fn delete_article(
    Extension(pool): Extension<Arc<SqlitePool>>,
    Path(article_id): Path<String>,
) -> NoContentResult {
    let article_id =
        parse_id(&article_id, "Invalid article ID type").map_err(|e| e.to_json_response())?;
    delete_article_in_db(&pool, article_id)
        .await
        .map_err(|e| e.to_json_response())?;
    Ok(StatusCode::NO_CONTENT)
}

// ----------------- Comment Handlers -----------------
pub async fn get_comments_by_article_id(
    Extension(pool): Extension<Arc<SqlitePool>>,
    Path(article_id): Path<String>,
) -> JsonResult<MultipleCommentsWrapper> {
    let article_id =
        parse_id(&article_id, "Invalid article ID type").map_err(|e| e.to_json_response())?;
    let comments = get_comments_for_article_in_db(&pool, article_id)
        .await
        .map_err(|e| e.to_json_response())?;
    Ok(Json(MultipleCommentsWrapper { comments }))
}

pub async fn post_comment(
    Extension(pool): Extension<Arc<SqlitePool>>,
    Path(article_id): Path<String>,
    Json(request): Json<NewCommentRequest>,
) -> CreatedJsonResult<CommentWrapper> {
    let article_id =
        parse_id(&article_id, "Invalid article ID type").map_err(|e| e.to_json_response())?;
    let comment = add_comment_to_article_in_db(&pool, article_id, request)
        .await
        .map_err(|e| e.to_json_response())?;
    Ok((StatusCode::CREATED, Json(CommentWrapper { comment })))
}

pub async fn patch_comment_votes(
    Extension(pool): Extension<Arc<SqlitePool>>,
    Path(comment_id): Path<String>,
    Json(request): Json<UpdateVotesRequest>,
) -> JsonResult<CommentWrapper> {
    let comment_id =
        parse_id(&comment_id, "Invalid comment ID type").map_err(|e| e.to_json_response())?;
    let comment = update_comment_votes_in_db(&pool, comment_id, request)
        .await
        .map_err(|e| e.to_json_response())?;
    Ok(Json(CommentWrapper { comment }))
}

pub async fn delete_comment(
    Extension(pool): Extension<Arc<SqlitePool>>,
    Path(comment_id): Path<String>,
) -> NoContentResult {
    let comment_id =
        parse_id(&comment_id, "Invalid comment ID type").map_err(|e| e.to_json_response())?;
    delete_comment_in_db(&pool, comment_id)
        .await
        .map_err(|e| e.to_json_response())?;
    Ok(StatusCode::NO_CONTENT)
}

// ----------------- User Handlers -----------------
pub async fn get_users(Extension(pool): Extension<Arc<SqlitePool>>) -> JsonResult<MultipleUsersWrapper> {
    let users = list_users_in_db(&pool)
        .await
        .map_err(|e| e.to_json_response())?;
    Ok(Json(MultipleUsersWrapper { users }))
}

pub async fn get_user_by_username(
    Extension(pool): Extension<Arc<SqlitePool>>,
    Path(username): Path<String>,
) -> JsonResult<UserWrapper> {
    let user = get_user_by_username_in_db(&pool, &username)
        .await
        .map_err(|e| e.to_json_response())?;
    Ok(Json(UserWrapper { user }))
}
