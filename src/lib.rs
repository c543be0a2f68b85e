mod data_formats;
mod db_helpers;
mod errors;
mod handlers;
mod models;

use anyhow::Context;
pub use anyhow::Result;
use axum::http::StatusCode;
use axum::{routing::*, Extension, Json, Router};
use sqlx::sqlite::SqliteConnectOptions;
use sqlx::SqlitePool;
use std::{
    net::{SocketAddr, TcpListener},
    str::FromStr,
    sync::Arc,
};

pub use data_formats::*;
use handlers::*;
pub use models::*;

pub type JsonResponse<T> = (StatusCode, Json<T>);

pub async fn run_app(app: Router, address: SocketAddr) -> Result<()> {
    let db = init_db().await?;
    let app = app.layer(Extension(Arc::new(db)));
    axum::Server::bind(&address)
        .serve(app.into_make_service())
        .await?;
    Ok(())
}

pub async fn init_db() -> Result<SqlitePool> {
    let db_url = std::env::var("DATABASE_URL").context("DATABASE_URL must be set")?;
    init_db_with_url(&db_url).await
}

pub async fn init_db_with_url(db_url: &str) -> Result<SqlitePool> {
    // Foreign keys stay on so referential-integrity violations reach the
    // error normalizer instead of silently inserting orphans.
    let options = SqliteConnectOptions::from_str(db_url)
        .context("DATABASE_URL is not a valid sqlite URL")?
        .create_if_missing(true)
        .foreign_keys(true);
    let pool = SqlitePool::connect_with(options).await?;
    println!("Running Migrations");
    sqlx::migrate!("./migrations")
        .run(&pool)
        .await
        .context("Failed to run migrations")?;
    println!("Migrations completed");
    Ok(pool)
}

pub fn get_random_free_port() -> (u16, SocketAddr) {
    let listener = TcpListener::bind("localhost:0").unwrap();
    match listener.local_addr() {
        Ok(addr) => (addr.port(), addr),
        Err(_) => panic!("Could not get a free port"),
    }
}

pub fn make_router() -> Router {
    Router::new()
        .route("/check_health", get(alive))
        .route("/api/topics", get(get_topics).post(post_topic))
        .route("/api/articles", get(get_articles).post(post_article))
        .route(
            "/api/articles/:article_id",
            get(get_article_by_id)
                .patch(patch_article_votes)
                .delete(delete_article),
        )
        .route(
            "/api/articles/:article_id/comments",
            get(get_comments_by_article_id).post(post_comment),
        )
        .route(
            "/api/comments/:comment_id",
            patch(patch_comment_votes).delete(delete_comment),
        )
        .route("/api/users", get(get_users))
        .route("/api/users/:username", get(get_user_by_username))
        .fallback(not_found)
}
