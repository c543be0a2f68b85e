use std::{sync::Arc, time::Duration};

use axum::Extension;
use sqlx::SqlitePool;

pub struct TestApp {
    pub address: String,
    pub pool: SqlitePool,
}

/// Boots the real service on a random free port against a fresh seeded
/// SQLite database and returns its base URL plus a handle to the pool for
/// direct assertions.
pub async fn spawn_app() -> TestApp {
    let (port, addr) = newswire::get_random_free_port();
    let db_path = std::env::temp_dir().join(format!("newswire-test-{port}.db"));
    let _ = std::fs::remove_file(&db_path);
    let db_url = format!("sqlite://{}", db_path.display());

    let pool = newswire::init_db_with_url(&db_url).await.unwrap();
    seed(&pool).await;

    let app = newswire::make_router().layer(Extension(Arc::new(pool.clone())));
    tokio::spawn(async move {
        axum::Server::bind(&addr)
            .serve(app.into_make_service())
            .await
            .unwrap();
    });

    let address = format!("http://{}", addr);
    wait_until_alive(&address).await;
    TestApp { address, pool }
}

async fn wait_until_alive(address: &str) {
    for _ in 0..50 {
        if reqwest::get(format!("{address}/check_health")).await.is_ok() {
            return;
        }
        tokio::time::sleep(Duration::from_millis(10)).await;
    }
    panic!("server never came up on {address}");
}

async fn seed(pool: &SqlitePool) {
    let topics = [
        ("mitch", "The man, the Mitch, the legend"),
        ("cats", "Not dogs"),
        ("paper", "what books are made of"),
    ];
    for (slug, description) in topics {
        sqlx::query("INSERT INTO topics (slug, description) VALUES ($1, $2)")
            .bind(slug)
            .bind(description)
            .execute(pool)
            .await
            .unwrap();
    }

    let users = [
        ("butter_bridge", "jonny"),
        ("icellusedkars", "sam"),
        ("rogersop", "paul"),
        ("lurker", "do_nothing"),
    ];
    for (username, name) in users {
        sqlx::query("INSERT INTO users (username, name, avatar_url) VALUES ($1, $2, $3)")
            .bind(username)
            .bind(name)
            .bind(format!("https://avatars.example.com/{username}.png"))
            .execute(pool)
            .await
            .unwrap();
    }

    let articles = [
        (
            1_i64,
            "butter_bridge",
            "Living in the shadow of a great man",
            "I find this existence challenging",
            "mitch",
            100_i64,
            "2020-07-09 20:11:00",
        ),
        (
            2,
            "icellusedkars",
            "Sony Vaio; or, The Laptop",
            "Call me Mitchell.",
            "mitch",
            0,
            "2020-10-16 05:03:00",
        ),
        (
            3,
            "icellusedkars",
            "Eight pug gifs that remind me of mitch",
            "some gifs",
            "mitch",
            0,
            "2020-11-03 09:12:00",
        ),
        (
            4,
            "rogersop",
            "Student SUES Mitch!",
            "We all love Mitch and his wonderful, unique typing style.",
            "mitch",
            0,
            "2020-05-06 01:14:00",
        ),
        (
            5,
            "rogersop",
            "UNCOVERED: catspiracy to bring down democracy",
            "Bastet walks amongst us",
            "cats",
            0,
            "2020-08-03 13:14:00",
        ),
    ];
    for (article_id, author, title, body, topic, votes, created_at) in articles {
        sqlx::query(
            "INSERT INTO articles \
             (article_id, author, title, body, topic, votes, created_at) \
             VALUES ($1, $2, $3, $4, $5, $6, $7)",
        )
        .bind(article_id)
        .bind(author)
        .bind(title)
        .bind(body)
        .bind(topic)
        .bind(votes)
        .bind(created_at)
        .execute(pool)
        .await
        .unwrap();
    }

    let comments = [
        (
            1_i64,
            1_i64,
            "butter_bridge",
            "Oh, I've got compassion running out of my nose, pal!",
            16_i64,
            "2020-04-06 12:17:00",
        ),
        (
            2,
            1,
            "icellusedkars",
            "The beautiful thing about treasure is that it exists.",
            14,
            "2020-10-31 03:03:00",
        ),
        (
            3,
            3,
            "icellusedkars",
            "Ambidextrous marsupial",
            0,
            "2020-09-19 23:10:00",
        ),
        (
            4,
            3,
            "lurker",
            "git push origin master",
            0,
            "2020-06-20 07:24:00",
        ),
        (
            5,
            5,
            "butter_bridge",
            "Superficially charming",
            1,
            "2020-01-01 03:08:00",
        ),
    ];
    for (comment_id, article_id, author, body, votes, created_at) in comments {
        sqlx::query(
            "INSERT INTO comments \
             (comment_id, article_id, author, body, votes, created_at) \
             VALUES ($1, $2, $3, $4, $5, $6)",
        )
        .bind(comment_id)
        .bind(article_id)
        .bind(author)
        .bind(body)
        .bind(votes)
        .bind(created_at)
        .execute(pool)
        .await
        .unwrap();
    }
}
