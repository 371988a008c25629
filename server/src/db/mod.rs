// Newsroom
// Copyright 2023 Julio Merino
//
// Licensed under the Apache License, Version 2.0 (the "License"); you may not
// use this file except in compliance with the License.  You may obtain a copy
// of the License at:
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS, WITHOUT
// WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.  See the
// License for the specific language governing permissions and limitations
// under the License.

//! Database abstraction in terms of the operations needed by the server.

use crate::model::*;
use futures::TryStreamExt;
#[cfg(feature = "postgres")]
use newsroom_core::db::postgres;
#[cfg(any(feature = "sqlite", test))]
use newsroom_core::db::sqlite::{self, build_timestamp, unpack_timestamp};
use newsroom_core::db::{DbError, DbResult, Executor};
use sqlx::Row;
#[cfg(feature = "postgres")]
use sqlx::postgres::PgRow;
#[cfg(any(feature = "sqlite", test))]
use sqlx::sqlite::SqliteRow;
use time::OffsetDateTime;

#[cfg(test)]
pub(crate) mod testutils;

/// Columns and joins to fetch articles along with their comment counts from PostgreSQL.
#[cfg(feature = "postgres")]
const POSTGRES_ARTICLES_QUERY: &str = "
    SELECT
        a.article_id, a.title, a.topic, a.author, a.body, a.created_at, a.votes,
        a.article_img_url, COUNT(c.comment_id) AS comment_count
    FROM articles AS a LEFT JOIN comments AS c ON c.article_id = a.article_id";

/// Columns and joins to fetch articles along with their comment counts from SQLite.
#[cfg(any(feature = "sqlite", test))]
const SQLITE_ARTICLES_QUERY: &str = "
    SELECT
        a.article_id, a.title, a.topic, a.author, a.body, a.created_at_secs,
        a.created_at_nsecs, a.votes, a.article_img_url, COUNT(c.comment_id) AS comment_count
    FROM articles AS a LEFT JOIN comments AS c ON c.article_id = a.article_id";

/// Returns the `ORDER BY` clause for PostgreSQL article listings sorted by `sort_by`.
#[cfg(feature = "postgres")]
fn postgres_order(sort_by: SortBy) -> &'static str {
    match sort_by {
        SortBy::CreatedAt => "a.created_at DESC, a.article_id DESC",
    }
}

/// Returns the `ORDER BY` clause for SQLite article listings sorted by `sort_by`.
#[cfg(any(feature = "sqlite", test))]
fn sqlite_order(sort_by: SortBy) -> &'static str {
    match sort_by {
        SortBy::CreatedAt => "a.created_at_secs DESC, a.created_at_nsecs DESC, a.article_id DESC",
    }
}

/// Validates that a statement modifying the entity `what` touched exactly one row.
fn ensure_one_row(what: &str, affected: u64) -> DbResult<()> {
    match affected {
        0 => Err(DbError::NotFound),
        1 => Ok(()),
        _ => Err(DbError::BackendError(format!("Change to {} affected {} rows", what, affected))),
    }
}

/// Initializes the database schema.
pub async fn init_schema(ex: &mut Executor) -> DbResult<()> {
    match ex {
        #[cfg(feature = "postgres")]
        Executor::Postgres(ex) => postgres::run_schema(ex, include_str!("postgres.sql")).await,

        #[cfg(any(feature = "sqlite", test))]
        Executor::Sqlite(ex) => sqlite::run_schema(ex, include_str!("sqlite.sql")).await,

        #[allow(unused)]
        _ => unreachable!(),
    }
}

#[cfg(feature = "postgres")]
impl TryFrom<PgRow> for Topic {
    type Error = DbError;

    fn try_from(row: PgRow) -> DbResult<Self> {
        let slug: String = row.try_get("slug").map_err(postgres::map_sqlx_error)?;
        let description: String = row.try_get("description").map_err(postgres::map_sqlx_error)?;

        Ok(Topic::new(TopicSlug::new(slug)?, description))
    }
}

#[cfg(feature = "postgres")]
impl TryFrom<PgRow> for User {
    type Error = DbError;

    fn try_from(row: PgRow) -> DbResult<Self> {
        let username: String = row.try_get("username").map_err(postgres::map_sqlx_error)?;
        let name: String = row.try_get("name").map_err(postgres::map_sqlx_error)?;
        let avatar_url: String = row.try_get("avatar_url").map_err(postgres::map_sqlx_error)?;

        Ok(User::new(Username::new(username)?, name, avatar_url))
    }
}

#[cfg(feature = "postgres")]
impl TryFrom<PgRow> for Article {
    type Error = DbError;

    fn try_from(row: PgRow) -> DbResult<Self> {
        let article_id: i32 = row.try_get("article_id").map_err(postgres::map_sqlx_error)?;
        let title: String = row.try_get("title").map_err(postgres::map_sqlx_error)?;
        let topic: String = row.try_get("topic").map_err(postgres::map_sqlx_error)?;
        let author: String = row.try_get("author").map_err(postgres::map_sqlx_error)?;
        let body: String = row.try_get("body").map_err(postgres::map_sqlx_error)?;
        let created_at: OffsetDateTime =
            row.try_get("created_at").map_err(postgres::map_sqlx_error)?;
        let votes: i32 = row.try_get("votes").map_err(postgres::map_sqlx_error)?;
        let article_img_url: String =
            row.try_get("article_img_url").map_err(postgres::map_sqlx_error)?;
        let comment_count: i64 = row.try_get("comment_count").map_err(postgres::map_sqlx_error)?;

        Ok(Article::new(
            ArticleId::from(article_id),
            title,
            TopicSlug::new(topic)?,
            Username::new(author)?,
            body,
            created_at,
            article_img_url,
        )
        .with_votes(votes)
        .with_comment_count(comment_count))
    }
}

#[cfg(feature = "postgres")]
impl TryFrom<PgRow> for Comment {
    type Error = DbError;

    fn try_from(row: PgRow) -> DbResult<Self> {
        let comment_id: i32 = row.try_get("comment_id").map_err(postgres::map_sqlx_error)?;
        let author: String = row.try_get("author").map_err(postgres::map_sqlx_error)?;
        let body: String = row.try_get("body").map_err(postgres::map_sqlx_error)?;
        let article_id: i32 = row.try_get("article_id").map_err(postgres::map_sqlx_error)?;
        let created_at: OffsetDateTime =
            row.try_get("created_at").map_err(postgres::map_sqlx_error)?;
        let votes: i32 = row.try_get("votes").map_err(postgres::map_sqlx_error)?;

        Ok(Comment::new(
            CommentId::from(comment_id),
            Username::new(author)?,
            body,
            ArticleId::from(article_id),
            created_at,
        )
        .with_votes(votes))
    }
}

#[cfg(any(feature = "sqlite", test))]
impl TryFrom<SqliteRow> for Topic {
    type Error = DbError;

    fn try_from(row: SqliteRow) -> DbResult<Self> {
        let slug: String = row.try_get("slug").map_err(sqlite::map_sqlx_error)?;
        let description: String = row.try_get("description").map_err(sqlite::map_sqlx_error)?;

        Ok(Topic::new(TopicSlug::new(slug)?, description))
    }
}

#[cfg(any(feature = "sqlite", test))]
impl TryFrom<SqliteRow> for User {
    type Error = DbError;

    fn try_from(row: SqliteRow) -> DbResult<Self> {
        let username: String = row.try_get("username").map_err(sqlite::map_sqlx_error)?;
        let name: String = row.try_get("name").map_err(sqlite::map_sqlx_error)?;
        let avatar_url: String = row.try_get("avatar_url").map_err(sqlite::map_sqlx_error)?;

        Ok(User::new(Username::new(username)?, name, avatar_url))
    }
}

#[cfg(any(feature = "sqlite", test))]
impl TryFrom<SqliteRow> for Article {
    type Error = DbError;

    fn try_from(row: SqliteRow) -> DbResult<Self> {
        let article_id: i32 = row.try_get("article_id").map_err(sqlite::map_sqlx_error)?;
        let title: String = row.try_get("title").map_err(sqlite::map_sqlx_error)?;
        let topic: String = row.try_get("topic").map_err(sqlite::map_sqlx_error)?;
        let author: String = row.try_get("author").map_err(sqlite::map_sqlx_error)?;
        let body: String = row.try_get("body").map_err(sqlite::map_sqlx_error)?;
        let created_at_secs: i64 = row.try_get("created_at_secs").map_err(sqlite::map_sqlx_error)?;
        let created_at_nsecs: i64 =
            row.try_get("created_at_nsecs").map_err(sqlite::map_sqlx_error)?;
        let votes: i32 = row.try_get("votes").map_err(sqlite::map_sqlx_error)?;
        let article_img_url: String =
            row.try_get("article_img_url").map_err(sqlite::map_sqlx_error)?;
        let comment_count: i64 = row.try_get("comment_count").map_err(sqlite::map_sqlx_error)?;

        Ok(Article::new(
            ArticleId::from(article_id),
            title,
            TopicSlug::new(topic)?,
            Username::new(author)?,
            body,
            build_timestamp(created_at_secs, created_at_nsecs)?,
            article_img_url,
        )
        .with_votes(votes)
        .with_comment_count(comment_count))
    }
}

#[cfg(any(feature = "sqlite", test))]
impl TryFrom<SqliteRow> for Comment {
    type Error = DbError;

    fn try_from(row: SqliteRow) -> DbResult<Self> {
        let comment_id: i32 = row.try_get("comment_id").map_err(sqlite::map_sqlx_error)?;
        let author: String = row.try_get("author").map_err(sqlite::map_sqlx_error)?;
        let body: String = row.try_get("body").map_err(sqlite::map_sqlx_error)?;
        let article_id: i32 = row.try_get("article_id").map_err(sqlite::map_sqlx_error)?;
        let created_at_secs: i64 = row.try_get("created_at_secs").map_err(sqlite::map_sqlx_error)?;
        let created_at_nsecs: i64 =
            row.try_get("created_at_nsecs").map_err(sqlite::map_sqlx_error)?;
        let votes: i32 = row.try_get("votes").map_err(sqlite::map_sqlx_error)?;

        Ok(Comment::new(
            CommentId::from(comment_id),
            Username::new(author)?,
            body,
            ArticleId::from(article_id),
            build_timestamp(created_at_secs, created_at_nsecs)?,
        )
        .with_votes(votes))
    }
}

/// Gets all topics, sorted by slug.
pub(crate) async fn get_topics(ex: &mut Executor) -> DbResult<Vec<Topic>> {
    let mut topics = vec![];
    match ex {
        #[cfg(feature = "postgres")]
        Executor::Postgres(ex) => {
            let query_str = "SELECT slug, description FROM topics ORDER BY slug";
            let mut rows = sqlx::query(query_str).fetch(ex.conn());
            while let Some(row) = rows.try_next().await.map_err(postgres::map_sqlx_error)? {
                topics.push(Topic::try_from(row)?);
            }
        }

        #[cfg(any(feature = "sqlite", test))]
        Executor::Sqlite(ex) => {
            let query_str = "SELECT slug, description FROM topics ORDER BY slug";
            let mut rows = sqlx::query(query_str).fetch(ex.conn());
            while let Some(row) = rows.try_next().await.map_err(sqlite::map_sqlx_error)? {
                topics.push(Topic::try_from(row)?);
            }
        }

        #[allow(unused)]
        _ => unreachable!(),
    }
    Ok(topics)
}

/// Checks whether the topic identified by `slug` exists.
pub(crate) async fn topic_exists(ex: &mut Executor, slug: &TopicSlug) -> DbResult<bool> {
    let count: i64 = match ex {
        #[cfg(feature = "postgres")]
        Executor::Postgres(ex) => {
            let query_str = "SELECT COUNT(*) AS count FROM topics WHERE slug = $1";
            let row = sqlx::query(query_str)
                .bind(slug.as_str())
                .fetch_one(ex.conn())
                .await
                .map_err(postgres::map_sqlx_error)?;
            row.try_get("count").map_err(postgres::map_sqlx_error)?
        }

        #[cfg(any(feature = "sqlite", test))]
        Executor::Sqlite(ex) => {
            let query_str = "SELECT COUNT(*) AS count FROM topics WHERE slug = ?";
            let row = sqlx::query(query_str)
                .bind(slug.as_str())
                .fetch_one(ex.conn())
                .await
                .map_err(sqlite::map_sqlx_error)?;
            row.try_get("count").map_err(sqlite::map_sqlx_error)?
        }

        #[allow(unused)]
        _ => unreachable!(),
    };
    Ok(count > 0)
}

/// Checks whether the article identified by `article_id` exists.
pub(crate) async fn article_exists(ex: &mut Executor, article_id: ArticleId) -> DbResult<bool> {
    let count: i64 = match ex {
        #[cfg(feature = "postgres")]
        Executor::Postgres(ex) => {
            let query_str = "SELECT COUNT(*) AS count FROM articles WHERE article_id = $1";
            let row = sqlx::query(query_str)
                .bind(article_id.as_i32())
                .fetch_one(ex.conn())
                .await
                .map_err(postgres::map_sqlx_error)?;
            row.try_get("count").map_err(postgres::map_sqlx_error)?
        }

        #[cfg(any(feature = "sqlite", test))]
        Executor::Sqlite(ex) => {
            let query_str = "SELECT COUNT(*) AS count FROM articles WHERE article_id = ?";
            let row = sqlx::query(query_str)
                .bind(article_id.as_i32())
                .fetch_one(ex.conn())
                .await
                .map_err(sqlite::map_sqlx_error)?;
            row.try_get("count").map_err(sqlite::map_sqlx_error)?
        }

        #[allow(unused)]
        _ => unreachable!(),
    };
    Ok(count > 0)
}

/// Gets the article identified by `article_id` along with its comment count.
pub(crate) async fn get_article(ex: &mut Executor, article_id: ArticleId) -> DbResult<Article> {
    match ex {
        #[cfg(feature = "postgres")]
        Executor::Postgres(ex) => {
            let query_str =
                format!("{} WHERE a.article_id = $1 GROUP BY a.article_id", POSTGRES_ARTICLES_QUERY);
            let row = sqlx::query(&query_str)
                .bind(article_id.as_i32())
                .fetch_one(ex.conn())
                .await
                .map_err(postgres::map_sqlx_error)?;
            Article::try_from(row)
        }

        #[cfg(any(feature = "sqlite", test))]
        Executor::Sqlite(ex) => {
            let query_str =
                format!("{} WHERE a.article_id = ? GROUP BY a.article_id", SQLITE_ARTICLES_QUERY);
            let row = sqlx::query(&query_str)
                .bind(article_id.as_i32())
                .fetch_one(ex.conn())
                .await
                .map_err(sqlite::map_sqlx_error)?;
            Article::try_from(row)
        }

        #[allow(unused)]
        _ => unreachable!(),
    }
}

/// Gets all articles along with their comment counts, optionally restricted to those filed under
/// `topic`, and sorted in descending order by `sort_by` with the article identifier as the
/// tie-breaker.
///
/// This does not validate that `topic` exists: an unknown topic yields an empty list.
pub(crate) async fn get_articles(
    ex: &mut Executor,
    sort_by: SortBy,
    topic: Option<&TopicSlug>,
) -> DbResult<Vec<Article>> {
    let mut articles = vec![];
    match ex {
        #[cfg(feature = "postgres")]
        Executor::Postgres(ex) => {
            let query_str = format!(
                "{} {} GROUP BY a.article_id ORDER BY {}",
                POSTGRES_ARTICLES_QUERY,
                if topic.is_some() { "WHERE a.topic = $1" } else { "" },
                postgres_order(sort_by),
            );
            let mut query = sqlx::query(&query_str);
            if let Some(topic) = topic {
                query = query.bind(topic.as_str());
            }
            let mut rows = query.fetch(ex.conn());
            while let Some(row) = rows.try_next().await.map_err(postgres::map_sqlx_error)? {
                articles.push(Article::try_from(row)?);
            }
        }

        #[cfg(any(feature = "sqlite", test))]
        Executor::Sqlite(ex) => {
            let query_str = format!(
                "{} {} GROUP BY a.article_id ORDER BY {}",
                SQLITE_ARTICLES_QUERY,
                if topic.is_some() { "WHERE a.topic = ?" } else { "" },
                sqlite_order(sort_by),
            );
            let mut query = sqlx::query(&query_str);
            if let Some(topic) = topic {
                query = query.bind(topic.as_str());
            }
            let mut rows = query.fetch(ex.conn());
            while let Some(row) = rows.try_next().await.map_err(sqlite::map_sqlx_error)? {
                articles.push(Article::try_from(row)?);
            }
        }

        #[allow(unused)]
        _ => unreachable!(),
    }
    Ok(articles)
}

/// Adds `delta` to the votes of the article identified by `article_id` and returns the updated
/// article.
pub(crate) async fn update_article_votes(
    ex: &mut Executor,
    article_id: ArticleId,
    delta: i32,
) -> DbResult<Article> {
    let rows_affected = match ex {
        #[cfg(feature = "postgres")]
        Executor::Postgres(ex) => {
            let query_str = "UPDATE articles SET votes = votes + $1 WHERE article_id = $2";
            let done = sqlx::query(query_str)
                .bind(delta)
                .bind(article_id.as_i32())
                .execute(ex.conn())
                .await
                .map_err(postgres::map_sqlx_error)?;
            done.rows_affected()
        }

        #[cfg(any(feature = "sqlite", test))]
        Executor::Sqlite(ex) => {
            let query_str = "UPDATE articles SET votes = votes + ? WHERE article_id = ?";
            let done = sqlx::query(query_str)
                .bind(delta)
                .bind(article_id.as_i32())
                .execute(ex.conn())
                .await
                .map_err(sqlite::map_sqlx_error)?;
            done.rows_affected()
        }

        #[allow(unused)]
        _ => unreachable!(),
    };
    ensure_one_row("article", rows_affected)?;

    get_article(ex, article_id).await
}

/// Gets all comments posted on the article identified by `article_id`, newest first with the
/// comment identifier as the tie-breaker.
///
/// This does not validate that the article exists: an unknown article yields an empty list.
pub(crate) async fn get_article_comments(
    ex: &mut Executor,
    article_id: ArticleId,
) -> DbResult<Vec<Comment>> {
    let mut comments = vec![];
    match ex {
        #[cfg(feature = "postgres")]
        Executor::Postgres(ex) => {
            let query_str = "
                SELECT comment_id, author, body, article_id, created_at, votes
                FROM comments
                WHERE article_id = $1
                ORDER BY created_at DESC, comment_id DESC";
            let mut rows = sqlx::query(query_str).bind(article_id.as_i32()).fetch(ex.conn());
            while let Some(row) = rows.try_next().await.map_err(postgres::map_sqlx_error)? {
                comments.push(Comment::try_from(row)?);
            }
        }

        #[cfg(any(feature = "sqlite", test))]
        Executor::Sqlite(ex) => {
            let query_str = "
                SELECT
                    comment_id, author, body, article_id, created_at_secs, created_at_nsecs,
                    votes
                FROM comments
                WHERE article_id = ?
                ORDER BY created_at_secs DESC, created_at_nsecs DESC, comment_id DESC";
            let mut rows = sqlx::query(query_str).bind(article_id.as_i32()).fetch(ex.conn());
            while let Some(row) = rows.try_next().await.map_err(sqlite::map_sqlx_error)? {
                comments.push(Comment::try_from(row)?);
            }
        }

        #[allow(unused)]
        _ => unreachable!(),
    }
    Ok(comments)
}

/// Stores `comment` as a new comment on the article identified by `article_id` posted at
/// `created_at`, and returns the stored comment.
///
/// Fails with `DbError::NotFound` if either the article or the author do not exist.
pub(crate) async fn put_comment(
    ex: &mut Executor,
    article_id: ArticleId,
    comment: &NewComment,
    created_at: OffsetDateTime,
) -> DbResult<Comment> {
    let comment_id: i32 = match ex {
        #[cfg(feature = "postgres")]
        Executor::Postgres(ex) => {
            let query_str = "
                INSERT INTO comments (body, article_id, author, created_at)
                VALUES ($1, $2, $3, $4)
                RETURNING comment_id";
            let row = sqlx::query(query_str)
                .bind(comment.body())
                .bind(article_id.as_i32())
                .bind(comment.author().as_str())
                .bind(created_at)
                .fetch_one(ex.conn())
                .await
                .map_err(postgres::map_sqlx_error)?;
            row.try_get("comment_id").map_err(postgres::map_sqlx_error)?
        }

        #[cfg(any(feature = "sqlite", test))]
        Executor::Sqlite(ex) => {
            let (created_at_secs, created_at_nsecs) = unpack_timestamp(created_at)?;

            let query_str = "
                INSERT INTO comments
                    (body, article_id, author, created_at_secs, created_at_nsecs)
                VALUES (?, ?, ?, ?, ?)";
            let done = sqlx::query(query_str)
                .bind(comment.body())
                .bind(article_id.as_i32())
                .bind(comment.author().as_str())
                .bind(created_at_secs)
                .bind(created_at_nsecs)
                .execute(ex.conn())
                .await
                .map_err(sqlite::map_sqlx_error)?;
            i32::try_from(done.last_insert_rowid()).map_err(|e| {
                DbError::DataIntegrityError(format!("Comment identifier out of range: {}", e))
            })?
        }

        #[allow(unused)]
        _ => unreachable!(),
    };

    Ok(Comment::new(
        CommentId::from(comment_id),
        comment.author().clone(),
        comment.body().clone(),
        article_id,
        created_at,
    ))
}

/// Deletes the comment identified by `comment_id`.
pub(crate) async fn delete_comment(ex: &mut Executor, comment_id: CommentId) -> DbResult<()> {
    let rows_affected = match ex {
        #[cfg(feature = "postgres")]
        Executor::Postgres(ex) => {
            let query_str = "DELETE FROM comments WHERE comment_id = $1";
            let done = sqlx::query(query_str)
                .bind(comment_id.as_i32())
                .execute(ex.conn())
                .await
                .map_err(postgres::map_sqlx_error)?;
            done.rows_affected()
        }

        #[cfg(any(feature = "sqlite", test))]
        Executor::Sqlite(ex) => {
            let query_str = "DELETE FROM comments WHERE comment_id = ?";
            let done = sqlx::query(query_str)
                .bind(comment_id.as_i32())
                .execute(ex.conn())
                .await
                .map_err(sqlite::map_sqlx_error)?;
            done.rows_affected()
        }

        #[allow(unused)]
        _ => unreachable!(),
    };
    ensure_one_row("comment", rows_affected)
}

/// Gets all users, sorted by username.
pub(crate) async fn get_users(ex: &mut Executor) -> DbResult<Vec<User>> {
    let mut users = vec![];
    match ex {
        #[cfg(feature = "postgres")]
        Executor::Postgres(ex) => {
            let query_str = "SELECT username, name, avatar_url FROM users ORDER BY username";
            let mut rows = sqlx::query(query_str).fetch(ex.conn());
            while let Some(row) = rows.try_next().await.map_err(postgres::map_sqlx_error)? {
                users.push(User::try_from(row)?);
            }
        }

        #[cfg(any(feature = "sqlite", test))]
        Executor::Sqlite(ex) => {
            let query_str = "SELECT username, name, avatar_url FROM users ORDER BY username";
            let mut rows = sqlx::query(query_str).fetch(ex.conn());
            while let Some(row) = rows.try_next().await.map_err(sqlite::map_sqlx_error)? {
                users.push(User::try_from(row)?);
            }
        }

        #[allow(unused)]
        _ => unreachable!(),
    }
    Ok(users)
}

/// Stores a new `topic`.
#[cfg(test)]
pub(crate) async fn put_topic(ex: &mut Executor, topic: &Topic) -> DbResult<()> {
    let rows_affected = match ex {
        #[cfg(feature = "postgres")]
        Executor::Postgres(ex) => {
            let query_str = "INSERT INTO topics (slug, description) VALUES ($1, $2)";
            let done = sqlx::query(query_str)
                .bind(topic.slug().as_str())
                .bind(topic.description())
                .execute(ex.conn())
                .await
                .map_err(postgres::map_sqlx_error)?;
            done.rows_affected()
        }

        Executor::Sqlite(ex) => {
            let query_str = "INSERT INTO topics (slug, description) VALUES (?, ?)";
            let done = sqlx::query(query_str)
                .bind(topic.slug().as_str())
                .bind(topic.description())
                .execute(ex.conn())
                .await
                .map_err(sqlite::map_sqlx_error)?;
            done.rows_affected()
        }
    };
    ensure_one_row("topic", rows_affected)
}

/// Stores a new `user`.
#[cfg(test)]
pub(crate) async fn put_user(ex: &mut Executor, user: &User) -> DbResult<()> {
    let rows_affected = match ex {
        #[cfg(feature = "postgres")]
        Executor::Postgres(ex) => {
            let query_str = "INSERT INTO users (username, name, avatar_url) VALUES ($1, $2, $3)";
            let done = sqlx::query(query_str)
                .bind(user.username().as_str())
                .bind(user.name())
                .bind(user.avatar_url())
                .execute(ex.conn())
                .await
                .map_err(postgres::map_sqlx_error)?;
            done.rows_affected()
        }

        Executor::Sqlite(ex) => {
            let query_str = "INSERT INTO users (username, name, avatar_url) VALUES (?, ?, ?)";
            let done = sqlx::query(query_str)
                .bind(user.username().as_str())
                .bind(user.name())
                .bind(user.avatar_url())
                .execute(ex.conn())
                .await
                .map_err(sqlite::map_sqlx_error)?;
            done.rows_affected()
        }
    };
    ensure_one_row("user", rows_affected)
}

/// Stores a new `article`, ignoring its identifier and comment count, and returns the identifier
/// assigned to it by the database.
#[cfg(test)]
pub(crate) async fn put_article(ex: &mut Executor, article: &Article) -> DbResult<ArticleId> {
    let article_id: i32 = match ex {
        #[cfg(feature = "postgres")]
        Executor::Postgres(ex) => {
            let query_str = "
                INSERT INTO articles
                    (title, topic, author, body, created_at, votes, article_img_url)
                VALUES ($1, $2, $3, $4, $5, $6, $7)
                RETURNING article_id";
            let row = sqlx::query(query_str)
                .bind(article.title())
                .bind(article.topic().as_str())
                .bind(article.author().as_str())
                .bind(article.body())
                .bind(article.created_at())
                .bind(article.votes())
                .bind(article.article_img_url())
                .fetch_one(ex.conn())
                .await
                .map_err(postgres::map_sqlx_error)?;
            row.try_get("article_id").map_err(postgres::map_sqlx_error)?
        }

        Executor::Sqlite(ex) => {
            let (created_at_secs, created_at_nsecs) = unpack_timestamp(*article.created_at())?;

            let query_str = "
                INSERT INTO articles
                    (title, topic, author, body, created_at_secs, created_at_nsecs, votes,
                    article_img_url)
                VALUES (?, ?, ?, ?, ?, ?, ?, ?)";
            let done = sqlx::query(query_str)
                .bind(article.title())
                .bind(article.topic().as_str())
                .bind(article.author().as_str())
                .bind(article.body())
                .bind(created_at_secs)
                .bind(created_at_nsecs)
                .bind(article.votes())
                .bind(article.article_img_url())
                .execute(ex.conn())
                .await
                .map_err(sqlite::map_sqlx_error)?;
            i32::try_from(done.last_insert_rowid()).map_err(|e| {
                DbError::DataIntegrityError(format!("Article identifier out of range: {}", e))
            })?
        }
    };
    Ok(ArticleId::from(article_id))
}
