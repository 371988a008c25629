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

//! API to delete a comment.

use crate::driver::Driver;
use crate::model::CommentId;
use axum::extract::{Path, State};
use axum::http;
use newsroom_core::rest::{EmptyBody, RestError};

/// DELETE handler for this API.
pub(crate) async fn handler(
    State(driver): State<Driver>,
    Path(comment_id): Path<String>,
    _: EmptyBody,
) -> Result<http::StatusCode, RestError> {
    let comment_id = CommentId::parse(&comment_id)?;

    driver.delete_comment(comment_id).await?;
    Ok(http::StatusCode::NO_CONTENT)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db;
    use crate::model::ArticleId;
    use crate::rest::testutils::*;
    use newsroom_core::rest::testutils::*;

    fn route(comment_id: &str) -> (http::Method, String) {
        (http::Method::DELETE, format!("/api/comments/{}", comment_id))
    }

    #[tokio::test]
    async fn test_ok() {
        let context = TestContext::setup_seeded().await;

        OneShotBuilder::new(context.app(), route("1"))
            .send_empty()
            .await
            .expect_status(http::StatusCode::NO_CONTENT)
            .expect_empty()
            .await;

        let comments =
            db::get_article_comments(&mut context.ex().await, ArticleId::from(1)).await.unwrap();
        assert_eq!(
            vec![2, 4],
            comments.iter().map(|c| c.comment_id().as_i32()).collect::<Vec<i32>>()
        );
    }

    #[tokio::test]
    async fn test_delete_twice() {
        let context = TestContext::setup_seeded().await;

        OneShotBuilder::new(context.app(), route("5"))
            .send_empty()
            .await
            .expect_status(http::StatusCode::NO_CONTENT)
            .expect_empty()
            .await;

        OneShotBuilder::new(context.app(), route("5"))
            .send_empty()
            .await
            .expect_status(http::StatusCode::NOT_FOUND)
            .expect_error("^Not found$")
            .await;
    }

    #[tokio::test]
    async fn test_not_found() {
        let context = TestContext::setup_seeded().await;

        OneShotBuilder::new(context.into_app(), route("999"))
            .send_empty()
            .await
            .expect_status(http::StatusCode::NOT_FOUND)
            .expect_error("^Not found$")
            .await;
    }

    #[tokio::test]
    async fn test_malformed_id() {
        let context = TestContext::setup_seeded().await;

        OneShotBuilder::new(context.into_app(), route("first"))
            .send_empty()
            .await
            .expect_status(http::StatusCode::BAD_REQUEST)
            .expect_error("^Bad request$")
            .await;
    }

    test_payload_must_be_empty!(TestContext::setup_seeded().await.into_app(), route("1"));
}
