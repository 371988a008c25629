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

//! API to adjust the votes of an article.

use crate::driver::Driver;
use crate::model::{Article, ArticleId};
use axum::Json;
use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, State};
use axum::response::IntoResponse;
use newsroom_core::rest::RestError;
use serde::{Deserialize, Serialize};

/// Message sent to the server to adjust the votes of an article.
#[derive(Default, Deserialize, Serialize)]
pub(crate) struct PatchArticleRequest {
    /// Number of votes to add to the article, which may be negative.
    pub(crate) inc_votes: Option<i32>,
}

/// Message returned to the client with the updated article.
#[derive(Debug, Deserialize, Serialize)]
pub(crate) struct PatchArticleResponse {
    /// The article after applying the adjustment.
    #[serde(rename = "updatedArticle")]
    pub(crate) updated_article: Article,
}

/// PATCH handler for this API.
pub(crate) async fn handler(
    State(driver): State<Driver>,
    Path(article_id): Path<String>,
    request: Result<Json<PatchArticleRequest>, JsonRejection>,
) -> Result<impl IntoResponse, RestError> {
    let article_id = ArticleId::parse(&article_id)?;
    let Json(request) = request?;

    let updated_article = driver.update_article_votes(article_id, request.inc_votes).await?;
    Ok(Json(PatchArticleResponse { updated_article }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db;
    use crate::rest::testutils::*;
    use axum::http;
    use newsroom_core::rest::testutils::*;

    fn route(article_id: &str) -> (http::Method, String) {
        (http::Method::PATCH, format!("/api/articles/{}", article_id))
    }

    #[tokio::test]
    async fn test_increment() {
        let context = TestContext::setup_seeded().await;

        let request = PatchArticleRequest { inc_votes: Some(1) };
        let response = OneShotBuilder::new(context.app(), route("1"))
            .send_json(request)
            .await
            .expect_json::<PatchArticleResponse>()
            .await;
        assert_eq!(ArticleId::from(1), *response.updated_article.article_id());
        assert_eq!(101, *response.updated_article.votes());
        assert_eq!(3, *response.updated_article.comment_count());

        let article = db::get_article(&mut context.ex().await, ArticleId::from(1)).await.unwrap();
        assert_eq!(response.updated_article, article);
    }

    #[tokio::test]
    async fn test_decrement() {
        let context = TestContext::setup_seeded().await;

        let request = PatchArticleRequest { inc_votes: Some(-10) };
        let response = OneShotBuilder::new(context.into_app(), route("2"))
            .send_json(request)
            .await
            .expect_json::<PatchArticleResponse>()
            .await;
        assert_eq!(-10, *response.updated_article.votes());
    }

    #[tokio::test]
    async fn test_response_key() {
        let context = TestContext::setup_seeded().await;

        let request = PatchArticleRequest { inc_votes: Some(0) };
        let response = OneShotBuilder::new(context.into_app(), route("1"))
            .send_json(request)
            .await
            .expect_json::<serde_json::Value>()
            .await;
        assert_eq!(Some(100), response["updatedArticle"]["votes"].as_i64());
    }

    #[tokio::test]
    async fn test_not_found() {
        let context = TestContext::setup_seeded().await;

        let request = PatchArticleRequest { inc_votes: Some(1) };
        OneShotBuilder::new(context.into_app(), route("999"))
            .send_json(request)
            .await
            .expect_status(http::StatusCode::NOT_FOUND)
            .expect_error("^Not found$")
            .await;
    }

    #[tokio::test]
    async fn test_malformed_id() {
        let context = TestContext::setup_seeded().await;

        let request = PatchArticleRequest { inc_votes: Some(1) };
        OneShotBuilder::new(context.into_app(), route("one"))
            .send_json(request)
            .await
            .expect_status(http::StatusCode::BAD_REQUEST)
            .expect_error("^Bad request$")
            .await;
    }

    #[tokio::test]
    async fn test_missing_inc_votes() {
        let context = TestContext::setup_seeded().await;

        OneShotBuilder::new(context.app(), route("1"))
            .send_json(PatchArticleRequest::default())
            .await
            .expect_status(http::StatusCode::BAD_REQUEST)
            .expect_error("^Bad request$")
            .await;

        let article = db::get_article(&mut context.ex().await, ArticleId::from(1)).await.unwrap();
        assert_eq!(100, *article.votes());
    }

    #[tokio::test]
    async fn test_malformed_inc_votes() {
        let context = TestContext::setup_seeded().await;

        for inc_votes in [serde_json::json!("one"), serde_json::json!(1.5)] {
            OneShotBuilder::new(context.app(), route("1"))
                .send_json(serde_json::json!({ "inc_votes": inc_votes }))
                .await
                .expect_status(http::StatusCode::BAD_REQUEST)
                .expect_error("Failed to deserialize")
                .await;
        }

        let article = db::get_article(&mut context.ex().await, ArticleId::from(1)).await.unwrap();
        assert_eq!(100, *article.votes());
    }

    #[tokio::test]
    async fn test_votes_out_of_range() {
        let context = TestContext::setup_seeded().await;

        for inc_votes in [i32::MAX, i32::MAX - 99] {
            OneShotBuilder::new(context.app(), route("1"))
                .send_json(PatchArticleRequest { inc_votes: Some(inc_votes) })
                .await
                .expect_status(http::StatusCode::BAD_REQUEST)
                .expect_error("^Bad request$")
                .await;
        }

        let article = db::get_article(&mut context.ex().await, ArticleId::from(1)).await.unwrap();
        assert_eq!(100, *article.votes());
    }

    test_payload_must_be_json!(TestContext::setup_seeded().await.into_app(), route("1"));
}
