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

//! API to post a comment on an article.

use crate::driver::Driver;
use crate::model::{ArticleId, Comment, NewComment};
use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, State};
use axum::response::IntoResponse;
use axum::{Json, http};
use newsroom_core::rest::RestError;
use serde::{Deserialize, Serialize};

/// Message sent to the server to post a comment.
#[derive(Default, Deserialize, Serialize)]
pub(crate) struct PostCommentRequest {
    /// Username of the comment's author.  Also accepted as `username`.
    #[serde(alias = "username")]
    pub(crate) author: Option<String>,

    /// Contents of the comment.
    pub(crate) body: Option<String>,
}

/// Message returned to the client with the stored comment.
#[derive(Debug, Deserialize, Serialize)]
pub(crate) struct PostCommentResponse {
    /// The comment as stored.
    pub(crate) comment: Comment,
}

/// POST handler for this API.
pub(crate) async fn handler(
    State(driver): State<Driver>,
    Path(article_id): Path<String>,
    request: Result<Json<PostCommentRequest>, JsonRejection>,
) -> Result<(http::StatusCode, impl IntoResponse), RestError> {
    let Json(request) = request?;
    let comment = NewComment::new(request.author, request.body)?;
    let article_id = ArticleId::parse(&article_id)?;

    let comment = driver.create_comment(article_id, comment).await?;
    Ok((http::StatusCode::CREATED, Json(PostCommentResponse { comment })))
}
