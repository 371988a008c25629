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

//! API to get a single article.

use crate::driver::Driver;
use crate::model::{Article, ArticleId};
use axum::Json;
use axum::extract::{Path, State};
use axum::response::IntoResponse;
use newsroom_core::rest::{EmptyBody, RestError};
use serde::{Deserialize, Serialize};

/// Message returned to the client with the requested article.
#[derive(Debug, Deserialize, Serialize)]
pub(crate) struct ArticleResponse {
    /// The requested article.
    pub(crate) article: Article,
}

/// GET handler for this API.
pub(crate) async fn handler(
    State(driver): State<Driver>,
    Path(article_id): Path<String>,
    _: EmptyBody,
) -> Result<impl IntoResponse, RestError> {
    let article_id = ArticleId::parse(&article_id)?;

    let article = driver.get_article(article_id).await?;
    Ok(Json(ArticleResponse { article }))
}
