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

//! API to list articles.

use crate::driver::Driver;
use crate::model::{Article, SortBy, TopicSlug};
use axum::Json;
use axum::extract::rejection::QueryRejection;
use axum::extract::{Query, State};
use axum::response::IntoResponse;
use newsroom_core::rest::{EmptyBody, RestError};
use serde::{Deserialize, Serialize};

/// Optional query parameters accepted by this API.
#[derive(Default, Deserialize, Serialize)]
pub(crate) struct ArticlesQuery {
    /// Column to sort the articles by.
    pub(crate) sort_by: Option<String>,

    /// Slug of the topic to restrict the articles to.
    pub(crate) topic: Option<String>,
}

/// Message returned to the client with the matching articles.
#[derive(Debug, Deserialize, Serialize)]
pub(crate) struct ArticlesResponse {
    /// The matching articles, in order.
    pub(crate) article: Vec<Article>,
}

/// GET handler for this API.
pub(crate) async fn handler(
    State(driver): State<Driver>,
    query: Result<Query<ArticlesQuery>, QueryRejection>,
    _: EmptyBody,
) -> Result<impl IntoResponse, RestError> {
    let Query(query) = query?;

    let sort_by = match query.sort_by {
        Some(sort_by) => SortBy::parse(&sort_by)?,
        None => SortBy::default(),
    };
    let topic = query.topic.map(TopicSlug::new).transpose()?;

    let article = driver.get_articles(sort_by, topic).await?;
    Ok(Json(ArticlesResponse { article }))
}
