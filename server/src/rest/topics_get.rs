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

//! API to list all topics.

use crate::driver::Driver;
use crate::model::Topic;
use axum::Json;
use axum::extract::State;
use axum::response::IntoResponse;
use newsroom_core::rest::{EmptyBody, RestError};
use serde::{Deserialize, Serialize};

/// Message returned to the client with all topics.
#[derive(Debug, Deserialize, Serialize)]
pub(crate) struct TopicsResponse {
    /// All known topics.
    pub(crate) topic: Vec<Topic>,
}

/// GET handler for this API.
pub(crate) async fn handler(
    State(driver): State<Driver>,
    _: EmptyBody,
) -> Result<impl IntoResponse, RestError> {
    let topic = driver.get_topics().await?;
    Ok(Json(TopicsResponse { topic }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::TopicSlug;
    use crate::rest::testutils::*;
    use axum::http;
    use newsroom_core::rest::testutils::*;

    fn route() -> (http::Method, String) {
        (http::Method::GET, "/api/topics".to_owned())
    }

    #[tokio::test]
    async fn test_ok() {
        let context = TestContext::setup_seeded().await;

        let response = OneShotBuilder::new(context.into_app(), route())
            .send_empty()
            .await
            .expect_json::<TopicsResponse>()
            .await;
        assert_eq!(
            vec![
                Topic::new(TopicSlug::from("cats"), "Not dogs".to_owned()),
                Topic::new(
                    TopicSlug::from("mitch"),
                    "The man, the Mitch, the legend".to_owned()
                ),
                Topic::new(TopicSlug::from("paper"), "what books are made of".to_owned()),
            ],
            response.topic
        );
    }

    #[tokio::test]
    async fn test_empty() {
        let context = TestContext::setup().await;

        let response = OneShotBuilder::new(context.into_app(), route())
            .send_empty()
            .await
            .expect_json::<TopicsResponse>()
            .await;
        assert!(response.topic.is_empty());
    }

    test_payload_must_be_empty!(TestContext::setup().await.into_app(), route());
}
