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

//! API to list all users.

use crate::driver::Driver;
use crate::model::User;
use axum::Json;
use axum::extract::State;
use axum::response::IntoResponse;
use newsroom_core::rest::{EmptyBody, RestError};
use serde::{Deserialize, Serialize};

/// Message returned to the client with all users.
#[derive(Debug, Deserialize, Serialize)]
pub(crate) struct UsersResponse {
    /// All registered users.
    pub(crate) users: Vec<User>,
}

/// GET handler for this API.
pub(crate) async fn handler(
    State(driver): State<Driver>,
    _: EmptyBody,
) -> Result<impl IntoResponse, RestError> {
    let users = driver.get_users().await?;
    Ok(Json(UsersResponse { users }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Username;
    use crate::rest::testutils::*;
    use axum::http;
    use newsroom_core::rest::testutils::*;

    fn route() -> (http::Method, String) {
        (http::Method::GET, "/api/users".to_owned())
    }

    #[tokio::test]
    async fn test_ok() {
        let context = TestContext::setup_seeded().await;

        let response = OneShotBuilder::new(context.into_app(), route())
            .send_empty()
            .await
            .expect_json::<UsersResponse>()
            .await;
        assert_eq!(4, response.users.len());
        assert_eq!(
            User::new(
                Username::from("butter_bridge"),
                "jonny".to_owned(),
                "https://avatars.example.com/butter_bridge.png".to_owned()
            ),
            response.users[0]
        );
    }

    #[tokio::test]
    async fn test_no_users() {
        let context = TestContext::setup().await;

        OneShotBuilder::new(context.into_app(), route())
            .send_empty()
            .await
            .expect_status(http::StatusCode::NOT_FOUND)
            .expect_error("^Not found$")
            .await;
    }

    test_payload_must_be_empty!(TestContext::setup().await.into_app(), route());
}
