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

//! Entry point to the REST server.

use crate::driver::Driver;
use axum::Router;
use newsroom_core::driver::NOT_FOUND_MESSAGE;
use newsroom_core::rest::{METHOD_NOT_ALLOWED_MESSAGE, RestError};

mod api_get;
mod article_comments_get;
mod article_comments_post;
mod article_get;
mod article_patch;
mod articles_get;
mod comment_delete;
#[cfg(test)]
mod testutils;
mod topics_get;
mod users_get;

/// Handler for requests that do not match any route.
async fn fallback() -> RestError {
    RestError::NotFound(NOT_FOUND_MESSAGE.to_owned())
}

/// Handler for requests to a known route with a method that the route does not support.
async fn method_not_allowed() -> RestError {
    RestError::MethodNotAllowed(METHOD_NOT_ALLOWED_MESSAGE.to_owned())
}

/// Creates the router for the application.
pub(crate) fn app(driver: Driver) -> Router {
    use axum::routing::{delete, get};

    Router::new()
        .route("/api", get(api_get::handler).fallback(method_not_allowed))
        .route("/api/topics", get(topics_get::handler).fallback(method_not_allowed))
        .route("/api/articles", get(articles_get::handler).fallback(method_not_allowed))
        .route(
            "/api/articles/:article_id",
            get(article_get::handler).patch(article_patch::handler).fallback(method_not_allowed),
        )
        .route(
            "/api/articles/:article_id/comments",
            get(article_comments_get::handler)
                .post(article_comments_post::handler)
                .fallback(method_not_allowed),
        )
        .route(
            "/api/comments/:comment_id",
            delete(comment_delete::handler).fallback(method_not_allowed),
        )
        .route("/api/users", get(users_get::handler).fallback(method_not_allowed))
        .fallback(fallback)
        .with_state(driver)
}
