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

//! Operations on articles.

use crate::db;
use crate::driver::Driver;
use crate::model::{Article, ArticleId, SortBy, TopicSlug};
use newsroom_core::driver::{BAD_REQUEST_MESSAGE, DriverError, DriverResult, NOT_FOUND_MESSAGE};

impl Driver {
    /// Gets all articles sorted by `sort_by`, optionally restricted to those filed under `topic`.
    ///
    /// Filtering by a topic that does not exist is an error, but filtering by a topic that exists
    /// and has no articles is not.
    pub(crate) async fn get_articles(
        self,
        sort_by: SortBy,
        topic: Option<TopicSlug>,
    ) -> DriverResult<Vec<Article>> {
        let mut tx = self.db.begin().await?;
        if let Some(topic) = topic.as_ref() {
            if !db::topic_exists(tx.ex(), topic).await? {
                return Err(DriverError::NotFound(NOT_FOUND_MESSAGE.to_owned()));
            }
        }
        let articles = db::get_articles(tx.ex(), sort_by, topic.as_ref()).await?;
        tx.commit().await?;
        Ok(articles)
    }

    /// Gets the article identified by `article_id`.
    pub(crate) async fn get_article(self, article_id: ArticleId) -> DriverResult<Article> {
        let article = db::get_article(&mut self.db.ex().await?, article_id).await?;
        Ok(article)
    }

    /// Adjusts the votes of the article identified by `article_id` by `delta` and returns the
    /// updated article.  `delta` is optional only to reject requests that lack it.
    pub(crate) async fn update_article_votes(
        self,
        article_id: ArticleId,
        delta: Option<i32>,
    ) -> DriverResult<Article> {
        let delta = match delta {
            Some(delta) => delta,
            None => return Err(DriverError::InvalidInput(BAD_REQUEST_MESSAGE.to_owned())),
        };

        let mut tx = self.db.begin().await?;
        let article = db::update_article_votes(tx.ex(), article_id, delta).await?;
        tx.commit().await?;
        Ok(article)
    }
}
