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

//! Operations on comments.

use crate::db;
use crate::driver::Driver;
use crate::model::{ArticleId, Comment, CommentId, NewComment};
use newsroom_core::driver::{DriverError, DriverResult, NOT_FOUND_MESSAGE};

impl Driver {
    /// Gets all comments posted on the article identified by `article_id`.
    ///
    /// An article without comments yields an empty list, whereas a missing article is an error.
    pub(crate) async fn get_article_comments(
        self,
        article_id: ArticleId,
    ) -> DriverResult<Vec<Comment>> {
        let mut tx = self.db.begin().await?;
        if !db::article_exists(tx.ex(), article_id).await? {
            return Err(DriverError::NotFound(NOT_FOUND_MESSAGE.to_owned()));
        }
        let comments = db::get_article_comments(tx.ex(), article_id).await?;
        tx.commit().await?;
        Ok(comments)
    }

    /// Posts `comment` on the article identified by `article_id`, timestamped with the current
    /// time, and returns the stored comment.
    pub(crate) async fn create_comment(
        self,
        article_id: ArticleId,
        comment: NewComment,
    ) -> DriverResult<Comment> {
        let now = self.clock.now_utc();
        let comment = db::put_comment(&mut self.db.ex().await?, article_id, &comment, now).await?;
        Ok(comment)
    }

    /// Deletes the comment identified by `comment_id`.
    pub(crate) async fn delete_comment(self, comment_id: CommentId) -> DriverResult<()> {
        db::delete_comment(&mut self.db.ex().await?, comment_id).await?;
        Ok(())
    }
}
