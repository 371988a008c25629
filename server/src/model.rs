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

//! High-level data types.

use derive_getters::Getters;
use derive_more::Constructor;
use newsroom_core::model::{BAD_REQUEST_MESSAGE, ModelError, ModelResult};
use serde::de::Visitor;
use serde::{Deserialize, Serialize};
use std::marker::PhantomData;
use time::OffsetDateTime;

/// Maximum length of a username, in characters.
const MAX_USERNAME_LENGTH: usize = 64;

/// Parses a client-supplied numeric identifier.
fn parse_id(raw: &str) -> ModelResult<i32> {
    raw.parse::<i32>().map_err(|_| ModelError(BAD_REQUEST_MESSAGE.to_owned()))
}

/// A deserialization visitor for string newtypes that validate their contents on construction.
struct ValidatingVisitor<T>(PhantomData<T>);

impl<T: TryFrom<String, Error = ModelError>> Visitor<'_> for ValidatingVisitor<T> {
    type Value = T;

    fn expecting(&self, formatter: &mut std::fmt::Formatter) -> std::fmt::Result {
        formatter.write_str("a string")
    }

    fn visit_str<E>(self, v: &str) -> Result<Self::Value, E>
    where
        E: serde::de::Error,
    {
        T::try_from(v.to_owned()).map_err(|e| E::custom(e.to_string()))
    }

    fn visit_string<E>(self, v: String) -> Result<Self::Value, E>
    where
        E: serde::de::Error,
    {
        T::try_from(v).map_err(|e| E::custom(e.to_string()))
    }
}

/// Identifier of an article.
#[derive(Clone, Copy, Debug, Deserialize, Eq, PartialEq, Serialize)]
#[serde(transparent)]
pub struct ArticleId(i32);

impl ArticleId {
    /// Parses an article identifier as received in a request path.
    pub(crate) fn parse(raw: &str) -> ModelResult<Self> {
        parse_id(raw).map(Self)
    }

    /// Returns the identifier as an `i32` for database queries.
    pub(crate) fn as_i32(&self) -> i32 {
        self.0
    }
}

impl From<i32> for ArticleId {
    fn from(id: i32) -> Self {
        Self(id)
    }
}

/// Identifier of a comment.
#[derive(Clone, Copy, Debug, Deserialize, Eq, PartialEq, Serialize)]
#[serde(transparent)]
pub struct CommentId(i32);

impl CommentId {
    /// Parses a comment identifier as received in a request path.
    pub(crate) fn parse(raw: &str) -> ModelResult<Self> {
        parse_id(raw).map(Self)
    }

    /// Returns the identifier as an `i32` for database queries.
    pub(crate) fn as_i32(&self) -> i32 {
        self.0
    }
}

impl From<i32> for CommentId {
    fn from(id: i32) -> Self {
        Self(id)
    }
}

/// Name of a user account.
#[derive(Clone, Debug, Eq, PartialEq, Serialize)]
#[serde(transparent)]
pub struct Username(String);

impl Username {
    /// Creates a new username after validating its contents.
    pub(crate) fn new<S: Into<String>>(s: S) -> ModelResult<Self> {
        let s = s.into();
        if s.is_empty() {
            return Err(ModelError("Username cannot be empty".to_owned()));
        }
        if s.chars().count() > MAX_USERNAME_LENGTH {
            return Err(ModelError(format!(
                "Username cannot be longer than {} characters",
                MAX_USERNAME_LENGTH
            )));
        }
        Ok(Self(s))
    }

    /// Returns a string view of the username.
    pub(crate) fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for Username {
    type Error = ModelError;

    fn try_from(s: String) -> ModelResult<Self> {
        Username::new(s)
    }
}

impl<'de> Deserialize<'de> for Username {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        deserializer.deserialize_string(ValidatingVisitor(PhantomData))
    }
}

#[cfg(test)]
impl From<&'static str> for Username {
    fn from(s: &'static str) -> Self {
        Username::new(s).unwrap()
    }
}

/// Slug that uniquely identifies a topic.
#[derive(Clone, Debug, Eq, PartialEq, Serialize)]
#[serde(transparent)]
pub struct TopicSlug(String);

impl TopicSlug {
    /// Creates a new slug after validating that it is not empty.
    pub(crate) fn new<S: Into<String>>(s: S) -> ModelResult<Self> {
        let s = s.into();
        if s.is_empty() {
            return Err(ModelError(BAD_REQUEST_MESSAGE.to_owned()));
        }
        Ok(Self(s))
    }

    /// Returns a string view of the slug.
    pub(crate) fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for TopicSlug {
    type Error = ModelError;

    fn try_from(s: String) -> ModelResult<Self> {
        TopicSlug::new(s)
    }
}

impl<'de> Deserialize<'de> for TopicSlug {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        deserializer.deserialize_string(ValidatingVisitor(PhantomData))
    }
}

#[cfg(test)]
impl From<&'static str> for TopicSlug {
    fn from(s: &'static str) -> Self {
        TopicSlug::new(s).unwrap()
    }
}

/// Column by which to sort article listings.  Listings are always in descending order.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub enum SortBy {
    /// Sort by creation time, newest first.
    #[default]
    CreatedAt,
}

impl SortBy {
    /// Parses the value of a `sort_by` query parameter.
    pub(crate) fn parse(raw: &str) -> ModelResult<Self> {
        match raw {
            "created_at" => Ok(SortBy::CreatedAt),
            _ => Err(ModelError("Invalid sort by query".to_owned())),
        }
    }
}

/// A topic under which articles are filed.
#[derive(Constructor, Debug, Deserialize, Getters, PartialEq, Serialize)]
pub struct Topic {
    /// Unique identifier of the topic.
    slug: TopicSlug,

    /// Human-readable description of the topic.
    description: String,
}

/// A registered user.
#[derive(Constructor, Debug, Deserialize, Getters, PartialEq, Serialize)]
pub struct User {
    /// Unique name of the user.
    username: Username,

    /// Display name of the user.
    name: String,

    /// URL to the user's avatar image.
    avatar_url: String,
}

/// An article along with the number of comments it has received.
#[derive(Clone, Debug, Deserialize, Getters, PartialEq, Serialize)]
pub struct Article {
    /// Unique identifier of the article.
    article_id: ArticleId,

    /// Headline.
    title: String,

    /// Topic the article is filed under.
    topic: TopicSlug,

    /// User that wrote the article.
    author: Username,

    /// Contents.
    body: String,

    /// Publication time.
    #[serde(with = "time::serde::rfc3339")]
    created_at: OffsetDateTime,

    /// Net number of votes.
    votes: i32,

    /// URL to the image illustrating the article.
    article_img_url: String,

    /// Number of comments attached to the article.
    comment_count: i64,
}

impl Article {
    /// Creates a new article with no votes and no comments.
    pub(crate) fn new(
        article_id: ArticleId,
        title: String,
        topic: TopicSlug,
        author: Username,
        body: String,
        created_at: OffsetDateTime,
        article_img_url: String,
    ) -> Self {
        Self {
            article_id,
            title,
            topic,
            author,
            body,
            created_at,
            votes: 0,
            article_img_url,
            comment_count: 0,
        }
    }

    /// Modifies the article to carry `votes` votes.
    pub(crate) fn with_votes(mut self, votes: i32) -> Self {
        self.votes = votes;
        self
    }

    /// Modifies the article to carry `comment_count` comments.
    pub(crate) fn with_comment_count(mut self, comment_count: i64) -> Self {
        self.comment_count = comment_count;
        self
    }
}

/// A comment posted on an article.
#[derive(Clone, Debug, Deserialize, Getters, PartialEq, Serialize)]
pub struct Comment {
    /// Unique identifier of the comment.
    comment_id: CommentId,

    /// User that posted the comment.
    author: Username,

    /// Contents.
    body: String,

    /// Article the comment belongs to.
    article_id: ArticleId,

    /// Time the comment was posted.
    #[serde(with = "time::serde::rfc3339")]
    created_at: OffsetDateTime,

    /// Net number of votes.
    votes: i32,
}

impl Comment {
    /// Creates a new comment with no votes.
    pub(crate) fn new(
        comment_id: CommentId,
        author: Username,
        body: String,
        article_id: ArticleId,
        created_at: OffsetDateTime,
    ) -> Self {
        Self { comment_id, author, body, article_id, created_at, votes: 0 }
    }

    /// Modifies the comment to carry `votes` votes.
    pub(crate) fn with_votes(mut self, votes: i32) -> Self {
        self.votes = votes;
        self
    }
}

/// Validated contents of a comment that has not been stored yet.
#[derive(Debug, Getters, PartialEq)]
pub struct NewComment {
    /// User posting the comment.
    author: Username,

    /// Contents.
    body: String,
}

impl NewComment {
    /// Creates a new comment from the fields supplied by a client, rejecting missing or empty
    /// values.
    pub(crate) fn new(author: Option<String>, body: Option<String>) -> ModelResult<Self> {
        match (author, body) {
            (Some(author), Some(body)) if !author.is_empty() && !body.is_empty() => {
                Ok(Self { author: Username::new(author)?, body })
            }
            _ => Err(ModelError(BAD_REQUEST_MESSAGE.to_owned())),
        }
    }
}
