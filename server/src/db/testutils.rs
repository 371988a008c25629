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

//! Canonical data set used by tests across all layers.

use crate::db::{put_article, put_comment, put_topic, put_user};
use crate::model::*;
use newsroom_core::db::Executor;
use time::OffsetDateTime;
use time::macros::datetime;

/// Title of the first article in the data set.
pub(crate) const FIRST_ARTICLE_TITLE: &str = "Living in the shadow of a great man";

/// Builds an article for insertion; the identifier is assigned by the database.
pub(crate) fn new_article(
    title: &str,
    topic: &'static str,
    author: &'static str,
    body: &str,
    created_at: OffsetDateTime,
) -> Article {
    Article::new(
        ArticleId::from(0),
        title.to_owned(),
        TopicSlug::from(topic),
        Username::from(author),
        body.to_owned(),
        created_at,
        format!("https://images.example.com/{}.jpg", created_at.unix_timestamp()),
    )
}

/// Builds a comment for insertion.
pub(crate) fn new_comment(author: &str, body: &str) -> NewComment {
    NewComment::new(Some(author.to_owned()), Some(body.to_owned())).unwrap()
}

/// Populates the database with the canonical data set.
///
/// The data set contains:
///
/// *   Three topics: `cats`, `mitch` and `paper`, the latter without articles.
/// *   Four users: `butter_bridge`, `icellusedkars`, `lurker` and `rogersop`.
/// *   Four articles with identifiers 1 to 4.  Article 1 has 100 votes and three comments
///     (identifiers 1, 2 and 4), article 3 has two comments (identifiers 3 and 5), and articles 2
///     and 4 have no comments.  From newest to oldest: 3, 2, 4, 1.
pub(crate) async fn seed(ex: &mut Executor) {
    for (slug, description) in [
        ("mitch", "The man, the Mitch, the legend"),
        ("cats", "Not dogs"),
        ("paper", "what books are made of"),
    ] {
        put_topic(ex, &Topic::new(TopicSlug::from(slug), description.to_owned())).await.unwrap();
    }

    for (username, name) in [
        ("butter_bridge", "jonny"),
        ("icellusedkars", "sam"),
        ("rogersop", "paul"),
        ("lurker", "do_nothing"),
    ] {
        let user = User::new(
            Username::from(username),
            name.to_owned(),
            format!("https://avatars.example.com/{}.png", username),
        );
        put_user(ex, &user).await.unwrap();
    }

    let articles = [
        new_article(
            FIRST_ARTICLE_TITLE,
            "mitch",
            "butter_bridge",
            "I find this existence challenging",
            datetime!(2020-07-09 20:11:00 UTC),
        )
        .with_votes(100),
        new_article(
            "Sony Vaio; or, The Laptop",
            "mitch",
            "icellusedkars",
            "Call me Mitchell. Some years ago I bought a laptop.",
            datetime!(2020-10-16 05:03:00 UTC),
        ),
        new_article(
            "Eight pug gifs that remind me of mitch",
            "mitch",
            "icellusedkars",
            "some gifs",
            datetime!(2020-11-03 09:12:00 UTC),
        ),
        new_article(
            "UNCOVERED: catspiracy to bring down democracy",
            "cats",
            "rogersop",
            "Bastet walks amongst us, and the cats are taking arms!",
            datetime!(2020-08-03 13:14:00 UTC),
        ),
    ];
    for (i, article) in articles.iter().enumerate() {
        let article_id = put_article(ex, article).await.unwrap();
        assert_eq!(ArticleId::from(i as i32 + 1), article_id, "Unexpected identifier assignment");
    }

    for (article_id, author, body, created_at) in [
        (
            1,
            "butter_bridge",
            "Oh, I've got compassion running out of my nose, pal!",
            datetime!(2020-04-06 12:17:00 UTC),
        ),
        (
            1,
            "icellusedkars",
            "The beautiful thing about treasure is that it exists.",
            datetime!(2020-11-03 21:00:00 UTC),
        ),
        (3, "icellusedkars", "Ambidextrous marsupial", datetime!(2020-09-19 23:10:00 UTC)),
        (
            1,
            "icellusedkars",
            "I carry a log. Is it funny to you? It is not to me.",
            datetime!(2020-02-23 12:01:00 UTC),
        ),
        (3, "butter_bridge", "git push origin master", datetime!(2020-06-20 07:24:00 UTC)),
    ] {
        put_comment(ex, ArticleId::from(article_id), &new_comment(author, body), created_at)
            .await
            .unwrap();
    }
}
