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

//! Test utilities for the REST API.

use crate::db;
use crate::driver::Driver;
use crate::rest::app;
use axum::Router;
use newsroom_core::clocks::testutils::SettableClock;
use newsroom_core::db::{Db, Executor};
use std::sync::Arc;
use time::macros::datetime;

/// State of a running REST test.
pub(crate) struct TestContext {
    /// The database backing the app.
    db: Arc<dyn Db + Send + Sync>,

    /// The clock injected into the app.
    pub(crate) clock: Arc<SettableClock>,

    /// Instance of the app under test.
    app: Router,
}

impl TestContext {
    /// Initializes a REST app backed by an empty in-memory database.
    pub(crate) async fn setup() -> Self {
        let _can_fail = env_logger::builder().is_test(true).try_init();

        let db = Arc::from(newsroom_core::db::sqlite::testutils::setup().await);
        db::init_schema(&mut db.ex().await.unwrap()).await.unwrap();
        let clock = Arc::from(SettableClock::new(datetime!(2023-12-01 05:50:00 UTC)));
        let app = app(Driver::new(db.clone(), clock.clone()));
        Self { db, clock, app }
    }

    /// Initializes a REST app backed by an in-memory database that contains the canonical data
    /// set.
    pub(crate) async fn setup_seeded() -> Self {
        let context = Self::setup().await;
        db::testutils::seed(&mut context.ex().await).await;
        context
    }

    /// Gets a direct executor against the database.
    pub(crate) async fn ex(&self) -> Executor {
        self.db.ex().await.unwrap()
    }

    /// Gets a clone of the app router.
    pub(crate) fn app(&self) -> Router {
        self.app.clone()
    }

    /// Consumes the context and returns the app router.
    pub(crate) fn into_app(self) -> Router {
        self.app
    }
}
