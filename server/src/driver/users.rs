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

//! Operations on users.

use crate::db;
use crate::driver::Driver;
use crate::model::User;
use newsroom_core::driver::{DriverError, DriverResult, NOT_FOUND_MESSAGE};

impl Driver {
    /// Gets all users.  An empty user base is reported as a missing entity.
    pub(crate) async fn get_users(self) -> DriverResult<Vec<User>> {
        let users = db::get_users(&mut self.db.ex().await?).await?;
        if users.is_empty() {
            return Err(DriverError::NotFound(NOT_FOUND_MESSAGE.to_owned()));
        }
        Ok(users)
    }
}
