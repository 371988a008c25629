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

//! API to describe all available endpoints.

use axum::Json;
use axum::response::IntoResponse;
use newsroom_core::rest::{EmptyBody, RestError};
use serde::{Deserialize, Serialize};

/// Description of every endpoint offered by the service, served verbatim.
const ENDPOINTS_JSON: &str = include_str!("endpoints.json");

/// Message returned to the client describing the endpoints.
#[derive(Deserialize, Serialize)]
pub(crate) struct EndpointsResponse {
    /// Map of `METHOD /path` descriptors to their documentation.
    pub(crate) endpoints: serde_json::Map<String, serde_json::Value>,
}

/// Parses the endpoints document.
fn parse_endpoints(raw: &str) -> Result<EndpointsResponse, RestError> {
    match serde_json::from_str(raw) {
        Ok(endpoints) => Ok(EndpointsResponse { endpoints }),
        Err(e) => Err(RestError::InternalError(format!("Corrupt endpoints document: {}", e))),
    }
}

/// GET handler for this API.
pub(crate) async fn handler(_: EmptyBody) -> Result<impl IntoResponse, RestError> {
    Ok(Json(parse_endpoints(ENDPOINTS_JSON)?))
}
