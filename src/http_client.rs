/* This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/. */

use std::time::Duration;

use log::{debug, warn};
use reqwest::StatusCode;

use crate::error::FetchError;

pub const DEFAULT_USER_AGENT: &str = concat!("wxobs/", env!("CARGO_PKG_VERSION"));

const TIMEOUT: Duration = Duration::from_secs(10);

/// Something that can retrieve a document by URL.
#[allow(async_fn_in_trait)]
pub trait Fetch {
    async fn fetch(&self, url: &str) -> Result<String, FetchError>;
}

/// Plain HTTP GET with a fixed timeout. No retries.
#[derive(Debug, Clone)]
pub struct HttpFetcher {
    client: reqwest::Client,
}

impl HttpFetcher {
    pub fn new(user_agent: &str) -> Result<Self, FetchError> {
        let client = reqwest::Client::builder()
            .user_agent(user_agent)
            .timeout(TIMEOUT)
            .build()
            .map_err(|e| FetchError::Network(e.to_string()))?;

        Ok(HttpFetcher { client })
    }
}

impl Fetch for HttpFetcher {
    async fn fetch(&self, url: &str) -> Result<String, FetchError> {
        debug!("Fetching {}", url);

        let resp = match self.client.get(url).send().await {
            Ok(r) => r,
            Err(e) => {
                warn!("Could not get url {}: {}", url, e);
                return Err(FetchError::Network(e.to_string()));
            }
        };

        if let Err(e) = check_status(resp.status()) {
            warn!("Could not get url {}: {}", url, e);
            return Err(e);
        }

        let contents = resp
            .text()
            .await
            .map_err(|e| FetchError::Network(e.to_string()))?;

        Ok(contents)
    }
}

fn check_status(status: StatusCode) -> Result<(), FetchError> {
    match status {
        StatusCode::OK => Ok(()),
        s => Err(FetchError::Status(s.as_u16())),
    }
}
