/* This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/. */

//! Current weather observations from the US National Weather Service
//! `current_obs` XML feed.
//!
//! ```no_run
//! # async fn run() -> Result<(), wxobs::ObservationError> {
//! use wxobs::{HttpFetcher, Observation, DEFAULT_USER_AGENT};
//!
//! let fetcher = HttpFetcher::new(DEFAULT_USER_AGENT)?;
//! let obs = Observation::with_station(fetcher, "KLNK").await?;
//! println!("{}", obs.temperature()?);
//! # Ok(())
//! # }
//! ```

#[macro_use]
extern crate lazy_static;

pub mod config;
pub mod error;
pub mod http_client;
pub mod observation;
pub mod stations;

pub use config::{load_config, Config};
pub use error::{ConfigError, FetchError, ObservationError};
pub use http_client::{Fetch, HttpFetcher, DEFAULT_USER_AGENT};
pub use observation::{Field, Observation, DEFAULT_FEED_BASE};
pub use stations::StationTable;
