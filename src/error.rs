/* This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/. */

use thiserror::Error;

/// Transport level failure while retrieving a document.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FetchError {
    #[error("server answered with HTTP status {0}")]
    Status(u16),

    #[error("network error: {0}")]
    Network(String),
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum ObservationError {
    #[error("could not fetch observation: {0}")]
    Fetch(#[from] FetchError),

    #[error("observation document is not well-formed XML: {0}")]
    Parse(String),

    #[error("field '{0}' is missing from the observation")]
    MissingField(&'static str),

    #[error("field '{field}' has unexpected value '{value}'")]
    Format { field: &'static str, value: String },

    #[error("no station has been set")]
    NotBound,

    #[error("'{0}' is not a valid station code")]
    InvalidStation(String),
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("could not read configuration file: {0}")]
    Io(#[from] std::io::Error),

    #[error("configuration file is not valid YAML: {0}")]
    Yaml(#[from] yaml_rust::ScanError),

    #[error("invalid configuration value for '{key}': {reason}")]
    InvalidValue { key: &'static str, reason: String },
}
