/* This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/. */

use std::fs::File;
use std::io::prelude::*;
use std::io::ErrorKind;
use std::path::Path;

use log::{error, info};
use url::Url;
use yaml_rust::yaml::{Yaml, YamlLoader};

use crate::error::ConfigError;
use crate::http_client::DEFAULT_USER_AGENT;
use crate::observation::FEED_BASE;
use crate::stations::StationTable;

#[derive(Debug, Clone)]
pub struct Config {
    pub feed_base: Url,
    pub user_agent: String,
    pub stations: StationTable,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            feed_base: FEED_BASE.clone(),
            user_agent: DEFAULT_USER_AGENT.to_owned(),
            stations: StationTable::default(),
        }
    }
}

fn read_config_file(path: &Path) -> Result<Option<String>, ConfigError> {
    let mut file = match File::open(path) {
        Ok(file) => file,
        Err(e) if e.kind() == ErrorKind::NotFound => {
            info!("No {} found, using defaults", path.display());
            return Ok(None);
        }
        Err(e) => {
            error!("Error when opening {}", path.display());
            return Err(e.into());
        }
    };

    let mut s = String::new();
    if let Err(e) = file.read_to_string(&mut s) {
        error!("Error when reading {}", path.display());
        return Err(e.into());
    }

    Ok(Some(s))
}

/// Load configuration from `path`. A missing file gives the defaults.
pub fn load_config(path: &Path) -> Result<Config, ConfigError> {
    match read_config_file(path)? {
        Some(s) => {
            let config = parse_config(&s)?;
            info!("Successfully read {}", path.display());
            Ok(config)
        }
        None => Ok(Config::default()),
    }
}

pub fn parse_config(s: &str) -> Result<Config, ConfigError> {
    let docs = YamlLoader::load_from_str(s)?;
    let mut config = Config::default();

    let doc = match docs.first() {
        Some(d) => d,
        None => return Ok(config),
    };

    if let Some(base) = string_value(doc, "feed_base")? {
        let mut base = base.to_owned();
        // Url::join would drop the last path segment otherwise.
        if !base.ends_with('/') {
            base.push('/');
        }
        config.feed_base = Url::parse(&base).map_err(|e| ConfigError::InvalidValue {
            key: "feed_base",
            reason: e.to_string(),
        })?;
    }

    if let Some(ua) = string_value(doc, "user_agent")? {
        config.user_agent = ua.to_owned();
    }

    match &doc["stations"] {
        Yaml::BadValue | Yaml::Null => {}
        Yaml::Hash(h) => {
            for (code, name) in h {
                match (code.as_str(), name.as_str()) {
                    (Some(c), Some(n)) => config.stations.insert(c, n),
                    _ => {
                        return Err(ConfigError::InvalidValue {
                            key: "stations",
                            reason: format!("expected CODE: Name, got {:?}: {:?}", code, name),
                        });
                    }
                }
            }
        }
        _ => {
            return Err(ConfigError::InvalidValue {
                key: "stations",
                reason: "expected a mapping of station codes to names".to_owned(),
            });
        }
    }

    Ok(config)
}

fn string_value<'a>(doc: &'a Yaml, key: &'static str) -> Result<Option<&'a str>, ConfigError> {
    match &doc[key] {
        Yaml::BadValue | Yaml::Null => Ok(None),
        Yaml::String(s) => Ok(Some(s.as_str())),
        _ => Err(ConfigError::InvalidValue {
            key,
            reason: "expected a string".to_owned(),
        }),
    }
}
