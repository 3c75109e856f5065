/* This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/. */

use std::collections::BTreeMap;

lazy_static! {
    static ref DEFAULT_STATIONS: BTreeMap<&'static str, &'static str> = {
        let mut m = BTreeMap::new();
        m.insert("KLNK", "Lincoln");
        m.insert("KOMA", "Omaha");
        m
    };
}

/// Known station codes and their display names.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StationTable {
    stations: BTreeMap<String, String>,
}

impl Default for StationTable {
    fn default() -> Self {
        let stations = DEFAULT_STATIONS
            .iter()
            .map(|(code, name)| (code.to_string(), name.to_string()))
            .collect();

        StationTable { stations }
    }
}

impl StationTable {
    pub fn empty() -> Self {
        StationTable {
            stations: BTreeMap::new(),
        }
    }

    /// Add or replace a station.
    pub fn insert(&mut self, code: &str, name: &str) {
        self.stations.insert(code.to_owned(), name.to_owned());
    }

    pub fn name(&self, code: &str) -> Option<&str> {
        self.stations.get(code).map(|s| s.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.stations
            .iter()
            .map(|(code, name)| (code.as_str(), name.as_str()))
    }

    pub fn len(&self) -> usize {
        self.stations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.stations.is_empty()
    }

    /// One `CODE - Name` line per station, ordered by code.
    pub fn listing(&self) -> Vec<String> {
        self.iter()
            .map(|(code, name)| format!("{} - {}", code, name))
            .collect()
    }
}
