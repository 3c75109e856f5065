/* This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/. */

//! Current conditions from the NWS `current_obs` XML feed.

use std::borrow::Cow;

use chrono::{DateTime, FixedOffset};
use log::{debug, info};
use regex::Regex;
use url::Url;

use crate::error::ObservationError;
use crate::http_client::Fetch;

pub const DEFAULT_FEED_BASE: &str = "https://w1.weather.gov/xml/current_obs/";

const KM_PER_MILE: f64 = 1.609344;

lazy_static! {
    static ref RE_STATION: Regex = Regex::new(r"^[A-Za-z0-9]{3,5}$").unwrap();
    static ref RE_XML_DECL: Regex = Regex::new(r"^\s*<\?xml\s[^?]*\?>").unwrap();
    pub(crate) static ref FEED_BASE: Url = Url::parse(DEFAULT_FEED_BASE).unwrap();
}

/// Elements of a `current_observation` document.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    Location,
    StationId,
    ObservationTime,
    Weather,
    TempF,
    TempC,
    RelativeHumidity,
    WindString,
    DewpointF,
    DewpointC,
    PressureMb,
    PressureIn,
    VisibilityMi,
}

impl Field {
    pub fn tag(self) -> &'static str {
        match self {
            Field::Location => "location",
            Field::StationId => "station_id",
            Field::ObservationTime => "observation_time_rfc822",
            Field::Weather => "weather",
            Field::TempF => "temp_f",
            Field::TempC => "temp_c",
            Field::RelativeHumidity => "relative_humidity",
            Field::WindString => "wind_string",
            Field::DewpointF => "dewpoint_f",
            Field::DewpointC => "dewpoint_c",
            Field::PressureMb => "pressure_mb",
            Field::PressureIn => "pressure_in",
            Field::VisibilityMi => "visibility_mi",
        }
    }
}

#[derive(Debug)]
struct Binding {
    station: String,
    url: Url,
    raw: String,
    root: xmltree::Element,
}

/// The last successfully parsed report for one station.
///
/// An `Observation` is either unbound, in which case every accessor fails
/// with [`ObservationError::NotBound`], or bound to the document of the last
/// successful [`set_station`](Observation::set_station). A failed
/// `set_station` keeps whatever binding was there before.
///
/// Not meant to be mutated from several threads at once; wrap it in a lock
/// if you need that.
#[derive(Debug)]
pub struct Observation<F> {
    fetcher: F,
    feed_base: Url,
    binding: Option<Binding>,
}

impl<F: Fetch> Observation<F> {
    pub fn new(fetcher: F) -> Self {
        Observation {
            fetcher,
            feed_base: FEED_BASE.clone(),
            binding: None,
        }
    }

    pub async fn with_station(fetcher: F, code: &str) -> Result<Self, ObservationError> {
        let mut obs = Observation::new(fetcher);
        obs.set_station(code).await?;
        Ok(obs)
    }

    /// Use another feed location. Station documents are looked up as
    /// `<base>/<code>.xml`.
    pub fn with_feed_base(mut self, base: Url) -> Self {
        self.feed_base = base;
        self
    }

    pub fn station_url(&self, code: &str) -> Result<Url, ObservationError> {
        if !RE_STATION.is_match(code) {
            return Err(ObservationError::InvalidStation(code.to_owned()));
        }

        self.feed_base
            .join(&format!("{}.xml", code))
            .map_err(|_| ObservationError::InvalidStation(code.to_owned()))
    }

    /// Fetch and parse the current report for `code`.
    pub async fn set_station(&mut self, code: &str) -> Result<(), ObservationError> {
        let url = self.station_url(code)?;
        let raw = self.fetcher.fetch(url.as_str()).await?;
        let root = parse_document(&raw)?;

        info!("Bound observation to station {}", code);
        self.binding = Some(Binding {
            station: code.to_owned(),
            url,
            raw,
            root,
        });

        Ok(())
    }

    pub fn is_bound(&self) -> bool {
        self.binding.is_some()
    }
}

impl<F> Observation<F> {
    fn binding(&self) -> Result<&Binding, ObservationError> {
        self.binding.as_ref().ok_or(ObservationError::NotBound)
    }

    /// The code given to the last successful `set_station`.
    pub fn station(&self) -> Result<&str, ObservationError> {
        Ok(&self.binding()?.station)
    }

    pub fn url(&self) -> Result<&Url, ObservationError> {
        Ok(&self.binding()?.url)
    }

    pub fn raw_document(&self) -> Result<&str, ObservationError> {
        Ok(&self.binding()?.raw)
    }

    /// Trimmed text of `field`. An empty element gives an empty string.
    pub fn text(&self, field: Field) -> Result<Cow<'_, str>, ObservationError> {
        let root = &self.binding()?.root;
        let element = root
            .get_child(field.tag())
            .ok_or(ObservationError::MissingField(field.tag()))?;

        Ok(match element.get_text() {
            Some(Cow::Borrowed(s)) => Cow::Borrowed(s.trim()),
            Some(Cow::Owned(s)) => Cow::Owned(s.trim().to_owned()),
            None => Cow::Borrowed(""),
        })
    }

    pub fn value(&self, field: Field) -> Result<f64, ObservationError> {
        self.number(field).map(|(_, v)| v)
    }

    // Source text alongside the parsed number, so output keeps the feed's precision.
    fn number(&self, field: Field) -> Result<(Cow<'_, str>, f64), ObservationError> {
        let text = self.text(field)?;
        match text.parse::<f64>() {
            Ok(v) if v.is_finite() => Ok((text, v)),
            _ => {
                debug!("Field {} is not a number: '{}'", field.tag(), text);
                Err(ObservationError::Format {
                    field: field.tag(),
                    value: text.into_owned(),
                })
            }
        }
    }

    /// Station name as the feed reports it.
    pub fn location(&self) -> Result<String, ObservationError> {
        Ok(self.text(Field::Location)?.into_owned())
    }

    pub fn station_id(&self) -> Result<String, ObservationError> {
        Ok(self.text(Field::StationId)?.into_owned())
    }

    pub fn observation_time(&self) -> Result<DateTime<FixedOffset>, ObservationError> {
        let text = self.text(Field::ObservationTime)?;
        DateTime::parse_from_rfc2822(&text).map_err(|_| ObservationError::Format {
            field: Field::ObservationTime.tag(),
            value: text.into_owned(),
        })
    }

    pub fn temperature(&self) -> Result<String, ObservationError> {
        let (f, _) = self.number(Field::TempF)?;
        let (c, _) = self.number(Field::TempC)?;
        Ok(format!("{}°F ({}°C)", f, c))
    }

    pub fn relative_humidity(&self) -> Result<String, ObservationError> {
        let (h, _) = self.number(Field::RelativeHumidity)?;
        Ok(format!("{}%", h))
    }

    pub fn weather(&self) -> Result<String, ObservationError> {
        Ok(self.text(Field::Weather)?.into_owned())
    }

    pub fn wind_info(&self) -> Result<String, ObservationError> {
        Ok(self.text(Field::WindString)?.into_owned())
    }

    /// Celsius first, unlike [`temperature`](Observation::temperature).
    pub fn dewpoint(&self) -> Result<String, ObservationError> {
        let (c, _) = self.number(Field::DewpointC)?;
        let (f, _) = self.number(Field::DewpointF)?;
        Ok(format!("{}°C ({}°F)", c, f))
    }

    pub fn pressure(&self) -> Result<String, ObservationError> {
        let (mb, _) = self.number(Field::PressureMb)?;
        Ok(format!("{} mb", mb))
    }

    pub fn altimeter(&self) -> Result<String, ObservationError> {
        let (inches, _) = self.number(Field::PressureIn)?;
        Ok(format!("{} in Hg", inches))
    }

    pub fn visibility(&self) -> Result<String, ObservationError> {
        let (mi_text, mi) = self.number(Field::VisibilityMi)?;
        Ok(format!("{} mi ({} km)", mi_text, mi * KM_PER_MILE))
    }

    pub fn to_display_string(&self) -> Result<String, ObservationError> {
        let lines = [
            ("Location", self.location()?),
            ("Weather", self.weather()?),
            ("Temperature", self.temperature()?),
            ("Dewpoint", self.dewpoint()?),
            ("Relative Humidity", self.relative_humidity()?),
            ("Wind", self.wind_info()?),
            ("Visibility", self.visibility()?),
            ("Pressure", self.pressure()?),
            ("Altimeter", self.altimeter()?),
        ];

        let mut msg = String::new();
        for (label, value) in lines.iter() {
            msg.push_str(&format!("{}: {}\n", label, value));
        }

        Ok(msg)
    }
}

// The text is already decoded, so whatever encoding the declaration names no
// longer applies to these bytes.
fn parse_document(raw: &str) -> Result<xmltree::Element, ObservationError> {
    let xml = RE_XML_DECL.replace(raw, r#"<?xml version="1.0" encoding="UTF-8"?>"#);
    xmltree::Element::parse(xml.as_bytes()).map_err(|e| ObservationError::Parse(e.to_string()))
}
