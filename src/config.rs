/*
Copyright 2020 Timo Saarinen

Licensed under the Apache License, Version 2.0 (the "License");
you may not use this file except in compliance with the License.
You may obtain a copy of the License at

    http://www.apache.org/licenses/LICENSE-2.0

Unless required by applicable law or agreed to in writing, software
distributed under the License is distributed on an "AS IS" BASIS,
WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
See the License for the specific language governing permissions and
limitations under the License.
*/

//! Loading and dumping the JSON documents the core consumes and produces
//! (§6.2, §6.4). This is I/O glue around the core, not the core itself:
//! the validation happens entirely inside `Track::new`.

use std::fs;
use std::net::Ipv4Addr;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::ValidationError;
use crate::track::{ShipDimension, ShipEta, Track, TrackFields};

#[derive(Clone, Debug, Deserialize)]
struct RawShipDimension {
    to_bow: Option<u16>,
    to_stern: Option<u16>,
    to_port: Option<u8>,
    to_starboard: Option<u8>,
}

#[derive(Clone, Debug, Deserialize)]
struct RawShipEta {
    month: u8,
    day: u8,
    hour: u8,
    minute: u8,
}

fn default_true_heading() -> u16 {
    511
}

fn default_timestamp() -> u8 {
    60
}

#[derive(Clone, Debug, Deserialize)]
struct RawTrack {
    mmsi: u32,
    nav_status: u8,
    lon: f64,
    lat: f64,
    #[serde(default)]
    speed: f64,
    course: f64,
    #[serde(default = "default_true_heading")]
    true_heading: u16,
    #[serde(default)]
    imo: Option<u32>,
    call_sign: String,
    ship_name: String,
    ship_type: u8,
    #[serde(default)]
    dimension: Option<RawShipDimension>,
    #[serde(default)]
    eta: Option<RawShipEta>,
    #[serde(default)]
    draught: f64,
    destination: String,
    #[serde(default = "default_timestamp")]
    timestamp: u8,
}

#[derive(Clone, Debug, Deserialize)]
struct RawTrackList {
    tracks: Vec<RawTrack>,
}

fn track_fields_from_raw(raw: RawTrack) -> Result<TrackFields, ValidationError> {
    let dimension = match raw.dimension {
        Some(d) => ShipDimension::from_partial(d.to_bow, d.to_stern, d.to_port, d.to_starboard),
        None => ShipDimension::default(),
    };
    let eta = match raw.eta {
        Some(e) => ShipEta::new(e.month, e.day, e.hour, e.minute)?,
        None => ShipEta::default(),
    };
    Ok(TrackFields {
        mmsi: raw.mmsi,
        nav_status: raw.nav_status,
        lon: raw.lon,
        lat: raw.lat,
        speed: raw.speed,
        course: raw.course,
        true_heading: raw.true_heading,
        imo: raw.imo,
        call_sign: raw.call_sign,
        ship_name: raw.ship_name,
        ship_type: raw.ship_type,
        dimension,
        eta,
        draught: raw.draught,
        destination: raw.destination,
        timestamp: raw.timestamp,
    })
}

/// Error loading a track list or client list document.
#[derive(Debug)]
pub enum LoadError {
    Io(std::io::Error),
    Json(serde_json::Error),
    /// `check item with no <index>, "<field>" <reason>` — the message
    /// format the external front-end prints for a bad track document.
    Track { index: usize, source: ValidationError },
    ClientListSize(usize),
}

impl std::fmt::Display for LoadError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LoadError::Io(e) => write!(f, "{}", e),
            LoadError::Json(e) => write!(f, "{}", e),
            LoadError::Track { index, source } => {
                write!(f, "check item with no {}, \"{}\" {}", index, source.field, source.reason)
            }
            LoadError::ClientListSize(n) => {
                write!(f, "client list must have 1 to 10 entries, got {}", n)
            }
        }
    }
}

impl std::error::Error for LoadError {}

impl From<std::io::Error> for LoadError {
    fn from(e: std::io::Error) -> Self {
        LoadError::Io(e)
    }
}

impl From<serde_json::Error> for LoadError {
    fn from(e: serde_json::Error) -> Self {
        LoadError::Json(e)
    }
}

/// Loads and validates the track list document (§6.2). `now` is used as
/// every track's initial `_updated_at`.
pub fn load_track_list(path: impl AsRef<Path>, now: f64) -> Result<Vec<Track>, LoadError> {
    let data = fs::read_to_string(path)?;
    let raw: RawTrackList = serde_json::from_str(&data)?;
    raw.tracks
        .into_iter()
        .enumerate()
        .map(|(index, raw_track)| {
            let fields = track_fields_from_raw(raw_track)
                .map_err(|source| LoadError::Track { index, source })?;
            Track::new(fields, now).map_err(|source| LoadError::Track { index, source })
        })
        .collect()
}

/// A single UDP fan-out destination (§6.2).
#[derive(Clone, Copy, Debug, Deserialize, Serialize)]
pub struct Client {
    pub host: Ipv4Addr,
    pub port: u16,
}

/// Loads the client list document. Must contain 1 to 10 entries.
pub fn load_client_list(path: impl AsRef<Path>) -> Result<Vec<Client>, LoadError> {
    let data = fs::read_to_string(path)?;
    let clients: Vec<Client> = serde_json::from_str(&data)?;
    if clients.is_empty() || clients.len() > 10 {
        return Err(LoadError::ClientListSize(clients.len()));
    }
    Ok(clients)
}

#[derive(Serialize)]
struct DumpedTrack<'a> {
    mmsi: u32,
    nav_status: u8,
    lon: f64,
    lat: f64,
    speed: f64,
    course: f64,
    true_heading: u16,
    imo: u32,
    call_sign: &'a str,
    ship_name: &'a str,
    ship_type: u8,
    dimension: DumpedDimension,
    eta: DumpedEta,
    draught: f64,
    destination: &'a str,
    timestamp: u8,
}

#[derive(Serialize)]
struct DumpedDimension {
    to_bow: u16,
    to_stern: u16,
    to_port: u8,
    to_starboard: u8,
}

#[derive(Serialize)]
struct DumpedEta {
    month: u8,
    day: u8,
    hour: u8,
    minute: u8,
}

/// Re-serializes the in-memory track list (§6.4), stripping trailing
/// spaces from `ship_name`, `destination` and `call_sign`.
pub fn dump_track_list(tracks: &[Track]) -> serde_json::Value {
    let dumped: Vec<DumpedTrack> = tracks
        .iter()
        .map(|t| DumpedTrack {
            mmsi: t.mmsi,
            nav_status: t.nav_status as u8,
            lon: t.lon,
            lat: t.lat,
            speed: t.speed,
            course: t.course,
            true_heading: t.true_heading,
            imo: t.imo.unwrap_or(0),
            call_sign: t.call_sign.trim_end(),
            ship_name: t.ship_name.trim_end(),
            ship_type: t.ship_type as u8,
            dimension: DumpedDimension {
                to_bow: t.dimension.to_bow,
                to_stern: t.dimension.to_stern,
                to_port: t.dimension.to_port,
                to_starboard: t.dimension.to_starboard,
            },
            eta: DumpedEta {
                month: t.eta.month,
                day: t.eta.day,
                hour: t.eta.hour,
                minute: t.eta.minute,
            },
            draught: t.draught,
            destination: t.destination.trim_end(),
            timestamp: t.timestamp,
        })
        .collect();
    serde_json::json!({ "tracks": dumped })
}

#[cfg(test)]
mod test {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_load_track_list_reference_track() {
        let json = r#"{
            "tracks": [{
                "mmsi": 205344990,
                "nav_status": 15,
                "lon": 4.407046666667,
                "lat": 51.229636666667,
                "speed": 0,
                "course": 110.7,
                "imo": 9134270,
                "call_sign": "3FOF8",
                "ship_name": "EVER DIADEM",
                "ship_type": 70,
                "dimension": {"to_bow": 225, "to_stern": 70, "to_port": 1, "to_starboard": 31},
                "eta": {"month": 5, "day": 15, "hour": 14, "minute": 0},
                "draught": 12.2,
                "destination": "NEW YORK",
                "timestamp": 40
            }]
        }"#;
        let mut file = tempfile_with_contents(json);
        let tracks = load_track_list(file_path(&mut file), 0.0).unwrap();
        assert_eq!(tracks.len(), 1);
        assert_eq!(tracks[0].mmsi, 205344990);
        assert_eq!(tracks[0].call_sign, "3FOF8  ");
    }

    #[test]
    fn test_load_track_list_reports_bad_field() {
        let json = r#"{"tracks": [{
            "mmsi": 123344990,
            "nav_status": 15,
            "lon": 0,
            "lat": 0,
            "speed": 0,
            "course": 0,
            "call_sign": "",
            "ship_name": "",
            "ship_type": 70,
            "destination": ""
        }]}"#;
        let mut file = tempfile_with_contents(json);
        let err = load_track_list(file_path(&mut file), 0.0).unwrap_err();
        match err {
            LoadError::Track { index, source } => {
                assert_eq!(index, 0);
                assert_eq!(source.field, "mmsi");
            }
            other => panic!("expected LoadError::Track, got {:?}", other),
        }
    }

    #[test]
    fn test_dump_strips_trailing_spaces() {
        let json = r#"{"tracks": [{
            "mmsi": 205344990,
            "nav_status": 0,
            "lon": 0,
            "lat": 0,
            "speed": 0,
            "course": 0,
            "call_sign": "AB",
            "ship_name": "SHIP",
            "ship_type": 70,
            "destination": "PORT"
        }]}"#;
        let mut file = tempfile_with_contents(json);
        let tracks = load_track_list(file_path(&mut file), 0.0).unwrap();
        let dumped = dump_track_list(&tracks);
        assert_eq!(dumped["tracks"][0]["call_sign"], "AB");
        assert_eq!(dumped["tracks"][0]["ship_name"], "SHIP");
        assert_eq!(dumped["tracks"][0]["destination"], "PORT");
    }

    fn tempfile_with_contents(contents: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        file
    }

    fn file_path(file: &mut tempfile::NamedTempFile) -> std::path::PathBuf {
        file.path().to_path_buf()
    }
}
