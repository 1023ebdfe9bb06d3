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

//! # AIS transmitter
//!
//! Synthesizes NMEA 0183 AIVDM sentences for AIS message types 1 (position
//! report) and 5 (static and voyage related data) from validated vessel
//! tracks, and fans them out over UDP. Given a track's reported speed and
//! course, positions are advanced between transmissions by dead reckoning
//! along the WGS-84 geodesic.
//!
//! The crate does not decode AIS traffic; it only synthesizes it.

#[macro_use]
extern crate log;

pub mod bits;
pub mod config;
pub mod constants;
pub mod error;
pub mod kinematics;
pub mod payload;
pub mod sentence;
pub mod track;
pub mod transport;

pub use config::{load_client_list, load_track_list, Client, LoadError};
pub use error::{CodecError, GeodesicError, ValidationError};
pub use kinematics::update_position;
pub use sentence::generate_nmea;
pub use track::{ShipDimension, ShipEta, Track, TrackFields};
pub use transport::UdpStream;

/// Validates raw track fields and returns a ready-to-transmit [`Track`].
/// Thin re-export of [`Track::new`] kept at crate root since it is the
/// primary entry point callers reach for.
pub fn new_track(fields: TrackFields, now: f64) -> Result<Track, ValidationError> {
    Track::new(fields, now)
}
