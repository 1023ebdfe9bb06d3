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

//! Typed vessel track representation and field-level validation (C2).

use crate::bits;
use crate::constants::{self, NavigationStatus, ShipType};
use crate::error::ValidationError;
use crate::sentence::SequentialIdIssuer;

const SIXBIT_ASCII: &str = "@ABCDEFGHIJKLMNOPQRSTUVWXYZ[\\]^_ !\"#$%&'()*+,-./0123456789:;<=>?";

fn verify_sixbit_ascii(text: &str) -> bool {
    text.chars().all(|c| SIXBIT_ASCII.contains(c))
}

/// Checks that `mmsi`'s first three digits belong to a known MID.
pub fn check_mmsi_mid(mmsi: u32) -> bool {
    constants::is_known_mid(constants::mid_of(mmsi))
}

/// Validates a 7-digit IMO number against its mod-10 weighted checksum.
/// <http://tarkistusmerkit.teppovuori.fi/coden.htm>
pub fn verify_imo(imo: u32) -> bool {
    let digits: Vec<u32> = format!("{:07}", imo)
        .chars()
        .map(|c| c.to_digit(10).unwrap())
        .collect();
    let weighted: u32 = digits[0] * 7
        + digits[1] * 6
        + digits[2] * 5
        + digits[3] * 4
        + digits[4] * 3
        + digits[5] * 2;
    weighted % 10 == digits[6]
}

/// Ship dimension in meters, relative to the GPS antenna.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ShipDimension {
    pub to_bow: u16,
    pub to_stern: u16,
    pub to_port: u8,
    pub to_starboard: u8,
}

impl Default for ShipDimension {
    fn default() -> Self {
        ShipDimension {
            to_bow: 0,
            to_stern: 0,
            to_port: 0,
            to_starboard: 0,
        }
    }
}

impl ShipDimension {
    /// Builds a `ShipDimension`, clamping each field to its stated
    /// maximum (511 for bow/stern, 63 for port/starboard). Negative
    /// inputs are rejected by the caller before reaching this
    /// constructor (the fields are unsigned).
    pub fn new(to_bow: u16, to_stern: u16, to_port: u8, to_starboard: u8) -> Self {
        ShipDimension {
            to_bow: to_bow.min(511),
            to_stern: to_stern.min(511),
            to_port: to_port.min(63),
            to_starboard: to_starboard.min(63),
        }
    }

    /// Mirrors the upstream generator's pre-validation quirk: if any of
    /// the four dimensions is omitted from the input document, every
    /// field is zeroed rather than defaulting the missing ones
    /// individually. Documented as intentional in spec.md §9.
    pub fn from_partial(
        to_bow: Option<u16>,
        to_stern: Option<u16>,
        to_port: Option<u8>,
        to_starboard: Option<u8>,
    ) -> Self {
        match (to_bow, to_stern, to_port, to_starboard) {
            (Some(b), Some(s), Some(p), Some(st)) => ShipDimension::new(b, s, p, st),
            _ => ShipDimension::default(),
        }
    }

    pub(crate) fn bits(&self) -> String {
        let mut s = String::with_capacity(30);
        s.push_str(&bits::int_to_bits(self.to_bow as i64, 9, false));
        s.push_str(&bits::int_to_bits(self.to_stern as i64, 9, false));
        s.push_str(&bits::int_to_bits(self.to_port as i64, 6, false));
        s.push_str(&bits::int_to_bits(self.to_starboard as i64, 6, false));
        s
    }
}

/// Ship's Estimated Time of Arrival, UTC, with no year (AIS has none).
/// `hour = 24` and `minute = 60` are the AIS "unknown" sentinels, one
/// past the normal calendar range.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ShipEta {
    pub month: u8,
    pub day: u8,
    pub hour: u8,
    pub minute: u8,
}

impl Default for ShipEta {
    fn default() -> Self {
        ShipEta {
            month: 0,
            day: 0,
            hour: 24,
            minute: 60,
        }
    }
}

impl ShipEta {
    pub fn new(month: u8, day: u8, hour: u8, minute: u8) -> Result<Self, ValidationError> {
        if month > 12 {
            return Err(ValidationError::new("eta.month", month, "should be in 0-12 range"));
        }
        if day > 31 {
            return Err(ValidationError::new("eta.day", day, "should be in 0-31 range"));
        }
        if hour > 24 {
            return Err(ValidationError::new("eta.hour", hour, "should be in 0-24 range"));
        }
        if minute > 60 {
            return Err(ValidationError::new("eta.minute", minute, "should be in 0-60 range"));
        }
        Ok(ShipEta { month, day, hour, minute })
    }

    pub(crate) fn bits(&self) -> String {
        let mut s = String::with_capacity(20);
        s.push_str(&bits::int_to_bits(self.month as i64, 4, false));
        s.push_str(&bits::int_to_bits(self.day as i64, 5, false));
        s.push_str(&bits::int_to_bits(self.hour as i64, 5, false));
        s.push_str(&bits::int_to_bits(self.minute as i64, 6, false));
        s
    }
}

/// Raw, not-yet-validated track fields, as delivered by an external
/// loader (§6.2). `Track::new` validates every field and normalizes the
/// three six-bit-ASCII strings to their fixed wire lengths.
#[derive(Clone, Debug)]
pub struct TrackFields {
    pub mmsi: u32,
    pub nav_status: u8,
    pub lon: f64,
    pub lat: f64,
    pub speed: f64,
    pub course: f64,
    pub true_heading: u16,
    pub imo: Option<u32>,
    pub call_sign: String,
    pub ship_name: String,
    pub ship_type: u8,
    pub dimension: ShipDimension,
    pub eta: ShipEta,
    pub draught: f64,
    pub destination: String,
    pub timestamp: u8,
}

/// A single vessel track: static identity, dimensions, voyage data and
/// current kinematics. Construction validates every field; the three
/// six-bit-ASCII strings (`call_sign`, `ship_name`, `destination`) always
/// end up at their fixed wire lengths (7, 20, 20).
#[derive(Clone, Debug)]
pub struct Track {
    pub mmsi: u32,
    pub nav_status: NavigationStatus,
    pub lon: f64,
    pub lat: f64,
    pub speed: f64,
    pub course: f64,
    pub true_heading: u16,
    pub imo: Option<u32>,
    pub call_sign: String,
    pub ship_name: String,
    pub ship_type: ShipType,
    pub dimension: ShipDimension,
    pub eta: ShipEta,
    pub draught: f64,
    pub destination: String,
    pub timestamp: u8,
    pub(crate) updated_at: f64,
    pub(crate) seq_id_issuer: SequentialIdIssuer,
}

fn check_mmsi(mmsi: u32) -> Result<(), ValidationError> {
    if format!("{}", mmsi).len() != 9 {
        return Err(ValidationError::new(
            "mmsi",
            mmsi,
            "should consist of 9 digits",
        ));
    }
    if !check_mmsi_mid(mmsi) {
        return Err(ValidationError::new("mmsi", mmsi, "wrong MID code"));
    }
    Ok(())
}

fn check_range(field: &str, value: f64, min: f64, max: f64) -> Result<(), ValidationError> {
    if value < min || value > max {
        return Err(ValidationError::new(
            field,
            value,
            format!("should be in {} to {} range", min, max),
        ));
    }
    Ok(())
}

fn check_true_heading(value: u16) -> Result<(), ValidationError> {
    if value == 511 {
        return Ok(());
    }
    if value > 360 {
        return Err(ValidationError::new(
            "true_heading",
            value,
            "should be 511 or in 0-360 range",
        ));
    }
    Ok(())
}

fn check_imo(imo: u32) -> Result<(), ValidationError> {
    if format!("{}", imo).len() != 7 {
        return Err(ValidationError::new("imo", imo, "should consist of 7 digits"));
    }
    if !verify_imo(imo) {
        return Err(ValidationError::new("imo", imo, "wrong IMO checksum"));
    }
    Ok(())
}

/// Truncates/pads a six-bit-ASCII field to `required_len` characters, the
/// way C2 specifies: overlong input is truncated (never rejected);
/// shorter input is rejected if any character isn't six-bit ASCII,
/// otherwise space-padded.
fn normalize_sixbit_field(field: &str, value: &str, required_len: usize) -> Result<String, ValidationError> {
    let truncated: String = if value.chars().count() > required_len {
        value.chars().take(required_len).collect()
    } else {
        if !verify_sixbit_ascii(value) {
            return Err(ValidationError::new(
                field,
                value,
                "contains a character outside the six-bit ASCII set",
            ));
        }
        value.to_string()
    };
    bits::pad_text(&truncated, required_len, ' ')
        .map_err(|reason| ValidationError::new(field, value, reason))
}

fn check_draught(value: f64) -> Result<f64, ValidationError> {
    if value < 0.0 {
        return Err(ValidationError::new("draught", value, "should be 0 or greater"));
    }
    Ok(value.min(25.5))
}

impl Track {
    /// Validates `fields` and constructs a `Track`. Every invariant in
    /// spec.md §3 holds on the returned value.
    pub fn new(fields: TrackFields, now: f64) -> Result<Track, ValidationError> {
        check_mmsi(fields.mmsi)?;
        let nav_status = NavigationStatus::from_u8(fields.nav_status).ok_or_else(|| {
            ValidationError::new("nav_status", fields.nav_status, "not a recognized navigation status")
        })?;
        let ship_type = ShipType::from_u8(fields.ship_type)
            .ok_or_else(|| ValidationError::new("ship_type", fields.ship_type, "not a recognized ship type"))?;
        check_range("lon", fields.lon, -180.0, 180.0)?;
        check_range("lat", fields.lat, -90.0, 90.0)?;
        check_range("speed", fields.speed, 0.0, 102.2)?;
        check_range("timestamp", fields.timestamp as f64, 0.0, 60.0)?;
        check_range("course", fields.course, 0.0, 360.0)?;
        check_true_heading(fields.true_heading)?;
        if let Some(imo) = fields.imo {
            if imo != 0 {
                check_imo(imo)?;
            }
        }
        let call_sign = normalize_sixbit_field("call_sign", &fields.call_sign, 7)?;
        let ship_name = normalize_sixbit_field("ship_name", &fields.ship_name, 20)?;
        let destination = normalize_sixbit_field("destination", &fields.destination, 20)?;
        let draught = check_draught(fields.draught)?;

        Ok(Track {
            mmsi: fields.mmsi,
            nav_status,
            lon: fields.lon,
            lat: fields.lat,
            speed: fields.speed,
            course: fields.course,
            true_heading: fields.true_heading,
            imo: fields.imo.filter(|&v| v != 0),
            call_sign,
            ship_name,
            ship_type,
            dimension: fields.dimension,
            eta: fields.eta,
            draught,
            destination,
            timestamp: fields.timestamp,
            updated_at: now,
            seq_id_issuer: SequentialIdIssuer::new(),
        })
    }
}
