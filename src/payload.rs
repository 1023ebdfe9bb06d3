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

//! AIS payload encoders (C3): message type 1 (position report) and type 5
//! (static and voyage related data). Both assemble a bit string, armor it
//! to ASCII and report the fill-bit count added while doing so.

use crate::bits;
use crate::track::Track;

/// Dummy SOTDMA radio status bits. The upstream generator never computes
/// real SOTDMA state — this constant stands in for it everywhere.
const RADIO_STATUS_BITS: &str = "0010100000111110011";

/// An armored AIS payload plus the number of fill bits added to reach a
/// six-bit boundary.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EncodedPayload {
    pub armored: String,
    pub fill_bits: usize,
}

/// Armors a raw bit string (AIVDM Payload Armoring): split into six-bit
/// groups left to right, right-pad any short final group with `'0'`
/// (counted into `fill_bits`), map each group through [`bits::ascii6_to_armor`].
fn armor(payload_bits: &str) -> EncodedPayload {
    let mut armored = String::with_capacity(payload_bits.len() / 6 + 1);
    let mut fill_bits = 0;
    let bytes = payload_bits.as_bytes();
    let mut i = 0;
    while i < bytes.len() {
        let end = (i + 6).min(bytes.len());
        let chunk = &payload_bits[i..end];
        let (padded, added) = bits::pad_zero_bits(chunk, 6);
        fill_bits += added;
        let value = bits::bits_to_int(&padded) as u8;
        armored.push(bits::ascii6_to_armor(value));
        i += 6;
    }
    EncodedPayload { armored, fill_bits }
}

/// Encodes a track's current state into an AIS message type 1 payload
/// (168 bits, no fill bits required since 168 mod 6 == 0).
pub fn encode_type1(track: &Track) -> EncodedPayload {
    let mut payload_bits = String::with_capacity(168);
    payload_bits.push_str(&bits::int_to_bits(1, 6, false)); // msg_type
    payload_bits.push_str(&bits::int_to_bits(0, 2, false)); // repeat_indicator
    payload_bits.push_str(&bits::int_to_bits(track.mmsi as i64, 30, false));
    payload_bits.push_str(&bits::int_to_bits(track.nav_status as i64, 4, false));
    payload_bits.push_str(&bits::int_to_bits(128, 8, false)); // rot: "not available"
    payload_bits.push_str(&bits::int_to_bits((track.speed * 10.0).round() as i64, 10, false));
    payload_bits.push_str(&bits::int_to_bits(1, 1, false)); // pos_accuracy: high
    payload_bits.push_str(&bits::int_to_bits((track.lon * 600_000.0).round() as i64, 28, true));
    payload_bits.push_str(&bits::int_to_bits((track.lat * 600_000.0).round() as i64, 27, true));
    payload_bits.push_str(&bits::int_to_bits((track.course * 10.0).round() as i64, 12, false));
    payload_bits.push_str(&bits::int_to_bits(track.true_heading as i64, 9, false));
    payload_bits.push_str(&bits::int_to_bits(track.timestamp as i64, 6, false));
    payload_bits.push_str(&bits::int_to_bits(0, 2, false)); // maneuver
    payload_bits.push_str(&bits::int_to_bits(0, 3, false)); // spare
    payload_bits.push_str(&bits::int_to_bits(0, 1, false)); // raim
    payload_bits.push_str(RADIO_STATUS_BITS);

    debug_assert_eq!(payload_bits.len(), 168);
    armor(&payload_bits)
}

/// Encodes a string field's six-bit-ASCII characters into its bit
/// allocation. The string's length must already match `char_count`
/// (`Track::new` guarantees this for `call_sign`/`ship_name`/`destination`).
fn sixbit_string_bits(text: &str, char_count: usize) -> String {
    let mut s = String::with_capacity(char_count * 6);
    for c in text.chars().take(char_count) {
        let code = bits::ascii_to_ascii6(c).expect("validated track field contains non-sixbit char");
        s.push_str(&bits::int_to_bits(code as i64, 6, false));
    }
    s
}

/// Encodes a track's static and voyage data into an AIS message type 5
/// payload (424 bits; 424 mod 6 == 4, so armoring adds 2 fill bits).
pub fn encode_type5(track: &Track) -> EncodedPayload {
    let mut payload_bits = String::with_capacity(424);
    payload_bits.push_str(&bits::int_to_bits(5, 6, false)); // msg_type
    payload_bits.push_str(&bits::int_to_bits(0, 2, false)); // repeat_indicator
    payload_bits.push_str(&bits::int_to_bits(track.mmsi as i64, 30, false));
    payload_bits.push_str(&bits::int_to_bits(2, 2, false)); // ais_version
    payload_bits.push_str(&bits::int_to_bits(track.imo.unwrap_or(0) as i64, 30, false));
    payload_bits.push_str(&sixbit_string_bits(&track.call_sign, 7));
    payload_bits.push_str(&sixbit_string_bits(&track.ship_name, 20));
    payload_bits.push_str(&bits::int_to_bits(track.ship_type as i64, 8, false));
    payload_bits.push_str(&track.dimension.bits());
    payload_bits.push_str(&bits::int_to_bits(1, 4, false)); // pos_fix_type: GPS
    payload_bits.push_str(&track.eta.bits());
    payload_bits.push_str(&bits::int_to_bits((track.draught * 10.0).round() as i64, 8, false));
    payload_bits.push_str(&sixbit_string_bits(&track.destination, 20));
    payload_bits.push_str(&bits::int_to_bits(0, 1, false)); // dte
    payload_bits.push_str(&bits::int_to_bits(0, 1, false)); // spare

    debug_assert_eq!(payload_bits.len(), 424);
    armor(&payload_bits)
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::track::{ShipDimension, ShipEta, TrackFields};

    fn reference_track() -> Track {
        Track::new(
            TrackFields {
                mmsi: 205344990,
                nav_status: 15,
                lon: 4.407046666667,
                lat: 51.229636666667,
                speed: 0.0,
                course: 110.7,
                true_heading: 511,
                imo: Some(9134270),
                call_sign: "3FOF8".to_string(),
                ship_name: "EVER DIADEM".to_string(),
                ship_type: 70,
                dimension: ShipDimension::new(225, 70, 1, 31),
                eta: ShipEta::new(5, 15, 14, 0).unwrap(),
                draught: 12.2,
                destination: "NEW YORK".to_string(),
                timestamp: 40,
            },
            0.0,
        )
        .unwrap()
    }

    #[test]
    fn test_type1_reference_vector() {
        let track = reference_track();
        let encoded = encode_type1(&track);
        assert_eq!(encoded.armored, "133m@ogP00PD;88MD5MTDww@0D7k");
        assert_eq!(encoded.armored.len(), 28);
        assert_eq!(encoded.fill_bits, 0);
    }

    #[test]
    fn test_type5_reference_vector() {
        let track = reference_track();
        let encoded = encode_type5(&track);
        assert_eq!(
            encoded.armored,
            "533m@o`2;H;s<HtKR20EHE:0@T4@Dn2222222216L961O5Gf0NSQEp6ClRp888888888880"
        );
        assert_eq!(encoded.armored.len(), 71);
        assert_eq!(encoded.fill_bits, 2);
    }

    #[test]
    fn test_payload_bit_lengths() {
        let track = reference_track();
        // 168 bits armors to 168/6 = 28 chars with 0 fill bits.
        let t1 = encode_type1(&track);
        assert_eq!(t1.armored.len(), 28);
        assert_eq!(t1.fill_bits, 0);
        // 424 bits armors to ceil(424/6) = 71 chars with 2 fill bits.
        let t5 = encode_type5(&track);
        assert_eq!(t5.armored.len(), 71);
        assert_eq!(t5.fill_bits, 2);
    }
}
