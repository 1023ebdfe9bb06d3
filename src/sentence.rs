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

//! NMEA 0183 AIVDM sentence framer (C4): chunks an armored AIS payload
//! into one or more `!AIVDM` sentences and issues the sequential message
//! ID shared by a multi-sentence group.

use crate::bits;
use crate::payload::{encode_type1, encode_type5, EncodedPayload};
use crate::track::Track;

/// Maximum payload characters per sentence, per the NMEA 0183 frame size
/// limit (82 chars total per sentence).
const MAX_PAYLOAD_CHARS: usize = 60;

/// Per-track iterator over 0,1,...,9,0,1,... Each call to `generate_nmea`
/// advances it once. Not shared across tracks — every `Track` owns one.
#[derive(Clone, Copy, Debug, Default)]
pub struct SequentialIdIssuer {
    next: u8,
}

impl SequentialIdIssuer {
    pub fn new() -> Self {
        SequentialIdIssuer { next: 0 }
    }

    /// Draws the next id in 0..9, cycling back to 0 after 9.
    pub fn next(&mut self) -> u8 {
        let id = self.next;
        self.next = (self.next + 1) % 10;
        id
    }
}

/// Splits `armored` into chunks of at most [`MAX_PAYLOAD_CHARS`].
fn chunk_payload(armored: &str) -> Vec<&str> {
    let bytes = armored.as_bytes();
    let mut chunks = Vec::new();
    let mut i = 0;
    while i < bytes.len() {
        let end = (i + MAX_PAYLOAD_CHARS).min(bytes.len());
        chunks.push(&armored[i..end]);
        i = end;
    }
    if chunks.is_empty() {
        chunks.push(armored);
    }
    chunks
}

/// Frames one encoded payload into its `!AIVDM` sentence(s), drawing
/// `seq_id` for the sequential-message-ID field when more than one
/// sentence is required (empty when a single sentence suffices).
fn frame_payload(payload: &EncodedPayload, seq_id: u8) -> Vec<String> {
    let chunks = chunk_payload(&payload.armored);
    let n = chunks.len();
    chunks
        .into_iter()
        .enumerate()
        .map(|(idx, chunk)| {
            let i = idx + 1;
            let fill = if i == n { payload.fill_bits } else { 0 };
            let seq_field = if n > 1 { seq_id.to_string() } else { String::new() };
            let body = format!("AIVDM,{},{},{},A,{},{}", n, i, seq_field, chunk, fill);
            format!("!{}*{}\r\n", body, bits::nmea_checksum(&body))
        })
        .collect()
}

/// Frames the track's Type-1 and Type-5 payloads back to back. Both
/// payloads of one call share a single sequential id drawn from the
/// track's issuer; the result is ordered `[type1, type5_part1,
/// type5_part2, ...]`.
pub fn generate_nmea(track: &mut Track) -> Vec<String> {
    let seq_id = track.seq_id_issuer.next();
    let mut sentences = frame_payload(&encode_type1(track), seq_id);
    sentences.extend(frame_payload(&encode_type5(track), seq_id));
    sentences
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
    fn test_sequential_id_issuer_cycles_0_through_9() {
        let mut issuer = SequentialIdIssuer::new();
        let ids: Vec<u8> = (0..10).map(|_| issuer.next()).collect();
        assert_eq!(ids, (0..10).collect::<Vec<u8>>());
        assert_eq!(issuer.next(), 0);
    }

    #[test]
    fn test_generate_nmea_reference_sentences() {
        let mut track = reference_track();
        let sentences = generate_nmea(&mut track);
        assert_eq!(sentences.len(), 3);
        assert_eq!(
            sentences[0],
            "!AIVDM,1,1,,A,133m@ogP00PD;88MD5MTDww@0D7k,0*44\r\n"
        );
        assert_eq!(sentences[1].starts_with("!AIVDM,2,1,0,A,"), true);
        assert_eq!(sentences[2].starts_with("!AIVDM,2,2,0,A,88888888880,2*"), true);
    }

    #[test]
    fn test_type1_payload_fits_single_sentence() {
        let mut track = reference_track();
        let sentences = generate_nmea(&mut track);
        assert!(sentences[0].contains(",1,1,,A,"));
    }

    #[test]
    fn test_chunk_payload_respects_max_length() {
        let long = "A".repeat(130);
        let chunks = chunk_payload(&long);
        assert_eq!(chunks.len(), 3);
        assert_eq!(chunks[0].len(), 60);
        assert_eq!(chunks[1].len(), 60);
        assert_eq!(chunks[2].len(), 10);
    }

    #[test]
    fn test_sentence_checksum_is_correct() {
        let mut track = reference_track();
        let sentences = generate_nmea(&mut track);
        for sentence in &sentences {
            let body = sentence
                .strip_prefix('!')
                .unwrap()
                .split('*')
                .next()
                .unwrap();
            let (_, cs_and_tail) = sentence.split_once('*').unwrap();
            let cs = &cs_and_tail[..2];
            assert_eq!(bits::nmea_checksum(body), cs);
        }
    }
}
