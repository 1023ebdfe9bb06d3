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

//! Dead-reckoning position updater (C5): advances a track's `(lon, lat)`
//! from elapsed wall-clock time, speed and course using the WGS-84
//! forward geodesic.

use geo::{Destination, Geodesic, Point};

use crate::track::Track;

/// Knots to meters per second.
const KNOTS_TO_MPS: f64 = 0.514444444;

/// Rounds `value` to `decimals` decimal places.
fn round_to(value: f64, decimals: i32) -> f64 {
    let factor = 10f64.powi(decimals);
    (value * factor).round() / factor
}

/// Distance traveled at `speed` knots over `dt` seconds, rounded to the
/// millimeter (3 decimal places).
pub fn calculate_distance(dt: f64, speed: f64) -> f64 {
    let v_mps = speed * KNOTS_TO_MPS;
    round_to(v_mps * dt, 3)
}

/// Advances `(lon, lat)` by `distance` meters along `course` degrees true,
/// using the WGS-84 forward geodesic (Karney's algorithm via the `geo`
/// crate, accurate to sub-millimeter precision). Returns the new
/// `(lon, lat)`; the back azimuth is not surfaced because no caller in
/// this crate needs it.
pub fn calculate_new_position(lon: f64, lat: f64, course: f64, distance: f64) -> (f64, f64) {
    let origin = Point::new(lon, lat);
    let destination = Geodesic.destination(origin, course, distance);
    (destination.x(), destination.y())
}

/// Updates `track`'s position in place from elapsed time since its last
/// update. The caller is expected to only invoke this when
/// `track.speed > 0` (a stationary track has nothing to dead-reckon).
///
/// `now` must be a wall-clock UTC second count; a non-monotonic `now`
/// (less than `track.updated_at`) yields a negative `dt` and a retrograde
/// step rather than being rejected.
pub fn update_position(track: &mut Track, now: f64) {
    let dt = now - track.updated_at;
    let distance = calculate_distance(dt, track.speed);
    let (lon, lat) = calculate_new_position(track.lon, track.lat, track.course, distance);
    track.lon = lon;
    track.lat = lat;
    track.updated_at = now;
}
