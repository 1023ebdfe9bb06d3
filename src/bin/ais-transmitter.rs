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

//! Command-line front end: loads a track list and a client list, then
//! periodically dead-reckons every moving track, frames its AIS sentences
//! and fans them out over UDP. Not part of the library's public API
//! surface; everything here is glue.

use std::process;
use std::thread;
use std::time::{Duration, SystemTime, UNIX_EPOCH};

use clap::Parser;
use log::{error, info};

use ais_transmitter::{config, generate_nmea, transport::UdpStream, update_position, Track};

/// Synthesizes and transmits AIS NMEA 0183 sentences for a set of vessel tracks.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Path to the track list JSON document.
    #[arg(long)]
    tracks: String,

    /// Path to the client list JSON document (1 to 10 UDP destinations).
    #[arg(long)]
    clients: String,

    /// Seconds between transmission rounds.
    #[arg(long, default_value_t = 10.0)]
    interval: f64,

    /// Optional path to periodically re-serialize the in-memory track list to.
    #[arg(long)]
    dump: Option<String>,

    /// Increase log verbosity (-v, -vv).
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn now_secs() -> f64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .expect("system clock before UNIX epoch")
        .as_secs_f64()
}

fn default_log_level(verbosity: u8) -> &'static str {
    match verbosity {
        0 => "info",
        1 => "debug",
        _ => "trace",
    }
}

fn main() {
    let args = Args::parse();

    env_logger::Builder::from_env(
        env_logger::Env::default().default_filter_or(default_log_level(args.verbose)),
    )
    .init();

    let now = now_secs();
    let mut tracks = match config::load_track_list(&args.tracks, now) {
        Ok(tracks) => tracks,
        Err(err) => {
            error!("failed to load track list {}: {}", args.tracks, err);
            process::exit(1);
        }
    };
    let clients = match config::load_client_list(&args.clients) {
        Ok(clients) => clients,
        Err(err) => {
            error!("failed to load client list {}: {}", args.clients, err);
            process::exit(1);
        }
    };

    info!("loaded {} track(s), {} client(s)", tracks.len(), clients.len());
    let stream = UdpStream::new(clients);
    let interval = Duration::from_secs_f64(args.interval.max(0.0));

    loop {
        let now = now_secs();
        for track in tracks.iter_mut() {
            if track.speed > 0.0 {
                update_position(track, now);
            }
        }

        for track in tracks.iter_mut() {
            let sentences = generate_nmea(track);
            print_sentences(track, &sentences);
            stream.send(&sentences);
        }

        if let Some(path) = &args.dump {
            let document = config::dump_track_list(&tracks);
            if let Err(err) = std::fs::write(path, document.to_string()) {
                error!("failed to write dump file {}: {}", path, err);
            }
        }

        thread::sleep(interval);
    }
}

fn print_sentences(track: &Track, sentences: &[String]) {
    for sentence in sentences {
        print!("[{}] {}", track.mmsi, sentence);
    }
}
