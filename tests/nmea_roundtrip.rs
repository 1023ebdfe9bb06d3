use ais_transmitter::{generate_nmea, new_track, update_position, ShipDimension, ShipEta, TrackFields};

fn reference_fields() -> TrackFields {
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
    }
}

#[test]
fn reference_track_produces_three_well_formed_sentences() {
    let mut track = new_track(reference_fields(), 0.0).unwrap();
    let sentences = generate_nmea(&mut track);

    assert_eq!(sentences.len(), 3);
    for sentence in &sentences {
        assert!(sentence.starts_with("!AIVDM,"));
        assert!(sentence.ends_with("\r\n"));
        assert!(sentence.contains('*'));
    }
    assert_eq!(
        sentences[0],
        "!AIVDM,1,1,,A,133m@ogP00PD;88MD5MTDww@0D7k,0*44\r\n"
    );
}

#[test]
fn consecutive_calls_cycle_the_sequential_message_id() {
    let mut track = new_track(reference_fields(), 0.0).unwrap();
    let first = generate_nmea(&mut track);
    let second = generate_nmea(&mut track);
    // Both calls produce a type-5 split across two sentences; the sequential
    // id embedded in them must differ between the two calls.
    let id_of = |sentences: &[String]| {
        sentences[1].split(',').nth(3).unwrap().to_string()
    };
    assert_ne!(id_of(&first), id_of(&second));
}

#[test]
fn moving_track_advances_position_before_encoding() {
    let mut fields = reference_fields();
    fields.speed = 20.0;
    let mut track = new_track(fields, 1_000.0).unwrap();
    let original = (track.lon, track.lat);

    update_position(&mut track, 1_600.0);
    assert_ne!((track.lon, track.lat), original);

    let sentences = generate_nmea(&mut track);
    assert_eq!(sentences.len(), 3);
}

#[test]
fn rejects_track_with_unknown_mid() {
    let mut fields = reference_fields();
    fields.mmsi = 123344990;
    assert!(new_track(fields, 0.0).is_err());
}
