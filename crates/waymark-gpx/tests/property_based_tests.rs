//! Property-Based Tests
//!
//! Uses proptest to verify the round-trip law over generated documents:
//! any entity built from valid field values reads back equal after being
//! written, including absent fields and empty sequences.

use chrono::DateTime;
use proptest::prelude::*;
use waymark_gpx::{
    Gpx, Latitude, Link, Longitude, Route, Track, TrackSegment, UInt, Waypoint,
};
use waymark_xml::{XmlElement, XmlTokenReader, XmlTokenWriter};

fn text() -> impl Strategy<Value = String> {
    // printable content including characters the writer must escape;
    // leading/trailing whitespace is trimmed on the wire, so trim here
    "[a-zA-Z0-9 .,:;&<>'\"-]{0,24}".prop_map(|s| s.trim().to_string())
}

fn opt_text() -> impl Strategy<Value = Option<String>> {
    proptest::option::of(text())
}

fn latitude() -> impl Strategy<Value = Latitude> {
    (-90.0f64..=90.0).prop_map(|d| Latitude::new(d).unwrap())
}

fn longitude() -> impl Strategy<Value = Longitude> {
    (-180.0f64..=180.0).prop_map(|d| Longitude::new(d).unwrap())
}

fn link() -> impl Strategy<Value = Link> {
    ("[a-z]{1,12}", opt_text()).prop_map(|(path, t)| {
        let builder = Link::builder();
        let builder = match t {
            Some(t) => builder.text(t),
            None => builder,
        };
        builder.build(format!("http://example.org/{path}"))
    })
}

fn links() -> impl Strategy<Value = Vec<Link>> {
    proptest::collection::vec(link(), 0..3)
}

fn waypoint() -> impl Strategy<Value = Waypoint> {
    (
        latitude(),
        longitude(),
        proptest::option::of(-450.0f64..8900.0),
        proptest::option::of((0i64..4_102_444_800, 0u32..1000)),
        opt_text(),
        opt_text(),
        links(),
    )
        .prop_map(|(lat, lon, elevation, time, name, comment, links)| {
            let mut builder = Waypoint::builder().links(links);
            if let Some(elevation) = elevation {
                builder = builder.elevation(elevation);
            }
            if let Some((seconds, millis)) = time {
                let time = DateTime::from_timestamp(seconds, millis * 1_000_000)
                    .expect("timestamp in range");
                builder = builder.time(time);
            }
            if let Some(name) = name {
                builder = builder.name(name);
            }
            if let Some(comment) = comment {
                builder = builder.comment(comment);
            }
            builder.build(lat, lon)
        })
}

fn segment() -> impl Strategy<Value = TrackSegment> {
    proptest::collection::vec(waypoint(), 0..4).prop_map(TrackSegment::of)
}

fn track() -> impl Strategy<Value = Track> {
    (
        opt_text(),
        opt_text(),
        opt_text(),
        links(),
        proptest::option::of(any::<u32>()),
        opt_text(),
        proptest::collection::vec(segment(), 0..3),
    )
        .prop_map(|(name, comment, description, links, number, kind, segments)| {
            let mut builder = Track::builder().links(links).segments(segments);
            if let Some(name) = name {
                builder = builder.name(name);
            }
            if let Some(comment) = comment {
                builder = builder.comment(comment);
            }
            if let Some(description) = description {
                builder = builder.description(description);
            }
            if let Some(number) = number {
                builder = builder.number(UInt::new(number));
            }
            if let Some(kind) = kind {
                builder = builder.kind(kind);
            }
            builder.build()
        })
}

fn route() -> impl Strategy<Value = Route> {
    (opt_text(), links(), proptest::collection::vec(waypoint(), 0..4)).prop_map(
        |(name, links, points)| {
            let mut builder = Route::builder().links(links).points(points);
            if let Some(name) = name {
                builder = builder.name(name);
            }
            builder.build()
        },
    )
}

fn document() -> impl Strategy<Value = Gpx> {
    (
        "[a-zA-Z0-9 ]{1,16}",
        proptest::collection::vec(waypoint(), 0..3),
        proptest::collection::vec(route(), 0..2),
        proptest::collection::vec(track(), 0..3),
    )
        .prop_map(|(creator, waypoints, routes, tracks)| {
            Gpx::builder()
                .creator(creator.trim())
                .waypoints(waypoints)
                .routes(routes)
                .tracks(tracks)
                .build()
        })
}

fn element_round_trip<T: XmlElement>(value: &T, tag: &str) -> T {
    let mut sink = XmlTokenWriter::new(Vec::new());
    value.write_as(tag, &mut sink).expect("write");
    let xml = String::from_utf8(sink.into_inner()).expect("utf-8");
    let mut source = XmlTokenReader::from_str(&xml);
    T::read_as(tag, &mut source).expect("read back")
}

#[test]
fn proptest_waypoint_round_trip() {
    proptest!(|(waypoint in waypoint())| {
        prop_assert_eq!(element_round_trip(&waypoint, Waypoint::TAG), waypoint);
    });
}

#[test]
fn proptest_track_round_trip() {
    proptest!(|(track in track())| {
        prop_assert_eq!(element_round_trip(&track, Track::TAG), track);
    });
}

#[test]
fn proptest_document_round_trip() {
    proptest!(ProptestConfig::with_cases(64), |(gpx in document())| {
        let mut out = Vec::new();
        gpx.write_to(&mut out).expect("write");
        let back = Gpx::read_from(out.as_slice()).expect("read back");
        prop_assert_eq!(back, gpx);
    });
}

#[test]
fn proptest_pretty_output_parses_equal() {
    proptest!(ProptestConfig::with_cases(32), |(gpx in document())| {
        let mut compact = Vec::new();
        gpx.write_to(&mut compact).expect("write");
        let mut pretty = Vec::new();
        gpx.write_pretty_to(&mut pretty).expect("write pretty");

        let from_compact = Gpx::read_from(compact.as_slice()).expect("read compact");
        let from_pretty = Gpx::read_from(pretty.as_slice()).expect("read pretty");
        prop_assert_eq!(from_compact, from_pretty);
    });
}
