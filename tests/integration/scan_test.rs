//! Boundary scanning on synthetic tapes.

use itap::{describe, merge, scan, ScanConfig, TapFile};

use crate::helpers::{payload, program, PROGRAM_LEN, SHORT};

fn tape(names: &[&str]) -> TapFile {
    TapFile::from_payload(1, &payload(names)).unwrap()
}

#[test]
fn one_segment_per_program() {
    let tap = tape(&["ALPHA", "BETA", "GAMMA"]);
    let segments = scan(&tap, &ScanConfig::default());
    insta::assert_debug_snapshot!(segments, @r###"
    [
        Segment {
            start: 20,
            end: 15724,
        },
        Segment {
            start: 15724,
            end: 31428,
        },
        Segment {
            start: 31428,
            end: 47132,
        },
    ]
    "###);
}

#[test]
fn segments_cover_the_payload() {
    let tap = tape(&["ALPHA", "BETA", "GAMMA", "DELTA"]);
    let segments = scan(&tap, &ScanConfig::default());

    assert_eq!(segments.first().unwrap().start, 20);
    assert_eq!(segments.last().unwrap().end, tap.file_len());
    for pair in segments.windows(2) {
        assert_eq!(pair[0].end, pair[1].start);
    }
}

#[test]
fn names_are_recovered_in_order() {
    let tap = tape(&["ALPHA", "BETA", "GAMMA"]);
    let segments = scan(&tap, &ScanConfig::default());
    let names: Vec<String> = describe(&tap, &segments)
        .into_iter()
        .map(|info| info.name.to_string())
        .collect();
    assert_eq!(names, vec!["ALPHA", "BETA", "GAMMA"]);
}

#[test]
fn header_fields_are_decoded() {
    let tap = tape(&["ALPHA"]);
    let segments = scan(&tap, &ScanConfig::default());
    let infos = describe(&tap, &segments);
    let header = infos[0].header.as_ref().unwrap();
    assert_eq!(header.file_type, 1);
    assert_eq!(header.start_address, 0x0801);
    assert_eq!(header.end_address, 0x1000);
}

#[test]
fn higher_header_minimum_ignores_pilots() {
    let tap = tape(&["ALPHA", "BETA"]);
    let segments = scan(&tap, &ScanConfig::new(9_000, 14_000));
    assert_eq!(segments.len(), 1);
    assert_eq!(segments[0].len(), 2 * PROGRAM_LEN);
}

#[test]
fn undersized_program_folds_into_the_next() {
    // a lone pilot tone with a tiny block after it
    let mut bytes = vec![SHORT; 8_000];
    bytes.extend(std::iter::repeat(0x60).take(500));
    bytes.extend(program("BETA"));
    let tap = TapFile::from_payload(1, &bytes).unwrap();

    let segments = scan(&tap, &ScanConfig::default());
    insta::assert_debug_snapshot!(segments, @r###"
    [
        Segment {
            start: 20,
            end: 24224,
        },
    ]
    "###);
}

#[test]
fn merged_segment_keeps_first_name() {
    let tap = tape(&["ALPHA", "BETA", "GAMMA"]);
    let segments = merge(scan(&tap, &ScanConfig::default()), 0).unwrap();
    let infos = describe(&tap, &segments);
    assert_eq!(infos.len(), 2);
    assert_eq!(infos[0].name.as_str(), "ALPHA");
    assert_eq!(infos[0].size, 2 * PROGRAM_LEN);
    assert_eq!(infos[1].name.as_str(), "GAMMA");
}
