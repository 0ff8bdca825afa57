//! End-to-end runs of the itap binary.

use std::fs;

use predicates::prelude::*;

use crate::helpers::{itap, payload, reported_length, tap_bytes_with_length, write_tape, TRIMMED_LEN};

const HEADER_LEN: usize = 20;

#[test]
fn list_mode_prints_blocks_and_writes_nothing() {
    let dir = tempfile::tempdir().unwrap();
    let tape = write_tape(dir.path(), "games.tap", &["ALPHA", "BETA", "GAMMA"]);

    itap(dir.path())
        .arg(&tape)
        .arg("-l")
        .assert()
        .success()
        .stdout(predicate::str::contains("01)    15704 bytes, 0x00000014 to 0x00003D6B - ALPHA"))
        .stdout(predicate::str::contains("02)"))
        .stdout(predicate::str::contains("03)    15704 bytes, 0x00007AC4 to 0x0000B81B - GAMMA"));

    assert!(!dir.path().join("games_01.tap").exists());
    assert!(!dir.path().join("games.idx").exists());
}

#[test]
fn verbose_list_shows_header_fields() {
    let dir = tempfile::tempdir().unwrap();
    let tape = write_tape(dir.path(), "games.tap", &["ALPHA", "BETA"]);

    itap(dir.path())
        .arg(&tape)
        .args(["-l", "-d"])
        .assert()
        .success()
        .stdout(predicate::str::contains("type 01 from $0801 to $1000"));
}

#[test]
fn json_list_is_machine_readable() {
    let dir = tempfile::tempdir().unwrap();
    let tape = write_tape(dir.path(), "games.tap", &["ALPHA", "BETA"]);

    let output = itap(dir.path())
        .arg(&tape)
        .args(["-l", "--json"])
        .output()
        .unwrap();
    assert!(output.status.success());

    let blocks: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    let blocks = blocks.as_array().unwrap();
    assert_eq!(blocks.len(), 2);
    assert_eq!(blocks[0]["name"], "ALPHA");
    assert_eq!(blocks[1]["number"], 2);
    assert_eq!(blocks[1]["start"], 15724);
    assert_eq!(blocks[1]["header"]["start_address"], 0x0801);
}

#[test]
fn index_is_written_in_list_mode() {
    let dir = tempfile::tempdir().unwrap();
    let tape = write_tape(dir.path(), "games.tap", &["ALPHA", "BETA"]);

    itap(dir.path())
        .arg(&tape)
        .args(["-l", "-i"])
        .assert()
        .success()
        .stdout(predicate::str::contains("2 programs indexed"));

    let index = fs::read_to_string(dir.path().join("games.idx")).unwrap();
    let lines: Vec<&str> = index.lines().collect();
    assert_eq!(
        lines,
        vec![
            "; Index file generated by Split Tap",
            "0x00000014 ALPHA           ",
            "0x00003D6C BETA            ",
        ]
    );
}

#[test]
fn json_index_run_keeps_stdout_parseable() {
    let dir = tempfile::tempdir().unwrap();
    let tape = write_tape(dir.path(), "games.tap", &["ALPHA", "BETA"]);

    let output = itap(dir.path())
        .arg(&tape)
        .args(["-l", "-i", "--json"])
        .output()
        .unwrap();
    assert!(output.status.success());

    let blocks: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(blocks.as_array().unwrap().len(), 2);
    assert!(dir.path().join("games.idx").exists());
}

#[test]
fn bare_debug_flag_before_path_keeps_path() {
    let dir = tempfile::tempdir().unwrap();
    write_tape(dir.path(), "games.tap", &["ALPHA", "BETA"]);

    itap(dir.path())
        .current_dir(dir.path())
        .args(["-b", "-d", "games.tap"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Now 2 blocks will be created"));

    assert!(dir.path().join("games_01.tap").exists());
    assert!(dir.path().join("games_02.tap").exists());
}

#[test]
fn clean_writes_single_trimmed_tape() {
    let dir = tempfile::tempdir().unwrap();
    let tape = write_tape(dir.path(), "games.tap", &["ALPHA", "BETA", "GAMMA"]);

    itap(dir.path())
        .arg(&tape)
        .arg("-c")
        .assert()
        .success()
        .stdout(predicate::str::contains("Reduction:     300 bytes"))
        .stdout(predicate::str::contains("Block 01 (ALPHA): 15604 bytes"))
        .stdout(predicate::str::contains("Block 03 (GAMMA): 15604 bytes"))
        .stdout(predicate::str::contains("3 programs included"));

    let cleaned = dir.path().join("games_cleaned.tap");
    assert_eq!(
        fs::metadata(&cleaned).unwrap().len() as usize,
        HEADER_LEN + 3 * TRIMMED_LEN
    );
    assert_eq!(reported_length(&cleaned) as usize, 3 * TRIMMED_LEN);
    assert!(!dir.path().join("games_01.tap").exists());
}

#[test]
fn batch_split_writes_numbered_blocks() {
    let dir = tempfile::tempdir().unwrap();
    let tape = write_tape(dir.path(), "games.tap", &["ALPHA", "BETA", "GAMMA"]);

    itap(dir.path())
        .arg(&tape)
        .arg("-b")
        .assert()
        .success()
        .stdout(predicate::str::contains("Now 3 blocks will be created"))
        .stdout(predicate::str::contains("Operation successfully completed."));

    for n in 1..=3 {
        let block = dir.path().join(format!("games_{:02}.tap", n));
        let bytes = fs::read(&block).unwrap();
        assert_eq!(&bytes[..12], b"C64-TAPE-RAW");
        assert_eq!(bytes[12], 1);
        assert_eq!(reported_length(&block) as usize, TRIMMED_LEN);
        assert_eq!(bytes.len(), HEADER_LEN + TRIMMED_LEN);
    }
    assert!(!dir.path().join("games_04.tap").exists());
}

#[test]
fn naming_styles_use_program_names() {
    let dir = tempfile::tempdir().unwrap();
    let tape = write_tape(dir.path(), "games.tap", &["ALPHA", "BETA"]);

    itap(dir.path()).arg(&tape).args(["-b", "-n"]).assert().success();
    assert!(dir.path().join("games_01_ALPHA.tap").exists());
    assert!(dir.path().join("games_02_BETA.tap").exists());

    itap(dir.path()).arg(&tape).args(["-b", "-n2"]).assert().success();
    assert!(dir.path().join("01_ALPHA.tap").exists());

    itap(dir.path()).arg(&tape).args(["-b", "-n3"]).assert().success();
    assert!(dir.path().join("BETA.tap").exists());
}

#[test]
fn join_merges_blocks_before_saving() {
    let dir = tempfile::tempdir().unwrap();
    let tape = write_tape(dir.path(), "games.tap", &["ALPHA", "BETA", "GAMMA"]);

    itap(dir.path())
        .arg(&tape)
        .args(["-b", "-j", "1"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Now 2 blocks will be created"));

    assert!(dir.path().join("games_01.tap").exists());
    assert!(dir.path().join("games_02.tap").exists());
    assert!(!dir.path().join("games_03.tap").exists());
}

#[test]
fn join_out_of_range_fails() {
    let dir = tempfile::tempdir().unwrap();
    let tape = write_tape(dir.path(), "games.tap", &["ALPHA", "BETA"]);

    itap(dir.path())
        .arg(&tape)
        .args(["-b", "-j", "2"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Cannot join block 2"));
}

#[test]
fn single_block_cannot_be_split() {
    let dir = tempfile::tempdir().unwrap();
    let tape = write_tape(dir.path(), "one.tap", &["ALPHA"]);

    itap(dir.path())
        .arg(&tape)
        .arg("-b")
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("no blocks to split"));
}

#[test]
fn split_without_terminal_is_cancelled() {
    let dir = tempfile::tempdir().unwrap();
    let tape = write_tape(dir.path(), "games.tap", &["ALPHA", "BETA"]);

    itap(dir.path())
        .arg(&tape)
        .assert()
        .failure()
        .stderr(predicate::str::contains("Cancelled"));

    assert!(!dir.path().join("games_01.tap").exists());
}

#[test]
fn batch_mode_repairs_header_size() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("games.tap");
    let data = payload(&["ALPHA", "BETA"]);
    fs::write(&path, tap_bytes_with_length(&data, 99)).unwrap();

    itap(dir.path()).arg(&path).args(["-b"]).assert().success();

    assert_eq!(reported_length(&path) as usize, data.len());
    assert!(dir.path().join("games_02.tap").exists());
}

#[test]
fn wrong_header_size_without_terminal_aborts() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("games.tap");
    let data = payload(&["ALPHA", "BETA"]);
    fs::write(&path, tap_bytes_with_length(&data, 99)).unwrap();

    itap(dir.path())
        .arg(&path)
        .assert()
        .failure()
        .stdout(predicate::str::contains("Reported dimension 0x00000063"))
        .stderr(predicate::str::contains("not fixed"));

    assert_eq!(reported_length(&path), 99);
}

#[test]
fn invalid_tape_exits_with_error() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("junk.tap");
    fs::write(&path, b"definitely not a tape image").unwrap();

    itap(dir.path())
        .arg(&path)
        .arg("-l")
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("isn't a valid TAP"));
}

#[test]
fn missing_file_exits_with_error() {
    let dir = tempfile::tempdir().unwrap();

    itap(dir.path())
        .arg(dir.path().join("nope.tap"))
        .assert()
        .failure()
        .stderr(predicate::str::contains("Cannot read"));
}

#[test]
fn config_file_sets_naming_style() {
    let dir = tempfile::tempdir().unwrap();
    let tape = write_tape(dir.path(), "games.tap", &["ALPHA", "BETA"]);
    let config = dir.path().join("itap.toml");
    fs::write(&config, "[output]\nnaming_style = 2\n").unwrap();

    itap(dir.path())
        .arg(&tape)
        .arg("-b")
        .arg("--config")
        .arg(&config)
        .assert()
        .success();

    assert!(dir.path().join("01_ALPHA.tap").exists());
    assert!(dir.path().join("02_BETA.tap").exists());
}

#[test]
fn header_minimum_flag_overrides_default() {
    let dir = tempfile::tempdir().unwrap();
    let tape = write_tape(dir.path(), "games.tap", &["ALPHA", "BETA"]);

    // pilots are 8000 bytes, so a 9000 minimum sees a single block
    itap(dir.path())
        .arg(&tape)
        .args(["-b", "-H", "9000"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("no blocks to split"));
}

#[test]
fn completions_need_no_input() {
    let dir = tempfile::tempdir().unwrap();

    itap(dir.path())
        .args(["--completions", "bash"])
        .assert()
        .success()
        .stdout(predicate::str::contains("itap"));
}
