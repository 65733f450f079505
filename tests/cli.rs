extern crate assert_cmd;
extern crate predicates;
extern crate tempfile;

use assert_cmd::prelude::*;
use predicates::prelude::*;
use std::fs;
use std::process::Command;

fn greymap_body(bytes: &[u8], width: usize, height: usize) -> &[u8] {
    &bytes[bytes.len() - width * height..]
}

#[test]
fn renders_a_greymap() {
    let dir = tempfile::tempdir().unwrap();
    let output = dir.path().join("triangle.pnm");

    Command::cargo_bin("chaos")
        .unwrap()
        .arg("--output")
        .arg(&output)
        .args(&["--size", "120x100", "--steps", "500", "--seed", "17"])
        .assert()
        .success();

    let written = fs::read(&output).unwrap();
    assert!(written.starts_with(b"P5"));
    let body = greymap_body(&written, 120, 100);
    let inked = body.iter().filter(|&&p| p == 0).count();
    assert!(inked > 100, "only {} pixels inked", inked);
}

#[test]
fn seeded_renders_repeat() {
    let dir = tempfile::tempdir().unwrap();
    let first = dir.path().join("first.pnm");
    let second = dir.path().join("second.pnm");

    for output in &[&first, &second] {
        Command::cargo_bin("chaos")
            .unwrap()
            .arg("-o")
            .arg(output)
            .args(&["-s", "64x64", "-n", "200", "--speed", "0", "--seed", "3"])
            .args(&["-a", "32,0", "-a", "0,63", "-a", "63,63", "-p", "5,5"])
            .assert()
            .success();
    }

    assert_eq!(fs::read(&first).unwrap(), fs::read(&second).unwrap());
}

#[test]
fn plots_only_within_the_anchor_triangle() {
    let dir = tempfile::tempdir().unwrap();
    let output = dir.path().join("corner.pnm");

    // Every point after the start lies on the segment toward an anchor
    // in the top-left quarter, so nothing reaches the far corner.
    Command::cargo_bin("chaos")
        .unwrap()
        .arg("-o")
        .arg(&output)
        .args(&["-s", "80x80", "-n", "300", "--seed", "8"])
        .args(&["-a", "0,0", "-a", "30,0", "-a", "0,30", "-p", "10,10"])
        .assert()
        .success();

    let written = fs::read(&output).unwrap();
    let body = greymap_body(&written, 80, 80);
    for row in 40..80 {
        for column in 40..80 {
            assert_eq!(body[row * 80 + column], 255);
        }
    }
}

#[test]
fn zero_sized_surface_is_fatal() {
    let dir = tempfile::tempdir().unwrap();
    let output = dir.path().join("nothing.pnm");

    Command::cargo_bin("chaos")
        .unwrap()
        .arg("-o")
        .arg(&output)
        .args(&["--size", "0x10"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("no drawable area").from_utf8());

    assert!(!output.exists());
}

#[test]
fn wrong_anchor_count_is_rejected() {
    let dir = tempfile::tempdir().unwrap();
    let output = dir.path().join("square.pnm");

    Command::cargo_bin("chaos")
        .unwrap()
        .arg("-o")
        .arg(&output)
        .args(&["-a", "0,0", "-a", "10,0", "-a", "10,10", "-a", "0,10"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Exactly three anchor points").from_utf8());
}

#[test]
fn output_is_required() {
    Command::cargo_bin("chaos")
        .unwrap()
        .assert()
        .failure()
        .stderr(predicate::str::contains("--output").from_utf8());
}

#[test]
fn non_finite_speed_is_rejected() {
    let dir = tempfile::tempdir().unwrap();
    let output = dir.path().join("stalled.pnm");

    Command::cargo_bin("chaos")
        .unwrap()
        .arg("-o")
        .arg(&output)
        .args(&["-s", "50x50", "-n", "5", "--speed", "NaN"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Speed must be a finite number").from_utf8());

    assert!(!output.exists());
}

#[test]
fn far_off_anchor_is_clipped() {
    let dir = tempfile::tempdir().unwrap();
    let output = dir.path().join("far.pnm");

    Command::cargo_bin("chaos")
        .unwrap()
        .arg("-o")
        .arg(&output)
        .args(&["-s", "50x50", "-n", "5", "--speed", "0", "--seed", "1"])
        .args(&["-a", "1e300,0", "-a", "0,40", "-a", "40,40"])
        .assert()
        .success();

    assert!(fs::read(&output).unwrap().starts_with(b"P5"));
}
