use std::path::Path;
use std::process::{Command, Output};

use gridstag::codec::bmp::encode_gray;
use gridstag::PixelGrid;

fn gridstag(args: &[&str], cwd: &Path) -> Output {
    Command::new(env!("CARGO_BIN_EXE_gridstag"))
        .args(args)
        .current_dir(cwd)
        .env("RUST_LOG", "off")
        .output()
        .unwrap()
}

fn write_input(dir: &Path) {
    let grid = PixelGrid::from_fn(8, 6, |(r, c)| ((r * 31 + c * 17) % 256) as u8).unwrap();
    std::fs::write(dir.join("in.bmp"), encode_gray(&grid)).unwrap();
}

// ---------------------------------------------------------------------------
// Usage errors exit with 1, not clap's default of 2.
// ---------------------------------------------------------------------------

#[test]
fn even_mask_exits_with_one() {
    let dir = tempfile::tempdir().unwrap();
    write_input(dir.path());
    let out = gridstag(&["in.bmp", "4", "2"], dir.path());
    assert_eq!(out.status.code(), Some(1));
    assert!(!out.stderr.is_empty());
}

#[test]
fn zero_workers_exits_with_one() {
    let dir = tempfile::tempdir().unwrap();
    write_input(dir.path());
    let out = gridstag(&["in.bmp", "3", "0"], dir.path());
    assert_eq!(out.status.code(), Some(1));
}

#[test]
fn missing_arguments_exit_with_one() {
    let dir = tempfile::tempdir().unwrap();
    let out = gridstag(&["in.bmp"], dir.path());
    assert_eq!(out.status.code(), Some(1));
}

#[test]
fn help_exits_with_zero() {
    let dir = tempfile::tempdir().unwrap();
    let out = gridstag(&["--help"], dir.path());
    assert_eq!(out.status.code(), Some(0));
    assert!(String::from_utf8_lossy(&out.stdout).contains("mask"));
}

// ---------------------------------------------------------------------------
// Runtime failures and a successful run.
// ---------------------------------------------------------------------------

#[test]
fn missing_input_file_exits_with_one() {
    let dir = tempfile::tempdir().unwrap();
    let out = gridstag(&["nope.bmp", "3", "2"], dir.path());
    assert_eq!(out.status.code(), Some(1));

    let stderr = String::from_utf8_lossy(&out.stderr);
    assert!(stderr.starts_with("error:"), "{stderr}");
    // The OS error appears once, through the source chain.
    let os_error = std::fs::metadata(dir.path().join("nope.bmp"))
        .unwrap_err()
        .to_string();
    assert_eq!(stderr.matches(os_error.as_str()).count(), 1, "{stderr}");
}

#[test]
fn valid_run_writes_three_images() {
    let dir = tempfile::tempdir().unwrap();
    write_input(dir.path());
    let out = gridstag(&["in.bmp", "3", "2", "--output-dir", "out"], dir.path());
    assert_eq!(out.status.code(), Some(0), "{}", String::from_utf8_lossy(&out.stderr));

    let mut names: Vec<String> = std::fs::read_dir(dir.path().join("out"))
        .unwrap()
        .map(|entry| entry.unwrap().file_name().to_string_lossy().into_owned())
        .collect();
    names.sort();
    assert_eq!(names.len(), 3);
    assert!(names[0].starts_with("grayscale_"));
    assert!(names[1].starts_with("laplacian_"));
    assert!(names[2].starts_with("median_"));
}
