use image::{GrayImage, ImageFormat, Luma, Rgb, RgbImage};
use serde::Deserialize;
use std::fs;
use std::path::Path;
use std::process::{Command, Output};
use tempfile::TempDir;

#[derive(Debug, Deserialize)]
#[allow(dead_code)]
struct StepTiming {
    name: String,
    time_ms: u64,
}

#[derive(Debug, Deserialize)]
#[allow(dead_code)]
struct ConversionReport {
    direction: String,
    input: String,
    output: String,
    width: u32,
    height: u32,
    bytes: usize,
    total_time_ms: u64,
    steps: Vec<StepTiming>,
}

fn bmp_to_hex(dir: &Path, args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_bmp-to-hex"))
        .args(args)
        .current_dir(dir)
        .env_remove("RUST_LOG")
        .output()
        .expect("Failed to run bmp-to-hex")
}

fn hex_to_bmp(dir: &Path, args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_hex-to-bmp"))
        .args(args)
        .current_dir(dir)
        .env_remove("RUST_LOG")
        .env_remove("HEX_TO_BMP_INPUT")
        .env_remove("HEX_TO_BMP_OUTPUT")
        .env_remove("HEX_TO_BMP_WIDTH")
        .env_remove("HEX_TO_BMP_HEIGHT")
        .output()
        .expect("Failed to run hex-to-bmp")
}

fn write_fixture(dir: &Path, name: &str, image: &RgbImage) {
    image
        .save_with_format(dir.join(format!("{}.bmp", name)), ImageFormat::Bmp)
        .expect("Failed to write fixture");
}

fn gradient(width: u32, height: u32) -> RgbImage {
    RgbImage::from_fn(width, height, |x, y| {
        Rgb([(x * 13) as u8, (y * 29) as u8, ((x + y) * 7) as u8])
    })
}

fn hex_lines(path: &Path) -> Vec<String> {
    fs::read_to_string(path)
        .expect("Failed to read hex file")
        .lines()
        .map(str::to_string)
        .collect()
}

#[test]
fn test_encode_single_pixel() {
    let dir = TempDir::new().unwrap();
    write_fixture(dir.path(), "pixel", &RgbImage::from_pixel(1, 1, Rgb([18, 52, 86])));

    let output = bmp_to_hex(dir.path(), &["pixel"]);
    assert!(output.status.success());
    assert_eq!(String::from_utf8_lossy(&output.stdout).trim(), "Text file write done");

    assert_eq!(hex_lines(&dir.path().join("input.hex")), vec!["12", "34", "56"]);
}

#[test]
fn test_encode_bottom_row_first_and_unpadded() {
    let dir = TempDir::new().unwrap();
    let mut img = RgbImage::new(1, 2);
    img.put_pixel(0, 0, Rgb([1, 2, 3]));
    img.put_pixel(0, 1, Rgb([4, 5, 6]));
    write_fixture(dir.path(), "column", &img);

    let output = bmp_to_hex(dir.path(), &["column"]);
    assert!(output.status.success());

    assert_eq!(
        hex_lines(&dir.path().join("input.hex")),
        vec!["4", "5", "6", "1", "2", "3"]
    );
}

#[test]
fn test_encode_line_count() {
    let dir = TempDir::new().unwrap();
    write_fixture(dir.path(), "grad", &gradient(5, 3));

    let output = bmp_to_hex(dir.path(), &["grad", "--output", "grad.hex"]);
    assert!(output.status.success());

    assert_eq!(hex_lines(&dir.path().join("grad.hex")).len(), 5 * 3 * 3);
}

#[test]
fn test_round_trip() {
    let dir = TempDir::new().unwrap();
    let original = gradient(7, 4);
    write_fixture(dir.path(), "source", &original);

    assert!(bmp_to_hex(dir.path(), &["source"]).status.success());

    let output = hex_to_bmp(
        dir.path(),
        &["--input", "input.hex", "--width", "7", "--height", "4"],
    );
    assert!(output.status.success());
    assert_eq!(
        String::from_utf8_lossy(&output.stdout).trim(),
        "Image successfully written to output.bmp"
    );

    let rebuilt = image::open(dir.path().join("output.bmp"))
        .expect("Failed to open rebuilt image")
        .into_rgb8();
    assert_eq!(rebuilt, original);
}

#[test]
fn test_decode_default_input_name() {
    let dir = TempDir::new().unwrap();
    fs::write(dir.path().join("formatted_output.hex"), "ff\n0\n80\n").unwrap();

    let output = hex_to_bmp(dir.path(), &["--width", "1", "--height", "1"]);
    assert!(output.status.success());

    let rebuilt = image::open(dir.path().join("output.bmp")).unwrap().into_rgb8();
    assert_eq!(rebuilt.get_pixel(0, 0), &Rgb([0xff, 0x00, 0x80]));
}

#[test]
fn test_decode_underflow_fails() {
    let dir = TempDir::new().unwrap();
    fs::write(dir.path().join("short.hex"), "1\n2\n3\n4\n5\n").unwrap();

    let output = hex_to_bmp(
        dir.path(),
        &["--input", "short.hex", "--width", "1", "--height", "2"],
    );
    assert!(!output.status.success());
    assert!(!dir.path().join("output.bmp").exists());
}

#[test]
fn test_decode_invalid_hex_fails() {
    let dir = TempDir::new().unwrap();
    fs::write(dir.path().join("bad.hex"), "1\nxyz\n3\n").unwrap();

    let output = hex_to_bmp(
        dir.path(),
        &["--input", "bad.hex", "--width", "1", "--height", "1"],
    );
    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("xyz"));
}

#[test]
fn test_decode_rejects_zero_width() {
    let dir = TempDir::new().unwrap();
    fs::write(dir.path().join("formatted_output.hex"), "1\n2\n3\n").unwrap();

    let output = hex_to_bmp(dir.path(), &["--width", "0", "--height", "1"]);
    assert!(!output.status.success());
}

#[test]
fn test_encode_missing_file_fails() {
    let dir = TempDir::new().unwrap();

    let output = bmp_to_hex(dir.path(), &["nothing"]);
    assert!(!output.status.success());
    assert!(!dir.path().join("input.hex").exists());
}

#[test]
fn test_encode_grayscale_bmp_fails() {
    let dir = TempDir::new().unwrap();
    GrayImage::from_pixel(2, 1, Luma([7]))
        .save_with_format(dir.path().join("gray.bmp"), ImageFormat::Bmp)
        .unwrap();

    let output = bmp_to_hex(dir.path(), &["gray"]);
    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("Unsupported channel layout"));
    assert!(!dir.path().join("input.hex").exists());
}

#[test]
fn test_decode_dimensions_from_env() {
    let dir = TempDir::new().unwrap();
    fs::write(dir.path().join("pair.hex"), "1\n2\n3\n4\n5\n6\n").unwrap();

    let output = Command::new(env!("CARGO_BIN_EXE_hex-to-bmp"))
        .args(["--input", "pair.hex"])
        .current_dir(dir.path())
        .env_remove("RUST_LOG")
        .env_remove("HEX_TO_BMP_OUTPUT")
        .env("HEX_TO_BMP_WIDTH", "2")
        .env("HEX_TO_BMP_HEIGHT", "1")
        .output()
        .expect("Failed to run hex-to-bmp");
    assert!(output.status.success());

    let rebuilt = image::open(dir.path().join("output.bmp")).unwrap().into_rgb8();
    assert_eq!(rebuilt.dimensions(), (2, 1));
    assert_eq!(rebuilt.get_pixel(0, 0), &Rgb([1, 2, 3]));
    assert_eq!(rebuilt.get_pixel(1, 0), &Rgb([4, 5, 6]));
}

#[test]
fn test_json_report() {
    let dir = TempDir::new().unwrap();
    write_fixture(dir.path(), "grad", &gradient(3, 2));

    let output = bmp_to_hex(dir.path(), &["grad", "--json"]);
    assert!(output.status.success());

    let report: ConversionReport =
        serde_json::from_slice(&output.stdout).expect("Failed to parse report");
    assert_eq!(report.direction, "encode");
    assert_eq!((report.width, report.height), (3, 2));
    assert_eq!(report.bytes, 18);
    let names: Vec<_> = report.steps.iter().map(|s| s.name.as_str()).collect();
    assert_eq!(names, vec!["load", "flatten", "write"]);
}
