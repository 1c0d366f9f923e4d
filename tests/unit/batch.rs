use std::path::PathBuf;

use rand::SeedableRng as _;

use super::*;

fn scratch(name: &str) -> PathBuf {
    let dir = PathBuf::from("target").join("unit_batch").join(name);
    let _ = std::fs::remove_dir_all(&dir);
    dir
}

fn cfg(name: &str) -> BatchConfig {
    let dir = scratch(name);
    BatchConfig {
        input: dir.join("setting.csv"),
        out_dir: dir.join("dist"),
        seed: Some(1),
    }
}

#[test]
fn rejected_row_reports_every_defect_and_never_touches_the_pipeline() {
    let cfg = cfg("rejected");
    let raw = RawRow {
        line: 4,
        fields: vec!["x".into(), "0".into(), "tiff".into()],
    };

    let outcome = process_row(&raw, &cfg, &label::system_fontdb());
    assert_eq!(outcome.line, 4);
    assert!(!outcome.success);
    assert_eq!(
        outcome.messages,
        vec!["Invalid type", "Invalid width", "Invalid height"]
    );
    // Rejection happens before the output directory is ever needed.
    assert!(!cfg.out_dir.exists());
}

#[test]
fn label_failure_is_row_scoped_with_the_documented_message() {
    let cfg = cfg("label_failure");
    std::fs::create_dir_all(&cfg.out_dir).unwrap();

    // Width 1 floors to a zero-width label layer, which the rasterizer
    // rejects.
    let raw = RawRow {
        line: 2,
        fields: vec!["1".into(), "600".into(), "png".into()],
    };

    let outcome = process_row(&raw, &cfg, &label::system_fontdb());
    assert!(!outcome.success);
    assert_eq!(outcome.messages.len(), 1);
    assert!(
        outcome.messages[0].contains("Failed to create text"),
        "got: {}",
        outcome.messages[0]
    );
    assert!(std::fs::read_dir(&cfg.out_dir).unwrap().next().is_none());
}

#[test]
fn missing_input_completes_quietly_after_preparing_the_out_dir() {
    let cfg = cfg("no_input");
    let outcome = run_batch(&cfg).unwrap();
    assert_eq!(outcome, BatchOutcome::NoInput);
    // The directory is bootstrapped before the input check, matching the
    // documented run order.
    assert!(cfg.out_dir.is_dir());
}

#[test]
fn non_directory_out_path_aborts_the_run() {
    let dir = scratch("bad_out");
    std::fs::create_dir_all(&dir).unwrap();
    let file_path = dir.join("dist");
    std::fs::write(&file_path, b"not a directory").unwrap();

    let cfg = BatchConfig {
        input: dir.join("setting.csv"),
        out_dir: file_path,
        seed: None,
    };
    let err = run_batch(&cfg).unwrap_err();
    assert!(matches!(err, PlacegenError::Validation(_)), "got: {err}");
}

#[test]
fn seeded_colors_are_stable_per_row() {
    let cfg = cfg("seeded");
    let row = ValidatedRow {
        line: 2,
        width: 10,
        height: 10,
        format: crate::table::row::ImageFormat::Png,
        width_text: "10".into(),
        height_text: "10".into(),
    };

    let draw = |cfg: &BatchConfig| {
        let mut rng = StdRng::seed_from_u64(cfg.seed.unwrap().wrapping_add(row.line as u64));
        color::contrast_pair(&mut rng)
    };
    assert_eq!(draw(&cfg), draw(&cfg));
}
