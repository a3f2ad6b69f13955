use std::{
    fs,
    path::{Path, PathBuf},
};

use tempfile::tempdir;

use sequin::{SequinError, color::Color};
use sequin_cli::Args;

fn demos_dir() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR")).join("../../demos")
}

/// Collects all .seq files from a directory
fn collect_seq_files(dir: PathBuf) -> Vec<PathBuf> {
    let mut files = if let Ok(entries) = fs::read_dir(&dir) {
        entries
            .flatten()
            .map(|entry| entry.path())
            .filter(|path| {
                path.is_file() && path.extension().and_then(|s| s.to_str()) == Some("seq")
            })
            .collect()
    } else {
        Vec::new()
    };

    // Sort for consistent test output
    files.sort();
    files
}

fn args_for(input: &Path, output: &Path, strict: bool) -> Args {
    Args {
        input: input.to_string_lossy().to_string(),
        output: output.to_string_lossy().to_string(),
        config: None,
        log_level: "off".to_string(),
        strict,
    }
}

#[test]
fn e2e_smoke_test_valid_demos() {
    let temp_dir = tempdir().expect("Failed to create temp directory");

    let demos = collect_seq_files(demos_dir());
    assert!(!demos.is_empty(), "No demos found in demos/");

    let mut failed = Vec::new();

    for demo in &demos {
        let output_path = temp_dir
            .path()
            .join(format!("{}.svg", demo.file_stem().unwrap().to_string_lossy()));

        match sequin_cli::run(&args_for(demo, &output_path, true)) {
            Ok(diagnostics) => {
                assert_eq!(diagnostics, 0);
                let svg = fs::read_to_string(&output_path).expect("output should exist");
                assert!(svg.contains("</svg>"), "{} produced incomplete SVG", demo.display());
            }
            Err(e) => failed.push((demo.clone(), e)),
        }
    }

    if !failed.is_empty() {
        eprintln!("\nDemos that failed:");
        for (path, err) in &failed {
            eprintln!("  {}: {err}", path.display());
        }
        panic!("{} of {} demos failed", failed.len(), demos.len());
    }
}

#[test]
fn e2e_broken_demo_renders_without_strict() {
    let temp_dir = tempdir().expect("Failed to create temp directory");
    let input = demos_dir().join("errors").join("broken.seq");
    let output = temp_dir.path().join("broken.svg");

    let diagnostics = sequin_cli::run(&args_for(&input, &output, false))
        .expect("lenient mode should still render");

    assert_eq!(diagnostics, 4);
    let svg = fs::read_to_string(&output).expect("output should exist");
    assert!(svg.contains("still rendered"));
}

#[test]
fn e2e_broken_demo_fails_with_strict() {
    let temp_dir = tempdir().expect("Failed to create temp directory");
    let input = demos_dir().join("errors").join("broken.seq");
    let output = temp_dir.path().join("broken.svg");

    let result = sequin_cli::run(&args_for(&input, &output, true));

    match result {
        Err(SequinError::Parse { err, .. }) => assert_eq!(err.errors().len(), 4),
        other => panic!("expected a parse error, got {other:?}"),
    }
    assert!(!output.exists());
}

#[test]
fn e2e_missing_input_is_an_io_error() {
    let temp_dir = tempdir().expect("Failed to create temp directory");
    let input = temp_dir.path().join("nope.seq");
    let output = temp_dir.path().join("nope.svg");

    let result = sequin_cli::run(&args_for(&input, &output, false));
    assert!(matches!(result, Err(SequinError::Io(_))));
}

#[test]
fn e2e_explicit_config_is_applied() {
    let temp_dir = tempdir().expect("Failed to create temp directory");
    let config_path = temp_dir.path().join("config.toml");
    fs::write(&config_path, "[style]\nbackground_color = \"#123456\"\n").unwrap();

    let input = demos_dir().join("login.seq");
    let output = temp_dir.path().join("login.svg");
    let mut args = args_for(&input, &output, true);
    args.config = Some(config_path.to_string_lossy().to_string());

    sequin_cli::run(&args).expect("render with config");
    let svg = fs::read_to_string(&output).unwrap();
    let background = Color::new("#123456").unwrap().to_string();
    assert!(svg.contains(&background));
}
