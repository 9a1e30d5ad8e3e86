use std::fs;

use tempfile::TempDir;

use super::*;

#[test]
fn defaults_without_any_source() {
    let settings = Settings::from_raw(RawSettings::default()).expect("valid settings");

    assert_eq!(settings.logging.level, LevelFilter::INFO);
    assert!(matches!(settings.logging.format, LogFormat::Compact));
    assert_eq!(settings.render.default_title, DEFAULT_TITLE);
    assert_eq!(settings.render.default_layout_width, DEFAULT_LAYOUT_WIDTH);
    assert!(!settings.render.guess_mime_type);
}

#[test]
fn cli_overrides_take_highest_precedence() {
    let mut raw = RawSettings::default();
    raw.logging.level = Some("info".to_string());
    raw.render.default_title = Some("From file".to_string());

    let overrides = SettingsOverrides {
        log_level: Some("debug".to_string()),
        default_title: Some("From CLI".to_string()),
        ..Default::default()
    };

    raw.apply_overrides(&overrides);
    let settings = Settings::from_raw(raw).expect("valid settings");

    assert_eq!(settings.logging.level, LevelFilter::DEBUG);
    assert_eq!(settings.render.default_title, "From CLI");
}

#[test]
fn cli_json_logging_enforces_format() {
    let mut raw = RawSettings::default();
    let overrides = SettingsOverrides {
        log_json: Some(true),
        ..Default::default()
    };

    raw.apply_overrides(&overrides);
    let settings = Settings::from_raw(raw).expect("valid settings");

    assert!(matches!(settings.logging.format, LogFormat::Json));
}

#[test]
fn invalid_log_level_is_rejected() {
    let mut raw = RawSettings::default();
    raw.logging.level = Some("loud".to_string());

    let err = Settings::from_raw(raw).expect_err("invalid level");
    assert!(matches!(
        err,
        LoadError::Invalid {
            key: "logging.level",
            ..
        }
    ));
}

#[test]
fn blank_layout_width_is_rejected() {
    let mut raw = RawSettings::default();
    raw.render.default_layout_width = Some("  ".to_string());

    let err = Settings::from_raw(raw).expect_err("blank width");
    assert!(matches!(
        err,
        LoadError::Invalid {
            key: "render.default_layout_width",
            ..
        }
    ));
}

#[test]
fn parse_required_paths_and_flags() {
    let args = CliArgs::parse_from([
        "emailer",
        "-c",
        "email.yaml",
        "--output",
        "target/email.html",
        "--manifest",
        "target/images.json",
        "--guess-mime-type",
        "yes",
    ]);

    assert_eq!(args.document, std::path::PathBuf::from("email.yaml"));
    assert_eq!(args.output, std::path::PathBuf::from("target/email.html"));
    assert_eq!(
        args.manifest.as_deref(),
        Some(std::path::Path::new("target/images.json"))
    );
    assert_eq!(args.overrides.guess_mime_type, Some(true));
}

#[test]
fn missing_output_is_a_usage_error() {
    let result = CliArgs::try_parse_from(["emailer", "--config", "email.yaml"]);
    assert!(result.is_err());
}

#[test]
fn settings_file_is_layered_under_cli() {
    let dir = TempDir::new().expect("temp dir");
    let path = dir.path().join("settings.toml");
    fs::write(
        &path,
        "[render]\ndefault_title = \"Weekly\"\ndefault_layout_width = \"700px\"\n",
    )
    .expect("write settings");

    let args = CliArgs::parse_from([
        "emailer",
        "-c",
        "email.yaml",
        "-o",
        "email.html",
        "--settings-file",
        path.to_str().expect("utf-8 path"),
        "--default-layout-width",
        "480px",
    ]);

    let settings = load(&args).expect("settings load");
    assert_eq!(settings.render.default_title, "Weekly");
    assert_eq!(settings.render.default_layout_width, "480px");
}
