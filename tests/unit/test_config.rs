//! Unit tests for the config module
//!
//! Tests cover:
//! - Defaults
//! - Loading TOML files
//! - Validation failures
//! - Timing built from config

use agent_showcase::config::{Config, TimingConfig, UiConfig};
use agent_showcase::errors::{ConfigError, ShowcaseError};
use agent_showcase::runner::Timing;
use std::io::Write;
use std::time::Duration;

fn write_config(body: &str) -> tempfile::NamedTempFile {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    file.write_all(body.as_bytes()).unwrap();
    file
}

mod defaults {
    use super::*;

    #[test]
    fn test_timing_defaults() {
        let timing = TimingConfig::default();
        assert_eq!(timing.settle_ms, 500);
        assert_eq!(timing.thinking_ms, 600);
        assert_eq!(timing.processing_ms, 200);
        assert_eq!(timing.bullet_floor_ms, 100);
        assert_eq!(timing.char_ms, 20);
        assert_eq!(timing.bullet_buffer_ms, 400);
        assert_eq!(timing.breathe_ms, 200);
        assert_eq!(timing.upload_ms, 3000);
    }

    #[test]
    fn test_ui_defaults() {
        let ui = UiConfig::default();
        assert_eq!(ui.theme, "brand");
        assert!(ui.animations);
        assert_eq!(ui.collapsed_bullets, 3);
        assert_eq!(ui.typing_char_ms, 15);
        assert!(!ui.expand_all);
    }

    #[test]
    fn test_default_config_builds_default_timing() {
        let config = Config::default();
        assert_eq!(Timing::from_config(&config.timing), Timing::default());
    }
}

mod loading {
    use super::*;

    #[test]
    fn test_load_file() {
        let file = write_config(
            r#"
            [timing]
            speed = 2.0
            thinking_ms = 1000

            [ui]
            theme = "minimal"
            collapsed_bullets = 2
            compact_mode = true
            "#,
        );
        let config = Config::load(file.path().to_str()).unwrap();
        assert!((config.timing.speed - 2.0).abs() < f64::EPSILON);
        assert_eq!(config.timing.thinking_ms, 1000);
        assert_eq!(config.ui.theme, "minimal");
        assert_eq!(config.ui.collapsed_bullets, 2);
        assert!(config.compact_mode);

        let timing = Timing::from_config(&config.timing);
        assert_eq!(timing.thinking, Duration::from_millis(500));
        assert_eq!(timing.processing, Duration::from_millis(100));
    }

    #[test]
    fn test_load_malformed_file() {
        let file = write_config("[timing\nspeed =");
        let err = Config::load(file.path().to_str()).unwrap_err();
        assert!(matches!(err, ShowcaseError::Config(ConfigError::Parse { .. })));
    }

    #[test]
    fn test_load_rejects_zero_speed() {
        let file = write_config("[timing]\nspeed = 0.0\n");
        let err = Config::load(file.path().to_str()).unwrap_err();
        assert!(matches!(
            err,
            ShowcaseError::Config(ConfigError::Invalid { ref field, .. }) if field == "timing.speed"
        ));
    }

    #[test]
    fn test_load_rejects_zero_collapse() {
        let file = write_config("[ui]\ncollapsed_bullets = 0\n");
        assert!(Config::load(file.path().to_str()).is_err());
    }

    #[test]
    fn test_unknown_theme_is_accepted() {
        // Falls back to the brand theme when applied
        let file = write_config("[ui]\ntheme = \"sepia\"\n");
        let config = Config::load(file.path().to_str()).unwrap();
        assert_eq!(config.ui.theme, "sepia");
    }
}
