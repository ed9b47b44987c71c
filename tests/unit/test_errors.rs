//! Unit tests for error types and exit codes

use agent_showcase::errors::{
    get_exit_code, is_cancelled, ConfigError, PlaybackError, ShowcaseError, EXIT_CANCELLED,
    EXIT_CONFIG_ERROR, EXIT_ERROR,
};

#[test]
fn test_config_load_failure_maps_to_config_exit_code() {
    let err = agent_showcase::Config::load(Some("/definitely/not/here.toml")).unwrap_err();
    let err: anyhow::Error = err.into();
    assert_eq!(get_exit_code(&err), EXIT_CONFIG_ERROR);
}

#[test]
fn test_cancelled_is_130() {
    let err: anyhow::Error = ShowcaseError::from(PlaybackError::Cancelled).into();
    assert!(is_cancelled(&err));
    assert_eq!(get_exit_code(&err), EXIT_CANCELLED);
}

#[test]
fn test_plain_anyhow_is_generic() {
    let err = anyhow::anyhow!("something else");
    assert_eq!(get_exit_code(&err), EXIT_ERROR);
}

#[test]
fn test_invalid_value_message_names_field() {
    let err = ConfigError::Invalid {
        field: "timing.speed".into(),
        message: "must be a positive number, got 0".into(),
    };
    assert!(err.to_string().contains("timing.speed"));
}
