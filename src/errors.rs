use std::path::PathBuf;
use thiserror::Error;

/// The central error type for the showcase.
///
/// Playback itself cannot fail; errors come from loading configuration,
/// writing to the terminal, or the run task dying underneath the frontend.
#[derive(Error, Debug)]
pub enum ShowcaseError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Playback error: {0}")]
    Playback(#[from] PlaybackError),

    #[error("Render error: {0}")]
    Render(#[from] std::io::Error),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config from {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse config {path}: {message}")]
    Parse { path: PathBuf, message: String },

    #[error("Invalid value for {field}: {message}")]
    Invalid { field: String, message: String },
}

#[derive(Error, Debug)]
pub enum PlaybackError {
    #[error("Playback task failed: {0}")]
    TaskFailed(String),

    #[error("Playback cancelled")]
    Cancelled,
}

pub const EXIT_SUCCESS: u8 = 0;
pub const EXIT_ERROR: u8 = 1;
pub const EXIT_CONFIG_ERROR: u8 = 2;
pub const EXIT_RENDER_ERROR: u8 = 3;
pub const EXIT_CANCELLED: u8 = 130;

/// Check if an anyhow error means the user cancelled playback
pub fn is_cancelled(e: &anyhow::Error) -> bool {
    if let Some(ShowcaseError::Playback(PlaybackError::Cancelled)) = e.downcast_ref::<ShowcaseError>() {
        return true;
    }

    matches!(e.downcast_ref::<PlaybackError>(), Some(PlaybackError::Cancelled))
}

/// Determine the appropriate process exit code for an error.
pub fn get_exit_code(e: &anyhow::Error) -> u8 {
    if is_cancelled(e) {
        return EXIT_CANCELLED;
    }

    if let Some(err) = e.downcast_ref::<ShowcaseError>() {
        return match err {
            ShowcaseError::Config(_) => EXIT_CONFIG_ERROR,
            ShowcaseError::Render(_) => EXIT_RENDER_ERROR,
            _ => EXIT_ERROR,
        };
    }

    // Direct enum unwraps fallback
    if e.downcast_ref::<ConfigError>().is_some() {
        return EXIT_CONFIG_ERROR;
    }
    if e.downcast_ref::<std::io::Error>().is_some() {
        return EXIT_RENDER_ERROR;
    }

    EXIT_ERROR
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_error_exit_code() {
        let err: anyhow::Error = ShowcaseError::Config(ConfigError::Invalid {
            field: "timing.speed".into(),
            message: "must be positive".into(),
        })
        .into();
        assert_eq!(get_exit_code(&err), EXIT_CONFIG_ERROR);
    }

    #[test]
    fn test_bare_config_error_exit_code() {
        let err: anyhow::Error = ConfigError::Parse {
            path: PathBuf::from("x.toml"),
            message: "bad".into(),
        }
        .into();
        assert_eq!(get_exit_code(&err), EXIT_CONFIG_ERROR);
    }

    #[test]
    fn test_cancelled_exit_code() {
        let wrapped: anyhow::Error = ShowcaseError::Playback(PlaybackError::Cancelled).into();
        assert!(is_cancelled(&wrapped));
        assert_eq!(get_exit_code(&wrapped), EXIT_CANCELLED);

        let bare: anyhow::Error = PlaybackError::Cancelled.into();
        assert_eq!(get_exit_code(&bare), EXIT_CANCELLED);
    }

    #[test]
    fn test_render_error_exit_code() {
        let io = std::io::Error::new(std::io::ErrorKind::BrokenPipe, "closed");
        let err: anyhow::Error = ShowcaseError::Render(io).into();
        assert_eq!(get_exit_code(&err), EXIT_RENDER_ERROR);
    }

    #[test]
    fn test_task_failure_is_generic() {
        let err: anyhow::Error = PlaybackError::TaskFailed("panicked".into()).into();
        assert_eq!(get_exit_code(&err), EXIT_ERROR);
        assert!(!is_cancelled(&err));
    }

    #[test]
    fn test_error_messages() {
        let err = ConfigError::Invalid {
            field: "ui.collapsed_bullets".into(),
            message: "must be at least 1".into(),
        };
        assert_eq!(
            err.to_string(),
            "Invalid value for ui.collapsed_bullets: must be at least 1"
        );
        assert_eq!(EXIT_SUCCESS, 0);
    }
}
