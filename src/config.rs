//! Configuration constants and utilities for tripline
//!
//! Paths for the connection profile file and the log file, each
//! overridable through an environment variable.

/// Default profile file path for tripline
pub const DEFAULT_PROFILE_PATH: &str = "~/.tripline/profile";

/// Environment variable name for overriding the profile path
pub const PROFILE_PATH_ENV_VAR: &str = "TRIPLINE_PROFILE_PATH";

/// Default log file path; the terminal runs in raw mode, so log output
/// never goes to stdout
pub const DEFAULT_LOG_PATH: &str = "~/.tripline/log";

/// Environment variable name for overriding the log path
pub const LOG_PATH_ENV_VAR: &str = "TRIPLINE_LOG";

/// Get the profile file path, checking the environment variable first,
/// then falling back to the default
pub fn get_profile_path() -> String {
    std::env::var_os(PROFILE_PATH_ENV_VAR)
        .and_then(|val| val.into_string().ok())
        .unwrap_or_else(|| DEFAULT_PROFILE_PATH.to_string())
}

/// Get the log file path, checking the environment variable first,
/// then falling back to the default
pub fn get_log_path() -> String {
    std::env::var_os(LOG_PATH_ENV_VAR)
        .and_then(|val| val.into_string().ok())
        .unwrap_or_else(|| DEFAULT_LOG_PATH.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_profile_path() {
        assert_eq!(DEFAULT_PROFILE_PATH, "~/.tripline/profile");
    }

    #[test]
    fn test_env_var_name() {
        assert_eq!(PROFILE_PATH_ENV_VAR, "TRIPLINE_PROFILE_PATH");
    }

    #[test]
    fn test_get_profile_path_default() {
        // Save current env var state
        let original = std::env::var_os(PROFILE_PATH_ENV_VAR);

        // Remove env var if set
        std::env::remove_var(PROFILE_PATH_ENV_VAR);
        assert_eq!(get_profile_path(), DEFAULT_PROFILE_PATH);

        // Restore original state
        if let Some(val) = original {
            std::env::set_var(PROFILE_PATH_ENV_VAR, val);
        }
    }

    #[test]
    fn test_get_profile_path_env_override() {
        // Save current env var state
        let original = std::env::var_os(PROFILE_PATH_ENV_VAR);

        let test_path = "/custom/profile/path";
        std::env::set_var(PROFILE_PATH_ENV_VAR, test_path);
        assert_eq!(get_profile_path(), test_path);

        // Restore original state
        match original {
            Some(val) => std::env::set_var(PROFILE_PATH_ENV_VAR, val),
            None => std::env::remove_var(PROFILE_PATH_ENV_VAR),
        }
    }

    #[test]
    fn test_get_log_path_env_override() {
        let original = std::env::var_os(LOG_PATH_ENV_VAR);

        let test_path = "/custom/log/path";
        std::env::set_var(LOG_PATH_ENV_VAR, test_path);
        assert_eq!(get_log_path(), test_path);

        match original {
            Some(val) => std::env::set_var(LOG_PATH_ENV_VAR, val),
            None => std::env::remove_var(LOG_PATH_ENV_VAR),
        }
    }
}
