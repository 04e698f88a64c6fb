//! Application-level error carried back to `main` as the process exit code.
//!
//! Two exit codes are in use:
//! - `2` for configuration/input problems: bad flags, missing `TREND_DATA`,
//!   unreadable or malformed files. Retrying without changing the invocation
//!   will not help.
//! - `4` for runtime failures: fetch errors, dataset validation, terminal
//!   setup and draw errors. The same invocation may succeed later.

pub struct AppError {
    exit_code: u8,
    message: String,
}

const EXIT_CONFIG: u8 = 2;
const EXIT_RUNTIME: u8 = 4;

impl AppError {
    /// Configuration/input error (exit code 2).
    pub fn config(message: impl Into<String>) -> Self {
        Self {
            exit_code: EXIT_CONFIG,
            message: message.into(),
        }
    }

    /// Runtime failure (exit code 4).
    pub fn runtime(message: impl Into<String>) -> Self {
        Self {
            exit_code: EXIT_RUNTIME,
            message: message.into(),
        }
    }

    pub fn exit_code(&self) -> u8 {
        self.exit_code
    }
}

impl std::fmt::Display for AppError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::fmt::Debug for AppError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppError")
            .field("exit_code", &self.exit_code)
            .field("message", &self.message)
            .finish()
    }
}

impl std::error::Error for AppError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn constructors_pick_the_documented_exit_codes() {
        let config = AppError::config("no dataset configured");
        assert_eq!(config.exit_code(), 2);
        assert_eq!(config.to_string(), "no dataset configured");

        let runtime = AppError::runtime("fetch failed");
        assert_eq!(runtime.exit_code(), 4);
        assert_eq!(runtime.to_string(), "fetch failed");
    }
}
