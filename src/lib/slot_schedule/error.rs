//! Error types for schedule generation and persistence.

use thiserror::Error;

use super::models::Role;

#[derive(Debug, Error)]
pub enum SchedulerError {
    /// Class duration is not a positive, finite number of hours
    #[error("Invalid class duration: {hours} hours")]
    InvalidDuration { hours: f64 },

    /// A single class would not fit into the daily window at all
    #[error("Class needs {slots_needed} slots but the daily window only has {slots_available}")]
    DurationExceedsWindow {
        slots_needed: usize,
        slots_available: usize,
    },

    /// Daily window settings could not be turned into a slot grid
    #[error("Invalid daily window: {message}")]
    InvalidWindow { message: String },

    /// Requested course code is not in the catalog
    #[error("Unknown course: {code}")]
    UnknownCourse { code: String },

    #[error("Role {role} is not allowed to save schedules")]
    Forbidden { role: Role },

    /// Saving is gated until at least one enrollment period is over
    #[error("No enrollment period has ended yet")]
    NoEndedEnrollmentPeriod,

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Network error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Config error: {0}")]
    Config(#[from] figment::Error),
}

impl SchedulerError {
    /// Returns true if the error comes from the request itself rather than
    /// from the environment (files, network, config).
    pub fn is_input_error(&self) -> bool {
        matches!(
            self,
            SchedulerError::InvalidDuration { .. }
                | SchedulerError::DurationExceedsWindow { .. }
                | SchedulerError::UnknownCourse { .. }
        )
    }
}
