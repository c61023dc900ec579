use std::fmt;

use thiserror::Error;

use crate::domain::common::entities::app_errors::CoreError;

#[derive(Debug, Clone, Error, PartialEq)]
pub enum DailyGoalsError {
    #[error("userId and date are required")]
    MissingParameter,

    #[error("Invalid userId: must be a string")]
    InvalidType,

    #[error("Invalid date format: must be YYYY-MM-DD")]
    InvalidFormat,

    #[error("Invalid date: {0} is not a calendar date")]
    InvalidDate(String),

    #[error("User profile not found for userId: {0}")]
    ProfileNotFound(String),

    #[error("User profile or nutrition goals not found")]
    GoalsNotFound,

    #[error(transparent)]
    DataAccess(#[from] CoreError),
}

/// Stable classification of a [`DailyGoalsError`], kept for logs even though
/// every kind maps to the same HTTP status.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DailyGoalsErrorKind {
    MissingParameter,
    InvalidType,
    InvalidFormat,
    ProfileNotFound,
    GoalsNotFound,
    DataAccessError,
}

impl DailyGoalsError {
    pub fn kind(&self) -> DailyGoalsErrorKind {
        match self {
            DailyGoalsError::MissingParameter => DailyGoalsErrorKind::MissingParameter,
            DailyGoalsError::InvalidType => DailyGoalsErrorKind::InvalidType,
            DailyGoalsError::InvalidFormat | DailyGoalsError::InvalidDate(_) => {
                DailyGoalsErrorKind::InvalidFormat
            }
            DailyGoalsError::ProfileNotFound(_) => DailyGoalsErrorKind::ProfileNotFound,
            DailyGoalsError::GoalsNotFound => DailyGoalsErrorKind::GoalsNotFound,
            DailyGoalsError::DataAccess(_) => DailyGoalsErrorKind::DataAccessError,
        }
    }
}

impl DailyGoalsErrorKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            DailyGoalsErrorKind::MissingParameter => "missing_parameter",
            DailyGoalsErrorKind::InvalidType => "invalid_type",
            DailyGoalsErrorKind::InvalidFormat => "invalid_format",
            DailyGoalsErrorKind::ProfileNotFound => "profile_not_found",
            DailyGoalsErrorKind::GoalsNotFound => "goals_not_found",
            DailyGoalsErrorKind::DataAccessError => "data_access_error",
        }
    }
}

impl fmt::Display for DailyGoalsErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
