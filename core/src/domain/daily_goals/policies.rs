use tracing::warn;

use crate::domain::daily_goals::{entities::UserProfileGoals, errors::DailyGoalsError};

/// How to resolve a profile lookup that returns more than one row.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ProfileSelectionPolicy {
    /// Use the first row and log a warning.
    #[default]
    First,
}

impl ProfileSelectionPolicy {
    pub fn select(
        self,
        user_id: &str,
        profiles: Vec<UserProfileGoals>,
    ) -> Result<UserProfileGoals, DailyGoalsError> {
        let count = profiles.len();
        let selected = profiles
            .into_iter()
            .next()
            .ok_or_else(|| DailyGoalsError::ProfileNotFound(user_id.to_string()))?;

        if count > 1 {
            match self {
                ProfileSelectionPolicy::First => warn!(
                    user_id = %user_id,
                    count,
                    "Multiple user profiles found, using the first one"
                ),
            }
        }

        Ok(selected)
    }
}
