use std::future::Future;

use crate::domain::{
    common::entities::app_errors::CoreError,
    daily_goals::{
        entities::{DailyGoalsRecord, FoodEntry, UserProfileGoals},
        errors::DailyGoalsError,
        value_objects::{DayWindow, RecalculateDailyGoalsInput},
    },
};

#[cfg_attr(test, mockall::automock)]
pub trait DailyGoalsService: Send + Sync {
    fn recalculate_daily_goals(
        &self,
        input: RecalculateDailyGoalsInput,
    ) -> impl Future<Output = Result<DailyGoalsRecord, DailyGoalsError>> + Send;
}

/// Data-store operations the recalculation depends on.
#[cfg_attr(test, mockall::automock)]
pub trait DailyGoalsRepository: Send + Sync {
    /// Entries owned by `user_id` whose timestamp falls inside `window`.
    fn query_food_entries(
        &self,
        user_id: String,
        window: DayWindow,
    ) -> impl Future<Output = Result<Vec<FoodEntry>, CoreError>> + Send;

    /// Every profile row whose id equals `user_id`, projected onto its goals.
    fn query_user_nutrition_goals(
        &self,
        user_id: String,
    ) -> impl Future<Output = Result<Vec<UserProfileGoals>, CoreError>> + Send;

    /// Replaces the stored record for `(record.user_id, record.date)`.
    fn upsert_daily_goals(
        &self,
        record: DailyGoalsRecord,
    ) -> impl Future<Output = Result<(), CoreError>> + Send;
}
