use tracing::instrument;

use crate::{
    domain::{
        common::entities::app_errors::CoreError,
        daily_goals::{
            entities::{DailyGoalsRecord, FoodEntry, UserProfileGoals},
            ports::DailyGoalsRepository,
            value_objects::DayWindow,
        },
    },
    infrastructure::{
        daily_goals::mappers::{DailyGoalsRow, FoodEntryRow, UserProfileRow},
        supabase::SupabaseClient,
    },
};

pub const FOOD_ENTRIES_TABLE: &str = "food_entries";
pub const USER_PROFILES_TABLE: &str = "user_profiles";
pub const DAILY_GOALS_TABLE: &str = "daily_goals";
pub const DAILY_GOALS_CONFLICT_TARGET: &str = "user_id,date";

#[derive(Debug, Clone)]
pub struct SupabaseDailyGoalsRepository {
    client: SupabaseClient,
}

impl SupabaseDailyGoalsRepository {
    pub fn new(client: SupabaseClient) -> Self {
        Self { client }
    }
}

pub fn food_entries_query(user_id: &str, window: &DayWindow) -> Vec<(&'static str, String)> {
    vec![
        ("select", "*".to_string()),
        ("userid", format!("eq.{}", user_id)),
        ("date", format!("gte.{}", window.start_param())),
        ("date", format!("lt.{}", window.end_param())),
    ]
}

pub fn user_profile_goals_query(user_id: &str) -> Vec<(&'static str, String)> {
    vec![
        ("select", "nutritionGoals".to_string()),
        ("id", format!("eq.{}", user_id)),
    ]
}

impl DailyGoalsRepository for SupabaseDailyGoalsRepository {
    #[instrument(skip(self, window))]
    async fn query_food_entries(
        &self,
        user_id: String,
        window: DayWindow,
    ) -> Result<Vec<FoodEntry>, CoreError> {
        let rows: Vec<FoodEntryRow> = self
            .client
            .select(FOOD_ENTRIES_TABLE, &food_entries_query(&user_id, &window))
            .await?;

        Ok(rows.into_iter().map(FoodEntry::from).collect())
    }

    #[instrument(skip(self))]
    async fn query_user_nutrition_goals(
        &self,
        user_id: String,
    ) -> Result<Vec<UserProfileGoals>, CoreError> {
        let rows: Vec<UserProfileRow> = self
            .client
            .select(USER_PROFILES_TABLE, &user_profile_goals_query(&user_id))
            .await?;

        Ok(rows.into_iter().map(UserProfileGoals::from).collect())
    }

    #[instrument(skip(self, record), fields(user_id = %record.user_id, date = %record.date))]
    async fn upsert_daily_goals(&self, record: DailyGoalsRecord) -> Result<(), CoreError> {
        self.client
            .upsert(
                DAILY_GOALS_TABLE,
                DAILY_GOALS_CONFLICT_TARGET,
                &DailyGoalsRow::from(&record),
            )
            .await
    }
}
