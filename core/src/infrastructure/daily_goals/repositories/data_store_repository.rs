use crate::{
    domain::{
        common::entities::app_errors::CoreError,
        daily_goals::{
            entities::{DailyGoalsRecord, FoodEntry, UserProfileGoals},
            ports::DailyGoalsRepository,
            value_objects::DayWindow,
        },
    },
    infrastructure::daily_goals::repositories::{
        InMemoryDailyGoalsRepository, SupabaseDailyGoalsRepository,
    },
};

/// The data store selected at startup.
#[derive(Debug, Clone)]
pub enum DataStoreRepository {
    Supabase(SupabaseDailyGoalsRepository),
    InMemory(InMemoryDailyGoalsRepository),
}

impl DailyGoalsRepository for DataStoreRepository {
    async fn query_food_entries(
        &self,
        user_id: String,
        window: DayWindow,
    ) -> Result<Vec<FoodEntry>, CoreError> {
        match self {
            DataStoreRepository::Supabase(repository) => {
                repository.query_food_entries(user_id, window).await
            }
            DataStoreRepository::InMemory(repository) => {
                repository.query_food_entries(user_id, window).await
            }
        }
    }

    async fn query_user_nutrition_goals(
        &self,
        user_id: String,
    ) -> Result<Vec<UserProfileGoals>, CoreError> {
        match self {
            DataStoreRepository::Supabase(repository) => {
                repository.query_user_nutrition_goals(user_id).await
            }
            DataStoreRepository::InMemory(repository) => {
                repository.query_user_nutrition_goals(user_id).await
            }
        }
    }

    async fn upsert_daily_goals(&self, record: DailyGoalsRecord) -> Result<(), CoreError> {
        match self {
            DataStoreRepository::Supabase(repository) => {
                repository.upsert_daily_goals(record).await
            }
            DataStoreRepository::InMemory(repository) => {
                repository.upsert_daily_goals(record).await
            }
        }
    }
}
