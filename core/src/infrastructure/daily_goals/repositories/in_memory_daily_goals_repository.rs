use std::sync::Arc;

use chrono::NaiveDate;
use indexmap::IndexMap;
use tokio::sync::RwLock;

use crate::domain::{
    common::entities::app_errors::CoreError,
    daily_goals::{
        entities::{DailyGoalsRecord, FoodEntry, NutritionGoals, UserProfileGoals},
        ports::DailyGoalsRepository,
        value_objects::DayWindow,
    },
};

/// Process-local tables behind the same port as the Supabase store.
/// Clones share the same tables.
#[derive(Debug, Clone, Default)]
pub struct InMemoryDailyGoalsRepository {
    tables: Arc<RwLock<Tables>>,
}

#[derive(Debug, Default)]
struct Tables {
    food_entries: Vec<FoodEntry>,
    user_profiles: Vec<(String, UserProfileGoals)>,
    daily_goals: IndexMap<(String, NaiveDate), DailyGoalsRecord>,
}

impl InMemoryDailyGoalsRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn insert_food_entry(&self, entry: FoodEntry) {
        self.tables.write().await.food_entries.push(entry);
    }

    /// Profiles are not unique per id, mirroring a table without a primary key constraint.
    pub async fn insert_user_profile(
        &self,
        user_id: impl Into<String>,
        nutrition_goals: Option<NutritionGoals>,
    ) {
        self.tables
            .write()
            .await
            .user_profiles
            .push((user_id.into(), UserProfileGoals { nutrition_goals }));
    }

    pub async fn daily_goals(&self, user_id: &str, date: NaiveDate) -> Option<DailyGoalsRecord> {
        self.tables
            .read()
            .await
            .daily_goals
            .get(&(user_id.to_string(), date))
            .cloned()
    }

    pub async fn daily_goals_count(&self) -> usize {
        self.tables.read().await.daily_goals.len()
    }
}

impl DailyGoalsRepository for InMemoryDailyGoalsRepository {
    async fn query_food_entries(
        &self,
        user_id: String,
        window: DayWindow,
    ) -> Result<Vec<FoodEntry>, CoreError> {
        let tables = self.tables.read().await;

        Ok(tables
            .food_entries
            .iter()
            .filter(|entry| entry.user_id == user_id)
            .filter(|entry| entry.logged_at.is_some_and(|at| window.contains(at)))
            .cloned()
            .collect())
    }

    async fn query_user_nutrition_goals(
        &self,
        user_id: String,
    ) -> Result<Vec<UserProfileGoals>, CoreError> {
        let tables = self.tables.read().await;

        Ok(tables
            .user_profiles
            .iter()
            .filter(|(id, _)| *id == user_id)
            .map(|(_, profile)| profile.clone())
            .collect())
    }

    async fn upsert_daily_goals(&self, record: DailyGoalsRecord) -> Result<(), CoreError> {
        let key = (record.user_id.clone(), record.date);
        self.tables.write().await.daily_goals.insert(key, record);
        Ok(())
    }
}
