use tracing::{debug, info, instrument};

use crate::domain::{
    common::RecalculationConfig,
    daily_goals::{
        entities::{DailyGoal, DailyGoals, DailyGoalsRecord, FoodEntry, NutritionGoals},
        errors::DailyGoalsError,
        ports::{DailyGoalsRepository, DailyGoalsService},
        value_objects::{NutritionTotals, RecalculateDailyGoalsInput},
    },
};

#[derive(Debug, Clone)]
pub struct DailyGoalsRecalculator<R> {
    repository: R,
    config: RecalculationConfig,
}

impl<R> DailyGoalsRecalculator<R> {
    pub fn new(repository: R, config: RecalculationConfig) -> Self {
        Self { repository, config }
    }

    pub fn repository(&self) -> &R {
        &self.repository
    }
}

impl<R> DailyGoalsService for DailyGoalsRecalculator<R>
where
    R: DailyGoalsRepository,
{
    #[instrument(skip(self, input), fields(user_id = %input.user_id, date = %input.date))]
    async fn recalculate_daily_goals(
        &self,
        input: RecalculateDailyGoalsInput,
    ) -> Result<DailyGoalsRecord, DailyGoalsError> {
        let window = self
            .config
            .day_boundary
            .window(input.date)
            .ok_or_else(|| DailyGoalsError::InvalidDate(input.date.to_string()))?;

        let entries = self
            .repository
            .query_food_entries(input.user_id.clone(), window)
            .await?;

        info!(count = entries.len(), "Found food entries for the given date");

        let profiles = self
            .repository
            .query_user_nutrition_goals(input.user_id.clone())
            .await?;

        let profile = self
            .config
            .profile_selection
            .select(&input.user_id, profiles)?;

        let nutrition_goals = profile
            .nutrition_goals
            .ok_or(DailyGoalsError::GoalsNotFound)?;

        let totals = aggregate_nutrition(&entries);
        debug!(?totals, "Calculated total nutrition");

        let goals = merge_goals(&nutrition_goals, &totals);
        debug!(?goals, "Updated goals");

        let record = DailyGoalsRecord {
            user_id: input.user_id,
            date: input.date,
            goals,
        };

        self.repository.upsert_daily_goals(record.clone()).await?;

        info!(components = record.goals.len(), "Daily goals recalculated");

        Ok(record)
    }
}

/// Sums item values per component. Entries without a nutrition payload are skipped.
pub fn aggregate_nutrition(entries: &[FoodEntry]) -> NutritionTotals {
    entries
        .iter()
        .filter_map(|entry| entry.nutrition_info.as_ref())
        .flat_map(|info| info.nutrition.iter())
        .fold(NutritionTotals::new(), |mut totals, item| {
            *totals.entry(item.component.clone()).or_insert(0.0) += item.value;
            totals
        })
}

/// One output goal per configured goal, in goal order; components without a total get `0`.
/// A stored `actual` field is kept in place and overwritten when serialized.
pub fn merge_goals(goals: &NutritionGoals, totals: &NutritionTotals) -> DailyGoals {
    goals
        .iter()
        .map(|(component, descriptor)| {
            let goal = descriptor.clone();
            let actual = totals
                .get(component)
                .copied()
                .filter(|total| !total.is_nan())
                .unwrap_or(0.0);

            (component.clone(), DailyGoal { goal, actual })
        })
        .collect()
}
