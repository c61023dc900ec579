use crate::{
    domain::{
        common::{DataStoreConfig, NutrigoalConfig, entities::app_errors::CoreError},
        daily_goals::services::DailyGoalsRecalculator,
    },
    infrastructure::{
        daily_goals::repositories::{
            DataStoreRepository, InMemoryDailyGoalsRepository, SupabaseDailyGoalsRepository,
        },
        supabase::SupabaseClient,
    },
};

pub type NutrigoalService = DailyGoalsRecalculator<DataStoreRepository>;

pub fn create_service(config: NutrigoalConfig) -> Result<NutrigoalService, CoreError> {
    let repository = match config.data_store {
        DataStoreConfig::Supabase(supabase) => DataStoreRepository::Supabase(
            SupabaseDailyGoalsRepository::new(SupabaseClient::new(supabase)?),
        ),
        DataStoreConfig::InMemory => {
            tracing::warn!("Using the in-memory data store; records are lost on shutdown");
            DataStoreRepository::InMemory(InMemoryDailyGoalsRepository::new())
        }
    };

    tracing::info!(
        day_boundary = ?config.recalculation.day_boundary,
        profile_selection = ?config.recalculation.profile_selection,
        "Daily goals service ready"
    );

    Ok(DailyGoalsRecalculator::new(repository, config.recalculation))
}
