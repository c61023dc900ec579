use crate::domain::daily_goals::{policies::ProfileSelectionPolicy, value_objects::DayBoundary};

pub mod entities;

#[derive(Clone, Debug)]
pub struct NutrigoalConfig {
    pub data_store: DataStoreConfig,
    pub recalculation: RecalculationConfig,
}

#[derive(Clone, Debug)]
pub enum DataStoreConfig {
    Supabase(SupabaseConfig),
    InMemory,
}

#[derive(Clone, Debug)]
pub struct SupabaseConfig {
    pub url: String,
    pub service_role_key: String,
}

#[derive(Clone, Debug, Default)]
pub struct RecalculationConfig {
    pub day_boundary: DayBoundary,
    pub profile_selection: ProfileSelectionPolicy,
}
