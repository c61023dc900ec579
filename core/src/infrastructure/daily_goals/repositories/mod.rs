pub mod data_store_repository;
pub mod in_memory_daily_goals_repository;
pub mod supabase_daily_goals_repository;

pub use data_store_repository::DataStoreRepository;
pub use in_memory_daily_goals_repository::InMemoryDailyGoalsRepository;
pub use supabase_daily_goals_repository::SupabaseDailyGoalsRepository;
