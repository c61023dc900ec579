pub mod daily_goals;
pub mod supabase;
