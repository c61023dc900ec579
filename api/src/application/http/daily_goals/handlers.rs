pub mod recalculate_daily_goals;
