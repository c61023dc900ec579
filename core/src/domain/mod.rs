pub mod common;
pub mod daily_goals;
