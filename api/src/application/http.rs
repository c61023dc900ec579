pub mod daily_goals;
pub mod health;
pub mod server;
