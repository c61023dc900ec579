use super::handlers::recalculate_daily_goals::{
    __path_recalculate_daily_goals, recalculate_daily_goals,
};
use crate::application::http::server::app_state::AppState;
use axum::{Router, routing::any};
use utoipa::OpenApi;

#[derive(OpenApi)]
#[openapi(paths(recalculate_daily_goals))]
pub struct DailyGoalsApiDoc;

/// Every method except `OPTIONS` (answered by the CORS layer) runs the recalculation.
pub fn daily_goals_routes(state: AppState) -> Router<AppState> {
    Router::new().route(
        &format!("{}/recalculate-daily-goals", state.args.server.root_path),
        any(recalculate_daily_goals),
    )
}
