use axum::{body::Bytes, extract::State};
use nutrigoal_core::domain::daily_goals::{entities::DailyGoals, ports::DailyGoalsService};
use serde::Serialize;
use utoipa::ToSchema;

use crate::application::http::{
    daily_goals::validators::{RecalculateDailyGoalsRequest, RecalculateDailyGoalsValidator},
    server::{
        api_entities::{
            api_error::{ApiError, ApiErrorResponse},
            response::Response,
        },
        app_state::AppState,
    },
};

pub const RECALCULATED_MESSAGE: &str = "Daily goals recalculated successfully";

#[derive(Debug, Serialize, ToSchema)]
pub struct RecalculateDailyGoalsResponse {
    pub message: String,
    #[serde(rename = "updatedGoals")]
    #[schema(value_type = Object)]
    pub updated_goals: DailyGoals,
}

#[utoipa::path(
    post,
    path = "",
    tag = "daily-goals",
    summary = "Recalculate daily goals",
    description = "Sums the nutrition of the user's food entries for the given date, merges the totals into the user's nutrition goals as `actual` and stores the result for that day",
    request_body = RecalculateDailyGoalsRequest,
    responses(
        (status = 200, body = RecalculateDailyGoalsResponse, description = "Daily goals recalculated"),
        (status = 400, body = ApiErrorResponse, description = "Invalid input, missing profile or goals, or data store failure")
    )
)]
pub async fn recalculate_daily_goals(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<Response<RecalculateDailyGoalsResponse>, ApiError> {
    let request = RecalculateDailyGoalsValidator::from_body(&body)?;

    tracing::info!(
        user_id = ?request.user_id,
        date = ?request.date,
        "Received daily goals recalculation request"
    );

    let input = request.validate()?;

    let record = state.service.recalculate_daily_goals(input).await?;

    Ok(Response::OK(RecalculateDailyGoalsResponse {
        message: RECALCULATED_MESSAGE.to_string(),
        updated_goals: record.goals,
    }))
}
