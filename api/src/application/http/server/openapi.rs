use crate::application::http::{
    daily_goals::router::DailyGoalsApiDoc,
    health::{__path_health, HealthResponse},
};
use utoipa::OpenApi;

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Nutrigoal API"
    ),
    paths(health),
    components(schemas(HealthResponse)),
    nest(
        (path = "/recalculate-daily-goals", api = DailyGoalsApiDoc),
    )
)]
pub struct ApiDoc;
