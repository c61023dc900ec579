use std::sync::Arc;

use crate::application::http::daily_goals::router::daily_goals_routes;
use crate::application::http::health::health_routes;
use crate::application::http::server::app_state::AppState;
use crate::application::http::server::openapi::ApiDoc;
use crate::args::Args;

use axum::http::header::{ACCESS_CONTROL_ALLOW_HEADERS, AUTHORIZATION, CONTENT_TYPE};
use axum::http::{HeaderName, HeaderValue, Method};
use axum::routing::get;
use axum::{Json, Router};
use axum_prometheus::PrometheusMetricLayer;
use nutrigoal_core::{application::create_service, domain::common::NutrigoalConfig};
use tower_http::cors::{Any, CorsLayer};
use tower_http::set_header::SetResponseHeaderLayer;
use tracing::info_span;
use utoipa::OpenApi;

/// Value of `Access-Control-Allow-Headers` on every response.
pub const ALLOWED_HEADERS: &str = "authorization, x-client-info, apikey, content-type";

pub fn state(args: Arc<Args>) -> Result<AppState, anyhow::Error> {
    let config = NutrigoalConfig::try_from(args.as_ref().clone())?;
    let service = create_service(config)?;

    Ok(AppState::new(args, service))
}

/// Returns the [`Router`] of this application, including the metrics endpoint.
pub fn router(state: AppState) -> Result<Router, anyhow::Error> {
    let root_path = state.args.server.root_path.clone();
    let (prometheus_layer, metric_handle) = PrometheusMetricLayer::pair();

    let routes = routes(&state).route(
        &format!("{}/metrics", root_path),
        get(|| async move { metric_handle.render() }),
    );

    Ok(with_layers(routes, state).layer(prometheus_layer))
}

/// Application routes with tracing and CORS, without the process-global metrics recorder.
pub fn app_router(state: AppState) -> Router {
    with_layers(routes(&state), state)
}

fn routes(state: &AppState) -> Router<AppState> {
    let mut openapi = ApiDoc::openapi();
    let mut paths = openapi.paths.clone();
    paths.paths = openapi
        .paths
        .paths
        .into_iter()
        .map(|(path, item)| (format!("{}{path}", state.args.server.root_path), item))
        .collect();
    openapi.paths = paths;

    let root_path = state.args.server.root_path.clone();

    Router::new()
        .route(
            &format!("{}/api-docs/openapi.json", root_path),
            get(move || {
                let openapi = openapi.clone();
                async move { Json(openapi) }
            }),
        )
        .merge(daily_goals_routes(state.clone()))
        .merge(health_routes(&root_path))
}

fn with_layers(routes: Router<AppState>, state: AppState) -> Router {
    let trace_layer = tower_http::trace::TraceLayer::new_for_http().make_span_with(
        |request: &axum::extract::Request| {
            let uri: String = request.uri().to_string();
            info_span!("http_request", method = ?request.method(), uri)
        },
    );

    let cors = CorsLayer::new()
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::PATCH,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_origin(Any)
        .allow_headers([
            AUTHORIZATION,
            HeaderName::from_static("x-client-info"),
            HeaderName::from_static("apikey"),
            CONTENT_TYPE,
        ]);

    // CorsLayer only sends the allowed headers on preflight responses.
    let allow_headers = SetResponseHeaderLayer::if_not_present(
        ACCESS_CONTROL_ALLOW_HEADERS,
        HeaderValue::from_static(ALLOWED_HEADERS),
    );

    routes
        .layer(allow_headers)
        .layer(trace_layer)
        .layer(cors)
        .with_state(state)
}
