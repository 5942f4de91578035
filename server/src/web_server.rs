use std::future::Future;
use std::path::PathBuf;

use axum::{
    Json, Router,
    body::Bytes,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
};
use tower_http::{
    cors::{Any, CorsLayer},
    services::ServeDir,
};

use common::games::snake::SnakeSettings;
use common::leaderboard::{ErrorPayload, GatewayError, ScoreGateway, ScoreSubmission};
use common::log;

#[derive(Clone)]
pub struct WebServerState<G: ScoreGateway> {
    pub gateway: G,
    pub snake_settings: SnakeSettings,
}

pub fn build_router<G: ScoreGateway>(
    state: WebServerState<G>,
    static_files_path: Option<PathBuf>,
) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let mut app = Router::new()
        .route("/health", get(health))
        .route("/api/snake-settings", get(snake_settings::<G>))
        .route(
            "/api/snake-scores",
            get(list_scores::<G>).post(submit_score::<G>),
        );

    if let Some(path) = static_files_path {
        app = app.nest_service("/ui", ServeDir::new(path));
    }

    app.layer(cors).with_state(state)
}

pub async fn run_web_server<G: ScoreGateway>(
    state: WebServerState<G>,
    bind_address: &str,
    static_files_path: Option<PathBuf>,
    shutdown_signal: impl Future<Output = ()> + Send + 'static,
) -> std::io::Result<()> {
    let app = build_router(state, static_files_path);

    let listener = tokio::net::TcpListener::bind(bind_address).await?;
    log!("Web server listening on {}", bind_address);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal)
        .await
}

async fn health() -> &'static str {
    "ok"
}

async fn snake_settings<G: ScoreGateway>(State(state): State<WebServerState<G>>) -> Response {
    Json(state.snake_settings).into_response()
}

async fn list_scores<G: ScoreGateway>(State(state): State<WebServerState<G>>) -> Response {
    match state.gateway.top_scores().await {
        Ok(entries) => Json(entries).into_response(),
        Err(e) => gateway_error_response(&e),
    }
}

async fn submit_score<G: ScoreGateway>(
    State(state): State<WebServerState<G>>,
    body: Bytes,
) -> Response {
    let submission: ScoreSubmission = match serde_json::from_slice(&body) {
        Ok(submission) => submission,
        Err(e) => {
            log!("Rejected malformed score submission: {}", e);
            let payload = ErrorPayload {
                error: "Invalid data: identity and an integer score are required".to_string(),
            };
            return (StatusCode::BAD_REQUEST, Json(payload)).into_response();
        }
    };

    match state.gateway.submit(submission).await {
        Ok(entry) => (StatusCode::CREATED, Json(entry)).into_response(),
        Err(e) => gateway_error_response(&e),
    }
}

fn gateway_error_response(error: &GatewayError) -> Response {
    let status =
        StatusCode::from_u16(error.status_code()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
    (status, Json(error.payload())).into_response()
}
