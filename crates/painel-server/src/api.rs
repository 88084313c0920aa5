use std::sync::Arc;

use axum::{
    extract::{
        rejection::{FormRejection, PathRejection},
        Path, State,
    },
    http::header,
    middleware,
    response::{Html, IntoResponse, Response},
    routing::{get, put},
    Form, Json, Router,
};
use serde::{Deserialize, Serialize};
use tower_http::trace::TraceLayer;
use tracing::info;

use painel_shared::{ProjectId, TaskId};
use painel_store::{parse_checkbox, IdentityStore};

use crate::config::ServerConfig;
use crate::error::ServerError;
use crate::rate_limit::{rate_limit_middleware, RateLimiter};
use crate::render;
use crate::session::{self, Session};
use crate::static_files::{read_page, StaticAssets};

#[derive(Clone)]
pub struct AppState {
    pub store: IdentityStore,
    pub assets: StaticAssets,
    pub rate_limiter: RateLimiter,
    pub config: Arc<ServerConfig>,
}

pub fn build_router(state: AppState) -> Router {
    // Only the landing page may mint identities.
    let landing = Router::new()
        .route("/", get(landing_page))
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            session::resume_or_issue,
        ));

    let views = Router::new()
        .route("/view/projects", get(list_projects))
        .route("/view/project/{project_id}/panel", get(project_panel))
        .route(
            "/view/project/{project_id}/panel/task/{task_id}",
            put(update_task),
        )
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            session::require_identity,
        ));

    Router::new()
        .merge(landing)
        .merge(views)
        .route("/static/{*path}", get(static_asset))
        .route("/health", get(health_check))
        .layer(middleware::from_fn_with_state(
            state.rate_limiter.clone(),
            rate_limit_middleware,
        ))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

#[derive(Serialize)]
struct HealthResponse {
    status: &'static str,
    version: &'static str,
}

#[derive(Deserialize)]
struct PanelPath {
    project_id: String,
}

#[derive(Deserialize)]
struct TaskPath {
    project_id: String,
    task_id: String,
}

#[derive(Deserialize)]
struct TaskForm {
    finished: Option<String>,
}

async fn health_check() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        version: env!("CARGO_PKG_VERSION"),
    })
}

async fn landing_page(State(state): State<AppState>) -> Result<Html<String>, ServerError> {
    let page = read_page(&state.config.page_path).await?;
    Ok(Html(page))
}

async fn list_projects(
    State(state): State<AppState>,
    session: Session,
) -> Result<Html<String>, ServerError> {
    let projects = state.store.projects(&session.identity).await?;
    Ok(Html(render::project_list(&projects)))
}

async fn project_panel(
    State(state): State<AppState>,
    session: Session,
    path: Result<Path<PanelPath>, PathRejection>,
) -> Result<Html<String>, ServerError> {
    let Path(path) = path.map_err(|_| ServerError::NotFound)?;
    ProjectId::parse(&path.project_id).map_err(|_| ServerError::NotFound)?;

    let project = state
        .store
        .resolve_project(&session.identity, &path.project_id)
        .await?;
    Ok(Html(render::task_panel(&project)))
}

async fn update_task(
    State(state): State<AppState>,
    session: Session,
    path: Result<Path<TaskPath>, PathRejection>,
    form: Result<Form<TaskForm>, FormRejection>,
) -> Result<Html<String>, ServerError> {
    let Path(path) = path.map_err(|_| ServerError::NotFound)?;
    ProjectId::parse(&path.project_id).map_err(|_| ServerError::NotFound)?;
    TaskId::parse(&path.task_id).map_err(|_| ServerError::NotFound)?;

    let Form(form) = form.map_err(|e| ServerError::BadRequest(e.body_text()))?;
    let finished = parse_checkbox(form.finished.as_deref())?;

    let project = state
        .store
        .set_finished(&session.identity, &path.project_id, &path.task_id, finished)
        .await?;
    Ok(Html(render::task_panel(&project)))
}

async fn static_asset(
    State(state): State<AppState>,
    Path(path): Path<String>,
) -> Result<Response, ServerError> {
    let (content_type, data) = state.assets.read(&path).await?;
    Ok(([(header::CONTENT_TYPE, content_type)], data).into_response())
}

pub async fn serve(state: AppState, addr: std::net::SocketAddr) -> anyhow::Result<()> {
    let app = build_router(state);

    info!(addr = %addr, "Starting HTTP server");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<std::net::SocketAddr>(),
    )
    .await?;

    Ok(())
}
