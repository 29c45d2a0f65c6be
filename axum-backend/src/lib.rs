//! HTTP front for floor-plan documents.
//!
//! The service owns persistence: it loads a plan by key, hands it to the room
//! topology core, and saves the mutated plan once the core returns.

pub mod config;
pub mod error;
pub mod store;

use axum::{
    extract::{DefaultBodyLimit, Json, Path, State},
    http::{header, Method},
    response::IntoResponse,
    routing::{get, post},
    Router,
};
use room_topology::{
    create_floor_model, CenterMarkers, FloorGroup, FloorPlan, PlanSession, ReconcileReport,
    SceneModel, TopologyConfig, TopologyError,
};
use serde::Serialize;
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::info;

pub use config::Config;
pub use error::ApiError;
pub use store::PlanStore;

#[derive(Debug, Clone)]
pub struct AppState {
    pub store: PlanStore,
    pub topology: Arc<TopologyConfig>,
}

impl AppState {
    pub fn new(store: PlanStore, topology: TopologyConfig) -> Self {
        Self {
            store,
            topology: Arc::new(topology),
        }
    }
}

#[derive(Debug, Serialize)]
struct HealthResponse {
    status: String,
    version: String,
}

#[derive(Debug, Serialize)]
struct SavePlanResponse {
    key: String,
    points: usize,
    walls: usize,
    rooms: usize,
}

#[derive(Debug, Serialize)]
struct RoomsResponse {
    floor: FloorGroup,
    centers: CenterMarkers,
    report: ReconcileReport,
    total_rooms: usize,
}

async fn health_check() -> impl IntoResponse {
    Json(HealthResponse {
        status: "healthy".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

async fn get_plan_handler(
    State(state): State<AppState>,
    Path(key): Path<String>,
) -> Result<Json<FloorPlan>, ApiError> {
    let _guard = state.store.lock(&key).await;
    Ok(Json(state.store.load(&key).await?))
}

async fn put_plan_handler(
    State(state): State<AppState>,
    Path(key): Path<String>,
    Json(plan): Json<FloorPlan>,
) -> Result<Json<SavePlanResponse>, ApiError> {
    info!(
        "Received plan {} with {} points and {} walls",
        key,
        plan.points.len(),
        plan.walls.len()
    );
    plan.validate()?;

    let _guard = state.store.lock(&key).await;
    state.store.save(&key, &plan).await?;

    Ok(Json(SavePlanResponse {
        key,
        points: plan.points.len(),
        walls: plan.walls.len(),
        rooms: plan.rooms.len(),
    }))
}

async fn recompute_rooms_handler(
    State(state): State<AppState>,
    Path(key): Path<String>,
) -> Result<Json<RoomsResponse>, ApiError> {
    let _guard = state.store.lock(&key).await;
    let mut plan = state.store.load(&key).await?;

    // Cycle enumeration is CPU-bound; keep it off the async workers.
    let config = state.topology.clone();
    let (plan, topology) = tokio::task::spawn_blocking(move || {
        create_floor_model(&mut plan, &config).map(|topology| (plan, topology))
    })
    .await??;
    state.store.save(&key, &plan).await?;

    info!("Plan {} has {} rooms", key, topology.floor.surfaces.len());

    Ok(Json(RoomsResponse {
        total_rooms: topology.floor.surfaces.len(),
        floor: topology.floor,
        centers: topology.centers,
        report: topology.report,
    }))
}

async fn rebuild_model_handler(
    State(state): State<AppState>,
    Path(key): Path<String>,
) -> Result<Json<SceneModel>, ApiError> {
    let _guard = state.store.lock(&key).await;
    let plan = state.store.load(&key).await?;

    let config = state.topology.as_ref().clone();
    let (plan, scene) = tokio::task::spawn_blocking(move || {
        let mut session = PlanSession::new(plan, config);
        let scene = session.rebuild()?.clone();
        Ok::<_, TopologyError>((session.into_plan(), scene))
    })
    .await??;
    state.store.save(&key, &plan).await?;

    Ok(Json(scene))
}

pub fn create_app(state: AppState, config: &Config) -> Router {
    let origins: Vec<_> = config
        .allowed_origins
        .iter()
        .filter_map(|s| s.parse().ok())
        .collect();

    let cors = if origins.is_empty() {
        CorsLayer::new()
            .allow_origin(Any)
            .allow_methods([Method::GET, Method::POST, Method::PUT])
            .allow_headers([header::CONTENT_TYPE])
    } else {
        CorsLayer::new()
            .allow_origin(origins)
            .allow_methods([Method::GET, Method::POST, Method::PUT])
            .allow_headers([header::CONTENT_TYPE])
    };

    Router::new()
        .route("/health", get(health_check))
        .route("/plans/:key", get(get_plan_handler).put(put_plan_handler))
        .route("/plans/:key/rooms", post(recompute_rooms_handler))
        .route("/plans/:key/model", post(rebuild_model_handler))
        .layer(DefaultBodyLimit::max(config.max_body_bytes))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
