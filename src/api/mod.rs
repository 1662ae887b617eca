use std::sync::Arc;

use axum::{
    Json, Router,
    extract::{Query, State},
    http::StatusCode,
    response::{Html, IntoResponse, Response},
    routing::get,
};
use chrono::Local;
use rand::rngs::StdRng;
use rand::{RngExt, SeedableRng};
use serde::Serialize;
use tracing::{error, info};

use crate::dashboard::{Dashboard, DashboardForm, DashboardState, Simulation};

pub mod page;

use page::PageBody;

/// Shared state for every request
#[derive(Clone)]
pub struct AppState {
    pub dashboard: Arc<Dashboard>,
}

impl AppState {
    pub fn new(dashboard: Dashboard) -> Self {
        Self {
            dashboard: Arc::new(dashboard),
        }
    }
}

#[derive(Serialize)]
pub struct ApiHealth {
    pub status: &'static str,
    pub version: &'static str,
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(get_dashboard))
        .route("/dashboard", get(get_dashboard))
        .route("/api/health", get(get_health))
        .with_state(state)
}

async fn get_health() -> Json<ApiHealth> {
    Json(ApiHealth {
        status: "ok",
        version: crate::VERSION,
    })
}

async fn get_dashboard(
    State(state): State<AppState>,
    Query(form): Query<DashboardForm>,
) -> Response {
    let submission = match form.state() {
        DashboardState::AwaitingInput => {
            return Html(page::render(&form, PageBody::Empty)).into_response();
        }
        DashboardState::Rendering(submission) => submission,
    };

    let seed: u64 = rand::rng().random();
    info!("Rendering dashboard with seed {}", seed);
    let simulation = Simulation::generate(
        &mut StdRng::seed_from_u64(seed),
        Local::now().date_naive(),
    );

    match state.dashboard.render(submission, simulation).await {
        Ok(result) => Html(page::render(&form, PageBody::Results(&result))).into_response(),
        Err(err) => {
            error!("Dashboard render failed: {}", err);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Html(page::render(&form, PageBody::Error(&err))),
            )
                .into_response()
        }
    }
}
