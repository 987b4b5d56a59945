use crate::handlers;
use crate::state::AppState;
use axum::{routing::{get, post}, Router};

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(handlers::index))
        .route("/manifest.webmanifest", get(handlers::manifest))
        .route("/sw.js", get(handlers::service_worker))
        .route("/deposit", post(handlers::deposit_form))
        .route("/api/snapshot", get(handlers::get_snapshot))
        .route("/api/stats", get(handlers::get_stats))
        .route("/api/calendar", get(handlers::get_calendar))
        .route("/api/deposit", post(handlers::deposit))
        .route("/api/theme", post(handlers::set_theme))
        .route("/api/reminder", post(handlers::update_reminder))
        .route("/api/reminder/check", post(handlers::check_reminder))
        .route("/api/install", get(handlers::install_status))
        .route("/api/install/display-mode", post(handlers::set_display_mode))
        .route("/api/install/available", post(handlers::install_available))
        .route("/api/install/trigger", post(handlers::install_trigger))
        .route("/api/install/choice", post(handlers::install_choice))
        .with_state(state)
}
