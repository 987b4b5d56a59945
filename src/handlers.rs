use crate::calendar::{self, CalendarCell};
use crate::errors::AppError;
use crate::install::InstallError;
use crate::ledger::{self, Added, DayLedger};
use crate::models::{
    DepositForm, DepositRequest, DisplayModeRequest, InstallChoiceRequest, InstallStatusResponse,
    NotifierResponse, PageNotifier, ReminderCheckRequest, ReminderUpdateRequest, ThemeRequest,
    TriggerResponse,
};
use crate::pipeline::{Snapshot, render_snapshot};
use crate::reminder;
use crate::state::AppState;
use crate::stats::{Stats, build_stats};
use crate::storage::{Store, persist_store};
use crate::theme::{ThemeVars, apply_theme};
use crate::ui::{MANIFEST_JSON, SERVICE_WORKER_JS, render_index};
use axum::{
    Form, Json,
    extract::State,
    http::header,
    response::{Html, IntoResponse, Redirect},
};
use chrono::Local;
use tracing::info;

pub async fn index(State(state): State<AppState>) -> Html<String> {
    let store = state.store.lock().await;
    let install_visible = state.install.lock().await.handler.trigger_visible();
    Html(render_index(&render_snapshot(&store), install_visible))
}

pub async fn manifest() -> impl IntoResponse {
    ([(header::CONTENT_TYPE, "application/manifest+json")], MANIFEST_JSON)
}

pub async fn service_worker() -> impl IntoResponse {
    ([(header::CONTENT_TYPE, "text/javascript")], SERVICE_WORKER_JS)
}

pub async fn get_snapshot(State(state): State<AppState>) -> Json<Snapshot> {
    let store = state.store.lock().await;
    Json(render_snapshot(&store))
}

pub async fn get_stats(State(state): State<AppState>) -> Json<Stats> {
    let store = state.store.lock().await;
    Json(build_stats(&DayLedger::load(&store)))
}

pub async fn get_calendar(State(state): State<AppState>) -> Json<Vec<CalendarCell>> {
    let store = state.store.lock().await;
    let ledger = DayLedger::load(&store);
    Json(calendar::cells(&ledger).collect())
}

pub async fn deposit(
    State(state): State<AppState>,
    Json(payload): Json<DepositRequest>,
) -> Result<Json<Snapshot>, AppError> {
    let day = ledger::day_from_number(payload.day)?;
    let snapshot = apply_deposit(&state, day).await?;
    Ok(Json(snapshot))
}

pub async fn deposit_form(
    State(state): State<AppState>,
    Form(form): Form<DepositForm>,
) -> Result<Redirect, AppError> {
    let day = ledger::day_from_number(form.day.trim().parse().unwrap_or(f64::NAN))?;
    apply_deposit(&state, day).await?;
    Ok(Redirect::to("/"))
}

async fn apply_deposit(state: &AppState, day: i64) -> Result<Snapshot, AppError> {
    let mut store = state.store.lock().await;
    let mut next = store.clone();
    let mut ledger = DayLedger::load(&next);
    let Added(day) = ledger.add_if_absent(day)?;
    ledger.save(&mut next).map_err(AppError::internal)?;

    commit(state, &mut store, next).await?;
    info!(day, completed = ledger.len(), "deposit recorded");

    Ok(render_snapshot(&store))
}

/// Writes `next` to disk and only then makes it the live store.
async fn commit(state: &AppState, store: &mut Store, next: Store) -> Result<(), AppError> {
    persist_store(&state.data_path, &next).await?;
    *store = next;
    Ok(())
}

pub async fn set_theme(
    State(state): State<AppState>,
    Json(payload): Json<ThemeRequest>,
) -> Result<Json<ThemeVars>, AppError> {
    let mut store = state.store.lock().await;
    let mut next = store.clone();
    let vars = apply_theme(&mut next, payload.color.trim())?;
    commit(&state, &mut store, next).await?;
    Ok(Json(vars))
}

pub async fn update_reminder(
    State(state): State<AppState>,
    Json(payload): Json<ReminderUpdateRequest>,
) -> Result<Json<NotifierResponse>, AppError> {
    let mut notifier = PageNotifier::new(payload.notifications);
    let mut store = state.store.lock().await;
    let mut next = store.clone();

    if let Some(time) = payload.time.as_deref() {
        reminder::set_time(&mut next, time.trim())?;
    }
    if let Some(enabled) = payload.enabled {
        reminder::set_enabled(&mut next, enabled, &mut notifier);
    }

    commit(&state, &mut store, next).await?;
    Ok(Json(notifier.finish()))
}

pub async fn check_reminder(
    State(state): State<AppState>,
    Json(payload): Json<ReminderCheckRequest>,
) -> Result<Json<NotifierResponse>, AppError> {
    let mut notifier = PageNotifier::new(payload.notifications);
    let mut store = state.store.lock().await;
    let mut next = store.clone();

    if reminder::check_and_fire(&mut next, &mut notifier, Local::now().naive_local()) {
        commit(&state, &mut store, next).await?;
    }
    Ok(Json(notifier.finish()))
}

pub async fn install_status(State(state): State<AppState>) -> Json<InstallStatusResponse> {
    let install = state.install.lock().await;
    Json(InstallStatusResponse {
        trigger_visible: install.handler.trigger_visible(),
    })
}

pub async fn set_display_mode(
    State(state): State<AppState>,
    Json(payload): Json<DisplayModeRequest>,
) -> Json<InstallStatusResponse> {
    let mut install = state.install.lock().await;
    install.handler.set_standalone(payload.standalone);
    Json(InstallStatusResponse {
        trigger_visible: install.handler.trigger_visible(),
    })
}

pub async fn install_available(State(state): State<AppState>) -> Json<InstallStatusResponse> {
    let mut install = state.install.lock().await;
    install.on_installable();
    Json(InstallStatusResponse {
        trigger_visible: install.handler.trigger_visible(),
    })
}

pub async fn install_trigger(State(state): State<AppState>) -> Json<TriggerResponse> {
    let mut install = state.install.lock().await;
    match install.trigger() {
        Ok(pending) => {
            tokio::spawn(pending.run());
            Json(TriggerResponse::Prompt)
        }
        Err(err @ InstallError::Unavailable) => Json(TriggerResponse::Unavailable {
            message: err.to_string(),
        }),
    }
}

pub async fn install_choice(
    State(state): State<AppState>,
    Json(payload): Json<InstallChoiceRequest>,
) -> Result<Json<InstallStatusResponse>, AppError> {
    let mut install = state.install.lock().await;
    if !install.resolve_choice(payload.outcome) {
        return Err(AppError::conflict("no install prompt is waiting for a choice"));
    }
    Ok(Json(InstallStatusResponse {
        trigger_visible: install.handler.trigger_visible(),
    }))
}
