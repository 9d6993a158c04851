//! Session-related HTTP routes.
//!
//! All handlers convert `DomainError` into `AppError` via `?`, so every
//! failure leaves as an RFC 9457 problem document.

use std::time::Duration;

use actix_web::{web, HttpResponse};
use serde::{Deserialize, Serialize};
use serde_json::json;

use crate::domain::{OrderSet, Power};
use crate::error::AppError;
use crate::errors::domain::{DomainError, ValidationKind};
use crate::services::automation::{AutomationStatus, DEFAULT_TICK_INTERVAL};
use crate::state::app_state::AppState;

#[derive(Debug, Deserialize, Default)]
struct CreateSessionRequest {
    session_id: Option<String>,
    rules: Option<Vec<String>>,
}

#[derive(Debug, Deserialize)]
struct RegisterPlayerRequest {
    player_id: String,
    power: Option<String>,
    display_name: Option<String>,
}

#[derive(Debug, Deserialize)]
struct SubmitOrdersRequest {
    player_id: String,
    orders: Vec<String>,
}

#[derive(Debug, Deserialize)]
struct PowerQuery {
    power: String,
}

#[derive(Debug, Deserialize, Default)]
struct StartAutomationRequest {
    interval_secs: Option<u64>,
}

#[derive(Debug, Serialize)]
struct AcceptedOrdersResponse {
    power: Power,
    orders: Vec<String>,
}

fn parse_power(raw: &str) -> Result<Power, DomainError> {
    Power::parse(raw).ok_or_else(|| {
        DomainError::validation(
            ValidationKind::InvalidPower,
            format!("unknown power '{raw}'"),
        )
    })
}

/// POST /api/sessions
async fn create_session(
    app_state: web::Data<AppState>,
    body: Option<web::Json<CreateSessionRequest>>,
) -> Result<HttpResponse, AppError> {
    let req = body.map(web::Json::into_inner).unwrap_or_default();
    let summary = app_state
        .flow
        .create_session(req.session_id, req.rules)
        .await?;
    Ok(HttpResponse::Created().json(summary))
}

/// GET /api/sessions
async fn list_sessions(app_state: web::Data<AppState>) -> Result<HttpResponse, AppError> {
    let sessions = app_state.flow.list_sessions().await;
    Ok(HttpResponse::Ok().json(sessions))
}

/// GET /api/sessions/{session_id}
async fn get_session(
    path: web::Path<String>,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let summary = app_state.flow.session_summary(&path).await?;
    Ok(HttpResponse::Ok().json(summary))
}

/// DELETE /api/sessions/{session_id}
async fn delete_session(
    path: web::Path<String>,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    // Best effort stop; a session without automation is fine to delete.
    let _ = app_state.automation.stop(&path);
    app_state.flow.delete_session(&path)?;
    Ok(HttpResponse::NoContent().finish())
}

/// POST /api/sessions/{session_id}/players
async fn register_player(
    path: web::Path<String>,
    app_state: web::Data<AppState>,
    body: web::Json<RegisterPlayerRequest>,
) -> Result<HttpResponse, AppError> {
    let req = body.into_inner();
    let power = req.power.as_deref().map(parse_power).transpose()?;
    let seat = app_state
        .flow
        .register_player(&path, &req.player_id, power, req.display_name)
        .await?;
    Ok(HttpResponse::Created().json(seat))
}

/// POST /api/sessions/{session_id}/start
async fn start_session(
    path: web::Path<String>,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let summary = app_state.flow.start_session(&path).await?;
    Ok(HttpResponse::Ok().json(summary))
}

/// POST /api/sessions/{session_id}/orders
async fn submit_orders(
    path: web::Path<String>,
    app_state: web::Data<AppState>,
    body: web::Json<SubmitOrdersRequest>,
) -> Result<HttpResponse, AppError> {
    let req = body.into_inner();
    let (power, orders) = app_state
        .flow
        .submit_orders(&path, &req.player_id, req.orders)
        .await?;
    Ok(HttpResponse::Ok().json(AcceptedOrdersResponse {
        power,
        orders: orders.into_orders(),
    }))
}

/// GET /api/sessions/{session_id}/orders?power=FRANCE
async fn get_pending_orders(
    path: web::Path<String>,
    query: web::Query<PowerQuery>,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let power = parse_power(&query.power)?;
    let staged = app_state.flow.pending_orders(&path, power).await?;
    Ok(HttpResponse::Ok().json(AcceptedOrdersResponse {
        power,
        orders: staged.map(OrderSet::into_orders).unwrap_or_default(),
    }))
}

/// POST /api/sessions/{session_id}/resolve
async fn resolve_phase(
    path: web::Path<String>,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let outcome = app_state.flow.resolve_phase(&path).await?;
    Ok(HttpResponse::Ok().json(outcome))
}

/// GET /api/sessions/{session_id}/state
async fn get_state(
    path: web::Path<String>,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let state = app_state.flow.public_state(&path).await?;
    Ok(HttpResponse::Ok().json(state))
}

/// GET /api/sessions/{session_id}/phase-type
async fn get_phase_type(
    path: web::Path<String>,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let kind = app_state.flow.phase_kind(&path).await?;
    Ok(HttpResponse::Ok().json(json!({ "phase_type": kind })))
}

/// GET /api/sessions/{session_id}/legal-orders?power=FRANCE
async fn get_legal_orders(
    path: web::Path<String>,
    query: web::Query<PowerQuery>,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let power = parse_power(&query.power)?;
    let orders = app_state.flow.legal_orders(&path, power).await?;
    Ok(HttpResponse::Ok().json(orders))
}

/// GET /api/sessions/{session_id}/units?power=FRANCE
async fn get_units(
    path: web::Path<String>,
    query: web::Query<PowerQuery>,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let power = parse_power(&query.power)?;
    let units = app_state.flow.units_of(&path, power).await?;
    Ok(HttpResponse::Ok().json(units))
}

/// POST /api/sessions/{session_id}/automation/start
async fn start_automation(
    path: web::Path<String>,
    app_state: web::Data<AppState>,
    body: Option<web::Json<StartAutomationRequest>>,
) -> Result<HttpResponse, AppError> {
    let req = body.map(web::Json::into_inner).unwrap_or_default();
    let interval = req
        .interval_secs
        .map(Duration::from_secs)
        .unwrap_or(DEFAULT_TICK_INTERVAL);
    let status = app_state.automation.start(&path, interval)?;
    let status = match status {
        AutomationStatus::Started => "started",
        AutomationStatus::AlreadyRunning => "already_running",
    };
    Ok(HttpResponse::Ok().json(json!({ "automation": status })))
}

/// POST /api/sessions/{session_id}/automation/stop
async fn stop_automation(
    path: web::Path<String>,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    app_state.automation.stop(&path)?;
    Ok(HttpResponse::Ok().json(json!({ "automation": "stopped" })))
}

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.route("", web::post().to(create_session))
        .route("", web::get().to(list_sessions))
        .route("/{session_id}", web::get().to(get_session))
        .route("/{session_id}", web::delete().to(delete_session))
        .route("/{session_id}/players", web::post().to(register_player))
        .route("/{session_id}/start", web::post().to(start_session))
        .route("/{session_id}/orders", web::post().to(submit_orders))
        .route("/{session_id}/orders", web::get().to(get_pending_orders))
        .route("/{session_id}/resolve", web::post().to(resolve_phase))
        .route("/{session_id}/state", web::get().to(get_state))
        .route("/{session_id}/phase-type", web::get().to(get_phase_type))
        .route("/{session_id}/legal-orders", web::get().to(get_legal_orders))
        .route("/{session_id}/units", web::get().to(get_units))
        .route(
            "/{session_id}/automation/start",
            web::post().to(start_automation),
        )
        .route(
            "/{session_id}/automation/stop",
            web::post().to(stop_automation),
        );
}
