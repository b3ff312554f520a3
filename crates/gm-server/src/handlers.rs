use std::collections::BTreeMap;
use std::sync::Arc;

use axum::body::Body;
use axum::extract::{Request, State};
use axum::http::{header, HeaderMap, HeaderValue, Response};
use axum::middleware::Next;
use axum::response::{Html, IntoResponse};
use axum::Json;
use cookie::{Cookie, SameSite};
use metrics_api::{containers_or_empty, sites_or_empty, Container, Site};
use serde::{Deserialize, Serialize};
use settings::{EmbedMode, FlagName, Notice, SaveReport, Settings, SettingsSubmission};
use tracing::{info, warn};

use crate::error::AppError;
use crate::state::AppState;

const ADMIN_COOKIE: &str = "gm_admin";
const NONCE_HEADER: &str = "x-gm-nonce";
const AJAX_SAVE_PATH: &str = "/api/ajax/save";

#[derive(Deserialize)]
pub struct LoginRequest {
    pub token: String,
}

#[derive(Serialize)]
pub struct SimpleResponse {
    pub ok: bool,
}

#[derive(Serialize)]
pub struct AjaxBootstrap {
    pub ajax_url: String,
    pub nonce: String,
}

#[derive(Serialize)]
pub struct SettingsView {
    pub ghost_metrics_url: String,
    pub token_set: bool,
    pub embed_mode: EmbedMode,
    pub selected_site_id: String,
    pub selected_container_id: String,
    pub sites: Vec<Site>,
    pub containers: Vec<Container>,
    pub advanced: BTreeMap<FlagName, bool>,
    pub notices: Vec<Notice>,
    pub ajax: AjaxBootstrap,
}

#[derive(Deserialize)]
pub struct AjaxSaveRequest {
    #[serde(default)]
    pub ghost_metrics_url: String,
    #[serde(default)]
    pub auth_token: String,
    #[serde(default)]
    pub embed_mode: Option<String>,
    #[serde(default)]
    pub selected_site_id: String,
}

#[derive(Serialize)]
pub struct AjaxSaveData {
    pub success: bool,
    pub message: String,
}

#[derive(Serialize)]
pub struct AjaxSaveResponse {
    pub success: bool,
    pub data: AjaxSaveData,
}

pub async fn admin_auth(
    State(state): State<Arc<AppState>>,
    req: Request,
    next: Next,
) -> Result<Response<Body>, AppError> {
    let token = extract_bearer_token(req.headers()).or_else(|| extract_cookie_token(req.headers()));
    let expected = state.admin_token.as_str();

    if expected.trim().is_empty() || token.as_deref() != Some(expected) {
        return Err(AppError::unauthorized("invalid admin token"));
    }

    Ok(next.run(req).await)
}

pub async fn login(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<LoginRequest>,
) -> Result<Response<Body>, AppError> {
    if state.admin_token.trim().is_empty() {
        return Err(AppError::unauthorized("admin token not configured"));
    }
    if payload.token != state.admin_token {
        return Err(AppError::unauthorized("invalid admin token"));
    }

    let cookie = Cookie::build((ADMIN_COOKIE, payload.token))
        .path("/")
        .http_only(true)
        .same_site(SameSite::Strict)
        .build();
    let cookie = HeaderValue::from_str(&cookie.to_string())
        .map_err(|err| AppError::internal(err.to_string()))?;

    let mut response = Json(SimpleResponse { ok: true }).into_response();
    response.headers_mut().insert(header::SET_COOKIE, cookie);
    Ok(response)
}

pub async fn head_fragment(State(state): State<Arc<AppState>>) -> Result<Html<String>, AppError> {
    Ok(Html(compose_head(state).await?))
}

pub async fn front_page(State(state): State<Arc<AppState>>) -> Result<Html<String>, AppError> {
    let title = escape_html(&state.config.get_string("site.title"));
    let head = compose_head(state).await?;
    Ok(Html(format!(
        "<!DOCTYPE html>\n<html>\n<head>\n<meta charset=\"utf-8\">\n<title>{title}</title>\n{head}</head>\n<body>\n<h1>{title}</h1>\n</body>\n</html>\n"
    )))
}

pub async fn get_settings(
    State(state): State<Arc<AppState>>,
) -> Result<Json<SettingsView>, AppError> {
    Ok(Json(build_view(&state).await?))
}

pub async fn save_settings(
    State(state): State<Arc<AppState>>,
    Json(submission): Json<SettingsSubmission>,
) -> Result<Json<SettingsView>, AppError> {
    state.form.apply(submission).await?;
    Ok(Json(build_view(&state).await?))
}

pub async fn ajax_save(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    Json(payload): Json<AjaxSaveRequest>,
) -> Result<Json<AjaxSaveResponse>, AppError> {
    let nonce = headers
        .get(NONCE_HEADER)
        .and_then(|value| value.to_str().ok())
        .unwrap_or_default();
    if !state.nonces.verify(nonce) {
        warn!("ajax save with missing or stale nonce");
        return Err(AppError::forbidden("invalid nonce"));
    }

    let submission = SettingsSubmission {
        ghost_metrics_url: Some(payload.ghost_metrics_url),
        auth_token: Some(payload.auth_token),
        embed_mode: Some(payload.embed_mode.unwrap_or_else(|| "regular".to_string())),
        selected_site_id: Some(payload.selected_site_id),
        ..SettingsSubmission::default()
    };
    let report = state.form.apply(submission).await?;
    info!(clean = report.is_clean(), "ajax settings save");

    Ok(Json(AjaxSaveResponse {
        success: true,
        data: AjaxSaveData {
            success: report.is_clean(),
            message: save_message(&report),
        },
    }))
}

fn save_message(report: &SaveReport) -> String {
    if report.is_clean() {
        return "Settings saved successfully.".to_string();
    }
    report
        .rejected
        .iter()
        .map(|rejected| rejected.message.as_str())
        .collect::<Vec<_>>()
        .join(" ")
}

async fn build_view(state: &Arc<AppState>) -> Result<SettingsView, AppError> {
    let settings = load_settings(state.clone()).await?;
    let sites = sites_or_empty(
        state.api.as_ref(),
        &settings.ghost_metrics_url,
        &settings.auth_token,
    )
    .await;
    let containers = containers_or_empty(
        state.api.as_ref(),
        &settings.ghost_metrics_url,
        &settings.auth_token,
        &settings.selected_site_id,
    )
    .await;

    Ok(SettingsView {
        token_set: settings.token_set(),
        advanced: settings.advanced.resolved(),
        ghost_metrics_url: settings.ghost_metrics_url,
        embed_mode: settings.embed_mode,
        selected_site_id: settings.selected_site_id,
        selected_container_id: settings.selected_container_id,
        sites,
        containers,
        notices: state.notices.drain(),
        ajax: AjaxBootstrap {
            ajax_url: AJAX_SAVE_PATH.to_string(),
            nonce: state.nonces.issue(),
        },
    })
}

async fn load_settings(state: Arc<AppState>) -> Result<Settings, AppError> {
    let store = state.store.clone();
    tokio::task::spawn_blocking(move || Settings::load(store.as_ref()).map_err(AppError::from))
        .await
        .map_err(|err| AppError::internal(err.to_string()))?
}

async fn compose_head(state: Arc<AppState>) -> Result<String, AppError> {
    let store = state.store.clone();
    tokio::task::spawn_blocking(move || tracking::compose_from_store(store.as_ref()))
        .await
        .map_err(|err| AppError::internal(err.to_string()))
}

fn extract_bearer_token(headers: &HeaderMap) -> Option<String> {
    let value = headers.get(header::AUTHORIZATION)?.to_str().ok()?;
    let token = value.strip_prefix("Bearer ")?.trim();
    if token.is_empty() {
        None
    } else {
        Some(token.to_string())
    }
}

fn extract_cookie_token(headers: &HeaderMap) -> Option<String> {
    let raw = headers.get(header::COOKIE)?.to_str().ok()?;
    Cookie::split_parse(raw)
        .filter_map(Result::ok)
        .find(|cookie| cookie.name() == ADMIN_COOKIE)
        .map(|cookie| cookie.value().to_string())
}

fn escape_html(input: &str) -> String {
    input
        .replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}
