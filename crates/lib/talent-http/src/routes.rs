use std::future::Future;
use std::time::Duration;

use axum::extract::{Form, Json, Path, Query, State};
use axum::http::{StatusCode, header};
use axum::response::{IntoResponse, Response};
use serde::{Deserialize, Serialize};
use surrealdb::Connection;
use talent_core::auth::AccessToken;
use talent_core::control::ControlError;
use talent_core::control::report::REPORT_FILE_NAME;
use talent_store::models::{Candidate, CandidateRequest, RegisterRequest, UserProfile};

use crate::error::ApiError;
use crate::guard::CurrentUser;
use crate::state::AppState;

#[derive(Debug, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct MessageResponse {
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub uuid: Option<String>,
}

impl MessageResponse {
    fn new(message: &str) -> Self {
        Self {
            message: message.to_string(),
            uuid: None,
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct LoginForm {
    username: String,
    password: String,
}

#[derive(Debug, Deserialize)]
pub struct SearchParams {
    search: Option<String>,
}

pub async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
    })
}

pub async fn register<C>(
    State(state): State<AppState<C>>,
    Json(request): Json<RegisterRequest>,
) -> Result<Json<MessageResponse>, ApiError>
where
    C: Connection + Send + Sync + 'static,
{
    with_timeout(state.request_timeout, state.control.register_user(request)).await?;
    Ok(Json(MessageResponse::new("User registered successfully")))
}

pub async fn login<C>(
    State(state): State<AppState<C>>,
    Form(form): Form<LoginForm>,
) -> Result<Json<AccessToken>, ApiError>
where
    C: Connection + Send + Sync + 'static,
{
    let token = with_timeout(
        state.request_timeout,
        state
            .control
            .authenticate(&form.username, &form.password, &state.tokens),
    )
    .await?;
    Ok(Json(token))
}

pub async fn generate_report<C>(State(state): State<AppState<C>>) -> Result<Response, ApiError>
where
    C: Connection + Send + Sync + 'static,
{
    let csv = with_timeout(state.request_timeout, state.control.candidates_report()).await?;
    let disposition = format!("attachment; filename={REPORT_FILE_NAME}");
    Ok((
        [
            (header::CONTENT_TYPE, "text/csv".to_string()),
            (header::CONTENT_DISPOSITION, disposition),
        ],
        csv,
    )
        .into_response())
}

pub async fn list_candidates<C>(
    State(state): State<AppState<C>>,
    _user: CurrentUser,
    Query(params): Query<SearchParams>,
) -> Result<Json<Vec<Candidate>>, ApiError>
where
    C: Connection + Send + Sync + 'static,
{
    let candidates = with_timeout(
        state.request_timeout,
        state.control.search_candidates(params.search.as_deref()),
    )
    .await?;
    Ok(Json(candidates))
}

pub async fn get_candidate<C>(
    State(state): State<AppState<C>>,
    _user: CurrentUser,
    Path(id): Path<String>,
) -> Result<Json<Candidate>, ApiError>
where
    C: Connection + Send + Sync + 'static,
{
    with_timeout(state.request_timeout, state.control.get_candidate(&id))
        .await?
        .map(Json)
        .ok_or_else(|| candidate_not_found(&id))
}

pub async fn create_candidate<C>(
    State(state): State<AppState<C>>,
    _user: CurrentUser,
    Json(request): Json<CandidateRequest>,
) -> Result<(StatusCode, Json<MessageResponse>), ApiError>
where
    C: Connection + Send + Sync + 'static,
{
    let created =
        with_timeout(state.request_timeout, state.control.create_candidate(request)).await?;
    Ok((
        StatusCode::CREATED,
        Json(MessageResponse {
            message: "Candidate Created successfully".to_string(),
            uuid: Some(created.uuid),
        }),
    ))
}

pub async fn update_candidate<C>(
    State(state): State<AppState<C>>,
    _user: CurrentUser,
    Path(id): Path<String>,
    Json(request): Json<CandidateRequest>,
) -> Result<Json<MessageResponse>, ApiError>
where
    C: Connection + Send + Sync + 'static,
{
    with_timeout(
        state.request_timeout,
        state.control.update_candidate(&id, request),
    )
    .await?
    .ok_or_else(|| candidate_not_found(&id))?;
    Ok(Json(MessageResponse::new("Candidate updated successfully")))
}

pub async fn delete_candidate<C>(
    State(state): State<AppState<C>>,
    _user: CurrentUser,
    Path(id): Path<String>,
) -> Result<Json<MessageResponse>, ApiError>
where
    C: Connection + Send + Sync + 'static,
{
    with_timeout(state.request_timeout, state.control.delete_candidate(&id))
        .await?
        .ok_or_else(|| candidate_not_found(&id))?;
    Ok(Json(MessageResponse::new("Candidate deleted successfully")))
}

pub async fn populate_user<C>(
    State(state): State<AppState<C>>,
    Json(profile): Json<UserProfile>,
) -> Result<Json<MessageResponse>, ApiError>
where
    C: Connection + Send + Sync + 'static,
{
    with_timeout(state.request_timeout, state.control.populate_user(profile)).await?;
    Ok(Json(MessageResponse::new("User populated successfully")))
}

async fn with_timeout<T>(
    timeout: Duration,
    operation: impl Future<Output = Result<T, ControlError>>,
) -> Result<T, ApiError> {
    tokio::time::timeout(timeout, operation)
        .await
        .map_err(|_| ApiError::timeout())?
        .map_err(ApiError::from)
}

fn candidate_not_found(id: &str) -> ApiError {
    ApiError::not_found(format!("candidate not found: {id}"))
}
