//! HTTP route handlers.

use axum::{
    Json, Router, async_trait,
    extract::{
        FromRequest, FromRequestParts, Path, Request, State,
        rejection::{JsonRejection, PathRejection},
    },
    http::{StatusCode, request::Parts},
    response::IntoResponse,
    routing::{get, post},
};
use serde::de::DeserializeOwned;
use tower_http::trace::TraceLayer;
use tracing::{debug, error};

use crate::domain::{JourneyId, RequestId, UserId};
use crate::error::ErrorKind;
use crate::matching::MatchError;
use crate::requests::RequestError;

use super::dto::*;
use super::state::AppState;

/// Header carrying the id of the user making the call.
pub const USER_ID_HEADER: &str = "x-user-id";

/// Create the application router.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/journeys/:id/matches", get(find_matches))
        .route("/journeys/:id/requests", post(send_request))
        .route("/requests/:id", get(request_details).delete(cancel_request))
        .route("/requests/:id/response", post(respond_to_request))
        .route("/inbox", get(inbox))
        .route("/outbox", get(outbox))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Health check endpoint.
async fn health() -> &'static str {
    "ok"
}

/// The authenticated user, taken from the `X-User-Id` header.
pub struct ActingUser(pub UserId);

#[async_trait]
impl<S: Send + Sync> FromRequestParts<S> for ActingUser {
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let value = parts
            .headers
            .get(USER_ID_HEADER)
            .ok_or_else(|| AppError::Unauthorized {
                message: "missing X-User-Id header".to_string(),
            })?;

        value
            .to_str()
            .ok()
            .and_then(|s| s.parse::<UserId>().ok())
            .map(ActingUser)
            .ok_or_else(|| AppError::Unauthorized {
                message: "invalid X-User-Id header".to_string(),
            })
    }
}

/// JSON body extractor that rejects with an [`AppError`].
pub struct ApiJson<T>(pub T);

#[async_trait]
impl<T, S> FromRequest<S> for ApiJson<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<T>::from_request(req, state).await?;
        Ok(ApiJson(value))
    }
}

/// Path extractor that rejects with an [`AppError`].
pub struct ApiPath<T>(pub T);

#[async_trait]
impl<T, S> FromRequestParts<S> for ApiPath<T>
where
    T: DeserializeOwned + Send,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Path(value) = Path::<T>::from_request_parts(parts, state).await?;
        Ok(ApiPath(value))
    }
}

/// Matches for one of the caller's journeys.
async fn find_matches(
    State(state): State<AppState>,
    ActingUser(user): ActingUser,
    ApiPath(journey): ApiPath<JourneyId>,
) -> Result<Json<MatchesResponse>, AppError> {
    let matches = state.engine.find_matches(journey, user).await?;

    Ok(Json(MatchesResponse {
        matches: matches.iter().map(MatchResult::from_match).collect(),
    }))
}

/// Ask to join a journey.
async fn send_request(
    State(state): State<AppState>,
    ActingUser(user): ActingUser,
    ApiPath(journey): ApiPath<JourneyId>,
    ApiJson(body): ApiJson<CreateRequestBody>,
) -> Result<impl IntoResponse, AppError> {
    let request_id = state
        .engine
        .send_request(user, journey, &body.message)
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(CreateRequestResponse { request_id }),
    ))
}

/// Approve or deny a request addressed to the caller.
async fn respond_to_request(
    State(state): State<AppState>,
    ActingUser(user): ActingUser,
    ApiPath(request): ApiPath<RequestId>,
    ApiJson(body): ApiJson<RespondBody>,
) -> Result<StatusCode, AppError> {
    state
        .engine
        .respond_to_request(request, user, body.decision)
        .await?;
    Ok(StatusCode::NO_CONTENT)
}

/// Withdraw one of the caller's requests.
async fn cancel_request(
    State(state): State<AppState>,
    ActingUser(user): ActingUser,
    ApiPath(request): ApiPath<RequestId>,
) -> Result<StatusCode, AppError> {
    state.engine.cancel_request(request, user).await?;
    Ok(StatusCode::NO_CONTENT)
}

async fn request_details(
    State(state): State<AppState>,
    ActingUser(user): ActingUser,
    ApiPath(request): ApiPath<RequestId>,
) -> Result<Json<RequestResult>, AppError> {
    let view = state.engine.request_details(request, user).await?;
    Ok(Json(RequestResult::from_view(&view)))
}

/// Requests addressed to the caller.
async fn inbox(
    State(state): State<AppState>,
    ActingUser(user): ActingUser,
) -> Result<Json<RequestListResponse>, AppError> {
    let views = state.engine.incoming_requests(user).await?;
    Ok(Json(RequestListResponse {
        requests: views.iter().map(RequestResult::from_view).collect(),
    }))
}

/// Requests sent by the caller.
async fn outbox(
    State(state): State<AppState>,
    ActingUser(user): ActingUser,
) -> Result<Json<RequestListResponse>, AppError> {
    let views = state.engine.outgoing_requests(user).await?;
    Ok(Json(RequestListResponse {
        requests: views.iter().map(RequestResult::from_view).collect(),
    }))
}

/// Application error type.
#[derive(Debug)]
pub enum AppError {
    Unauthorized { message: String },
    Operation { kind: ErrorKind, message: String },
}

impl From<JsonRejection> for AppError {
    fn from(e: JsonRejection) -> Self {
        AppError::Operation {
            kind: ErrorKind::Validation,
            message: e.body_text(),
        }
    }
}

impl From<PathRejection> for AppError {
    fn from(e: PathRejection) -> Self {
        AppError::Operation {
            kind: ErrorKind::Validation,
            message: e.body_text(),
        }
    }
}

impl From<MatchError> for AppError {
    fn from(e: MatchError) -> Self {
        AppError::Operation {
            kind: e.kind(),
            message: e.to_string(),
        }
    }
}

impl From<RequestError> for AppError {
    fn from(e: RequestError) -> Self {
        AppError::Operation {
            kind: e.kind(),
            message: e.to_string(),
        }
    }
}

/// HTTP status for an error category.
pub fn status_for(kind: ErrorKind) -> StatusCode {
    match kind {
        ErrorKind::NotFound => StatusCode::NOT_FOUND,
        ErrorKind::PreconditionFailed => StatusCode::UNPROCESSABLE_ENTITY,
        ErrorKind::Validation => StatusCode::BAD_REQUEST,
        ErrorKind::Forbidden => StatusCode::FORBIDDEN,
        ErrorKind::InvalidState | ErrorKind::Conflict => StatusCode::CONFLICT,
        ErrorKind::Storage => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> axum::response::Response {
        let (status, kind, message) = match self {
            AppError::Unauthorized { message } => (StatusCode::UNAUTHORIZED, None, message),
            AppError::Operation { kind, message } => (status_for(kind), Some(kind), message),
        };

        if status.is_server_error() {
            error!(%status, "{message}");
        } else {
            debug!(%status, "{message}");
        }

        let body = Json(ErrorResponse {
            error: message,
            kind,
        });
        (status, body).into_response()
    }
}
