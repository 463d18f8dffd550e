//! HTTP API endpoint handlers.

use std::sync::Arc;

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};

use crate::{
    infrastructure::dto::http::{ErrorResponseDto, RegisterResponseDto},
    ui::state::AppState,
    usecase::RegisterError,
};

const ACCOUNT_CREATED: &str = "Аккаунт создан успешно";
const ALREADY_REGISTERED: &str = "Пользователь уже зарегистрирован";

const USAGE: &str = "\
Besedka messaging server

POST /accounts/{name}
    Register a new account (name: 2-30 characters).
    201 -> {\"credential\": \"...\", \"message\": \"...\"}
    400 -> the name is already taken

GET  /connect/{name}/{credential}
    Open the chat WebSocket.
    Send {\"to\": null | \"name\", \"message\": \"text\"}; receive plain text lines.
";

type ApiError = (StatusCode, Json<ErrorResponseDto>);

/// Register an account and hand out its credential
pub async fn register_account(
    State(state): State<Arc<AppState>>,
    Path(name): Path<String>,
) -> Result<(StatusCode, Json<RegisterResponseDto>), ApiError> {
    match state.register_account_usecase.execute(name).await {
        Ok(user) => Ok((
            StatusCode::CREATED,
            Json(RegisterResponseDto {
                message: ACCOUNT_CREATED.to_string(),
                credential: user.credential.into_string(),
            }),
        )),
        Err(RegisterError::DuplicateName(name)) => {
            tracing::info!("Registration rejected, '{}' is taken", name);
            Err((
                StatusCode::BAD_REQUEST,
                Json(ErrorResponseDto::new(ALREADY_REGISTERED)),
            ))
        }
        Err(RegisterError::InvalidName(e)) => Err((
            StatusCode::UNPROCESSABLE_ENTITY,
            Json(ErrorResponseDto::new(e.to_string())),
        )),
        Err(RegisterError::Storage(reason)) => {
            tracing::error!("Registration failed: {}", reason);
            Err((
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorResponseDto::new("internal server error")),
            ))
        }
    }
}

/// Health check endpoint
pub async fn health_check() -> Json<serde_json::Value> {
    Json(serde_json::json!({"status": "ok"}))
}

/// Usage summary
pub async fn index() -> &'static str {
    USAGE
}
