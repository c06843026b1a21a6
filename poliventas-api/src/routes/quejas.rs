use std::sync::Arc;

use axum::extract::{Path, State};
use axum::Json;
use serde::{Deserialize, Serialize};
use validator::Validate;

use poliventas_shared::errors::{AppError, AppResult};
use poliventas_shared::middleware::{not_blank, ValidJson};
use poliventas_shared::types::api::{ApiResponse, Empty};
use poliventas_shared::types::auth::AuthUser;

use crate::messages;
use crate::models::{Queja, QuejaConUsuario, QuejaTipo};
use crate::routes::parse_id;
use crate::services::queja_service;
use crate::AppState;

#[derive(Debug, Deserialize, Validate)]
pub struct CrearQuejaRequest {
    #[serde(default)]
    pub tipo: String,
    #[serde(default)]
    #[validate(custom(function = "not_blank", message = "El mensaje es obligatorio"))]
    pub mensaje: String,
}

#[derive(Debug, Deserialize, Validate)]
pub struct EditarQuejaRequest {
    #[serde(default)]
    #[validate(custom(function = "not_blank", message = "El mensaje es obligatorio"))]
    pub mensaje: String,
}

#[derive(Debug, Serialize)]
pub struct QuejaPayload<T: Serialize> {
    pub queja: T,
}

#[derive(Debug, Serialize)]
pub struct QuejasPayload {
    pub quejas: Vec<Queja>,
}

/// POST /quejas
pub async fn create(
    State(state): State<Arc<AppState>>,
    auth_user: AuthUser,
    ValidJson(req): ValidJson<CrearQuejaRequest>,
) -> AppResult<Json<ApiResponse<QuejaPayload<Queja>>>> {
    let tipo: QuejaTipo = req
        .tipo
        .parse()
        .map_err(|_| AppError::Validation("El tipo debe ser 'queja' o 'sugerencia'".into()))?;

    let queja = queja_service::create(&state, &auth_user, tipo, &req.mensaje)?;
    Ok(Json(ApiResponse::ok(messages::QUEJA_ENVIADA, QuejaPayload { queja })))
}

/// GET /quejas/mias
pub async fn list_own(
    State(state): State<Arc<AppState>>,
    auth_user: AuthUser,
) -> AppResult<Json<ApiResponse<QuejasPayload>>> {
    let quejas = queja_service::list_own(&state, auth_user.id)?;
    Ok(Json(ApiResponse::ok(messages::QUEJAS_OBTENIDAS, QuejasPayload { quejas })))
}

/// GET /quejas/:id
pub async fn get_one(
    State(state): State<Arc<AppState>>,
    auth_user: AuthUser,
    Path(id): Path<String>,
) -> AppResult<Json<ApiResponse<QuejaPayload<QuejaConUsuario>>>> {
    let id = parse_id(&id)?;
    let queja = queja_service::get(&state, &auth_user, id)?;
    Ok(Json(ApiResponse::ok(messages::QUEJA_OBTENIDA, QuejaPayload { queja })))
}

/// PUT /quejas/:id
pub async fn update(
    State(state): State<Arc<AppState>>,
    auth_user: AuthUser,
    Path(id): Path<String>,
    ValidJson(req): ValidJson<EditarQuejaRequest>,
) -> AppResult<Json<ApiResponse<QuejaPayload<Queja>>>> {
    let id = parse_id(&id)?;
    let queja = queja_service::update_own(&state, &auth_user, id, &req.mensaje)?;
    Ok(Json(ApiResponse::ok(messages::QUEJA_ACTUALIZADA, QuejaPayload { queja })))
}

/// DELETE /quejas/:id
pub async fn delete(
    State(state): State<Arc<AppState>>,
    auth_user: AuthUser,
    Path(id): Path<String>,
) -> AppResult<Json<ApiResponse<Empty>>> {
    let id = parse_id(&id)?;
    queja_service::delete_own(&state, &auth_user, id)?;
    Ok(Json(ApiResponse::message(messages::QUEJA_ELIMINADA)))
}
