use std::sync::Arc;

use axum::extract::{Path, State};
use axum::Json;
use serde::Serialize;

use poliventas_shared::errors::AppResult;
use poliventas_shared::types::api::{ApiResponse, Empty};
use poliventas_shared::types::auth::AuthUser;

use crate::messages;
use crate::models::Notificacion;
use crate::routes::parse_id;
use crate::services::notification_service;
use crate::AppState;

#[derive(Debug, Serialize)]
pub struct NotificacionesPayload {
    pub notificaciones: Vec<Notificacion>,
}

#[derive(Debug, Serialize)]
pub struct NotificacionPayload {
    pub notificacion: Notificacion,
}

#[derive(Debug, Serialize)]
pub struct UnreadCountResponse {
    pub total: i64,
}

#[derive(Debug, Serialize)]
pub struct MarkAllReadResponse {
    pub actualizadas: usize,
}

#[derive(Debug, Serialize)]
pub struct DeleteAllResponse {
    pub eliminadas: usize,
}

/// GET /notificaciones
/// Newest first; 404 when the user has none.
pub async fn list(
    State(state): State<Arc<AppState>>,
    auth_user: AuthUser,
) -> AppResult<Json<ApiResponse<NotificacionesPayload>>> {
    let notificaciones = notification_service::list_for_user(&state, auth_user.id)?;
    Ok(Json(ApiResponse::ok(
        messages::NOTIFICACIONES_OBTENIDAS,
        NotificacionesPayload { notificaciones },
    )))
}

/// GET /notificaciones/no-leidas
pub async fn unread_count(
    State(state): State<Arc<AppState>>,
    auth_user: AuthUser,
) -> AppResult<Json<ApiResponse<UnreadCountResponse>>> {
    let total = notification_service::count_unread(&state, auth_user.id)?;
    Ok(Json(ApiResponse::ok(messages::NO_LEIDAS, UnreadCountResponse { total })))
}

/// PATCH /notificaciones/:id/leida
pub async fn mark_read(
    State(state): State<Arc<AppState>>,
    auth_user: AuthUser,
    Path(id): Path<String>,
) -> AppResult<Json<ApiResponse<NotificacionPayload>>> {
    let id = parse_id(&id)?;
    let notificacion = notification_service::mark_read(&state, id, auth_user.id)?;
    Ok(Json(ApiResponse::ok(
        messages::NOTIFICACION_LEIDA,
        NotificacionPayload { notificacion },
    )))
}

/// PATCH /notificaciones/leidas
pub async fn mark_all_read(
    State(state): State<Arc<AppState>>,
    auth_user: AuthUser,
) -> AppResult<Json<ApiResponse<MarkAllReadResponse>>> {
    let actualizadas = notification_service::mark_all_read(&state, auth_user.id)?;
    Ok(Json(ApiResponse::ok(
        messages::NOTIFICACIONES_LEIDAS,
        MarkAllReadResponse { actualizadas },
    )))
}

/// DELETE /notificaciones/:id
pub async fn delete(
    State(state): State<Arc<AppState>>,
    auth_user: AuthUser,
    Path(id): Path<String>,
) -> AppResult<Json<ApiResponse<Empty>>> {
    let id = parse_id(&id)?;
    notification_service::delete(&state, id, auth_user.id)?;
    Ok(Json(ApiResponse::message(messages::NOTIFICACION_ELIMINADA)))
}

/// DELETE /notificaciones
pub async fn delete_all(
    State(state): State<Arc<AppState>>,
    auth_user: AuthUser,
) -> AppResult<Json<ApiResponse<DeleteAllResponse>>> {
    let eliminadas = notification_service::delete_all(&state, auth_user.id)?;
    Ok(Json(ApiResponse::ok(
        messages::NOTIFICACIONES_ELIMINADAS,
        DeleteAllResponse { eliminadas },
    )))
}
