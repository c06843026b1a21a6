use std::sync::Arc;

use axum::extract::{Path, Query, State};
use axum::Json;
use serde::{Deserialize, Serialize};
use validator::Validate;

use poliventas_shared::errors::{AppError, AppResult};
use poliventas_shared::middleware::{not_blank, AdminUser, ValidJson};
use poliventas_shared::types::api::{ApiResponse, Empty};

use crate::messages;
use crate::models::{NotificacionTipo, Queja, QuejaConUsuario, QuejaEstado};
use crate::routes::notifications::NotificacionPayload;
use crate::routes::parse_id;
use crate::routes::quejas::QuejaPayload;
use crate::services::{notification_service, queja_service};
use crate::AppState;

#[derive(Debug, Deserialize)]
pub struct EstadoQuery {
    pub estado: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct QuejasConUsuarioPayload {
    pub quejas: Vec<QuejaConUsuario>,
}

#[derive(Debug, Deserialize, Validate)]
pub struct ResponderRequest {
    #[serde(default)]
    #[validate(custom(function = "not_blank", message = "La respuesta es obligatoria"))]
    pub respuesta: String,
}

#[derive(Debug, Deserialize, Validate)]
pub struct EnviarNotificacionRequest {
    #[serde(default)]
    pub usuario: String,
    #[serde(default)]
    #[validate(custom(function = "not_blank", message = "El mensaje es obligatorio"))]
    pub mensaje: String,
    pub tipo: Option<String>,
}

/// GET /admin/quejas?estado=
/// Every queja with its owner profile, newest first.
pub async fn list_quejas(
    State(state): State<Arc<AppState>>,
    AdminUser(_admin): AdminUser,
    Query(query): Query<EstadoQuery>,
) -> AppResult<Json<ApiResponse<QuejasConUsuarioPayload>>> {
    let estado = query
        .estado
        .as_deref()
        .filter(|e| !e.trim().is_empty())
        .map(str::parse::<QuejaEstado>)
        .transpose()
        .map_err(|_| AppError::Validation("El estado debe ser 'pendiente' o 'resuelto'".into()))?;

    let quejas = queja_service::list_with_owner(&state, estado)?;
    Ok(Json(ApiResponse::ok(
        messages::QUEJAS_OBTENIDAS,
        QuejasConUsuarioPayload { quejas },
    )))
}

/// PUT /admin/quejas/:id/responder
pub async fn respond_queja(
    State(state): State<Arc<AppState>>,
    AdminUser(admin): AdminUser,
    Path(id): Path<String>,
    ValidJson(req): ValidJson<ResponderRequest>,
) -> AppResult<Json<ApiResponse<QuejaPayload<Queja>>>> {
    let id = parse_id(&id)?;
    let queja = queja_service::respond(&state, &admin, id, &req.respuesta)?;
    Ok(Json(ApiResponse::ok(messages::RESPUESTA_ENVIADA, QuejaPayload { queja })))
}

/// DELETE /admin/quejas/:id
pub async fn delete_queja(
    State(state): State<Arc<AppState>>,
    AdminUser(admin): AdminUser,
    Path(id): Path<String>,
) -> AppResult<Json<ApiResponse<Empty>>> {
    let id = parse_id(&id)?;
    queja_service::delete_as_admin(&state, &admin, id)?;
    Ok(Json(ApiResponse::message(messages::QUEJA_ELIMINADA)))
}

/// POST /admin/notificaciones
pub async fn send_notification(
    State(state): State<Arc<AppState>>,
    AdminUser(admin): AdminUser,
    ValidJson(req): ValidJson<EnviarNotificacionRequest>,
) -> AppResult<Json<ApiResponse<NotificacionPayload>>> {
    let usuario_id = parse_id(&req.usuario)?;
    let tipo = match req.tipo.as_deref() {
        Some(raw) => raw
            .parse::<NotificacionTipo>()
            .map_err(|_| AppError::Validation("Tipo de notificación no válido".into()))?,
        None => NotificacionTipo::Sistema,
    };

    let notificacion = notification_service::send_to_user(&state, usuario_id, &req.mensaje, tipo)?;
    tracing::info!(admin_id = %admin.id, user_id = %usuario_id, "admin notification sent");

    Ok(Json(ApiResponse::ok(
        messages::NOTIFICACION_ENVIADA,
        NotificacionPayload { notificacion },
    )))
}
