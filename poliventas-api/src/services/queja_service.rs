use std::collections::HashMap;

use uuid::Uuid;

use poliventas_shared::errors::{AppError, AppResult, ErrorCode};
use poliventas_shared::types::auth::AuthUser;

use crate::messages;
use crate::models::{
    NewQueja, NotificacionTipo, Queja, QuejaConUsuario, QuejaEstado, QuejaTipo, UsuarioResumen,
};
use crate::services::notification_service;
use crate::AppState;

fn not_found() -> AppError {
    AppError::new(ErrorCode::QuejaNotFound, messages::QUEJA_NO_ENCONTRADA)
}

fn load(state: &AppState, id: Uuid) -> AppResult<Queja> {
    state.quejas.find(id)?.ok_or_else(not_found)
}

/// Load a queja the caller owns.
fn load_owned(state: &AppState, id: Uuid, usuario_id: Uuid) -> AppResult<Queja> {
    let queja = load(state, id)?;
    if !queja.is_owned_by(usuario_id) {
        tracing::warn!(queja_id = %id, user_id = %usuario_id, "queja ownership check failed");
        return Err(AppError::new(ErrorCode::NotQuejaOwner, messages::QUEJA_SIN_PERMISO));
    }
    Ok(queja)
}

/// File a new queja/sugerencia, notify its author and, when one exists, the
/// admin account.
pub fn create(state: &AppState, auth: &AuthUser, tipo: QuejaTipo, mensaje: &str) -> AppResult<Queja> {
    let autor = state
        .users
        .find(auth.id)?
        .ok_or_else(|| AppError::new(ErrorCode::UserNotFound, messages::USUARIO_NO_ENCONTRADO))?;

    let queja = state.quejas.insert(NewQueja {
        id: Uuid::now_v7(),
        usuario_id: autor.id,
        tipo: tipo.as_str().to_string(),
        mensaje: mensaje.trim().to_string(),
        estado: QuejaEstado::Pendiente.as_str().to_string(),
    })?;

    tracing::info!(queja_id = %queja.id, user_id = %autor.id, tipo = %queja.tipo, "queja created");

    notification_service::notify(
        state,
        autor.id,
        format!("Tu {} ha sido registrada correctamente", tipo.as_str()),
        NotificacionTipo::Sistema,
    )?;

    if let Some(admin) = state.users.find_first_admin()? {
        notification_service::notify(
            state,
            admin.id,
            format!("Nueva {} recibida de {}", tipo.as_str(), autor.nombre_completo()),
            NotificacionTipo::Sistema,
        )?;
    }

    Ok(queja)
}

pub fn list_own(state: &AppState, usuario_id: Uuid) -> AppResult<Vec<Queja>> {
    let items = state.quejas.list_by_owner(usuario_id)?;
    if items.is_empty() {
        return Err(AppError::not_found(messages::SIN_REGISTROS));
    }
    Ok(items)
}

/// Queja plus its owner profile: one read per table, joined here.
pub fn find_with_owner(state: &AppState, id: Uuid) -> AppResult<Option<QuejaConUsuario>> {
    let Some(queja) = state.quejas.find(id)? else {
        return Ok(None);
    };
    let owner = state.users.find(queja.usuario_id)?;
    Ok(Some(QuejaConUsuario::new(queja, owner.as_ref().map(UsuarioResumen::from))))
}

/// Every queja (optionally one estado) joined with its owner.
pub fn list_with_owner(state: &AppState, estado: Option<QuejaEstado>) -> AppResult<Vec<QuejaConUsuario>> {
    let quejas = state.quejas.list(estado)?;
    if quejas.is_empty() {
        return Err(AppError::not_found(messages::SIN_QUEJAS));
    }

    let mut owner_ids: Vec<Uuid> = quejas.iter().map(|q| q.usuario_id).collect();
    owner_ids.sort_unstable();
    owner_ids.dedup();

    let owners: HashMap<Uuid, UsuarioResumen> = state
        .users
        .find_many(&owner_ids)?
        .iter()
        .map(|u| (u.id, UsuarioResumen::from(u)))
        .collect();

    Ok(quejas
        .into_iter()
        .map(|q| {
            let owner = owners.get(&q.usuario_id).cloned();
            QuejaConUsuario::new(q, owner)
        })
        .collect())
}

/// Owners see their own quejas; admins see any.
pub fn get(state: &AppState, auth: &AuthUser, id: Uuid) -> AppResult<QuejaConUsuario> {
    let queja = find_with_owner(state, id)?.ok_or_else(not_found)?;
    let owner_id = queja.usuario.as_ref().map(|u| u.id);

    if !auth.is_admin() && owner_id != Some(auth.id) {
        return Err(AppError::new(ErrorCode::NotQuejaOwner, messages::QUEJA_SIN_PERMISO));
    }
    Ok(queja)
}

pub fn update_own(state: &AppState, auth: &AuthUser, id: Uuid, mensaje: &str) -> AppResult<Queja> {
    let queja = load_owned(state, id, auth.id)?;
    if queja.is_resolved() {
        return Err(AppError::new(ErrorCode::QuejaAlreadyResolved, messages::QUEJA_NO_EDITABLE));
    }

    // None here means an admin resolved it between the read and the write
    state
        .quejas
        .update_mensaje(id, mensaje.trim())?
        .ok_or_else(|| AppError::new(ErrorCode::QuejaAlreadyResolved, messages::QUEJA_NO_EDITABLE))
}

/// Owners may withdraw a queja only while it is still pendiente.
pub fn delete_own(state: &AppState, auth: &AuthUser, id: Uuid) -> AppResult<()> {
    let queja = load_owned(state, id, auth.id)?;
    if queja.is_resolved() {
        return Err(AppError::new(ErrorCode::QuejaAlreadyResolved, messages::QUEJA_NO_ELIMINABLE));
    }

    if !state.quejas.delete(id, QuejaEstado::Pendiente)? {
        // Resolved (or removed) between the read and the delete
        return Err(match state.quejas.find(id)? {
            Some(_) => AppError::new(ErrorCode::QuejaAlreadyResolved, messages::QUEJA_NO_ELIMINABLE),
            None => not_found(),
        });
    }
    tracing::info!(queja_id = %id, user_id = %auth.id, "queja withdrawn by owner");
    Ok(())
}

/// Admin answer: sets the respuesta and resolves in a single write, then
/// notifies the owner.
pub fn respond(state: &AppState, admin: &AuthUser, id: Uuid, respuesta: &str) -> AppResult<Queja> {
    let queja = load(state, id)?;
    if queja.is_resolved() {
        return Err(AppError::new(ErrorCode::QuejaAlreadyResolved, messages::QUEJA_YA_RESPONDIDA));
    }

    let respuesta = respuesta.trim();
    let resolved = state
        .quejas
        .resolve(id, respuesta)?
        .ok_or_else(|| AppError::new(ErrorCode::QuejaAlreadyResolved, messages::QUEJA_YA_RESPONDIDA))?;

    tracing::info!(queja_id = %id, admin_id = %admin.id, "queja resolved");

    notification_service::notify(
        state,
        resolved.usuario_id,
        format!("Tu {} ha sido respondida: {}", resolved.tipo().as_str(), respuesta),
        NotificacionTipo::Sistema,
    )?;

    Ok(resolved)
}

/// Admins may delete a queja only once it is resuelto.
pub fn delete_as_admin(state: &AppState, admin: &AuthUser, id: Uuid) -> AppResult<()> {
    let queja = load(state, id)?;
    if !queja.is_resolved() {
        return Err(AppError::new(ErrorCode::QuejaNotResolved, messages::QUEJA_SOLO_RESUELTAS));
    }

    if !state.quejas.delete(id, QuejaEstado::Resuelto)? {
        return Err(not_found());
    }
    tracing::info!(queja_id = %id, admin_id = %admin.id, "queja deleted by admin");
    Ok(())
}
