use uuid::Uuid;

use poliventas_shared::errors::{AppError, AppResult, ErrorCode};

use crate::messages;
use crate::models::{NewNotificacion, Notificacion, NotificacionTipo};
use crate::socket::Notifier;
use crate::AppState;

/// Persist a notification for `usuario_id`, then push it over the real-time
/// channel. Only the insert can fail the call.
pub fn notify(
    state: &AppState,
    usuario_id: Uuid,
    mensaje: impl Into<String>,
    tipo: NotificacionTipo,
) -> AppResult<Notificacion> {
    let notificacion = state.notifications.insert(NewNotificacion {
        id: Uuid::now_v7(),
        usuario_id,
        mensaje: mensaje.into(),
        tipo: tipo.as_str().to_string(),
    })?;

    tracing::debug!(
        notificacion_id = %notificacion.id,
        user_id = %usuario_id,
        tipo = %notificacion.tipo,
        "notification created"
    );

    push_best_effort(state.notifier.as_ref(), &notificacion);
    Ok(notificacion)
}

fn push_best_effort(notifier: &dyn Notifier, notificacion: &Notificacion) {
    if let Err(e) = notifier.push(notificacion) {
        tracing::warn!(
            error = %e,
            notificacion_id = %notificacion.id,
            user_id = %notificacion.usuario_id,
            "real-time push failed, notification stays persisted"
        );
    }
}

/// Admin-originated notification for an existing user.
pub fn send_to_user(
    state: &AppState,
    usuario_id: Uuid,
    mensaje: &str,
    tipo: NotificacionTipo,
) -> AppResult<Notificacion> {
    if state.users.find(usuario_id)?.is_none() {
        return Err(AppError::new(ErrorCode::UserNotFound, messages::USUARIO_NO_ENCONTRADO));
    }
    notify(state, usuario_id, mensaje.trim(), tipo)
}

pub fn list_for_user(state: &AppState, usuario_id: Uuid) -> AppResult<Vec<Notificacion>> {
    let items = state.notifications.list_by_owner(usuario_id)?;
    if items.is_empty() {
        return Err(AppError::not_found(messages::SIN_REGISTROS));
    }
    Ok(items)
}

pub fn count_unread(state: &AppState, usuario_id: Uuid) -> AppResult<i64> {
    state.notifications.count_unread(usuario_id)
}

/// Load a notification and check it belongs to `usuario_id`.
fn find_owned(state: &AppState, id: Uuid, usuario_id: Uuid) -> AppResult<Notificacion> {
    let notificacion = state
        .notifications
        .find(id)?
        .ok_or_else(|| AppError::new(ErrorCode::NotificationNotFound, messages::NOTIFICACION_NO_ENCONTRADA))?;

    if !notificacion.is_owned_by(usuario_id) {
        tracing::warn!(notificacion_id = %id, user_id = %usuario_id, "notification ownership check failed");
        return Err(AppError::new(ErrorCode::NotNotificationOwner, messages::NOTIFICACION_SIN_PERMISO));
    }
    Ok(notificacion)
}

/// Idempotent: marking an already-read notification succeeds again.
pub fn mark_read(state: &AppState, id: Uuid, usuario_id: Uuid) -> AppResult<Notificacion> {
    let notificacion = find_owned(state, id, usuario_id)?;
    if notificacion.leido {
        return Ok(notificacion);
    }

    state
        .notifications
        .mark_read(id)?
        .ok_or_else(|| AppError::new(ErrorCode::NotificationNotFound, messages::NOTIFICACION_NO_ENCONTRADA))
}

pub fn mark_all_read(state: &AppState, usuario_id: Uuid) -> AppResult<usize> {
    state.notifications.mark_all_read(usuario_id)
}

pub fn delete(state: &AppState, id: Uuid, usuario_id: Uuid) -> AppResult<()> {
    find_owned(state, id, usuario_id)?;

    if !state.notifications.delete(id)? {
        return Err(AppError::new(ErrorCode::NotificationNotFound, messages::NOTIFICACION_NO_ENCONTRADA));
    }
    tracing::info!(notificacion_id = %id, user_id = %usuario_id, "notification deleted");
    Ok(())
}

pub fn delete_all(state: &AppState, usuario_id: Uuid) -> AppResult<usize> {
    let deleted = state.notifications.delete_all(usuario_id)?;
    tracing::info!(user_id = %usuario_id, deleted, "notifications cleared");
    Ok(deleted)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{seed_user, TestApp};
    use axum::http::StatusCode;
    use poliventas_shared::types::auth::UserRole;

    #[test]
    fn notify_persists_and_pushes() {
        let app = TestApp::new();
        let user = seed_user(&app.state, UserRole::Estudiante);

        let n = notify(&app.state, user.id, "Bienvenido", NotificacionTipo::Sistema).unwrap();

        assert!(!n.leido);
        assert_eq!(n.tipo, "sistema");
        assert_eq!(app.notifier.pushed_to(user.id).len(), 1);
    }

    #[test]
    fn failed_push_does_not_fail_notify() {
        let app = TestApp::with_failing_notifier();
        let user = seed_user(&app.state, UserRole::Estudiante);

        let n = notify(&app.state, user.id, "Tu producto se vendió", NotificacionTipo::Venta).unwrap();

        assert!(app.notifier.pushed_to(user.id).is_empty());
        assert_eq!(app.store.notificaciones_de(user.id)[0].id, n.id);
    }

    #[test]
    fn empty_listing_is_not_found() {
        let app = TestApp::new();
        let user = seed_user(&app.state, UserRole::Estudiante);

        let err = list_for_user(&app.state, user.id).unwrap_err();
        assert_eq!(err.status(), StatusCode::NOT_FOUND);
        assert_eq!(err.to_string(), messages::SIN_REGISTROS);
    }

    #[test]
    fn listing_is_newest_first() {
        let app = TestApp::new();
        let user = seed_user(&app.state, UserRole::Estudiante);
        let first = notify(&app.state, user.id, "uno", NotificacionTipo::Sistema).unwrap();
        let second = notify(&app.state, user.id, "dos", NotificacionTipo::Mensaje).unwrap();

        let ids: Vec<Uuid> = list_for_user(&app.state, user.id).unwrap().iter().map(|n| n.id).collect();
        assert_eq!(ids, vec![second.id, first.id]);
    }

    #[test]
    fn mark_read_is_idempotent() {
        let app = TestApp::new();
        let user = seed_user(&app.state, UserRole::Estudiante);
        let n = notify(&app.state, user.id, "hola", NotificacionTipo::Mensaje).unwrap();

        assert!(mark_read(&app.state, n.id, user.id).unwrap().leido);
        assert!(mark_read(&app.state, n.id, user.id).unwrap().leido);
        assert_eq!(count_unread(&app.state, user.id).unwrap(), 0);
    }

    #[test]
    fn foreign_notification_is_forbidden() {
        let app = TestApp::new();
        let owner = seed_user(&app.state, UserRole::Estudiante);
        let intruder = seed_user(&app.state, UserRole::Vendedor);
        let n = notify(&app.state, owner.id, "privado", NotificacionTipo::Sistema).unwrap();

        let err = mark_read(&app.state, n.id, intruder.id).unwrap_err();
        assert_eq!(err.status(), StatusCode::FORBIDDEN);

        let err = delete(&app.state, n.id, intruder.id).unwrap_err();
        assert_eq!(err.status(), StatusCode::FORBIDDEN);

        assert!(!app.store.notificaciones_de(owner.id)[0].leido);
    }

    #[test]
    fn bulk_operations_only_touch_the_caller() {
        let app = TestApp::new();
        let a = seed_user(&app.state, UserRole::Estudiante);
        let b = seed_user(&app.state, UserRole::Estudiante);
        for _ in 0..3 {
            notify(&app.state, a.id, "a", NotificacionTipo::Sistema).unwrap();
        }
        notify(&app.state, b.id, "b", NotificacionTipo::Sistema).unwrap();

        assert_eq!(mark_all_read(&app.state, a.id).unwrap(), 3);
        assert_eq!(count_unread(&app.state, b.id).unwrap(), 1);

        assert_eq!(delete_all(&app.state, a.id).unwrap(), 3);
        assert_eq!(list_for_user(&app.state, b.id).unwrap().len(), 1);
    }

    #[test]
    fn send_to_unknown_user_is_not_found() {
        let app = TestApp::new();
        let err = send_to_user(&app.state, Uuid::now_v7(), "hola", NotificacionTipo::Sistema).unwrap_err();
        assert_eq!(err.code(), ErrorCode::UserNotFound);
    }
}
