use std::sync::Arc;

use serde::Serialize;
use socketioxide::extract::SocketRef;
use uuid::Uuid;

use poliventas_shared::middleware::decode_jwt;

use crate::socket::notifier::user_room;
use crate::AppState;

#[derive(Debug, Serialize)]
pub struct ErrorPayload {
    pub code: String,
    pub message: String,
}

fn get_user_id(socket: &SocketRef) -> Option<Uuid> {
    socket.extensions.get::<Uuid>()
}

pub async fn on_connect_with_state(socket: SocketRef, state: Arc<AppState>) {
    let user_id = match authenticate_socket(&socket, &state) {
        Ok(id) => id,
        Err(msg) => {
            tracing::warn!(error = %msg, sid = %socket.id, "notification socket auth failed");
            let _ = socket.emit(
                "error",
                &ErrorPayload {
                    code: "AUTH_FAILED".into(),
                    message: msg,
                },
            );
            socket.disconnect().ok();
            return;
        }
    };

    socket.extensions.insert(user_id);

    // Per-user room; notification pushes target it
    socket.join(user_room(user_id)).ok();

    tracing::info!(user_id = %user_id, sid = %socket.id, "notification socket connected");

    let _ = socket.emit("connected", &serde_json::json!({ "usuario": user_id }));

    socket.on_disconnect(|socket: SocketRef| async move {
        if let Some(user_id) = get_user_id(&socket) {
            tracing::info!(user_id = %user_id, sid = %socket.id, "notification socket disconnected");
        }
    });
}

fn authenticate_socket(socket: &SocketRef, state: &Arc<AppState>) -> Result<Uuid, String> {
    let connect_info = socket.req_parts();

    // Token travels in the handshake query string: ?token=xxx
    let query = connect_info.uri.query().unwrap_or_default();
    let token = token_from_query(query).ok_or_else(|| "missing token query parameter".to_string())?;

    let claims = decode_jwt(&token, &state.config.jwt_secret).map_err(|e| e.to_string())?;
    Ok(claims.sub)
}

fn token_from_query(query: &str) -> Option<String> {
    query.split('&').find_map(|pair| {
        let mut split = pair.splitn(2, '=');
        let key = split.next()?;
        let value = split.next()?;
        (key == "token" && !value.is_empty()).then(|| value.to_string())
    })
}
