use uuid::Uuid;

use poliventas_shared::errors::{AppError, AppResult, ErrorCode};

use crate::messages;

pub mod admin;
pub mod auth;
pub mod health;
pub mod notifications;
pub mod quejas;

/// Path ids arrive as raw strings so a malformed one is answered with the
/// service's own 400 envelope instead of axum's plain-text rejection.
pub fn parse_id(raw: &str) -> AppResult<Uuid> {
    Uuid::parse_str(raw.trim()).map_err(|_| AppError::new(ErrorCode::InvalidId, messages::ID_INVALIDO))
}
