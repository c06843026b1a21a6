use argon2::{
    password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2,
};
use diesel::result::{DatabaseErrorKind, Error as DieselError};
use serde::Serialize;
use uuid::Uuid;

use poliventas_shared::errors::{AppError, AppResult, ErrorCode};
use poliventas_shared::middleware::encode_jwt;
use poliventas_shared::types::auth::UserRole;

use crate::messages;
use crate::models::{NewUsuario, PerfilChangeset, Usuario};
use crate::AppState;

pub fn hash_password(password: &str) -> Result<String, AppError> {
    let salt = SaltString::generate(&mut OsRng);
    let argon2 = Argon2::default();
    argon2
        .hash_password(password.as_bytes(), &salt)
        .map(|h| h.to_string())
        .map_err(|e| AppError::internal(format!("password hashing failed: {e}")))
}

pub fn verify_password(password: &str, hash: &str) -> Result<bool, AppError> {
    let parsed_hash = PasswordHash::new(hash)
        .map_err(|e| AppError::internal(format!("invalid password hash: {e}")))?;
    Ok(Argon2::default()
        .verify_password(password.as_bytes(), &parsed_hash)
        .is_ok())
}

pub fn validate_password(password: &str) -> Result<(), AppError> {
    if password.chars().count() < 8 {
        return Err(AppError::new(ErrorCode::PasswordTooWeak, "La contraseña debe tener al menos 8 caracteres"));
    }
    if !password.chars().any(|c| c.is_ascii_digit()) {
        return Err(AppError::new(ErrorCode::PasswordTooWeak, "La contraseña debe contener al menos un número"));
    }
    if !password.chars().any(|c| c.is_alphabetic()) {
        return Err(AppError::new(ErrorCode::PasswordTooWeak, "La contraseña debe contener al menos una letra"));
    }
    Ok(())
}

/// Registration input, already shape-checked by the route.
#[derive(Debug)]
pub struct NuevoUsuario {
    pub nombre: String,
    pub apellido: String,
    pub email: String,
    pub password: String,
    pub telefono: Option<String>,
    pub direccion: Option<String>,
    pub rol: Option<UserRole>,
}

/// Token plus the profile it was issued for.
#[derive(Debug, Serialize)]
pub struct Sesion {
    pub token: String,
    pub usuario: Usuario,
}

fn issue(state: &AppState, usuario: Usuario) -> AppResult<Sesion> {
    let token = encode_jwt(
        usuario.id,
        usuario.role(),
        &state.config.jwt_secret,
        state.config.jwt_ttl_secs,
    )?;
    Ok(Sesion { token, usuario })
}

fn email_taken() -> AppError {
    AppError::new(ErrorCode::EmailAlreadyExists, messages::EMAIL_REGISTRADO)
}

pub fn register(state: &AppState, input: NuevoUsuario) -> AppResult<Sesion> {
    let rol = input.rol.unwrap_or(UserRole::Estudiante);
    if rol == UserRole::Admin {
        return Err(AppError::forbidden("No se puede registrar una cuenta de administrador"));
    }

    validate_password(&input.password)?;

    let email = input.email.trim().to_lowercase();
    if state.users.find_by_email(&email)?.is_some() {
        return Err(email_taken());
    }

    let password_hash = hash_password(&input.password)?;

    let usuario = state
        .users
        .insert(NewUsuario {
            id: Uuid::now_v7(),
            nombre: input.nombre.trim().to_string(),
            apellido: input.apellido.trim().to_string(),
            telefono: input.telefono.map(|t| t.trim().to_string()),
            direccion: input.direccion.map(|d| d.trim().to_string()),
            email,
            password_hash,
            rol: rol.as_str().to_string(),
        })
        .map_err(|e| match e {
            // Lost a race with a concurrent registration of the same email
            AppError::Database(DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, _)) => {
                email_taken()
            }
            other => other,
        })?;

    tracing::info!(user_id = %usuario.id, rol = %usuario.rol, "user registered");
    issue(state, usuario)
}

pub fn login(state: &AppState, email: &str, password: &str) -> AppResult<Sesion> {
    let invalid = || AppError::new(ErrorCode::InvalidCredentials, messages::CREDENCIALES_INCORRECTAS);

    let usuario = state
        .users
        .find_by_email(&email.trim().to_lowercase())?
        .ok_or_else(invalid)?;

    if !verify_password(password, &usuario.password_hash)? {
        tracing::warn!(user_id = %usuario.id, "login rejected: wrong password");
        return Err(invalid());
    }

    tracing::info!(user_id = %usuario.id, "user logged in");
    issue(state, usuario)
}

pub fn profile(state: &AppState, usuario_id: Uuid) -> AppResult<Usuario> {
    state
        .users
        .find(usuario_id)?
        .ok_or_else(|| AppError::new(ErrorCode::UserNotFound, messages::USUARIO_NO_ENCONTRADO))
}

/// An empty changeset is a no-op that returns the stored profile.
pub fn update_profile(state: &AppState, usuario_id: Uuid, changes: PerfilChangeset) -> AppResult<Usuario> {
    let current = profile(state, usuario_id)?;
    if changes.is_empty() {
        return Ok(current);
    }

    let changes = PerfilChangeset {
        nombre: changes.nombre.map(|v| v.trim().to_string()),
        apellido: changes.apellido.map(|v| v.trim().to_string()),
        telefono: changes.telefono.map(|v| v.trim().to_string()),
        direccion: changes.direccion.map(|v| v.trim().to_string()),
    };
    let usuario = state.users.update_profile(current.id, changes)?;
    tracing::info!(user_id = %usuario.id, "profile updated");
    Ok(usuario)
}
