use std::sync::Arc;

use axum::extract::State;
use axum::Json;
use serde::{Deserialize, Serialize};
use validator::Validate;

use poliventas_shared::errors::{AppError, AppResult};
use poliventas_shared::middleware::{not_blank, ValidJson};
use poliventas_shared::types::api::ApiResponse;
use poliventas_shared::types::auth::{AuthUser, UserRole};

use crate::messages;
use crate::models::{PerfilChangeset, Usuario};
use crate::services::auth_service::{self, NuevoUsuario, Sesion};
use crate::AppState;

#[derive(Debug, Deserialize, Validate)]
pub struct RegistroRequest {
    #[serde(default)]
    #[validate(custom(function = "not_blank", message = "El nombre es obligatorio"))]
    pub nombre: String,
    #[serde(default)]
    #[validate(custom(function = "not_blank", message = "El apellido es obligatorio"))]
    pub apellido: String,
    #[serde(default)]
    #[validate(email(message = "El correo no es válido"))]
    pub email: String,
    #[serde(default)]
    #[validate(custom(function = "not_blank", message = "La contraseña es obligatoria"))]
    pub password: String,
    pub telefono: Option<String>,
    pub direccion: Option<String>,
    pub rol: Option<String>,
}

#[derive(Debug, Deserialize, Validate)]
pub struct LoginRequest {
    #[serde(default)]
    #[validate(custom(function = "not_blank", message = "El correo es obligatorio"))]
    pub email: String,
    #[serde(default)]
    #[validate(custom(function = "not_blank", message = "La contraseña es obligatoria"))]
    pub password: String,
}

/// Every field optional; a field that is present must not be blank.
#[derive(Debug, Deserialize, Validate)]
pub struct PerfilRequest {
    #[validate(custom(function = "not_blank", message = "El nombre no puede estar vacío"))]
    pub nombre: Option<String>,
    #[validate(custom(function = "not_blank", message = "El apellido no puede estar vacío"))]
    pub apellido: Option<String>,
    #[validate(custom(function = "not_blank", message = "El teléfono no puede estar vacío"))]
    pub telefono: Option<String>,
    #[validate(custom(function = "not_blank", message = "La dirección no puede estar vacía"))]
    pub direccion: Option<String>,
}

impl From<PerfilRequest> for PerfilChangeset {
    fn from(req: PerfilRequest) -> Self {
        Self {
            nombre: req.nombre,
            apellido: req.apellido,
            telefono: req.telefono,
            direccion: req.direccion,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct UsuarioPayload {
    pub usuario: Usuario,
}

/// POST /auth/registro
pub async fn register(
    State(state): State<Arc<AppState>>,
    ValidJson(req): ValidJson<RegistroRequest>,
) -> AppResult<Json<ApiResponse<Sesion>>> {
    let rol = req
        .rol
        .as_deref()
        .map(str::parse::<UserRole>)
        .transpose()
        .map_err(|_| AppError::Validation("Rol no válido".into()))?;

    let sesion = auth_service::register(
        &state,
        NuevoUsuario {
            nombre: req.nombre,
            apellido: req.apellido,
            email: req.email,
            password: req.password,
            telefono: req.telefono,
            direccion: req.direccion,
            rol,
        },
    )?;

    Ok(Json(ApiResponse::ok(messages::REGISTRO_EXITOSO, sesion)))
}

/// POST /auth/login
pub async fn login(
    State(state): State<Arc<AppState>>,
    ValidJson(req): ValidJson<LoginRequest>,
) -> AppResult<Json<ApiResponse<Sesion>>> {
    let sesion = auth_service::login(&state, &req.email, &req.password)?;
    Ok(Json(ApiResponse::ok(messages::LOGIN_EXITOSO, sesion)))
}

/// GET /auth/perfil
pub async fn profile(
    State(state): State<Arc<AppState>>,
    auth_user: AuthUser,
) -> AppResult<Json<ApiResponse<UsuarioPayload>>> {
    let usuario = auth_service::profile(&state, auth_user.id)?;
    Ok(Json(ApiResponse::ok(messages::PERFIL_OBTENIDO, UsuarioPayload { usuario })))
}

/// PUT /auth/perfil
pub async fn update_profile(
    State(state): State<Arc<AppState>>,
    auth_user: AuthUser,
    ValidJson(req): ValidJson<PerfilRequest>,
) -> AppResult<Json<ApiResponse<UsuarioPayload>>> {
    let usuario = auth_service::update_profile(&state, auth_user.id, req.into())?;
    Ok(Json(ApiResponse::ok(messages::PERFIL_ACTUALIZADO, UsuarioPayload { usuario })))
}

#[cfg(test)]
mod tests {
    use crate::messages;
    use crate::testing::TestApp;
    use axum::http::StatusCode;
    use serde_json::json;

    fn registro(email: &str) -> serde_json::Value {
        json!({
            "nombre": "Mateo",
            "apellido": "Salazar",
            "email": email,
            "password": "vendo2024",
            "rol": "vendedor"
        })
    }

    #[tokio::test]
    async fn register_login_and_read_profile() {
        let app = TestApp::new();

        let (status, body) = app
            .send("POST", "/auth/registro", None, Some(registro("mateo@epn.edu.ec")))
            .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["msg"], messages::REGISTRO_EXITOSO);
        assert_eq!(body["usuario"]["rol"], "vendedor");
        assert!(body["usuario"].get("password_hash").is_none());

        let (status, body) = app
            .send(
                "POST",
                "/auth/login",
                None,
                Some(json!({ "email": "mateo@epn.edu.ec", "password": "vendo2024" })),
            )
            .await;
        assert_eq!(status, StatusCode::OK);
        let token = body["token"].as_str().unwrap().to_string();

        let (status, body) = app.send("GET", "/auth/perfil", Some(&token), None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["usuario"]["email"], "mateo@epn.edu.ec");
    }

    #[tokio::test]
    async fn duplicate_registration_is_conflict() {
        let app = TestApp::new();
        app.send("POST", "/auth/registro", None, Some(registro("dup@epn.edu.ec")))
            .await;

        let (status, body) = app
            .send("POST", "/auth/registro", None, Some(registro("dup@epn.edu.ec")))
            .await;
        assert_eq!(status, StatusCode::CONFLICT);
        assert_eq!(body["msg"], messages::EMAIL_REGISTRADO);
    }

    #[tokio::test]
    async fn invalid_email_and_unknown_role_are_bad_requests() {
        let app = TestApp::new();

        let (status, _) = app
            .send("POST", "/auth/registro", None, Some(registro("no-es-correo")))
            .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);

        let mut body = registro("rol@epn.edu.ec");
        body["rol"] = json!("superusuario");
        let (status, body) = app.send("POST", "/auth/registro", None, Some(body)).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["msg"], "Rol no válido");
    }

    #[tokio::test]
    async fn wrong_password_is_unauthorized() {
        let app = TestApp::new();
        app.send("POST", "/auth/registro", None, Some(registro("ana@epn.edu.ec")))
            .await;

        let (status, body) = app
            .send(
                "POST",
                "/auth/login",
                None,
                Some(json!({ "email": "ana@epn.edu.ec", "password": "otra2024" })),
            )
            .await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
        assert_eq!(body["msg"], messages::CREDENCIALES_INCORRECTAS);
    }

    #[tokio::test]
    async fn profile_requires_token_and_rejects_blank_fields() {
        let app = TestApp::new();

        let (status, _) = app.send("GET", "/auth/perfil", None, None).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);

        let (_, body) = app
            .send("POST", "/auth/registro", None, Some(registro("perfil@epn.edu.ec")))
            .await;
        let token = body["token"].as_str().unwrap().to_string();

        let (status, _) = app
            .send("PUT", "/auth/perfil", Some(&token), Some(json!({ "nombre": "  " })))
            .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);

        let (status, body) = app
            .send("PUT", "/auth/perfil", Some(&token), Some(json!({ "direccion": "Av. Ladrón de Guevara" })))
            .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["usuario"]["direccion"], "Av. Ladrón de Guevara");
        assert_eq!(body["usuario"]["nombre"], "Mateo");
    }
}
