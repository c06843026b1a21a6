use chrono::{DateTime, Utc};
use diesel::prelude::*;
use serde::Serialize;
use uuid::Uuid;

use poliventas_shared::types::auth::UserRole;

use crate::schema::{notificaciones, quejas, usuarios};

// --- Usuario ---

#[derive(Debug, Queryable, Identifiable, Serialize, Clone)]
#[diesel(table_name = usuarios)]
pub struct Usuario {
    pub id: Uuid,
    pub nombre: String,
    pub apellido: String,
    pub telefono: Option<String>,
    pub direccion: Option<String>,
    pub email: String,
    #[serde(skip_serializing)]
    pub password_hash: String,
    pub rol: String,
    #[serde(rename = "createdAt")]
    pub created_at: DateTime<Utc>,
}

impl Usuario {
    pub fn role(&self) -> UserRole {
        self.rol.parse().unwrap_or(UserRole::Estudiante)
    }

    pub fn nombre_completo(&self) -> String {
        format!("{} {}", self.nombre, self.apellido)
    }
}

#[derive(Debug, Insertable)]
#[diesel(table_name = usuarios)]
pub struct NewUsuario {
    pub id: Uuid,
    pub nombre: String,
    pub apellido: String,
    pub telefono: Option<String>,
    pub direccion: Option<String>,
    pub email: String,
    pub password_hash: String,
    pub rol: String,
}

#[derive(Debug, Default, Clone, AsChangeset)]
#[diesel(table_name = usuarios)]
pub struct PerfilChangeset {
    pub nombre: Option<String>,
    pub apellido: Option<String>,
    pub telefono: Option<String>,
    pub direccion: Option<String>,
}

impl PerfilChangeset {
    pub fn is_empty(&self) -> bool {
        self.nombre.is_none()
            && self.apellido.is_none()
            && self.telefono.is_none()
            && self.direccion.is_none()
    }
}

/// Owner fields embedded in admin listings.
#[derive(Debug, Serialize, Clone)]
pub struct UsuarioResumen {
    pub id: Uuid,
    pub nombre: String,
    pub apellido: String,
    pub email: String,
    pub telefono: Option<String>,
}

impl From<&Usuario> for UsuarioResumen {
    fn from(u: &Usuario) -> Self {
        Self {
            id: u.id,
            nombre: u.nombre.clone(),
            apellido: u.apellido.clone(),
            email: u.email.clone(),
            telefono: u.telefono.clone(),
        }
    }
}

// --- Queja / sugerencia ---

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum QuejaTipo {
    Queja,
    Sugerencia,
}

impl QuejaTipo {
    pub fn as_str(&self) -> &'static str {
        match self {
            QuejaTipo::Queja => "queja",
            QuejaTipo::Sugerencia => "sugerencia",
        }
    }
}

impl std::str::FromStr for QuejaTipo {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "queja" => Ok(QuejaTipo::Queja),
            "sugerencia" => Ok(QuejaTipo::Sugerencia),
            _ => Err(format!("tipo de queja desconocido: {s}")),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum QuejaEstado {
    Pendiente,
    Resuelto,
}

impl QuejaEstado {
    pub fn as_str(&self) -> &'static str {
        match self {
            QuejaEstado::Pendiente => "pendiente",
            QuejaEstado::Resuelto => "resuelto",
        }
    }
}

impl std::str::FromStr for QuejaEstado {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "pendiente" => Ok(QuejaEstado::Pendiente),
            "resuelto" => Ok(QuejaEstado::Resuelto),
            _ => Err(format!("estado desconocido: {s}")),
        }
    }
}

#[derive(Debug, Queryable, Identifiable, Serialize, Clone)]
#[diesel(table_name = quejas)]
pub struct Queja {
    pub id: Uuid,
    #[serde(rename = "usuario")]
    pub usuario_id: Uuid,
    pub tipo: String,
    pub mensaje: String,
    pub respuesta: Option<String>,
    pub estado: String,
    #[serde(rename = "createdAt")]
    pub created_at: DateTime<Utc>,
    #[serde(rename = "updatedAt")]
    pub updated_at: DateTime<Utc>,
}

impl Queja {
    pub fn is_resolved(&self) -> bool {
        self.estado == QuejaEstado::Resuelto.as_str()
    }

    pub fn is_owned_by(&self, usuario_id: Uuid) -> bool {
        self.usuario_id == usuario_id
    }

    pub fn tipo(&self) -> QuejaTipo {
        self.tipo.parse().unwrap_or(QuejaTipo::Queja)
    }
}

#[derive(Debug, Insertable)]
#[diesel(table_name = quejas)]
pub struct NewQueja {
    pub id: Uuid,
    pub usuario_id: Uuid,
    pub tipo: String,
    pub mensaje: String,
    pub estado: String,
}

/// A queja with its owner resolved by a second lookup. Same wire shape as
/// `Queja`, except `usuario` carries the owner profile instead of the id.
#[derive(Debug, Serialize, Clone)]
pub struct QuejaConUsuario {
    pub id: Uuid,
    pub usuario: Option<UsuarioResumen>,
    pub tipo: String,
    pub mensaje: String,
    pub respuesta: Option<String>,
    pub estado: String,
    #[serde(rename = "createdAt")]
    pub created_at: DateTime<Utc>,
    #[serde(rename = "updatedAt")]
    pub updated_at: DateTime<Utc>,
}

impl QuejaConUsuario {
    pub fn new(queja: Queja, usuario: Option<UsuarioResumen>) -> Self {
        Self {
            id: queja.id,
            usuario,
            tipo: queja.tipo,
            mensaje: queja.mensaje,
            respuesta: queja.respuesta,
            estado: queja.estado,
            created_at: queja.created_at,
            updated_at: queja.updated_at,
        }
    }
}

// --- Notificacion ---

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum NotificacionTipo {
    Venta,
    Sistema,
    Mensaje,
}

impl NotificacionTipo {
    pub fn as_str(&self) -> &'static str {
        match self {
            NotificacionTipo::Venta => "venta",
            NotificacionTipo::Sistema => "sistema",
            NotificacionTipo::Mensaje => "mensaje",
        }
    }
}

impl std::str::FromStr for NotificacionTipo {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "venta" => Ok(NotificacionTipo::Venta),
            "sistema" => Ok(NotificacionTipo::Sistema),
            "mensaje" => Ok(NotificacionTipo::Mensaje),
            _ => Err(format!("tipo de notificación desconocido: {s}")),
        }
    }
}

#[derive(Debug, Queryable, Identifiable, Serialize, Clone)]
#[diesel(table_name = notificaciones)]
pub struct Notificacion {
    pub id: Uuid,
    #[serde(rename = "usuario")]
    pub usuario_id: Uuid,
    pub mensaje: String,
    pub leido: bool,
    pub tipo: String,
    #[serde(rename = "createdAt")]
    pub created_at: DateTime<Utc>,
}

impl Notificacion {
    pub fn is_owned_by(&self, usuario_id: Uuid) -> bool {
        self.usuario_id == usuario_id
    }
}

#[derive(Debug, Insertable)]
#[diesel(table_name = notificaciones)]
pub struct NewNotificacion {
    pub id: Uuid,
    pub usuario_id: Uuid,
    pub mensaje: String,
    pub tipo: String,
}
