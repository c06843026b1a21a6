//! Storage seams. Each trait covers one table; handlers never touch diesel
//! directly so services can be exercised against `memory::MemoryStore`.

use uuid::Uuid;

use poliventas_shared::errors::AppResult;

use crate::models::{
    NewNotificacion, NewQueja, NewUsuario, Notificacion, PerfilChangeset, Queja, QuejaEstado,
    Usuario,
};

pub mod postgres;

#[cfg(test)]
pub mod memory;

pub use postgres::PgStore;

pub trait UserStore: Send + Sync {
    fn insert(&self, new: NewUsuario) -> AppResult<Usuario>;
    fn find(&self, id: Uuid) -> AppResult<Option<Usuario>>;
    fn find_many(&self, ids: &[Uuid]) -> AppResult<Vec<Usuario>>;
    fn find_by_email(&self, email: &str) -> AppResult<Option<Usuario>>;
    /// Oldest admin account, if any exists.
    fn find_first_admin(&self) -> AppResult<Option<Usuario>>;
    fn update_profile(&self, id: Uuid, changes: PerfilChangeset) -> AppResult<Usuario>;
}

pub trait QuejaStore: Send + Sync {
    fn insert(&self, new: NewQueja) -> AppResult<Queja>;
    fn find(&self, id: Uuid) -> AppResult<Option<Queja>>;
    /// Newest first.
    fn list_by_owner(&self, usuario_id: Uuid) -> AppResult<Vec<Queja>>;
    /// Newest first, optionally restricted to one estado.
    fn list(&self, estado: Option<QuejaEstado>) -> AppResult<Vec<Queja>>;
    fn update_mensaje(&self, id: Uuid, mensaje: &str) -> AppResult<Option<Queja>>;
    /// Writes `respuesta` and flips the estado to resuelto in one statement.
    /// Returns `None` when the row is missing or no longer pendiente.
    fn resolve(&self, id: Uuid, respuesta: &str) -> AppResult<Option<Queja>>;
    /// Deletes the row only while it is still in `estado`.
    fn delete(&self, id: Uuid, estado: QuejaEstado) -> AppResult<bool>;
}

pub trait NotificationStore: Send + Sync {
    fn insert(&self, new: NewNotificacion) -> AppResult<Notificacion>;
    fn find(&self, id: Uuid) -> AppResult<Option<Notificacion>>;
    /// Newest first.
    fn list_by_owner(&self, usuario_id: Uuid) -> AppResult<Vec<Notificacion>>;
    fn count_unread(&self, usuario_id: Uuid) -> AppResult<i64>;
    fn mark_read(&self, id: Uuid) -> AppResult<Option<Notificacion>>;
    fn mark_all_read(&self, usuario_id: Uuid) -> AppResult<usize>;
    fn delete(&self, id: Uuid) -> AppResult<bool>;
    fn delete_all(&self, usuario_id: Uuid) -> AppResult<usize>;
}

pub trait HealthProbe: Send + Sync {
    fn ping(&self) -> anyhow::Result<()>;
}
