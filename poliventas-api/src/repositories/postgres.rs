use chrono::Utc;
use diesel::pg::PgConnection;
use diesel::prelude::*;
use diesel::r2d2::{ConnectionManager, PooledConnection};
use uuid::Uuid;

use poliventas_shared::clients::db::{self, DbPool};
use poliventas_shared::errors::AppResult;

use crate::models::{
    NewNotificacion, NewQueja, NewUsuario, Notificacion, PerfilChangeset, Queja, QuejaEstado,
    Usuario,
};
use crate::schema::{notificaciones, quejas, usuarios};

use super::{HealthProbe, NotificationStore, QuejaStore, UserStore};

type PgConn = PooledConnection<ConnectionManager<PgConnection>>;

/// PostgreSQL-backed implementation of every store trait.
#[derive(Clone)]
pub struct PgStore {
    pool: DbPool,
}

impl PgStore {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    fn conn(&self) -> AppResult<PgConn> {
        Ok(self.pool.get()?)
    }
}

impl HealthProbe for PgStore {
    fn ping(&self) -> anyhow::Result<()> {
        db::ping(&self.pool)
    }
}

impl UserStore for PgStore {
    fn insert(&self, new: NewUsuario) -> AppResult<Usuario> {
        let mut conn = self.conn()?;
        let usuario = diesel::insert_into(usuarios::table)
            .values(&new)
            .get_result::<Usuario>(&mut conn)?;
        Ok(usuario)
    }

    fn find(&self, id: Uuid) -> AppResult<Option<Usuario>> {
        let mut conn = self.conn()?;
        let usuario = usuarios::table
            .find(id)
            .first::<Usuario>(&mut conn)
            .optional()?;
        Ok(usuario)
    }

    fn find_many(&self, ids: &[Uuid]) -> AppResult<Vec<Usuario>> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }
        let mut conn = self.conn()?;
        let items = usuarios::table
            .filter(usuarios::id.eq_any(ids.to_vec()))
            .load::<Usuario>(&mut conn)?;
        Ok(items)
    }

    fn find_by_email(&self, email: &str) -> AppResult<Option<Usuario>> {
        let mut conn = self.conn()?;
        let usuario = usuarios::table
            .filter(usuarios::email.eq(email))
            .first::<Usuario>(&mut conn)
            .optional()?;
        Ok(usuario)
    }

    fn find_first_admin(&self) -> AppResult<Option<Usuario>> {
        let mut conn = self.conn()?;
        let usuario = usuarios::table
            .filter(usuarios::rol.eq("admin"))
            .order(usuarios::created_at.asc())
            .first::<Usuario>(&mut conn)
            .optional()?;
        Ok(usuario)
    }

    fn update_profile(&self, id: Uuid, changes: PerfilChangeset) -> AppResult<Usuario> {
        let mut conn = self.conn()?;
        let usuario = diesel::update(usuarios::table.find(id))
            .set(&changes)
            .get_result::<Usuario>(&mut conn)?;
        Ok(usuario)
    }
}

impl QuejaStore for PgStore {
    fn insert(&self, new: NewQueja) -> AppResult<Queja> {
        let mut conn = self.conn()?;
        let queja = diesel::insert_into(quejas::table)
            .values(&new)
            .get_result::<Queja>(&mut conn)?;
        Ok(queja)
    }

    fn find(&self, id: Uuid) -> AppResult<Option<Queja>> {
        let mut conn = self.conn()?;
        let queja = quejas::table
            .find(id)
            .first::<Queja>(&mut conn)
            .optional()?;
        Ok(queja)
    }

    fn list_by_owner(&self, usuario_id: Uuid) -> AppResult<Vec<Queja>> {
        let mut conn = self.conn()?;
        let items = quejas::table
            .filter(quejas::usuario_id.eq(usuario_id))
            .order((quejas::created_at.desc(), quejas::id.desc()))
            .load::<Queja>(&mut conn)?;
        Ok(items)
    }

    fn list(&self, estado: Option<QuejaEstado>) -> AppResult<Vec<Queja>> {
        let mut conn = self.conn()?;
        let mut query = quejas::table
            .order((quejas::created_at.desc(), quejas::id.desc()))
            .into_boxed();
        if let Some(estado) = estado {
            query = query.filter(quejas::estado.eq(estado.as_str()));
        }
        let items = query.load::<Queja>(&mut conn)?;
        Ok(items)
    }

    fn update_mensaje(&self, id: Uuid, mensaje: &str) -> AppResult<Option<Queja>> {
        let mut conn = self.conn()?;
        let queja = diesel::update(
            quejas::table
                .filter(quejas::id.eq(id))
                .filter(quejas::estado.eq(QuejaEstado::Pendiente.as_str())),
        )
        .set((
            quejas::mensaje.eq(mensaje),
            quejas::updated_at.eq(Utc::now()),
        ))
        .get_result::<Queja>(&mut conn)
        .optional()?;
        Ok(queja)
    }

    fn resolve(&self, id: Uuid, respuesta: &str) -> AppResult<Option<Queja>> {
        let mut conn = self.conn()?;
        let queja = diesel::update(
            quejas::table
                .filter(quejas::id.eq(id))
                .filter(quejas::estado.eq(QuejaEstado::Pendiente.as_str())),
        )
        .set((
            quejas::respuesta.eq(Some(respuesta)),
            quejas::estado.eq(QuejaEstado::Resuelto.as_str()),
            quejas::updated_at.eq(Utc::now()),
        ))
        .get_result::<Queja>(&mut conn)
        .optional()?;
        Ok(queja)
    }

    fn delete(&self, id: Uuid, estado: QuejaEstado) -> AppResult<bool> {
        let mut conn = self.conn()?;
        let deleted = diesel::delete(
            quejas::table
                .filter(quejas::id.eq(id))
                .filter(quejas::estado.eq(estado.as_str())),
        )
        .execute(&mut conn)?;
        Ok(deleted > 0)
    }
}

impl NotificationStore for PgStore {
    fn insert(&self, new: NewNotificacion) -> AppResult<Notificacion> {
        let mut conn = self.conn()?;
        let notificacion = diesel::insert_into(notificaciones::table)
            .values(&new)
            .get_result::<Notificacion>(&mut conn)?;
        Ok(notificacion)
    }

    fn find(&self, id: Uuid) -> AppResult<Option<Notificacion>> {
        let mut conn = self.conn()?;
        let notificacion = notificaciones::table
            .find(id)
            .first::<Notificacion>(&mut conn)
            .optional()?;
        Ok(notificacion)
    }

    fn list_by_owner(&self, usuario_id: Uuid) -> AppResult<Vec<Notificacion>> {
        let mut conn = self.conn()?;
        let items = notificaciones::table
            .filter(notificaciones::usuario_id.eq(usuario_id))
            .order((notificaciones::created_at.desc(), notificaciones::id.desc()))
            .load::<Notificacion>(&mut conn)?;
        Ok(items)
    }

    fn count_unread(&self, usuario_id: Uuid) -> AppResult<i64> {
        let mut conn = self.conn()?;
        let count: i64 = notificaciones::table
            .filter(notificaciones::usuario_id.eq(usuario_id))
            .filter(notificaciones::leido.eq(false))
            .count()
            .get_result(&mut conn)?;
        Ok(count)
    }

    fn mark_read(&self, id: Uuid) -> AppResult<Option<Notificacion>> {
        let mut conn = self.conn()?;
        let notificacion = diesel::update(notificaciones::table.find(id))
            .set(notificaciones::leido.eq(true))
            .get_result::<Notificacion>(&mut conn)
            .optional()?;
        Ok(notificacion)
    }

    fn mark_all_read(&self, usuario_id: Uuid) -> AppResult<usize> {
        let mut conn = self.conn()?;
        let updated = diesel::update(
            notificaciones::table
                .filter(notificaciones::usuario_id.eq(usuario_id))
                .filter(notificaciones::leido.eq(false)),
        )
        .set(notificaciones::leido.eq(true))
        .execute(&mut conn)?;
        Ok(updated)
    }

    fn delete(&self, id: Uuid) -> AppResult<bool> {
        let mut conn = self.conn()?;
        let deleted = diesel::delete(notificaciones::table.find(id)).execute(&mut conn)?;
        Ok(deleted > 0)
    }

    fn delete_all(&self, usuario_id: Uuid) -> AppResult<usize> {
        let mut conn = self.conn()?;
        let deleted = diesel::delete(
            notificaciones::table.filter(notificaciones::usuario_id.eq(usuario_id)),
        )
        .execute(&mut conn)?;
        Ok(deleted)
    }
}
