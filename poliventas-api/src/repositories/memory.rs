use std::sync::Mutex;

use chrono::Utc;
use uuid::Uuid;

use poliventas_shared::errors::AppResult;

use crate::models::{
    NewNotificacion, NewQueja, NewUsuario, Notificacion, PerfilChangeset, Queja, QuejaEstado,
    Usuario,
};

use super::{HealthProbe, NotificationStore, QuejaStore, UserStore};

/// Vec-backed stores with the same observable semantics as `PgStore`.
#[derive(Default)]
pub struct MemoryStore {
    usuarios: Mutex<Vec<Usuario>>,
    quejas: Mutex<Vec<Queja>>,
    notificaciones: Mutex<Vec<Notificacion>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn notificaciones_de(&self, usuario_id: Uuid) -> Vec<Notificacion> {
        self.notificaciones
            .lock()
            .unwrap()
            .iter()
            .filter(|n| n.usuario_id == usuario_id)
            .cloned()
            .collect()
    }
}

/// Same order as `ORDER BY created_at DESC, id DESC`; v7 ids break ties.
fn newest_first<T, F>(items: &mut [T], key: F)
where
    F: Fn(&T) -> (chrono::DateTime<Utc>, Uuid),
{
    items.sort_by_key(|item| std::cmp::Reverse(key(item)));
}

impl HealthProbe for MemoryStore {
    fn ping(&self) -> anyhow::Result<()> {
        Ok(())
    }
}

impl UserStore for MemoryStore {
    fn insert(&self, new: NewUsuario) -> AppResult<Usuario> {
        let usuario = Usuario {
            id: new.id,
            nombre: new.nombre,
            apellido: new.apellido,
            telefono: new.telefono,
            direccion: new.direccion,
            email: new.email,
            password_hash: new.password_hash,
            rol: new.rol,
            created_at: Utc::now(),
        };
        self.usuarios.lock().unwrap().push(usuario.clone());
        Ok(usuario)
    }

    fn find(&self, id: Uuid) -> AppResult<Option<Usuario>> {
        Ok(self.usuarios.lock().unwrap().iter().find(|u| u.id == id).cloned())
    }

    fn find_many(&self, ids: &[Uuid]) -> AppResult<Vec<Usuario>> {
        Ok(self
            .usuarios
            .lock()
            .unwrap()
            .iter()
            .filter(|u| ids.contains(&u.id))
            .cloned()
            .collect())
    }

    fn find_by_email(&self, email: &str) -> AppResult<Option<Usuario>> {
        Ok(self.usuarios.lock().unwrap().iter().find(|u| u.email == email).cloned())
    }

    fn find_first_admin(&self) -> AppResult<Option<Usuario>> {
        Ok(self
            .usuarios
            .lock()
            .unwrap()
            .iter()
            .filter(|u| u.rol == "admin")
            .min_by_key(|u| u.created_at)
            .cloned())
    }

    fn update_profile(&self, id: Uuid, changes: PerfilChangeset) -> AppResult<Usuario> {
        let mut usuarios = self.usuarios.lock().unwrap();
        let usuario = usuarios
            .iter_mut()
            .find(|u| u.id == id)
            .ok_or(diesel::result::Error::NotFound)?;
        if let Some(nombre) = changes.nombre {
            usuario.nombre = nombre;
        }
        if let Some(apellido) = changes.apellido {
            usuario.apellido = apellido;
        }
        if let Some(telefono) = changes.telefono {
            usuario.telefono = Some(telefono);
        }
        if let Some(direccion) = changes.direccion {
            usuario.direccion = Some(direccion);
        }
        Ok(usuario.clone())
    }
}

impl QuejaStore for MemoryStore {
    fn insert(&self, new: NewQueja) -> AppResult<Queja> {
        let now = Utc::now();
        let queja = Queja {
            id: new.id,
            usuario_id: new.usuario_id,
            tipo: new.tipo,
            mensaje: new.mensaje,
            respuesta: None,
            estado: new.estado,
            created_at: now,
            updated_at: now,
        };
        self.quejas.lock().unwrap().push(queja.clone());
        Ok(queja)
    }

    fn find(&self, id: Uuid) -> AppResult<Option<Queja>> {
        Ok(self.quejas.lock().unwrap().iter().find(|q| q.id == id).cloned())
    }

    fn list_by_owner(&self, usuario_id: Uuid) -> AppResult<Vec<Queja>> {
        let mut items: Vec<Queja> = self
            .quejas
            .lock()
            .unwrap()
            .iter()
            .filter(|q| q.usuario_id == usuario_id)
            .cloned()
            .collect();
        newest_first(&mut items, |q| (q.created_at, q.id));
        Ok(items)
    }

    fn list(&self, estado: Option<QuejaEstado>) -> AppResult<Vec<Queja>> {
        let mut items: Vec<Queja> = self
            .quejas
            .lock()
            .unwrap()
            .iter()
            .filter(|q| estado.map_or(true, |e| q.estado == e.as_str()))
            .cloned()
            .collect();
        newest_first(&mut items, |q| (q.created_at, q.id));
        Ok(items)
    }

    fn update_mensaje(&self, id: Uuid, mensaje: &str) -> AppResult<Option<Queja>> {
        let mut quejas = self.quejas.lock().unwrap();
        Ok(quejas
            .iter_mut()
            .find(|q| q.id == id && !q.is_resolved())
            .map(|q| {
                q.mensaje = mensaje.to_string();
                q.updated_at = Utc::now();
                q.clone()
            }))
    }

    fn resolve(&self, id: Uuid, respuesta: &str) -> AppResult<Option<Queja>> {
        let mut quejas = self.quejas.lock().unwrap();
        Ok(quejas
            .iter_mut()
            .find(|q| q.id == id && !q.is_resolved())
            .map(|q| {
                q.respuesta = Some(respuesta.to_string());
                q.estado = QuejaEstado::Resuelto.as_str().to_string();
                q.updated_at = Utc::now();
                q.clone()
            }))
    }

    fn delete(&self, id: Uuid, estado: QuejaEstado) -> AppResult<bool> {
        let mut quejas = self.quejas.lock().unwrap();
        let before = quejas.len();
        quejas.retain(|q| !(q.id == id && q.estado == estado.as_str()));
        Ok(quejas.len() < before)
    }
}

impl NotificationStore for MemoryStore {
    fn insert(&self, new: NewNotificacion) -> AppResult<Notificacion> {
        let notificacion = Notificacion {
            id: new.id,
            usuario_id: new.usuario_id,
            mensaje: new.mensaje,
            leido: false,
            tipo: new.tipo,
            created_at: Utc::now(),
        };
        self.notificaciones.lock().unwrap().push(notificacion.clone());
        Ok(notificacion)
    }

    fn find(&self, id: Uuid) -> AppResult<Option<Notificacion>> {
        Ok(self.notificaciones.lock().unwrap().iter().find(|n| n.id == id).cloned())
    }

    fn list_by_owner(&self, usuario_id: Uuid) -> AppResult<Vec<Notificacion>> {
        let mut items = self.notificaciones_de(usuario_id);
        newest_first(&mut items, |n| (n.created_at, n.id));
        Ok(items)
    }

    fn count_unread(&self, usuario_id: Uuid) -> AppResult<i64> {
        Ok(self
            .notificaciones
            .lock()
            .unwrap()
            .iter()
            .filter(|n| n.usuario_id == usuario_id && !n.leido)
            .count() as i64)
    }

    fn mark_read(&self, id: Uuid) -> AppResult<Option<Notificacion>> {
        let mut notificaciones = self.notificaciones.lock().unwrap();
        Ok(notificaciones.iter_mut().find(|n| n.id == id).map(|n| {
            n.leido = true;
            n.clone()
        }))
    }

    fn mark_all_read(&self, usuario_id: Uuid) -> AppResult<usize> {
        let mut notificaciones = self.notificaciones.lock().unwrap();
        let mut updated = 0;
        for n in notificaciones
            .iter_mut()
            .filter(|n| n.usuario_id == usuario_id && !n.leido)
        {
            n.leido = true;
            updated += 1;
        }
        Ok(updated)
    }

    fn delete(&self, id: Uuid) -> AppResult<bool> {
        let mut notificaciones = self.notificaciones.lock().unwrap();
        let before = notificaciones.len();
        notificaciones.retain(|n| n.id != id);
        Ok(notificaciones.len() < before)
    }

    fn delete_all(&self, usuario_id: Uuid) -> AppResult<usize> {
        let mut notificaciones = self.notificaciones.lock().unwrap();
        let before = notificaciones.len();
        notificaciones.retain(|n| n.usuario_id != usuario_id);
        Ok(before - notificaciones.len())
    }
}
