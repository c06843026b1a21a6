//! User-facing response messages. The SPA matches on several of these.

pub const ID_INVALIDO: &str = "ID inválido";
pub const SIN_REGISTROS: &str = "No se encontraron registros";
pub const SIN_QUEJAS: &str = "No hay quejas o sugerencias registradas";
pub const USUARIO_NO_ENCONTRADO: &str = "Usuario no encontrado";

// Quejas
pub const QUEJA_ENVIADA: &str = "Queja o sugerencia enviada correctamente";
pub const QUEJA_NO_ENCONTRADA: &str = "Queja o sugerencia no encontrada";
pub const QUEJA_SIN_PERMISO: &str = "No tienes permiso para acceder a esta queja o sugerencia";
pub const QUEJA_ACTUALIZADA: &str = "Queja o sugerencia actualizada correctamente";
pub const QUEJA_NO_EDITABLE: &str =
    "No puedes editar una queja o sugerencia que ya ha sido respondida";
pub const QUEJA_ELIMINADA: &str = "Queja o sugerencia eliminada correctamente";
pub const QUEJA_NO_ELIMINABLE: &str =
    "No puedes eliminar una queja o sugerencia que ya ha sido respondida";
pub const QUEJA_SOLO_RESUELTAS: &str = "Solo se pueden eliminar quejas o sugerencias resueltas";
pub const QUEJA_YA_RESPONDIDA: &str = "Esta queja o sugerencia ya fue respondida";
pub const RESPUESTA_ENVIADA: &str = "Respuesta enviada correctamente";
pub const QUEJAS_OBTENIDAS: &str = "Quejas y sugerencias obtenidas correctamente";
pub const QUEJA_OBTENIDA: &str = "Queja o sugerencia obtenida correctamente";

// Notificaciones
pub const NOTIFICACION_NO_ENCONTRADA: &str = "Notificación no encontrada";
pub const NOTIFICACION_SIN_PERMISO: &str = "No tienes permiso para modificar esta notificación";
pub const NOTIFICACION_LEIDA: &str = "Notificación marcada como leída";
pub const NOTIFICACIONES_LEIDAS: &str = "Notificaciones marcadas como leídas";
pub const NOTIFICACION_ELIMINADA: &str = "Notificación eliminada correctamente";
pub const NOTIFICACIONES_ELIMINADAS: &str = "Notificaciones eliminadas correctamente";
pub const NOTIFICACIONES_OBTENIDAS: &str = "Notificaciones obtenidas correctamente";
pub const NOTIFICACION_ENVIADA: &str = "Notificación enviada correctamente";
pub const NO_LEIDAS: &str = "Notificaciones no leídas";

// Cuentas
pub const REGISTRO_EXITOSO: &str = "Usuario registrado correctamente";
pub const LOGIN_EXITOSO: &str = "Inicio de sesión exitoso";
pub const CREDENCIALES_INCORRECTAS: &str = "Credenciales incorrectas";
pub const EMAIL_REGISTRADO: &str = "El correo ya está registrado";
pub const PERFIL_OBTENIDO: &str = "Perfil obtenido correctamente";
pub const PERFIL_ACTUALIZADO: &str = "Perfil actualizado correctamente";
