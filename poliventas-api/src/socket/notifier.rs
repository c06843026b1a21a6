use socketioxide::SocketIo;
use uuid::Uuid;

use crate::models::Notificacion;

/// Event carrying a freshly persisted notification to its owner.
pub const NOTIFICATION_EVENT: &str = "nueva_notificacion";

pub fn user_room(usuario_id: Uuid) -> String {
    format!("usuario:{usuario_id}")
}

#[derive(Debug, thiserror::Error)]
#[error("real-time push failed: {0}")]
pub struct PushError(pub String);

/// Real-time delivery of notifications. Callers treat every push as best
/// effort: an `Err` is logged and never fails the request that produced it.
pub trait Notifier: Send + Sync {
    fn push(&self, notificacion: &Notificacion) -> Result<(), PushError>;
}

/// Emits into the owner's Socket.IO room.
pub struct SocketNotifier {
    io: SocketIo,
}

impl SocketNotifier {
    pub fn new(io: SocketIo) -> Self {
        Self { io }
    }
}

impl Notifier for SocketNotifier {
    fn push(&self, notificacion: &Notificacion) -> Result<(), PushError> {
        self.io
            .to(user_room(notificacion.usuario_id))
            .emit(NOTIFICATION_EVENT, notificacion)
            .map_err(|e| PushError(e.to_string()))
    }
}

#[cfg(test)]
pub mod testing {
    use std::sync::Mutex;

    use super::*;

    /// Records pushes; can be switched to fail every push.
    #[derive(Default)]
    pub struct RecordingNotifier {
        pub pushed: Mutex<Vec<Notificacion>>,
        pub fail: bool,
    }

    impl RecordingNotifier {
        pub fn failing() -> Self {
            Self {
                pushed: Mutex::new(Vec::new()),
                fail: true,
            }
        }

        pub fn pushed_to(&self, usuario_id: Uuid) -> Vec<Notificacion> {
            self.pushed
                .lock()
                .unwrap()
                .iter()
                .filter(|n| n.usuario_id == usuario_id)
                .cloned()
                .collect()
        }
    }

    impl Notifier for RecordingNotifier {
        fn push(&self, notificacion: &Notificacion) -> Result<(), PushError> {
            if self.fail {
                return Err(PushError("socket layer unavailable".into()));
            }
            self.pushed.lock().unwrap().push(notificacion.clone());
            Ok(())
        }
    }
}
