pub mod handlers;
pub mod notifier;

pub use notifier::{Notifier, PushError, SocketNotifier};
