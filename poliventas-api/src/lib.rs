use std::sync::Arc;

use axum::routing::{delete, get, patch, post, put};
use axum::{middleware, Router};
use metrics_exporter_prometheus::PrometheusHandle;

use poliventas_shared::middleware::metrics_middleware;

pub mod config;
pub mod messages;
pub mod models;
pub mod repositories;
pub mod routes;
pub mod schema;
pub mod services;
pub mod socket;

use config::AppConfig;
use repositories::{HealthProbe, NotificationStore, QuejaStore, UserStore};
use socket::Notifier;

pub struct AppState {
    pub config: AppConfig,
    pub users: Arc<dyn UserStore>,
    pub quejas: Arc<dyn QuejaStore>,
    pub notifications: Arc<dyn NotificationStore>,
    pub notifier: Arc<dyn Notifier>,
    pub health: Arc<dyn HealthProbe>,
    pub metrics_handle: PrometheusHandle,
}

/// Every HTTP route of the service. Transport layers (Socket.IO, CORS,
/// tracing) are added by `main`.
pub fn api_routes(state: Arc<AppState>) -> Router {
    use routes::{admin, auth, health, notifications, quejas};

    Router::new()
        // Health
        .route("/health", get(health::health_check))
        .route("/metrics", get(health::metrics))
        // Accounts
        .route("/auth/registro", post(auth::register))
        .route("/auth/login", post(auth::login))
        .route("/auth/perfil", get(auth::profile).put(auth::update_profile))
        // Quejas y sugerencias
        .route("/quejas", post(quejas::create))
        .route("/quejas/mias", get(quejas::list_own))
        .route(
            "/quejas/:id",
            get(quejas::get_one).put(quejas::update).delete(quejas::delete),
        )
        // Notificaciones
        .route(
            "/notificaciones",
            get(notifications::list).delete(notifications::delete_all),
        )
        .route("/notificaciones/no-leidas", get(notifications::unread_count))
        .route("/notificaciones/leidas", patch(notifications::mark_all_read))
        .route("/notificaciones/:id", delete(notifications::delete))
        .route("/notificaciones/:id/leida", patch(notifications::mark_read))
        // Admin
        .route("/admin/quejas", get(admin::list_quejas))
        .route("/admin/quejas/:id", delete(admin::delete_queja))
        .route("/admin/quejas/:id/responder", put(admin::respond_queja))
        .route("/admin/notificaciones", post(admin::send_notification))
        .route_layer(middleware::from_fn(metrics_middleware))
        .with_state(state)
}
