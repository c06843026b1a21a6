use std::sync::Arc;

use axum::http::{header, HeaderValue, Method};
use socketioxide::SocketIo;
use tower_http::cors::{AllowHeaders, AllowMethods, CorsLayer};
use tower_http::trace::TraceLayer;

use poliventas_api::config::AppConfig;
use poliventas_api::repositories::PgStore;
use poliventas_api::socket::{handlers, SocketNotifier};
use poliventas_api::{api_routes, AppState};
use poliventas_shared::clients::db::create_pool;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    poliventas_shared::middleware::init_tracing("poliventas-api");

    let config = AppConfig::load()?;
    let port = config.port;

    // Set JWT_SECRET env var for the auth extractor middleware
    std::env::set_var("JWT_SECRET", &config.jwt_secret);

    let pool = create_pool(&config.database_url, config.database_pool_size)?;
    let store = Arc::new(PgStore::new(pool));

    let metrics_handle = poliventas_shared::middleware::init_metrics()?;

    // REST handlers push notifications through the same io handle
    let (sio_layer, io) = SocketIo::builder().build_layer();

    let cors = CorsLayer::new()
        .allow_origin(config.frontend_url.parse::<HeaderValue>()?)
        .allow_methods(AllowMethods::list([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::PATCH,
            Method::DELETE,
            Method::OPTIONS,
        ]))
        .allow_headers(AllowHeaders::list([
            header::AUTHORIZATION,
            header::CONTENT_TYPE,
            header::ACCEPT,
        ]))
        .allow_credentials(true);

    let state = Arc::new(AppState {
        config,
        users: store.clone(),
        quejas: store.clone(),
        notifications: store.clone(),
        notifier: Arc::new(SocketNotifier::new(io.clone())),
        health: store,
        metrics_handle,
    });

    io.ns("/", {
        let state = state.clone();
        move |socket: socketioxide::extract::SocketRef| {
            let state = state.clone();
            async move {
                handlers::on_connect_with_state(socket, state).await;
            }
        }
    });

    let app = api_routes(state)
        .layer(sio_layer)
        .layer(cors)
        .layer(TraceLayer::new_for_http());

    let addr = format!("0.0.0.0:{port}");
    tracing::info!(addr = %addr, "poliventas-api starting");

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
