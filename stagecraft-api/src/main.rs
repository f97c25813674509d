use std::net::SocketAddr;
use std::sync::Arc;

use stagecraft_api::{app, AppState};
use stagecraft_store::{
    Config, DbClient, EventBus, PostgresContactRepository, PostgresGalleryStore,
    PostgresInventoryRepository,
};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "stagecraft_api=debug,tower_http=debug,axum::rejection=trace".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = Config::load().expect("Failed to load config");
    tracing::info!("Starting Stagecraft API on port {}", config.server.port);

    let db = DbClient::new(&config.database.url, config.database.max_connections)
        .await
        .expect("Failed to connect to Postgres");
    db.migrate().await.expect("Failed to run migrations");

    let state = AppState {
        inventory_repo: Arc::new(PostgresInventoryRepository::new(db.pool.clone())),
        gallery_store: Arc::new(PostgresGalleryStore::new(db.pool.clone())),
        contact_repo: Arc::new(PostgresContactRepository::new(db.pool.clone())),
        events: EventBus::new(config.events.capacity),
    };

    let app = app(state);

    let addr = SocketAddr::from(([0, 0, 0, 0], config.server.port));
    tracing::info!("Listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await.unwrap();
    axum::serve(listener, app).await.unwrap();
}
