use axum::{
    routing::get,
    Router,
};
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::sync::Mutex;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use crate::storage::SqliteStore;

pub mod routes;

/// Server state
pub struct AppState {
    pub store: Mutex<SqliteStore>,
}

/// Read-only API over the loaded records
pub fn router(store: SqliteStore) -> Router {
    let state = Arc::new(AppState {
        store: Mutex::new(store),
    });

    Router::new()
        .route("/stats", get(routes::get_stats))
        .route("/authors/{id}", get(routes::get_author))
        .route("/books/{id}", get(routes::get_book))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}

pub async fn start_server(port: u16, store: SqliteStore) -> anyhow::Result<()> {
    let app = router(store);

    let addr = SocketAddr::from(([0, 0, 0, 0], port));
    tracing::info!("Starting server on {}", addr);
    println!("🌍 Server running at http://{}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
