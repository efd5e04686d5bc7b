use std::net::SocketAddr;
use std::sync::Arc;

use tracing_subscriber::EnvFilter;

use todo_api::db::DynamoStore;
use todo_api::metrics::Metrics;
use todo_api::router;
use todo_api::state::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .json()
        .init();

    let table_name = std::env::var("TABLE_NAME").unwrap_or_else(|_| "todo-db".to_string());
    let port: u16 = std::env::var("PORT")
        .ok()
        .and_then(|p| p.parse().ok())
        .unwrap_or(3000);

    let store = match DynamoStore::connect(&table_name).await {
        Ok(store) => store,
        Err(e) => {
            tracing::error!(error = %e, table = %table_name, "failed to connect to database");
            return Err(e.into());
        }
    };

    let metrics = Metrics::new()?;
    let state = AppState::new(Arc::new(store), metrics);
    let app = router::build_router(state);

    let addr = SocketAddr::from(([0, 0, 0, 0], port));
    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!(%addr, "todo-api listening");

    axum::serve(listener, app).await?;

    Ok(())
}
