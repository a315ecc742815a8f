use std::{future::Future, sync::Arc};

use axum::Router;
use configs::{AppConfig, StorageBackend};
use migration::{Migrator, MigratorTrait};
use service::cake::{
    repo::SeaOrmCakeRepository,
    repository::{memory::InMemoryCakeRepository, CakeRepository},
};
use tokio::net::TcpListener;
use tower_http::cors::CorsLayer;
use tracing::{info, warn};

use crate::{errors::StartupError, routes, state::ServerState};

fn build_cors() -> CorsLayer {
    CorsLayer::very_permissive()
}

/// App config from `config.toml` or the environment, normalized and validated.
pub fn load_config() -> Result<AppConfig, StartupError> {
    AppConfig::load().map_err(|e| StartupError::InvalidConfig(e.to_string()))
}

/// Pick the repository for the configured backend. Postgres is migrated before use.
pub async fn build_repository(cfg: &AppConfig) -> Result<Arc<dyn CakeRepository>, StartupError> {
    match cfg.storage.backend {
        StorageBackend::Memory => {
            warn!("using in-memory cake storage; data is lost on restart");
            Ok(Arc::new(InMemoryCakeRepository::default()))
        }
        StorageBackend::Postgres => {
            let db = models::db::connect_with_config(&cfg.database).await?;
            Migrator::up(&db, None).await.map_err(anyhow::Error::from)?;
            info!("cake schema up to date");
            Ok(Arc::new(SeaOrmCakeRepository::new(db)))
        }
    }
}

/// Resolves on Ctrl+C. A failing signal handler never resolves, so the server keeps running.
pub async fn shutdown_signal() {
    match tokio::signal::ctrl_c().await {
        Ok(()) => info!(event = "shutdown_signal", "received Ctrl+C, draining connections"),
        Err(e) => {
            warn!(error = %e, "cannot listen for Ctrl+C");
            std::future::pending::<()>().await
        }
    }
}

/// Build the app and serve until `shutdown` resolves; in-flight requests finish first.
pub async fn run<F>(cfg: AppConfig, shutdown: F) -> anyhow::Result<()>
where
    F: Future<Output = ()> + Send + 'static,
{
    let repo = build_repository(&cfg).await?;
    let app: Router = routes::build_router(ServerState::new(repo), build_cors());

    // host 可以是 IP 或主机名
    let host = cfg.server.host.as_str();
    let listener = TcpListener::bind((host, cfg.server.port))
        .await
        .map_err(|source| StartupError::Bind { addr: format!("{host}:{}", cfg.server.port), source })?;
    info!(addr = %listener.local_addr()?, backend = ?cfg.storage.backend, "starting cake api");

    axum::serve(listener, app).with_graceful_shutdown(shutdown).await?;
    info!("cake api stopped");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    fn memory_config(host: &str) -> AppConfig {
        // port 0 lets the OS pick a free port
        configs::parse(&format!("[server]\nhost = \"{host}\"\nport = 0\n[storage]\nbackend = \"memory\"")).unwrap()
    }

    #[tokio::test]
    async fn memory_backend_needs_no_database() {
        let cfg = configs::parse("[storage]\nbackend = \"memory\"").unwrap();
        let repo = build_repository(&cfg).await.unwrap();
        assert!(repo.find_all().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn run_returns_once_shutdown_resolves() {
        let (tx, rx) = tokio::sync::oneshot::channel::<()>();
        let server = tokio::spawn(run(memory_config("127.0.0.1"), async move {
            let _ = rx.await;
        }));
        tx.send(()).unwrap();
        let res = tokio::time::timeout(Duration::from_secs(5), server).await.unwrap().unwrap();
        assert!(res.is_ok());
    }

    #[tokio::test]
    async fn run_binds_hostnames() {
        let res = tokio::time::timeout(Duration::from_secs(5), run(memory_config("localhost"), async {}))
            .await
            .unwrap();
        assert!(res.is_ok());
    }
}
