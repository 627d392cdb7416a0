use std::net::SocketAddr;

use axum::Router;
use configs::{AppConfig, ServerConfig};
use tower_http::cors::CorsLayer;
use tracing::info;

use crate::errors::StartupError;
use crate::routes::{self, AppState};
use service::{runtime, storage, ServiceContext};

fn build_cors() -> CorsLayer {
    CorsLayer::very_permissive()
}

fn bind_addr(server: &ServerConfig) -> Result<SocketAddr, StartupError> {
    format!("{}:{}", server.host, server.port)
        .parse()
        .map_err(|e| StartupError::InvalidConfig(format!("{}:{}: {}", server.host, server.port, e)))
}

/// Router over the given services with CORS and request tracing.
pub fn build_app(services: ServiceContext) -> Router {
    routes::build_router(AppState { services }, build_cors())
}

/// Public entry: connect the store, build the app and run the HTTP server
pub async fn run(cfg: AppConfig) -> anyhow::Result<()> {
    runtime::ensure_env(&cfg.store).await?;

    let store = storage::connect(&cfg.store)
        .await
        .map_err(|e| StartupError::Store(e.to_string()))?;
    let services = ServiceContext::new(store, cfg.store.id_strategy);
    let app = build_app(services);

    let addr = bind_addr(&cfg.server)?;
    info!(%addr, backend = ?cfg.store.backend, id_strategy = ?cfg.store.id_strategy, "starting project board server");
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bind_addr_rejects_unparseable_host() {
        let bad = ServerConfig { host: "not a host".into(), ..ServerConfig::default() };
        assert!(matches!(bind_addr(&bad), Err(StartupError::InvalidConfig(_))));
        let ok = ServerConfig::default();
        assert_eq!(bind_addr(&ok).unwrap().port(), 8080);
    }
}
