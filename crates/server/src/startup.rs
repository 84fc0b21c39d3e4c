use std::net::SocketAddr;

use axum::http::{header, HeaderValue, Method};
use tower_http::cors::{AllowOrigin, CorsLayer};
use tracing::info;

use configs::{AppConfig, ServerConfig};
use models::db::{connect_and_migrate, DatabaseConfig};

use crate::errors::StartupError;
use crate::routes;
use crate::state::AppState;

/// Allow only the configured frontend origin. Other origins get no `Access-Control-Allow-Origin`.
pub fn build_cors(origin: &str) -> Result<CorsLayer, StartupError> {
    let origin = HeaderValue::from_str(origin)
        .map_err(|e| StartupError::InvalidConfig(format!("cors origin {origin:?}: {e}")))?;
    Ok(CorsLayer::new()
        .allow_origin(AllowOrigin::list([origin]))
        .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE, Method::OPTIONS])
        .allow_headers([header::CONTENT_TYPE]))
}

fn bind_addr(server: &ServerConfig) -> Result<SocketAddr, StartupError> {
    format!("{}:{}", server.host, server.port)
        .parse()
        .map_err(|e| StartupError::InvalidConfig(format!("bind address {}:{}: {e}", server.host, server.port)))
}

/// Public entry: connect, migrate, seed, then run the HTTP server until it fails
pub async fn run(cfg: AppConfig) -> anyhow::Result<()> {
    let db = connect_and_migrate(&DatabaseConfig::from(&cfg.database)).await?;
    let state = AppState::new(db);

    if cfg.seed.demo_users {
        let created = state.users.seed_demo_users().await?;
        info!(service = "server", event = "seed", created, "demo accounts checked");
    }

    let cors = build_cors(&cfg.server.cors_origin)?;
    let app = routes::build_router(state, cors);

    let addr = bind_addr(&cfg.server)?;
    info!(service = "server", event = "listen", %addr, cors_origin = %cfg.server.cors_origin, "student records api listening");
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bind_addr_rejects_bad_host() {
        let server = ServerConfig { host: "not a host".into(), ..ServerConfig::default() };
        assert!(matches!(bind_addr(&server), Err(StartupError::InvalidConfig(_))));
    }

    #[test]
    fn bind_addr_uses_host_and_port() {
        let server = ServerConfig { host: "127.0.0.1".into(), port: 9090, ..ServerConfig::default() };
        assert_eq!(bind_addr(&server).ok(), "127.0.0.1:9090".parse().ok());
    }

    #[test]
    fn cors_rejects_control_characters() {
        assert!(build_cors("http://localhost:5173").is_ok());
        assert!(build_cors("http://bad\norigin").is_err());
    }
}
