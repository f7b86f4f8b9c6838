use std::future::Future;

use axum::Router;
use tokio::net::TcpListener;
use tracing::info;

use crate::{config::ApiServerConfig, errors::Error};

/// Bind the API listener. Port 0 yields an OS-assigned port; read it back
/// from `TcpListener::local_addr`.
pub async fn bind_api_listener(config: &ApiServerConfig) -> crate::Result<TcpListener> {
    let addr = config.socket_addr()?;

    TcpListener::bind(addr)
        .await
        .map_err(|e| Error::transport(format!("Failed to bind API server on {}: {}", addr, e)))
}

/// Serve `router` on an already bound listener until `shutdown` resolves.
pub async fn serve_api<F>(listener: TcpListener, router: Router, shutdown: F) -> crate::Result<()>
where
    F: Future<Output = ()> + Send + 'static,
{
    let addr = listener.local_addr()?;
    info!(address = %addr, "Starting HTTP API server");

    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown)
        .await
        .map_err(|e| Error::transport(format!("API server error: {}", e)))?;

    info!(address = %addr, "API server shutdown completed");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_bind_ephemeral_port() {
        let listener = bind_api_listener(&ApiServerConfig::ephemeral()).await.unwrap();
        let addr = listener.local_addr().unwrap();
        assert_ne!(addr.port(), 0);
        assert!(addr.ip().is_loopback());
    }

    #[tokio::test]
    async fn test_bind_conflicting_port_is_transport_error() {
        let first = bind_api_listener(&ApiServerConfig::ephemeral()).await.unwrap();
        let taken = first.local_addr().unwrap().port();

        let config = ApiServerConfig { port: taken, ..ApiServerConfig::ephemeral() };
        let err = bind_api_listener(&config).await.unwrap_err();
        assert!(matches!(err, Error::Transport(_)));
    }

    #[tokio::test]
    async fn test_serve_api_stops_on_shutdown_signal() {
        let listener = bind_api_listener(&ApiServerConfig::ephemeral()).await.unwrap();
        let (tx, rx) = tokio::sync::oneshot::channel::<()>();
        let handle = tokio::spawn(serve_api(listener, Router::new(), async {
            let _ = rx.await;
        }));

        tx.send(()).unwrap();
        let result = tokio::time::timeout(std::time::Duration::from_secs(5), handle)
            .await
            .expect("server stopped in time")
            .expect("server task joined");
        assert!(result.is_ok());
    }
}
