//! Startup sequence for the payroll service
//!
//! Builds the application context (configuration, health registry, HTTP API),
//! binds it to the configured port and hands back a [`RunningApp`] once the
//! listener accepts connections. Binding port 0 gives every instance its own
//! OS-assigned port, so several instances can run side by side in one process.

use std::net::{IpAddr, Ipv4Addr, Ipv6Addr, SocketAddr};
use std::sync::Arc;
use std::time::Duration;

use chrono::{DateTime, Utc};
use tokio::net::TcpStream;
use tokio::sync::oneshot;
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

use crate::api::{bind_api_listener, build_router, serve_api, ApiState};
use crate::config::Config;
use crate::errors::{Error, Result};
use crate::observability::{HealthCheck, HealthChecker};

const READINESS_POLL_INTERVAL: Duration = Duration::from_millis(50);

/// The fully wired set of components behind one service instance
#[derive(Debug)]
pub struct AppContext {
    config: Config,
    health: HealthChecker,
    started_at: DateTime<Utc>,
}

impl AppContext {
    pub fn new(config: Config) -> Self {
        Self { config, health: HealthChecker::new(), started_at: Utc::now() }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn health(&self) -> &HealthChecker {
        &self.health
    }

    pub fn instance_id(&self) -> &str {
        self.health.instance_id()
    }

    pub fn started_at(&self) -> DateTime<Utc> {
        self.started_at
    }
}

/// A started service instance. Dropping it signals the server to stop;
/// call [`RunningApp::shutdown`] to wait for it.
#[derive(Debug)]
pub struct RunningApp {
    context: Arc<AppContext>,
    local_addr: SocketAddr,
    shutdown_tx: Option<oneshot::Sender<()>>,
    server: Option<JoinHandle<Result<()>>>,
    shutdown_timeout: Duration,
}

impl RunningApp {
    /// Address the listener is actually bound to (port resolved)
    pub fn local_addr(&self) -> SocketAddr {
        self.local_addr
    }

    /// Base URL for HTTP clients, always pointing at a connectable address
    pub fn base_url(&self) -> String {
        format!("http://{}", connectable_addr(self.local_addr))
    }

    pub fn context(&self) -> &Arc<AppContext> {
        &self.context
    }

    /// Whether the server task is still running
    pub fn is_running(&self) -> bool {
        self.server.as_ref().is_some_and(|handle| !handle.is_finished())
    }

    /// Stop accepting connections and wait for in-flight requests to drain
    pub async fn shutdown(mut self) -> Result<()> {
        self.begin_shutdown().await;

        let Some(mut server) = self.server.take() else {
            return Ok(());
        };

        match tokio::time::timeout(self.shutdown_timeout, &mut server).await {
            Ok(Ok(result)) => {
                info!(
                    address = %self.local_addr,
                    instance_id = %self.context.instance_id(),
                    "Payroll service stopped"
                );
                result
            }
            Ok(Err(join_error)) => {
                Err(Error::internal(format!("API server task failed: {}", join_error)))
            }
            Err(_) => {
                server.abort();
                Err(Error::timeout("API server shutdown", self.shutdown_timeout))
            }
        }
    }
}

impl RunningApp {
    /// Mark the API unready, then signal the server. Readiness must flip
    /// before the listener starts draining.
    async fn begin_shutdown(&mut self) {
        let Some(tx) = self.shutdown_tx.take() else {
            return;
        };

        self.context
            .health
            .report(HealthCheck::unhealthy("api_server", "shutting down"))
            .await;

        // The receiver is gone only if the server already exited.
        let _ = tx.send(());
    }
}

impl Drop for RunningApp {
    fn drop(&mut self) {
        if let Some(tx) = self.shutdown_tx.take() {
            debug!(
                address = %self.local_addr,
                "RunningApp dropped without shutdown, signalling server"
            );
            let _ = tx.send(());
        }
    }
}

/// Build the application context and start serving.
///
/// Fails before anything is bound when the configuration is invalid, with a
/// transport error when the port cannot be bound, and with a timeout when the
/// listener does not become connectable within the startup timeout.
pub async fn launch(config: Config) -> Result<RunningApp> {
    config.validate()?;

    let startup_timeout = config.api.startup_timeout();
    let context = Arc::new(AppContext::new(config));
    context.health.report(HealthCheck::healthy("configuration")).await;

    let listener = bind_api_listener(&context.config.api).await?;
    let local_addr = listener.local_addr()?;
    let router = build_router(ApiState::new(context.clone()));

    let (shutdown_tx, shutdown_rx) = oneshot::channel::<()>();
    let server = tokio::spawn(serve_api(listener, router, async move {
        let _ = shutdown_rx.await;
    }));

    let app = RunningApp {
        context,
        local_addr,
        shutdown_tx: Some(shutdown_tx),
        server: Some(server),
        shutdown_timeout: startup_timeout,
    };

    wait_for_listener(connectable_addr(local_addr), startup_timeout).await?;

    app.context
        .health
        .report(HealthCheck::healthy("api_server").with_metadata("address", local_addr.to_string()))
        .await;

    info!(
        service_name = %app.context.config.observability.service_name,
        address = %local_addr,
        ephemeral_port = app.context.config.api.is_ephemeral(),
        instance_id = %app.context.instance_id(),
        "Payroll service started"
    );

    Ok(app)
}

/// Unspecified bind addresses are not connectable everywhere; connect through loopback instead.
fn connectable_addr(addr: SocketAddr) -> SocketAddr {
    match addr.ip() {
        IpAddr::V4(ip) if ip.is_unspecified() => {
            SocketAddr::new(IpAddr::V4(Ipv4Addr::LOCALHOST), addr.port())
        }
        IpAddr::V6(ip) if ip.is_unspecified() => {
            SocketAddr::new(IpAddr::V6(Ipv6Addr::LOCALHOST), addr.port())
        }
        _ => addr,
    }
}

async fn wait_for_listener(addr: SocketAddr, limit: Duration) -> Result<()> {
    let connect = async {
        loop {
            match TcpStream::connect(addr).await {
                Ok(stream) => {
                    drop(stream);
                    return;
                }
                Err(e) => {
                    debug!(address = %addr, error = %e, "API listener not ready yet");
                    tokio::time::sleep(READINESS_POLL_INTERVAL).await;
                }
            }
        }
    };

    tokio::time::timeout(limit, connect).await.map_err(|_| {
        warn!(
            address = %addr,
            timeout_ms = limit.as_millis() as u64,
            "API listener never became ready"
        );
        Error::timeout("API readiness", limit)
    })
}
