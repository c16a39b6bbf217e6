use std::net::SocketAddr;
use std::sync::Arc;

use tokio::net::TcpListener;

use crate::config::WebhookConfig;
use crate::shutdown::{ShutdownHandle, ShutdownSignal};
use crate::webhook::log::WebhookLog;
use crate::webhook::routes::{build_router, AppState};
use crate::webhook::WebhookError;

pub struct WebhookServer {
    addr: SocketAddr,
    /// The bound listener, kept alive to prevent port race conditions.
    /// Populated by try_bind(), consumed by run().
    listener: Option<TcpListener>,
    state: AppState,
    shutdown: Arc<ShutdownSignal>,
}

impl WebhookServer {
    /// Builds the server state. The payload log directory is created here,
    /// once, as part of explicit startup initialization.
    pub fn new(config: &WebhookConfig) -> Result<Self, WebhookError> {
        let addr: SocketAddr =
            config
                .bind_addr
                .parse()
                .map_err(|source| WebhookError::InvalidAddr {
                    addr: config.bind_addr.clone(),
                    source,
                })?;
        let log = Arc::new(WebhookLog::new(&config.log_dir)?);
        Ok(Self {
            addr,
            listener: None,
            state: AppState { log },
            shutdown: Arc::new(ShutdownSignal::new()),
        })
    }

    /// Binds the configured address and keeps the listener, so the port is
    /// held from here until run() takes over.
    pub async fn try_bind(&mut self) -> Result<SocketAddr, WebhookError> {
        let listener = TcpListener::bind(self.addr)
            .await
            .map_err(|source| WebhookError::Bind {
                addr: self.addr.to_string(),
                source,
            })?;
        let actual = listener.local_addr()?;
        self.addr = actual;
        self.listener = Some(listener);
        tracing::info!("webhook listener bound to {actual}");
        Ok(actual)
    }

    pub fn log(&self) -> Arc<WebhookLog> {
        Arc::clone(&self.state.log)
    }

    /// A handle that stops the server without a signal (tests, embedding).
    pub fn handle(&self) -> ShutdownHandle {
        self.shutdown.handle()
    }

    /// Serves until SIGTERM, Ctrl-C, or a programmatic `handle().trigger()`.
    ///
    /// Consumes self to take ownership of the pre-bound listener; call
    /// try_bind() first.
    pub async fn run(self) -> Result<(), WebhookError> {
        let Self {
            addr,
            listener,
            state,
            shutdown,
        } = self;
        let listener = listener.ok_or(WebhookError::NotBound)?;

        tracing::info!("webhook server listening on {addr}");
        let app = build_router(state);
        axum::serve(listener, app)
            .with_graceful_shutdown(async move {
                if let Err(err) = shutdown.wait_for_signal().await {
                    tracing::error!("shutdown signal listener failed: {err}");
                }
            })
            .await?;

        tracing::info!("webhook server stopped");
        Ok(())
    }
}
