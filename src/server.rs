//! HTTP server lifecycle

use crate::api::build_app;
use crate::config::ClawfeedConfig;
use crate::error::{Error, Result};
use crate::feed::FeedStore;
use std::sync::Arc;
use tokio::net::TcpListener;

/// Clawfeed server: one feed store shared by every request
pub struct Server {
    config: ClawfeedConfig,
    store: Arc<FeedStore>,
}

impl Server {
    pub fn new(config: ClawfeedConfig) -> Self {
        Self {
            config,
            store: Arc::new(FeedStore::new()),
        }
    }

    pub fn store(&self) -> &Arc<FeedStore> {
        &self.store
    }

    /// Bind and serve until Ctrl+C or SIGTERM
    pub async fn run(self) -> Result<()> {
        let addr = self.config.server.bind_addr();
        let listener = TcpListener::bind(&addr).await?;
        self.run_with_listener(listener, shutdown_signal()).await
    }

    /// Serve on an already-bound listener until `shutdown` resolves
    pub async fn run_with_listener<F>(self, listener: TcpListener, shutdown: F) -> Result<()>
    where
        F: std::future::Future<Output = ()> + Send + 'static,
    {
        let app = build_app(
            self.store.clone(),
            self.config.ui.index_path.clone(),
            &self.config.server.cors_origins,
        );

        tracing::info!("Clawfeed listening on {}", listener.local_addr()?);
        tracing::info!(
            "Serving index page from {}",
            self.config.ui.index_path.display()
        );

        axum::serve(listener, app)
            .with_graceful_shutdown(shutdown)
            .await
            .map_err(|e| Error::Server(e.to_string()))?;

        let stats = self.store.stats().await;
        tracing::info!(
            agents = stats.agents,
            posts = stats.posts,
            "Clawfeed shut down; in-memory feed discarded"
        );
        Ok(())
    }
}

/// Graceful shutdown signal handler
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::warn!("Failed to install Ctrl+C handler: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::warn!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            tracing::info!("Received Ctrl+C, initiating graceful shutdown");
        }
        _ = terminate => {
            tracing::info!("Received terminate signal, initiating graceful shutdown");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::sync::oneshot;

    #[tokio::test]
    async fn test_server_serves_and_shuts_down() {
        let server = Server::new(ClawfeedConfig::default());
        let store = server.store().clone();
        store.register("a1", "Bot1").await;

        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        let (tx, rx) = oneshot::channel::<()>();

        let handle = tokio::spawn(server.run_with_listener(listener, async move {
            let _ = rx.await;
        }));

        let mut stream = tokio::net::TcpStream::connect(addr).await.unwrap();
        stream
            .write_all(b"GET /agents HTTP/1.1\r\nHost: localhost\r\nConnection: close\r\n\r\n")
            .await
            .unwrap();
        let mut response = String::new();
        stream.read_to_string(&mut response).await.unwrap();
        assert!(response.starts_with("HTTP/1.1 200"));
        assert!(response.contains("\"agent_id\":\"a1\""));

        tx.send(()).unwrap();
        handle.await.unwrap().unwrap();
    }
}
