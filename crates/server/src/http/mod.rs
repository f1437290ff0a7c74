mod payload;
mod routes;

use std::net::SocketAddr;
use std::sync::Arc;

use tokio::net::TcpListener;
use tokio::sync::oneshot;

use crate::sessions::SessionRegistry;

pub use routes::create_router;

pub struct AdvisorServer {
    listener: TcpListener,
    registry: Arc<SessionRegistry>,
}

impl AdvisorServer {
    pub async fn bind(addr: SocketAddr, registry: Arc<SessionRegistry>) -> std::io::Result<Self> {
        let listener = TcpListener::bind(addr).await?;
        Ok(Self { listener, registry })
    }

    pub fn local_addr(&self) -> std::io::Result<SocketAddr> {
        self.listener.local_addr()
    }

    /// Serve until `shutdown` fires or its sender is dropped.
    pub async fn run(self, shutdown: oneshot::Receiver<()>) -> std::io::Result<()> {
        let app = create_router(self.registry);

        axum::serve(self.listener, app)
            .with_graceful_shutdown(async move {
                let _ = shutdown.await;
            })
            .await
    }
}
