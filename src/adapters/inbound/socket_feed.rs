use tokio::sync::mpsc;
use tracing::info;

use crate::common::{DomainError, DomainResult};

/// Text frames from the dashboard's network socket.
///
/// There is no live endpoint behind the configured address; frames arrive
/// through the paired `FeedInjector`, which stands in for the remote peer.
pub struct SocketFeed {
    url: String,
    frames: mpsc::Receiver<String>,
}

/// Sending half of a `SocketFeed`. Dropping every injector closes the feed.
#[derive(Clone)]
pub struct FeedInjector {
    frames: mpsc::Sender<String>,
}

impl SocketFeed {
    pub fn connect(url: &str, capacity: usize) -> (SocketFeed, FeedInjector) {
        let (tx, rx) = mpsc::channel(capacity.max(1));
        info!(url, "socket feed connected");
        (
            SocketFeed { url: url.to_string(), frames: rx },
            FeedInjector { frames: tx },
        )
    }

    pub async fn next_frame(&mut self) -> Option<String> {
        self.frames.recv().await
    }

    pub fn url(&self) -> &str {
        &self.url
    }
}

impl FeedInjector {
    pub async fn push(&self, frame: impl Into<String>) -> DomainResult<()> {
        self.frames
            .send(frame.into())
            .await
            .map_err(|e| DomainError::ExternalService(format!("socket feed closed: {}", e)))
    }
}
