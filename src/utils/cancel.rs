//! Cancellation utilities
//!
//! First-class cancellation handles for chat streams.

use tokio_util::sync::CancellationToken;

use crate::streaming::{ChatStreamHandle, TextStream};

/// A handle that can be used to request cancellation.
#[derive(Clone, Debug, Default)]
pub struct CancelHandle {
    token: CancellationToken,
}

impl CancelHandle {
    fn new() -> Self {
        Self {
            token: CancellationToken::new(),
        }
    }

    /// Request cancellation. The wrapped stream ends at its next poll and
    /// drops the inner stream, which closes the upstream HTTP connection.
    pub fn cancel(&self) {
        self.token.cancel();
    }

    pub fn is_cancelled(&self) -> bool {
        self.token.is_cancelled()
    }

    /// A future that resolves when cancellation is requested.
    pub fn cancelled(&self) -> tokio_util::sync::WaitForCancellationFuture<'_> {
        self.token.cancelled()
    }
}

/// Make a text stream cancellable and return it with its cancel handle.
pub fn make_cancellable_stream(stream: TextStream) -> ChatStreamHandle {
    let cancel = CancelHandle::new();
    let token = cancel.token.clone();
    let mut inner = stream;
    let s = async_stream::stream! {
        use futures::StreamExt;
        loop {
            tokio::select! {
                biased;
                _ = token.cancelled() => break,
                item = inner.next() => {
                    let Some(item) = item else { break };
                    yield item;
                }
            }
        }
    };
    ChatStreamHandle {
        stream: Box::pin(s),
        cancel,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use futures_util::StreamExt;

    #[tokio::test]
    async fn cancel_wakes_pending_next_immediately() {
        // A stream that never yields and never ends.
        let pending: TextStream = Box::pin(futures_util::stream::pending());
        let ChatStreamHandle { mut stream, cancel } = make_cancellable_stream(pending);

        let waiter = tokio::spawn(async move { stream.next().await });

        // Give the task a chance to poll and block on `next()`.
        tokio::task::yield_now().await;

        cancel.cancel();

        let out = tokio::time::timeout(std::time::Duration::from_millis(200), waiter)
            .await
            .expect("cancel should wake the waiting task")
            .expect("task ok");

        assert!(out.is_none());
    }

    #[tokio::test]
    async fn cancel_stops_after_first_fragment() {
        let source: TextStream = Box::pin(futures_util::stream::iter(vec![
            Ok("Hel".to_string()),
            Ok("lo".to_string()),
        ]));
        let ChatStreamHandle { mut stream, cancel } = make_cancellable_stream(source);

        assert_eq!(stream.next().await.unwrap().unwrap(), "Hel");
        cancel.cancel();
        cancel.cancel();
        assert!(stream.next().await.is_none());
    }
}
