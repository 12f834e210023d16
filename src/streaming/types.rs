//! Core Streaming Types

use futures::Stream;
use std::pin::Pin;

use crate::error::StudioError;

/// Text Stream - the chat orchestrator's output
///
/// A pinned, boxed, finite stream of reply fragments. It cannot be restarted;
/// dropping it releases the upstream connection.
pub type TextStream = Pin<Box<dyn Stream<Item = Result<String, StudioError>> + Send>>;

/// Text stream with first-class cancellation handle
///
/// # Example
/// ```rust,no_run
/// # use genstudio::prelude::*;
/// # async fn example(studio: Studio) -> Result<(), StudioError> {
/// let history = vec![ChatMessage::user("Hello")];
/// let handle = studio.stream_chat_response_with_cancel(
///     ProviderId::GeminiChat,
///     &Credential::empty(),
///     history,
/// )?;
///
/// // Use the stream
/// // ...
///
/// // Cancel if needed
/// handle.cancel.cancel();
/// # Ok(())
/// # }
/// ```
pub struct ChatStreamHandle {
    /// The underlying text stream
    pub stream: TextStream,
    /// Handle to cancel the stream
    pub cancel: crate::utils::cancel::CancelHandle,
}
