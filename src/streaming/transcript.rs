use futures_util::StreamExt;

use super::TextStream;
use crate::error::StudioError;

/// Accumulates streamed fragments into the finalized reply.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ChatTranscript {
    text: String,
    fragments: usize,
}

impl ChatTranscript {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a fragment and return the text so far.
    pub fn push(&mut self, fragment: &str) -> &str {
        self.text.push_str(fragment);
        self.fragments += 1;
        &self.text
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub const fn fragment_count(&self) -> usize {
        self.fragments
    }

    pub fn finish(self) -> String {
        self.text
    }
}

/// Drain a text stream into its full reply.
pub async fn collect_transcript(mut stream: TextStream) -> Result<String, StudioError> {
    let mut transcript = ChatTranscript::new();
    while let Some(fragment) = stream.next().await {
        transcript.push(&fragment?);
    }
    Ok(transcript.finish())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn collects_fragments_in_order() {
        let stream: TextStream = Box::pin(futures_util::stream::iter(vec![
            Ok("Hel".to_string()),
            Ok("lo".to_string()),
        ]));
        assert_eq!(collect_transcript(stream).await.unwrap(), "Hello");
    }

    #[tokio::test]
    async fn stops_at_first_error() {
        let stream: TextStream = Box::pin(futures_util::stream::iter(vec![
            Ok("partial".to_string()),
            Err(StudioError::StreamError("connection reset".to_string())),
            Ok("never".to_string()),
        ]));
        assert!(matches!(
            collect_transcript(stream).await,
            Err(StudioError::StreamError(_))
        ));
    }

    #[test]
    fn push_returns_running_text() {
        let mut transcript = ChatTranscript::new();
        assert_eq!(transcript.push("a"), "a");
        assert_eq!(transcript.push("b"), "ab");
        assert_eq!(transcript.fragment_count(), 2);
    }
}
