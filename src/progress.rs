//! Progress reporting
//!
//! Long-running calls report human-readable status strings through a sink
//! injected by the caller. The sink is a side channel: it cannot fail the
//! call, and a listener that went away is simply ignored.

use tokio::sync::mpsc;

/// Receives progress messages, zero or more times per call.
pub trait ProgressSink: Send + Sync {
    fn report(&self, message: &str);
}

impl<F> ProgressSink for F
where
    F: Fn(&str) + Send + Sync,
{
    fn report(&self, message: &str) {
        self(message)
    }
}

impl ProgressSink for mpsc::UnboundedSender<String> {
    fn report(&self, message: &str) {
        // A dropped receiver means nobody is listening anymore.
        let _ = self.send(message.to_string());
    }
}

impl ProgressSink for mpsc::Sender<String> {
    fn report(&self, message: &str) {
        // Never block generation on a slow listener.
        let _ = self.try_send(message.to_string());
    }
}

/// Discards every message.
#[derive(Debug, Clone, Copy, Default)]
pub struct SilentProgress;

impl ProgressSink for SilentProgress {
    fn report(&self, _message: &str) {}
}

/// Wrapper used inside orchestrators: logs every message before forwarding.
pub(crate) struct Progress<'a> {
    sink: &'a dyn ProgressSink,
}

impl<'a> Progress<'a> {
    pub(crate) fn new(sink: &'a dyn ProgressSink) -> Self {
        Self { sink }
    }

    pub(crate) fn emit(&self, message: impl AsRef<str>) {
        let message = message.as_ref();
        tracing::debug!(target: "genstudio::progress", %message);
        self.sink.report(message);
    }
}

impl ProgressSink for Progress<'_> {
    fn report(&self, message: &str) {
        self.emit(message);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::{Arc, Mutex};

    #[test]
    fn closure_sink_receives_messages() {
        let seen = Arc::new(Mutex::new(Vec::new()));
        let sink = {
            let seen = seen.clone();
            move |m: &str| seen.lock().unwrap().push(m.to_string())
        };
        let progress = Progress::new(&sink);
        progress.emit("one");
        progress.emit(String::from("two"));
        assert_eq!(*seen.lock().unwrap(), vec!["one", "two"]);
    }

    #[test]
    fn closed_channel_is_ignored() {
        let (tx, rx) = mpsc::unbounded_channel::<String>();
        drop(rx);
        tx.report("nobody listening");

        let (tx, _rx) = mpsc::channel::<String>(1);
        tx.report("fills the buffer");
        tx.report("dropped, not blocking");
    }
}
