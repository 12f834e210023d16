//! Long-running job polling
//!
//! Refreshes a job handle at a fixed interval until it reports completion.
//! Polls are strictly sequential. An optional attempt guard turns a job that
//! never finishes into a `TimeoutError`.

use std::future::Future;
use std::time::Duration;

use crate::config::VideoSettings;
use crate::error::StudioError;
use crate::types::ProviderId;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PollSettings {
    pub interval: Duration,
    /// `None` polls until the job is done.
    pub max_attempts: Option<u32>,
}

impl From<&VideoSettings> for PollSettings {
    fn from(video: &VideoSettings) -> Self {
        Self {
            interval: video.poll_interval,
            max_attempts: video.max_poll_attempts,
        }
    }
}

/// Poll `job` until `is_done` holds.
///
/// Each iteration sleeps for the interval, calls `on_poll` with the 1-based
/// poll number, then replaces the handle with `refresh(&job)`.
pub async fn poll_until<T, D, R, Fut, P>(
    provider: ProviderId,
    settings: PollSettings,
    mut job: T,
    is_done: D,
    mut refresh: R,
    mut on_poll: P,
) -> Result<T, StudioError>
where
    D: Fn(&T) -> bool,
    R: FnMut(&T) -> Fut,
    Fut: Future<Output = Result<T, StudioError>>,
    P: FnMut(u32),
{
    let mut polls = 0u32;
    while !is_done(&job) {
        if let Some(max) = settings.max_attempts
            && polls >= max
        {
            tracing::warn!(target: "genstudio::poll", %provider, polls, "poll guard tripped");
            return Err(StudioError::TimeoutError(format!(
                "{provider} job still running after {polls} status checks."
            )));
        }
        tokio::time::sleep(settings.interval).await;
        polls += 1;
        on_poll(polls);
        tracing::info!(target: "genstudio::poll", %provider, poll = polls, "checking job status");
        job = refresh(&job).await?;
    }
    Ok(job)
}
