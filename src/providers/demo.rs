//! Demo video stub: a canned asset after a simulated delay, no network.

use async_trait::async_trait;

use super::{ProviderContext, VideoProvider};
use crate::error::StudioError;
use crate::progress::ProgressSink;
use crate::types::{ProviderId, VideoRequest};

pub struct DemoVideo {
    ctx: ProviderContext,
}

impl DemoVideo {
    pub fn new(ctx: ProviderContext) -> Self {
        Self { ctx }
    }
}

#[async_trait]
impl VideoProvider for DemoVideo {
    fn id(&self) -> ProviderId {
        ProviderId::DemoVideo
    }

    async fn generate(
        &self,
        _request: &VideoRequest,
        progress: &dyn ProgressSink,
    ) -> Result<String, StudioError> {
        let video = &self.ctx.config().video;
        progress.report("Preparing demo video...");
        tokio::time::sleep(video.demo_delay).await;
        progress.report("Demo video ready!");
        Ok(video.demo_video_url.clone())
    }
}
