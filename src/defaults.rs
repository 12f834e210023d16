//! Default values shared across providers.

/// HTTP client defaults
pub mod http {
    use std::time::Duration;

    pub const REQUEST_TIMEOUT: Duration = Duration::from_secs(120);
    pub const CONNECT_TIMEOUT: Duration = Duration::from_secs(10);
    pub const USER_AGENT: &str = concat!("genstudio/", env!("CARGO_PKG_VERSION"));
    /// Upper bound for key validation probes; they are advisory and must stay snappy.
    pub const VALIDATION_TIMEOUT: Duration = Duration::from_secs(15);
}

/// Upstream base URLs
pub mod endpoints {
    pub const GOOGLE: &str = "https://generativelanguage.googleapis.com/v1beta";
    pub const OPENAI: &str = "https://api.openai.com/v1";
    pub const HUGGINGFACE: &str = "https://api-inference.huggingface.co";
    pub const REPLICATE: &str = "https://api.replicate.com/v1";
}

/// Model identifiers per provider
pub mod models {
    pub const IMAGEN: &str = "imagen-3.0-generate-002";
    pub const DALL_E: &str = "dall-e-3";
    pub const STABLE_DIFFUSION: &str = "stabilityai/stable-diffusion-3-medium-diffusers";
    pub const VEO: &str = "veo-2.0-generate-001";
    pub const STABLE_VIDEO_DIFFUSION: &str = "stabilityai/stable-video-diffusion-img2vid-xt";
    pub const GEMINI_FLASH: &str = "gemini-2.5-flash";
    pub const LLAMA_3_INSTRUCT: &str = "meta-llama/Meta-Llama-3-8B-Instruct";
    pub const REPLICATE_LLAMA: &str = "meta/llama-2-70b-chat";
}

/// Video orchestration timings
pub mod video {
    use std::time::Duration;

    pub const POLL_INTERVAL: Duration = Duration::from_secs(10);
    /// 15 minutes at the default interval.
    pub const MAX_POLL_ATTEMPTS: u32 = 90;
    pub const DEMO_DELAY: Duration = Duration::from_millis(1500);
    pub const DEMO_VIDEO_URL: &str =
        "https://dummy-media.torchbox.com/media/video/1080p/big-buck-bunny.mp4";
}

/// Cold-start retry defaults
pub mod cold_start {
    use std::time::Duration;

    pub const MAX_ATTEMPTS: u32 = 5;
    pub const DEFAULT_WAIT: Duration = Duration::from_secs(20);
}

/// Chat generation parameters
pub mod chat {
    pub const MAX_NEW_TOKENS: u32 = 500;
}

/// Image request defaults
pub mod image {
    pub const NEGATIVE_PROMPT: &str =
        "ugly, blurry, deformed, disfigured, poor details, bad anatomy";
    pub const COUNT: u32 = 2;
}
