//! Streaming Module
//!
//! Chat replies are exposed as a lazy stream of text fragments regardless of
//! whether the upstream streams tokens or answers in one shot.

mod sse_json;
mod transcript;
mod types;

pub use sse_json::*;
pub use transcript::*;
pub use types::*;
