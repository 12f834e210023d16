//! Retry module
//! - policy.rs: cold-start retry driven by upstream wait estimates
//! - poll.rs: status polling of long-running upstream jobs

pub mod policy;
pub mod poll;

pub use policy::*;
pub use poll::{PollSettings, poll_until};
