//! Replicate strategies.

pub mod chat;

pub use chat::{Prediction, ReplicateChat};
