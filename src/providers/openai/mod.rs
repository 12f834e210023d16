//! OpenAI strategies.

pub mod images;

pub use images::OpenAiImages;
