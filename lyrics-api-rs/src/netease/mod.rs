pub mod api;
pub mod models;

pub use api::{NetEaseApi, DEFAULT_BASE_URL};
pub use models::{LyricResult, SearchEnvelope, Song};
