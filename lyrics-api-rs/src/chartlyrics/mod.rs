pub mod api;
pub mod models;

pub use api::{ChartLyricsApi, DEFAULT_BASE_URL};
pub use models::{LyricResponse, SearchCandidate, SearchResponse};
