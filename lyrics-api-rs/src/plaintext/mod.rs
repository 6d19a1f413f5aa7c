pub mod api;
pub mod models;

pub use api::{PlainTextApi, LYRICS_OVH_BASE_URL, LYRIST_BASE_URL};
pub use models::PlainLyricsBody;
