pub mod api;
pub mod models;

pub use api::{LrclibApi, DEFAULT_BASE_URL};
pub use models::LrclibTrack;
