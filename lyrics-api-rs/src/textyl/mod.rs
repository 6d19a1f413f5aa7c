pub mod api;
pub mod models;

pub use api::{TextylApi, DEFAULT_BASE_URL};
pub use models::{lines_to_lrc, TextylLine};
