//! Lyrics Station - now-playing lyrics from free public lyrics APIs
//!
//! The [`lyrics`] module holds the retrieval engine: text normalization, song
//! identity, the provider fan-out with its selection policy, the LRC parser
//! and the local cache. [`media`] and [`nowplaying`] connect it to a host
//! media session, and [`server`] exposes everything over HTTP.

pub mod config;
pub mod lyrics;
pub mod media;
pub mod nowplaying;
pub mod server;
pub mod store;
