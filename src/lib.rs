pub mod config;
pub mod errors;
pub mod grouping;
pub mod logo_assets;
pub mod models;
pub mod normalization;
pub mod services;

pub use grouping::ChannelGroupingOrchestrator;
pub use normalization::{normalize_stream_name, score_quality, NameNormalizer};
