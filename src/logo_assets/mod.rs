//! Logo resolution for created channels

pub mod cache;
pub mod service;

pub use cache::LogoCache;
pub use service::get_or_create_logo;
