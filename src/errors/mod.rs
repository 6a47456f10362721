//! Centralized error handling for the channel grouper
//!
//! # Error Categories
//!
//! - **Grouping Errors**: precondition violations on bulk channel creation
//! - **Normalization Errors**: rule tables that fail to compile
//! - **API Errors**: failures reported by the external channel API
//!
//! # Usage
//!
//! ```rust
//! use m3u_channel_grouper::errors::{AppError, AppResult};
//!
//! fn example_function() -> AppResult<String> {
//!     Err(AppError::validation("no streams"))
//! }
//! ```

pub mod types;

pub use types::*;

/// Convenience type alias for Results using AppError
pub type AppResult<T> = Result<T, AppError>;

/// Convenience type alias for Results returned by the external channel API
pub type ApiResult<T> = Result<T, ApiError>;

/// Convenience type alias for Results of rule table compilation
pub type NormalizationResult<T> = Result<T, NormalizationError>;
