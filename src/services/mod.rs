//! Collaborators of the grouping engine
//!
//! [`ChannelApi`] is the boundary to the channel management backend.
//! [`InMemoryChannelApi`] implements it without any I/O for dry runs and
//! tests.

pub mod in_memory;
pub mod traits;

pub use in_memory::InMemoryChannelApi;
pub use traits::ChannelApi;

#[cfg(test)]
pub use traits::MockChannelApi;
