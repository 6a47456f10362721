//! Channel grouping: failover ordering, display names and bulk creation

pub mod naming;
pub mod orchestrator;
pub mod sorter;

pub use naming::ChannelNamer;
pub use orchestrator::{group_streams, ChannelGroupingOrchestrator};
pub use sorter::{sort_by_quality, QualitySorter};
