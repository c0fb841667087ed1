//! CLI command implementations

pub mod complete;
pub mod feed;
pub mod status;
pub mod visit;
