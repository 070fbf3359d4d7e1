//! Terminal reporting for the month pipeline.

pub mod format;

pub use format::*;
