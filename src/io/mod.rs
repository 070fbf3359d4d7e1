//! Input/output helpers.
//!
//! - CSV ingest (`ingest`)
//! - daily CSV / summary JSON exports (`export`)

pub mod export;
pub mod ingest;

pub use export::*;
pub use ingest::*;
