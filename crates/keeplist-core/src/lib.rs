//! # keeplist-core
//!
//! Core types, errors, and shared defaults for the keeplist migration tool.
//!
//! This crate provides the takeout data model and the error type that the
//! delivery and pipeline crates depend on.

pub mod defaults;
pub mod error;
pub mod models;

// Re-export commonly used types at crate root
pub use error::{Error, Result};
pub use models::{Attachment, KeepNote, Label};
