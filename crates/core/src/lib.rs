//! Core types for the axle wrapper layer
//!
//! This crate defines the foundational types used throughout the system:
//! - Key: unified per-dimension lookup key value
//! - AxisKeys: one dimension's ordered key sequence (range or general)
//! - Selector: tagged query resolved against a key sequence
//! - lookup: pure selector resolution (the Key Index)
//! - Error: error type hierarchy
//! - config: process-wide construction defaults

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod axis;
pub mod config;
pub mod error;
pub mod key;
pub mod lookup;
pub mod selector;

// Re-export commonly used types
pub use axis::AxisKeys;
pub use config::{default_wrap_order, set_default_wrap_order, WrapOrder};
pub use error::{Error, Result};
pub use key::Key;
pub use selector::{AxisPick, IntervalBounds, Selector};
