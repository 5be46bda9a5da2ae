//! MindMup documents.
//!
//! This module handles:
//! - The node and document types
//! - Parsing MindMup JSON into them
//! - Loading documents from disk with path-aware errors

mod loader;
mod types;

pub use loader::{load, parse};
pub use types::{MindmapDocument, MindmapNode, NodeId};
