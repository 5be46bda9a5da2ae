// Only allow lints that are either transitive-dependency noise or
// genuinely opinionated style choices that don't indicate real issues.
#![allow(
    // Transitive dependency version mismatches we can't control
    clippy::multiple_crate_versions,
    // module_name_repetitions is pure style preference (e.g. graph::GraphStyle)
    clippy::module_name_repetitions
)]

//! # Mupflow
//!
//! Converts MindMup mind maps into diagrams.
//!
//! Every JSON mind map in a directory becomes:
//! - A Mermaid flowchart in a markdown file (`<name>_mermaid.md`)
//! - A laid-out graph image (`<name>_mermaid.svg`, optionally PNG)
//!
//! ## Pipeline
//!
//! Each file flows through the same stages:
//! - **Load**: parse JSON into a [`mindmap::MindmapDocument`]
//! - **Walk**: enumerate parent → child [`walker::Edge`]s depth first
//! - **Emit**: render the edges as flowchart text or a graph image
//! - **Batch**: repeat per file, isolating failures
//!
//! ## Modules
//!
//! - [`mindmap`]: Document model and loader
//! - [`walker`]: Edge enumeration
//! - [`flowchart`]: Mermaid markup
//! - [`graph`]: Graph model, layout, SVG and PNG rendering
//! - [`batch`]: Directory conversion
//! - [`config`]: Saved command-line defaults
//! - [`error`]: Error taxonomy

pub mod batch;
pub mod config;
pub mod error;
pub mod flowchart;
pub mod graph;
pub mod mindmap;
pub mod perf;
pub mod walker;

/// Re-export commonly used types
pub mod prelude {
    pub use crate::batch::{BatchOptions, BatchReport, OutputFormat};
    pub use crate::error::DiagramError;
    pub use crate::mindmap::{MindmapDocument, MindmapNode, NodeId};
    pub use crate::walker::{walk, Edge, TraversalOrder};
}
