//! Graph diagrams of a mind map.
//!
//! [`Graph`] is the renderer-independent vertex/edge set built from a
//! document. A [`GraphRenderer`] turns it into file contents: SVG via the
//! built-in tree layout, or PNG by rasterizing that SVG with `resvg`.

mod layout;
mod png;
mod svg;

use indexmap::IndexMap;

use crate::mindmap::{MindmapDocument, NodeId};
use crate::walker::{walk, TraversalOrder};

pub use layout::{compute_layout, Layout, LayoutConfig, PlacedNode};
pub use png::PngRenderer;
pub use svg::{render_svg, SvgRenderer};

/// Produces an image from a graph.
pub trait GraphRenderer {
    /// Extension of the produced file, without the dot.
    fn extension(&self) -> &'static str;

    /// Lay out and render `graph`.
    ///
    /// # Errors
    ///
    /// Returns an error if the backend cannot produce the image.
    fn render(&self, graph: &Graph) -> anyhow::Result<Vec<u8>>;
}

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum EdgeStyle {
    /// Plain lines
    #[default]
    Undirected,
    /// Lines with an arrowhead at the child
    Directed,
}

/// Cosmetic settings carried with a graph.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GraphStyle {
    /// Any SVG paint value
    pub background: String,
    pub edge_style: EdgeStyle,
}

impl Default for GraphStyle {
    fn default() -> Self {
        Self {
            background: "yellow".to_string(),
            edge_style: EdgeStyle::Undirected,
        }
    }
}

/// Labeled vertices and parent → child connections.
#[derive(Debug, Clone, PartialEq)]
pub struct Graph {
    pub name: String,
    pub style: GraphStyle,
    vertices: IndexMap<NodeId, String>,
    edges: Vec<(NodeId, NodeId)>,
}

impl Graph {
    pub fn new(name: impl Into<String>, style: GraphStyle) -> Self {
        Self {
            name: name.into(),
            style,
            vertices: IndexMap::new(),
            edges: Vec::new(),
        }
    }

    /// Build the graph for a whole document.
    ///
    /// Roots are registered first so that maps without any children still
    /// show their root ideas.
    pub fn from_document(
        name: impl Into<String>,
        doc: &MindmapDocument,
        order: TraversalOrder,
        style: GraphStyle,
    ) -> Self {
        let mut graph = Self::new(name, style);
        for root in doc.roots() {
            graph.add_vertex(&root.id, &root.title);
        }
        for edge in walk(doc, order) {
            graph.add_vertex(edge.child_id, edge.child_label);
            graph.add_edge(edge.parent_id, edge.child_id);
        }
        graph
    }

    /// Register a vertex. A repeated id keeps its position and takes the
    /// newer label.
    pub fn add_vertex(&mut self, id: &NodeId, label: &str) {
        self.vertices.insert(id.clone(), label.to_string());
    }

    /// Connect two vertices, registering unknown endpoints labeled by id.
    pub fn add_edge(&mut self, from: &NodeId, to: &NodeId) {
        for id in [from, to] {
            if !self.vertices.contains_key(id) {
                self.vertices.insert(id.clone(), id.to_string());
            }
        }
        self.edges.push((from.clone(), to.clone()));
    }

    pub fn vertices(&self) -> impl Iterator<Item = (&NodeId, &str)> {
        self.vertices.iter().map(|(id, label)| (id, label.as_str()))
    }

    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    pub fn edges(&self) -> &[(NodeId, NodeId)] {
        &self.edges
    }

    pub fn label(&self, id: &NodeId) -> Option<&str> {
        self.vertices.get(id).map(String::as_str)
    }

    /// Position of a vertex in registration order.
    pub fn index_of(&self, id: &NodeId) -> Option<usize> {
        self.vertices.get_index_of(id)
    }
}
