//! Mind map data model.

use std::fmt;

use indexmap::IndexMap;
use serde::Deserialize;

/// Identifier of an idea. MindMup writes integers, older maps use strings.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Deserialize)]
#[serde(untagged)]
pub enum NodeId {
    Int(i64),
    /// Floats and integers outside `i64`, kept exactly as parsed
    Number(serde_json::Number),
    Text(String),
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Int(n) => write!(f, "{n}"),
            Self::Number(n) => write!(f, "{n}"),
            Self::Text(s) => f.write_str(s),
        }
    }
}

impl From<i64> for NodeId {
    fn from(n: i64) -> Self {
        Self::Int(n)
    }
}

impl From<i32> for NodeId {
    fn from(n: i32) -> Self {
        Self::Int(i64::from(n))
    }
}

impl From<&str> for NodeId {
    fn from(s: &str) -> Self {
        Self::Text(s.to_string())
    }
}

/// One idea in the tree.
///
/// Children are keyed by their MindMup rank and kept in document order.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct MindmapNode {
    pub id: NodeId,
    pub title: String,
    #[serde(default, rename = "ideas")]
    pub children: IndexMap<String, MindmapNode>,
}

impl MindmapNode {
    /// Create a leaf node.
    pub fn new(id: impl Into<NodeId>, title: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            children: IndexMap::new(),
        }
    }

    /// Append a child under the next free rank key.
    #[must_use]
    pub fn with_child(mut self, child: Self) -> Self {
        let rank = (self.children.len() + 1).to_string();
        self.children.insert(rank, child);
        self
    }

    /// A node without children never becomes a parent.
    pub fn is_leaf(&self) -> bool {
        self.children.is_empty()
    }
}

// Frees the subtree with an explicit stack so arbitrarily deep maps can be
// dropped without exhausting the call stack.
impl Drop for MindmapNode {
    fn drop(&mut self) {
        if self.children.is_empty() {
            return;
        }
        let mut pending: Vec<Self> = self.children.drain(..).map(|(_, child)| child).collect();
        while let Some(mut node) = pending.pop() {
            pending.extend(node.children.drain(..).map(|(_, child)| child));
        }
    }
}

/// A parsed mind map: one or more root ideas.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct MindmapDocument {
    pub ideas: IndexMap<String, MindmapNode>,
}

impl MindmapDocument {
    pub fn new(roots: impl IntoIterator<Item = MindmapNode>) -> Self {
        let ideas = roots
            .into_iter()
            .enumerate()
            .map(|(i, node)| ((i + 1).to_string(), node))
            .collect();
        Self { ideas }
    }

    /// Root ideas in declaration order.
    pub fn roots(&self) -> impl DoubleEndedIterator<Item = &MindmapNode> {
        self.ideas.values()
    }

    pub fn is_empty(&self) -> bool {
        self.ideas.is_empty()
    }

    /// Total number of nodes reachable from the roots.
    pub fn node_count(&self) -> usize {
        let mut count = 0;
        let mut stack: Vec<&MindmapNode> = self.roots().collect();
        while let Some(node) = stack.pop() {
            count += 1;
            stack.extend(node.children.values());
        }
        count
    }
}
