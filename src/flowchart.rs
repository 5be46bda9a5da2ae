//! Mermaid flowchart markup.
//!
//! Produces a fenced block like:
//!
//! ~~~text
//! ```
//! flowchart LR
//! 1[Central] --> 2[First]
//! ```
//! ~~~

use crate::walker::Edge;

/// Characters that end or restructure a Mermaid node label.
const LABEL_SYNTAX: &[char] = &['[', ']', '(', ')', '{', '}', '<', '>', '|', '"', ';', '\n'];

/// Flowchart layout direction.
#[derive(clap::ValueEnum, Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    /// Left to right
    #[default]
    #[value(name = "lr")]
    LeftRight,
    /// Top to bottom
    #[value(name = "tb")]
    TopBottom,
    /// Right to left
    #[value(name = "rl")]
    RightLeft,
    /// Bottom to top
    #[value(name = "bt")]
    BottomTop,
}

impl Direction {
    pub const fn keyword(self) -> &'static str {
        match self {
            Self::LeftRight => "LR",
            Self::TopBottom => "TB",
            Self::RightLeft => "RL",
            Self::BottomTop => "BT",
        }
    }
}

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct FlowchartOptions {
    pub direction: Direction,
    /// Produce no output at all for maps without edges, instead of an
    /// empty fenced block.
    pub skip_empty: bool,
}

/// Render edges as a fenced Mermaid flowchart.
///
/// Returns `None` only when there are no edges and `skip_empty` is set.
pub fn render<'a>(
    edges: impl IntoIterator<Item = Edge<'a>>,
    options: &FlowchartOptions,
) -> Option<String> {
    let mut lines = vec![
        "```".to_string(),
        format!("flowchart {}", options.direction.keyword()),
    ];
    let header_len = lines.len();

    lines.extend(edges.into_iter().map(|edge| {
        format!(
            "{} --> {}",
            node(&edge.parent_id.to_string(), edge.parent_label),
            node(&edge.child_id.to_string(), edge.child_label)
        )
    }));

    if options.skip_empty && lines.len() == header_len {
        return None;
    }
    lines.push("```".to_string());
    Some(lines.join("\n"))
}

/// Format `id[label]`, quoting the label only if Mermaid would misread it.
fn node(id: &str, label: &str) -> String {
    if label.contains(LABEL_SYNTAX) {
        let escaped = label.replace('"', "#quot;").replace('\n', "<br>");
        format!("{id}[\"{escaped}\"]")
    } else {
        format!("{id}[{label}]")
    }
}
