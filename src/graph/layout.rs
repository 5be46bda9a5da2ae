//! Tidy tree layout.
//!
//! Vertices are placed in rows by depth, top to bottom. Each subtree gets a
//! horizontal span wide enough for its children; parents are centered over
//! their span. All passes use explicit stacks.

use std::f32::consts::SQRT_2;

use unicode_width::UnicodeWidthStr;

use super::Graph;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LayoutConfig {
    pub font_size: f32,
    /// Average advance of one terminal column at `font_size`
    pub char_width: f32,
    pub line_height: f32,
    /// Padding between the label box and the ellipse bounding box
    pub padding: f32,
    pub sibling_gap: f32,
    pub rank_gap: f32,
    pub margin: f32,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            font_size: 14.0,
            char_width: 7.5,
            line_height: 17.0,
            padding: 5.0,
            sibling_gap: 18.0,
            rank_gap: 36.0,
            margin: 8.0,
        }
    }
}

/// A vertex with its final geometry.
#[derive(Debug, Clone, PartialEq)]
pub struct PlacedNode {
    /// Index of the vertex in the graph's registration order
    pub index: usize,
    pub cx: f32,
    pub cy: f32,
    pub rx: f32,
    pub ry: f32,
    pub lines: Vec<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Layout {
    pub width: f32,
    pub height: f32,
    /// In vertex registration order
    pub nodes: Vec<PlacedNode>,
    /// Pairs of indices into `nodes`
    pub edges: Vec<(usize, usize)>,
}

/// Position every vertex of `graph`.
///
/// Edges that would give a vertex a second parent, or close a cycle, are
/// kept for drawing but ignored for placement.
pub fn compute_layout(graph: &Graph, config: &LayoutConfig) -> Layout {
    let mut nodes: Vec<PlacedNode> = graph
        .vertices()
        .enumerate()
        .map(|(index, (_, label))| size_node(index, label, config))
        .collect();
    let n = nodes.len();

    let edges: Vec<(usize, usize)> = graph
        .edges()
        .iter()
        .filter_map(|(from, to)| Some((graph.index_of(from)?, graph.index_of(to)?)))
        .collect();

    let mut children: Vec<Vec<usize>> = vec![Vec::new(); n];
    let mut has_parent = vec![false; n];
    for &(from, to) in &edges {
        if from != to && !has_parent[to] {
            has_parent[to] = true;
            children[from].push(to);
        }
    }

    // Span pass: post-order over a spanning forest.
    let mut visited = vec![false; n];
    let mut depth = vec![0usize; n];
    let mut span = vec![0f32; n];
    let mut tree: Vec<Vec<usize>> = vec![Vec::new(); n];
    let mut forest = Vec::new();
    let starts = (0..n).filter(|&v| !has_parent[v]).chain(0..n);
    for start in starts {
        if visited[start] {
            continue;
        }
        visited[start] = true;
        forest.push(start);
        let mut stack = vec![(start, false)];
        while let Some((v, expanded)) = stack.pop() {
            if expanded {
                let kids = &tree[v];
                let kids_width = row_width(kids, &span, config.sibling_gap);
                span[v] = kids_width.max(nodes[v].rx * 2.0);
                continue;
            }
            stack.push((v, true));
            for &k in &children[v] {
                if !visited[k] {
                    visited[k] = true;
                    depth[k] = depth[v] + 1;
                    tree[v].push(k);
                }
            }
            stack.extend(tree[v].iter().rev().map(|&k| (k, false)));
        }
    }

    // Row heights and their top offsets.
    let rows = depth.iter().max().map_or(0, |d| d + 1);
    let mut row_height = vec![0f32; rows];
    for v in 0..n {
        row_height[depth[v]] = row_height[depth[v]].max(nodes[v].ry * 2.0);
    }
    let mut row_top = Vec::with_capacity(rows);
    let mut y = config.margin;
    for h in &row_height {
        row_top.push(y);
        y += h + config.rank_gap;
    }
    let height = if rows == 0 {
        config.margin * 2.0
    } else {
        y - config.rank_gap + config.margin
    };

    // Placement pass: pre-order, each subtree inside its span.
    let mut cursor = config.margin;
    for &root in &forest {
        let mut stack = vec![(root, cursor)];
        while let Some((v, left)) = stack.pop() {
            let d = depth[v];
            nodes[v].cx = left + span[v] / 2.0;
            nodes[v].cy = row_top[d] + row_height[d] / 2.0;

            let kids = &tree[v];
            let mut child_left = left + (span[v] - row_width(kids, &span, config.sibling_gap)) / 2.0;
            for &k in kids {
                stack.push((k, child_left));
                child_left += span[k] + config.sibling_gap;
            }
        }
        cursor += span[root] + config.sibling_gap;
    }
    let width = if forest.is_empty() {
        config.margin * 2.0
    } else {
        cursor - config.sibling_gap + config.margin
    };

    Layout {
        width,
        height,
        nodes,
        edges,
    }
}

fn row_width(kids: &[usize], span: &[f32], gap: f32) -> f32 {
    if kids.is_empty() {
        return 0.0;
    }
    #[allow(clippy::cast_precision_loss)]
    let gaps = gap * (kids.len() - 1) as f32;
    kids.iter().map(|&k| span[k]).sum::<f32>() + gaps
}

fn size_node(index: usize, label: &str, config: &LayoutConfig) -> PlacedNode {
    let lines: Vec<String> = label.split('\n').map(ToOwned::to_owned).collect();
    let columns = lines.iter().map(|l| l.width()).max().unwrap_or(0).max(1);
    #[allow(clippy::cast_precision_loss)]
    let text_width = columns as f32 * config.char_width;
    #[allow(clippy::cast_precision_loss)]
    let text_height = lines.len() as f32 * config.line_height;

    // Smallest axis-aligned ellipse around the padded label box.
    PlacedNode {
        index,
        cx: 0.0,
        cy: 0.0,
        rx: (text_width / 2.0 + config.padding) * SQRT_2,
        ry: (text_height / 2.0 + config.padding) * SQRT_2,
        lines,
    }
}
