//! SVG output for laid-out graphs.

use super::layout::{compute_layout, Layout, LayoutConfig};
use super::{EdgeStyle, Graph, GraphRenderer};

const FONT_FAMILY: &str = "Times,serif";
const STROKE: &str = "black";

/// Renders graphs as standalone SVG documents.
#[derive(Debug, Default, Clone)]
pub struct SvgRenderer {
    pub config: LayoutConfig,
}

impl SvgRenderer {
    pub const fn new(config: LayoutConfig) -> Self {
        Self { config }
    }
}

impl GraphRenderer for SvgRenderer {
    fn extension(&self) -> &'static str {
        "svg"
    }

    fn render(&self, graph: &Graph) -> anyhow::Result<Vec<u8>> {
        Ok(render_svg(graph, &self.config).into_bytes())
    }
}

/// Lay out `graph` and write it as SVG markup.
///
/// Output is fully determined by the graph and config, so identical input
/// produces byte-identical files.
pub fn render_svg(graph: &Graph, config: &LayoutConfig) -> String {
    let layout = compute_layout(graph, config);
    let directed = graph.style.edge_style == EdgeStyle::Directed;
    let mut svg = String::new();

    svg.push_str("<?xml version=\"1.0\" encoding=\"UTF-8\" standalone=\"no\"?>\n");
    svg.push_str(&format!(
        "<svg xmlns=\"http://www.w3.org/2000/svg\" width=\"{w:.0}pt\" height=\"{h:.0}pt\" viewBox=\"0.00 0.00 {w:.2} {h:.2}\">\n",
        w = layout.width.ceil(),
        h = layout.height.ceil(),
    ));
    svg.push_str(&format!("<title>{}</title>\n", escape_xml(&graph.name)));
    if directed {
        svg.push_str(concat!(
            "<defs>\n",
            "<marker id=\"arrow\" viewBox=\"0 0 10 10\" refX=\"10\" refY=\"5\" ",
            "markerWidth=\"8\" markerHeight=\"8\" orient=\"auto\">\n",
            "<path d=\"M0,0 L10,5 L0,10 z\" fill=\"black\"/>\n",
            "</marker>\n",
            "</defs>\n",
        ));
    }
    svg.push_str(&format!(
        "<rect class=\"background\" x=\"0\" y=\"0\" width=\"100%\" height=\"100%\" fill=\"{}\"/>\n",
        escape_xml(&graph.style.background)
    ));

    push_edges(&mut svg, &layout, directed);
    push_nodes(&mut svg, graph, &layout, config);

    svg.push_str("</svg>\n");
    svg
}

fn push_edges(svg: &mut String, layout: &Layout, directed: bool) {
    svg.push_str("<g class=\"edges\">\n");
    let marker = if directed {
        " marker-end=\"url(#arrow)\""
    } else {
        ""
    };
    for &(from, to) in &layout.edges {
        let (a, b) = (&layout.nodes[from], &layout.nodes[to]);
        let (x1, y1) = boundary_point(a.cx, a.cy, a.rx, a.ry, b.cx, b.cy);
        let (x2, y2) = boundary_point(b.cx, b.cy, b.rx, b.ry, a.cx, a.cy);
        svg.push_str(&format!(
            "<line x1=\"{x1:.2}\" y1=\"{y1:.2}\" x2=\"{x2:.2}\" y2=\"{y2:.2}\" stroke=\"{STROKE}\"{marker}/>\n"
        ));
    }
    svg.push_str("</g>\n");
}

fn push_nodes(svg: &mut String, graph: &Graph, layout: &Layout, config: &LayoutConfig) {
    svg.push_str("<g class=\"nodes\">\n");
    for ((id, _), node) in graph.vertices().zip(&layout.nodes) {
        svg.push_str(&format!(
            "<g class=\"node\" id=\"node{}\">\n<title>{}</title>\n",
            node.index + 1,
            escape_xml(&id.to_string())
        ));
        svg.push_str(&format!(
            "<ellipse cx=\"{:.2}\" cy=\"{:.2}\" rx=\"{:.2}\" ry=\"{:.2}\" fill=\"none\" stroke=\"{STROKE}\"/>\n",
            node.cx, node.cy, node.rx, node.ry
        ));

        #[allow(clippy::cast_precision_loss)]
        let block = node.lines.len() as f32 * config.line_height;
        let mut baseline = node.cy - block / 2.0 + config.line_height * 0.75;
        for line in &node.lines {
            svg.push_str(&format!(
                "<text text-anchor=\"middle\" x=\"{:.2}\" y=\"{baseline:.2}\" font-family=\"{FONT_FAMILY}\" font-size=\"{:.2}\">{}</text>\n",
                node.cx,
                config.font_size,
                escape_xml(line)
            ));
            baseline += config.line_height;
        }
        svg.push_str("</g>\n");
    }
    svg.push_str("</g>\n");
}

/// Point where the ray from an ellipse's center towards `(tx, ty)` leaves it.
fn boundary_point(cx: f32, cy: f32, rx: f32, ry: f32, tx: f32, ty: f32) -> (f32, f32) {
    let (dx, dy) = (tx - cx, ty - cy);
    if dx == 0.0 && dy == 0.0 {
        return (cx, cy);
    }
    let t = 1.0 / ((dx / rx).powi(2) + (dy / ry).powi(2)).sqrt();
    (cx + dx * t, cy + dy * t)
}

/// Escape text for use in XML content and attribute values.
fn escape_xml(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(ch),
        }
    }
    out
}
