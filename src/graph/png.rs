//! PNG output.
//!
//! Renders the SVG produced by [`SvgRenderer`] with `resvg` and encodes the
//! pixmap with `image`.

use std::io::Cursor;
use std::sync::Arc;

use anyhow::{Context, Result};
use image::{DynamicImage, ImageFormat};
use resvg::usvg::fontdb;

use super::layout::LayoutConfig;
use super::svg::render_svg;
use super::{Graph, GraphRenderer};

/// Rasterizes graphs to PNG.
pub struct PngRenderer {
    config: LayoutConfig,
    scale: f32,
    fontdb: Arc<fontdb::Database>,
}

impl PngRenderer {
    /// Create a renderer drawing one SVG unit as `scale` pixels.
    ///
    /// Loads the system fonts once; reuse the renderer across files.
    pub fn new(config: LayoutConfig, scale: f32) -> Self {
        let mut db = fontdb::Database::new();
        db.load_system_fonts();
        Self {
            config,
            scale,
            fontdb: Arc::new(db),
        }
    }
}

impl GraphRenderer for PngRenderer {
    fn extension(&self) -> &'static str {
        "png"
    }

    fn render(&self, graph: &Graph) -> Result<Vec<u8>> {
        let svg = render_svg(graph, &self.config);
        let image = rasterize_svg(&svg, self.scale, &self.fontdb).context("rasterize svg")?;
        let mut bytes = Vec::new();
        image
            .write_to(&mut Cursor::new(&mut bytes), ImageFormat::Png)
            .context("encode png")?;
        Ok(bytes)
    }
}

/// Rasterize an SVG string to a `DynamicImage` at `scale` pixels per unit.
fn rasterize_svg(svg: &str, scale: f32, fontdb: &Arc<fontdb::Database>) -> Result<DynamicImage> {
    let opts = resvg::usvg::Options {
        fontdb: Arc::clone(fontdb),
        ..Default::default()
    };

    let tree = resvg::usvg::Tree::from_str(svg, &opts)?;
    let size = tree.size();

    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    let width = (size.width() * scale).ceil() as u32;
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    let height = (size.height() * scale).ceil() as u32;

    let mut pixmap = resvg::tiny_skia::Pixmap::new(width, height)
        .ok_or_else(|| anyhow::anyhow!("failed to create pixmap {width}x{height}"))?;

    resvg::render(
        &tree,
        resvg::tiny_skia::Transform::from_scale(scale, scale),
        &mut pixmap.as_mut(),
    );

    // tiny-skia stores premultiplied alpha.
    let rgba = pixmap
        .pixels()
        .iter()
        .flat_map(|px| {
            let c = px.demultiply();
            [c.red(), c.green(), c.blue(), c.alpha()]
        })
        .collect();
    let img_buf = image::RgbaImage::from_raw(width, height, rgba)
        .ok_or_else(|| anyhow::anyhow!("failed to create image from pixmap data"))?;

    Ok(DynamicImage::ImageRgba8(img_buf))
}
