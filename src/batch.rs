//! Directory batch conversion.
//!
//! Every regular file directly inside the input directory is treated as a
//! candidate mind map. A file that fails to load or render is logged and
//! skipped; only an invalid input directory stops the batch.

use std::fs;
use std::path::{Path, PathBuf};

use tracing::{debug, info, warn};

use crate::error::{DiagramError, DiagramResult};
use crate::flowchart::{self, FlowchartOptions};
use crate::graph::{Graph, GraphRenderer, GraphStyle, LayoutConfig, PngRenderer, SvgRenderer};
use crate::mindmap::{self, MindmapDocument};
use crate::perf;
use crate::walker::{walk, TraversalOrder};

/// Suffix inserted between the input stem and the artifact extension.
pub const OUTPUT_SUFFIX: &str = "_mermaid";

/// Which artifacts to write per input file.
#[derive(clap::ValueEnum, Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    /// Mermaid flowchart in a markdown file
    Markdown,
    /// Laid-out graph as SVG
    Svg,
    /// Laid-out graph as PNG
    Png,
    /// Markdown and SVG
    #[default]
    Both,
}

impl OutputFormat {
    const fn markdown(self) -> bool {
        matches!(self, Self::Markdown | Self::Both)
    }

    const fn svg(self) -> bool {
        matches!(self, Self::Svg | Self::Both)
    }

    const fn png(self) -> bool {
        matches!(self, Self::Png)
    }
}

#[derive(Debug, Default, Clone, PartialEq)]
pub struct BatchOptions {
    pub format: OutputFormat,
    pub order: TraversalOrder,
    pub flowchart: FlowchartOptions,
    pub style: GraphStyle,
    pub layout: LayoutConfig,
    /// Where artifacts go; defaults to the input directory
    pub out_dir: Option<PathBuf>,
}

/// A file that produced no (or only some) artifacts.
#[derive(Debug)]
pub struct SkippedFile {
    pub path: PathBuf,
    pub error: DiagramError,
}

#[derive(Debug, Default)]
pub struct BatchReport {
    /// Artifacts written, in processing order
    pub written: Vec<PathBuf>,
    pub skipped: Vec<SkippedFile>,
}

impl BatchReport {
    pub fn is_clean(&self) -> bool {
        self.skipped.is_empty()
    }
}

/// Convert every file in `dir`.
///
/// # Errors
///
/// `InvalidDirectory` if `dir` is not a directory, `Io` if it cannot be
/// listed or the output directory cannot be created. Per-file failures are
/// recorded in the report instead.
pub fn run(dir: &Path, options: &BatchOptions) -> DiagramResult<BatchReport> {
    if !dir.is_dir() {
        return Err(DiagramError::InvalidDirectory {
            path: dir.to_path_buf(),
        });
    }
    let out_dir = options.out_dir.as_deref().unwrap_or(dir);
    fs::create_dir_all(out_dir).map_err(|err| DiagramError::io(out_dir, err))?;

    let mut renderers: Vec<Box<dyn GraphRenderer>> = Vec::new();
    if options.format.svg() {
        renderers.push(Box::new(SvgRenderer::new(options.layout)));
    }
    if options.format.png() {
        renderers.push(Box::new(PngRenderer::new(options.layout, 1.0)));
    }

    let mut report = BatchReport::default();
    for path in list_inputs(dir)? {
        info!("processing: {}", path.display());
        if let Err(error) = convert_file(&path, out_dir, options, &renderers, &mut report.written)
        {
            warn!("{error}");
            report.skipped.push(SkippedFile { path, error });
        }
    }
    Ok(report)
}

/// Regular files directly inside `dir`, sorted by name.
fn list_inputs(dir: &Path) -> DiagramResult<Vec<PathBuf>> {
    let entries = fs::read_dir(dir).map_err(|err| DiagramError::io(dir, err))?;
    let mut files = Vec::new();
    for entry in entries {
        let path = match entry {
            Ok(entry) => entry.path(),
            Err(err) => {
                warn!("unreadable entry in {}: {err}", dir.display());
                continue;
            }
        };
        if path.is_dir() {
            debug!("skipping directory {}", path.display());
            continue;
        }
        files.push(path);
    }
    files.sort();
    Ok(files)
}

fn convert_file(
    path: &Path,
    out_dir: &Path,
    options: &BatchOptions,
    renderers: &[Box<dyn GraphRenderer>],
    written: &mut Vec<PathBuf>,
) -> DiagramResult<()> {
    let doc = {
        let _scope = perf::scope("load", path.display().to_string());
        mindmap::load(path)?
    };

    if options.format.markdown() {
        let _scope = perf::scope("flowchart", path.display().to_string());
        match flowchart::render(walk(&doc, options.order), &options.flowchart) {
            Some(text) => {
                let target = output_path(path, out_dir, "md");
                write_artifact(path, &target, text.as_bytes())?;
                written.push(target);
            }
            None => info!("no edges in {}, flowchart skipped", path.display()),
        }
    }

    if !renderers.is_empty() {
        let graph = build_graph(path, &doc, options);
        for renderer in renderers {
            let _scope = perf::scope("graph", path.display().to_string());
            let bytes = renderer
                .render(&graph)
                .map_err(|err| DiagramError::rendering(path, &err))?;
            let target = output_path(path, out_dir, renderer.extension());
            write_artifact(path, &target, &bytes)?;
            written.push(target);
        }
    }
    Ok(())
}

fn build_graph(path: &Path, doc: &MindmapDocument, options: &BatchOptions) -> Graph {
    let name = path
        .file_stem()
        .map_or_else(|| "mindmap".to_string(), |s| s.to_string_lossy().into_owned());
    Graph::from_document(name, doc, options.order, options.style.clone())
}

fn write_artifact(source: &Path, target: &Path, bytes: &[u8]) -> DiagramResult<()> {
    fs::write(target, bytes).map_err(|err| DiagramError::io(target, err))?;
    info!(
        "Generated diagram for '{}' and saved to '{}'.",
        source.display(),
        target.display()
    );
    Ok(())
}

/// `<out_dir>/<input stem>_mermaid.<extension>`
pub fn output_path(input: &Path, out_dir: &Path, extension: &str) -> PathBuf {
    let stem = input
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default();
    out_dir.join(format!("{stem}{OUTPUT_SUFFIX}.{extension}"))
}
