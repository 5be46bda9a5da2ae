//! Mupflow - convert MindMup mind maps into Mermaid flowcharts and SVG graphs.
//!
//! # Usage
//!
//! ```bash
//! mupflow maps/
//! mupflow --format svg --directed maps/
//! mupflow --order preorder --skip-empty --save
//! ```

use std::path::PathBuf;

use anyhow::Result;
use clap::{CommandFactory, Parser};
use tracing::{error, info, warn};

use mupflow::batch::{self, OutputFormat};
use mupflow::config::{
    clear_config_flags, global_config_path, load_config_flags, local_override_path,
    save_config_flags, ConfigFlags,
};
use mupflow::flowchart::Direction;
use mupflow::perf;
use mupflow::walker::TraversalOrder;

/// Convert every MindMup file in a directory into diagrams
#[derive(Parser, Debug)]
#[command(name = "mupflow", version, about, long_about = None)]
struct Cli {
    /// Directory containing mind map files
    #[arg(value_name = "DIR")]
    dir: Option<PathBuf>,

    /// Artifacts to write for each mind map
    #[arg(long, value_enum)]
    format: Option<OutputFormat>,

    /// Edge order: stack (expand later siblings first) or preorder
    #[arg(long, value_enum)]
    order: Option<TraversalOrder>,

    /// Flowchart direction
    #[arg(long, value_enum)]
    direction: Option<Direction>,

    /// Do not write a flowchart for maps without any edges
    #[arg(long)]
    skip_empty: bool,

    /// Draw graph edges with arrowheads
    #[arg(long)]
    directed: bool,

    /// Graph background color
    #[arg(long, value_name = "COLOR")]
    background: Option<String>,

    /// Write artifacts here instead of next to the inputs
    #[arg(long, value_name = "DIR")]
    out_dir: Option<PathBuf>,

    /// Print per-stage timings
    #[arg(long)]
    perf: bool,

    /// Save current command-line flags as defaults
    #[arg(long)]
    save: bool,

    /// Clear saved defaults
    #[arg(long)]
    clear: bool,
}

impl Cli {
    fn flags(&self) -> ConfigFlags {
        ConfigFlags {
            format: self.format,
            order: self.order,
            direction: self.direction,
            skip_empty: self.skip_empty,
            directed: self.directed,
            perf: self.perf,
            background: self.background.clone(),
            out_dir: self.out_dir.clone(),
        }
    }
}

fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_target(false)
        .init();

    let cli = Cli::parse();
    let global_path = global_config_path();
    let local_path = local_override_path();
    let cli_flags = cli.flags();

    if cli.clear {
        clear_config_flags(&global_path)?;
        info!("cleared defaults in {}", global_path.display());
    }
    if cli.save {
        save_config_flags(&global_path, &cli_flags)?;
        info!("saved defaults to {}", global_path.display());
    }

    let Some(dir) = cli.dir else {
        if !cli.save && !cli.clear {
            Cli::command().print_help()?;
        }
        return Ok(());
    };

    let file_flags = if cli.clear {
        ConfigFlags::default()
    } else {
        let global_flags = load_config_flags(&global_path)?;
        let local_flags = load_config_flags(&local_path)?;
        global_flags.union(&local_flags)
    };
    let effective = file_flags.union(&cli_flags);
    perf::set_enabled(effective.perf);

    let _scope = perf::scope("batch", dir.display().to_string());
    let report = match batch::run(&dir, &effective.batch_options()) {
        Ok(report) => report,
        Err(err) => {
            error!("{err}");
            return Ok(());
        }
    };

    info!(
        "wrote {} file(s), skipped {} input(s)",
        report.written.len(),
        report.skipped.len()
    );
    for skipped in &report.skipped {
        warn!("skipped {}", skipped.path.display());
    }
    Ok(())
}
