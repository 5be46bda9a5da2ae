use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::ValueEnum;

use crate::batch::{BatchOptions, OutputFormat};
use crate::flowchart::{Direction, FlowchartOptions};
use crate::graph::{EdgeStyle, GraphStyle, LayoutConfig};
use crate::walker::TraversalOrder;

#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct ConfigFlags {
    pub format: Option<OutputFormat>,
    pub order: Option<TraversalOrder>,
    pub direction: Option<Direction>,
    pub skip_empty: bool,
    pub directed: bool,
    pub perf: bool,
    pub background: Option<String>,
    pub out_dir: Option<PathBuf>,
}

impl ConfigFlags {
    pub fn union(&self, other: &Self) -> Self {
        Self {
            format: other.format.or(self.format),
            order: other.order.or(self.order),
            direction: other.direction.or(self.direction),
            skip_empty: self.skip_empty || other.skip_empty,
            directed: self.directed || other.directed,
            perf: self.perf || other.perf,
            background: other
                .background
                .clone()
                .or_else(|| self.background.clone()),
            out_dir: other.out_dir.clone().or_else(|| self.out_dir.clone()),
        }
    }

    /// Batch settings these flags describe, defaults filled in.
    pub fn batch_options(&self) -> BatchOptions {
        let mut style = GraphStyle::default();
        if let Some(background) = &self.background {
            style.background.clone_from(background);
        }
        if self.directed {
            style.edge_style = EdgeStyle::Directed;
        }
        BatchOptions {
            format: self.format.unwrap_or_default(),
            order: self.order.unwrap_or_default(),
            flowchart: FlowchartOptions {
                direction: self.direction.unwrap_or_default(),
                skip_empty: self.skip_empty,
            },
            style,
            layout: LayoutConfig::default(),
            out_dir: self.out_dir.clone(),
        }
    }
}

/// Per-user defaults file. `MUPFLOW_CONFIG` overrides the platform location.
pub fn global_config_path() -> PathBuf {
    std::env::var_os("MUPFLOW_CONFIG")
        .map(PathBuf::from)
        .or_else(|| platform_config_dir().map(|dir| dir.join("mupflow").join("config")))
        .unwrap_or_else(local_override_path)
}

fn platform_config_dir() -> Option<PathBuf> {
    let home = || std::env::var_os("HOME").map(PathBuf::from);
    if cfg!(target_os = "windows") {
        std::env::var_os("APPDATA").map(PathBuf::from)
    } else if cfg!(target_os = "macos") {
        home().map(|h| h.join("Library").join("Application Support"))
    } else {
        std::env::var_os("XDG_CONFIG_HOME")
            .map(PathBuf::from)
            .or_else(|| home().map(|h| h.join(".config")))
    }
}

pub fn local_override_path() -> PathBuf {
    PathBuf::from(".mupflowrc")
}

/// Read a flag file: one flag per line, `#` comments.
///
/// A value is separated from its flag by the first `=` or run of spaces and
/// runs to the end of the line, so paths and colors may contain spaces.
pub fn load_config_flags(path: &Path) -> Result<ConfigFlags> {
    let content = match fs::read_to_string(path) {
        Ok(content) => content,
        Err(err) if err.kind() == ErrorKind::NotFound => return Ok(ConfigFlags::default()),
        Err(err) => {
            return Err(err).with_context(|| format!("Failed to read config {}", path.display()));
        }
    };
    let tokens = content
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .flat_map(split_flag_line)
        .collect::<Vec<_>>();
    Ok(parse_flag_tokens(&tokens))
}

fn split_flag_line(line: &str) -> Vec<String> {
    match line.split_once(|c: char| c == '=' || c.is_whitespace()) {
        Some((name, value)) => vec![name.to_string(), value.trim().to_string()],
        None => vec![line.to_string()],
    }
}

pub fn save_config_flags(path: &Path, flags: &ConfigFlags) -> Result<()> {
    let entries: [(&str, Option<String>, bool); 8] = [
        ("--format", flags.format.map(value_name), false),
        ("--order", flags.order.map(value_name), false),
        ("--direction", flags.direction.map(value_name), false),
        ("--skip-empty", None, flags.skip_empty),
        ("--directed", None, flags.directed),
        ("--perf", None, flags.perf),
        ("--background", flags.background.clone(), false),
        (
            "--out-dir",
            flags.out_dir.as_ref().map(|dir| dir.display().to_string()),
            false,
        ),
    ];

    let mut content = String::from("# mupflow defaults (saved with --save)\n");
    for (name, value, switch) in entries {
        match value {
            Some(value) => content.push_str(&format!("{name}={value}\n")),
            None if switch => content.push_str(&format!("{name}\n")),
            None => {}
        }
    }

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create config dir {}", parent.display()))?;
    }
    fs::write(path, content).with_context(|| format!("Failed to write config {}", path.display()))
}

pub fn clear_config_flags(path: &Path) -> Result<()> {
    match fs::remove_file(path) {
        Err(err) if err.kind() != ErrorKind::NotFound => {
            Err(err).with_context(|| format!("Failed to remove {}", path.display()))
        }
        _ => Ok(()),
    }
}

pub fn parse_flag_tokens(tokens: &[String]) -> ConfigFlags {
    let mut flags = ConfigFlags::default();
    let mut i = 0;
    while i < tokens.len() {
        let token = &tokens[i];
        let (name, inline) = match token.split_once('=') {
            Some((name, value)) if name.starts_with("--") => (name, Some(value)),
            _ => (token.as_str(), None),
        };
        let takes_value = matches!(
            name,
            "--format" | "--order" | "--direction" | "--background" | "--out-dir"
        );
        let value = if takes_value && inline.is_none() {
            i += 1;
            tokens.get(i).map(String::as_str)
        } else {
            inline
        };

        match (name, value) {
            ("--skip-empty", None) => flags.skip_empty = true,
            ("--directed", None) => flags.directed = true,
            ("--perf", None) => flags.perf = true,
            ("--format", Some(v)) => flags.format = parse_value(v),
            ("--order", Some(v)) => flags.order = parse_value(v),
            ("--direction", Some(v)) => flags.direction = parse_value(v),
            ("--background", Some(v)) => flags.background = Some(v.to_string()),
            ("--out-dir", Some(v)) => flags.out_dir = Some(PathBuf::from(v)),
            _ => {}
        }
        i += 1;
    }
    flags
}

fn parse_value<T: ValueEnum>(s: &str) -> Option<T> {
    T::from_str(s, true).ok()
}

fn value_name<T: ValueEnum>(value: T) -> String {
    value
        .to_possible_value()
        .map(|v| v.get_name().to_string())
        .unwrap_or_default()
}
