//! Error types shared by the loader, emitters and batch driver.

use std::path::PathBuf;

use thiserror::Error;

/// Result type for conversion operations
pub type DiagramResult<T> = Result<T, DiagramError>;

/// Everything that can go wrong while turning mind maps into diagrams.
#[derive(Debug, Error)]
pub enum DiagramError {
    /// The batch input path is not a directory
    #[error("the provided path '{}' is not a valid directory", path.display())]
    InvalidDirectory {
        /// Path given on the command line
        path: PathBuf,
    },

    /// A file could not be parsed as a mind map document
    #[error("could not decode {}: {source}", path.display())]
    MalformedInput {
        /// File being loaded
        path: PathBuf,
        /// Underlying JSON or shape error
        #[source]
        source: serde_json::Error,
    },

    /// A renderer failed to produce an artifact
    #[error("could not render {}: {message}", path.display())]
    RenderingFailure {
        /// Input document the artifact was generated for
        path: PathBuf,
        /// Renderer error chain, flattened
        message: String,
    },

    /// Reading an input or writing an artifact failed
    #[error("i/o error on {}: {source}", path.display())]
    Io {
        /// File or directory involved
        path: PathBuf,
        /// Underlying error
        #[source]
        source: std::io::Error,
    },
}

impl DiagramError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    pub(crate) fn rendering(path: impl Into<PathBuf>, err: &anyhow::Error) -> Self {
        Self::RenderingFailure {
            path: path.into(),
            message: format!("{err:#}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_directory_message_names_path() {
        let err = DiagramError::InvalidDirectory {
            path: PathBuf::from("/no/such/dir"),
        };
        assert_eq!(
            err.to_string(),
            "the provided path '/no/such/dir' is not a valid directory"
        );
    }

    #[test]
    fn test_rendering_failure_keeps_error_chain() {
        let inner = anyhow::anyhow!("pixmap too large").context("rasterize");
        let err = DiagramError::rendering("map.json", &inner);
        let message = err.to_string();
        assert!(message.contains("map.json"));
        assert!(message.contains("rasterize: pixmap too large"));
    }
}
