//! Reading MindMup JSON from disk.

use std::fs;
use std::path::Path;

use serde::Deserialize;

use crate::error::{DiagramError, DiagramResult};

use super::MindmapDocument;

/// Parse MindMup JSON text.
///
/// Only `ideas`, `id` and `title` are read; any other key is ignored.
/// Nesting depth is unbounded: the deserializer grows its stack on the heap.
///
/// # Errors
///
/// Returns the JSON error if the text is not valid JSON or a node lacks
/// `id` or `title`.
pub fn parse(source: &str) -> serde_json::Result<MindmapDocument> {
    let mut json = serde_json::Deserializer::from_str(source);
    json.disable_recursion_limit();
    let doc = MindmapDocument::deserialize(serde_stacker::Deserializer::new(&mut json))?;
    json.end()?;
    Ok(doc)
}

/// Load a mind map document from `path`.
///
/// # Errors
///
/// `Io` if the file cannot be read, `MalformedInput` if it is not a
/// mind map.
pub fn load(path: &Path) -> DiagramResult<MindmapDocument> {
    let content = fs::read_to_string(path).map_err(|err| {
        // Binary files are undecodable input, not a broken disk.
        if err.kind() == std::io::ErrorKind::InvalidData {
            return DiagramError::MalformedInput {
                path: path.to_path_buf(),
                source: serde::de::Error::custom("file is not valid UTF-8"),
            };
        }
        DiagramError::io(path, err)
    })?;
    parse(&content).map_err(|source| DiagramError::MalformedInput {
        path: path.to_path_buf(),
        source,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mindmap::NodeId;
    use tempfile::tempdir;

    const SAMPLE: &str = r#"{
        "formatVersion": 3,
        "id": "root",
        "ideas": {
            "1": {
                "title": "Central",
                "id": 1,
                "attr": {"style": {}},
                "ideas": {
                    "2": {"title": "Second", "id": 3},
                    "1": {"title": "First", "id": "2"}
                }
            }
        }
    }"#;

    #[test]
    fn test_parse_reads_nested_ideas_in_document_order() {
        let doc = parse(SAMPLE).unwrap();
        let root = doc.roots().next().unwrap();
        assert_eq!(root.id, NodeId::Int(1));
        assert_eq!(root.title, "Central");

        let children: Vec<_> = root.children.values().collect();
        assert_eq!(children[0].title, "Second");
        assert_eq!(children[0].id, NodeId::Int(3));
        assert_eq!(children[1].id, NodeId::Text("2".to_string()));
    }

    #[test]
    fn test_parse_treats_missing_ideas_as_leaf() {
        let doc = parse(r#"{"ideas": {"1": {"id": 1, "title": "alone"}}}"#).unwrap();
        assert!(doc.roots().next().unwrap().is_leaf());
    }

    #[test]
    fn test_parse_rejects_node_without_title() {
        let err = parse(r#"{"ideas": {"1": {"id": 1}}}"#).unwrap_err();
        assert!(err.to_string().contains("title"));
    }

    #[test]
    fn test_parse_rejects_node_without_id() {
        let err = parse(r#"{"ideas": {"1": {"title": "x"}}}"#).unwrap_err();
        assert!(err.to_string().contains("id"));
    }

    #[test]
    fn test_parse_rejects_missing_top_level_ideas() {
        assert!(parse(r#"{"title": "nothing"}"#).is_err());
    }

    fn chain_json(depth: usize) -> String {
        let mut json = String::from(r#"{"ideas": {"1": "#);
        for id in 0..depth {
            json.push_str(&format!(r#"{{"id": {id}, "title": "level {id}", "ideas": {{"1": "#));
        }
        json.push_str(r#"{"id": "bottom", "title": "bottom"}"#);
        json.push_str(&"}}".repeat(depth));
        json.push_str("}}");
        json
    }

    #[test]
    fn test_parse_accepts_deeply_nested_maps() {
        let doc = parse(&chain_json(500)).unwrap();
        assert_eq!(doc.node_count(), 501);

        let doc = parse(&chain_json(20_000)).unwrap();
        assert_eq!(doc.node_count(), 20_001);
    }

    #[test]
    fn test_parse_rejects_trailing_garbage() {
        assert!(parse(r#"{"ideas": {}} extra"#).is_err());
    }

    #[test]
    fn test_load_reports_malformed_input_with_path() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("broken.json");
        fs::write(&path, "{ not json").unwrap();

        let err = load(&path).unwrap_err();
        assert!(matches!(err, DiagramError::MalformedInput { .. }));
        assert!(err.to_string().contains("broken.json"));
    }

    #[test]
    fn test_load_reports_binary_file_as_malformed() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("image.png");
        fs::write(&path, [0x89, b'P', b'N', b'G', 0xff, 0xfe]).unwrap();

        let err = load(&path).unwrap_err();
        assert!(matches!(err, DiagramError::MalformedInput { .. }));
    }

    #[test]
    fn test_load_missing_file_is_io_error() {
        let dir = tempdir().unwrap();
        let err = load(&dir.path().join("missing.json")).unwrap_err();
        assert!(matches!(err, DiagramError::Io { .. }));
    }
}
