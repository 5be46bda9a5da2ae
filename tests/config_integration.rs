use std::path::PathBuf;

use mupflow::batch::OutputFormat;
use mupflow::config::{load_config_flags, parse_flag_tokens, ConfigFlags};
use mupflow::walker::TraversalOrder;

#[test]
fn test_config_file_parsing_ignores_comments_and_blank_lines() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join(".mupflowrc");
    let content = r#"
# comment
--skip-empty

--order preorder
   
--out-dir=diagrams
"#;
    std::fs::write(&path, content).unwrap();

    let flags = load_config_flags(&path).unwrap();
    assert!(flags.skip_empty);
    assert_eq!(flags.order, Some(TraversalOrder::PreOrder));
    assert_eq!(flags.out_dir, Some(PathBuf::from("diagrams")));
}

#[test]
fn test_missing_config_file_yields_defaults() {
    let dir = tempfile::tempdir().unwrap();
    let flags = load_config_flags(&dir.path().join("absent")).unwrap();
    assert_eq!(flags, ConfigFlags::default());
}

#[test]
fn test_cli_flags_override_file_flags() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join(".mupflowrc");
    let content = "--skip-empty\n--format markdown\n--background white\n";
    std::fs::write(&path, content).unwrap();

    let file_flags = load_config_flags(&path).unwrap();
    let cli_flags = ConfigFlags {
        format: Some(OutputFormat::Svg),
        directed: true,
        ..ConfigFlags::default()
    };

    let effective = file_flags.union(&cli_flags);
    assert!(effective.skip_empty, "file flags should remain enabled");
    assert!(effective.directed, "cli flags should be applied");
    assert_eq!(effective.format, Some(OutputFormat::Svg), "cli should override format");
    assert_eq!(
        effective.background.as_deref(),
        Some("white"),
        "file config should be preserved when CLI does not override"
    );
}

#[test]
fn test_parse_flag_tokens_handles_equals_syntax() {
    let args = vec![
        "--format=png".to_string(),
        "--background=#ffeeaa".to_string(),
    ];
    let flags = parse_flag_tokens(&args);
    assert_eq!(flags.format, Some(OutputFormat::Png));
    assert_eq!(flags.background.as_deref(), Some("#ffeeaa"));
}
