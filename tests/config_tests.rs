use std::io::Write;
use tempfile::NamedTempFile;

use reltime::util::config::{AppConfig, ExampleConfig};

#[test]
fn test_load_full_config() {
    let toml = r#"
[demo]
initial_time = "2024-03-14T09:26:53Z"
examples = [
    { label = "just now", offset_secs = 1 },
    { label = "a week ago", offset_secs = 604800 },
]

[ui]
show_iso = false
show_update_counts = false
"#;
    let mut f = NamedTempFile::new().unwrap();
    f.write_all(toml.as_bytes()).unwrap();

    let config = AppConfig::load(Some(f.path())).unwrap();
    assert_eq!(
        config.demo.initial_time.as_deref(),
        Some("2024-03-14T09:26:53Z")
    );
    assert_eq!(
        config.demo.examples,
        vec![
            ExampleConfig {
                label: "just now".into(),
                offset_secs: 1
            },
            ExampleConfig {
                label: "a week ago".into(),
                offset_secs: 604_800
            },
        ]
    );
    assert!(!config.ui.show_iso);
    assert!(!config.ui.show_update_counts);
}

#[test]
fn test_load_partial_config_uses_defaults() {
    let toml = r#"
[ui]
show_iso = false
"#;
    let mut f = NamedTempFile::new().unwrap();
    f.write_all(toml.as_bytes()).unwrap();

    let config = AppConfig::load(Some(f.path())).unwrap();
    assert!(!config.ui.show_iso);
    assert!(config.ui.show_update_counts);
    assert!(config.demo.initial_time.is_none());
    assert_eq!(config.demo.examples.len(), 7);
}

#[test]
fn test_load_empty_config_uses_all_defaults() {
    let mut f = NamedTempFile::new().unwrap();
    f.write_all(b"").unwrap();

    let config = AppConfig::load(Some(f.path())).unwrap();
    assert!(config.ui.show_iso);
    assert_eq!(config.demo.examples.len(), 7);
}

#[test]
fn test_empty_examples_list_is_kept() {
    let mut f = NamedTempFile::new().unwrap();
    f.write_all(b"[demo]\nexamples = []\n").unwrap();

    let config = AppConfig::load(Some(f.path())).unwrap();
    assert!(config.demo.examples.is_empty());
}

#[test]
fn test_load_nonexistent_file_fails() {
    let result = AppConfig::load(Some(std::path::Path::new("/nonexistent/path/config.toml")));
    assert!(result.is_err());
}

#[test]
fn test_load_invalid_toml_fails() {
    let mut f = NamedTempFile::new().unwrap();
    f.write_all(b"this is not [valid toml {{").unwrap();

    let result = AppConfig::load(Some(f.path()));
    assert!(result.is_err());
}

#[test]
fn test_default_config() {
    let config = AppConfig::default();
    assert!(config.demo.initial_time.is_none());
    assert!(config.ui.show_iso);
    assert!(config.ui.show_update_counts);

    let offsets: Vec<i64> = config.demo.examples.iter().map(|e| e.offset_secs).collect();
    assert_eq!(
        offsets,
        vec![5, 30, 120, 10_800, 172_800, 7_776_000, 63_072_000]
    );
    assert_eq!(config.demo.examples[5].label, "3 months ago");
}
