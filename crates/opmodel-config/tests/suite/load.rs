use opmodel_config::{ConfigError, LoggingConfig, ModelConfig, ResolverConfig, Selection};
use opmodel_resolve::{SelectionMode, DEFAULT_MAX_TUPLES};

use pretty_assertions::assert_eq;

#[test]
fn empty_file_uses_defaults() {
    let config = ModelConfig::load_from_str("").unwrap();
    assert_eq!(config, ModelConfig::default());
    assert_eq!(config.resolver.seed, 0);
    assert_eq!(config.resolver.selection, Selection::Random);
    assert_eq!(config.resolver.max_tuples, DEFAULT_MAX_TUPLES);
    assert_eq!(config.logging.level, "info");
    assert!(config.logging.stderr);
    assert!(!config.logging.json);
}

#[test]
fn loads_from_path() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("opmodel.toml");
    std::fs::write(
        &path,
        r#"
[resolver]
seed = 42
selection = "first"
max_tuples = 500

[logging]
level = "debug"
json = true
"#,
    )
    .unwrap();

    let config = ModelConfig::load_from_path(&path).unwrap();
    assert_eq!(
        config.resolver,
        ResolverConfig {
            seed: 42,
            selection: Selection::First,
            max_tuples: 500,
        }
    );
    assert_eq!(
        config.logging,
        LoggingConfig {
            level: "debug".to_string(),
            json: true,
            stderr: true,
        }
    );

    let resolver = config.resolver.resolver();
    assert_eq!(resolver.options().selection, SelectionMode::First);
    assert_eq!(resolver.options().max_tuples, Some(500));
    assert_eq!(resolver.randomness().seed(), 42);
}

#[test]
fn unknown_keys_are_rejected() {
    let err = ModelConfig::load_from_str("[resolver]\nsead = 1\n").unwrap_err();
    assert!(matches!(err, ConfigError::Toml(ref message) if message.contains("sead")));

    let err = ModelConfig::load_from_str("[output]\nformat = \"json\"\n").unwrap_err();
    assert!(matches!(err, ConfigError::Toml(_)));
}

#[test]
fn bad_selection_is_rejected() {
    let err = ModelConfig::load_from_str("[resolver]\nselection = \"best\"\n").unwrap_err();
    assert!(matches!(err, ConfigError::Toml(_)));
}

#[test]
fn missing_file_reports_its_path() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("missing.toml");

    let err = ModelConfig::load_from_path(&path).unwrap_err();
    match err {
        ConfigError::Io { path: reported, .. } => {
            assert_eq!(reported, path.display().to_string())
        }
        other => panic!("expected an io error, got {other:?}"),
    }
}
