//! Configuration loading, validation and templates

use figment::Jail;
use mmr_application::ComponentManager;
use mmr_application::use_cases::extraction::FailurePolicy;
use mmr_domain::error::ErrorKind;
use mmr_infrastructure::config::{AppConfig, ConfigLoader, validate_app_config};
use serde_json::json;

const NULL_STACK: &str = r#"
[logging]
level = "warn"

[pipeline]
failure_policy = "best_effort"
call_timeout_secs = 5

[components.text_embedding]
implementation_type = "null"

[components.text_embedding.null]
dimension = 8

[components.search_engine]
implementation_type = "memory"
"#;

/// Loader reading `path` and no environment variables
fn isolated(path: &std::path::Path) -> ConfigLoader {
    ConfigLoader::new()
        .with_config_path(path)
        .with_env_prefix("MMR_TEST_UNSET")
}

#[test]
fn test_defaults_without_any_source() {
    let config = AppConfig::default();
    assert_eq!(config.logging.level, "info");
    assert_eq!(config.pipeline.failure_policy, FailurePolicy::FailFast);
    assert!(config.components.is_empty());
    validate_app_config(&config).unwrap();
}

#[test]
fn test_load_explicit_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("custom.toml");
    std::fs::write(&path, NULL_STACK).unwrap();

    let config = isolated(&path).load().unwrap();

    assert_eq!(config.logging.level, "warn");
    assert_eq!(config.pipeline.failure_policy, FailurePolicy::BestEffort);
    assert_eq!(config.pipeline.call_timeout_secs, 5);
    assert_eq!(
        config.components["text_embedding"],
        json!({"implementation_type": "null", "null": {"dimension": 8}})
    );
}

#[test]
fn test_missing_explicit_file_falls_back_to_defaults() {
    let dir = tempfile::tempdir().unwrap();
    let config = isolated(&dir.path().join("absent.toml")).load().unwrap();
    assert_eq!(config.logging, AppConfig::default().logging);
}

#[test]
fn test_config_source_reports_explicit_and_default_files() {
    let dir = tempfile::tempdir().unwrap();
    let absent = dir.path().join("absent.toml");
    assert_eq!(isolated(&absent).config_source(), Some((absent.clone(), false)));

    let present = dir.path().join("custom.toml");
    std::fs::write(&present, NULL_STACK).unwrap();
    assert_eq!(isolated(&present).config_source(), Some((present.clone(), true)));

    Jail::expect_with(|jail| {
        jail.create_file("mmr.toml", NULL_STACK)?;
        let (path, found) = ConfigLoader::new()
            .config_source()
            .ok_or("default file not reported")?;
        assert!(found);
        assert_eq!(path.file_name().and_then(|n| n.to_str()), Some("mmr.toml"));
        Ok(())
    });
}

#[test]
fn test_invalid_values_are_configuration_errors() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("bad.toml");

    std::fs::write(&path, "[logging]\nlevel = \"loud\"\n").unwrap();
    let err = isolated(&path).load().unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Configuration);
    assert!(err.to_string().contains("loud"), "{err}");

    std::fs::write(&path, "[pipeline]\ncall_timeout_secs = 0\n").unwrap();
    let err = isolated(&path).load().unwrap_err();
    assert!(err.to_string().contains("call_timeout_secs"), "{err}");

    std::fs::write(&path, "[pipeline]\ncall_timeout_secs = \"soon\"\n").unwrap();
    let err = isolated(&path).load().unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Configuration);
}

#[test]
fn test_default_file_and_environment_override() {
    Jail::expect_with(|jail| {
        jail.create_file("mmr.toml", NULL_STACK)?;
        jail.set_env("MMR__LOGGING__LEVEL", "debug");
        jail.set_env("MMR__COMPONENTS__TEXT_EMBEDDING__NULL__DIMENSION", "32");
        jail.set_env("MMR__COMPONENTS__ASR__IMPLEMENTATION_TYPE", "null");

        let config = ConfigLoader::new().load().map_err(|e| e.to_string())?;

        assert_eq!(config.logging.level, "debug");
        assert_eq!(config.components["text_embedding"]["null"]["dimension"], json!(32));
        assert_eq!(
            config.components["text_embedding"]["implementation_type"],
            json!("null")
        );
        assert_eq!(config.components["asr"]["implementation_type"], json!("null"));
        Ok(())
    });
}

#[test]
fn test_template_covers_every_category_and_loads_back() {
    let template = ConfigLoader::generate_template(&ComponentManager::from_registered()).unwrap();

    for category in [
        "text_embedding",
        "image_embedding",
        "video_embedding",
        "asr",
        "vlm",
        "search_engine",
        "storage",
    ] {
        assert!(
            template.contains(&format!("[components.{category}")),
            "template misses {category}"
        );
    }
    assert!(template.contains("dashscope_api_key"));

    let parsed: AppConfig = toml::from_str(&template).unwrap();
    assert_eq!(parsed.components.len(), 7);
    assert_eq!(
        parsed.components["search_engine"]["implementation_type"],
        json!("memory")
    );
}

#[test]
fn test_save_to_file_round_trip() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("saved.toml");
    let mut config = AppConfig::default();
    config.logging.json_format = true;
    config.components.insert(
        "storage".to_string(),
        json!({"implementation_type": "memory", "memory": {}}),
    );

    let loader = isolated(&path);
    loader.save_to_file(&config, &path).unwrap();
    let loaded = loader.load().unwrap();

    assert!(loaded.logging.json_format);
    assert_eq!(loaded.components["storage"]["implementation_type"], json!("memory"));
}
