//! Tests for configuration module.

use super::app::expand_home;
use super::types::ThemePreference;
use super::*;
use std::path::PathBuf;
use tempfile::TempDir;
use test_case::test_case;

const CUSTOM_CONFIG: &str = r#"
[settings]
store_path = "/var/lib/constkeeper/constants.toml"
default_environment = "prod"
theme = "light"

[[environments]]
id = "dev"
name = "development"

[[environments]]
id = "prod"
name = "production"
"#;

fn get_a_config_path(dir: &TempDir) -> PathBuf {
    dir.path().join("config.toml")
}

fn load_from(content: &str) -> Result<AppConfig, config::ConfigError> {
    let dir = TempDir::new().unwrap_or_else(|e| panic!("{}", e));
    let path = get_a_config_path(&dir);
    std::fs::write(&path, content).unwrap_or_else(|e| panic!("{}", e));
    AppConfig::load(Some(&path))
}

#[test]
fn missing_file_uses_defaults() {
    let dir = TempDir::new().unwrap_or_else(|e| panic!("{}", e));
    let config = AppConfig::load(Some(get_a_config_path(&dir)))
        .unwrap_or_else(|e| panic!("load failed: {}", e));

    let ids: Vec<&str> = config.environments.iter().map(|e| e.id.as_str()).collect();
    assert_eq!(ids, vec!["development", "staging", "production"]);
    assert_eq!(config.default_environment, "development");
    assert_eq!(config.theme, ThemePreference::Auto);
    assert!(config.store_path.ends_with(".constkeeper/constants.toml"));
}

#[test]
fn custom_file_is_applied() {
    let config = load_from(CUSTOM_CONFIG).unwrap_or_else(|e| panic!("load failed: {}", e));
    assert_eq!(
        config.store_path,
        PathBuf::from("/var/lib/constkeeper/constants.toml")
    );
    assert_eq!(config.theme, ThemePreference::Light);

    let env = config
        .environment(None)
        .unwrap_or_else(|e| panic!("no default environment: {}", e));
    assert_eq!(env.id, "prod");
    assert_eq!(env.name, "production");
}

#[test]
fn environments_default_when_only_settings_are_given() {
    let config = load_from("[settings]\ntheme = \"dark\"\n")
        .unwrap_or_else(|e| panic!("load failed: {}", e));
    assert_eq!(config.environments.len(), 3);
    assert_eq!(config.default_environment, "development");
    assert_eq!(config.theme.resolve(), constkeeper_tui::Theme::Dark);
}

#[test_case(Some("dev"), "dev" ; "by id")]
#[test_case(Some("Development"), "dev" ; "by name ignoring case")]
#[test_case(None, "prod" ; "default")]
fn environment_resolution(requested: Option<&str>, expected_id: &str) {
    let config = load_from(CUSTOM_CONFIG).unwrap_or_else(|e| panic!("load failed: {}", e));
    let env = config
        .environment(requested)
        .unwrap_or_else(|e| panic!("resolution failed: {}", e));
    assert_eq!(env.id, expected_id);
}

#[test]
fn unknown_environment_lists_configured_ones() {
    let config = load_from(CUSTOM_CONFIG).unwrap_or_else(|e| panic!("load failed: {}", e));
    let message = match config.environment(Some("qa")) {
        Ok(env) => panic!("unexpected environment {:?}", env),
        Err(e) => e.to_string(),
    };
    assert!(message.contains("'qa'"));
    assert!(message.contains("dev, prod"));
}

#[test]
fn environment_name_defaults_to_id() {
    let config = load_from("[[environments]]\nid = \"qa\"\n")
        .unwrap_or_else(|e| panic!("load failed: {}", e));
    let env = config
        .environment(None)
        .unwrap_or_else(|e| panic!("resolution failed: {}", e));
    assert_eq!(env.name, "qa");
}

#[test_case("environments = []\n" ; "no environments")]
#[test_case("[[environments]]\nid = \"a\"\n[[environments]]\nid = \"a\"\n" ; "duplicate ids")]
#[test_case("[[environments]]\nid = \" \"\n" ; "blank id")]
#[test_case("[settings]\ndefault_environment = \"nope\"\n" ; "unknown default")]
#[test_case("[settings]\ntheme = \"purple\"\n" ; "unknown theme")]
#[test_case("not toml at all" ; "malformed")]
fn invalid_files_are_rejected(content: &str) {
    assert!(load_from(content).is_err());
}

#[test]
fn home_is_expanded_in_paths() {
    let home = dirs::home_dir().unwrap_or_default();
    assert_eq!(expand_home("~/x/constants.toml"), home.join("x/constants.toml"));
    assert_eq!(expand_home("/abs/constants.toml"), PathBuf::from("/abs/constants.toml"));
}
