//! Tests for configuration file loading.

use super::*;
use serial_test::serial;
use std::env;
use std::fs;

fn write_temp_config(name: &str, contents: &str) -> PathBuf {
    let path = env::temp_dir().join(name);
    fs::write(&path, contents).expect("Failed to write test config");
    path
}

#[test]
fn default_config_path_contains_gitscope_config_toml() {
    let path = default_config_path().expect("Should have default path");
    let path_str = path.to_string_lossy();
    assert!(
        path_str.contains("gitscope") && path_str.ends_with("config.toml"),
        "Path should contain 'gitscope' and end with 'config.toml', got: {}",
        path_str
    );
}

#[test]
fn default_log_path_ends_with_gitscope_log() {
    let path = default_log_path();
    assert!(path.to_string_lossy().ends_with("gitscope.log"), "{path:?}");
}

#[test]
fn load_config_file_returns_ok_none_for_missing_file() {
    let result = load_config_file("/nonexistent/path/to/config.toml");
    assert_eq!(result, Ok(None));
}

#[test]
fn load_config_file_parses_valid_toml() {
    let config_path = write_temp_config(
        "gitscope_test_config.toml",
        r#"
tab_size = 4
line_numbers = true
line_number_interval = 10
split_view = false
encoding = "ISO-8859-1"

[commands]
main = "git log --pretty=raw --all %s"
refs = "git show-ref"

[[color]]
area = "diff-add"
fg = "blue"
attributes = ["bold", "underline"]

[[color]]
area = "cursor"
fg = "black"
bg = "yellow"
"#,
    );

    let config = load_config_file(&config_path)
        .expect("Should successfully parse valid TOML")
        .expect("Should return Some(ConfigFile) for existing file");
    fs::remove_file(config_path).ok();

    assert_eq!(config.tab_size, Some(4));
    assert_eq!(config.line_numbers, Some(true));
    assert_eq!(config.line_number_interval, Some(10));
    assert_eq!(config.split_view, Some(false));
    assert_eq!(config.encoding.as_deref(), Some("ISO-8859-1"));

    let commands = config.commands.expect("commands section");
    assert_eq!(commands.main.as_deref(), Some("git log --pretty=raw --all %s"));
    assert_eq!(commands.diff, None);
    assert_eq!(commands.refs.as_deref(), Some("git show-ref"));

    let colors = config.color.expect("color entries");
    assert_eq!(colors.len(), 2);
    assert_eq!(colors[0].area, "diff-add");
    assert_eq!(colors[0].bg, "default");
    assert_eq!(colors[0].attributes, ["bold", "underline"]);
    assert_eq!(colors[1].bg, "yellow");
    assert!(colors[1].attributes.is_empty());
}

#[test]
fn load_config_file_returns_error_for_invalid_toml() {
    let config_path = write_temp_config("gitscope_test_invalid.toml", "tab_size = [");
    let result = load_config_file(&config_path);
    fs::remove_file(&config_path).ok();

    assert!(matches!(result, Err(ConfigError::ParseError { .. })));
}

#[test]
fn load_config_file_rejects_unknown_keys() {
    let config_path = write_temp_config("gitscope_test_unknown.toml", "wrap_lines = true\n");
    let result = load_config_file(&config_path);
    fs::remove_file(&config_path).ok();

    assert!(matches!(result, Err(ConfigError::ParseError { .. })));
}

#[test]
fn merge_config_without_file_yields_defaults() {
    assert_eq!(merge_config(None), ResolvedConfig::default());
}

#[test]
fn merge_config_prefers_file_values() {
    let file = ConfigFile {
        tab_size: Some(2),
        split_view: Some(false),
        commands: Some(CommandsSection {
            diff: Some("git show %s".to_string()),
            ..CommandsSection::default()
        }),
        ..ConfigFile::default()
    };

    let resolved = merge_config(Some(file));
    assert_eq!(resolved.tab_size, 2);
    assert!(!resolved.split_view);
    assert_eq!(resolved.commands.diff, "git show %s");
    assert_eq!(resolved.commands.main, DEFAULT_MAIN_CMD);
    assert_eq!(resolved.line_number_interval, DEFAULT_LINE_NUMBER_INTERVAL);
}

#[test]
fn merge_config_ignores_zero_sizes() {
    let file = ConfigFile {
        tab_size: Some(0),
        line_number_interval: Some(0),
        ..ConfigFile::default()
    };

    let resolved = merge_config(Some(file));
    assert_eq!(resolved.tab_size, DEFAULT_TAB_SIZE);
    assert_eq!(resolved.line_number_interval, DEFAULT_LINE_NUMBER_INTERVAL);
}

#[test]
fn config_file_log_path_overrides_default() {
    let custom_path = PathBuf::from("/custom/path/to/app.log");
    let file = ConfigFile {
        log_file_path: Some(custom_path.clone()),
        ..ConfigFile::default()
    };
    assert_eq!(merge_config(Some(file)).log_file_path, custom_path);
}

#[test]
#[serial(config_env)]
fn env_var_overrides_command_templates() {
    env::set_var("GITSCOPE_MAIN_CMD", "git log --pretty=raw --first-parent %s");
    env::set_var("GITSCOPE_LS_REMOTE", "true");

    let resolved = apply_env_overrides(ResolvedConfig::default());

    env::remove_var("GITSCOPE_MAIN_CMD");
    env::remove_var("GITSCOPE_LS_REMOTE");

    assert_eq!(resolved.commands.main, "git log --pretty=raw --first-parent %s");
    assert_eq!(resolved.commands.refs, "true");
    assert_eq!(resolved.commands.diff, DEFAULT_DIFF_CMD);
}

#[test]
#[serial(config_env)]
fn blank_env_var_is_ignored() {
    env::set_var("GITSCOPE_LOG_CMD", "   ");
    let resolved = apply_env_overrides(ResolvedConfig::default());
    env::remove_var("GITSCOPE_LOG_CMD");

    assert_eq!(resolved.commands.log, DEFAULT_LOG_CMD);
}

#[test]
#[serial(config_env)]
fn explicit_path_beats_env_var() {
    let explicit = write_temp_config("gitscope_test_explicit.toml", "tab_size = 3\n");
    let from_env = write_temp_config("gitscope_test_from_env.toml", "tab_size = 6\n");
    env::set_var("GITSCOPE_CONFIG", &from_env);

    let chosen = load_config_with_precedence(Some(explicit.clone()));
    let fallback = load_config_with_precedence(None);

    env::remove_var("GITSCOPE_CONFIG");
    fs::remove_file(explicit).ok();
    fs::remove_file(from_env).ok();

    assert_eq!(chosen.unwrap().unwrap().tab_size, Some(3));
    assert_eq!(fallback.unwrap().unwrap().tab_size, Some(6));
}

#[test]
fn cli_overrides_take_precedence() {
    let base = ResolvedConfig {
        tab_size: 4,
        line_numbers: false,
        ..ResolvedConfig::default()
    };

    let resolved = apply_cli_overrides(base.clone(), Some(2), Some(true));
    assert_eq!(resolved.tab_size, 2);
    assert!(resolved.line_numbers);

    let untouched = apply_cli_overrides(base.clone(), None, None);
    assert_eq!(untouched, base);
}
