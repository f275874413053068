use tempfile::TempDir;
use wpsr_watch::WatchConfig;

fn write_config_file(dir: &TempDir, content: &str) -> String {
    let path = dir.path().join("watch.toml");
    std::fs::write(&path, content).unwrap();
    path.to_str().unwrap().to_string()
}

#[test]
fn defaults_apply_without_a_file() {
    let config = WatchConfig::load_from(["wpsr-watch"]).unwrap();

    assert_eq!(config.data_url, "https://ir.eia.gov/wpsr/table4.csv");
    assert_eq!(config.freshness_days, 7);
    assert_eq!(config.zoom, 2.0);
    assert_eq!(config.max_attempts, 0);
}

#[test]
fn file_fills_in_settings_left_at_their_defaults() {
    let temp_dir = TempDir::new().unwrap();
    let path = write_config_file(
        &temp_dir,
        r#"
        freshness_days = 30
        zoom = 4.0
        "#,
    );

    let config = WatchConfig::load_from(["wpsr-watch", "--config", &path]).unwrap();

    assert_eq!(config.freshness_days, 30);
    assert_eq!(config.zoom, 4.0);
    // Untouched by the file: still the built-in default.
    assert_eq!(config.retry_delay_ms, 250);
}

#[test]
fn explicit_cli_flag_wins_over_the_file() {
    let temp_dir = TempDir::new().unwrap();
    let path = write_config_file(
        &temp_dir,
        r#"
        freshness_days = 30
        zoom = 4.0
        "#,
    );

    let config = WatchConfig::load_from([
        "wpsr-watch",
        "--config",
        &path,
        "--freshness-days",
        "3",
    ])
    .unwrap();

    // The operator said 3; the file must not override it.
    assert_eq!(config.freshness_days, 3);
    // Settings the operator did not pass still come from the file.
    assert_eq!(config.zoom, 4.0);
}

#[test]
fn missing_file_is_a_configuration_error() {
    let config = WatchConfig::load_from(["wpsr-watch", "--config", "/nonexistent/watch.toml"]);
    assert!(config.is_err());
}
