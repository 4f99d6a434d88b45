use super::*;
use tempfile::tempdir;

#[test]
fn missing_file_yields_defaults() {
    let dir = tempdir().unwrap();
    let config = Config::load_from(&dir.path().join("config.json")).unwrap();
    assert_eq!(config.server_url(), DEFAULT_SERVER_URL);
    assert_eq!(config.model(), DEFAULT_MODEL);
}

#[test]
fn save_and_reload_round_trip() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("nested").join("config.json");

    let config = Config {
        server_url: Some("http://127.0.0.1:9999".to_string()),
        default_model: Some("gemini-2.5-pro".to_string()),
    };
    config.save_to(&path).unwrap();

    let loaded = Config::load_from(&path).unwrap();
    assert_eq!(loaded.server_url(), "http://127.0.0.1:9999");
    assert_eq!(loaded.model(), "gemini-2.5-pro");
}

#[test]
fn corrupt_file_is_an_error() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("config.json");
    std::fs::write(&path, "not json").unwrap();
    assert!(Config::load_from(&path).is_err());
}
