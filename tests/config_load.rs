use std::time::Duration;

use pgquest::config::Config;
use pgquest::worlds::WorldKind;
use tempfile::tempdir;

#[tokio::test]
async fn load_full_config() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("config.toml");
    tokio::fs::write(
        &path,
        r#"
[server]
listen_addr = "127.0.0.1:6543"
server_version = "15.4"
idle_timeout_secs = 120
max_frame_len = 4096

[game]
world = "forest"
banner_on_connect = false

[logging]
level = "debug"
"#,
    )
    .await
    .unwrap();

    let config = Config::load(path.to_str().unwrap()).await.unwrap();
    assert_eq!(config.server.listen_addr, "127.0.0.1:6543");
    assert_eq!(config.server.server_version, "15.4");
    assert_eq!(config.server.idle_timeout(), Some(Duration::from_secs(120)));
    assert_eq!(config.server.max_frame_len, 4096);
    assert_eq!(config.game.world, WorldKind::Forest);
    assert!(!config.game.banner_on_connect);
    assert_eq!(config.logging.level, "debug");
}

#[tokio::test]
async fn missing_file_is_an_error() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("absent.toml");
    let err = Config::load(path.to_str().unwrap()).await.unwrap_err();
    assert!(err.to_string().contains("Failed to read config file"));
}

#[tokio::test]
async fn invalid_listen_addr_is_rejected() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("config.toml");
    tokio::fs::write(&path, "[server]\nlisten_addr = \"not an address\"\n")
        .await
        .unwrap();
    let err = Config::load(path.to_str().unwrap()).await.unwrap_err();
    assert!(err.to_string().contains("listen_addr"));
}

#[tokio::test]
async fn default_file_round_trips() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("config.toml");
    let path = path.to_str().unwrap();

    Config::create_default(path).await.unwrap();
    let config = Config::load(path).await.unwrap();
    assert_eq!(config.server.listen_addr, "0.0.0.0:5432");
    assert_eq!(config.server.idle_timeout(), None);
    assert_eq!(config.logging.file.as_deref(), Some("pgquest.log"));
}
