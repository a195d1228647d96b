use siteline::config::{ClientConfig, StorageConfig, load_config};
use siteline::session::{AUTH_TOKEN_KEY, SessionState};
use siteline::storage::{FileStore, KeyValueStore};
use tempfile::TempDir;

#[test]
fn config_defaults_are_sane() {
    let cfg = ClientConfig::default();
    assert_eq!(cfg.storage.data_dir, std::path::PathBuf::from("."));
    assert!(cfg.storage.create);
}

#[test]
fn config_deserializes() {
    let raw = serde_json::json!({
        "storage": { "data_dir": "/tmp/siteline", "create": false }
    });

    let cfg: ClientConfig = serde_json::from_value(raw).expect("config deserialize");
    assert_eq!(cfg.storage.data_dir, std::path::PathBuf::from("/tmp/siteline"));
    assert!(!cfg.storage.create);
}

#[test]
fn config_loads_from_file() {
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("client.toml");
    std::fs::write(&path, "[storage]\ndata_dir = \"/var/lib/siteline\"\n").unwrap();

    let cfg: ClientConfig = load_config(Some(&path)).expect("config load");
    assert_eq!(cfg.storage.data_dir, std::path::PathBuf::from("/var/lib/siteline"));
    assert!(cfg.storage.create, "unset fields fall back to defaults");
}

#[test]
fn config_load_missing_file_errors() {
    let result: Result<ClientConfig, _> = load_config(Some("/nonexistent/siteline-client"));
    assert!(result.is_err());
}

#[test]
fn init_wires_session_over_file_storage() {
    let temp = TempDir::new().unwrap();
    let cfg = ClientConfig {
        storage: StorageConfig { data_dir: temp.path().to_path_buf(), create: true },
    };

    let session = siteline::init(&cfg).expect("init");
    assert_eq!(session.state(), SessionState::Anonymous);

    session.update_auth_token("tok_wired").unwrap();

    // The token landed in the configured storage root under the fixed key.
    let store = FileStore::builder().root(temp.path()).create(false).open().unwrap();
    assert_eq!(store.get(AUTH_TOKEN_KEY).unwrap().as_deref(), Some("tok_wired"));
}

#[test]
fn init_picks_up_previous_session() {
    let temp = TempDir::new().unwrap();
    let cfg = ClientConfig {
        storage: StorageConfig { data_dir: temp.path().to_path_buf(), create: true },
    };

    {
        let session = siteline::init(&cfg).expect("first init");
        session.update_auth_token("tok_restart").unwrap();
    }

    let session = siteline::init(&cfg).expect("second init");
    assert_eq!(session.auth_token().as_deref(), Some("tok_restart"));
    assert_eq!(session.state(), SessionState::Authenticated);
}

#[test]
fn init_fails_on_missing_root_without_create() {
    let temp = TempDir::new().unwrap();
    let cfg = ClientConfig {
        storage: StorageConfig { data_dir: temp.path().join("missing"), create: false },
    };

    assert!(siteline::init(&cfg).is_err());
}
