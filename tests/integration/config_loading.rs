//! Layered configuration loading

use super::test_utils::with_xdg_env;
use graphsync::config::{ConfigLoader, DEFAULT_BASE_URL};
use tempfile::TempDir;

fn write_global(test_dir: &TempDir, contents: &str) {
    let dir = test_dir.path().join("config").join("graphsync");
    std::fs::create_dir_all(&dir).unwrap();
    std::fs::write(dir.join("config.toml"), contents).unwrap();
}

#[test]
fn test_defaults_without_any_file() {
    let test_dir = TempDir::new().unwrap();
    with_xdg_env(&test_dir, || {
        let config = ConfigLoader::load(None).unwrap();
        assert_eq!(config.remote.base_url, DEFAULT_BASE_URL);
        assert_eq!(config.remote.page_size, 200);
        assert_eq!(config.logging.level, "info");
    });
}

#[test]
fn test_global_file_is_picked_up() {
    let test_dir = TempDir::new().unwrap();
    with_xdg_env(&test_dir, || {
        write_global(&test_dir, "[remote]\npage_size = 25\n");
        let expected = test_dir
            .path()
            .join("config")
            .join("graphsync")
            .join("config.toml");
        assert_eq!(ConfigLoader::global_config_path(), Some(expected));

        let config = ConfigLoader::load(None).unwrap();
        assert_eq!(config.remote.page_size, 25);
    });
}

#[test]
fn test_explicit_file_overrides_global_file() {
    let test_dir = TempDir::new().unwrap();
    with_xdg_env(&test_dir, || {
        write_global(&test_dir, "[remote]\npage_size = 25\nbase_url = \"http://global\"\n");
        let explicit = test_dir.path().join("explicit.toml");
        std::fs::write(&explicit, "[remote]\npage_size = 75\n").unwrap();

        let config = ConfigLoader::load(Some(&explicit)).unwrap();
        assert_eq!(config.remote.page_size, 75);
        assert_eq!(config.remote.base_url, "http://global");
    });
}

#[test]
fn test_environment_overrides_files() {
    let test_dir = TempDir::new().unwrap();
    with_xdg_env(&test_dir, || {
        write_global(&test_dir, "[remote]\npage_size = 25\n");
        std::env::set_var("GRAPHSYNC__REMOTE__PAGE_SIZE", "10");

        let config = ConfigLoader::load(None).unwrap();
        assert_eq!(config.remote.page_size, 10);
    });
}

#[test]
fn test_invalid_global_value_fails_validation() {
    let test_dir = TempDir::new().unwrap();
    with_xdg_env(&test_dir, || {
        write_global(&test_dir, "[remote]\nbase_url = \"ftp://nope\"\n");
        assert!(ConfigLoader::load(None).is_err());
    });
}
