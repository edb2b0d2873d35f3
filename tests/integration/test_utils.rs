//! Shared test utilities for integration tests
//!
//! Serializes environment access and provides account fixtures.

use graphsync::model::{List, User};
use std::sync::Mutex;
use tempfile::TempDir;

/// Serializes tests that change process environment variables.
static ENV_MUTEX: Mutex<()> = Mutex::new(());

/// Variables a test may change, restored afterwards.
const TRACKED_VARS: [&str; 4] = [
    "HOME",
    "XDG_CONFIG_HOME",
    "GRAPHSYNC__REMOTE__PAGE_SIZE",
    "GRAPHSYNC__REMOTE__BASE_URL",
];

struct EnvState {
    values: Vec<(&'static str, Option<String>)>,
}

impl EnvState {
    fn capture() -> Self {
        Self {
            values: TRACKED_VARS
                .iter()
                .map(|name| (*name, std::env::var(name).ok()))
                .collect(),
        }
    }

    fn restore(self) {
        for (name, value) in self.values {
            match value {
                Some(value) => std::env::set_var(name, value),
                None => std::env::remove_var(name),
            }
        }
    }
}

/// Run `f` with HOME and XDG_CONFIG_HOME pointing into `test_dir`.
///
/// The global config file then lives at `<test_dir>/config/graphsync/config.toml`.
pub fn with_xdg_env<F, R>(test_dir: &TempDir, f: F) -> R
where
    F: FnOnce() -> R,
{
    let _guard = ENV_MUTEX.lock().unwrap_or_else(|e| e.into_inner());
    let env_state = EnvState::capture();

    let home = test_dir.path().join("home");
    let config_home = test_dir.path().join("config");
    std::fs::create_dir_all(&home).unwrap();
    std::fs::create_dir_all(&config_home).unwrap();
    std::env::set_var("HOME", &home);
    std::env::set_var("XDG_CONFIG_HOME", &config_home);
    std::env::remove_var("GRAPHSYNC__REMOTE__PAGE_SIZE");
    std::env::remove_var("GRAPHSYNC__REMOTE__BASE_URL");

    let result = f();

    env_state.restore();
    result
}

pub fn users(names: &[&str]) -> Vec<User> {
    names.iter().map(|n| User::new(*n)).collect()
}

pub fn list(name: &str, members: &[&str]) -> List {
    List::new(name, true, users(members))
}
