// system-tests/src/config/env_tests.rs
// ============================================================================
// Module: System Test Env Unit Tests
// Description: Unit coverage for strict environment parsing in system-tests.
// Purpose: Ensure configuration parsing fails closed on invalid inputs.
// Dependencies: std
// ============================================================================

//! ## Overview
//! Environment parsing rejects invalid or empty values; tests restore the
//! environment after each run.

#![allow(
    clippy::expect_used,
    clippy::unwrap_used,
    reason = "Test-only assertions favor direct unwrap/expect for clarity."
)]

use std::sync::Mutex;
use std::sync::OnceLock;
use std::time::Duration;

use super::Endpoint;
use super::SystemTestConfig;
use super::SystemTestEnv;

mod env_mut {
    #![allow(unsafe_code, reason = "Tests mutate process env vars in a controlled scope.")]

    /// Sets an environment variable for the current process.
    pub fn set_var(key: &str, value: &str) {
        // SAFETY: Tests serialize environment mutation via a global lock.
        unsafe {
            std::env::set_var(key, value);
        }
    }

    /// Removes an environment variable from the current process.
    pub fn remove_var(key: &str) {
        // SAFETY: Tests serialize environment mutation via a global lock.
        unsafe {
            std::env::remove_var(key);
        }
    }
}

fn env_lock() -> std::sync::MutexGuard<'static, ()> {
    static LOCK: OnceLock<Mutex<()>> = OnceLock::new();
    LOCK.get_or_init(|| Mutex::new(())).lock().expect("env lock poisoned")
}

struct EnvGuard {
    entries: Vec<(&'static str, Option<String>)>,
}

impl EnvGuard {
    fn capture() -> Self {
        let names = [
            SystemTestEnv::MysqlEndpoint.as_str(),
            SystemTestEnv::PostgresEndpoint.as_str(),
            SystemTestEnv::ReadyTimeoutSeconds.as_str(),
        ];
        let entries = names.iter().map(|name| (*name, std::env::var(*name).ok())).collect();
        for name in names {
            env_mut::remove_var(name);
        }
        Self { entries }
    }
}

impl Drop for EnvGuard {
    fn drop(&mut self) {
        for (name, value) in self.entries.drain(..) {
            match value {
                Some(value) => env_mut::set_var(name, &value),
                None => env_mut::remove_var(name),
            }
        }
    }
}

#[test]
fn unset_environment_uses_containers() {
    let _lock = env_lock();
    let _guard = EnvGuard::capture();
    let config = SystemTestConfig::load().unwrap();
    assert_eq!(config, SystemTestConfig::default());
    assert_eq!(config.ready_timeout(), Duration::from_secs(120));
}

#[test]
fn endpoint_override_parses_host_and_port() {
    let _lock = env_lock();
    let _guard = EnvGuard::capture();
    env_mut::set_var(SystemTestEnv::MysqlEndpoint.as_str(), "db.internal:3307");
    let config = SystemTestConfig::load().unwrap();
    assert_eq!(config.mysql, Some(Endpoint { host: "db.internal".to_string(), port: 3307 }));
    assert!(config.postgres.is_none());
}

#[test]
fn malformed_endpoints_fail_closed() {
    let _lock = env_lock();
    let _guard = EnvGuard::capture();
    for raw in ["db.internal", ":5432", "db:0", "db:port", "   "] {
        env_mut::set_var(SystemTestEnv::PostgresEndpoint.as_str(), raw);
        assert!(SystemTestConfig::load().is_err(), "{raw}");
    }
}

#[test]
fn timeout_rejects_invalid_values() {
    let _lock = env_lock();
    let _guard = EnvGuard::capture();
    for raw in ["0", "soon"] {
        env_mut::set_var(SystemTestEnv::ReadyTimeoutSeconds.as_str(), raw);
        assert!(SystemTestConfig::load().is_err(), "{raw}");
    }
    env_mut::set_var(SystemTestEnv::ReadyTimeoutSeconds.as_str(), "30");
    let config = SystemTestConfig::load().expect("config should load");
    assert_eq!(config.ready_timeout(), Duration::from_secs(30));
}
