//! Tests for reading the environment from the process

use kiln_config::{ConfigError, ENV_VAR, Environment};
use serial_test::serial;

fn with_node_env<T>(value: Option<&str>, f: impl FnOnce() -> T) -> T {
    let previous = std::env::var(ENV_VAR).ok();
    unsafe {
        match value {
            Some(value) => std::env::set_var(ENV_VAR, value),
            None => std::env::remove_var(ENV_VAR),
        }
    }
    let result = f();
    unsafe {
        match previous {
            Some(previous) => std::env::set_var(ENV_VAR, previous),
            None => std::env::remove_var(ENV_VAR),
        }
    }
    result
}

#[test]
#[serial]
fn unset_defaults_to_production() {
    let env = with_node_env(None, Environment::from_env).unwrap();
    assert_eq!(env, Environment::Production);
}

#[test]
#[serial]
fn reads_development() {
    let env = with_node_env(Some("development"), Environment::from_env).unwrap();
    assert_eq!(env, Environment::Development);
}

#[test]
#[serial]
fn reads_mixed_case_production() {
    let env = with_node_env(Some(" Production "), Environment::from_env).unwrap();
    assert_eq!(env, Environment::Production);
}

#[test]
#[serial]
fn unknown_value_is_rejected() {
    let err = with_node_env(Some("staging"), Environment::from_env).unwrap_err();
    assert!(matches!(err, ConfigError::InvalidEnvironment { ref value } if value == "staging"));
}
