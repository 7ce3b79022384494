//! Connection parameters for the service under test.
//!
//! Every test resolves the target host and port from the environment,
//! falling back to fixed defaults. Resolution cannot fail.

use tracing::info;

/// Environment variable naming the target host.
pub const API_HOST_VAR: &str = "API_HOST";

/// Environment variable naming the target port.
pub const API_PORT_VAR: &str = "API_PORT";

const DEFAULT_HOST: &str = "localhost";
const DEFAULT_PORT: &str = "9000";

/// Resolved connection parameters, rebuilt per test invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TestEnv {
    pub host: String,
    pub port: String,
}

impl TestEnv {
    /// Resolve `API_HOST` and `API_PORT`, substituting defaults when a
    /// variable is unset or empty.
    pub fn from_env() -> Self {
        Self {
            host: var_or_default(API_HOST_VAR, DEFAULT_HOST),
            port: var_or_default(API_PORT_VAR, DEFAULT_PORT),
        }
    }

    /// Base URL of the service under test, e.g. `http://localhost:9000`.
    pub fn base_url(&self) -> String {
        format!("http://{}:{}", self.host, self.port)
    }

    /// Full URL for a path on the service under test.
    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url(), path)
    }
}

fn var_or_default(name: &str, default: &str) -> String {
    match std::env::var(name) {
        Ok(value) if !value.is_empty() => {
            info!(%name, %value, "resolved connection parameter from environment");
            value
        }
        _ => {
            info!(%name, default, "environment variable unset, using default");
            default.to_string()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    #[test]
    #[serial]
    fn defaults_apply_when_both_variables_unset() {
        std::env::remove_var(API_HOST_VAR);
        std::env::remove_var(API_PORT_VAR);

        let env = TestEnv::from_env();
        assert_eq!(env.host, "localhost");
        assert_eq!(env.port, "9000");
        assert_eq!(env.base_url(), "http://localhost:9000");
    }

    #[test]
    #[serial]
    fn empty_variable_is_treated_as_unset() {
        std::env::set_var(API_HOST_VAR, "");
        std::env::remove_var(API_PORT_VAR);

        let env = TestEnv::from_env();
        assert_eq!(env.host, "localhost");

        std::env::remove_var(API_HOST_VAR);
    }

    #[test]
    #[serial]
    fn set_variables_override_defaults() {
        std::env::set_var(API_HOST_VAR, "flags.internal");
        std::env::set_var(API_PORT_VAR, "8443");

        let env = TestEnv::from_env();
        assert_eq!(env.host, "flags.internal");
        assert_eq!(env.port, "8443");
        assert_eq!(
            env.url("/actuator/health"),
            "http://flags.internal:8443/actuator/health"
        );

        std::env::remove_var(API_HOST_VAR);
        std::env::remove_var(API_PORT_VAR);
    }
}
