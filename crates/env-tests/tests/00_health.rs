//! Smoke Tests: Service Health
//!
//! Probes the health endpoints of a live feature flag service. The prober
//! retries connection failures on a fixed schedule, so these tests also work
//! while the service is still starting up.
//!
//! # Prerequisites
//!
//! A service instance reachable at `http://$API_HOST:$API_PORT`
//! (default `localhost:9000`).

#![cfg(feature = "smoke")]

use env_tests::env::TestEnv;
use env_tests::health::{LiteralBodyValidator, StructuredHealthValidator};
use env_tests::probe::{ProbeConfig, Prober};

/// Helper to build a prober with the standard retry schedule.
fn prober() -> Prober {
    Prober::new(ProbeConfig::default()).expect("HTTP client should build")
}

#[tokio::test]
async fn actuator_health_reports_all_components_up() {
    let env = TestEnv::from_env();

    prober()
        .probe(
            &env.url("/actuator/health"),
            &StructuredHealthValidator::default(),
        )
        .await
        .expect("actuator health should report status UP with all components UP");
}

#[tokio::test]
async fn hc_endpoint_serves_exact_literal_body() {
    let env = TestEnv::from_env();

    prober()
        .probe(&env.url("/v1/hc"), &LiteralBodyValidator::hc())
        .await
        .expect("/v1/hc should serve the fixed dev environment body");
}
