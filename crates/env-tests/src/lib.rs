//! Environment Integration Test Suite
//!
//! This crate provides integration tests for a running feature flag service.
//! Tests reach the service over HTTP using connection parameters supplied via
//! the `API_HOST` and `API_PORT` environment variables (defaulting to
//! `localhost:9000`) and assert on response status codes and JSON payloads.
//!
//! # Features
//!
//! - `smoke`: health-check probes (`/actuator/health`, `/v1/hc`)
//! - `flows`: organization and feature-flag workflows
//! - `all`: enable all test categories
//!
//! # Prerequisites
//!
//! A feature flag service instance reachable at `http://$API_HOST:$API_PORT`.
//! The health probes retry for up to 40 seconds, so the service may still be
//! starting when the suite is launched.
//!
//! # Usage
//!
//! ```bash
//! # Runs 0 env-tests (no default features), only the crate's unit tests
//! cargo test
//!
//! # Health probes only
//! cargo test -p env-tests --features smoke
//!
//! # Full suite against a live service
//! API_HOST=localhost API_PORT=9000 cargo test -p env-tests --features all
//! ```

pub mod env;
pub mod eventual;
pub mod fixtures;
pub mod health;
pub mod probe;
