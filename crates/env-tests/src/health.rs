//! Health endpoint payload shapes and validators.
//!
//! The service exposes two health surfaces: the Spring-actuator style
//! `/actuator/health` document and the lightweight `/v1/hc` endpoint that
//! serves a fixed literal body. Both are checked through the shared prober
//! in [`crate::probe`], differing only in their [`ResponseValidator`].

use std::collections::HashMap;

use serde::Deserialize;
use serde_json::Value;
use thiserror::Error;

use crate::probe::ResponseValidator;

/// Components every healthy deployment must report as `UP`.
pub const EXPECTED_COMPONENTS: [&str; 5] =
    ["db", "featureFlag", "livenessState", "ping", "readinessState"];

/// Minimum number of actuator health groups a deployment exposes
/// (liveness and readiness at least).
pub const MIN_GROUPS: usize = 2;

/// Exact body served by `/v1/hc` in the dev environment.
/// Whitespace and field order are significant.
pub const HC_EXPECTED_BODY: &str =
    r#"{"environment":"dev","status":"available","version":"1.0.0"}"#;

/// Actuator health document. The schema is owned by the service under test;
/// sections beyond `status` may be absent and are validated, not decoded,
/// as mandatory.
#[derive(Debug, Clone, Deserialize)]
pub struct HealthDocument {
    pub status: String,
    #[serde(default)]
    pub components: Option<HashMap<String, HealthComponent>>,
    #[serde(default)]
    pub groups: Option<Vec<Value>>,
}

/// One named component inside the actuator document.
#[derive(Debug, Clone, Deserialize)]
pub struct HealthComponent {
    pub status: String,
    /// Component-specific detail fields, kept opaque.
    #[serde(flatten)]
    pub details: HashMap<String, Value>,
}

/// Health response validation failures.
#[derive(Debug, Error)]
pub enum ValidationError {
    #[error("failed to parse health document: {0}")]
    Json(#[from] serde_json::Error),

    #[error("expected overall status \"UP\", got {actual:?}")]
    OverallStatus { actual: String },

    #[error("health document has no components section")]
    MissingComponents,

    #[error("expected component {name:?} not found")]
    MissingComponent { name: String },

    #[error("component {name:?} reported status {actual:?}, expected \"UP\"")]
    ComponentNotUp { name: String, actual: String },

    #[error("health document has no groups section")]
    MissingGroups,

    #[error("expected at least {min} health groups, got {actual}")]
    TooFewGroups { min: usize, actual: usize },

    #[error("body mismatch: expected {expected:?}, got {actual:?}")]
    BodyMismatch { expected: String, actual: String },
}

/// Validates the structured actuator document: overall status, a fixed set
/// of component statuses, and the group count. The first failing check
/// short-circuits the rest.
#[derive(Debug, Clone)]
pub struct StructuredHealthValidator {
    expected_components: Vec<&'static str>,
    min_groups: usize,
}

impl Default for StructuredHealthValidator {
    fn default() -> Self {
        Self {
            expected_components: EXPECTED_COMPONENTS.to_vec(),
            min_groups: MIN_GROUPS,
        }
    }
}

impl ResponseValidator for StructuredHealthValidator {
    fn describe(&self) -> &str {
        "actuator health document"
    }

    fn validate(&self, body: &str) -> Result<(), ValidationError> {
        let doc: HealthDocument = serde_json::from_str(body)?;

        if doc.status != "UP" {
            return Err(ValidationError::OverallStatus { actual: doc.status });
        }

        let components = doc
            .components
            .as_ref()
            .ok_or(ValidationError::MissingComponents)?;
        for name in &self.expected_components {
            let component =
                components
                    .get(*name)
                    .ok_or_else(|| ValidationError::MissingComponent {
                        name: (*name).to_string(),
                    })?;
            if component.status != "UP" {
                return Err(ValidationError::ComponentNotUp {
                    name: (*name).to_string(),
                    actual: component.status.clone(),
                });
            }
        }

        let groups = doc.groups.as_ref().ok_or(ValidationError::MissingGroups)?;
        if groups.len() < self.min_groups {
            return Err(ValidationError::TooFewGroups {
                min: self.min_groups,
                actual: groups.len(),
            });
        }

        Ok(())
    }
}

/// Compares the raw response body byte-for-byte against a fixed string.
#[derive(Debug, Clone)]
pub struct LiteralBodyValidator {
    expected: String,
}

impl LiteralBodyValidator {
    pub fn new(expected: impl Into<String>) -> Self {
        Self {
            expected: expected.into(),
        }
    }

    /// Validator for the `/v1/hc` endpoint.
    pub fn hc() -> Self {
        Self::new(HC_EXPECTED_BODY)
    }
}

impl ResponseValidator for LiteralBodyValidator {
    fn describe(&self) -> &str {
        "literal body"
    }

    fn validate(&self, body: &str) -> Result<(), ValidationError> {
        if body != self.expected {
            return Err(ValidationError::BodyMismatch {
                expected: self.expected.clone(),
                actual: body.to_string(),
            });
        }
        Ok(())
    }
}
