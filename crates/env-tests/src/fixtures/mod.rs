//! Test fixtures for interacting with the feature flag service.

pub mod flag_client;
pub mod org_client;
pub mod time;

pub use flag_client::FlagClient;
pub use org_client::OrgClient;

/// Maximum length for a response body quoted in an error message.
const MAX_ERROR_BODY_LEN: usize = 256;

/// Truncate a response body for inclusion in an error message.
pub(crate) fn truncate_error_body(body: &str) -> String {
    if body.len() <= MAX_ERROR_BODY_LEN {
        return body.to_string();
    }
    let mut cut = MAX_ERROR_BODY_LEN;
    while !body.is_char_boundary(cut) {
        cut -= 1;
    }
    format!("{}...[truncated]", &body[..cut])
}
