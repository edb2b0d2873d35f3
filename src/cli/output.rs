//! CLI output: error mapping from domain errors to stable CLI surface.

use crate::error::ApiError;

/// Map domain/service errors to a string for CLI output.
pub fn map_error(e: &ApiError) -> String {
    match e {
        ApiError::Remote(crate::error::RemoteError::AuthFailed(_)) => format!(
            "{}\nCheck that the API token environment variable is set and valid.",
            e
        ),
        _ => e.to_string(),
    }
}
