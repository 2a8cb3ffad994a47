use reqwest::blocking::Response;

use crate::error::{Operation, Result, SilenceBoardError};
use crate::text::truncate_text;

const ERROR_BODY_MAX_CHARS: usize = 512;

/// Passes successful responses through and turns the rest into `Upstream` errors.
pub(crate) fn ensure_success(resp: Response, operation: Operation) -> Result<Response> {
    let status = resp.status();
    if status.is_success() {
        return Ok(resp);
    }
    let body = resp.text().unwrap_or_else(|err| {
        tracing::debug!(%operation, %status, error = %err, "failed to read error response body");
        String::new()
    });
    Err(SilenceBoardError::Upstream {
        operation,
        status,
        body: truncate_text(body.trim(), ERROR_BODY_MAX_CHARS),
    })
}

