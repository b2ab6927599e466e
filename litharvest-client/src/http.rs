//! reqwest plumbing shared by the clients

use reqwest::header::HeaderMap;
use reqwest::{Client, Response};
use tracing::debug;

use crate::config::ClientConfig;
use crate::error::{HarvestError, Result};

/// Build an HTTP client with the configured timeout and the given user agent.
pub(crate) fn build_client(
    config: &ClientConfig,
    user_agent: &str,
    default_headers: HeaderMap,
) -> Result<Client> {
    Ok(Client::builder()
        .user_agent(user_agent)
        .timeout(config.timeout)
        .default_headers(default_headers)
        .build()?)
}

/// Append `key=value` pairs to a URL that already carries a query string.
pub(crate) fn append_params(url: &mut String, params: &[(String, String)]) {
    for (key, value) in params {
        url.push('&');
        url.push_str(key);
        url.push('=');
        url.push_str(&urlencoding::encode(value));
    }
}

/// Turn a non-success response into `ApiError` carrying the status reason.
pub(crate) fn ensure_success(response: Response) -> Result<Response> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    debug!(status = status.as_u16(), url = %response.url(), "Non-success response");
    Err(HarvestError::ApiError {
        status: status.as_u16(),
        message: status
            .canonical_reason()
            .unwrap_or("Unknown error")
            .to_string(),
    })
}
