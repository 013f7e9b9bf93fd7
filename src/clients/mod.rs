pub mod darksky;
pub mod geocode;
pub mod meetup;
pub mod tmdb;
pub mod yelp;

use thiserror::Error;

/// Failure taxonomy for a single upstream call. `NoResults` is a distinct
/// outcome from transport/provider failures: the provider answered, there was
/// just nothing there.
#[derive(Debug, Error)]
pub enum UpstreamError {
    #[error("{service} request failed: {source}")]
    Transport {
        service: &'static str,
        #[source]
        source: reqwest::Error,
    },

    #[error("{service} returned {status}: {body}")]
    Provider {
        service: &'static str,
        status: reqwest::StatusCode,
        body: String,
    },

    #[error("{service} returned no results")]
    NoResults { service: &'static str },
}

impl UpstreamError {
    #[must_use]
    pub const fn service(&self) -> &'static str {
        match self {
            Self::Transport { service, .. }
            | Self::Provider { service, .. }
            | Self::NoResults { service } => service,
        }
    }

    pub(crate) const fn transport(service: &'static str, source: reqwest::Error) -> Self {
        Self::Transport { service, source }
    }
}

/// Turns a non-success status into `UpstreamError::Provider`, keeping a body
/// snippet for the logs.
pub(crate) async fn check_status(
    service: &'static str,
    response: reqwest::Response,
) -> Result<reqwest::Response, UpstreamError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let mut body = response.text().await.unwrap_or_default();
    truncate_on_char_boundary(&mut body, 256);
    Err(UpstreamError::Provider {
        service,
        status,
        body,
    })
}

/// `String::truncate` panics mid-codepoint, and the body is
/// provider-controlled bytes.
fn truncate_on_char_boundary(s: &mut String, max: usize) {
    if s.len() <= max {
        return;
    }
    let end = (0..=max).rev().find(|&i| s.is_char_boundary(i)).unwrap_or(0);
    s.truncate(end);
}
