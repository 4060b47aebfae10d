use reqwest::StatusCode;

/// Errors produced by the weather clients and the aggregation service.
///
/// "City not found" is deliberately not represented here: a geocoding
/// lookup with zero matches returns `Ok(None)` and callers present it as
/// an ordinary outcome.
#[derive(Debug, thiserror::Error)]
pub enum WeatherError {
    /// The request never completed (DNS, connect, TLS, read, ...).
    #[error("{endpoint} request failed: {source}")]
    Network {
        endpoint: &'static str,
        #[source]
        source: reqwest::Error,
    },

    /// The provider answered with a non-success status.
    #[error("{endpoint} request failed with status {status}: {body}")]
    Status {
        endpoint: &'static str,
        status: StatusCode,
        body: String,
    },

    /// The provider answered successfully but the payload does not have
    /// the expected shape: a missing group, co-indexed arrays of unequal
    /// length, or an unparseable timestamp.
    #[error("{endpoint} returned malformed data: {detail}")]
    Malformed {
        endpoint: &'static str,
        detail: String,
    },
}

impl WeatherError {
    pub(crate) fn network(endpoint: &'static str, source: reqwest::Error) -> Self {
        Self::Network { endpoint, source }
    }

    pub(crate) fn status(endpoint: &'static str, status: StatusCode, body: &str) -> Self {
        Self::Status { endpoint, status, body: truncate_body(body) }
    }

    pub(crate) fn malformed(endpoint: &'static str, detail: impl Into<String>) -> Self {
        Self::Malformed { endpoint, detail: detail.into() }
    }
}

/// Provider error bodies can be arbitrarily large; keep a readable prefix.
fn truncate_body(body: &str) -> String {
    const MAX: usize = 200;
    match body.char_indices().nth(MAX) {
        Some((idx, _)) => format!("{}...", &body[..idx]),
        None => body.to_string(),
    }
}
