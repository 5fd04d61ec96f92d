// crates/chartform-core/src/submit.rs

//! The submission seam: what gets posted to `/calculate` and what came back.

use crate::error::Result;
use crate::form::FormData;
use serde::{Deserialize, Serialize};

/// A fully prepared, form-encoded request for the calculate endpoint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SubmitRequest {
    pub endpoint: String,
    pub form: FormData,
}

/// Response after redirects were followed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TransportResponse {
    pub status: u16,
    pub body: String,
}

impl TransportResponse {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Why a submit attempt did not go out.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BlockReason {
    /// The location field was not confirmed by a selection or a blur check.
    LocationNotValidated,
    /// The date of birth is not a real `DD/MM/YYYY` date.
    InvalidDate,
    /// A previous submission is still in flight.
    AlreadySubmitting,
}

/// Result of a submission, from the page's point of view.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum SubmitOutcome {
    /// No request was issued.
    Blocked { reason: BlockReason },
    /// Success: the body replaces the current document.
    ReplacePage { html: String },
    /// The server answered with an error status. Logged only.
    ServerError { status: u16, body: String },
    /// The request never completed. Logged only.
    TransportFailed { message: String },
}

/// Performs the POST. Implementations follow redirects themselves.
pub trait Transport {
    fn post_form(&self, request: &SubmitRequest) -> Result<TransportResponse>;
}

#[cfg(feature = "http")]
pub use http::HttpTransport;

#[cfg(feature = "http")]
mod http {
    use super::{SubmitRequest, Transport, TransportResponse};
    use crate::error::{ChartFormError, Result};

    /// Blocking reqwest transport. `base_url` is prefixed to relative
    /// endpoints such as `/calculate`.
    pub struct HttpTransport {
        client: reqwest::blocking::Client,
        base_url: String,
    }

    impl HttpTransport {
        pub fn new(base_url: impl Into<String>) -> Result<Self> {
            let client = reqwest::blocking::Client::builder()
                .build()
                .map_err(|e| ChartFormError::Transport(e.to_string()))?;
            Ok(Self {
                client,
                base_url: base_url.into().trim_end_matches('/').to_string(),
            })
        }

        fn url_for(&self, endpoint: &str) -> String {
            if endpoint.starts_with("http://") || endpoint.starts_with("https://") {
                endpoint.to_string()
            } else {
                format!("{}/{}", self.base_url, endpoint.trim_start_matches('/'))
            }
        }
    }

    impl Transport for HttpTransport {
        fn post_form(&self, request: &SubmitRequest) -> Result<TransportResponse> {
            let url = self.url_for(&request.endpoint);
            let response = self
                .client
                .post(&url)
                .form(request.form.pairs())
                .send()
                .map_err(|e| ChartFormError::Transport(e.to_string()))?;

            let status = response.status().as_u16();
            let body = response
                .text()
                .map_err(|e| ChartFormError::Transport(e.to_string()))?;
            Ok(TransportResponse { status, body })
        }
    }

    #[cfg(test)]
    mod tests {
        use super::*;

        #[test]
        fn relative_endpoints_join_base() {
            let t = HttpTransport::new("http://localhost:5000/").unwrap();
            assert_eq!(t.url_for("/calculate"), "http://localhost:5000/calculate");
            assert_eq!(t.url_for("https://x.test/c"), "https://x.test/c");
        }
    }
}
