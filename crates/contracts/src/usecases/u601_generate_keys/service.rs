use async_trait::async_trait;
use thiserror::Error;

use super::form::FormState;
use super::request::KeyRequest;
use super::response::{extract_keys, parse_response_body, render_response};
use super::validation::ValidationError;

/// Endpoint used when neither the form nor the configuration names one
pub const DEFAULT_API_URL: &str = "/api/key";

/// Completed HTTP exchange, whatever the status
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpReply {
    pub status: u16,
    pub body: String,
}

impl HttpReply {
    pub fn is_success(&self) -> bool {
        is_success_status(self.status)
    }
}

fn is_success_status(status: u16) -> bool {
    (200..300).contains(&status)
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TransportError {
    #[error("Failed to build request: {0}")]
    Request(String),

    #[error("Network error: {0}")]
    Network(String),

    #[error("Failed to read response: {0}")]
    Body(String),

    #[error("Malformed JSON response: {0}")]
    MalformedJson(String),
}

/// Sends a JSON body with `POST`.
///
/// Futures are not `Send`: in the browser everything runs on one thread.
#[async_trait(?Send)]
pub trait KeyTransport {
    async fn post_json(&self, url: &str, body: String) -> Result<HttpReply, TransportError>;
}

/// One tag in the status area
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusLine {
    pub ok: bool,
    pub message: String,
}

impl StatusLine {
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            ok: true,
            message: message.into(),
        }
    }

    pub fn failure(message: impl Into<String>) -> Self {
        Self {
            ok: false,
            message: message.into(),
        }
    }

    pub fn sending() -> Self {
        Self::success("Sending…")
    }

    pub fn json_copied() -> Self {
        Self::success("JSON copied")
    }

    pub fn key_copied() -> Self {
        Self::success("Key copied")
    }

    pub fn keys_copied(count: usize) -> Self {
        Self::success(format!("{} key(s) copied", count))
    }

    pub fn no_keys_to_copy() -> Self {
        Self::failure("No keys to copy")
    }
}

/// A validated request ready to go out
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PreparedSubmission {
    pub url: String,
    pub request: KeyRequest,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// The access gate has not been passed
    Locked,
    /// Refused before sending
    Rejected(ValidationError),
    /// The endpoint answered; `status` may still be an error code
    Completed {
        status: u16,
        rendered: String,
        keys: Vec<String>,
        requested: i64,
    },
    /// No usable answer: network failure or malformed JSON
    Failed(TransportError),
}

impl SubmitOutcome {
    pub fn status_line(&self) -> StatusLine {
        match self {
            SubmitOutcome::Locked => StatusLine::failure("Unlock required"),
            SubmitOutcome::Rejected(e) => StatusLine::failure(e.to_string()),
            SubmitOutcome::Completed {
                status,
                keys,
                requested,
                ..
            } => {
                if is_success_status(*status) {
                    let count = if keys.is_empty() {
                        *requested
                    } else {
                        keys.len() as i64
                    };
                    StatusLine::success(format!("Key(s) created: {}", count))
                } else {
                    StatusLine::failure(format!("HTTP error {}", status))
                }
            }
            SubmitOutcome::Failed(_) => StatusLine::failure("Request failed"),
        }
    }

    pub fn keys(&self) -> &[String] {
        match self {
            SubmitOutcome::Completed { keys, .. } => keys.as_slice(),
            _ => &[],
        }
    }

    /// Text for the response panel. `None` when nothing was sent.
    pub fn rendered(&self) -> Option<String> {
        match self {
            SubmitOutcome::Completed { rendered, .. } => Some(rendered.clone()),
            SubmitOutcome::Failed(e) => Some(e.to_string()),
            SubmitOutcome::Locked | SubmitOutcome::Rejected(_) => None,
        }
    }
}

/// Form controller logic: validation, submission and response handling
pub struct KeyService<T> {
    transport: T,
    default_url: String,
}

impl<T: KeyTransport> KeyService<T> {
    pub fn new(transport: T) -> Self {
        Self {
            transport,
            default_url: DEFAULT_API_URL.to_string(),
        }
    }

    pub fn with_default_url(mut self, url: impl Into<String>) -> Self {
        let url = url.into();
        if !url.trim().is_empty() {
            self.default_url = url.trim().to_string();
        }
        self
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// The form's `api` field wins over the configured endpoint
    pub fn resolve_url(&self, form: &FormState) -> String {
        let from_form = form.api.trim();
        if from_form.is_empty() {
            self.default_url.clone()
        } else {
            from_form.to_string()
        }
    }

    /// Check the gate and validate. `Err` carries the outcome to report.
    pub fn prepare(
        &self,
        unlocked: bool,
        form: &FormState,
    ) -> Result<PreparedSubmission, SubmitOutcome> {
        if !unlocked {
            log::warn!("Submission refused: access gate is locked");
            return Err(SubmitOutcome::Locked);
        }
        let request = KeyRequest::from_form(form);
        if let Err(e) = request.validate() {
            log::info!("Submission rejected: {}", e);
            return Err(SubmitOutcome::Rejected(e));
        }
        Ok(PreparedSubmission {
            url: self.resolve_url(form),
            request,
        })
    }

    /// Send a prepared request and interpret the reply
    pub async fn send(&self, prepared: &PreparedSubmission) -> SubmitOutcome {
        let PreparedSubmission { url, request } = prepared;

        let body = match serde_json::to_string(request) {
            Ok(body) => body,
            Err(e) => return SubmitOutcome::Failed(TransportError::Request(e.to_string())),
        };

        log::info!(
            "POST {} ({} x {} package(s))",
            url,
            request.quantity,
            request.package_ids.len()
        );

        let reply = match self.transport.post_json(url, body).await {
            Ok(reply) => reply,
            Err(e) => {
                log::error!("Key request failed: {}", e);
                return SubmitOutcome::Failed(e);
            }
        };

        let parsed = match parse_response_body(&reply.body) {
            Ok(parsed) => parsed,
            Err(e) => {
                log::error!("Key endpoint returned malformed JSON: {}", e);
                return SubmitOutcome::Failed(TransportError::MalformedJson(e.to_string()));
            }
        };

        let keys = extract_keys(&parsed);
        if !reply.is_success() {
            log::warn!("Key endpoint answered HTTP {}", reply.status);
        }
        log::debug!(
            "Key endpoint answered {} with {} key(s)",
            reply.status,
            keys.len()
        );

        SubmitOutcome::Completed {
            status: reply.status,
            rendered: render_response(&parsed),
            keys,
            requested: request.quantity,
        }
    }

    /// `prepare` followed by `send`
    pub async fn submit(&self, unlocked: bool, form: &FormState) -> SubmitOutcome {
        match self.prepare(unlocked, form) {
            Ok(prepared) => self.send(&prepared).await,
            Err(outcome) => outcome,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_line_for_success_without_keys_uses_quantity() {
        let outcome = SubmitOutcome::Completed {
            status: 201,
            rendered: "{}".to_string(),
            keys: vec![],
            requested: 4,
        };
        assert_eq!(outcome.status_line(), StatusLine::success("Key(s) created: 4"));
    }

    #[test]
    fn test_status_line_for_http_error() {
        let outcome = SubmitOutcome::Completed {
            status: 503,
            rendered: "{}".to_string(),
            keys: vec!["authtool-1".to_string()],
            requested: 1,
        };
        assert_eq!(outcome.status_line(), StatusLine::failure("HTTP error 503"));
        assert_eq!(outcome.keys().len(), 1);
    }

    #[test]
    fn test_failed_outcome_renders_error_text() {
        let outcome = SubmitOutcome::Failed(TransportError::Network("offline".to_string()));
        assert_eq!(outcome.rendered().as_deref(), Some("Network error: offline"));
        assert_eq!(outcome.status_line(), StatusLine::failure("Request failed"));
        assert!(outcome.keys().is_empty());
    }

    #[test]
    fn test_refusals_render_nothing() {
        assert_eq!(SubmitOutcome::Locked.rendered(), None);
        assert_eq!(
            SubmitOutcome::Rejected(ValidationError::InvalidDuration).status_line(),
            StatusLine::failure("Invalid duration")
        );
    }

    #[test]
    fn test_http_reply_success_range() {
        let reply = |status| HttpReply {
            status,
            body: String::new(),
        };
        assert!(reply(200).is_success());
        assert!(reply(299).is_success());
        assert!(!reply(302).is_success());
        assert!(!reply(404).is_success());

        let completed = |status| SubmitOutcome::Completed {
            status,
            rendered: String::new(),
            keys: vec![],
            requested: 1,
        };
        for status in [200, 204, 299, 300, 302, 404] {
            assert_eq!(completed(status).status_line().ok, reply(status).is_success());
        }
    }
}
