//! Request lifecycle for one mood submission
//!
//! Every accepted submission gets a fresh [`RequestId`]. Only the most recent
//! id may settle; anything older is a stale response and is dropped so it
//! cannot overwrite newer state.

use std::fmt;

use serde_json::Value;
use thiserror::Error;

use crate::client::RawResponse;
use crate::error::TransportError;

pub const EMPTY_MOOD_MESSAGE: &str = "Please select or enter a mood";
pub const FETCH_FAILED_MESSAGE: &str = "Could not fetch AI suggestion. Try again later.";
pub const NO_SUGGESTION_TEXT: &str = "No suggestion available.";
pub const UNEXPECTED_FORMAT_TEXT: &str = "Unexpected API response format.";

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct RequestId(u64);

impl fmt::Display for RequestId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// A request that has been started but not yet settled
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingRequest {
    pub id: RequestId,
    pub mood: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum FailureKind {
    #[error("no mood given")]
    Validation,
    #[error("network error")]
    Network,
    #[error("HTTP status {0}")]
    Http(u16),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Failure {
    pub mood: String,
    pub kind: FailureKind,
    pub message: &'static str,
}

impl Failure {
    fn validation(mood: &str) -> Self {
        Self {
            mood: mood.to_string(),
            kind: FailureKind::Validation,
            message: EMPTY_MOOD_MESSAGE,
        }
    }

    fn fetch(mood: &str, kind: FailureKind) -> Self {
        Self {
            mood: mood.to_string(),
            kind,
            message: FETCH_FAILED_MESSAGE,
        }
    }
}

/// Where a successful outcome's text came from.
///
/// `MissingField` and `Unparseable` are degraded successes: the service
/// answered 2xx but did not give a usable suggestion. They are still shown as
/// suggestions, not errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SuggestionProvenance {
    Service,
    MissingField,
    Unparseable,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Suggestion {
    pub mood: String,
    pub text: String,
    pub provenance: SuggestionProvenance,
}

impl Suggestion {
    pub fn is_degraded(&self) -> bool {
        self.provenance != SuggestionProvenance::Service
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum RequestOutcome {
    #[default]
    Idle,
    Loading {
        mood: String,
    },
    Success(Suggestion),
    Failed(Failure),
}

impl RequestOutcome {
    pub fn is_loading(&self) -> bool {
        matches!(self, RequestOutcome::Loading { .. })
    }

    /// Mood this outcome belongs to, if any
    pub fn mood(&self) -> Option<&str> {
        match self {
            RequestOutcome::Idle => None,
            RequestOutcome::Loading { mood } => Some(mood),
            RequestOutcome::Success(suggestion) => Some(&suggestion.mood),
            RequestOutcome::Failed(failure) => Some(&failure.mood),
        }
    }
}

#[derive(Debug, Default)]
pub struct RequestLifecycle {
    issued: u64,
    in_flight: Option<RequestId>,
}

impl RequestLifecycle {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn in_flight(&self) -> Option<RequestId> {
        self.in_flight
    }

    /// Start a submission.
    ///
    /// A blank mood fails validation without issuing an id. It still
    /// supersedes whatever was in flight.
    pub fn begin(&mut self, mood: &str) -> Result<PendingRequest, Failure> {
        if mood.trim().is_empty() {
            self.in_flight = None;
            tracing::warn!("rejected blank mood submission");
            return Err(Failure::validation(mood));
        }

        self.issued += 1;
        let id = RequestId(self.issued);
        if let Some(previous) = self.in_flight.replace(id) {
            tracing::debug!(%previous, %id, "superseding in-flight request");
        }
        tracing::info!(%id, mood, "sending mood");

        Ok(PendingRequest {
            id,
            mood: mood.to_string(),
        })
    }

    /// Settle a request. Returns `None` if the request is no longer current.
    pub fn settle(
        &mut self,
        request: &PendingRequest,
        response: Result<RawResponse, TransportError>,
    ) -> Option<RequestOutcome> {
        if self.in_flight != Some(request.id) {
            tracing::debug!(id = %request.id, "discarding stale response");
            return None;
        }
        self.in_flight = None;
        Some(interpret(&request.mood, response))
    }
}

/// Turn a transport result into the outcome shown to the user
pub fn interpret(mood: &str, response: Result<RawResponse, TransportError>) -> RequestOutcome {
    let response = match response {
        Ok(response) => response,
        Err(e) => {
            tracing::warn!(error = %e, "suggestion request failed");
            return RequestOutcome::Failed(Failure::fetch(mood, FailureKind::Network));
        }
    };

    if !response.is_success() {
        tracing::warn!(status = response.status, "suggestion service returned an error status");
        return RequestOutcome::Failed(Failure::fetch(mood, FailureKind::Http(response.status)));
    }

    tracing::debug!(body = %response.body, "raw suggestion response");
    let (text, provenance) = read_suggestion(&response.body);
    if provenance != SuggestionProvenance::Service {
        tracing::warn!(?provenance, "suggestion service gave no usable suggestion");
    }

    RequestOutcome::Success(Suggestion {
        mood: mood.to_string(),
        text,
        provenance,
    })
}

fn read_suggestion(body: &str) -> (String, SuggestionProvenance) {
    let data: Value = match serde_json::from_str(body) {
        // A bare `null` has no fields to read at all
        Ok(Value::Null) | Err(_) => {
            return (UNEXPECTED_FORMAT_TEXT.to_string(), SuggestionProvenance::Unparseable)
        }
        Ok(data) => data,
    };

    match data.get("suggestion").and_then(suggestion_text) {
        Some(text) => (text, SuggestionProvenance::Service),
        None => (NO_SUGGESTION_TEXT.to_string(), SuggestionProvenance::MissingField),
    }
}

/// Falsy values (null, false, 0, "") count as no suggestion
fn suggestion_text(value: &Value) -> Option<String> {
    match value {
        Value::Null | Value::Bool(false) => None,
        Value::String(s) if s.is_empty() => None,
        Value::String(s) => Some(s.clone()),
        Value::Number(n) if n.as_f64() == Some(0.0) => None,
        other => Some(other.to_string()),
    }
}
