//! Inbound request envelope: the JSON document POSTed by the platform.

use std::collections::HashMap;

use serde::Deserialize;
use thiserror::Error;

/// Error returned when an envelope cannot be decoded.
#[derive(Debug, Error)]
pub enum EnvelopeError {
    /// The body is not a well-formed request envelope.
    #[error("malformed request envelope: {0}")]
    Malformed(#[from] serde_json::Error),
}

/// The JSON post body of a platform request.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RequestEnvelope {
    /// Envelope schema version (`"1.0"`).
    #[serde(default)]
    pub version: String,
    /// Session context carried across turns of a conversation.
    #[serde(default)]
    pub session: Session,
    /// The request itself.
    pub request: SkillRequest,
}

impl RequestEnvelope {
    /// Decode an envelope from raw body bytes.
    ///
    /// Unknown fields are ignored so new platform fields do not break
    /// decoding.
    ///
    /// # Errors
    ///
    /// Returns [`EnvelopeError::Malformed`] if the bytes are not a valid
    /// envelope document.
    pub fn from_slice(body: &[u8]) -> Result<Self, EnvelopeError> {
        Ok(serde_json::from_slice(body)?)
    }
}

/// Session block of a request envelope.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Session {
    /// Whether this request starts a new session.
    #[serde(default)]
    pub new: bool,
    /// Opaque session identifier.
    #[serde(default)]
    pub session_id: String,
    /// The skill this session belongs to.
    #[serde(default)]
    pub application: Application,
    /// Free-form attributes persisted by previous responses.
    #[serde(default)]
    pub attributes: HashMap<String, serde_json::Value>,
    /// The end user on whose behalf the request was made.
    #[serde(default)]
    pub user: User,
}

/// Identifies the skill a session belongs to.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Application {
    /// Platform-assigned skill identifier.
    #[serde(default)]
    pub application_id: String,
}

/// The end user attached to a session.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    /// Platform-assigned user identifier.
    #[serde(default)]
    pub user_id: String,
    /// OAuth access token, when account linking is configured.
    #[serde(default)]
    pub access_token: Option<String>,
}

/// The request block of an envelope.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SkillRequest {
    /// What kind of request this is.
    #[serde(rename = "type")]
    pub kind: RequestKind,
    /// Platform-assigned request identifier.
    #[serde(default)]
    pub request_id: String,
    /// Request creation time, `YYYY-MM-DDTHH:MM:SSZ` in UTC.
    pub timestamp: String,
    /// Why the session ended, on session-end requests.
    #[serde(default)]
    pub reason: Option<String>,
    /// The resolved intent, on intent requests.
    #[serde(default)]
    pub intent: Option<Intent>,
}

impl SkillRequest {
    /// Whether this is a launch request (skill opened without an intent).
    #[must_use]
    pub fn is_launch(&self) -> bool {
        self.kind == RequestKind::LaunchRequest
    }

    /// Whether this is an intent request.
    #[must_use]
    pub fn is_intent(&self) -> bool {
        self.kind == RequestKind::IntentRequest
    }

    /// Whether this is a session-ended request.
    #[must_use]
    pub fn is_session_ended(&self) -> bool {
        self.kind == RequestKind::SessionEndedRequest
    }
}

/// Discriminant of a [`SkillRequest`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub enum RequestKind {
    /// The user opened the skill without asking for anything specific.
    LaunchRequest,
    /// The user asked for a specific intent.
    IntentRequest,
    /// The platform closed the session.
    SessionEndedRequest,
    /// A request type this crate does not model.
    #[serde(other)]
    Other,
}

/// A resolved intent with its slot values.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Intent {
    /// Intent name as declared in the interaction model.
    #[serde(default)]
    pub name: String,
    /// Slot values keyed by slot name.
    #[serde(default)]
    pub slots: HashMap<String, Slot>,
}

/// A single slot value inside an intent.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Slot {
    /// Slot name.
    #[serde(default)]
    pub name: String,
    /// Spoken value captured for this slot, if any.
    #[serde(default)]
    pub value: Option<String>,
}
