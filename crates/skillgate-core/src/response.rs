//! Outbound response envelope returned to the platform.

use std::collections::HashMap;

use serde::Serialize;

/// The JSON response body for a platform request.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ResponseEnvelope {
    /// Envelope schema version, always `"1.0"`.
    pub version: String,
    /// Attributes to persist into the next request of this session.
    #[serde(skip_serializing_if = "HashMap::is_empty")]
    pub session_attributes: HashMap<String, serde_json::Value>,
    /// The response payload.
    pub response: ResponseBody,
}

impl ResponseEnvelope {
    /// Create an empty version-1.0 response.
    #[must_use]
    pub fn new() -> Self {
        Self {
            version: "1.0".to_owned(),
            session_attributes: HashMap::new(),
            response: ResponseBody::default(),
        }
    }

    /// Respond with plain speech.
    #[must_use]
    pub fn tell(mut self, text: impl Into<String>) -> Self {
        self.response.output_speech = Some(OutputSpeech::plain(text));
        self
    }

    /// Prompt the user to answer, keeping the session open.
    #[must_use]
    pub fn ask(mut self, text: impl Into<String>) -> Self {
        self.response.reprompt = Some(Reprompt {
            output_speech: Some(OutputSpeech::plain(text)),
        });
        self.response.should_end_session = false;
        self
    }
}

impl Default for ResponseEnvelope {
    fn default() -> Self {
        Self::new()
    }
}

/// The `response` block of a [`ResponseEnvelope`].
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ResponseBody {
    /// Speech spoken to the user.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub output_speech: Option<OutputSpeech>,
    /// Card shown in the companion app.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub card: Option<Card>,
    /// Speech spoken when the user does not answer a prompt.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reprompt: Option<Reprompt>,
    /// Whether the session closes after this response.
    pub should_end_session: bool,
}

/// Spoken output, either plain text or SSML.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OutputSpeech {
    /// `"PlainText"` or `"SSML"`.
    #[serde(rename = "type")]
    pub kind: String,
    /// Plain text, when `kind` is `"PlainText"`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    /// SSML markup, when `kind` is `"SSML"`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ssml: Option<String>,
}

impl OutputSpeech {
    /// Plain-text speech.
    #[must_use]
    pub fn plain(text: impl Into<String>) -> Self {
        Self {
            kind: "PlainText".to_owned(),
            text: Some(text.into()),
            ssml: None,
        }
    }
}

/// A card rendered in the companion app.
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Card {
    /// Card type (`"Simple"`, `"Standard"`, ...).
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,
    /// Card title.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    /// Body content for simple cards.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
    /// Body text for standard cards.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    /// Optional image for standard cards.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image: Option<CardImage>,
}

/// Image URLs attached to a standard card.
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CardImage {
    /// Small rendition URL.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub small_image_url: Option<String>,
    /// Large rendition URL.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub large_image_url: Option<String>,
}

/// Reprompt wrapper around [`OutputSpeech`].
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Reprompt {
    /// Speech spoken on reprompt.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub output_speech: Option<OutputSpeech>,
}
