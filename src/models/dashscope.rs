//! Wire types for the DashScope multimodal generation API.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Outbound generation request.
#[derive(Debug, Serialize)]
pub struct GenerationRequest<'a> {
    pub model: &'a str,
    pub input: GenerationInput<'a>,
}

#[derive(Debug, Serialize)]
pub struct GenerationInput<'a> {
    pub messages: Vec<Message<'a>>,
}

#[derive(Debug, Serialize)]
pub struct Message<'a> {
    pub role: &'a str,
    pub content: Vec<ContentPart<'a>>,
}

#[derive(Debug, Serialize)]
#[serde(untagged)]
pub enum ContentPart<'a> {
    Text {
        text: &'a str,
    },
    Image {
        #[serde(skip_serializing_if = "Option::is_none")]
        image: Option<&'a Value>,
    },
}

impl<'a> GenerationRequest<'a> {
    /// A single user turn holding the prompt followed by the image.
    pub fn describe(model: &'a str, prompt: &'a str, image: Option<&'a Value>) -> Self {
        Self {
            model,
            input: GenerationInput {
                messages: vec![Message {
                    role: "user",
                    content: vec![ContentPart::Text { text: prompt }, ContentPart::Image { image }],
                }],
            },
        }
    }
}

/// Successful generation response. Every level defaults to empty so that
/// [`GenerationResponse::first_text`] decides what counts as malformed.
#[derive(Debug, Default, Deserialize)]
pub struct GenerationResponse {
    #[serde(default)]
    pub output: GenerationOutput,
}

#[derive(Debug, Default, Deserialize)]
pub struct GenerationOutput {
    #[serde(default)]
    pub choices: Vec<Choice>,
}

#[derive(Debug, Deserialize)]
pub struct Choice {
    #[serde(default)]
    pub message: ChoiceMessage,
}

#[derive(Debug, Default, Deserialize)]
pub struct ChoiceMessage {
    #[serde(default)]
    pub content: Vec<ContentItem>,
}

#[derive(Debug, Deserialize)]
pub struct ContentItem {
    #[serde(default)]
    pub text: Option<String>,
}

impl GenerationResponse {
    /// `output.choices[0].message.content[0].text`, if every step exists.
    pub fn first_text(&self) -> Option<&str> {
        self.output
            .choices
            .first()?
            .message
            .content
            .first()?
            .text
            .as_deref()
    }
}
