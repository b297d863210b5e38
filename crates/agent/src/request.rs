//! Decoded `/stream` input, independent of how it arrived on the wire.

use serde::{Deserialize, Deserializer};
use serde_json::Value;
use thiserror::Error;

use crate::events::HitlActionResult;
use crate::hitl;
use crate::plan::{self, Emission};

#[derive(Error, Debug, PartialEq)]
pub enum StreamInputError {
    #[error("Invalid JSON body: {0}")]
    InvalidJson(String),

    #[error("Invalid hitlResult: {0}")]
    InvalidHitlResult(String),

    #[error("Invalid multipart body: {0}")]
    Multipart(String),
}

/// What a chat turn asks the responder for.
#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct StreamRequest {
    #[serde(default, deserialize_with = "text_only")]
    pub input: Option<String>,
    #[serde(default, deserialize_with = "text_only")]
    pub id: Option<String>,
    #[serde(default)]
    pub hitl_result: Option<HitlActionResult>,
    /// Uploaded files seen in a multipart body. Contents are discarded.
    #[serde(skip)]
    pub file_count: usize,
}

/// Keep string values; numbers, objects and the like read as absent.
fn text_only<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::String(s) => Some(s),
        _ => None,
    })
}

impl StreamRequest {
    pub fn new(input: Option<String>, id: Option<String>) -> Self {
        Self {
            input,
            id,
            ..Self::default()
        }
    }

    /// Decode a JSON body. An empty body is an empty request.
    pub fn from_json(body: &[u8]) -> Result<Self, StreamInputError> {
        if body.iter().all(u8::is_ascii_whitespace) {
            return Ok(Self::default());
        }
        serde_json::from_slice(body).map_err(|e| StreamInputError::InvalidJson(e.to_string()))
    }

    /// Apply one multipart text field. Unknown fields are ignored.
    pub fn set_form_field(&mut self, name: &str, value: String) -> Result<(), StreamInputError> {
        match name {
            "input" => self.input = Some(value),
            "id" => self.id = Some(value),
            "hitlResult" if value.trim().is_empty() => self.hitl_result = None,
            "hitlResult" => {
                let parsed = serde_json::from_str(&value)
                    .map_err(|e| StreamInputError::InvalidHitlResult(e.to_string()))?;
                self.hitl_result = Some(parsed);
            }
            _ => {}
        }
        Ok(())
    }

    pub fn input(&self) -> &str {
        self.input.as_deref().unwrap_or("")
    }

    pub fn message_id(&self) -> &str {
        self.id.as_deref().unwrap_or("")
    }

    /// The canned plan for fresh input, or the echo when a HITL decision came
    /// back.
    pub fn script(&self) -> Vec<Emission> {
        match &self.hitl_result {
            Some(result) => hitl::echo_script(result, self.message_id()),
            None => plan::canned_plan(self.message_id()),
        }
    }
}
