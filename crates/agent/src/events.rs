use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

pub use modeler_core::row::Row;

/// Events written to the `/stream` response, one NDJSON line each.
///
/// The `type` tag is kebab-case (`step-metadata`, `table-row`, ...), which is
/// what the chat front-end switches on.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type", rename_all = "kebab-case")]
pub enum StreamEvent {
    /// Announces how many `step` markers follow.
    StepMetadata { total: u32 },
    /// Marks the start of a numbered step (1-based).
    Step { content: String, step: u32 },
    /// A chunk of assistant narration.
    Paragraph { content: String },
    /// Column layout of the table about to be streamed; `rows` is empty.
    TableSchema { content: TableResponse },
    /// One table row.
    TableRow { content: Row },
    /// Echo of the HITL decision the client sent back.
    HitlResult { content: HitlActionResult },
    /// Terminal event.
    Done { content: String, meta: DoneMeta },
}

impl StreamEvent {
    pub fn step(step: u32, content: &str) -> Self {
        StreamEvent::Step {
            content: content.to_string(),
            step,
        }
    }

    pub fn paragraph(content: impl Into<String>) -> Self {
        StreamEvent::Paragraph {
            content: content.into(),
        }
    }

    pub fn done(meta: DoneMeta) -> Self {
        StreamEvent::Done {
            content: String::new(),
            meta,
        }
    }

    /// Serialize as a single NDJSON line (trailing newline included).
    pub fn to_ndjson_line(&self) -> String {
        let mut line = serde_json::to_string(self).unwrap_or_else(|_| "{}".to_string());
        line.push('\n');
        line
    }
}

// ── Table payload ─────────────────────────────────────────────

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Column {
    pub name: String,
    #[serde(rename = "type")]
    pub column_type: String,
    #[serde(default = "default_nullable")]
    pub nullable: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

fn default_nullable() -> bool {
    true
}

impl Column {
    pub fn new(name: &str, column_type: &str, nullable: bool, description: &str) -> Self {
        Self {
            name: name.to_string(),
            column_type: column_type.to_string(),
            nullable,
            description: Some(description.to_string()),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct TableResponse {
    pub table_name: String,
    pub columns: Vec<Column>,
    pub rows: Vec<Row>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub meta: Option<Value>,
}

// ── HITL ──────────────────────────────────────────────────────

/// Approval prompt attached to the final `done` event of a plan.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct HitlPrompt {
    /// Always `"hitl"`.
    #[serde(rename = "type")]
    pub kind: String,
    pub title: String,
    pub description: String,
    pub options: Vec<HitlOption>,
    pub metadata: HitlMetadata,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct HitlOption {
    pub id: String,
    pub label: String,
    pub action: String,
    pub style: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct HitlMetadata {
    pub hint: String,
}

/// The client's answer to a [`HitlPrompt`], sent with the next `/stream` call.
///
/// Fields the front-end adds beyond `action` are kept verbatim so the echo
/// returns what was received. A missing `action` reads as empty and gets the
/// generic follow-ups.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct HitlActionResult {
    #[serde(default, alias = "actionId", alias = "action_id")]
    pub action: String,
    #[serde(default, alias = "option_id", skip_serializing_if = "Option::is_none")]
    pub option_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<Value>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl HitlActionResult {
    pub fn new(action: &str) -> Self {
        Self {
            action: action.to_string(),
            option_id: None,
            data: None,
            extra: Map::new(),
        }
    }
}

// ── Done meta ─────────────────────────────────────────────────

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct DoneMeta {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hitl: Option<HitlPrompt>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub suggestions: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message_id: Option<String>,
}
