//! The canned data-modeling plan.
//!
//! A production build would hand the user's input to an LLM pipeline and
//! stream back whatever it produced. Here the plan, the proposed schema and
//! the rows are literals; only their order and pacing matter.

use serde_json::json;

use modeler_core::row::rows_from_json;

use crate::events::{
    Column, DoneMeta, HitlMetadata, HitlOption, HitlPrompt, Row, StreamEvent, TableResponse,
};

/// Which configured pause follows an emitted event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Pacing {
    None,
    Chunk,
    Row,
}

/// One scripted event plus the pause that follows it.
#[derive(Debug, Clone, PartialEq)]
pub struct Emission {
    pub event: StreamEvent,
    pub pacing: Pacing,
}

impl Emission {
    pub fn immediate(event: StreamEvent) -> Self {
        Self {
            event,
            pacing: Pacing::None,
        }
    }

    pub fn paced(event: StreamEvent, pacing: Pacing) -> Self {
        Self { event, pacing }
    }

    /// Narration and rows are the points where a disconnected client stops
    /// the stream.
    pub fn checks_disconnect(&self) -> bool {
        self.pacing != Pacing::None
    }
}

pub const PLAN_STEPS: [&str; 3] = ["Plan overview", "Stream table rows", "Finalize"];

pub const NARRATION: [&str; 3] = [
    "I will propose a table schema for your products. ",
    "First I will list columns and types. ",
    "Then I will stream the table as rows.",
];

pub const PRODUCTS_TABLE: &str = "products";

/// Columns of the proposed `products` table.
pub fn products_columns() -> Vec<Column> {
    vec![
        Column::new("id", "string", false, "Stable product identifier"),
        Column::new("name", "string", false, "Display name"),
        Column::new("price", "number", false, "Unit price"),
        Column::new("currency", "string", false, "ISO 4217 currency code"),
        Column::new(
            "available_since",
            "datetime",
            true,
            "First day the product can be ordered",
        ),
    ]
}

/// Sample rows streamed after the schema.
pub fn products_rows() -> Vec<Row> {
    rows_from_json(json!([
        {
            "id": "p1",
            "name": "Product A",
            "price": 9.99,
            "currency": "USD",
            "available_since": "2024-01-10T00:00:00Z"
        },
        {
            "id": "p2",
            "name": "Product B",
            "price": 19.99,
            "currency": "USD",
            "available_since": "2024-02-15T00:00:00Z"
        }
    ]))
}

/// Schema-only table payload announced before the rows.
pub fn products_schema() -> TableResponse {
    TableResponse {
        table_name: PRODUCTS_TABLE.to_string(),
        columns: products_columns(),
        rows: Vec::new(),
        meta: Some(json!({ "primaryKey": "id", "rowCount": products_rows().len() })),
    }
}

/// The approval prompt closing every plan.
pub fn approval_prompt() -> HitlPrompt {
    HitlPrompt {
        kind: "hitl".to_string(),
        title: "Approve data model plan".to_string(),
        description: "Approve the proposed table schema or modify it before applying."
            .to_string(),
        options: vec![
            HitlOption {
                id: "approve_plan".to_string(),
                label: "Approve Plan".to_string(),
                action: "approve_plan".to_string(),
                style: "primary".to_string(),
            },
            HitlOption {
                id: "modify".to_string(),
                label: "Modify".to_string(),
                action: "modify".to_string(),
                style: "secondary".to_string(),
            },
        ],
        metadata: HitlMetadata {
            hint: "Approve to finalize, Modify to edit schema in chat.".to_string(),
        },
    }
}

/// Full event script for a fresh chat input.
///
/// `message_id` is echoed in the final `done` meta when non-empty.
pub fn canned_plan(message_id: &str) -> Vec<Emission> {
    let mut script = Vec::new();

    script.push(Emission::immediate(StreamEvent::StepMetadata {
        total: PLAN_STEPS.len() as u32,
    }));

    // Step 1: narration
    script.push(Emission::immediate(StreamEvent::step(1, PLAN_STEPS[0])));
    for chunk in NARRATION {
        script.push(Emission::paced(StreamEvent::paragraph(chunk), Pacing::Chunk));
    }

    // Step 2: schema, then rows
    script.push(Emission::immediate(StreamEvent::step(2, PLAN_STEPS[1])));
    script.push(Emission::immediate(StreamEvent::TableSchema {
        content: products_schema(),
    }));
    for row in products_rows() {
        script.push(Emission::paced(StreamEvent::TableRow { content: row }, Pacing::Row));
    }

    // Step 3: hand over to the human
    script.push(Emission::immediate(StreamEvent::step(3, PLAN_STEPS[2])));
    script.push(Emission::immediate(StreamEvent::done(DoneMeta {
        hitl: Some(approval_prompt()),
        suggestions: None,
        message_id: non_empty(message_id),
    })));

    script
}

pub(crate) fn non_empty(s: &str) -> Option<String> {
    if s.is_empty() {
        None
    } else {
        Some(s.to_string())
    }
}
