//! HITL echo: answering a client's approval decision.
//!
//! When `/stream` receives the result of a HITL prompt it skips the canned
//! plan, acknowledges the decision and offers follow-up queries.

use crate::events::{DoneMeta, HitlActionResult, StreamEvent};
use crate::plan::{non_empty, Emission};

const APPROVE_SUGGESTIONS: &[&str] = &[
    "Generate the SQL DDL for the products table",
    "Add sample rows for three more products",
    "Build a dashboard of product prices by currency",
];

const MODIFY_SUGGESTIONS: &[&str] = &[
    "Add a category column to products",
    "Rename price to unit_price",
    "Make available_since required",
];

const GENERIC_SUGGESTIONS: &[&str] = &[
    "Propose a schema for customer orders",
    "Show the current data model",
];

/// Broad class of a HITL decision, derived from its action id.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Decision {
    Approve,
    Modify,
    Other,
}

impl Decision {
    /// Case-insensitive substring match on the action id. `approve` is tested
    /// first, so an id containing both words counts as an approval.
    pub fn classify(action: &str) -> Self {
        let action = action.to_ascii_lowercase();
        if action.contains("approve") {
            Decision::Approve
        } else if action.contains("modify") {
            Decision::Modify
        } else {
            Decision::Other
        }
    }

    pub fn suggestions(self) -> &'static [&'static str] {
        match self {
            Decision::Approve => APPROVE_SUGGESTIONS,
            Decision::Modify => MODIFY_SUGGESTIONS,
            Decision::Other => GENERIC_SUGGESTIONS,
        }
    }

    pub fn acknowledgement(self, action: &str) -> String {
        match self {
            Decision::Approve => {
                "Plan approved. The products schema is ready to apply.".to_string()
            }
            Decision::Modify => {
                "Okay, tell me what to change in the products schema.".to_string()
            }
            Decision::Other => format!("Received action '{}'.", action),
        }
    }
}

/// Static follow-up queries for a HITL action id.
pub fn suggestions_for(action: &str) -> Vec<String> {
    Decision::classify(action)
        .suggestions()
        .iter()
        .map(|s| s.to_string())
        .collect()
}

/// Event script echoing a HITL decision back to the client.
pub fn echo_script(result: &HitlActionResult, message_id: &str) -> Vec<Emission> {
    let decision = Decision::classify(&result.action);
    vec![
        Emission::immediate(StreamEvent::StepMetadata { total: 1 }),
        Emission::immediate(StreamEvent::step(1, "Apply decision")),
        Emission::immediate(StreamEvent::HitlResult {
            content: result.clone(),
        }),
        Emission::immediate(StreamEvent::paragraph(
            decision.acknowledgement(&result.action),
        )),
        Emission::immediate(StreamEvent::done(DoneMeta {
            hitl: None,
            suggestions: Some(suggestions_for(&result.action)),
            message_id: non_empty(message_id),
        })),
    ]
}
