//! Literal rows behind the built-in datasets.

use modeler_core::row::{rows_from_json, Row};
use serde_json::json;

/// Monthly revenue per region. One row has no `channel`, one has null `units`.
pub(crate) fn sales() -> Vec<Row> {
    rows_from_json(json!([
        { "month": "2024-01-01", "region": "EMEA", "product": "Widget", "channel": "online", "revenue": 1200.0, "units": 40 },
        { "month": "2024-01-01", "region": "NA",   "product": "Widget", "channel": "retail", "revenue": 950.5,  "units": 31 },
        { "month": "2024-01-01", "region": "APAC", "product": "Gadget", "channel": "online", "revenue": 430.0,  "units": 12 },
        { "month": "2024-02-01", "region": "EMEA", "product": "Gadget", "channel": "retail", "revenue": 780.0,  "units": 26 },
        { "month": "2024-02-01", "region": "NA",   "product": "Widget", "channel": "online", "revenue": 1340.0, "units": 45 },
        { "month": "2024-02-01", "region": "APAC", "product": "Widget",                      "revenue": 610.0,  "units": 20 },
        { "month": "2024-03-01", "region": "EMEA", "product": "Widget", "channel": "online", "revenue": 1500.0, "units": 50 },
        { "month": "2024-03-01", "region": "NA",   "product": "Gadget", "channel": "retail", "revenue": 720.0,  "units": null }
    ]))
}

/// Weekly sign-ups per acquisition source.
pub(crate) fn signups() -> Vec<Row> {
    rows_from_json(json!([
        { "week": "2024-05-06", "source": "organic",  "visits": 1200, "signups": 48, "paid": false },
        { "week": "2024-05-06", "source": "ads",      "visits": 800,  "signups": 40, "paid": true },
        { "week": "2024-05-06", "source": "referral", "visits": 300,  "signups": 21, "paid": false },
        { "week": "2024-05-13", "source": "organic",  "visits": 1350, "signups": 51, "paid": false },
        { "week": "2024-05-13", "source": "ads",      "visits": 900,  "signups": 54, "paid": true },
        { "week": "2024-05-13", "source": "referral", "visits": 280,  "signups": 14, "paid": false }
    ]))
}
