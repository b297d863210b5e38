//! Conversational data-modeling assistant, minus the model.
//!
//! Sessions, request decoding, the canned plan script, the HITL echo and the
//! pacing runner that the HTTP layer streams from.

pub mod events;
pub mod hitl;
pub mod plan;
pub mod request;
pub mod runner;
pub mod session;

pub use events::{HitlActionResult, StreamEvent};
pub use request::{StreamInputError, StreamRequest};
pub use runner::{play, RunOutcome};
pub use session::{Session, SessionStore};
