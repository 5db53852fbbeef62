//! Core types for fieldhook
//!
//! Shared across the router, command registry, metric generators and event
//! log: the lifecycle event model, the session context record, and the
//! crate-wide error type.

pub mod error;
pub mod event;
pub mod session;

pub use error::{Error, Result};
pub use event::{EventKind, NotifyPayload, Payload, PromptPayload, ToolPayload};
pub use session::{SessionContext, BASE_RESONANCE, MAX_ACTIVE_PATTERNS};
