//! The canonical event router
//!
//! Exactly one dispatch table. Unknown event types pass the payload through
//! unchanged (plus timing). Known events run their handler inside
//! `catch_unwind`; on any failure the original payload comes back and the
//! failure goes to the diagnostic log. Nothing ever propagates past
//! [`Router::route`] — the host assistant must never be blocked by a hook.

use crate::handlers;
use fieldhook_core::{EventKind, Payload, Result, SessionContext};
use fieldhook_log::{EventLog, LogEntry};
use serde_json::{json, Value};
use std::panic::{catch_unwind, AssertUnwindSafe};
use std::time::Instant;
use tracing::warn;

type Handler = fn(&mut SessionContext, &Payload) -> Result<Payload>;

fn handler_for(kind: EventKind) -> Handler {
    match kind {
        EventKind::SessionStart => handlers::session_start,
        EventKind::UserPromptSubmit => handlers::user_prompt_submit,
        EventKind::PreTool => handlers::pre_tool,
        EventKind::PostTool => handlers::post_tool,
        EventKind::Stop => handlers::stop,
        EventKind::SubagentStop => handlers::subagent_stop,
        EventKind::Notification => handlers::notification,
        EventKind::PreCompact => handlers::pre_compact,
        EventKind::SessionEnd => handlers::session_end,
        EventKind::ContextChanged => handlers::context_changed,
    }
}

pub struct Router {
    log: Option<EventLog>,
}

impl Router {
    /// Router without an event log (used by tests and dry runs).
    pub fn new() -> Self {
        Self { log: None }
    }

    /// Router that appends every processed event to `log`, best-effort.
    pub fn with_log(log: EventLog) -> Self {
        Self { log: Some(log) }
    }

    /// Process one lifecycle event. Always returns; never panics or errors.
    pub fn route(
        &self,
        ctx: &mut SessionContext,
        event_type: &str,
        payload: Payload,
    ) -> Payload {
        let start = Instant::now();

        let result = match EventKind::parse(event_type) {
            None => payload.clone(),
            Some(kind) => run_guarded(handler_for(kind), ctx, &payload, event_type),
        };

        let mut result = result;
        let elapsed_ms = start.elapsed().as_secs_f64() * 1000.0;
        if !result.contains_key("hook_elapsed_ms") {
            result.insert("hook_elapsed_ms".into(), json!(elapsed_ms));
        }

        if let Some(log) = &self.log {
            log.append(&LogEntry::new(
                EventKind::parse(event_type)
                    .map(|k| k.name().to_string())
                    .unwrap_or_else(|| event_type.to_string()),
                Value::Object(result.clone()),
            ));
        }

        result
    }
}

impl Default for Router {
    fn default() -> Self {
        Self::new()
    }
}

/// Run one handler behind the swallow-and-log boundary. A handler error or
/// panic yields the original payload.
fn run_guarded(
    handler: Handler,
    ctx: &mut SessionContext,
    payload: &Payload,
    event_type: &str,
) -> Payload {
    match catch_unwind(AssertUnwindSafe(|| handler(ctx, payload))) {
        Ok(Ok(additions)) => merge(payload.clone(), additions),
        Ok(Err(e)) => {
            warn!(event = event_type, error = %e, "handler failed; passing payload through");
            payload.clone()
        }
        Err(_) => {
            warn!(event = event_type, "handler panicked; passing payload through");
            payload.clone()
        }
    }
}

/// Add handler entries to the payload without overwriting anything the host
/// sent. Original keys always win.
fn merge(mut payload: Payload, additions: Payload) -> Payload {
    for (key, value) in additions {
        payload.entry(key).or_insert(value);
    }
    payload
}
