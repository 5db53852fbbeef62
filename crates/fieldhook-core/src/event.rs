//! Lifecycle events and tolerant payload views
//!
//! The host assistant calls the hook once per lifecycle event with a free-form
//! JSON object. Events are matched by exact name; everything else passes
//! through untouched. Payload views deserialize with every field optional so
//! a handler never fails on a missing key.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// A JSON object payload as passed by the host.
pub type Payload = Map<String, Value>;

/// The lifecycle events fieldhook knows how to handle.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EventKind {
    SessionStart,
    UserPromptSubmit,
    PreTool,
    PostTool,
    Stop,
    SubagentStop,
    Notification,
    PreCompact,
    SessionEnd,
    ContextChanged,
}

impl EventKind {
    /// Exact-match parse. `pre_start` and `activate` are accepted aliases
    /// for `session_start`; anything unrecognized returns `None` and the
    /// router passes the payload through unchanged.
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "session_start" | "pre_start" | "activate" => Some(Self::SessionStart),
            "user_prompt_submit" => Some(Self::UserPromptSubmit),
            "pre_tool" => Some(Self::PreTool),
            "post_tool" => Some(Self::PostTool),
            "stop" => Some(Self::Stop),
            "subagent_stop" => Some(Self::SubagentStop),
            "notification" => Some(Self::Notification),
            "pre_compact" => Some(Self::PreCompact),
            "session_end" => Some(Self::SessionEnd),
            "context_changed" => Some(Self::ContextChanged),
            _ => None,
        }
    }

    /// Canonical name, used as the `event` tag in log lines.
    pub fn name(&self) -> &'static str {
        match self {
            Self::SessionStart => "session_start",
            Self::UserPromptSubmit => "user_prompt_submit",
            Self::PreTool => "pre_tool",
            Self::PostTool => "post_tool",
            Self::Stop => "stop",
            Self::SubagentStop => "subagent_stop",
            Self::Notification => "notification",
            Self::PreCompact => "pre_compact",
            Self::SessionEnd => "session_end",
            Self::ContextChanged => "context_changed",
        }
    }

    pub fn all() -> &'static [EventKind] {
        &[
            Self::SessionStart,
            Self::UserPromptSubmit,
            Self::PreTool,
            Self::PostTool,
            Self::Stop,
            Self::SubagentStop,
            Self::Notification,
            Self::PreCompact,
            Self::SessionEnd,
            Self::ContextChanged,
        ]
    }
}

impl std::fmt::Display for EventKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// View over a `user_prompt_submit` payload.
#[derive(Debug, Default, Deserialize)]
pub struct PromptPayload {
    #[serde(default)]
    pub prompt: Option<String>,
    #[serde(default)]
    pub text: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
}

impl PromptPayload {
    pub fn from_payload(payload: &Payload) -> Self {
        serde_json::from_value(Value::Object(payload.clone())).unwrap_or_default()
    }

    /// The prompt text under whichever key the host used, or empty.
    pub fn prompt_text(&self) -> &str {
        self.prompt
            .as_deref()
            .or(self.text.as_deref())
            .or(self.message.as_deref())
            .unwrap_or("")
    }
}

/// View over `pre_tool` / `post_tool` payloads.
#[derive(Debug, Default, Deserialize)]
pub struct ToolPayload {
    #[serde(default)]
    pub tool_name: Option<String>,
    #[serde(default)]
    pub tool_input: Option<Value>,
    #[serde(default)]
    pub output: Option<String>,
    #[serde(default)]
    pub success: Option<bool>,
    #[serde(default)]
    pub elapsed_ms: Option<u64>,
}

impl ToolPayload {
    pub fn from_payload(payload: &Payload) -> Self {
        serde_json::from_value(Value::Object(payload.clone())).unwrap_or_default()
    }

    pub fn tool_name(&self) -> &str {
        self.tool_name.as_deref().unwrap_or("")
    }

    pub fn output_text(&self) -> &str {
        self.output.as_deref().unwrap_or("")
    }
}

/// View over a `notification` payload.
#[derive(Debug, Default, Deserialize)]
pub struct NotifyPayload {
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub severity: Option<String>,
}

impl NotifyPayload {
    pub fn from_payload(payload: &Payload) -> Self {
        serde_json::from_value(Value::Object(payload.clone())).unwrap_or_default()
    }

    pub fn message_text(&self) -> &str {
        self.message.as_deref().unwrap_or("")
    }

    pub fn is_error(&self) -> bool {
        matches!(self.severity.as_deref(), Some("error") | Some("critical"))
    }
}
