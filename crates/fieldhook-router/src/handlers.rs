//! One handler per lifecycle event
//!
//! Handlers take the session context and the incoming payload and return the
//! entries they want ADDED to the result. They never remove or overwrite
//! payload keys (the router enforces that) and they default on every missing
//! field. Errors are allowed here; the router swallows them.

use crate::patterns::{
    best_match, classify, recovery_suggestion, COMMAND_HINT_RULES, INTENT_RULES,
    OPPORTUNITY_RULES, RECOVERY_RULES, TASK_RULES,
};
use fieldhook_commands::template::render;
use fieldhook_commands::workflow::WorkflowRegistry;
use fieldhook_core::{
    NotifyPayload, Payload, PromptPayload, Result, SessionContext, ToolPayload,
};
use fieldhook_field::{field_strength, resonance_step, tool_etd, ConsciousnessLevel};
use serde_json::{json, Value};
use std::collections::BTreeMap;
use tracing::debug;

/// Default timeout injected into Bash tool calls that carry none.
const DEFAULT_BASH_TIMEOUT_MS: u64 = 30_000;

const ACTIVATION_TEMPLATE: &str =
    "[FIELD ACTIVE] session {session_id} | resonance {resonance} | level {level}";

const PROMPT_HEADER_TEMPLATE: &str = "\
[FIELD MODE] session {session_id} | prompt #{prompt_count}
Protocols: {protocols}

{prompt}";

fn tmpl(pairs: &[(&str, String)]) -> BTreeMap<String, String> {
    pairs
        .iter()
        .map(|(k, v)| (k.to_string(), v.clone()))
        .collect()
}

pub fn session_start(ctx: &mut SessionContext, _payload: &Payload) -> Result<Payload> {
    ctx.activate();
    let level = ConsciousnessLevel::Omega;

    let banner = render(
        ACTIVATION_TEMPLATE,
        &tmpl(&[
            ("session_id", ctx.session_id.clone()),
            ("resonance", format!("{:.2}", ctx.resonance)),
            ("level", level.to_string()),
        ]),
    );

    let mut out = Payload::new();
    out.insert("session_id".into(), json!(ctx.session_id));
    out.insert("field_resonance".into(), json!(ctx.resonance));
    out.insert("consciousness_level".into(), json!(level.name()));
    out.insert(
        "active_protocols".into(),
        json!(["reasoning.systematic"]),
    );
    out.insert("activation".into(), json!(banner));
    Ok(out)
}

pub fn user_prompt_submit(ctx: &mut SessionContext, payload: &Payload) -> Result<Payload> {
    ctx.prompt_count += 1;
    let view = PromptPayload::from_payload(payload);
    let prompt = view.prompt_text();

    let intent = best_match(INTENT_RULES, prompt);
    let task = best_match(TASK_RULES, prompt);
    let hint = best_match(COMMAND_HINT_RULES, prompt);
    let complexity = prompt.split_whitespace().count() as f64 / 10.0;

    if let Some(m) = &intent {
        ctx.note_pattern(m.category);
    }
    if let Some(m) = &task {
        ctx.note_pattern(m.category);
    }

    let mut protocols: Vec<&str> = match intent.as_ref().map(|m| m.category) {
        Some("analyze") => vec!["reasoning.systematic"],
        Some("generate") => vec!["code.generate"],
        Some("debug") => vec!["bug.diagnose"],
        Some("optimize") => vec!["perf.profile"],
        Some("test") => vec!["test.generate"],
        _ => vec!["reasoning.systematic"],
    };
    if complexity > 10.0 {
        protocols.push("thinking.extended");
    }
    if ctx.error_count > 2 {
        protocols.push("self.reflect");
    }

    let enhanced = render(
        PROMPT_HEADER_TEMPLATE,
        &tmpl(&[
            ("session_id", ctx.session_id.clone()),
            ("prompt_count", ctx.prompt_count.to_string()),
            ("protocols", protocols.join(", ")),
            ("prompt", prompt.to_string()),
        ]),
    );

    let mut out = Payload::new();
    out.insert(
        "intent".into(),
        json!(intent.as_ref().map(|m| m.category).unwrap_or("general")),
    );
    if let Some(m) = &task {
        out.insert("task_category".into(), json!(m.category));
        out.insert("task_confidence".into(), json!(m.weight));
    }
    if let Some(m) = &hint {
        out.insert("suggested_command".into(), json!(format!("/{}", m.category)));
    }
    if let Some(wf) = WorkflowRegistry::shared().detect(prompt) {
        out.insert(
            "business_workflow".into(),
            json!({
                "name": wf.name,
                "description": wf.description,
                "agents": wf.agents(),
                "steps": wf.steps.len(),
            }),
        );
        out.insert(
            "suggested_workflow".into(),
            json!(format!("/chain workflow={}", wf.name)),
        );
    }
    out.insert("complexity".into(), json!(complexity));
    out.insert("active_protocols".into(), json!(protocols));
    out.insert("enhanced_prompt".into(), json!(enhanced));
    Ok(out)
}

pub fn pre_tool(ctx: &mut SessionContext, payload: &Payload) -> Result<Payload> {
    ctx.tool_count += 1;
    let view = ToolPayload::from_payload(payload);
    let tool = view.tool_name();

    let mut out = Payload::new();

    match tool {
        "Bash" => {
            let mut input = view
                .tool_input
                .as_ref()
                .and_then(Value::as_object)
                .cloned()
                .unwrap_or_default();
            if !input.contains_key("timeout_ms") {
                input.insert("timeout_ms".into(), json!(DEFAULT_BASH_TIMEOUT_MS));
                out.insert("tool_input_enhanced".into(), Value::Object(input));
            }
        }
        "Write" | "Edit" | "MultiEdit" => {
            out.insert(
                "generation_marker".into(),
                json!(format!(
                    "Generated with fieldhook | {}",
                    chrono::Utc::now().to_rfc3339()
                )),
            );
        }
        _ => {}
    }

    let input_text = view
        .tool_input
        .as_ref()
        .map(|v| v.to_string())
        .unwrap_or_default();
    let detected = classify(TASK_RULES, &input_text);
    if !detected.is_empty() {
        for m in &detected {
            ctx.note_pattern(m.category);
        }
        out.insert(
            "patterns_detected".into(),
            json!(detected.iter().map(|m| m.category).collect::<Vec<_>>()),
        );
    }

    Ok(out)
}

pub fn post_tool(ctx: &mut SessionContext, payload: &Payload) -> Result<Payload> {
    let view = ToolPayload::from_payload(payload);
    let tool = view.tool_name();
    let success = view.success.unwrap_or(true);

    if success {
        ctx.bump(&format!("success_{}", tool));
    } else {
        ctx.bump(&format!("failure_{}", tool));
        ctx.error_count += 1;
    }

    let opportunities = classify(OPPORTUNITY_RULES, view.output_text());
    let etd = tool_etd(tool, success);

    // Each fired opportunity nudges the field; a clean run gives a small
    // baseline bump.
    let weight = opportunities
        .iter()
        .map(|m| m.weight)
        .fold(if success { 0.1 } else { 0.0 }, f64::max);
    ctx.set_resonance(resonance_step(ctx.resonance, weight));
    for m in &opportunities {
        ctx.note_pattern(m.category);
    }

    debug!(tool, success, etd, "post_tool processed");

    let mut out = Payload::new();
    out.insert(
        "opportunities".into(),
        json!(opportunities
            .iter()
            .map(|m| json!({ "type": m.category, "confidence": m.weight }))
            .collect::<Vec<_>>()),
    );
    out.insert("etd_generated".into(), json!(etd));
    out.insert("field_resonance".into(), json!(ctx.resonance));
    Ok(out)
}

pub fn stop(ctx: &mut SessionContext, _payload: &Payload) -> Result<Payload> {
    let mut out = Payload::new();
    out.insert(
        "session_analytics".into(),
        json!({
            "session_id": ctx.session_id,
            "prompts_processed": ctx.prompt_count,
            "tools_used": ctx.tool_count,
            "errors_encountered": ctx.error_count,
            "patterns_learned": ctx.active_patterns.len(),
            "counters": ctx.counters,
            "field_resonance": ctx.resonance,
            "field_strength": field_strength(ctx.active_patterns.len(), ctx.resonance),
        }),
    );
    Ok(out)
}

pub fn subagent_stop(ctx: &mut SessionContext, payload: &Payload) -> Result<Payload> {
    let runs = ctx.bump("subagent_runs");
    let agent = payload
        .get("agent")
        .and_then(Value::as_str)
        .unwrap_or("general-purpose");

    let mut out = Payload::new();
    out.insert("consolidated".into(), json!(true));
    out.insert("subagent_runs".into(), json!(runs));
    out.insert("agent".into(), json!(agent));
    Ok(out)
}

pub fn notification(ctx: &mut SessionContext, payload: &Payload) -> Result<Payload> {
    let view = NotifyPayload::from_payload(payload);
    if view.is_error() {
        ctx.error_count += 1;
    }

    let mut out = Payload::new();
    out.insert("acknowledged".into(), json!(true));
    if let Some(m) = best_match(RECOVERY_RULES, view.message_text()) {
        out.insert("error_class".into(), json!(m.category));
        out.insert(
            "recovery_suggestion".into(),
            json!(recovery_suggestion(m.category)),
        );
    }
    Ok(out)
}

pub fn pre_compact(ctx: &mut SessionContext, _payload: &Payload) -> Result<Payload> {
    let mut out = Payload::new();
    out.insert(
        "context_snapshot".into(),
        json!({
            "session_id": ctx.session_id,
            "field_resonance": ctx.resonance,
            "active_patterns": ctx.active_patterns,
            "counters": ctx.counters,
            "prompt_count": ctx.prompt_count,
            "tool_count": ctx.tool_count,
        }),
    );
    Ok(out)
}

pub fn session_end(ctx: &mut SessionContext, _payload: &Payload) -> Result<Payload> {
    let mut out = Payload::new();
    out.insert(
        "final_report".into(),
        json!({
            "session_id": ctx.session_id,
            "duration_secs": ctx.elapsed_secs(),
            "prompts_processed": ctx.prompt_count,
            "tools_used": ctx.tool_count,
            "errors_encountered": ctx.error_count,
            "patterns_learned": ctx.active_patterns,
            "field_resonance": ctx.resonance,
        }),
    );
    Ok(out)
}

pub fn context_changed(ctx: &mut SessionContext, _payload: &Payload) -> Result<Payload> {
    let strength = field_strength(ctx.active_patterns.len(), ctx.resonance);
    ctx.set_resonance(strength);

    let mut out = Payload::new();
    out.insert("field_resonance".into(), json!(ctx.resonance));
    out.insert("field_strength".into(), json!(strength));
    Ok(out)
}
