//! Session context — the single mutable record threaded through the router
//!
//! One context per assistant session. It is created at `session_start`,
//! mutated by every handler, and discarded after `session_end`. It is owned
//! by the caller and passed `&mut` into the router; there is no global. Two
//! states only: inactive until the first successful activation, active
//! afterwards, never back.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// How many pattern names the context retains. Oldest entries are evicted.
pub const MAX_ACTIVE_PATTERNS: usize = 32;

/// Initial field resonance assigned on activation.
pub const BASE_RESONANCE: f64 = 0.72;

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct SessionContext {
    pub session_id: String,
    pub activated: bool,
    /// Field resonance, always within [0, 1].
    pub resonance: f64,
    /// Recently matched pattern categories, deduplicated, bounded.
    pub active_patterns: Vec<String>,
    /// Free-form counters keyed by name (sorted for stable serialization).
    pub counters: BTreeMap<String, u64>,
    pub prompt_count: u64,
    pub tool_count: u64,
    pub error_count: u64,
    pub started_at: DateTime<Utc>,
}

impl SessionContext {
    pub fn new() -> Self {
        Self {
            session_id: uuid::Uuid::new_v4().to_string(),
            activated: false,
            resonance: 0.0,
            active_patterns: Vec::new(),
            counters: BTreeMap::new(),
            prompt_count: 0,
            tool_count: 0,
            error_count: 0,
            started_at: Utc::now(),
        }
    }

    /// Transition inactive → active. Idempotent; resonance is only seeded
    /// on the first activation.
    pub fn activate(&mut self) {
        if !self.activated {
            self.activated = true;
            self.resonance = BASE_RESONANCE;
        }
    }

    pub fn bump(&mut self, counter: &str) -> u64 {
        let entry = self.counters.entry(counter.to_string()).or_insert(0);
        *entry += 1;
        *entry
    }

    pub fn counter(&self, counter: &str) -> u64 {
        self.counters.get(counter).copied().unwrap_or(0)
    }

    /// Record a matched pattern category. Duplicates are moved to the back;
    /// the list never exceeds [`MAX_ACTIVE_PATTERNS`].
    pub fn note_pattern(&mut self, pattern: &str) {
        self.active_patterns.retain(|p| p != pattern);
        self.active_patterns.push(pattern.to_string());
        if self.active_patterns.len() > MAX_ACTIVE_PATTERNS {
            let excess = self.active_patterns.len() - MAX_ACTIVE_PATTERNS;
            self.active_patterns.drain(..excess);
        }
    }

    /// Set resonance, clamped to [0, 1].
    pub fn set_resonance(&mut self, value: f64) {
        self.resonance = value.clamp(0.0, 1.0);
    }

    pub fn elapsed_secs(&self) -> i64 {
        (Utc::now() - self.started_at).num_seconds().max(0)
    }
}

impl Default for SessionContext {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn activation_is_one_way() {
        let mut ctx = SessionContext::new();
        assert!(!ctx.activated);
        ctx.activate();
        assert!(ctx.activated);
        assert_eq!(ctx.resonance, BASE_RESONANCE);

        // Re-activation does not reset resonance.
        ctx.set_resonance(0.9);
        ctx.activate();
        assert_eq!(ctx.resonance, 0.9);
    }

    #[test]
    fn counters_default_to_zero() {
        let mut ctx = SessionContext::new();
        assert_eq!(ctx.counter("success_bash"), 0);
        assert_eq!(ctx.bump("success_bash"), 1);
        assert_eq!(ctx.bump("success_bash"), 2);
        assert_eq!(ctx.counter("success_bash"), 2);
    }

    #[test]
    fn pattern_list_dedupes_and_evicts() {
        let mut ctx = SessionContext::new();
        ctx.note_pattern("testing");
        ctx.note_pattern("security");
        ctx.note_pattern("testing");
        assert_eq!(ctx.active_patterns, vec!["security", "testing"]);

        for i in 0..MAX_ACTIVE_PATTERNS + 5 {
            ctx.note_pattern(&format!("p{}", i));
        }
        assert_eq!(ctx.active_patterns.len(), MAX_ACTIVE_PATTERNS);
        assert!(!ctx.active_patterns.contains(&"security".to_string()));
    }

    #[test]
    fn resonance_is_clamped() {
        let mut ctx = SessionContext::new();
        ctx.set_resonance(1.7);
        assert_eq!(ctx.resonance, 1.0);
        ctx.set_resonance(-0.2);
        assert_eq!(ctx.resonance, 0.0);
    }
}
