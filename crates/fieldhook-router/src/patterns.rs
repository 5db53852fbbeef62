//! Declarative keyword/regex rule tables
//!
//! Every piece of "pattern detection" in the hooks reduces to these tables:
//! a matcher, a category, a fixed confidence weight. Matching is
//! case-insensitive substring (or regex find) anywhere in the text.
//! Selection is deterministic: matches are deduplicated per category and
//! ordered by (weight desc, category asc).

use regex::{Regex, RegexBuilder};
use std::collections::BTreeMap;
use std::sync::{Mutex, OnceLock};

#[derive(Clone, Copy, Debug)]
pub enum Matcher {
    /// Any of these substrings, case-insensitive.
    Keywords(&'static [&'static str]),
    /// A regex, compiled case-insensitive.
    Pattern(&'static str),
}

/// Compile each rule regex once and reuse it across events. A pattern that
/// fails to compile stays cached as `None` and simply never matches.
fn compiled(src: &'static str) -> Option<Regex> {
    static CACHE: OnceLock<Mutex<BTreeMap<&'static str, Option<Regex>>>> = OnceLock::new();
    let cache = CACHE.get_or_init(|| Mutex::new(BTreeMap::new()));
    let mut map = match cache.lock() {
        Ok(guard) => guard,
        Err(poisoned) => poisoned.into_inner(),
    };
    map.entry(src)
        .or_insert_with(|| {
            RegexBuilder::new(src)
                .case_insensitive(true)
                .build()
                .ok()
        })
        .clone()
}

impl Matcher {
    fn matches(&self, text_lower: &str, text: &str) -> bool {
        match self {
            Self::Keywords(words) => words.iter().any(|w| text_lower.contains(w)),
            Self::Pattern(src) => compiled(src)
                .map(|re| re.is_match(text))
                .unwrap_or(false),
        }
    }
}

#[derive(Clone, Copy, Debug)]
pub struct Rule {
    pub matcher: Matcher,
    pub category: &'static str,
    pub weight: f64,
}

const fn rule(matcher: Matcher, category: &'static str, weight: f64) -> Rule {
    Rule {
        matcher,
        category,
        weight,
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct Match {
    pub category: &'static str,
    pub weight: f64,
}

/// All categories whose rules fire on `text`, deduplicated (highest weight
/// wins per category), sorted (weight desc, category asc).
pub fn classify(rules: &[Rule], text: &str) -> Vec<Match> {
    let lower = text.to_lowercase();
    let mut by_category: BTreeMap<&'static str, f64> = BTreeMap::new();

    for r in rules {
        if r.matcher.matches(&lower, text) {
            let w = by_category.entry(r.category).or_insert(r.weight);
            if r.weight > *w {
                *w = r.weight;
            }
        }
    }

    let mut matches: Vec<Match> = by_category
        .into_iter()
        .map(|(category, weight)| Match { category, weight })
        .collect();
    matches.sort_by(|a, b| {
        b.weight
            .partial_cmp(&a.weight)
            .unwrap_or(std::cmp::Ordering::Equal)
            .then_with(|| a.category.cmp(b.category))
    });
    matches
}

/// The single best category, if any rule fires.
pub fn best_match(rules: &[Rule], text: &str) -> Option<Match> {
    classify(rules, text).into_iter().next()
}

// ---------------------------------------------------------------------------
// Rule tables
// ---------------------------------------------------------------------------

/// Primary intent of a user prompt.
pub const INTENT_RULES: &[Rule] = &[
    rule(
        Matcher::Keywords(&["analyze", "examine", "investigate", "study"]),
        "analyze",
        0.7,
    ),
    rule(
        Matcher::Keywords(&["create", "generate", "build", "implement", "write"]),
        "generate",
        0.7,
    ),
    rule(
        Matcher::Keywords(&["fix", "debug", "error", "issue", "problem"]),
        "debug",
        0.8,
    ),
    rule(
        Matcher::Keywords(&["optimize", "improve", "enhance", "refactor"]),
        "optimize",
        0.6,
    ),
    rule(Matcher::Pattern(r"\btest(s|ing)?\b"), "test", 0.6),
];

/// Task category, used for agent routing.
pub const TASK_RULES: &[Rule] = &[
    rule(
        Matcher::Keywords(&["implement", "code", "function", "feature", "bug", "refactor", "algorithm"]),
        "development",
        0.7,
    ),
    rule(
        Matcher::Keywords(&["ui", "component", "frontend", "layout", "styling", "responsive"]),
        "ui_development",
        0.7,
    ),
    rule(
        Matcher::Keywords(&["test", "coverage", "unit test", "integration test", "qa"]),
        "testing",
        0.7,
    ),
    rule(
        Matcher::Keywords(&["security", "audit", "vulnerability", "authentication", "encryption"]),
        "security",
        0.8,
    ),
    rule(
        Matcher::Keywords(&["blog", "article", "documentation", "guide", "tutorial"]),
        "content",
        0.6,
    ),
    rule(
        Matcher::Keywords(&["marketing", "campaign", "social", "promote", "launch", "brand"]),
        "marketing",
        0.6,
    ),
    rule(
        Matcher::Keywords(&["email", "newsletter", "outreach", "notification"]),
        "communication",
        0.6,
    ),
    rule(
        Matcher::Keywords(&["sales", "proposal", "quote", "lead", "prospect", "deal", "revenue"]),
        "sales",
        0.7,
    ),
    rule(
        Matcher::Keywords(&["onboarding", "support", "retention", "customer success"]),
        "customer_success",
        0.6,
    ),
    rule(
        Matcher::Keywords(&["analytics", "metrics", "tracking", "insights", "reporting"]),
        "analytics",
        0.6,
    ),
    rule(
        Matcher::Keywords(&["research", "explore", "understand", "compare"]),
        "research",
        0.5,
    ),
];

/// Natural-language hints toward a slash command.
pub const COMMAND_HINT_RULES: &[Rule] = &[
    rule(
        Matcher::Keywords(&["alignment", "jailbreak", "prompt injection", "safety probe"]),
        "alignment",
        0.9,
    ),
    rule(
        Matcher::Keywords(&["research", "investigate", "sources"]),
        "research",
        0.7,
    ),
    rule(
        Matcher::Keywords(&["workflow", "pipeline", "chain of agents"]),
        "chain",
        0.7,
    ),
    rule(
        Matcher::Keywords(&["security review", "audit", "vulnerability"]),
        "secure",
        0.8,
    ),
    rule(
        Matcher::Keywords(&["write tests", "test coverage", "add tests"]),
        "test",
        0.7,
    ),
    rule(
        Matcher::Keywords(&["optimize", "speed up", "performance"]),
        "optimize",
        0.6,
    ),
    rule(
        Matcher::Keywords(&["proposal", "client pitch"]),
        "proposal",
        0.7,
    ),
    rule(
        Matcher::Keywords(&["launch", "announcement", "campaign"]),
        "campaign",
        0.6,
    ),
    rule(
        Matcher::Keywords(&["onboard", "onboarding plan"]),
        "onboard",
        0.6,
    ),
    rule(
        Matcher::Keywords(&["document", "write docs", "docstring"]),
        "doc",
        0.5,
    ),
];

/// Business opportunities detected in tool output. Weights are the fixed
/// confidence values attached to each opportunity type.
pub const OPPORTUNITY_RULES: &[Rule] = &[
    rule(
        Matcher::Keywords(&["expansion", "upsell", "upgrade interest", "enterprise plan"]),
        "customer_expansion",
        0.9,
    ),
    rule(
        Matcher::Keywords(&["conversion", "funnel", "signup drop", "abandon"]),
        "conversion_optimization",
        0.8,
    ),
    rule(
        Matcher::Keywords(&["engagement decline", "stale content", "low engagement"]),
        "content_refresh",
        0.7,
    ),
    rule(
        Matcher::Keywords(&["trending", "viral", "spike in traffic"]),
        "trend_capitalization",
        0.6,
    ),
];

/// Error classes with canned recovery lines.
pub const RECOVERY_RULES: &[Rule] = &[
    rule(Matcher::Keywords(&["syntax"]), "syntax", 0.8),
    rule(Matcher::Keywords(&["import", "unresolved", "not found in scope"]), "import", 0.7),
    rule(Matcher::Keywords(&["type", "mismatch"]), "type", 0.7),
    rule(Matcher::Keywords(&["permission", "no such file", "read-only"]), "file", 0.7),
    rule(Matcher::Keywords(&["network", "timeout", "connection"]), "network", 0.6),
];

/// Canned recovery suggestion for a recovery category.
pub fn recovery_suggestion(category: &str) -> &'static str {
    match category {
        "syntax" => "Syntax error detected. Re-run the formatter before retrying.",
        "import" => "Missing import detected. Add the required imports and retry.",
        "type" => "Type error detected. Check the inferred types at the call site.",
        "file" => "File operation error. Check permissions and paths.",
        "network" => "Network error. Retry with backoff.",
        _ => "Analyzing error pattern for recovery.",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keywords_match_case_insensitively() {
        let m = classify(INTENT_RULES, "Please ANALYZE this module");
        assert_eq!(m[0].category, "analyze");
    }

    #[test]
    fn regex_rules_fire() {
        assert!(classify(INTENT_RULES, "run the tests")
            .iter()
            .any(|m| m.category == "test"));
        // "latest" must not match \btest\b
        assert!(!classify(INTENT_RULES, "use the latest version")
            .iter()
            .any(|m| m.category == "test"));
    }

    #[test]
    fn cached_regexes_stay_correct_across_calls() {
        // First call compiles and caches; later calls hit the cache.
        for _ in 0..50 {
            assert!(classify(INTENT_RULES, "testing the cache")
                .iter()
                .any(|m| m.category == "test"));
            assert!(!classify(INTENT_RULES, "a contested point")
                .iter()
                .any(|m| m.category == "test"));
        }
    }

    #[test]
    fn selection_is_deterministic_and_weight_ordered() {
        let text = "fix the error and write a test"; // debug 0.8 + test 0.6 + generate 0.7
        let m = classify(INTENT_RULES, text);
        let again = classify(INTENT_RULES, text);
        assert_eq!(m, again);
        assert_eq!(m[0].category, "debug");
        for pair in m.windows(2) {
            assert!(pair[0].weight >= pair[1].weight);
        }
    }

    #[test]
    fn ties_break_by_category_name() {
        // "optimize" (0.6) and "test" (0.6) tie; "optimize" sorts first.
        let m = classify(INTENT_RULES, "optimize the test");
        let tied: Vec<&str> = m
            .iter()
            .filter(|m| m.weight == 0.6)
            .map(|m| m.category)
            .collect();
        assert_eq!(tied, vec!["optimize", "test"]);
    }

    #[test]
    fn no_match_returns_empty() {
        assert!(classify(OPPORTUNITY_RULES, "nothing interesting here").is_empty());
        assert!(best_match(OPPORTUNITY_RULES, "").is_none());
    }

    #[test]
    fn opportunity_weights_are_fixed_confidences() {
        let m = best_match(OPPORTUNITY_RULES, "customer asked about the enterprise plan").unwrap();
        assert_eq!(m.category, "customer_expansion");
        assert_eq!(m.weight, 0.9);
    }

    #[test]
    fn recovery_suggestion_is_total() {
        assert!(recovery_suggestion("syntax").contains("formatter"));
        assert!(!recovery_suggestion("unheard-of").is_empty());
    }
}
