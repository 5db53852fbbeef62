//! `{placeholder}` template rendering
//!
//! Whole-token, literal, non-recursive substitution: the template is scanned
//! once, every `{ident}` token with a supplied value is replaced, and tokens
//! without a value stay verbatim. Substituted text is never re-scanned, so a
//! value containing `{x}` cannot trigger a second replacement.

use regex::Regex;
use std::collections::BTreeMap;
use std::sync::OnceLock;

fn placeholder_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"\{([A-Za-z0-9_]+)\}").unwrap())
}

/// Render `template`, substituting from `values`.
pub fn render(template: &str, values: &BTreeMap<String, String>) -> String {
    let re = placeholder_re();
    let mut out = String::with_capacity(template.len());
    let mut last = 0;

    for caps in re.captures_iter(template) {
        let whole = caps.get(0).unwrap();
        let name = &caps[1];
        out.push_str(&template[last..whole.start()]);
        match values.get(name) {
            Some(value) => out.push_str(value),
            None => out.push_str(whole.as_str()),
        }
        last = whole.end();
    }
    out.push_str(&template[last..]);
    out
}

/// Placeholder names appearing in a template, in order, deduplicated.
pub fn placeholders(template: &str) -> Vec<String> {
    let mut seen = Vec::new();
    for caps in placeholder_re().captures_iter(template) {
        let name = caps[1].to_string();
        if !seen.contains(&name) {
            seen.push(name);
        }
    }
    seen
}

#[cfg(test)]
mod tests {
    use super::*;

    fn map(pairs: &[(&str, &str)]) -> BTreeMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn empty_map_is_identity() {
        let t = "Hello {name}, welcome to {place}";
        assert_eq!(render(t, &BTreeMap::new()), t);
    }

    #[test]
    fn every_occurrence_is_replaced() {
        assert_eq!(render("{x}-{x}", &map(&[("x", "v")])), "v-v");
    }

    #[test]
    fn unknown_placeholders_stay_verbatim() {
        assert_eq!(
            render("{a} and {b}", &map(&[("a", "1")])),
            "1 and {b}"
        );
    }

    #[test]
    fn substitution_is_not_recursive() {
        // A value containing a placeholder token is emitted literally.
        assert_eq!(
            render("{a}", &map(&[("a", "{b}"), ("b", "nope")])),
            "{b}"
        );
    }

    #[test]
    fn non_ident_braces_are_left_alone() {
        let t = "json: {\"k\": 1} and {x y}";
        assert_eq!(render(t, &map(&[("x", "v")])), t);
    }

    #[test]
    fn placeholder_listing_dedupes_in_order() {
        assert_eq!(placeholders("{b}{a}{b}"), vec!["b", "a"]);
    }
}
