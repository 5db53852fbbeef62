//! Unknown-command suggestions
//!
//! Similarity is Jaccard overlap of the two names' character sets with a
//! +0.2 bonus when the first characters match. Crude, but cheap and
//! deterministic; candidates are ordered (score desc, name asc) and capped
//! at three. See DESIGN.md for why this metric over edit distance.

use std::collections::BTreeSet;

pub const MAX_SUGGESTIONS: usize = 3;

/// Similarity score in [0, 1.2].
pub fn similarity(a: &str, b: &str) -> f64 {
    let a = a.to_lowercase();
    let b = b.to_lowercase();
    let sa: BTreeSet<char> = a.chars().collect();
    let sb: BTreeSet<char> = b.chars().collect();
    if sa.is_empty() || sb.is_empty() {
        return 0.0;
    }

    let intersection = sa.intersection(&sb).count() as f64;
    let union = sa.union(&sb).count() as f64;
    let mut score = intersection / union;

    if a.chars().next() == b.chars().next() {
        score += 0.2;
    }
    score
}

/// Up to three known names closest to `input`, never including `input`
/// itself, zero-score candidates dropped.
pub fn suggestions(known: &[&str], input: &str) -> Vec<String> {
    let mut scored: Vec<(f64, &str)> = known
        .iter()
        .filter(|name| **name != input)
        .map(|name| (similarity(input, name), *name))
        .filter(|(score, _)| *score > 0.0)
        .collect();

    scored.sort_by(|(sa, na), (sb, nb)| {
        sb.partial_cmp(sa)
            .unwrap_or(std::cmp::Ordering::Equal)
            .then_with(|| na.cmp(nb))
    });

    scored
        .into_iter()
        .take(MAX_SUGGESTIONS)
        .map(|(_, name)| name.to_string())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn identical_names_score_highest() {
        assert_eq!(similarity("chain", "chain"), 1.2);
        assert!(similarity("chain", "chain") > similarity("chain", "chains"));
    }

    #[test]
    fn first_char_bonus_applies() {
        let with = similarity("align", "alignment");
        let without = similarity("lign", "alignment");
        assert!(with > without);
    }

    #[test]
    fn capped_at_three_and_excludes_input() {
        let known = ["alignment", "aio", "chain", "campaign", "field"];
        let out = suggestions(&known, "alin");
        assert!(out.len() <= MAX_SUGGESTIONS);
        assert!(!out.contains(&"alin".to_string()));
    }

    #[test]
    fn ordering_is_deterministic() {
        let known = ["abc", "acb", "bac"];
        // abc and acb share the same character set; tie broken by name.
        let out = suggestions(&known, "abc_typo");
        let again = suggestions(&known, "abc_typo");
        assert_eq!(out, again);
    }

    #[test]
    fn disjoint_names_are_dropped() {
        let known = ["zzz"];
        assert!(suggestions(&known, "aio").is_empty());
    }
}
