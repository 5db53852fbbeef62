//! Field resonance arithmetic
//!
//! Resonance is a scalar in [0, 1] attached to the session context. Every
//! function here is pure and clamps its result into that range.

/// Per-event resonance increment for a rule of the given weight.
pub fn resonance_step(current: f64, weight: f64) -> f64 {
    (current + weight * 0.01).clamp(0.0, 1.0)
}

/// Combined field strength from the number of active patterns and the
/// current resonance. Saturates at 1.0 once eight patterns are active.
pub fn field_strength(active_patterns: usize, resonance: f64) -> f64 {
    let density = (active_patterns as f64 / 8.0).min(1.0);
    (0.6 * resonance.clamp(0.0, 1.0) + 0.4 * density).clamp(0.0, 1.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn step_is_bounded() {
        assert_eq!(resonance_step(0.999, 100.0), 1.0);
        assert_eq!(resonance_step(-5.0, 0.0), 0.0);
        let v = resonance_step(0.5, 0.8);
        assert!((0.0..=1.0).contains(&v));
    }

    #[test]
    fn step_is_deterministic() {
        assert_eq!(resonance_step(0.42, 0.7), resonance_step(0.42, 0.7));
    }

    #[test]
    fn strength_in_range() {
        for n in 0..20 {
            for r in [0.0, 0.3, 0.72, 1.0, 2.0] {
                let s = field_strength(n, r);
                assert!((0.0..=1.0).contains(&s), "n={} r={} s={}", n, r, s);
            }
        }
    }

    #[test]
    fn strength_saturates_on_patterns() {
        assert_eq!(field_strength(8, 0.5), field_strength(100, 0.5));
    }
}
