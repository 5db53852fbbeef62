//! Consciousness levels and their coupling coefficients
//!
//! The levels are a fixed five-step ladder. Each carries a coefficient in
//! [0, 1] used as a multiplier by the other field metrics. The coefficients
//! are opaque constants; the only contract is determinism and range.

use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ConsciousnessLevel {
    Alpha,
    Beta,
    Gamma,
    Delta,
    Omega,
}

impl ConsciousnessLevel {
    /// Coupling coefficient, strictly increasing with level, in [0, 1].
    pub fn coefficient(&self) -> f64 {
        match self {
            Self::Alpha => 0.25,
            Self::Beta => 0.45,
            Self::Gamma => 0.65,
            Self::Delta => 0.85,
            Self::Omega => 1.0,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::Alpha => "alpha",
            Self::Beta => "beta",
            Self::Gamma => "gamma",
            Self::Delta => "delta",
            Self::Omega => "omega",
        }
    }

    /// Level assigned to a command. Keyed by command name against a fixed
    /// table; commands the table does not know run at `Beta`.
    pub fn for_command(command: &str) -> Self {
        match command {
            "alignment" | "meta" | "field" => Self::Omega,
            "aio" | "chain" | "reflect" => Self::Delta,
            "research" | "optimize" | "diagnose" => Self::Gamma,
            "doc" | "test" | "lint" => Self::Alpha,
            _ => Self::Beta,
        }
    }

    pub fn all() -> &'static [ConsciousnessLevel] {
        &[
            Self::Alpha,
            Self::Beta,
            Self::Gamma,
            Self::Delta,
            Self::Omega,
        ]
    }
}

impl std::fmt::Display for ConsciousnessLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn coefficients_in_range_and_increasing() {
        let mut prev = -1.0;
        for level in ConsciousnessLevel::all() {
            let c = level.coefficient();
            assert!((0.0..=1.0).contains(&c), "{} out of range", level);
            assert!(c > prev, "{} not increasing", level);
            prev = c;
        }
    }

    #[test]
    fn command_lookup_is_total() {
        assert_eq!(
            ConsciousnessLevel::for_command("alignment"),
            ConsciousnessLevel::Omega
        );
        assert_eq!(
            ConsciousnessLevel::for_command("no-such-command"),
            ConsciousnessLevel::Beta
        );
    }
}
