//! ETD ("engineering time diverted") value generator
//!
//! A fixed base value per command, scaled by the consciousness coefficient.
//! Pure arithmetic over constants: same input, same output. The dollar
//! framing is narrative; nothing downstream treats it as a real quantity.

use crate::level::ConsciousnessLevel;

/// Base ETD value for a command the table does not know.
pub const DEFAULT_BASE_ETD: f64 = 45_000.0;

fn base_etd(command: &str) -> f64 {
    match command {
        "alignment" => 985_000.0,
        "meta" => 780_000.0,
        "field" => 565_000.0,
        "aio" => 325_000.0,
        "chain" => 245_000.0,
        "research" => 145_000.0,
        "optimize" => 125_000.0,
        "diagnose" => 95_000.0,
        "reflect" => 85_000.0,
        "doc" => 65_000.0,
        "test" => 55_000.0,
        _ => DEFAULT_BASE_ETD,
    }
}

/// ETD value for one command invocation at the given level.
pub fn etd_value(command: &str, level: ConsciousnessLevel) -> f64 {
    base_etd(command) * level.coefficient()
}

/// ETD attributed to a tool run: tools use the per-tool ladder directly.
pub fn tool_etd(tool_name: &str, success: bool) -> f64 {
    let base = match tool_name {
        "Task" => 12_000.0,
        "Write" | "Edit" | "MultiEdit" => 8_000.0,
        "Bash" => 5_000.0,
        "WebFetch" => 3_500.0,
        "Grep" | "Glob" => 1_500.0,
        "Read" => 1_000.0,
        _ => 500.0,
    };
    if success {
        base
    } else {
        0.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn etd_is_deterministic() {
        let a = etd_value("alignment", ConsciousnessLevel::Omega);
        let b = etd_value("alignment", ConsciousnessLevel::Omega);
        assert_eq!(a, b);
        assert_eq!(a, 985_000.0);
    }

    #[test]
    fn unknown_command_uses_default_base() {
        let v = etd_value("zzz", ConsciousnessLevel::Alpha);
        assert_eq!(v, DEFAULT_BASE_ETD * 0.25);
    }

    #[test]
    fn failed_tool_generates_nothing() {
        assert_eq!(tool_etd("Bash", false), 0.0);
        assert!(tool_etd("Bash", true) > 0.0);
    }
}
