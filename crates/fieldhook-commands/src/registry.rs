//! Slash-command registry
//!
//! A static map from command name to agent metadata and argument schema.
//! Built once via [`CommandRegistry::builtin`], never mutated afterwards.
//! To add a command: extend `builtin()` with another `CommandSpec`.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Argument value types a command schema can declare.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ArgType {
    /// Free text.
    String,
    /// Parsed as f64.
    Number,
    /// `true` or `false`.
    Bool,
    /// Comma-separated list.
    Array,
    /// `@`-prefixed file reference.
    File,
    /// Name of a registered business workflow.
    Workflow,
}

impl ArgType {
    /// Lowercase name, matching the serialized form.
    pub fn name(&self) -> &'static str {
        match self {
            Self::String => "string",
            Self::Number => "number",
            Self::Bool => "bool",
            Self::Array => "array",
            Self::File => "file",
            Self::Workflow => "workflow",
        }
    }
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ArgSpec {
    pub required: bool,
    #[serde(rename = "type")]
    pub ty: ArgType,
    pub description: String,
}

impl ArgSpec {
    fn required(ty: ArgType, description: &str) -> Self {
        Self {
            required: true,
            ty,
            description: description.to_string(),
        }
    }

    fn optional(ty: ArgType, description: &str) -> Self {
        Self {
            required: false,
            ty,
            description: description.to_string(),
        }
    }
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct CommandSpec {
    pub name: String,
    pub description: String,
    /// Identifier of the agent the invocation is routed to.
    pub agent: String,
    pub args: BTreeMap<String, ArgSpec>,
    pub examples: Vec<String>,
}

impl CommandSpec {
    fn new(name: &str, agent: &str, description: &str) -> Self {
        Self {
            name: name.to_string(),
            description: description.to_string(),
            agent: agent.to_string(),
            args: BTreeMap::new(),
            examples: Vec::new(),
        }
    }

    fn arg(mut self, name: &str, spec: ArgSpec) -> Self {
        self.args.insert(name.to_string(), spec);
        self
    }

    fn example(mut self, text: &str) -> Self {
        self.examples.push(text.to_string());
        self
    }

    /// Names of all required arguments, sorted.
    pub fn required_args(&self) -> Vec<&str> {
        self.args
            .iter()
            .filter(|(_, spec)| spec.required)
            .map(|(name, _)| name.as_str())
            .collect()
    }

    /// Help text: description, argument table, examples.
    pub fn help(&self) -> String {
        let mut out = format!("/{} — {}\n", self.name, self.description);
        for (name, spec) in &self.args {
            let req = if spec.required { "required" } else { "optional" };
            out.push_str(&format!(
                "  {}: {} ({}) — {}\n",
                name,
                spec.ty.name(),
                req,
                spec.description
            ));
        }
        for example in &self.examples {
            out.push_str(&format!("  e.g. {}\n", example));
        }
        out
    }
}

pub struct CommandRegistry {
    commands: BTreeMap<String, CommandSpec>,
}

impl CommandRegistry {
    pub fn new() -> Self {
        Self {
            commands: BTreeMap::new(),
        }
    }

    pub fn register(&mut self, spec: CommandSpec) {
        self.commands.insert(spec.name.clone(), spec);
    }

    pub fn get(&self, name: &str) -> Option<&CommandSpec> {
        self.commands.get(name)
    }

    /// Command names in sorted order.
    pub fn names(&self) -> Vec<&str> {
        self.commands.keys().map(|s| s.as_str()).collect()
    }

    pub fn len(&self) -> usize {
        self.commands.len()
    }

    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }

    /// The built-in registry shipped with fieldhook.
    pub fn builtin() -> Self {
        let mut reg = Self::new();

        reg.register(
            CommandSpec::new("alignment", "alignment-auditor", "Probe a model or prompt for alignment weaknesses")
                .arg("Q", ArgSpec::required(ArgType::String, "the question or scenario to probe"))
                .arg("model", ArgSpec::optional(ArgType::String, "target model identifier"))
                .arg("depth", ArgSpec::optional(ArgType::Number, "probe depth, 1-5"))
                .example(r#"/alignment Q="test for prompt injection""#),
        );
        reg.register(
            CommandSpec::new("aio", "all-in-one-orchestrator", "Route a request through the unified agent stack")
                .arg("Q", ArgSpec::required(ArgType::String, "the request to route"))
                .arg("agents", ArgSpec::optional(ArgType::Array, "restrict to these agents"))
                .example(r#"/aio Q="summarize this repo""#),
        );
        reg.register(
            CommandSpec::new("research", "research-agent", "Deep research on a topic with cited sources")
                .arg("topic", ArgSpec::required(ArgType::String, "topic to research"))
                .arg("sources", ArgSpec::optional(ArgType::Number, "max sources to gather"))
                .example(r#"/research topic="schema-aligned codegen""#),
        );
        reg.register(
            CommandSpec::new("chain", "workflow-conductor", "Run a multi-agent workflow chain")
                .arg("workflow", ArgSpec::required(ArgType::Workflow, "registered workflow name"))
                .arg("steps", ArgSpec::optional(ArgType::Array, "override step list"))
                .example(r#"/chain workflow=full_development_cycle"#),
        );
        reg.register(
            CommandSpec::new("field", "field-operator", "Inspect or perturb the resonance field")
                .arg("op", ArgSpec::required(ArgType::String, "operation: show, boost, damp"))
                .arg("amount", ArgSpec::optional(ArgType::Number, "perturbation weight")),
        );
        reg.register(
            CommandSpec::new("meta", "meta-reflector", "Reflect on the current session trajectory")
                .arg("focus", ArgSpec::optional(ArgType::String, "aspect to reflect on")),
        );
        reg.register(
            CommandSpec::new("optimize", "devin-software-engineer", "Optimize code or a workflow")
                .arg("target", ArgSpec::required(ArgType::String, "what to optimize"))
                .arg("metric", ArgSpec::optional(ArgType::String, "metric to improve")),
        );
        reg.register(
            CommandSpec::new("diagnose", "devin-software-engineer", "Diagnose an error or regression")
                .arg("error", ArgSpec::required(ArgType::String, "error text or symptom"))
                .arg("trace", ArgSpec::optional(ArgType::File, "log file to inspect")),
        );
        reg.register(
            CommandSpec::new("reflect", "meta-reflector", "Summarize lessons from recent events")
                .arg("window", ArgSpec::optional(ArgType::Number, "how many events back")),
        );
        reg.register(
            CommandSpec::new("doc", "content-creator-agent", "Generate documentation for a module")
                .arg("path", ArgSpec::required(ArgType::File, "module to document"))
                .arg("style", ArgSpec::optional(ArgType::String, "doc style")),
        );
        reg.register(
            CommandSpec::new("test", "corki-coverage-guardian", "Generate tests for a target")
                .arg("target", ArgSpec::required(ArgType::String, "function, module or file"))
                .arg("kinds", ArgSpec::optional(ArgType::Array, "unit, integration, property")),
        );
        reg.register(
            CommandSpec::new("lint", "corki-coverage-guardian", "Run style and consistency checks")
                .arg("paths", ArgSpec::optional(ArgType::Array, "paths to check"))
                .arg("fix", ArgSpec::optional(ArgType::Bool, "apply fixes")),
        );
        reg.register(
            CommandSpec::new("secure", "veigar-security-reviewer", "Security review of recent changes")
                .arg("scope", ArgSpec::optional(ArgType::String, "diff, file or module"))
                .arg("strict", ArgSpec::optional(ArgType::Bool, "fail on warnings")),
        );
        reg.register(
            CommandSpec::new("proposal", "proposal-generator-agent", "Draft a client proposal artifact")
                .arg("company", ArgSpec::required(ArgType::String, "client company name"))
                .arg("project", ArgSpec::required(ArgType::String, "project title")),
        );
        reg.register(
            CommandSpec::new("campaign", "email-campaign-agent", "Draft a launch campaign artifact")
                .arg("feature", ArgSpec::required(ArgType::String, "feature being launched"))
                .arg("channels", ArgSpec::optional(ArgType::Array, "email, social, blog")),
        );
        reg.register(
            CommandSpec::new("onboard", "customer-success-agent", "Draft a customer onboarding plan")
                .arg("customer", ArgSpec::required(ArgType::String, "customer name"))
                .arg("tier", ArgSpec::optional(ArgType::String, "plan tier")),
        );

        reg
    }
}

impl Default for CommandRegistry {
    fn default() -> Self {
        Self::builtin()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builtin_is_nonempty_and_sorted() {
        let reg = CommandRegistry::builtin();
        assert!(reg.len() >= 15);
        let names = reg.names();
        let mut sorted = names.clone();
        sorted.sort();
        assert_eq!(names, sorted);
    }

    #[test]
    fn alignment_requires_only_q() {
        let reg = CommandRegistry::builtin();
        let spec = reg.get("alignment").unwrap();
        assert_eq!(spec.required_args(), vec!["Q"]);
    }

    #[test]
    fn help_lists_arguments() {
        let reg = CommandRegistry::builtin();
        let help = reg.get("aio").unwrap().help();
        assert!(help.contains("/aio"));
        assert!(help.contains("Q"));
        assert!(help.contains("required"));
    }

    #[test]
    fn help_uses_serialized_type_names() {
        let reg = CommandRegistry::builtin();
        let help = reg.get("alignment").unwrap().help();
        assert!(help.contains("Q: string (required)"));
        assert!(help.contains("depth: number (optional)"));
        assert!(!help.contains("String"));
    }
}
