//! Business workflow registry
//!
//! Named multi-agent workflows: a description, the trigger phrases that
//! detect them in free text, and an ordered list of agent steps. Built once
//! via [`WorkflowRegistry::builtin`], never mutated afterwards; the process
//! shares a single instance through [`WorkflowRegistry::shared`]. Step task
//! lines are `{task}` templates rendered through the same renderer as every
//! other template in this crate.

use crate::template::render;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::sync::OnceLock;

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct WorkflowStep {
    /// Identifier of the agent that runs this step.
    pub agent: String,
    /// Task line, may contain a `{task}` placeholder.
    pub task: String,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Workflow {
    pub name: String,
    pub description: String,
    /// Phrases that trigger detection, matched case-insensitively.
    pub triggers: Vec<String>,
    pub steps: Vec<WorkflowStep>,
}

impl Workflow {
    fn new(name: &str, description: &str) -> Self {
        Self {
            name: name.to_string(),
            description: description.to_string(),
            triggers: Vec::new(),
            steps: Vec::new(),
        }
    }

    fn trigger(mut self, phrase: &str) -> Self {
        self.triggers.push(phrase.to_string());
        self
    }

    fn step(mut self, agent: &str, task: &str) -> Self {
        self.steps.push(WorkflowStep {
            agent: agent.to_string(),
            task: task.to_string(),
        });
        self
    }

    /// Agent identifiers in step order.
    pub fn agents(&self) -> Vec<&str> {
        self.steps.iter().map(|s| s.agent.as_str()).collect()
    }

    /// Step task lines with `{task}` filled in.
    pub fn render_tasks(&self, task: &str) -> Vec<String> {
        let mut values = BTreeMap::new();
        values.insert("task".to_string(), task.to_string());
        self.steps.iter().map(|s| render(&s.task, &values)).collect()
    }

    fn matches(&self, text_lower: &str) -> bool {
        self.triggers
            .iter()
            .any(|t| text_lower.contains(t.to_lowercase().as_str()))
    }
}

pub struct WorkflowRegistry {
    workflows: BTreeMap<String, Workflow>,
}

impl WorkflowRegistry {
    pub fn new() -> Self {
        Self {
            workflows: BTreeMap::new(),
        }
    }

    pub fn register(&mut self, workflow: Workflow) {
        self.workflows.insert(workflow.name.clone(), workflow);
    }

    pub fn get(&self, name: &str) -> Option<&Workflow> {
        self.workflows.get(name)
    }

    /// Workflow names in sorted order.
    pub fn names(&self) -> Vec<&str> {
        self.workflows.keys().map(|s| s.as_str()).collect()
    }

    pub fn len(&self) -> usize {
        self.workflows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.workflows.is_empty()
    }

    /// First workflow (in name order) with a trigger phrase found in `text`.
    pub fn detect(&self, text: &str) -> Option<&Workflow> {
        let lower = text.to_lowercase();
        self.workflows.values().find(|w| w.matches(&lower))
    }

    /// The shared process-wide registry.
    pub fn shared() -> &'static Self {
        static SHARED: OnceLock<WorkflowRegistry> = OnceLock::new();
        SHARED.get_or_init(Self::builtin)
    }

    /// The built-in workflows shipped with fieldhook.
    pub fn builtin() -> Self {
        let mut reg = Self::new();

        reg.register(
            Workflow::new(
                "full_development_cycle",
                "Complete software development from code to security review",
            )
            .trigger("implement new feature")
            .trigger("build feature")
            .trigger("develop feature")
            .trigger("create new functionality")
            .step("devin-software-engineer", "Implement the feature: {task}")
            .step(
                "corki-coverage-guardian",
                "Generate comprehensive tests for the implemented feature",
            )
            .step(
                "veigar-security-reviewer",
                "Security review of the implemented feature",
            ),
        );
        reg.register(
            Workflow::new(
                "ui_development_cycle",
                "UI component development and integration",
            )
            .trigger("create ui component")
            .trigger("build interface")
            .trigger("design component")
            .trigger("frontend component")
            .step("v0-ui-generator", "Create the UI component: {task}")
            .step(
                "devin-software-engineer",
                "Integrate UI component with backend systems",
            )
            .step("corki-coverage-guardian", "Generate tests for UI component"),
        );
        reg.register(
            Workflow::new(
                "product_launch_campaign",
                "Complete product launch from content creation to analytics",
            )
            .trigger("launch product")
            .trigger("product announcement")
            .trigger("feature launch")
            .trigger("release announcement")
            .step(
                "content-creator-agent",
                "Create launch announcement content: {task}",
            )
            .step("social-media-agent", "Create social media campaign for launch")
            .step("email-campaign-agent", "Create email announcement for users")
            .step("analytics-tracker-agent", "Set up tracking for launch metrics"),
        );
        reg.register(
            Workflow::new(
                "content_marketing_workflow",
                "Content creation and distribution workflow",
            )
            .trigger("create blog post")
            .trigger("write article")
            .trigger("content marketing")
            .trigger("create content")
            .step("content-creator-agent", "Create content: {task}")
            .step("seo-optimizer-agent", "Optimize content for SEO")
            .step("social-media-agent", "Create social media promotion")
            .step(
                "analytics-tracker-agent",
                "Set up content performance tracking",
            ),
        );
        reg.register(
            Workflow::new(
                "customer_acquisition_workflow",
                "Complete customer acquisition from lead generation to onboarding",
            )
            .trigger("acquire customers")
            .trigger("lead generation")
            .trigger("customer acquisition")
            .trigger("find new customers")
            .step("content-creator-agent", "Create lead magnet content")
            .step("seo-optimizer-agent", "Optimize for lead generation keywords")
            .step("lead-qualifier-agent", "Set up lead qualification process")
            .step("email-campaign-agent", "Create nurture email sequence")
            .step("customer-success-agent", "Set up onboarding workflow"),
        );

        reg
    }
}

impl Default for WorkflowRegistry {
    fn default() -> Self {
        Self::builtin()
    }
}
