//! fieldhook-commands — slash-command registry, grammar and templates
//!
//! The registry is a static map from command name to agent metadata and
//! argument schema. `parse` turns a `/command key=value` line into a
//! validated [`Invocation`] or a structured error (unknown command with
//! suggestions, missing required arguments with help text). The template
//! module does literal `{placeholder}` substitution and backs the artifact
//! document generator.

pub mod docgen;
pub mod parser;
pub mod registry;
pub mod suggest;
pub mod template;
pub mod workflow;

pub use parser::{parse, render_command, split_array, Invocation};
pub use registry::{ArgSpec, ArgType, CommandRegistry, CommandSpec};
pub use suggest::{similarity, suggestions, MAX_SUGGESTIONS};
pub use template::render;
pub use workflow::{Workflow, WorkflowRegistry, WorkflowStep};
