//! fieldhook — lifecycle hooks for an AI coding assistant
//!
//! Usage:
//!   echo '{"prompt":"..."}' | fieldhook hook user_prompt_submit
//!   fieldhook command '/alignment Q="test for prompt injection"'
//!   fieldhook summary --date 2026-08-26
//!   fieldhook render proposal company_name=Acme project_title=Pilot
//!
//! The `hook` subcommand is what the host assistant wires into its event
//! configuration: one invocation per lifecycle event, payload JSON on stdin,
//! result JSON on stdout. It exits 0 no matter what — a hook failure must
//! never block the host.

use anyhow::Context;
use chrono::{NaiveDate, Utc};
use clap::{Parser, Subcommand};
use fieldhook_commands::{docgen, CommandRegistry};
use fieldhook_core::{EventKind, Payload, SessionContext};
use fieldhook_field::{etd_value, ConsciousnessLevel};
use fieldhook_log::EventLog;
use fieldhook_router::Router;
use serde_json::json;
use std::collections::BTreeMap;
use std::io::Read;
use std::path::{Path, PathBuf};
use tracing::warn;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

const CONTEXT_FILE: &str = "context.json";

#[derive(Parser)]
#[command(
    name = "fieldhook",
    about = "Lifecycle hooks, slash commands and field metrics for an AI coding assistant",
    version = env!("CARGO_PKG_VERSION")
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// State directory (default: ~/.fieldhook)
    #[arg(long, global = true)]
    state_dir: Option<PathBuf>,

    /// Write diagnostics to a file (in addition to stderr)
    #[arg(long, global = true)]
    log_file: Option<PathBuf>,

    /// Verbose diagnostics
    #[arg(short, long, global = true, default_value_t = false)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Process one lifecycle event; payload JSON on stdin, result on stdout
    Hook {
        /// Event type, e.g. session_start, pre_tool, post_tool
        event_type: String,
    },
    /// Parse and validate a slash-command line
    Command {
        /// The full line, e.g. '/alignment Q="test for prompt injection"'
        line: String,
    },
    /// Daily summary of the event log
    Summary {
        /// Date (YYYY-MM-DD), default today
        #[arg(long)]
        date: Option<String>,
    },
    /// Render an artifact document from key=value fields
    Render {
        /// Artifact name (see `fieldhook artifacts`)
        artifact: String,
        /// Template fields as key=value
        fields: Vec<String>,
    },
    /// List known artifact templates and their fields
    Artifacts,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let filter = tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        tracing_subscriber::EnvFilter::new(if cli.verbose { "debug" } else { "warn" })
    });
    let _guard = match &cli.log_file {
        Some(path) => {
            let dir = path.parent().unwrap_or(Path::new("."));
            let name = path.file_name().map(|n| n.to_os_string()).unwrap_or_default();
            let appender = tracing_appender::rolling::never(dir, name);
            let (writer, guard) = tracing_appender::non_blocking(appender);
            tracing_subscriber::registry()
                .with(filter)
                .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
                .with(tracing_subscriber::fmt::layer().with_ansi(false).with_writer(writer))
                .init();
            Some(guard)
        }
        None => {
            tracing_subscriber::registry()
                .with(filter)
                .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
                .init();
            None
        }
    };

    let state_dir = cli
        .state_dir
        .clone()
        .or_else(|| dirs::home_dir().map(|h| h.join(".fieldhook")))
        .context("cannot resolve a state directory; pass --state-dir")?;

    match cli.command {
        Commands::Hook { event_type } => run_hook(&state_dir, &event_type),
        Commands::Command { line } => run_command(&line),
        Commands::Summary { date } => run_summary(&state_dir, date.as_deref()),
        Commands::Render { artifact, fields } => run_render(&artifact, &fields),
        Commands::Artifacts => {
            for name in docgen::artifact_names() {
                let fields = docgen::artifact_fields(name)
                    .unwrap_or_default()
                    .join(", ");
                println!("{}: {}", name, fields);
            }
            Ok(())
        }
    }
}

/// One-shot hook processing. Exits 0 regardless of input shape.
fn run_hook(state_dir: &Path, event_type: &str) -> anyhow::Result<()> {
    let mut input = String::new();
    let _ = std::io::stdin().read_to_string(&mut input);
    let payload: Payload = serde_json::from_str(&input).unwrap_or_default();

    let mut ctx = load_context(state_dir);
    let router = Router::with_log(EventLog::new(state_dir.join("logs")));
    let result = router.route(&mut ctx, event_type, payload);

    if EventKind::parse(event_type) == Some(EventKind::SessionEnd) {
        let _ = std::fs::remove_file(state_dir.join(CONTEXT_FILE));
    } else {
        store_context(state_dir, &ctx);
    }

    println!("{}", serde_json::to_string(&serde_json::Value::Object(result))?);
    Ok(())
}

/// Slash-command evaluation. Recoverable errors are structured output, not
/// process failures.
fn run_command(line: &str) -> anyhow::Result<()> {
    use fieldhook_core::Error;

    let registry = CommandRegistry::builtin();
    let output = match fieldhook_commands::parse(&registry, line) {
        Ok(invocation) => {
            let level = ConsciousnessLevel::for_command(&invocation.command);
            let mut record = serde_json::to_value(&invocation)?;
            if let Some(obj) = record.as_object_mut() {
                obj.insert("consciousness_level".into(), json!(level.name()));
                obj.insert(
                    "etd_estimate".into(),
                    json!(etd_value(&invocation.command, level)),
                );
            }
            record
        }
        Err(Error::UnknownCommand { input, suggestions }) => json!({
            "error": "unknown_command",
            "input": input,
            "suggestions": suggestions,
        }),
        Err(Error::MissingArgs { command, missing, help }) => json!({
            "error": "missing_args",
            "command": command,
            "missing": missing,
            "help": help,
        }),
        Err(e) => json!({ "error": "invalid_command", "message": e.to_string() }),
    };
    println!("{}", serde_json::to_string_pretty(&output)?);
    Ok(())
}

fn run_summary(state_dir: &Path, date: Option<&str>) -> anyhow::Result<()> {
    let date = match date {
        Some(s) => NaiveDate::parse_from_str(s, "%Y-%m-%d")
            .with_context(|| format!("invalid date: {}", s))?,
        None => Utc::now().date_naive(),
    };
    let log = EventLog::new(state_dir.join("logs"));
    let summary = fieldhook_log::write_daily_summary(&log, date);
    println!("{}", serde_json::to_string_pretty(&summary)?);
    Ok(())
}

fn run_render(artifact: &str, fields: &[String]) -> anyhow::Result<()> {
    let mut map = BTreeMap::new();
    for field in fields {
        let (key, value) = field
            .split_once('=')
            .with_context(|| format!("field '{}' is not key=value", field))?;
        map.insert(key.to_string(), value.to_string());
    }
    let doc = docgen::generate(artifact, &map).map_err(|e| {
        anyhow::anyhow!("{} (known artifacts: {})", e, docgen::artifact_names().join(", "))
    })?;
    print!("{}", doc);
    Ok(())
}

fn load_context(state_dir: &Path) -> SessionContext {
    let path = state_dir.join(CONTEXT_FILE);
    match std::fs::read_to_string(&path) {
        Ok(content) => serde_json::from_str(&content).unwrap_or_else(|e| {
            warn!(error = %e, "context file unreadable; starting fresh");
            SessionContext::new()
        }),
        Err(_) => SessionContext::new(),
    }
}

fn store_context(state_dir: &Path, ctx: &SessionContext) {
    let path = state_dir.join(CONTEXT_FILE);
    let write = std::fs::create_dir_all(state_dir).and_then(|_| {
        let json = serde_json::to_string_pretty(ctx)?;
        std::fs::write(&path, json)
    });
    if let Err(e) = write {
        warn!(error = %e, path = %path.display(), "context persist failed");
    }
}
