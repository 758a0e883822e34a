#[cfg(target_env = "musl")]
#[global_allocator]
static GLOBAL: mimalloc::MiMalloc = mimalloc::MiMalloc;

use anyhow::Context;
use clap::Parser;
use diffy_core::checker::UNRESOLVED_LABEL;
use diffy_core::context::parse_bool_input;
use diffy_core::output::command::{format_command, Level};
use diffy_core::output::json_format::{outputs_json, report_json};
use diffy_core::output::OutputWriter;
use diffy_core::{ActionContext, CheckResult, DiagnosticSeverity, InputConfig};
use std::io::Write;
use std::path::{Path, PathBuf};
use tracing_subscriber::{fmt, EnvFilter};

#[derive(Parser)]
#[command(
    name = "diffy",
    version,
    about = "Report how one file changed in a push or pull request"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(clap::Subcommand)]
enum Commands {
    /// Classify the change to a single file and write step outputs
    Check(CheckArgs),
}

#[derive(clap::Args)]
struct CheckArgs {
    /// File path to look for (default: first path filter of the running workflow)
    #[arg(long, env = "INPUT_PATH")]
    path: Option<String>,

    /// GitHub token for API access
    #[arg(long, env = "INPUT_TOKEN", hide_env_values = true)]
    token: Option<String>,

    /// Fail when no changed file matches: true|false
    #[arg(long, env = "INPUT_STRICT")]
    strict: Option<String>,

    /// Triggering event name
    #[arg(long, env = "GITHUB_EVENT_NAME")]
    event_name: Option<String>,

    /// Path of the JSON event payload
    #[arg(long, env = "GITHUB_EVENT_PATH")]
    event_path: Option<PathBuf>,

    /// Repository as owner/repo
    #[arg(long, env = "GITHUB_REPOSITORY")]
    repository: Option<String>,

    /// Name of the running workflow
    #[arg(long, env = "GITHUB_WORKFLOW")]
    workflow: Option<String>,

    /// Checkout root holding .github/workflows
    #[arg(long, env = "GITHUB_WORKSPACE")]
    workspace: Option<PathBuf>,

    /// REST API root
    #[arg(long, env = "GITHUB_API_URL")]
    api_url: Option<String>,

    /// Output format: gha, json, text (default: auto-detect)
    #[arg(long, env = "DIFFY_OUTPUT_FORMAT")]
    output_format: Option<String>,
}

/// Output format for the CLI
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum OutputFormat {
    /// GitHub Actions: write to $GITHUB_OUTPUT + annotations to stdout
    Gha,
    /// Full JSON to stdout
    Json,
    /// Human-readable text to stdout
    Text,
}

impl OutputFormat {
    fn detect(explicit: Option<&str>) -> Self {
        match explicit {
            Some("gha") => OutputFormat::Gha,
            Some("json") => OutputFormat::Json,
            Some("text") => OutputFormat::Text,
            _ => {
                if std::env::var("GITHUB_ACTIONS").is_ok() {
                    OutputFormat::Gha
                } else {
                    OutputFormat::Text
                }
            }
        }
    }
}

fn main() {
    let cli = Cli::parse();
    init_tracing();
    let code = match cli.command {
        Commands::Check(args) => run_check(args),
    };
    std::process::exit(code);
}

/// Logs go to stderr so stdout carries only outputs and workflow commands
fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

/// Filter empty string from Option (GHA sets "" for unset optional inputs)
fn clean_opt(v: &Option<String>) -> Option<&str> {
    v.as_deref().filter(|s| !s.is_empty())
}

fn build_inputs(args: &CheckArgs) -> diffy_core::Result<InputConfig> {
    let strict = parse_bool_input("strict", clean_opt(&args.strict).unwrap_or(""))?;
    let token = clean_opt(&args.token)
        .map(str::to_string)
        .or_else(|| std::env::var("GITHUB_TOKEN").ok())
        .unwrap_or_default();

    InputConfig::new(clean_opt(&args.path).map(str::to_string), token, strict)
}

fn build_context(args: &CheckArgs) -> diffy_core::Result<ActionContext> {
    let missing = |name: &str| diffy_core::Error::Config(format!("{} not set", name));

    let event_name = clean_opt(&args.event_name).ok_or_else(|| missing("GITHUB_EVENT_NAME"))?;
    let event_path = args
        .event_path
        .as_deref()
        .filter(|p| !p.as_os_str().is_empty())
        .ok_or_else(|| missing("GITHUB_EVENT_PATH"))?;
    let repository = clean_opt(&args.repository).ok_or_else(|| missing("GITHUB_REPOSITORY"))?;

    ActionContext::load(
        event_name,
        event_path,
        repository,
        clean_opt(&args.workflow),
        args.workspace.as_deref(),
        clean_opt(&args.api_url),
    )
}

fn run_check(args: CheckArgs) -> i32 {
    let output_format = OutputFormat::detect(clean_opt(&args.output_format));

    let result = build_inputs(&args).and_then(|config| {
        let context = build_context(&args)?;
        tracing::debug!(?config, repo = %context.repo, "starting check");
        run_pipeline(&config, &context)
    });

    let result = match result {
        Ok(r) => r,
        Err(e) => {
            report_failure(output_format, &e.to_string());
            return 1;
        }
    };

    let written = match output_format {
        OutputFormat::Gha => write_gha_output(&result),
        OutputFormat::Json => write_json_output(&result),
        OutputFormat::Text => write_text_output(&result),
    };

    match written {
        Ok(()) => 0,
        Err(e) => {
            report_failure(output_format, &format!("{:#}", e));
            1
        }
    }
}

/// Drive the async check on a current-thread runtime
fn run_pipeline(
    config: &InputConfig,
    context: &ActionContext,
) -> diffy_core::Result<CheckResult> {
    let rt = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()?;
    rt.block_on(diffy_core::check_file(config, context))
}

/// The single failure report for a run
fn report_failure(format: OutputFormat, message: &str) {
    tracing::error!("{}", message);
    match format {
        OutputFormat::Gha => println!("{}", format_command(Level::Error, message)),
        OutputFormat::Json | OutputFormat::Text => eprintln!("Error: {message}"),
    }
}

/// Append outputs to $GITHUB_OUTPUT and surface diagnostics as annotations
fn write_gha_output(result: &CheckResult) -> anyhow::Result<()> {
    let stdout = std::io::stdout();
    let mut w = stdout.lock();

    for d in &result.diagnostics {
        let level = match d.severity {
            DiagnosticSeverity::Notice => Level::Notice,
            DiagnosticSeverity::Warning => Level::Warning,
        };
        writeln!(w, "{}", format_command(level, &d.message))?;
    }

    match std::env::var("GITHUB_OUTPUT") {
        Ok(output_file) if !output_file.is_empty() => {
            append_outputs(Path::new(&output_file), result)?;
        }
        _ => {
            tracing::warn!("GITHUB_OUTPUT not set, falling back to stdout");
            drop(w);
            return write_json_output(result);
        }
    }

    writeln!(w, "{}", summary_line(result))?;
    Ok(())
}

fn append_outputs(path: &Path, result: &CheckResult) -> anyhow::Result<()> {
    OutputWriter::append(path, &result.classification)
        .with_context(|| format!("cannot write GITHUB_OUTPUT ({})", path.display()))
}

/// Write full JSON output to stdout
fn write_json_output(result: &CheckResult) -> anyhow::Result<()> {
    let stdout = std::io::stdout();
    let mut lock = stdout.lock();
    serde_json::to_writer(&mut lock, &report_json(result))?;
    writeln!(lock)?;
    Ok(())
}

/// Write human-readable text to stdout
fn write_text_output(result: &CheckResult) -> anyhow::Result<()> {
    let stdout = std::io::stdout();
    let mut w = stdout.lock();

    writeln!(w, "Diffy Results")?;
    writeln!(w, "=============")?;
    writeln!(w, "Compared: {}...{}", result.range.base, result.range.head)?;
    writeln!(w, "Files checked: {}", result.files_checked)?;
    writeln!(w, "{}", summary_line(result))?;
    writeln!(w)?;
    for (key, value) in outputs_json(result).as_object().into_iter().flatten() {
        writeln!(w, "  {key}: {value}")?;
    }

    if !result.diagnostics.is_empty() {
        writeln!(w, "\nDiagnostics:")?;
        for d in &result.diagnostics {
            writeln!(w, "  [{:?}] {}", d.severity, d.message)?;
        }
    }
    Ok(())
}

fn summary_line(result: &CheckResult) -> String {
    let c = &result.classification;
    let kind = if c.added {
        "added"
    } else if c.modified {
        "modified"
    } else if c.removed {
        "removed"
    } else if c.renamed {
        "renamed"
    } else if result.matched {
        "changed"
    } else {
        "not changed"
    };
    let name = if c.name.is_empty() {
        UNRESOLVED_LABEL
    } else {
        &c.name
    };
    format!("{}: {}", name, kind)
}

#[cfg(test)]
mod tests {
    use super::*;
    use diffy_core::{Classification, CommitRange, TargetPath};

    fn result(classification: Classification, matched: bool) -> CheckResult {
        CheckResult {
            classification,
            matched,
            target: TargetPath::Resolved("a.txt".into()),
            range: CommitRange {
                base: "b".into(),
                head: "h".into(),
            },
            files_checked: 1,
            diagnostics: Vec::new(),
        }
    }

    #[test]
    fn test_output_format_explicit() {
        assert_eq!(OutputFormat::detect(Some("json")), OutputFormat::Json);
        assert_eq!(OutputFormat::detect(Some("gha")), OutputFormat::Gha);
        assert_eq!(OutputFormat::detect(Some("text")), OutputFormat::Text);
    }

    #[test]
    fn test_clean_opt() {
        assert_eq!(clean_opt(&Some(String::new())), None);
        assert_eq!(clean_opt(&Some("x".into())), Some("x"));
        assert_eq!(clean_opt(&None), None);
    }

    #[test]
    fn test_summary_line() {
        let r = result(
            Classification {
                name: "a.txt".into(),
                removed: true,
                previous: Some("a.txt".into()),
                ..Default::default()
            },
            true,
        );
        assert_eq!(summary_line(&r), "a.txt: removed");

        let r = result(Classification::default(), false);
        assert_eq!(summary_line(&r), "<unresolved>: not changed");
    }

    #[test]
    fn test_append_outputs() {
        let dir = tempfile::TempDir::new().unwrap();
        let file = dir.path().join("out");
        let r = result(
            Classification {
                name: "a.txt".into(),
                added: true,
                previous: Some("a.txt".into()),
                ..Default::default()
            },
            true,
        );
        append_outputs(&file, &r).unwrap();
        let content = std::fs::read_to_string(&file).unwrap();
        assert!(content.contains("added=true"));
    }

    #[test]
    fn test_append_outputs_bad_path_has_context() {
        let dir = tempfile::TempDir::new().unwrap();
        let file = dir.path().join("missing-dir").join("out");
        let r = result(Classification::default(), false);
        let err = append_outputs(&file, &r).unwrap_err();
        assert!(format!("{:#}", err).contains("GITHUB_OUTPUT"));
    }

    #[test]
    fn test_run_pipeline_rejects_unsupported_event() {
        let config = InputConfig::new(Some("a.txt".into()), "t".into(), false).unwrap();
        let context = ActionContext {
            event_name: "issue_comment".into(),
            payload: serde_json::json!({}),
            owner: "o".into(),
            repo: "r".into(),
            workflow: String::new(),
            workspace: PathBuf::from("."),
            api_url: "http://127.0.0.1:9".into(),
        };
        let err = run_pipeline(&config, &context).unwrap_err();
        assert_eq!(err.kind(), diffy_core::ErrorKind::UnsupportedEvent);
    }

    #[test]
    fn test_cli_parses_check_flags() {
        let cli = Cli::try_parse_from([
            "diffy",
            "check",
            "--path",
            "src/app.ts",
            "--strict",
            "true",
            "--token",
            "t",
        ])
        .unwrap();
        let Commands::Check(args) = cli.command;
        assert_eq!(args.path.as_deref(), Some("src/app.ts"));
        let config = build_inputs(&args).unwrap();
        assert!(config.strict);
    }
}
