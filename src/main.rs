use anyhow::Result;
use clap::{Parser, Subcommand};
use munibot::catalog::Department;
use munibot::cli::chat::{run_chat, ChatOpts};
use munibot::config::MunibotConfig;
use tracing::debug;

#[derive(Parser)]
#[command(
    name = "munibot",
    about = "St. Louis municipal services assistant (demo)",
    version
)]
struct Args {
    #[command(subcommand)]
    command: Option<Command>,

    /// Data directory for config and chat history
    #[arg(long, env = "MUNIBOT_DATA_DIR")]
    data_dir: Option<std::path::PathBuf>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, env = "MUNIBOT_LOG")]
    log: Option<String>,

    /// Write logs to this file path (rotated daily). Optional.
    #[arg(long, env = "MUNIBOT_LOG_FILE")]
    log_file: Option<std::path::PathBuf>,

    /// Disable all artificial pacing delays.
    ///
    /// Status narration and response delivery become immediate. Useful for
    /// scripting and tests.
    #[arg(long, global = true)]
    no_delays: bool,

    /// Suppress banners and the sources footer.
    ///
    /// Errors are still printed to stderr. JSON output (--json flags) is
    /// unaffected. Use this flag when piping output to other tools.
    #[arg(long, short = 'q', global = true)]
    quiet: bool,
}

#[derive(Subcommand)]
enum Command {
    /// Interactive chat session (default when no subcommand given).
    ///
    /// Examples:
    ///   munibot chat
    ///   munibot chat --no-history
    Chat {
        /// Don't load or save the transcript file
        #[arg(long)]
        no_history: bool,
    },
    /// Run a single query, print the response, and exit.
    ///
    /// Examples:
    ///   munibot ask "How do I pay my water bill?"
    ///   munibot ask --json "pothole on my street"
    Ask {
        /// The query text
        query: String,
        /// Print the full response payload as JSON
        #[arg(long)]
        json: bool,
    },
    /// Print the routing analysis for a query without composing a response.
    ///
    /// Shows the matched keywords and intents, the department score map, the
    /// selected primary/secondary agents, and the complexity tier.
    ///
    /// Examples:
    ///   munibot analyze "business license application"
    ///   munibot analyze --json "water leak"
    Analyze {
        /// The query text
        query: String,
        /// Print the analysis as JSON
        #[arg(long)]
        json: bool,
    },
    /// Trigger a department-scoped action button directly.
    ///
    /// Examples:
    ///   munibot action water pay_now
    Action {
        /// Department id (water, property, business, utilities, county, city,
        /// fire, police, health, gov)
        department: String,
        /// Action id (e.g. pay_now, view_bill)
        action: String,
        /// Print the full response payload as JSON
        #[arg(long)]
        json: bool,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    let config = MunibotConfig::new(args.data_dir.clone(), args.log.clone(), args.no_delays);
    let _guard = setup_logging(&config.log, args.log_file.as_deref(), &config.log_format);
    debug!(data_dir = %config.data_dir.display(), delay_scale = config.delay_scale, "config loaded");

    match args.command {
        None | Some(Command::Chat { no_history: false }) => {
            run_chat(
                ChatOpts {
                    no_history: false,
                    quiet: args.quiet,
                },
                &config,
            )
            .await?;
        }
        Some(Command::Chat { no_history: true }) => {
            run_chat(
                ChatOpts {
                    no_history: true,
                    quiet: args.quiet,
                },
                &config,
            )
            .await?;
        }
        Some(Command::Ask { query, json }) => {
            munibot::cli::ask::run_ask(&query, json, args.quiet, &config).await?;
        }
        Some(Command::Analyze { query, json }) => {
            munibot::cli::ask::run_analyze(&query, json, &config)?;
        }
        Some(Command::Action {
            department,
            action,
            json,
        }) => {
            let dept = Department::from_str(&department)
                .ok_or_else(|| anyhow::anyhow!("unknown department id '{department}'"))?;
            let agent = munibot::cli::build_agent(&config)?;
            let response = agent.handle_action(dept, &action);
            if json {
                println!("{}", serde_json::to_string_pretty(&response)?);
            } else {
                println!("{}", response.text);
            }
        }
    }

    Ok(())
}

/// Initialize the tracing subscriber.
/// If `log_file` is set, logs go to both stderr and a daily-rolling file.
/// Returns a `WorkerGuard` that must stay alive for the process lifetime.
///
/// `log_format` may be `"pretty"` (default, human-readable compact format) or
/// `"json"` (structured JSON for log aggregators).
///
/// If the log directory cannot be created, falls back to stdout-only logging
/// with a warning — never panics.
fn setup_logging(
    log_level: &str,
    log_file: Option<&std::path::Path>,
    log_format: &str,
) -> Option<tracing_appender::non_blocking::WorkerGuard> {
    use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

    let use_json = log_format == "json";

    if let Some(path) = log_file {
        let dir = path.parent().unwrap_or_else(|| std::path::Path::new("."));
        let filename = path
            .file_name()
            .unwrap_or_else(|| std::ffi::OsStr::new("munibot.log"));

        // Ensure the directory exists before tracing-appender tries to open it.
        if let Err(e) = std::fs::create_dir_all(dir) {
            // Fall back to stderr-only — don't panic on a bad log path.
            eprintln!(
                "warn: could not create log directory '{}': {e} — falling back to stderr",
                dir.display()
            );
            init_plain(log_level, use_json);
            return None;
        }

        let appender = tracing_appender::rolling::daily(dir, filename);
        let (non_blocking, guard) = tracing_appender::non_blocking(appender);

        if use_json {
            tracing_subscriber::registry()
                .with(EnvFilter::new(log_level))
                .with(fmt::layer().json().with_writer(std::io::stderr))
                .with(fmt::layer().json().with_writer(non_blocking))
                .init();
        } else {
            tracing_subscriber::registry()
                .with(EnvFilter::new(log_level))
                .with(fmt::layer().compact().with_writer(std::io::stderr))
                .with(fmt::layer().with_writer(non_blocking))
                .init();
        }

        Some(guard)
    } else {
        init_plain(log_level, use_json);
        None
    }
}

fn init_plain(log_level: &str, use_json: bool) {
    if use_json {
        tracing_subscriber::fmt()
            .json()
            .with_env_filter(log_level)
            .with_writer(std::io::stderr)
            .init();
    } else {
        tracing_subscriber::fmt()
            .with_env_filter(log_level)
            .compact()
            .with_writer(std::io::stderr)
            .init();
    }
}
