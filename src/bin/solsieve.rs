//! solsieve — terminal front-end.
//!
//! Reads a keyword list, asks the oracle to drop solar-related entries and
//! prints the filtered result.

use std::io::{self, IsTerminal, Read};
use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::{Arc, LazyLock};

use clap::{Parser, ValueEnum};
use tracing::info;

use solsieve::{
    ClassificationResult, Config, CopyKind, GeminiClient, Osc52Clipboard, ResultPresenter, Session,
    SolsieveError, View,
};

static VERSION: LazyLock<String> = LazyLock::new(solsieve::version_string);

/// Filter solar-energy keywords out of a keyword list
#[derive(Parser)]
#[command(name = "solsieve")]
#[command(version = VERSION.as_str())]
#[command(about = "Remove solar-related keywords from a list using a hosted LLM")]
struct Args {
    /// Keywords, one per line (or omit to read from --file or stdin)
    keywords: Option<String>,

    /// Read keywords from a file
    #[arg(short, long, conflicts_with = "keywords")]
    file: Option<PathBuf>,

    /// Path to configuration file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Override the configured model
    #[arg(short, long, env = "SOLSIEVE_MODEL")]
    model: Option<String>,

    /// Copy the result to the clipboard (OSC 52)
    #[arg(long, value_enum)]
    copy: Option<CopyMode>,
}

#[derive(Clone, Copy, ValueEnum)]
enum CopyMode {
    /// Kept keywords, one per line
    List,
    /// Full JSON result
    All,
}

#[tokio::main]
async fn main() -> ExitCode {
    // Initialise tracing (default: warn; override with RUST_LOG).
    tracing_subscriber::fmt()
        .with_writer(io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .init();

    match run(Args::parse()).await {
        Ok(code) => code,
        Err(e) => {
            eprintln!("solsieve: {e}");
            ExitCode::FAILURE
        }
    }
}

async fn run(args: Args) -> Result<ExitCode, SolsieveError> {
    // Credentials first: nothing else happens without them.
    let mut config = Config::load(args.config.as_deref())?;
    if let Some(model) = args.model {
        config.oracle.model = model;
    }
    let oracle = GeminiClient::from_config(&config)?;
    info!(version = %*VERSION, model = oracle.model(), "solsieve starting");

    let mut session = Session::new(Arc::new(oracle));
    if let Some(timeout) = config.session.request_timeout() {
        session = session.with_timeout(timeout);
    }
    session.set_input(read_keywords(args.keywords, args.file)?);

    // Validation failures land in the session state and are rendered below.
    match session.submit().await {
        Ok(()) | Err(SolsieveError::Validation(_)) => {}
        Err(e) => return Err(e),
    }

    let mut presenter = ResultPresenter::new(Box::new(Osc52Clipboard::stderr()));
    let view = presenter.render(&session);
    let failed = matches!(view, View::Error(_));
    if failed {
        eprintln!("{view}");
        return Ok(ExitCode::FAILURE);
    }
    println!("{view}");

    if let Some(payload) = session.state().payload()
        && let Ok(result) = ClassificationResult::parse(payload)
    {
        info!(kept = result.non_solar_keywords.len(), "keywords kept");
    }

    let copied = match args.copy {
        Some(CopyMode::List) => presenter.copy_list(&session)?,
        Some(CopyMode::All) => presenter.copy_all(&session)?,
        None => None,
    };
    match copied {
        Some(CopyKind::List) => eprintln!("copied keyword list"),
        Some(CopyKind::All) => eprintln!("copied full result"),
        None => {}
    }

    Ok(ExitCode::SUCCESS)
}

/// Resolve keyword text from the argument, a file, or piped stdin.
///
/// The text is taken as-is; blank input is left for the session to reject.
fn read_keywords(arg: Option<String>, file: Option<PathBuf>) -> Result<String, SolsieveError> {
    if let Some(text) = arg {
        return Ok(text);
    }
    if let Some(path) = file {
        return Ok(std::fs::read_to_string(path)?);
    }
    if io::stdin().is_terminal() {
        return Ok(String::new());
    }
    let mut buf = String::new();
    io::stdin().read_to_string(&mut buf)?;
    Ok(buf)
}
