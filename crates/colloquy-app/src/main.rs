mod cli;
mod repl;

use std::process::ExitCode;
use std::sync::Arc;

use colloquy_ai::{
    AzureInferenceClient, ChatOrchestrator, CompletionOptions, DEFAULT_TOTAL_TIMEOUT,
};
use colloquy_common::ColloquyError;
use colloquy_config::{load_settings, BackendConfig, SessionConfig};
use tracing_subscriber::filter::LevelFilter;
use tracing_subscriber::EnvFilter;

const DEFAULT_LOG_DIRECTIVE: &str = "colloquy=info";

/// Load environment variables from a .env file (KEY=VALUE lines).
///
/// Variables already present in the environment win.
fn load_dotenv() {
    let manifest_dir = std::path::PathBuf::from(env!("CARGO_MANIFEST_DIR"));
    let candidates = [
        // Current directory
        std::path::PathBuf::from(".env"),
        // Workspace root, two levels up from crates/colloquy-app/
        manifest_dir.join("..").join("..").join(".env"),
    ];

    for path in &candidates {
        if let Ok(contents) = std::fs::read_to_string(path) {
            for (key, value) in parse_dotenv(&contents) {
                if std::env::var(key).is_err() {
                    std::env::set_var(key, value);
                }
            }
            return;
        }
    }
}

fn parse_dotenv(contents: &str) -> Vec<(&str, &str)> {
    contents
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .filter_map(|line| line.split_once('='))
        .map(|(key, value)| {
            let value = value.trim().trim_matches('"').trim_matches('\'');
            (key.trim(), value)
        })
        .filter(|(key, _)| !key.is_empty())
        .collect()
}

fn init_logging(log_level: Option<&str>) {
    let directive = log_level.unwrap_or(DEFAULT_LOG_DIRECTIVE);
    let filter = EnvFilter::from_default_env();
    let filter = match directive.parse() {
        Ok(d) => filter.add_directive(d),
        Err(e) => {
            eprintln!("Ignoring invalid log level '{directive}': {e}");
            filter.add_directive(LevelFilter::INFO.into())
        }
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

/// The HTTP timeout follows the session deadline so neither cuts the other short.
fn build_client(backend: &BackendConfig, session: &SessionConfig) -> AzureInferenceClient {
    let total_timeout = session.request_timeout().unwrap_or(DEFAULT_TOTAL_TIMEOUT);
    AzureInferenceClient::with_total_timeout(backend.clone(), total_timeout)
}

async fn run(args: cli::Args) -> Result<(), ColloquyError> {
    let settings = load_settings(args.config.as_deref())?;
    let backend = BackendConfig::from_env()?;
    tracing::info!(
        model = %backend.model_name,
        endpoint = %backend.endpoint,
        "backend configured"
    );

    let system_prompt = args
        .system_prompt
        .unwrap_or_else(|| settings.session.system_prompt.clone());

    let client = Arc::new(build_client(&backend, &settings.session));
    let mut chat = ChatOrchestrator::new(client, &backend, system_prompt)
        .with_options(CompletionOptions::from(&settings.generation))
        .with_request_timeout(settings.session.request_timeout());

    println!(
        "Colloquy v{} - model {} (type /help for commands)",
        env!("CARGO_PKG_VERSION"),
        backend.model_name
    );
    repl::run(&mut chat).await?;
    Ok(())
}

fn main() -> ExitCode {
    // Load .env file before anything else, while the process is single-threaded
    load_dotenv();

    let args = cli::parse();
    init_logging(args.log_level.as_deref());

    tracing::info!("Colloquy v{} starting...", env!("CARGO_PKG_VERSION"));

    let runtime = match tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()
    {
        Ok(rt) => rt,
        Err(e) => {
            tracing::error!("Failed to create tokio runtime: {e}");
            eprintln!("colloquy: failed to start async runtime: {e}");
            return ExitCode::FAILURE;
        }
    };

    match runtime.block_on(run(args)) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!("fatal: {e}");
            eprintln!("colloquy: {e}");
            ExitCode::FAILURE
        }
    }
}
