use std::io::Write;

use anyhow::{Context, Result};
use genai_client::GenAiConfig;
use insight_core::{QueryResult, Ticker};
use insight_pipeline::{DashboardSession, InsightOrchestrator, PipelineConfig};
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::sync::mpsc;
use tracing_subscriber::EnvFilter;

mod config;
mod render;

use config::CliConfig;
use render::DashboardView;

const DEFAULT_LOG_FILTER: &str = "finscope=info,insight_pipeline=info,genai_client=info";

fn init_tracing() {
    let filter = || EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER));

    // stdout carries dashboard JSON, so logs go to stderr
    let json_logging = std::env::var("RUST_LOG_FORMAT")
        .map(|v| v.eq_ignore_ascii_case("json"))
        .unwrap_or(false);
    if json_logging {
        tracing_subscriber::fmt()
            .json()
            .with_env_filter(filter())
            .with_writer(std::io::stderr)
            .init();
    } else {
        tracing_subscriber::fmt()
            .with_env_filter(filter())
            .with_writer(std::io::stderr)
            .init();
    }
}

fn spawn_query(orchestrator: &InsightOrchestrator, ticker: Ticker, tx: &mpsc::UnboundedSender<QueryResult>) {
    let orchestrator = orchestrator.clone();
    let tx = tx.clone();
    tokio::spawn(async move {
        let result = orchestrator.run(&ticker).await;
        // Receiver only goes away on shutdown
        let _ = tx.send(result);
    });
}

fn emit(result: &QueryResult, config: &CliConfig) -> Result<()> {
    let json = DashboardView::new(result, config.show_links)
        .to_json(config.pretty)
        .context("Failed to serialize dashboard view")?;

    let mut stdout = std::io::stdout().lock();
    writeln!(stdout, "{}", json)?;
    stdout.flush()?;
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    init_tracing();

    std::panic::set_hook(Box::new(|info| {
        eprintln!("PANIC: {info}");
        tracing::error!("PANIC: {info}");
    }));

    let cli_config = CliConfig::from_env()?;
    let genai_config = GenAiConfig::from_env().context("Invalid generation service configuration")?;
    let pipeline_config = PipelineConfig::from_env()?;

    let generator = genai_config
        .generator()
        .context("Failed to initialize generation client")?;
    if generator.is_some() {
        tracing::info!("Live mode ({} via {})", genai_config.model, genai_config.base_url);
    } else {
        tracing::warn!("No API key configured, serving demo data");
    }
    tracing::info!(
        "  Call timeout: {:?}, retries: {}",
        pipeline_config.call_timeout,
        pipeline_config.max_retries
    );

    let orchestrator = InsightOrchestrator::new(generator, pipeline_config);
    let mut session = DashboardSession::new(cli_config.default_ticker.clone());

    let (tx, mut rx) = mpsc::unbounded_channel();
    let mut in_flight = 0usize;

    let initial = session.submit_input()?;
    spawn_query(&orchestrator, initial, &tx);
    in_flight += 1;

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    let mut stdin_open = true;

    loop {
        tokio::select! {
            line = lines.next_line(), if stdin_open => {
                match line.context("Failed to read stdin")? {
                    Some(line) => {
                        let line = line.trim();
                        if line.is_empty() {
                            continue;
                        }
                        if line.eq_ignore_ascii_case("quit") || line.eq_ignore_ascii_case("exit") {
                            break;
                        }
                        session.set_input(line);
                        match session.submit_input() {
                            Ok(ticker) => {
                                tracing::info!("Querying {}", ticker);
                                spawn_query(&orchestrator, ticker, &tx);
                                in_flight += 1;
                            }
                            Err(e) => eprintln!("{}", e),
                        }
                    }
                    None => stdin_open = false,
                }
            }
            Some(result) = rx.recv() => {
                in_flight -= 1;
                if session.accept(result) {
                    if let Some(result) = session.result() {
                        emit(result, &cli_config)?;
                    }
                }
            }
        }

        if !stdin_open && in_flight == 0 {
            break;
        }
    }

    tracing::info!("Shutting down");
    Ok(())
}
