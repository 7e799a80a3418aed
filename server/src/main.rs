use anyhow::Result;
use clap::Parser;
use ir_core::{default_documents, CorpusStore, Tokenizer};
use ir_server::{build_app, dataset::load_documents, AppConfig};
use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;
use tokio::net::TcpListener;
use tracing_subscriber::{fmt, EnvFilter};

#[derive(Parser)]
struct Args {
    /// Default dataset: JSON array of strings, {"documents": [...]}, or one document per line
    #[arg(long)]
    dataset: Option<PathBuf>,
    /// Term extraction policy: whitespace or words
    #[arg(long, default_value_t = Tokenizer::Whitespace)]
    tokenizer: Tokenizer,
    /// Number of headline search results
    #[arg(long, default_value_t = 5)]
    top_k: usize,
    /// Per-request timeout in seconds
    #[arg(long, default_value_t = 30)]
    request_timeout_secs: u64,
    /// Host to bind
    #[arg(long, default_value = "0.0.0.0")]
    host: String,
    /// Port to bind
    #[arg(long, default_value_t = 8000)]
    port: u16,
}

#[tokio::main]
async fn main() -> Result<()> {
    fmt().with_env_filter(EnvFilter::from_default_env()).init();
    let args = Args::parse();

    let defaults = match &args.dataset {
        Some(path) => load_documents(path)?,
        None => default_documents()?,
    };
    let store = Arc::new(CorpusStore::new(defaults, args.tokenizer)?);
    let config = AppConfig {
        top_k: args.top_k,
        request_timeout: Duration::from_secs(args.request_timeout_secs),
        ..AppConfig::default()
    }
    .with_env();
    let app = build_app(store, config);

    let addr: SocketAddr = format!("{}:{}", args.host, args.port).parse()?;
    let listener = TcpListener::bind(addr).await?;
    tracing::info!(%addr, tokenizer = %args.tokenizer, "server listening");
    axum::serve(listener, app).await?;
    Ok(())
}
