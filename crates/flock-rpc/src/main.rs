//! `server`: serves the Flock RPC surface from a SQLite store.
//!
//! Settings come from an optional TOML file (`--config`, default
//! `config.toml`) with `FLOCK_*` environment variables layered over it; see
//! `config.example.toml`. `--hash-password` prints the argon2 string to put
//! in an account row and exits.

use std::{io::Read as _, path::Path, sync::Arc};

use anyhow::Context as _;
use clap::Parser;
use flock_rpc::{AppState, ServerConfig};
use flock_store_sqlite::{SqliteStore, hash_password};
use tokio::net::TcpListener;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(version, about = "Flock RPC server")]
struct Cli {
  /// Configuration file; missing is fine when `FLOCK_*` covers every key.
  #[arg(short, long, default_value = "config.toml")]
  config: std::path::PathBuf,

  /// Hash the password read from stdin for an account row, then exit.
  #[arg(long)]
  hash_password: bool,
}

fn load_config(path: &Path) -> anyhow::Result<ServerConfig> {
  config::Config::builder()
    .add_source(config::File::from(path).required(false))
    .add_source(config::Environment::with_prefix("FLOCK"))
    .build()
    .and_then(config::Config::try_deserialize)
    .with_context(|| format!("invalid server configuration ({})", path.display()))
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
  tracing_subscriber::fmt()
    .with_env_filter(
      EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "info,tower_http=debug".into()),
    )
    .init();

  let cli = Cli::parse();

  if cli.hash_password {
    let mut password = String::new();
    std::io::stdin()
      .read_to_string(&mut password)
      .context("reading password from stdin")?;
    println!("{}", hash_password(password.trim_end_matches(['\r', '\n']))?);
    return Ok(());
  }

  let cfg = load_config(&cli.config)?;
  let store = SqliteStore::open(&cfg.store_path)
    .await
    .with_context(|| format!("opening store {}", cfg.store_path.display()))?;

  let address = format!("{}:{}", cfg.host, cfg.port);
  let listener = TcpListener::bind(&address)
    .await
    .with_context(|| format!("binding {address}"))?;
  tracing::info!(
    %address,
    organization_id = cfg.default_organization_id,
    store = %cfg.store_path.display(),
    "flock rpc listening",
  );

  let app = flock_rpc::router(AppState {
    store:  Arc::new(store),
    config: Arc::new(cfg),
  });
  axum::serve(listener, app)
    .with_graceful_shutdown(async {
      let _ = tokio::signal::ctrl_c().await;
      tracing::info!("shutting down");
    })
    .await
    .context("serving rpc")
}
