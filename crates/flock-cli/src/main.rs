//! `flock`: command-line client for a Flock RPC server.
//!
//! Connection settings come from, in order of precedence:
//!
//! 1. `--url` / `--user` / `--password` flags (or `FLOCK_URL`, `FLOCK_USER`,
//!    `FLOCK_PASSWORD`)
//! 2. A TOML file given with `--config`
//! 3. Built-in defaults (`http://localhost:8080`, no credentials)
//!
//! Every command prints the server's JSON response, pretty-printed.

mod client;

use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};
use clap::{Parser, Subcommand};
use client::{ApiClient, ApiConfig, CLIENT_VERSION};
use flock_access::wire::ProtocolVersion;
use flock_core::store::PersonQuery;
use serde::{Deserialize, Serialize};
use tracing::level_filters::LevelFilter;
use tracing_subscriber::EnvFilter;

// ─── CLI args ────────────────────────────────────────────────────────────────

#[derive(Parser, Debug)]
#[command(name = "flock", about = "Query a Flock RPC server")]
struct Args {
  /// Path to a TOML config file.
  #[arg(short, long)]
  config: Option<PathBuf>,

  /// Server base URL (e.g. `http://localhost:8080`).
  #[arg(long, env = "FLOCK_URL")]
  url: Option<String>,

  /// Account username.
  #[arg(short, long, env = "FLOCK_USER")]
  user: Option<String>,

  /// Account password.
  #[arg(short, long, env = "FLOCK_PASSWORD")]
  password: Option<String>,

  /// Skip the protocol compatibility check.
  #[arg(long)]
  no_version_check: bool,

  #[command(subcommand)]
  command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
  /// Show the server's protocol version.
  Version,
  /// Ask whether the server accepts a given client version.
  Supported { major: u32, minor: u32 },
  /// Show the identity the credentials resolve to.
  Me,
  /// Search for people. Only the first/last name pair is evaluated.
  Find {
    #[arg(long)]
    first: Option<String>,
    #[arg(long)]
    last:  Option<String>,
    #[arg(long)]
    phone: Option<String>,
    #[arg(long)]
    email: Option<String>,
  },
  /// Basic information about a person.
  Person { id: i64 },
  /// Extended details about a person.
  Details { id: i64 },
  /// Addresses, phones and emails of a person.
  Contact { id: i64 },
  /// Profiles a person belongs to.
  Profiles {
    id: i64,
    /// Restrict to one profile type code.
    #[arg(long = "type")]
    profile_type: Option<i32>,
  },
  /// Information about a profile.
  Profile { id: i64 },
  /// Member ids of a profile.
  Members { id: i64 },
  /// Information about a small group.
  Group { id: i64 },
  /// Information about a small group cluster.
  Cluster { id: i64 },
  /// Information about a small group category.
  Category { id: i64 },
}

// ─── Config file ─────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize, Default)]
struct ConfigFile {
  #[serde(default = "default_url")]
  url:      String,
  #[serde(default)]
  user:     String,
  #[serde(default)]
  password: String,
}

fn default_url() -> String { "http://localhost:8080".to_string() }

fn load_config_file(path: &Path) -> Result<ConfigFile> {
  let raw = std::fs::read_to_string(path)
    .with_context(|| format!("reading {}", path.display()))?;
  toml::from_str(&raw).with_context(|| format!("parsing {}", path.display()))
}

/// Merge flags over the config file over defaults.
fn resolve(args: &Args, file: Option<ConfigFile>) -> ApiConfig {
  let file = file.unwrap_or_else(|| ConfigFile {
    url: default_url(),
    ..Default::default()
  });
  ApiConfig {
    base_url: args.url.clone().unwrap_or(file.url),
    username: args.user.clone().unwrap_or(file.user),
    password: args.password.clone().unwrap_or(file.password),
  }
}

// ─── Entry point ─────────────────────────────────────────────────────────────

#[tokio::main]
async fn main() -> Result<()> {
  tracing_subscriber::fmt()
    .with_env_filter(
      EnvFilter::builder()
        .with_default_directive(LevelFilter::WARN.into())
        .from_env_lossy(),
    )
    .with_writer(std::io::stderr)
    .init();

  let args = Args::parse();
  let file = args.config.as_deref().map(load_config_file).transpose()?;
  let config = resolve(&args, file);
  tracing::debug!(url = %config.base_url, user = %config.username, "resolved connection");

  let client = ApiClient::new(config)?;

  if !args.no_version_check && !matches!(args.command, Command::Version | Command::Supported { .. }) {
    ensure_supported(&client).await?;
  }

  run(&client, args.command).await
}

async fn ensure_supported(client: &ApiClient) -> Result<()> {
  if client.is_supported(CLIENT_VERSION).await? {
    return Ok(());
  }
  let server = client.protocol_version().await?;
  bail!(
    "server speaks protocol {}.{}, which does not accept client {}.{}",
    server.major,
    server.minor,
    CLIENT_VERSION.major,
    CLIENT_VERSION.minor,
  )
}

async fn run(client: &ApiClient, command: Command) -> Result<()> {
  match command {
    Command::Version => print(&client.protocol_version().await?),
    Command::Supported { major, minor } => {
      print(&client.is_supported(ProtocolVersion { major, minor }).await?)
    }
    Command::Me => print(&client.me().await?),
    Command::Find { first, last, phone, email } => {
      let query = PersonQuery {
        first_name: first,
        last_name: last,
        phone,
        email,
        ..Default::default()
      };
      print(&client.find_people(&query).await?)
    }
    Command::Person { id } => print(&client.person(id).await?),
    Command::Details { id } => print(&client.person_details(id).await?),
    Command::Contact { id } => print(&client.person_contact(id).await?),
    Command::Profiles { id, profile_type } => {
      print(&client.person_profiles(id, profile_type).await?)
    }
    Command::Profile { id } => print(&client.profile(id).await?),
    Command::Members { id } => print(&client.profile_members(id).await?),
    Command::Group { id } => print(&client.small_group(id).await?),
    Command::Cluster { id } => print(&client.cluster(id).await?),
    Command::Category { id } => print(&client.category(id).await?),
  }
}

fn print<T: Serialize>(value: &T) -> Result<()> {
  println!("{}", serde_json::to_string_pretty(value)?);
  Ok(())
}
