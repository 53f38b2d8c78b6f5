//! `marquee` — command-line client for the Marquee activity API.
//!
//! # Usage
//!
//! ```
//! marquee history 4821
//! marquee --url http://localhost:8080 roster --limit 10 --kinds confirmation,invitation
//! marquee --config ~/.config/marquee/config.toml history 4821
//! ```

mod client;
mod render;

use std::path::PathBuf;

use anyhow::{Context, Result};
use chrono::Utc;
use clap::{Parser, Subcommand};
use client::{ApiClient, ApiConfig};
use marquee_core::{id::SubjectId, record::RelationshipKind};
use serde::Deserialize;
use tracing::level_filters::LevelFilter;
use tracing_subscriber::EnvFilter;

const DEFAULT_URL: &str = "http://localhost:8080";

// ─── CLI args ─────────────────────────────────────────────────────────────────

#[derive(Parser, Debug)]
#[command(name = "marquee", about = "Command-line client for the Marquee activity API")]
struct Args {
  /// Path to a TOML config file (url).
  #[arg(short, long, value_name = "FILE")]
  config: Option<PathBuf>,

  /// Base URL of the marquee server (default: http://localhost:8080).
  #[arg(long, env = "MARQUEE_URL")]
  url: Option<String>,

  #[command(subcommand)]
  command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
  /// Show an artist's event history, newest first.
  History {
    /// Artist number.
    artist: SubjectId,
  },
  /// Show the most recently active artists.
  Roster {
    /// Records taken per workflow kind.
    #[arg(short, long)]
    limit: Option<usize>,

    /// Workflow kinds to include, comma-separated (default: all).
    #[arg(short, long, value_delimiter = ',')]
    kinds: Vec<RelationshipKind>,
  },
}

// ─── Config file ──────────────────────────────────────────────────────────────

/// Shape of the optional TOML config file.
#[derive(Deserialize, Default)]
struct ConfigFile {
  #[serde(default)]
  url: String,
}

impl ConfigFile {
  fn load(path: Option<&PathBuf>) -> Result<Self> {
    let Some(path) = path else {
      return Ok(Self::default());
    };
    let raw = std::fs::read_to_string(path)
      .with_context(|| format!("reading config file {}", path.display()))?;
    toml::from_str(&raw).context("parsing config file")
  }
}

/// CLI flag, then config file, then [`DEFAULT_URL`].
fn resolve_base_url(flag: Option<String>, file: &ConfigFile) -> String {
  flag
    .filter(|u| !u.trim().is_empty())
    .or_else(|| (!file.url.is_empty()).then(|| file.url.clone()))
    .unwrap_or_else(|| DEFAULT_URL.to_string())
}

// ─── Entry point ──────────────────────────────────────────────────────────────

#[tokio::main]
async fn main() -> Result<()> {
  tracing_subscriber::fmt()
    .with_writer(std::io::stderr)
    .with_env_filter(
      EnvFilter::builder()
        .with_default_directive(LevelFilter::WARN.into())
        .from_env_lossy(),
    )
    .init();

  let args = Args::parse();
  let file_cfg = ConfigFile::load(args.config.as_ref())?;
  let base_url = resolve_base_url(args.url, &file_cfg);
  tracing::debug!(%base_url, "using marquee server");

  let client = ApiClient::new(ApiConfig { base_url })?;

  let output = match args.command {
    Command::History { artist } => {
      let entries = client.history(&artist).await?;
      render::render_history(&entries)
    }
    Command::Roster { limit, kinds } => {
      let rows = client.roster(limit, &kinds).await?;
      render::render_roster(&rows, Utc::now())
    }
  };

  print!("{output}");
  Ok(())
}

#[cfg(test)]
mod tests {
  use clap::CommandFactory;

  use super::*;

  #[test]
  fn args_are_well_formed() { Args::command().debug_assert(); }

  #[test]
  fn flag_overrides_file_which_overrides_default() {
    let file = ConfigFile { url: "http://file:1".into() };
    assert_eq!(
      resolve_base_url(Some("http://flag:2".into()), &file),
      "http://flag:2"
    );
    assert_eq!(resolve_base_url(None, &file), "http://file:1");
    assert_eq!(resolve_base_url(None, &ConfigFile::default()), DEFAULT_URL);
  }

  #[test]
  fn roster_kinds_parse_from_a_list() {
    let args =
      Args::try_parse_from(["marquee", "roster", "--kinds", "confirmation,Invitation"])
        .unwrap();
    match args.command {
      Command::Roster { limit, kinds } => {
        assert_eq!(limit, None);
        assert_eq!(kinds, vec![
          RelationshipKind::Confirmation,
          RelationshipKind::Invitation
        ]);
      }
      other => panic!("unexpected command {other:?}"),
    }
  }

  #[test]
  fn blank_artist_is_rejected() {
    assert!(Args::try_parse_from(["marquee", "history", "  "]).is_err());
  }
}
