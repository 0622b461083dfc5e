//! Gate CLI - Main entry point

mod cli;
mod init;
mod report;

use clap::{Parser, Subcommand};
use gate_foundation::ResourceConfig;
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Gate - resource cache inspector for the terminal
#[derive(Parser, Debug)]
#[command(name = "gate")]
#[command(author, version, about, long_about = None)]
struct Args {
    #[command(subcommand)]
    command: Command,

    /// Resource config file (overrides global + project config)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Extra search root for requested paths (repeatable)
    #[arg(short, long = "root", global = true)]
    roots: Vec<PathBuf>,

    /// Enable debug logging
    #[arg(short, long, global = true)]
    debug: bool,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Load resources once and print their final state
    Load {
        /// Requested paths (.tmj tile maps, .tsj tile sets)
        #[arg(required = true)]
        paths: Vec<String>,

        /// Print cache stats as JSON
        #[arg(long)]
        json: bool,
    },
    /// Keep resources loaded and print cache events (hot reload)
    Watch {
        /// Requested paths (.tmj tile maps, .tsj tile sets)
        #[arg(required = true)]
        paths: Vec<String>,

        /// Game loop tick
        #[arg(long, default_value = "100")]
        interval_ms: u64,

        /// Stop after this many seconds (default: until Ctrl-C)
        #[arg(long)]
        duration_secs: Option<u64>,
    },
    /// Print the effective resource config
    Config,
    /// Create .gate/resources.json in the current directory
    Init {
        /// Overwrite an existing config
        #[arg(short, long)]
        force: bool,
    },
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    // Initialize logging
    let log_level = if args.debug { "debug" } else { "info" };
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(log_level)),
        )
        .with(tracing_subscriber::fmt::layer().with_target(false))
        .init();

    match args.command {
        Command::Init { force } => init::init_project(force),
        command => {
            let config = load_config(args.config.as_deref(), &args.roots)?;
            run(command, config).await
        }
    }
}

async fn run(command: Command, config: ResourceConfig) -> anyhow::Result<()> {
    match command {
        Command::Load { paths, json } => cli::run_load(config, &paths, json).await,
        Command::Watch {
            paths,
            interval_ms,
            duration_secs,
        } => cli::run_watch(config, &paths, interval_ms, duration_secs).await,
        Command::Config => {
            println!("{}", serde_json::to_string_pretty(&config)?);
            Ok(())
        }
        Command::Init { force } => init::init_project(force),
    }
}

/// 설정 로드: 파일 지정 시 그 파일, 아니면 글로벌 + 프로젝트. `--root`는 맨 앞에 추가
fn load_config(file: Option<&std::path::Path>, roots: &[PathBuf]) -> anyhow::Result<ResourceConfig> {
    let mut config = match file {
        Some(path) => ResourceConfig::load_from(path)?,
        None => ResourceConfig::load().unwrap_or_else(|e| {
            eprintln!("Warning: Failed to load config: {}", e);
            ResourceConfig::default()
        }),
    };

    let mut search_paths = roots.to_vec();
    search_paths.extend(config.search_paths.drain(..).filter(|p| !roots.contains(p)));
    config.search_paths = search_paths;

    tracing::debug!("Search paths: {:?}", config.search_paths);
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_load() {
        let args = Args::try_parse_from(["gate", "load", "a.tmj", "b.tsj", "--json", "-r", "assets"])
            .unwrap();
        assert_eq!(args.roots, vec![PathBuf::from("assets")]);
        match args.command {
            Command::Load { paths, json } => {
                assert_eq!(paths, vec!["a.tmj", "b.tsj"]);
                assert!(json);
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn test_load_requires_paths() {
        assert!(Args::try_parse_from(["gate", "load"]).is_err());
    }

    #[test]
    fn test_roots_come_first() {
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("resources.json");
        std::fs::write(&file, r#"{ "searchPaths": ["assets", "shared"] }"#).unwrap();

        let roots = vec![PathBuf::from("mods"), PathBuf::from("shared")];
        let config = load_config(Some(&file), &roots).unwrap();
        assert_eq!(
            config.search_paths,
            vec![PathBuf::from("mods"), PathBuf::from("shared"), PathBuf::from("assets")]
        );
    }
}
