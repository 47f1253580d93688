#![forbid(unsafe_code)]

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use build_snapshot::{snapshot_cmd, startup_cmd};

#[derive(Parser, Debug)]
#[command(name = "build-snapshot")]
#[command(about = "Build-range diagnostic snapshot tool", long_about = None)]
struct Cli {
    /// Enable verbose logging (or set BUILD_SNAPSHOT_LOG)
    #[arg(long)]
    verbose: bool,

    /// Path to the snapshot config file
    #[arg(long, default_value = "snapshot.toml")]
    config: std::path::PathBuf,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Snapshot two explicitly named builds
    Snapshot {
        /// First build id
        #[arg(long)]
        b1: i64,
        /// Second build id
        #[arg(long)]
        b2: i64,
    },

    /// Snapshot the configured default builds on a background thread
    Startup,
}

fn init_tracing(verbose: bool) {
    let env = std::env::var("BUILD_SNAPSHOT_LOG").unwrap_or_else(|_| {
        if verbose { "build_snapshot=debug".to_string() } else { "build_snapshot=info".to_string() }
    });
    let _ = tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_ansi(true)
        .with_env_filter(EnvFilter::new(env))
        .try_init();
}

fn main() {
    color_eyre::install().ok();
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let result = match cli.command {
        Commands::Snapshot { b1, b2 } => snapshot_cmd::run(&cli.config, b1, b2),
        Commands::Startup => startup_cmd::run(&cli.config),
    };

    if let Err(e) = result {
        eprintln!("{:#}", e);
        std::process::exit(1);
    }
}
