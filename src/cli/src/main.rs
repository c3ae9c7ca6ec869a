//! dockerlayers CLI entry point.

use clap::Parser;
use tracing_subscriber::filter::LevelFilter;
use tracing_subscriber::EnvFilter;

use dockerlayers_cli::commands::{dispatch, load_config, Cli};

fn main() {
    let cli = Cli::parse();

    let config_path = cli.config_path();
    let config = match load_config(config_path.as_deref()) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Error: {e}");
            std::process::exit(1);
        }
    };

    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::builder()
                .with_default_directive(LevelFilter::from(cli.log_level(&config)).into())
                .from_env_lossy(),
        )
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    if let Some(path) = &config_path {
        tracing::debug!(path = %path.display(), "Loaded config");
    }

    if let Err(e) = dispatch(cli, config) {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}
