mod cmd;
mod output;

use clap::{Parser, Subcommand};
use neo_core::config::DashboardConfig;
use neo_core::paths::CONFIG_FILE;
use std::path::PathBuf;

#[derive(Parser)]
#[command(
    name = "neodash",
    about = "Near-earth-object dashboard: fetch asteroid statistics and plot them",
    version,
    propagate_version = true
)]
struct Cli {
    /// YAML config file (default: ./neodash.yaml when present, else built-in defaults)
    #[arg(long, global = true, env = "NEODASH_CONFIG")]
    config: Option<PathBuf>,

    /// Upstream statistics service root
    #[arg(long, global = true, env = "NEODASH_BASE_URL")]
    base_url: Option<String>,

    /// Directory plots are written to
    #[arg(long, global = true, env = "NEODASH_PLOT_DIR")]
    plot_dir: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the web dashboard
    Serve {
        /// Interface to bind
        #[arg(long)]
        host: Option<String>,

        /// Port to listen on (0 = OS-assigned)
        #[arg(long)]
        port: Option<u16>,

        /// Open the dashboard in a browser once listening
        #[arg(long)]
        open: bool,
    },

    /// Render one composite plot and print where it was written
    Plot {
        /// First day, YYYY-MM-DD
        #[arg(long)]
        start: String,

        /// Last day, YYYY-MM-DD
        #[arg(long)]
        end: String,

        /// Output as JSON
        #[arg(long, short = 'j')]
        json: bool,
    },

    /// Print the effective configuration
    Config {
        /// Output as JSON instead of YAML
        #[arg(long, short = 'j')]
        json: bool,

        /// Save the effective configuration to the config file
        #[arg(long)]
        write: bool,
    },
}

impl Cli {
    /// Explicit `--config`, else `./neodash.yaml` if it exists.
    fn config_path(&self) -> Option<PathBuf> {
        self.config.clone().or_else(|| {
            let local = PathBuf::from(CONFIG_FILE);
            local.is_file().then_some(local)
        })
    }

    /// Load the config file (if any) and apply command-line overrides.
    fn resolve_config(&self) -> anyhow::Result<DashboardConfig> {
        let mut config = DashboardConfig::load_or_default(self.config_path().as_deref())?;
        if let Some(url) = &self.base_url {
            config.upstream.base_url = url.clone();
        }
        if let Some(dir) = &self.plot_dir {
            config.plot_dir = dir.clone();
        }
        Ok(config)
    }
}

fn main() {
    let cli = Cli::parse();

    let default_level = match &cli.command {
        Commands::Serve { .. } => tracing::Level::INFO,
        _ => tracing::Level::WARN,
    };

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env().add_directive(default_level.into()),
        )
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let config_path = cli.config_path();
    let result = cli.resolve_config().and_then(|config| match cli.command {
        Commands::Serve { host, port, open } => cmd::serve::run(config, host, port, open),
        Commands::Plot { start, end, json } => cmd::plot::run(&config, &start, &end, json),
        Commands::Config { json, write } => {
            let target = write.then(|| config_path.unwrap_or_else(|| PathBuf::from(CONFIG_FILE)));
            cmd::config::run(&config, json, target.as_deref())
        }
    });

    if let Err(e) = result {
        // Print the full error chain (anyhow's alternate Display)
        eprintln!("error: {e:#}");
        std::process::exit(1);
    }
}
