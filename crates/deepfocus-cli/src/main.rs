use clap::{Parser, Subcommand};
use deepfocus_core::Config;
use tracing_subscriber::EnvFilter;

mod commands;

#[derive(Parser)]
#[command(name = "deepfocus-cli", version, about = "DeepFocus CLI")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Task management
    Task {
        #[command(subcommand)]
        action: commands::task::TaskAction,
    },
    /// Focus and break session records
    Record {
        #[command(subcommand)]
        action: commands::record::RecordAction,
    },
    /// Streak and achievements
    Achievement {
        #[command(subcommand)]
        action: commands::achievement::AchievementAction,
    },
    /// Configuration management
    Config {
        #[command(subcommand)]
        action: commands::config::ConfigAction,
    },
}

/// Log to stderr; `DEEPFOCUS_LOG` overrides `logging.level`.
fn init_logging(config: &Config) {
    let filter = EnvFilter::try_from_env("DEEPFOCUS_LOG")
        .unwrap_or_else(|_| EnvFilter::new(&config.logging.level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn main() {
    let cli = Cli::parse();
    let config = Config::load_or_default();
    init_logging(&config);

    let result = match cli.command {
        Commands::Task { action } => commands::task::run(action, &config),
        Commands::Record { action } => commands::record::run(action, &config),
        Commands::Achievement { action } => commands::achievement::run(action, &config),
        Commands::Config { action } => commands::config::run(action),
    };

    if let Err(e) = result {
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}
