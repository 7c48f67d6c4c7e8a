use clap::{CommandFactory, Parser, Subcommand};

mod commands;

#[derive(Parser)]
#[command(name = "playtrack", version, about = "Playtrack CLI")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Wellness session control and points
    Wellness {
        #[command(subcommand)]
        action: commands::wellness::WellnessAction,
    },
    /// Fetch a player's stats for a game
    Stats(commands::stats::StatsArgs),
    /// Compare two players' stats for a game
    Compare(commands::compare::CompareArgs),
    /// Saved player identifiers
    Profile {
        #[command(subcommand)]
        action: commands::profile::ProfileAction,
    },
    /// Backend account management
    Auth {
        #[command(subcommand)]
        action: commands::auth::AuthAction,
    },
    /// Mirror profiles and stats to the backend
    Sync {
        #[command(subcommand)]
        action: commands::sync::SyncAction,
    },
    /// Configuration management
    Config {
        #[command(subcommand)]
        action: commands::config::ConfigAction,
    },
    /// Generate shell completions
    Completions {
        /// Shell to generate for
        #[arg(value_enum)]
        shell: clap_complete::Shell,
    },
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let result = match cli.command {
        Commands::Wellness { action } => commands::wellness::run(action),
        Commands::Stats(args) => commands::stats::run(args),
        Commands::Compare(args) => commands::compare::run(args),
        Commands::Profile { action } => commands::profile::run(action),
        Commands::Auth { action } => commands::auth::run(action),
        Commands::Sync { action } => commands::sync::run(action),
        Commands::Config { action } => commands::config::run(action),
        Commands::Completions { shell } => {
            let mut cmd = Cli::command();
            let name = cmd.get_name().to_string();
            clap_complete::generate(shell, &mut cmd, name, &mut std::io::stdout());
            Ok(())
        }
    };

    if let Err(e) = result {
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}
