use clap::{Parser, Subcommand};
use habitual_core::Config;
use tracing_subscriber::EnvFilter;

mod commands;
mod render;

#[derive(Parser)]
#[command(name = "habitual", version, about = "Habitual habit tracker CLI")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Habit management
    Habit {
        #[command(subcommand)]
        action: commands::habit::HabitAction,
    },
    /// Toggle a habit's completion for one day
    Toggle(commands::toggle::ToggleArgs),
    /// Render a calendar view
    View(commands::view::ViewArgs),
    /// Completion status of one day
    Status(commands::view::StatusArgs),
    /// Configuration management
    Config {
        #[command(subcommand)]
        action: commands::config::ConfigAction,
    },
    /// Interactive calendar session reading commands from stdin
    Shell,
}

fn init_tracing(config: &Config) {
    let filter = EnvFilter::try_from_env("HABITUAL_LOG")
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
    init_tracing(&config);

    let result = match cli.command {
        Commands::Habit { action } => commands::habit::run(action, &config),
        Commands::Toggle(args) => commands::toggle::run(args, &config),
        Commands::View(args) => commands::view::run(args, &config),
        Commands::Status(args) => commands::view::status(args, &config),
        Commands::Config { action } => commands::config::run(action),
        Commands::Shell => commands::shell::run(&config),
    };

    if let Err(e) = result {
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}
