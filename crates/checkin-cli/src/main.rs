use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

mod commands;
mod terminal;

#[derive(Parser)]
#[command(name = "checkin-cli", version, about = "Event check-in desk CLI")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Check in an attendee
    Add {
        /// Attendee name
        name: String,
        /// Team: water, zero or power
        #[arg(long, short)]
        team: String,
        /// Play the remaining notification stages in real time
        #[arg(long)]
        follow: bool,
    },
    /// Attendance counts, progress and leading team
    Status {
        #[arg(long)]
        json: bool,
    },
    /// Checked-in attendees in order
    List {
        #[arg(long)]
        json: bool,
    },
    /// Remove every check-in
    Reset,
    /// Configuration management
    Config {
        #[command(subcommand)]
        action: commands::config::ConfigAction,
    },
    /// Manual test entry points for celebrations
    Demo {
        #[command(subcommand)]
        action: commands::demo::DemoAction,
    },
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn main() {
    init_tracing();

    let cli = Cli::parse();
    let result = match cli.command {
        Commands::Add { name, team, follow } => commands::checkin::add(&name, &team, follow),
        Commands::Status { json } => commands::checkin::status(json),
        Commands::List { json } => commands::checkin::list(json),
        Commands::Reset => commands::checkin::reset(),
        Commands::Config { action } => commands::config::run(action),
        Commands::Demo { action } => commands::demo::run(action),
    };

    if let Err(e) = result {
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}
