use clap::{CommandFactory, Parser, Subcommand};
use habitual_core::{calendar, AppSettings};
use tracing_subscriber::EnvFilter;

mod commands;

#[derive(Parser)]
#[command(name = "habitual", version, about = "Habitual habit tracker CLI")]
struct Cli {
    /// Log debug output to stderr (overridden by HABITUAL_LOG)
    #[arg(short, long, global = true)]
    verbose: bool,

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
    /// Completion statistics
    Stats {
        #[command(subcommand)]
        action: commands::stats::StatsAction,
    },
    /// Frequency string encoding
    Freq {
        #[command(subcommand)]
        action: commands::freq::FreqAction,
    },
    /// Print the first day of the week containing a date
    WeekStart {
        /// Week start day (default: the week_start_day setting)
        #[arg(long)]
        day: Option<String>,
        /// Reference date as YYYY-MM-DD (default: today)
        #[arg(long)]
        date: Option<String>,
    },
    /// Identity areas and statement
    Identity {
        #[command(subcommand)]
        action: commands::identity::IdentityAction,
    },
    /// App settings stored with the habit data
    Settings {
        #[command(subcommand)]
        action: commands::settings::SettingsAction,
    },
    /// Free/premium entitlement
    Entitlement {
        #[command(subcommand)]
        action: commands::entitlement::EntitlementAction,
    },
    /// Configuration management
    Config {
        #[command(subcommand)]
        action: commands::config::ConfigAction,
    },
    /// Generate shell completions
    Completions {
        shell: clap_complete::Shell,
    },
}

fn week_start(day: Option<String>, date: Option<String>) -> commands::CliResult {
    let start_day = match day {
        Some(d) => calendar::parse_weekday(&d).ok_or_else(|| format!("'{d}' is not a weekday"))?,
        None => {
            let store = commands::open_store()?;
            AppSettings::load(store.kv()).week_start_day
        }
    };
    let reference = commands::date_or_today(date.as_deref())?;
    println!("{}", calendar::week_start(start_day, Some(reference)));
    Ok(())
}

fn main() {
    let cli = Cli::parse();

    let default_level = if cli.verbose { "debug" } else { "warn" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_env("HABITUAL_LOG").unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();

    let result = match cli.command {
        Commands::Habit { action } => commands::habit::run(action),
        Commands::Stats { action } => commands::stats::run(action),
        Commands::Freq { action } => commands::freq::run(action),
        Commands::WeekStart { day, date } => week_start(day, date),
        Commands::Identity { action } => commands::identity::run(action),
        Commands::Settings { action } => commands::settings::run(action),
        Commands::Entitlement { action } => commands::entitlement::run(action),
        Commands::Config { action } => commands::config::run(action),
        Commands::Completions { shell } => {
            clap_complete::generate(shell, &mut Cli::command(), "habitual", &mut std::io::stdout());
            Ok(())
        }
    };

    if let Err(e) = result {
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}
