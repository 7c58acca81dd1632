// Module-specific lints configuration
#![allow(clippy::uninlined_format_args)]

use anyhow::{Context, Result};
use clap::{CommandFactory, Parser, Subcommand, ValueEnum};
use clap_complete::{generate, Shell};
use log::{info, warn, Level, LevelFilter, Log, Metadata, Record, SetLoggerError};
use std::io::Write;
use std::net::SocketAddr;
use std::path::{Path, PathBuf};

use crate::analyzer::FrameAnalyzer;
use crate::app_config::Config;
use crate::database::connection::DatabaseConnection;
use crate::database::models::{SignLanguageRecord, UserProfileRecord, UserRole};
use crate::database::repository::Repository;
use crate::frame_store::FrameStore;
use crate::server::AppState;
use crate::session::SessionController;

mod analyzer;
mod app_config;
mod database;
mod errors;
mod frame_store;
mod providers;
mod server;
mod session;

/// CLI Wrapper for LogLevel to implement ValueEnum
#[derive(Debug, Clone, ValueEnum)]
enum CliLogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl From<CliLogLevel> for app_config::LogLevel {
    fn from(cli_level: CliLogLevel) -> Self {
        match cli_level {
            CliLogLevel::Error => app_config::LogLevel::Error,
            CliLogLevel::Warn => app_config::LogLevel::Warn,
            CliLogLevel::Info => app_config::LogLevel::Info,
            CliLogLevel::Debug => app_config::LogLevel::Debug,
            CliLogLevel::Trace => app_config::LogLevel::Trace,
        }
    }
}

/// CLI Wrapper for UserRole to implement ValueEnum
#[derive(Debug, Clone, ValueEnum)]
enum CliUserRole {
    Viewer,
    Admin,
}

impl From<CliUserRole> for UserRole {
    fn from(cli_role: CliUserRole) -> Self {
        match cli_role {
            CliUserRole::Viewer => UserRole::Viewer,
            CliUserRole::Admin => UserRole::Admin,
        }
    }
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Start the HTTP server (default command)
    #[command(alias = "run")]
    Serve(ServeArgs),

    /// Seed the database with the built-in sign languages
    Seed {
        /// Configuration file path
        #[arg(short, long, default_value = "conf.json")]
        config_path: String,
    },

    /// List stored translation sessions
    Sessions {
        /// Only show sessions owned by this user
        #[arg(short, long)]
        user: Option<String>,

        /// Configuration file path
        #[arg(short, long, default_value = "conf.json")]
        config_path: String,
    },

    /// Manage user profiles
    Users {
        #[command(subcommand)]
        command: UsersCommand,
    },

    /// Test connectivity to the configured vision provider
    Check {
        /// Configuration file path
        #[arg(short, long, default_value = "conf.json")]
        config_path: String,
    },

    /// Generate shell completions for signbridge
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

#[derive(Subcommand, Debug)]
enum UsersCommand {
    /// Create a user profile
    Add {
        /// Username for the new profile
        username: String,

        /// Role assigned to the profile
        #[arg(short, long, value_enum, default_value = "viewer")]
        role: CliUserRole,

        /// Configuration file path
        #[arg(short, long, default_value = "conf.json")]
        config_path: String,
    },

    /// List user profiles
    List {
        /// Configuration file path
        #[arg(short, long, default_value = "conf.json")]
        config_path: String,
    },
}

#[derive(Parser, Debug)]
struct ServeArgs {
    /// Address and port to bind, e.g. 127.0.0.1:8080
    #[arg(short, long)]
    bind: Option<String>,

    /// Gemini API key; absence selects demo mode
    #[arg(short, long, env = "GEMINI_API_KEY", hide_env_values = true)]
    api_key: Option<String>,

    /// SQLite database file path
    #[arg(short, long)]
    database: Option<PathBuf>,

    /// Directory for frame snapshots; omit to disable snapshots
    #[arg(short, long)]
    frames_dir: Option<PathBuf>,

    /// Configuration file path
    #[arg(short, long, default_value = "conf.json")]
    config_path: String,

    /// Set logging level
    #[arg(short, long, value_enum)]
    log_level: Option<CliLogLevel>,
}

/// SignBridge - Sign Language to Speech
///
/// Serves a browser capture loop that recognizes sign language in camera
/// frames via a cloud vision model and speaks the translation aloud.
#[derive(Parser, Debug)]
#[command(name = "signbridge")]
#[command(version = "1.0.0")]
#[command(about = "Sign language to speech translation server")]
#[command(long_about = "SignBridge serves a camera capture page that recognizes sign language \
frames via the Gemini vision API and speaks the translated text in the browser.

EXAMPLES:
    signbridge                                  # Serve with default config (demo mode)
    signbridge -b 0.0.0.0:9000                  # Bind a different address
    GEMINI_API_KEY=... signbridge               # Serve against the live vision API
    signbridge seed                             # Seed the built-in sign languages
    signbridge users add alice --role admin     # Create a user profile
    signbridge sessions --user alice            # List a user's sessions
    signbridge check                            # Test vision provider connectivity
    signbridge completions bash                 # Generate bash completions

CONFIGURATION:
    Configuration is stored in conf.json by default. You can specify a different
    config file with --config-path. If the config file doesn't exist, a default
    one will be created automatically. Without an API key the server runs in
    demo mode and returns canned recognitions.")]
struct CommandLineOptions {
    #[command(subcommand)]
    command: Option<Commands>,

    #[command(flatten)]
    serve: ServeArgs,
}

// Custom logger implementation writing colored lines to stderr
struct CustomLogger {
    level: LevelFilter,
}

impl CustomLogger {
    fn new(level: LevelFilter) -> Self {
        CustomLogger { level }
    }

    fn init(level: LevelFilter) -> Result<(), SetLoggerError> {
        let logger = Box::new(CustomLogger::new(level));
        log::set_boxed_logger(logger)?;
        log::set_max_level(level);
        Ok(())
    }

    fn color_for_level(level: Level) -> &'static str {
        match level {
            Level::Error => "\x1B[1;31m",
            Level::Warn => "\x1B[1;33m",
            Level::Info => "\x1B[1;32m",
            Level::Debug => "\x1B[1;36m",
            Level::Trace => "\x1B[1;35m",
        }
    }
}

impl Log for CustomLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= self.level
    }

    fn log(&self, record: &Record) {
        if self.enabled(record.metadata()) {
            let now = chrono::Local::now().format("%H:%M:%S.%3f");
            let color = Self::color_for_level(record.level());

            let mut stderr = std::io::stderr();
            let _ = writeln!(
                stderr,
                "{}{} {:5} {}\x1B[0m",
                color,
                now,
                record.level(),
                record.args()
            );
        }
    }

    fn flush(&self) {
        let _ = std::io::stderr().flush();
    }
}

/// The five built-in sign languages seeded by the `seed` command
fn builtin_languages() -> Vec<SignLanguageRecord> {
    vec![
        SignLanguageRecord::new(
            "ASL",
            "American Sign Language",
            "Used in the United States and parts of Canada",
        ),
        SignLanguageRecord::new("BSL", "British Sign Language", "Used in the United Kingdom"),
        SignLanguageRecord::new("KSL", "Kenyan Sign Language", "Used in Kenya"),
        SignLanguageRecord::new(
            "IS",
            "International Sign",
            "Used at international gatherings of deaf communities",
        ),
        SignLanguageRecord::new("AUSLAN", "Australian Sign Language", "Used in Australia"),
    ]
}

fn level_filter(level: &app_config::LogLevel) -> LevelFilter {
    match level {
        app_config::LogLevel::Error => LevelFilter::Error,
        app_config::LogLevel::Warn => LevelFilter::Warn,
        app_config::LogLevel::Info => LevelFilter::Info,
        app_config::LogLevel::Debug => LevelFilter::Debug,
        app_config::LogLevel::Trace => LevelFilter::Trace,
    }
}

/// Load the config file, creating a default one when missing
fn load_config(config_path: &str) -> Result<Config> {
    if Path::new(config_path).exists() {
        Config::from_file(config_path)
    } else {
        warn!(
            "Config file not found at '{}', creating default config.",
            config_path
        );
        let config = Config::default();
        config.write_to_file(config_path)?;
        Ok(config)
    }
}

/// Open the repository configured in the config file
fn open_repository(config: &Config) -> Result<Repository> {
    let db = match &config.database_path {
        Some(path) => DatabaseConnection::new(path)?,
        None => DatabaseConnection::new_default()?,
    };
    Ok(Repository::new(db))
}

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize the logger once with info level by default
    // We'll update the level after loading the config if needed
    CustomLogger::init(LevelFilter::Info)?;

    let cli = CommandLineOptions::parse();

    match cli.command {
        Some(Commands::Completions { shell }) => {
            let mut cmd = CommandLineOptions::command();
            generate(shell, &mut cmd, "signbridge", &mut std::io::stdout());
            Ok(())
        }
        Some(Commands::Serve(args)) => run_serve(args).await,
        Some(Commands::Seed { config_path }) => run_seed(&config_path).await,
        Some(Commands::Sessions { user, config_path }) => {
            run_sessions(user.as_deref(), &config_path).await
        }
        Some(Commands::Users { command }) => run_users(command).await,
        Some(Commands::Check { config_path }) => run_check(&config_path).await,
        // Default behavior - serve with top-level args
        None => run_serve(cli.serve).await,
    }
}

async fn run_serve(args: ServeArgs) -> Result<()> {
    // If log level is set via command line, apply it immediately
    if let Some(cmd_log_level) = &args.log_level {
        let config_log_level: app_config::LogLevel = cmd_log_level.clone().into();
        log::set_max_level(level_filter(&config_log_level));
    }

    let mut config = load_config(&args.config_path)?;

    // Override config with CLI options if provided
    if let Some(bind) = &args.bind {
        config.bind_address = bind.clone();
    }
    if let Some(api_key) = &args.api_key {
        config.vision.api_key = api_key.clone();
    }
    if let Some(database) = &args.database {
        config.database_path = Some(database.clone());
    }
    if let Some(frames_dir) = &args.frames_dir {
        config.frames_dir = Some(frames_dir.clone());
    }
    if let Some(log_level) = &args.log_level {
        config.log_level = log_level.clone().into();
    }

    config.validate().context("Configuration validation failed")?;

    // If log level was not set via command line, update it from config now
    if args.log_level.is_none() {
        log::set_max_level(level_filter(&config.log_level));
    }

    let addr: SocketAddr = config
        .bind_address
        .parse()
        .with_context(|| format!("Invalid bind address: {}", config.bind_address))?;

    let repo = open_repository(&config)?;

    // Make sure the language list is usable on first run
    let seeded = repo.seed_languages(builtin_languages()).await?;
    if seeded > 0 {
        info!("Seeded {} sign languages", seeded);
    }

    let analyzer = FrameAnalyzer::new(&config.vision);
    let frame_store = match &config.frames_dir {
        Some(dir) => Some(FrameStore::new(dir)?),
        None => None,
    };

    let controller = SessionController::new(repo, analyzer, frame_store);
    server::serve(AppState::new(controller), addr).await
}

async fn run_seed(config_path: &str) -> Result<()> {
    let config = load_config(config_path)?;
    let repo = open_repository(&config)?;

    let created = repo.seed_languages(builtin_languages()).await?;
    info!(
        "Seeded {} sign languages ({} already present)",
        created,
        builtin_languages().len() - created
    );
    Ok(())
}

async fn run_sessions(user: Option<&str>, config_path: &str) -> Result<()> {
    let config = load_config(config_path)?;
    let repo = open_repository(&config)?;

    let sessions = repo.list_sessions(user).await?;
    if sessions.is_empty() {
        info!("No sessions found");
        return Ok(());
    }

    for session in &sessions {
        let records = repo.get_records(&session.id).await?;
        println!(
            "{}  {}  {}  {}  {} records",
            session.id,
            session.status,
            session.started_at,
            session.user.as_deref().unwrap_or("anonymous"),
            records.len()
        );
    }
    info!("{} sessions", sessions.len());
    Ok(())
}

async fn run_users(command: UsersCommand) -> Result<()> {
    match command {
        UsersCommand::Add {
            username,
            role,
            config_path,
        } => {
            let config = load_config(&config_path)?;
            let repo = open_repository(&config)?;

            let profile = repo
                .create_user(&UserProfileRecord::new(&username, role.into()))
                .await?;
            info!("Created user '{}' with role {}", profile.username, profile.role);
        }
        UsersCommand::List { config_path } => {
            let config = load_config(&config_path)?;
            let repo = open_repository(&config)?;

            let users = repo.list_users().await?;
            for user in &users {
                println!(
                    "{}  {}  {} translations  since {}",
                    user.username, user.role, user.total_translations, user.created_at
                );
            }
            info!("{} users", users.len());
        }
    }
    Ok(())
}

async fn run_check(config_path: &str) -> Result<()> {
    let config = load_config(config_path)?;
    let analyzer = FrameAnalyzer::new(&config.vision);

    info!("Checking provider '{}'...", analyzer.provider_name());
    match analyzer.test_connection().await {
        Ok(()) => {
            info!("Provider '{}' is reachable", analyzer.provider_name());
            Ok(())
        }
        Err(e) => Err(anyhow::anyhow!(
            "Provider '{}' check failed: {}",
            analyzer.provider_name(),
            e
        )),
    }
}
