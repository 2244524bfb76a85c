//! CLI entry and dispatch.

use anyhow::{Context, Result};
use clap::Parser;

use crate::config::Config;

mod commands;
mod term;

#[derive(Parser)]
#[command(name = "habitctl")]
#[command(version)]
#[command(about = "Terminal client for a habit tracking service")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(clap::Subcommand)]
enum Commands {
    /// Create an account and log in
    Register {
        #[arg(long)]
        username: String,
        #[arg(long)]
        email: String,
        /// Password (prompted when omitted)
        #[arg(long)]
        password: Option<String>,
    },

    /// Log in and store the session token
    Login {
        #[arg(long)]
        username: String,
        /// Password (prompted when omitted)
        #[arg(long)]
        password: Option<String>,
    },

    /// Log out and clear the stored session
    Logout,

    /// Show the signed-in user's profile
    Whoami,

    /// Manage the account profile
    Profile {
        #[command(subcommand)]
        command: ProfileCommands,
    },

    /// Today's habits with completion state and streaks
    List,

    /// Create a habit
    Add {
        title: String,
        #[arg(short, long)]
        description: Option<String>,
    },

    /// Edit a habit's title or description
    Edit {
        id: i64,
        #[arg(long)]
        title: Option<String>,
        #[arg(long)]
        description: Option<String>,
    },

    /// Delete a habit
    Rm {
        id: i64,
        /// Skip the confirmation prompt
        #[arg(short = 'y', long)]
        yes: bool,
    },

    /// Toggle today's completion for a habit
    Toggle { id: i64 },

    /// Show the current streak for a habit
    Streak { id: i64 },

    /// Detailed statistics for every habit
    Stats,

    /// Manage configuration
    Config {
        #[command(subcommand)]
        command: ConfigCommands,
    },
}

#[derive(clap::Subcommand)]
enum ProfileCommands {
    /// Update username and/or email
    Update {
        #[arg(long)]
        username: Option<String>,
        #[arg(long)]
        email: Option<String>,
    },
    /// Change the account password
    Passwd,
}

#[derive(clap::Subcommand)]
enum ConfigCommands {
    /// Print the config file path
    Path,
    /// Write a default config file
    Init,
}

pub fn run() -> Result<()> {
    let cli = Cli::parse();

    // one tokio runtime for everything
    let rt = tokio::runtime::Runtime::new().context("create tokio runtime")?;

    rt.block_on(dispatch(cli))
}

async fn dispatch(cli: Cli) -> Result<()> {
    let config = Config::load().context("load config")?;

    match cli.command {
        Commands::Register {
            username,
            email,
            password,
        } => commands::auth::register(&config, &username, &email, password).await,
        Commands::Login { username, password } => {
            commands::auth::login(&config, &username, password).await
        }
        Commands::Logout => commands::auth::logout(&config),
        Commands::Whoami => commands::profile::whoami(&config).await,
        Commands::Profile { command } => match command {
            ProfileCommands::Update { username, email } => {
                commands::profile::update(&config, username, email).await
            }
            ProfileCommands::Passwd => commands::profile::passwd(&config).await,
        },
        Commands::List => commands::habits::list(&config).await,
        Commands::Add { title, description } => {
            commands::habits::add(&config, &title, description).await
        }
        Commands::Edit {
            id,
            title,
            description,
        } => commands::habits::edit(&config, id, title, description).await,
        Commands::Rm { id, yes } => commands::habits::rm(&config, id, yes).await,
        Commands::Toggle { id } => commands::habits::toggle(&config, id).await,
        Commands::Streak { id } => commands::habits::streak(&config, id).await,
        Commands::Stats => commands::stats::show(&config).await,
        Commands::Config { command } => match command {
            ConfigCommands::Path => commands::config::path(),
            ConfigCommands::Init => commands::config::init(),
        },
    }
}
