//! CLI entry and dispatch.

use anyhow::{Context, Result};
use clap::Parser;
use taleweave_core::config::Config;
use taleweave_core::logging;

mod commands;

#[derive(Parser)]
#[command(name = "taleweave")]
#[command(version = "0.1")]
#[command(about = "Terminal client for a fairy-tale generation service")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Open a saved tale directly by id (deep link)
    #[arg(long, value_name = "ID")]
    tale: Option<String>,

    /// Override the backend base URL from config
    #[arg(long, value_name = "URL")]
    base_url: Option<String>,
}

#[derive(clap::Subcommand)]
enum Commands {
    /// Sign in and persist the bearer token
    Login {
        /// Account email
        #[arg(long)]
        email: String,

        /// Password (prompted on stdin when omitted)
        #[arg(long)]
        password: Option<String>,
    },

    /// Create an account and persist the bearer token
    Register {
        /// Account email
        #[arg(long)]
        email: String,

        /// Display name
        #[arg(long)]
        name: String,

        /// Password (prompted on stdin when omitted)
        #[arg(long)]
        password: Option<String>,
    },

    /// Sign out (clear the persisted token)
    Logout,

    /// Browse the saved tale collection
    Stories {
        #[command(subcommand)]
        command: StoriesCommands,
    },

    /// Generate a story without entering the TUI
    Generate {
        /// Story topic, e.g. "Dragons, Friendship"
        #[arg(long)]
        topic: String,

        /// Target age group
        #[arg(long, default_value = "Young Children (5-8 years)")]
        age: String,

        /// Moral of the story
        #[arg(long, default_value = "")]
        moral: String,

        /// Story length (short, medium, long)
        #[arg(long, default_value = "medium")]
        length: String,

        /// Story language (English, Russian, Japanese, German, Kazakh)
        #[arg(long, default_value = "English")]
        language: String,

        /// Cultural tradition (western, eastern, african, latinamerican,
        /// middleeastern, nordic, universal)
        #[arg(long, default_value = "western")]
        culture: String,

        /// Scientific topic to weave in (astronomy, biology, ..., or free
        /// text)
        #[arg(long, value_name = "TOPIC")]
        science: Option<String>,

        /// Request audio narration
        #[arg(long)]
        with_audio: bool,
    },

    /// Manage configuration
    Config {
        #[command(subcommand)]
        command: ConfigCommands,
    },
}

#[derive(clap::Subcommand)]
enum StoriesCommands {
    /// Lists saved tales
    List,
    /// Shows a saved tale
    Show {
        /// The id of the tale to show
        #[arg(value_name = "TALE_ID")]
        id: String,
    },
}

#[derive(clap::Subcommand)]
enum ConfigCommands {
    /// Show the path to the config file
    Path,
    /// Initialize a default config file (if not present)
    Init,
    /// Set the backend base URL in the config file
    SetUrl {
        #[arg(value_name = "URL")]
        url: String,
    },
}

pub fn run() -> Result<()> {
    let cli = Cli::parse();

    // one tokio runtime for everything
    let rt = tokio::runtime::Runtime::new().context("create tokio runtime")?;

    rt.block_on(async move { dispatch(cli).await })
}

async fn dispatch(cli: Cli) -> Result<()> {
    let mut config = Config::load().context("load config")?;
    if let Some(base_url) = cli.base_url {
        config.base_url = base_url;
    }

    // File-based logging; stderr is unusable once the TUI takes the screen.
    let _log_guard = logging::init().context("init logging")?;

    let Some(command) = cli.command else {
        return taleweave_tui::run_tui(&config, cli.tale).await;
    };

    match command {
        Commands::Login { email, password } => {
            commands::auth::login(&config, &email, password).await
        }
        Commands::Register {
            email,
            name,
            password,
        } => commands::auth::register(&config, &email, &name, password).await,
        Commands::Logout => commands::auth::logout(),

        Commands::Stories { command } => match command {
            StoriesCommands::List => commands::stories::list(&config).await,
            StoriesCommands::Show { id } => commands::stories::show(&config, &id).await,
        },

        Commands::Generate {
            topic,
            age,
            moral,
            length,
            language,
            culture,
            science,
            with_audio,
        } => {
            commands::generate::run(commands::generate::GenerateOptions {
                config: &config,
                topic,
                age,
                moral,
                length,
                language,
                culture,
                science,
                with_audio,
            })
            .await
        }

        Commands::Config { command } => match command {
            ConfigCommands::Path => {
                commands::config::path();
                Ok(())
            }
            ConfigCommands::Init => commands::config::init(),
            ConfigCommands::SetUrl { url } => commands::config::set_url(&url),
        },
    }
}
