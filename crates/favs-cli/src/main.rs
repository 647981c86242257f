use anyhow::Result;
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;
use std::process::ExitCode;

use favs_application::ToggleOutcome;
use favs_core::favorite::{Bucket, Identity};

mod commands;
mod console;

#[derive(Parser)]
#[command(name = "favs")]
#[command(about = "favs CLI - manage saved sessions, products, professionals and events", long_about = None)]
struct Cli {
    #[command(flatten)]
    global: GlobalArgs,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Args)]
struct GlobalArgs {
    /// Act as this signed-in user
    #[arg(long, global = true, conflicts_with = "anonymous_session")]
    user: Option<String>,

    /// Act in the shared anonymous partition
    #[arg(long, global = true)]
    anonymous_session: bool,

    /// Override the storage directory (file backend)
    #[arg(long, global = true)]
    storage_dir: Option<PathBuf>,

    /// Config file to use instead of ~/.config/favs/config.toml
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Send notices to the log instead of the terminal
    #[arg(long, short, global = true)]
    quiet: bool,
}

impl GlobalArgs {
    /// The identity to sign in as, if any.
    fn identity(&self) -> Option<Identity> {
        if let Some(user) = &self.user {
            Some(Identity::from_user_id(Some(user.as_str())))
        } else if self.anonymous_session {
            Some(Identity::Anonymous)
        } else {
            None
        }
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Add an entity to favorites, or remove it if already saved
    Toggle {
        /// sessions, products, professionals or events
        bucket: Bucket,

        /// Entity as JSON (`-` reads stdin)
        #[arg(long, conflicts_with_all = ["id", "title"])]
        json: Option<String>,

        /// Entity id
        #[arg(long)]
        id: Option<String>,

        /// Entity title
        #[arg(long)]
        title: Option<String>,

        /// Keep every field instead of the bucket's field subset
        #[arg(long)]
        raw: bool,
    },
    /// List saved favorites
    List {
        /// Only this bucket
        bucket: Option<Bucket>,

        /// Print the collection as JSON
        #[arg(long)]
        json: bool,
    },
    /// Count saved favorites
    Count {
        /// Only this bucket
        bucket: Option<Bucket>,
    },
    /// Check whether an entity is saved
    Check { bucket: Bucket, id: String },
    /// Remove saved favorites
    Clear {
        /// Only this bucket; all buckets when omitted
        bucket: Option<Bucket>,
    },
    /// Inspect configuration
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[derive(Subcommand)]
enum ConfigAction {
    /// Print the effective configuration
    Show,
    /// Print the config file path
    Path,
}

fn main() -> Result<ExitCode> {
    let cli = Cli::parse();

    let config = commands::load_config(&cli.global)?;
    console::init_tracing(&config.log.level);

    if let Commands::Config { action } = &cli.command {
        return match action {
            ConfigAction::Show => commands::config::show(&config),
            ConfigAction::Path => commands::config::path(&cli.global),
        }
        .map(|_| ExitCode::SUCCESS);
    }

    let store = commands::open_store(&config, &cli.global)?;

    match cli.command {
        Commands::Toggle {
            bucket,
            json,
            id,
            title,
            raw,
        } => {
            let entity = commands::toggle::read_entity(json.as_deref(), id, title)?;
            let outcome = commands::toggle::run(&store, bucket, &entity, raw);
            if outcome == ToggleOutcome::Rejected {
                return Ok(ExitCode::FAILURE);
            }
        }
        Commands::List { bucket, json } => commands::query::list(&store, bucket, json)?,
        Commands::Count { bucket } => commands::query::count(&store, bucket),
        Commands::Check { bucket, id } => commands::query::check(&store, bucket, &id),
        Commands::Clear { bucket } => commands::clear::run(&store, bucket),
        Commands::Config { .. } => {}
    }

    Ok(ExitCode::SUCCESS)
}
