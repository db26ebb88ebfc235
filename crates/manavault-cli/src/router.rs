// Command routing and dispatch

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use manavault_config::ConfigManager;
use tracing::debug;

use crate::commands::*;
use crate::context::AppContext;
use crate::error::CliResult;
use crate::logging::{init_logging, resolve_level};

/// Manavault - Magic: The Gathering card search, collection and deck manager
#[derive(Parser, Debug)]
#[command(name = "manavault")]
#[command(bin_name = "manavault")]
#[command(about = "Search cards and manage your collection and decks")]
#[command(
    long_about = "Manavault: search Magic: The Gathering cards and keep track of your collection and decks.\n\nQuick start:\n  • manavault search \"black lotus\"\n  • manavault login you@example.com\n  • manavault collection list\n  • manavault decks list"
)]
#[command(version)]
#[command(author = "Manavault Contributors")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Only log errors
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Use this config file instead of the default location
    #[arg(long, global = true, value_name = "FILE")]
    pub config: Option<PathBuf>,
}

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Commands {
    /// Search cards by name or query
    #[command(about = "Search the card database")]
    Search {
        /// Search query (default: configured default query)
        #[arg(value_name = "QUERY")]
        query: Option<String>,

        /// Page of results to show (out-of-range pages are clamped)
        #[arg(short, long, default_value_t = 1, allow_negative_numbers = true)]
        page: i64,
    },

    /// Show details of one card
    #[command(about = "Show card details and format legalities")]
    Card {
        #[arg(value_name = "ID")]
        id: String,

        /// Also add the card to your collection
        #[arg(long)]
        add: bool,
    },

    #[command(about = "Create an account")]
    Register {
        #[arg(value_name = "EMAIL")]
        email: String,

        /// Password (prompted when omitted)
        #[arg(long)]
        password: Option<String>,
    },

    #[command(about = "Log in and remember the session")]
    Login {
        #[arg(value_name = "EMAIL")]
        email: String,

        /// Password (prompted when omitted)
        #[arg(long)]
        password: Option<String>,
    },

    #[command(about = "Forget the stored session")]
    Logout,

    #[command(about = "Show the logged-in account")]
    Whoami,

    #[command(about = "Request a password reset email")]
    ForgotPassword {
        #[arg(value_name = "EMAIL")]
        email: String,
    },

    #[command(about = "Set a new password with a reset token")]
    ResetPassword {
        #[arg(value_name = "TOKEN")]
        token: String,

        /// New password (prompted when omitted)
        #[arg(long)]
        password: Option<String>,
    },

    /// Manage your card collection
    #[command(about = "List, add or remove collection cards")]
    Collection {
        #[command(subcommand)]
        action: Option<CollectionSubcommand>,
    },

    /// Manage your decks
    #[command(about = "List, create, edit and delete decks")]
    Decks {
        #[command(subcommand)]
        action: Option<DecksSubcommand>,
    },
}

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum CollectionSubcommand {
    #[command(about = "List collection cards with totals")]
    List,

    #[command(about = "Add a card to the collection")]
    Add {
        #[arg(value_name = "SCRYFALL_ID")]
        scryfall_id: String,
    },

    #[command(about = "Remove a card from the collection")]
    Remove {
        #[arg(value_name = "SCRYFALL_ID")]
        scryfall_id: String,
    },
}

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum DecksSubcommand {
    #[command(about = "List decks with their totals")]
    List,

    #[command(about = "Create an empty deck")]
    Create {
        #[arg(value_name = "NAME")]
        name: String,
    },

    #[command(about = "Show the cards of a deck")]
    Show {
        #[arg(value_name = "DECK_ID")]
        deck_id: String,
    },

    #[command(about = "Rename a deck")]
    Rename {
        #[arg(value_name = "DECK_ID")]
        deck_id: String,

        #[arg(value_name = "NAME")]
        name: String,
    },

    #[command(about = "Delete a deck")]
    Delete {
        #[arg(value_name = "DECK_ID")]
        deck_id: String,
    },

    #[command(about = "Add a card to a deck")]
    AddCard {
        #[arg(value_name = "DECK_ID")]
        deck_id: String,

        #[arg(value_name = "SCRYFALL_ID")]
        scryfall_id: String,
    },

    #[command(about = "Remove a card from a deck")]
    RemoveCard {
        #[arg(value_name = "DECK_ID")]
        deck_id: String,

        #[arg(value_name = "SCRYFALL_ID")]
        scryfall_id: String,
    },
}

/// Command router
pub struct CommandRouter;

impl CommandRouter {
    /// Parse CLI arguments and route to appropriate handler
    pub async fn route() -> CliResult<()> {
        let cli = Cli::parse();

        let config = AppContext::load_config(cli.config.clone())?;
        init_logging(resolve_level(cli.verbose, cli.quiet, &config.logging.level));
        debug!(
            "Configuration loaded from {}",
            cli.config
                .clone()
                .unwrap_or_else(|| ConfigManager::new().config_path().to_path_buf())
                .display()
        );

        let ctx = AppContext::with_config(config)?;
        Self::execute(&cli.command, &ctx).await
    }

    /// Execute a command
    pub async fn execute(command: &Commands, ctx: &AppContext) -> CliResult<()> {
        Self::handler(command).execute(ctx).await
    }

    /// Map parsed arguments onto their handler
    pub fn handler(command: &Commands) -> Box<dyn Command> {
        match command.clone() {
            Commands::Search { query, page } => Box::new(SearchCommand::new(query, page)),
            Commands::Card { id, add } => Box::new(CardCommand::new(id).with_add(add)),
            Commands::Register { email, password } => {
                Box::new(AuthCommand::new(AuthAction::Register { email, password }))
            }
            Commands::Login { email, password } => {
                Box::new(AuthCommand::new(AuthAction::Login { email, password }))
            }
            Commands::Logout => Box::new(AuthCommand::new(AuthAction::Logout)),
            Commands::Whoami => Box::new(AuthCommand::new(AuthAction::WhoAmI)),
            Commands::ForgotPassword { email } => {
                Box::new(AuthCommand::new(AuthAction::ForgotPassword { email }))
            }
            Commands::ResetPassword { token, password } => {
                Box::new(AuthCommand::new(AuthAction::ResetPassword {
                    token,
                    new_password: password,
                }))
            }
            Commands::Collection { action } => {
                let action = match action {
                    Some(CollectionSubcommand::List) | None => CollectionAction::List,
                    Some(CollectionSubcommand::Add { scryfall_id }) => {
                        CollectionAction::Add { scryfall_id }
                    }
                    Some(CollectionSubcommand::Remove { scryfall_id }) => {
                        CollectionAction::Remove { scryfall_id }
                    }
                };
                Box::new(CollectionCommand::new(action))
            }
            Commands::Decks { action } => {
                let action = match action {
                    Some(DecksSubcommand::List) | None => DecksAction::List,
                    Some(DecksSubcommand::Create { name }) => DecksAction::Create { name },
                    Some(DecksSubcommand::Show { deck_id }) => DecksAction::Show { deck_id },
                    Some(DecksSubcommand::Rename { deck_id, name }) => {
                        DecksAction::Rename { deck_id, name }
                    }
                    Some(DecksSubcommand::Delete { deck_id }) => DecksAction::Delete { deck_id },
                    Some(DecksSubcommand::AddCard {
                        deck_id,
                        scryfall_id,
                    }) => DecksAction::AddCard {
                        deck_id,
                        scryfall_id,
                    },
                    Some(DecksSubcommand::RemoveCard {
                        deck_id,
                        scryfall_id,
                    }) => DecksAction::RemoveCard {
                        deck_id,
                        scryfall_id,
                    },
                };
                Box::new(DecksCommand::new(action))
            }
        }
    }
}
