use crate::demo::{
    run_demo, run_listing_search, run_listing_show, run_moderation_status,
    run_verification_toggle, ListingSearchArgs, ModerationStatusArgs, VerificationArgs,
};
use crate::server;
use clap::{Args, Parser, Subcommand};
use rentify::error::AppError;

#[derive(Parser, Debug)]
#[command(
    name = "Rentify Catalog",
    about = "Browse, search, and moderate the Rentify listing catalog",
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Start the HTTP service (default command)
    Serve(ServeArgs),
    /// Browse the seeded listing catalog
    Listings {
        #[command(subcommand)]
        command: ListingsCommand,
    },
    /// Apply moderation decisions as an admin
    Moderate {
        #[command(subcommand)]
        command: ModerateCommand,
    },
    /// Walk through browsing, moderation, and verification against the sample catalog
    Demo,
}

#[derive(Subcommand, Debug)]
enum ListingsCommand {
    /// Free-text search with optional facets
    Search(ListingSearchArgs),
    /// Print a single listing as JSON
    Show {
        /// Listing id
        id: String,
    },
}

#[derive(Subcommand, Debug)]
enum ModerateCommand {
    /// Set the moderation status of a listing
    Status(ModerationStatusArgs),
    /// Toggle the verified badge of a listing
    Verify(VerificationArgs),
}

#[derive(Args, Debug, Default)]
pub(crate) struct ServeArgs {
    /// Override the configured host for the HTTP server
    #[arg(long)]
    pub(crate) host: Option<String>,
    /// Override the configured port for the HTTP server
    #[arg(long)]
    pub(crate) port: Option<u16>,
}

pub(crate) async fn run() -> Result<(), AppError> {
    let cli = Cli::parse();
    let command = cli
        .command
        .unwrap_or_else(|| Command::Serve(ServeArgs::default()));

    match command {
        Command::Serve(args) => server::run(args).await,
        Command::Listings {
            command: ListingsCommand::Search(args),
        } => run_listing_search(args),
        Command::Listings {
            command: ListingsCommand::Show { id },
        } => run_listing_show(id),
        Command::Moderate {
            command: ModerateCommand::Status(args),
        } => run_moderation_status(args),
        Command::Moderate {
            command: ModerateCommand::Verify(args),
        } => run_verification_toggle(args),
        Command::Demo => run_demo(),
    }
}
