use bazaar_app::database;
use clap::{Parser, Subcommand};
use sqlx::PgPool;

mod product;
mod profile;
mod token;

#[derive(Debug, Parser)]
#[command(name = "bazaar-app", about = "Bazaar operator CLI", long_about = None)]
pub(crate) struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    Profile(profile::ProfileCommand),
    Token(token::TokenCommand),
    Product(product::ProductCommand),
}

impl Cli {
    pub(crate) async fn run(self) -> Result<(), String> {
        match self.command {
            Commands::Profile(command) => profile::run(command).await,
            Commands::Token(command) => token::run(command).await,
            Commands::Product(command) => product::run(command).await,
        }
    }
}

async fn connect(database_url: &str) -> Result<PgPool, String> {
    database::connect(database_url)
        .await
        .map_err(|error| format!("failed to connect to database: {error}"))
}
