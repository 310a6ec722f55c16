use std::sync::Arc;

use clap::{Parser, Subcommand};
use mayfield_app::{
    database::{self, Db},
    domain::users::PgUsersService,
    mailer::LogMailer,
};

mod token;
mod user;

#[derive(Debug, Parser)]
#[command(name = "mayfield-app", about = "Mayfield storefront administration", long_about = None)]
pub(crate) struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    User(user::UserCommand),
    Token(token::TokenCommand),
}

impl Cli {
    pub(crate) async fn run(self) -> Result<(), String> {
        match self.command {
            Commands::User(command) => user::run(command).await,
            Commands::Token(command) => token::run(command).await,
        }
    }
}

/// Commands run one query at a time.
const CLI_MAX_CONNECTIONS: u32 = 1;

/// Connect, migrate, and build the users service.
async fn users_service(database_url: &str) -> Result<PgUsersService, String> {
    let pool = database::connect(database_url, CLI_MAX_CONNECTIONS)
        .await
        .map_err(|error| format!("failed to connect to database: {error}"))?;

    database::migrate(&pool)
        .await
        .map_err(|error| format!("failed to apply migrations: {error}"))?;

    Ok(PgUsersService::new(Db::new(pool), Arc::new(LogMailer)))
}
