use clap::{Parser, Subcommand};

mod db;
mod product;
mod token;
mod user;

#[derive(Debug, Parser)]
#[command(name = "virtuele-app", about = "Virtuele CLI", long_about = None)]
pub(crate) struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Schema management
    Db(db::DbCommand),

    /// Shopper and admin accounts
    User(user::UserCommand),

    /// Bearer tokens for the JSON API
    Token(token::TokenCommand),

    /// Catalog seeding
    Product(product::ProductCommand),
}

impl Cli {
    pub(crate) async fn run(self) -> Result<(), String> {
        match self.command {
            Commands::Db(command) => db::run(command).await,
            Commands::User(command) => user::run(command).await,
            Commands::Token(command) => token::run(command).await,
            Commands::Product(command) => product::run(command).await,
        }
    }
}

#[cfg(test)]
mod tests {
    use clap::CommandFactory;

    use super::*;

    #[test]
    fn command_tree_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn product_create_requires_price() {
        let result = Cli::try_parse_from([
            "virtuele-app",
            "product",
            "create",
            "--database-url",
            "postgres://localhost/virtuele",
            "--slug",
            "linen-shirt",
            "--name",
            "Linen Shirt",
        ]);

        assert!(result.is_err(), "missing --price should fail to parse");
    }
}
