use clap::Args;
use virtuele_app::{
    database,
    domain::users::{PgUsersService, UsersService, data::NewUser},
};

#[derive(Debug, Args)]
pub(crate) struct CreateUserArgs {
    /// PostgreSQL connection string
    #[arg(long, env = "DATABASE_URL", hide_env_values = true)]
    database_url: String,

    #[arg(long)]
    email: String,

    #[arg(long)]
    username: String,

    #[arg(long)]
    first_name: String,

    #[arg(long)]
    last_name: Option<String>,

    /// Grant access to every user's transactions
    #[arg(long)]
    admin: bool,
}

pub(crate) async fn run(args: CreateUserArgs) -> Result<(), String> {
    if args.email.trim().is_empty() || args.username.trim().is_empty() {
        return Err("email and username cannot be empty".to_string());
    }

    let pool = database::connect(&args.database_url)
        .await
        .map_err(|error| format!("failed to connect to database: {error}"))?;

    let user = PgUsersService::new(pool)
        .create_user(NewUser {
            email: args.email,
            username: args.username,
            first_name: args.first_name,
            last_name: args.last_name,
            is_admin: args.admin,
        })
        .await
        .map_err(|error| format!("failed to create user: {error}"))?;

    println!("user_id: {}", user.id);
    println!("username: {}", user.username);
    println!("is_admin: {}", user.is_admin);

    Ok(())
}
