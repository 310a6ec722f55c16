use clap::Args;
use mayfield_app::domain::users::{
    UsersService,
    data::NewUser,
    records::{Role, UserUuid},
};

#[derive(Debug, Args)]
pub(crate) struct CreateUserArgs {
    /// PostgreSQL connection string
    #[arg(long, env = "DATABASE_URL", hide_env_values = true)]
    database_url: String,

    /// Display name
    #[arg(long)]
    name: String,

    /// Login email address
    #[arg(long)]
    email: String,

    /// Login password
    #[arg(long, env = "MAYFIELD_USER_PASSWORD", hide_env_values = true)]
    password: String,

    /// Grant the admin role
    #[arg(long)]
    admin: bool,
}

pub(crate) async fn run(args: CreateUserArgs) -> Result<(), String> {
    let service = crate::cli::users_service(&args.database_url).await?;

    let role = if args.admin { Role::Admin } else { Role::User };

    let user = service
        .create_user(
            NewUser {
                uuid: UserUuid::new(),
                name: args.name,
                email: args.email,
                password: args.password,
            },
            role,
        )
        .await
        .map_err(|error| format!("failed to create user: {error}"))?;

    println!("user_uuid: {}", user.uuid);
    println!("user_email: {}", user.email);
    println!("user_role: {}", user.role);

    Ok(())
}
