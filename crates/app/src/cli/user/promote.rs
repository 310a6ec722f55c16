use clap::Args;
use mayfield_app::domain::users::{UsersService, records::Role};
use uuid::Uuid;

#[derive(Debug, Args)]
pub(crate) struct PromoteUserArgs {
    /// PostgreSQL connection string
    #[arg(long, env = "DATABASE_URL", hide_env_values = true)]
    database_url: String,

    /// User to promote
    #[arg(long)]
    user_uuid: Uuid,

    /// Role to assign
    #[arg(long, default_value = "admin")]
    role: Role,
}

pub(crate) async fn run(args: PromoteUserArgs) -> Result<(), String> {
    let service = crate::cli::users_service(&args.database_url).await?;

    let user = service
        .set_role(args.user_uuid.into(), args.role)
        .await
        .map_err(|error| format!("failed to update role: {error}"))?;

    println!("user_uuid: {}", user.uuid);
    println!("user_role: {}", user.role);

    Ok(())
}
