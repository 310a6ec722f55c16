use clap::Args;
use jiff::SignedDuration;
use mayfield_app::{
    auth::{AuthService, DEFAULT_TOKEN_TTL, HmacAuthService, SigningKey},
    domain::users::UsersService,
};
use uuid::Uuid;

#[derive(Debug, Args)]
pub(crate) struct IssueTokenArgs {
    /// PostgreSQL connection string
    #[arg(long, env = "DATABASE_URL", hide_env_values = true)]
    database_url: String,

    /// Key used to sign session tokens
    #[arg(long, env = "TOKEN_SIGNING_KEY", hide_env_values = true)]
    signing_key: String,

    /// User the token is issued for
    #[arg(long)]
    user_uuid: Uuid,

    /// Token lifetime in seconds
    #[arg(long, env = "TOKEN_TTL_SECONDS")]
    ttl_seconds: Option<i64>,
}

pub(crate) async fn run(args: IssueTokenArgs) -> Result<(), String> {
    let key = SigningKey::from_bytes(args.signing_key.as_bytes())
        .map_err(|error| format!("invalid signing key: {error}"))?;

    let ttl = args
        .ttl_seconds
        .map_or(DEFAULT_TOKEN_TTL, SignedDuration::from_secs);

    let service = crate::cli::users_service(&args.database_url).await?;

    let user = service
        .get_user(args.user_uuid.into())
        .await
        .map_err(|error| format!("failed to load user: {error}"))?;

    let issued = HmacAuthService::new(key, ttl)
        .issue_token(user.uuid, user.role)
        .map_err(|error| format!("failed to issue token: {error}"))?;

    println!("user_uuid: {}", user.uuid);
    println!("user_role: {}", user.role);
    println!("token_expires_at: {}", issued.expires_at);
    println!("token: {}", issued.token);

    Ok(())
}
