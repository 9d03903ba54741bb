use bazaar_app::{auth::PgAuthService, domain::profiles::records::ProfileUuid};
use clap::Args;
use jiff::Timestamp;

#[derive(Debug, Args)]
pub(crate) struct CreateTokenArgs {
    /// PostgreSQL connection string
    #[arg(long, env = "DATABASE_URL", hide_env_values = true)]
    database_url: String,

    /// Profile UUID that should own the token
    #[arg(long)]
    profile_uuid: ProfileUuid,

    /// Optional token expiration timestamp (RFC 3339)
    #[arg(long)]
    expires_at: Option<Timestamp>,
}

pub(crate) async fn run(args: CreateTokenArgs) -> Result<(), String> {
    if let Some(expires_at) = args.expires_at
        && expires_at <= Timestamp::now()
    {
        return Err("expires-at must be in the future".to_string());
    }

    let service = PgAuthService::new(crate::cli::connect(&args.database_url).await?);

    let issued = service
        .issue_api_token(args.profile_uuid, args.expires_at)
        .await
        .map_err(|error| format!("failed to create token: {error}"))?;

    println!("token_uuid: {}", issued.metadata.uuid);
    println!("profile_uuid: {}", issued.metadata.profile_uuid);
    println!("token_version: {}", issued.metadata.version.as_i16());
    if let Some(expires_at) = issued.metadata.expires_at {
        println!("token_expires_at: {expires_at}");
    }
    println!("api_token: {}", issued.token);
    println!("store this token now; it is only shown once");

    Ok(())
}
