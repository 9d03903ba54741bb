use bazaar_app::{auth::PgAuthService, domain::profiles::records::ProfileUuid};
use clap::Args;
use jiff::Timestamp;

#[derive(Debug, Args)]
pub(crate) struct ListTokensArgs {
    /// PostgreSQL connection string
    #[arg(long, env = "DATABASE_URL", hide_env_values = true)]
    database_url: String,

    /// Profile UUID whose tokens should be listed
    #[arg(long)]
    profile_uuid: ProfileUuid,
}

fn display_or(value: Option<Timestamp>, fallback: &str) -> String {
    value.map_or_else(|| fallback.to_string(), |value| value.to_string())
}

pub(crate) async fn run(args: ListTokensArgs) -> Result<(), String> {
    let service = PgAuthService::new(crate::cli::connect(&args.database_url).await?);

    let tokens = service
        .list_api_tokens(args.profile_uuid)
        .await
        .map_err(|error| format!("failed to list tokens: {error}"))?;

    if tokens.is_empty() {
        println!("no tokens found for profile {}", args.profile_uuid);
        return Ok(());
    }

    for token in tokens {
        println!("token_uuid: {}", token.uuid);
        println!("token_version: {}", token.version.as_i16());
        println!("created_at: {}", token.created_at);
        println!("last_used_at: {}", display_or(token.last_used_at, "never"));
        println!("expires_at: {}", display_or(token.expires_at, "none"));
        println!("revoked_at: {}", display_or(token.revoked_at, "active"));
        println!();
    }

    Ok(())
}
