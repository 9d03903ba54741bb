use bazaar_app::{
    database::Db,
    domain::profiles::{
        PgProfilesService, ProfilesService,
        data::NewProfile,
        records::{ProfileUuid, SellerTier},
    },
};
use clap::Args;

#[derive(Debug, Args)]
pub(crate) struct CreateProfileArgs {
    /// PostgreSQL connection string
    #[arg(long, env = "DATABASE_URL", hide_env_values = true)]
    database_url: String,

    /// Contact email address
    #[arg(long)]
    email: String,

    /// Public username
    #[arg(long)]
    username: String,

    /// Seller tier: free, pro or team
    #[arg(long, default_value = "free")]
    seller_tier: SellerTier,

    /// Optional profile UUID; generated when omitted
    #[arg(long)]
    profile_uuid: Option<ProfileUuid>,
}

pub(crate) async fn run(args: CreateProfileArgs) -> Result<(), String> {
    let email = args.email.trim().to_string();
    let username = args.username.trim().to_string();

    if email.is_empty() || username.is_empty() {
        return Err("email and username cannot be empty".to_string());
    }

    let pool = crate::cli::connect(&args.database_url).await?;
    let service = PgProfilesService::new(Db::new(pool));

    let profile = service
        .create_profile(NewProfile {
            uuid: args.profile_uuid.unwrap_or_default(),
            email,
            username,
            seller_tier: args.seller_tier,
        })
        .await
        .map_err(|error| format!("failed to create profile: {error}"))?;

    println!("profile_uuid: {}", profile.uuid);
    println!("email: {}", profile.email);
    println!("username: {}", profile.username);
    println!("seller_tier: {}", profile.seller_tier);

    Ok(())
}
