use bazaar_app::{
    database::Db,
    domain::products::{PgProductsService, ProductsService, records::ProductUuid},
};
use clap::Args;

#[derive(Debug, Args)]
pub(crate) struct PublishProductArgs {
    /// PostgreSQL connection string
    #[arg(long, env = "DATABASE_URL", hide_env_values = true)]
    database_url: String,

    /// Product UUID to publish
    #[arg(long)]
    product_uuid: ProductUuid,
}

pub(crate) async fn run(args: PublishProductArgs) -> Result<(), String> {
    let pool = crate::cli::connect(&args.database_url).await?;
    let service = PgProductsService::new(Db::new(pool));

    let product = service
        .publish_product(args.product_uuid)
        .await
        .map_err(|error| format!("failed to publish product: {error}"))?;

    println!("product_uuid: {}", product.uuid);
    println!("slug: {}", product.slug);
    println!("status: {}", product.status);

    Ok(())
}
