use clap::Args;
use virtuele_app::{
    database::{self, Db},
    domain::products::{PgProductsService, ProductsService, data::NewProduct},
};

#[derive(Debug, Args)]
pub(crate) struct CreateProductArgs {
    /// PostgreSQL connection string
    #[arg(long, env = "DATABASE_URL", hide_env_values = true)]
    database_url: String,

    /// URL slug used by the cart endpoints
    #[arg(long)]
    slug: String,

    #[arg(long)]
    name: String,

    /// Unit price in whole rupiah
    #[arg(long)]
    price: u64,
}

pub(crate) async fn run(args: CreateProductArgs) -> Result<(), String> {
    let pool = database::connect(&args.database_url)
        .await
        .map_err(|error| format!("failed to connect to database: {error}"))?;

    let product = PgProductsService::new(Db::new(pool))
        .create_product(NewProduct {
            slug: args.slug,
            name: args.name,
            price: args.price,
        })
        .await
        .map_err(|error| format!("failed to create product: {error}"))?;

    println!("product_id: {}", product.id);
    println!("slug: {}", product.slug);
    println!("price: {}", product.price);

    Ok(())
}
