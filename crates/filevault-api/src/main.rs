use filevault_api::setup;
use filevault_core::Config;

#[tokio::main]
async fn main() -> Result<(), anyhow::Error> {
    // Load configuration
    let config = Config::from_env()?;

    // Initialize the application (database, storage, routes)
    let (pool, router) = setup::initialize_app(&config).await?;

    // Start the server; the pool is closed once it stops
    setup::server::start_server(&config, router, pool).await?;

    Ok(())
}
