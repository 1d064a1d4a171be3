use preinscription::{config::AppConfig, App, Result};
use tracing::error;

#[tokio::main]
async fn main() -> Result<()> {
    // No .env file is fine, the process environment is used as is.
    dotenvy::dotenv().ok();

    // We have a different logging mechanism for production
    #[cfg(not(debug_assertions))]
    {
        preinscription::init_production_tracing()
    }
    #[cfg(debug_assertions)]
    {
        preinscription::init_dbg_tracing();
    }

    let config = AppConfig::from_env()
        .inspect_err(|er| error!("{:<20} - {er}", "FATAL config"))?;
    let app = App::build_from_config(config)
        .await
        .inspect_err(|er| error!("{:<20} - {er}", "FATAL init"))?;

    preinscription::serve(app).await?;

    Ok(())
}
