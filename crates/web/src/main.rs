use std::error::Error;

use database::{DatabaseConnectionInfo, MemoryDatabase, MongoDatabase};
use web::{config::WebConfig, start_web_server, WebState};

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    // a missing .env file is fine, the variables may come from the environment
    let _ = dotenvy::dotenv();
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .init();

    let config = WebConfig::from_env().inspect_err(|why| log::error!("{}", why))?;

    if config.in_memory {
        log::warn!("using the in-memory store, data is lost on shutdown.");
        start_web_server(WebState::new(MemoryDatabase::new()), &config).await?;
        return Ok(());
    }

    // database
    let database_connection_info = DatabaseConnectionInfo::from_env()
        .inspect_err(|why| log::error!("{}", why))?;
    let database = MongoDatabase::new(database_connection_info);
    database
        .connect()
        .await
        .inspect_err(|why| log::error!("could not connect to database: {}", why))?;

    // web server
    start_web_server(WebState::new(database), &config).await?;

    Ok(())
}
