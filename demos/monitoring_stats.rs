use ismon_client::{pages_into_items, Credentials, IsMonClient, StatsQuery};
use log::info;
use std::error::Error;

/// Fetch monitoring statistics for one element/metric and print them.
///
/// Credentials come from `ISMON_USERNAME`, `ISMON_PASSWORD` and `ISMON_API_KEY`.
#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    env_logger::init();

    let credentials = Credentials::new(
        std::env::var("ISMON_USERNAME")?,
        std::env::var("ISMON_PASSWORD")?,
        std::env::var("ISMON_API_KEY")?,
    );
    let client = IsMonClient::new(credentials)?;

    client.login().await?;

    let query = StatsQuery::new("2024-06-04", 43901, 14);
    let result = client.monitoring().stats(&query).await;

    // Log out even if the query failed.
    client.logout().await?;

    let pages = result?;
    info!("Received {} page(s)", pages.len());
    for item in pages_into_items(&pages) {
        println!("{}", serde_json::to_string_pretty(&item)?);
    }

    Ok(())
}
