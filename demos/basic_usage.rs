//! Basic usage example for the scholar-cites library.
//!
//! Extracts citation records from a saved results page, then (optionally) from
//! a live search when `SCHOLAR_LIVE=true` is set.

use scholar_cites::config::{load_env_config, ScholarConfig};
use scholar_cites::models::SearchQuery;
use scholar_cites::sources::{FilePageSource, HttpPageSource};
use scholar_cites::ScholarClient;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let fixtures = concat!(env!("CARGO_MANIFEST_DIR"), "/tests/fixtures");
    let client = ScholarClient::new(FilePageSource::with_root(fixtures), ScholarConfig::default())?;

    let records = client
        .fetch_records("google_scholar_example_page.html")
        .await?;
    println!("Extracted {} records from the saved page\n", records.len());

    for (i, record) in records.iter().take(3).enumerate() {
        println!("{}. {}", i + 1, record.title);
        println!("   Year: {}", record.year);
        println!("   Cited by: {}", record.citations);
        if let Some(id) = &record.id {
            println!("   Cluster: {}", id);
        }
        println!("   URL: {}", record.link);
    }

    if std::env::var("SCHOLAR_LIVE").unwrap_or_default() == "true" {
        let config = load_env_config()?;
        let source = HttpPageSource::from_config(&config.http)?;
        let live = ScholarClient::new(source, config.scholar)?;

        let query = SearchQuery::new("kubernetes").language("en").year_from(2015);
        println!("\nFetching {}", live.query_url(&query));

        match live.search(&query).await {
            Ok(records) => {
                for record in records {
                    println!("{}", record);
                }
            }
            Err(e) => eprintln!("Live search failed: {}", e),
        }
    }

    Ok(())
}
