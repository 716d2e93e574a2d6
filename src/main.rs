use log::{debug, error};
use std::env;

use cooklang_scrape::Scraper;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();

    // Get the URL from command-line arguments
    let args: Vec<String> = env::args().collect();
    let url = args.get(1).ok_or("Please provide a URL as an argument")?;

    let scraper = Scraper::from_env()?;
    debug!("Supported sites: {:?}", scraper.registry().keys());

    match scraper.scrape(url).await {
        Ok(recipe) => {
            println!("{}", serde_json::to_string_pretty(&recipe)?);
            Ok(())
        }
        Err(e) if e.is_unsupported_site() => {
            error!("{e}");
            Err(format!("{url} is not a supported site").into())
        }
        Err(e) => {
            error!("Unable to scrape the recipe from this webpage: {e}");
            Err(e.into())
        }
    }
}
