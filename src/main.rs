use crate::config::{ScraperConfig, DEFAULT_BASE_URL, DEFAULT_SEED_URL};
use crate::domain::summary::RunSummary;
use crate::errors::{AppError, AppResult};
use crate::export::{export_listings_xlsx, save_listings_json};
use crate::scraper::{HttpFetcher, ListingScraper, NormalizedListing, ScraperError, StopReason};
use clap::Parser;
use std::io::{BufRead, IsTerminal, Write};
use std::path::PathBuf;
use std::time::Duration;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use url::Url;

mod config;
mod domain;
mod errors;
mod export;
mod scraper;

#[cfg(test)]
mod tests;

/// Page cap used when the prompt answer cannot be understood.
const FALLBACK_PAGE_CAP: u32 = 5;

/// Lowest pacing delay the command line accepts.
const MIN_DELAY_MS: u64 = 500;

#[derive(Parser)]
#[command(name = "listings_scraper")]
#[command(about = "Scrape paginated property listings into JSON")]
#[command(version)]
struct Cli {
    /// First results page of the search (absolute, or a path on --base-url)
    #[arg(long, env = "LISTINGS_SEED_URL", default_value = DEFAULT_SEED_URL)]
    url: String,

    /// Maximum pages to scrape: a number or "all". Prompts when omitted on a terminal.
    #[arg(long, value_parser = parse_page_cap)]
    pages: Option<PageCap>,

    /// JSON output file [default: properties_<timestamp>.json]
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Also write the listings to this spreadsheet
    #[arg(long)]
    xlsx: Option<PathBuf>,

    #[arg(long, env = "LISTINGS_BASE_URL", default_value = DEFAULT_BASE_URL)]
    base_url: Url,

    /// Wait between page fetches, in milliseconds (at least 500)
    #[arg(
        long,
        env = "LISTINGS_DELAY_MS",
        default_value_t = 2000,
        value_parser = clap::value_parser!(u64).range(MIN_DELAY_MS..)
    )]
    delay_ms: u64,

    #[arg(long, env = "LISTINGS_TIMEOUT_SECS", default_value_t = 30)]
    timeout_secs: u64,

    /// Pages are localized by this header; labels and listing text follow it
    #[arg(long, env = "LISTINGS_ACCEPT_LANGUAGE")]
    accept_language: Option<String>,

    #[arg(long, env = "LISTINGS_USER_AGENT")]
    user_agent: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum PageCap {
    All,
    Limit(u32),
}

impl PageCap {
    fn as_option(self) -> Option<u32> {
        match self {
            PageCap::All => None,
            PageCap::Limit(n) => Some(n),
        }
    }
}

fn parse_page_cap(input: &str) -> Result<PageCap, String> {
    let input = input.trim();
    if input.eq_ignore_ascii_case("all") {
        return Ok(PageCap::All);
    }
    match input.parse::<u32>() {
        Ok(0) => Err("page count must be at least 1".to_string()),
        Ok(n) => Ok(PageCap::Limit(n)),
        Err(_) => Err(format!("expected a number or 'all', got {input:?}")),
    }
}

fn main() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,listings_scraper=info,reqwest=warn".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let cli = Cli::parse();

    if let Err(e) = run(cli) {
        tracing::error!("{e}");
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> AppResult<()> {
    let mut config = ScraperConfig::default()
        .with_base_url(cli.base_url)
        .with_pacing_delay(Duration::from_millis(cli.delay_ms))
        .with_timeout(Duration::from_secs(cli.timeout_secs));
    if let Some(lang) = cli.accept_language {
        config = config.with_accept_language(lang);
    }
    if let Some(agent) = cli.user_agent {
        config = config.with_user_agent(agent);
    }

    let seed_url = config
        .resolve(&cli.url)
        .map_err(|e| AppError::Config(format!("invalid seed url {:?}: {e}", cli.url)))?;

    let page_cap = match cli.pages {
        Some(cap) => cap,
        None if std::io::stdin().is_terminal() => prompt_page_cap()?,
        None => PageCap::All,
    };

    let fetcher = HttpFetcher::new(config)?;
    let pacing_delay = fetcher.config().pacing_delay;
    let scraper = ListingScraper::new(fetcher, pacing_delay);

    let traversal = scraper.scrape_all_pages(&seed_url, page_cap.as_option());
    if let StopReason::SeedFetchFailed(failure) = &traversal.stop {
        return Err(ScraperError::SeedUnavailable(failure.clone()).into());
    }
    tracing::debug!(
        "Traversal stopped: {:?} (pagination: {:?})",
        traversal.stop,
        traversal.pagination
    );

    if traversal.listings.is_empty() {
        println!("No properties were scraped.");
        return Ok(());
    }

    let output = cli.output.unwrap_or_else(|| {
        PathBuf::from(format!(
            "properties_{}.json",
            chrono::Local::now().format("%Y%m%d_%H%M%S")
        ))
    });
    save_listings_json(&traversal.listings, &output)?;
    println!(
        "\nSuccessfully scraped {} properties from {} pages.",
        traversal.listings.len(),
        traversal.pages_scraped
    );
    println!("Data saved to {}", output.display());

    if let Some(path) = cli.xlsx {
        export_listings_xlsx(&traversal.listings, &path)?;
        println!("Spreadsheet saved to {}", path.display());
    }

    print_report(&traversal.listings);
    Ok(())
}

fn prompt_page_cap() -> AppResult<PageCap> {
    print!("How many pages would you like to scrape? (Enter number or 'all' for all pages): ");
    std::io::stdout().flush()?;

    let mut line = String::new();
    std::io::stdin().lock().read_line(&mut line)?;

    Ok(parse_page_cap(&line).unwrap_or_else(|e| {
        tracing::warn!("Invalid input ({e}). Defaulting to scraping first {FALLBACK_PAGE_CAP} pages.");
        PageCap::Limit(FALLBACK_PAGE_CAP)
    }))
}

fn print_report(listings: &[NormalizedListing]) {
    println!("\nSample properties:");
    for (i, listing) in listings.iter().take(5).enumerate() {
        println!(
            "{}. {} - {} - {}",
            i + 1,
            listing.title.display(),
            listing.price.display(),
            listing.address.display()
        );
    }

    let summary = RunSummary::from_listings(listings);
    println!("\nSummary:");
    println!("Total properties: {}", summary.total);
    println!("Unique neighborhoods: {}", summary.unique_addresses);
    if let Some(prices) = summary.prices {
        println!("Price range: €{:.0} - €{:.0}", prices.min, prices.max);
        println!("Average price: €{:.0}", prices.average);
    }
}
