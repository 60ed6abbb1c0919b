use std::process::ExitCode;
use std::time::Instant;

use cairosales_scraper::{HtmlFetcher, archiver, config, enricher, fetcher, parser};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

fn main() -> ExitCode {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "warn".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    run()
}

fn run() -> ExitCode {
    let started = Instant::now();
    info!(
        started_at = %chrono::Utc::now().to_rfc3339(),
        url = config::LISTING_URL,
        "starting scrape"
    );

    let client = match fetcher::select_client(config::FETCH_TIMEOUT) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Failed to fetch HTML: {e}");
            return ExitCode::FAILURE;
        }
    };

    let html = match client.fetch(config::LISTING_URL) {
        Ok(h) => h,
        Err(e) => {
            eprintln!("Failed to fetch HTML: {e}");
            return ExitCode::FAILURE;
        }
    };

    let products = parser::parse_listing(&html, config::BASE_URL);
    println!("Found {} products on listing page", products.len());

    let products = enricher::enrich(&*client, products);
    println!(
        "Enriched {} products with first h1 and detail price",
        products.len()
    );
    println!("First H1s:");
    for product in &products {
        println!("{}", product.h1);
    }
    println!("Detail page prices (normalized):");
    for product in &products {
        println!("{}", product.detail_price);
    }

    let output = match config::output_path() {
        Ok(p) => p,
        Err(e) => {
            eprintln!("Failed to save CSV: {e:#}");
            return ExitCode::FAILURE;
        }
    };
    if let Err(e) = archiver::save_to_csv(&products, &output) {
        eprintln!("Failed to save CSV: {e}");
        return ExitCode::FAILURE;
    }

    info!(
        records = products.len(),
        elapsed_ms = started.elapsed().as_millis() as u64,
        "scrape finished"
    );
    println!("Saved: {}", output.display());
    ExitCode::SUCCESS
}
