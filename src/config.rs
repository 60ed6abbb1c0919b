use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{Context, Result};

pub const LISTING_URL: &str = "https://cairosales.com/en/air-conditioners/?n=10";
pub const BASE_URL: &str = "https://cairosales.com";

pub const FETCH_TIMEOUT: Duration = Duration::from_secs(30);

pub const OUTPUT_FILE_NAME: &str = "cairosales_products.csv";

pub fn output_path_in(home: &Path) -> PathBuf {
    home.join("Desktop").join(OUTPUT_FILE_NAME)
}

/// `~/Desktop/cairosales_products.csv`
pub fn output_path() -> Result<PathBuf> {
    let home = dirs::home_dir().context("Cannot determine home directory")?;
    Ok(output_path_in(&home))
}
