pub mod archiver;
pub mod config;
pub mod enricher;
pub mod error;
pub mod fetcher;
pub mod models;
pub mod parser;
pub mod price;

pub use error::{FetchError, WriteError};
pub use fetcher::HtmlFetcher;
pub use models::{DetailFields, ProductRecord};
