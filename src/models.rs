use serde::{Deserialize, Serialize};

/// One product as it moves through the pipeline.
///
/// The listing parser fills `title`, `href` and `price`; the enricher fills
/// `detail_price` and `h1`. Field order is the CSV column order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductRecord {
    pub title: String,
    pub href: String,
    pub price: String,
    pub detail_price: String,
    pub h1: String,
}

impl ProductRecord {
    /// A listing-page record, before its detail page has been visited.
    pub fn partial(
        title: impl Into<String>,
        href: impl Into<String>,
        price: impl Into<String>,
    ) -> Self {
        Self {
            title: title.into(),
            href: href.into(),
            price: price.into(),
            ..Self::default()
        }
    }

    pub fn with_details(self, details: DetailFields) -> Self {
        Self {
            h1: details.h1,
            detail_price: details.detail_price,
            ..self
        }
    }
}

/// Values read from a product's detail page. Empty on any failure.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DetailFields {
    pub h1: String,
    pub detail_price: String,
}
