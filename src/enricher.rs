use tracing::debug;

use crate::fetcher::HtmlFetcher;
use crate::models::{DetailFields, ProductRecord};
use crate::parser::parse_detail;

/// Fetches one detail page. Any failure collapses to empty fields.
pub fn fetch_detail<F: HtmlFetcher + ?Sized>(fetcher: &F, href: &str) -> DetailFields {
    if href.is_empty() {
        return DetailFields::default();
    }
    match fetcher.fetch(href) {
        Ok(html) => parse_detail(&html),
        Err(e) => {
            debug!(url = href, error = %e, "detail page unavailable");
            DetailFields::default()
        }
    }
}

/// Visits every product's detail page in order and attaches its heading and
/// price. Always returns one record per input record.
pub fn enrich<F: HtmlFetcher + ?Sized>(
    fetcher: &F,
    products: Vec<ProductRecord>,
) -> Vec<ProductRecord> {
    products
        .into_iter()
        .map(|product| {
            let details = fetch_detail(fetcher, &product.href);
            product.with_details(details)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;
    use std::collections::HashMap;

    use super::*;
    use crate::error::FetchError;

    struct FakeSite {
        pages: HashMap<&'static str, &'static str>,
        requested: RefCell<Vec<String>>,
    }

    impl FakeSite {
        fn new(pages: &[(&'static str, &'static str)]) -> Self {
            Self {
                pages: pages.iter().copied().collect(),
                requested: RefCell::new(Vec::new()),
            }
        }
    }

    impl HtmlFetcher for FakeSite {
        fn fetch(&self, url: &str) -> Result<String, FetchError> {
            self.requested.borrow_mut().push(url.to_string());
            self.pages
                .get(url)
                .map(|html| html.to_string())
                .ok_or_else(|| FetchError::Status {
                    url: url.to_string(),
                    status: reqwest::StatusCode::NOT_FOUND,
                })
        }
    }

    const PAGE: &str = r#"<h1>Unit</h1><span id="our_price_display" class="price" content="100"></span>"#;

    #[test]
    fn one_failure_does_not_abort_batch() {
        let site = FakeSite::new(&[("https://s/1", PAGE), ("https://s/3", PAGE)]);
        let input = vec![
            ProductRecord::partial("a", "https://s/1", "1"),
            ProductRecord::partial("b", "https://s/2", "2"),
            ProductRecord::partial("c", "https://s/3", "3"),
        ];

        let out = enrich(&site, input);

        assert_eq!(out.len(), 3);
        assert_eq!(out[0].h1, "Unit");
        assert_eq!(out[0].detail_price, "100");
        assert_eq!(out[1].h1, "");
        assert_eq!(out[1].detail_price, "");
        assert_eq!(out[1].price, "2");
        assert_eq!(out[2].h1, "Unit");
        assert_eq!(
            *site.requested.borrow(),
            vec!["https://s/1", "https://s/2", "https://s/3"]
        );
    }

    #[test]
    fn empty_href_is_not_fetched() {
        let site = FakeSite::new(&[]);
        let out = enrich(&site, vec![ProductRecord::partial("x", "", "")]);
        assert_eq!(out, vec![ProductRecord::partial("x", "", "")]);
        assert!(site.requested.borrow().is_empty());
    }

    #[test]
    fn page_without_fields_gives_empty_strings() {
        let site = FakeSite::new(&[("https://s/plain", "<p>nothing here</p>")]);
        assert_eq!(fetch_detail(&site, "https://s/plain"), DetailFields::default());
    }
}
