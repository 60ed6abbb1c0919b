use scraper::{ElementRef, Html, Selector};
use tracing::debug;
use url::Url;

use crate::models::{DetailFields, ProductRecord};
use crate::price::normalize_price;

/// Where to look for product list items, most specific first.
#[derive(Debug, Clone, Copy)]
enum ContainerStrategy {
    /// `li` elements under the first element matching this selector.
    Within(&'static str),
    /// Every `li` in the document.
    Document,
}

const CONTAINER_STRATEGIES: &[ContainerStrategy] = &[
    ContainerStrategy::Within("ul.product_list.grid"),
    ContainerStrategy::Within("ul.product_list"),
    ContainerStrategy::Document,
];

const PRODUCT_ANCHOR: &str = "a.product_img_link";
const LISTING_PRICE: &str = "span.price.product-price";
const TOOLTIP_ATTR: &str = "data-original-title";

const DETAIL_PRICE: &[&str] = &["span#our_price_display.price", "#our_price_display"];

fn list_items(doc: &Html) -> Vec<ElementRef<'_>> {
    let li = Selector::parse("li").unwrap();
    for strategy in CONTAINER_STRATEGIES {
        match *strategy {
            ContainerStrategy::Within(css) => {
                let container_sel = Selector::parse(css).unwrap();
                if let Some(container) = doc.select(&container_sel).next() {
                    debug!(container = css, "matched product container");
                    return container.select(&li).collect();
                }
            }
            ContainerStrategy::Document => {
                debug!("no product container, scanning every list item");
                return doc.select(&li).collect();
            }
        }
    }
    Vec::new()
}

/// Each text node trimmed, then concatenated.
fn trimmed_text(el: ElementRef<'_>) -> String {
    el.text().map(str::trim).collect()
}

/// Absolute links are kept verbatim; only relative ones are joined.
fn resolve_href(base: Option<&Url>, href: &str) -> Option<String> {
    if Url::parse(href).is_ok() {
        return Some(href.to_string());
    }
    base?.join(href).ok().map(String::from)
}

/// Extracts title, absolute link and listing price for every product on a
/// listing page, in document order.
///
/// Items without a product anchor, or whose anchor has no usable `href`, are
/// left out.
pub fn parse_listing(html: &str, base_url: &str) -> Vec<ProductRecord> {
    let doc = Html::parse_document(html);
    let anchor_sel = Selector::parse(PRODUCT_ANCHOR).unwrap();
    let price_sel = Selector::parse(LISTING_PRICE).unwrap();
    let base = Url::parse(base_url).ok();

    let mut products = Vec::new();
    for li in list_items(&doc) {
        let Some(anchor) = li.select(&anchor_sel).next() else {
            continue;
        };
        let Some(href) = anchor.value().attr("href").filter(|h| !h.is_empty()) else {
            continue;
        };
        let Some(href) = resolve_href(base.as_ref(), href) else {
            debug!(href, "unresolvable product link");
            continue;
        };

        let title = anchor
            .value()
            .attr("title")
            .filter(|t| !t.is_empty())
            .or_else(|| anchor.value().attr(TOOLTIP_ATTR))
            .unwrap_or_default()
            .trim();

        let price_text = li
            .select(&price_sel)
            .next()
            .map(trimmed_text)
            .unwrap_or_default();

        products.push(ProductRecord::partial(title, href, normalize_price(&price_text)));
    }
    products
}

fn first_h1(doc: &Html) -> String {
    let h1 = Selector::parse("h1").unwrap();
    doc.select(&h1).next().map(trimmed_text).unwrap_or_default()
}

fn detail_price(doc: &Html) -> String {
    let el = DETAIL_PRICE
        .iter()
        .map(|css| Selector::parse(css).unwrap())
        .find_map(|sel| doc.select(&sel).next());

    let Some(el) = el else {
        return String::new();
    };
    let raw = match el.value().attr("content").filter(|c| !c.is_empty()) {
        Some(content) => content.to_string(),
        None => trimmed_text(el),
    };
    normalize_price(&raw)
}

/// Trimmed text of the first `<h1>`, or empty.
pub fn extract_first_h1(html: &str) -> String {
    first_h1(&Html::parse_document(html))
}

/// Normalized price from `#our_price_display`, preferring its `content`
/// attribute. Empty when the element is missing.
pub fn extract_detail_price(html: &str) -> String {
    detail_price(&Html::parse_document(html))
}

pub fn parse_detail(html: &str) -> DetailFields {
    let doc = Html::parse_document(html);
    DetailFields {
        h1: first_h1(&doc),
        detail_price: detail_price(&doc),
    }
}
