use serde::{Deserialize, Serialize};

use crate::domain::product::{Category, PRICE_UNBOUNDED, Product, ProductFilters, SortOption};
use crate::repository::{CatalogReader, StorageResult};
use crate::services::filters;

/// Number of related products shown next to a product.
pub const RELATED_PRODUCTS_LIMIT: usize = 4;

/// Query parameters accepted by the products listing.
///
/// Every value is kept as raw text; anything that cannot be understood falls
/// back to its default when converted into [`ProductFilters`].
#[derive(Debug, Default, Deserialize, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ProductsQuery {
    pub category: Option<String>,
    pub search: Option<String>,
    pub min_price: Option<String>,
    pub max_price: Option<String>,
    pub in_stock: Option<String>,
    pub sort: Option<String>,
}

impl ProductsQuery {
    /// Parse a URL query string such as `category=Books&sort=price-asc`.
    pub fn parse(query_string: &str) -> Self {
        let query_string = query_string.trim_start_matches('?');
        match serde_qs::from_str::<ProductsQuery>(query_string) {
            Ok(query) => query,
            Err(err) => {
                log::debug!("Ignoring malformed products query `{query_string}`: {err}");
                Self::default()
            }
        }
    }

    /// Convert the raw parameters into filters, substituting defaults.
    pub fn into_filters(self) -> ProductFilters {
        let category = self
            .category
            .as_deref()
            .map(str::trim)
            .filter(|value| !value.is_empty() && !value.eq_ignore_ascii_case("all"))
            .and_then(|value| match value.parse::<Category>() {
                Ok(category) => Some(category),
                Err(()) => {
                    log::debug!("Ignoring unknown category `{value}`");
                    None
                }
            });

        let min_price_cents = self
            .min_price
            .as_deref()
            .and_then(parse_price_cents)
            .unwrap_or(0);

        let max_price_cents = match self.max_price.as_deref().and_then(parse_price_cents) {
            Some(0) | None => PRICE_UNBOUNDED,
            Some(value) => value,
        };

        let in_stock_only = self
            .in_stock
            .as_deref()
            .map(|value| matches!(value.trim().to_lowercase().as_str(), "1" | "true"))
            .unwrap_or(false);

        let sort = self
            .sort
            .as_deref()
            .and_then(|value| value.parse::<SortOption>().ok())
            .unwrap_or_default();

        ProductFilters {
            category,
            min_price_cents,
            max_price_cents,
            in_stock_only,
            search: self.search.unwrap_or_default(),
            sort,
        }
    }
}

/// Parse a non-negative decimal amount such as `29.99` into cents.
pub fn parse_price_cents(value: &str) -> Option<i64> {
    let amount = value.trim().parse::<f64>().ok()?;
    if !amount.is_finite() || amount < 0.0 {
        return None;
    }
    Some((amount * 100.0).round() as i64)
}

/// Data required to render the products listing.
#[derive(Debug, Serialize)]
pub struct ProductsPageData {
    pub products: Vec<Product>,
    /// Filters actually applied, echoed back to the filter controls.
    pub filters: ProductFilters,
    pub has_active_filters: bool,
    pub total: usize,
}

/// Loads the filtered and sorted products listing.
pub fn load_products_page<R>(catalog: &R, query: ProductsQuery) -> ProductsPageData
where
    R: CatalogReader + ?Sized,
{
    let filters = query.into_filters();
    let all = or_empty(catalog.list_all(), "list products");
    let products = filters::apply(&all, &filters);

    ProductsPageData {
        total: products.len(),
        has_active_filters: filters.has_active_filters(),
        products,
        filters,
    }
}

/// Data required to render a product detail page.
#[derive(Debug, Serialize)]
pub struct ProductDetailData {
    pub product: Product,
    /// Other products from the same category, in catalog order.
    pub related: Vec<Product>,
}

/// Loads a single product with related products; `None` when it does not exist.
pub fn load_product_detail<R>(catalog: &R, product_id: &str) -> Option<ProductDetailData>
where
    R: CatalogReader + ?Sized,
{
    let product = match catalog.get_by_id(product_id) {
        Ok(product) => product?,
        Err(err) => {
            log::error!("Failed to load product {product_id}: {err}");
            return None;
        }
    };

    let related = or_empty(catalog.list_by_category(product.category), "list related products")
        .into_iter()
        .filter(|candidate| candidate.id != product.id)
        .take(RELATED_PRODUCTS_LIMIT)
        .collect();

    Some(ProductDetailData { product, related })
}

/// Number of catalog products in a category.
#[derive(Debug, Serialize, Clone, PartialEq, Eq)]
pub struct CategorySummary {
    pub category: Category,
    pub product_count: usize,
}

/// Data required to render the home page.
#[derive(Debug, Serialize)]
pub struct HomePageData {
    pub featured: Vec<Product>,
    /// Every category, including empty ones, in display order.
    pub categories: Vec<CategorySummary>,
}

/// Loads featured products and the category overview.
pub fn load_home_page<R>(catalog: &R) -> HomePageData
where
    R: CatalogReader + ?Sized,
{
    let featured = or_empty(catalog.list_featured(), "list featured products");
    let all = or_empty(catalog.list_all(), "list products");

    let categories = Category::ALL
        .iter()
        .map(|category| CategorySummary {
            category: *category,
            product_count: all
                .iter()
                .filter(|product| product.category == *category)
                .count(),
        })
        .collect();

    HomePageData {
        featured,
        categories,
    }
}

fn or_empty(result: StorageResult<Vec<Product>>, action: &str) -> Vec<Product> {
    result.unwrap_or_else(|err| {
        log::error!("Failed to {action}: {err}");
        Vec::new()
    })
}
