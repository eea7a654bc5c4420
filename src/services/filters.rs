//! Pure filtering and ordering of catalog products.

use feruca::Collator;

use crate::domain::product::{PRICE_UNBOUNDED, Product, ProductFilters, SortOption};

/// Narrow `products` by `filters` and order the result.
///
/// Stages run in a fixed order: category, minimum price, maximum price, stock,
/// text search. Price bounds are inclusive. All orderings are stable, so
/// products with equal keys keep their catalog order.
pub fn apply(products: &[Product], filters: &ProductFilters) -> Vec<Product> {
    let mut result: Vec<Product> = products.to_vec();

    if let Some(category) = filters.category {
        result.retain(|product| product.category == category);
    }

    if filters.min_price_cents > 0 {
        result.retain(|product| product.price_cents >= filters.min_price_cents);
    }

    if filters.max_price_cents < PRICE_UNBOUNDED {
        result.retain(|product| product.price_cents <= filters.max_price_cents);
    }

    if filters.in_stock_only {
        result.retain(|product| product.in_stock);
    }

    if !filters.search.trim().is_empty() {
        let term = filters.search.to_lowercase();
        result.retain(|product| matches_search(product, &term));
    }

    sort_products(&mut result, filters.sort);
    result
}

fn matches_search(product: &Product, term: &str) -> bool {
    product.name.to_lowercase().contains(term) || product.description.to_lowercase().contains(term)
}

fn sort_products(products: &mut [Product], sort: SortOption) {
    match sort {
        // No creation timestamp is tracked, catalog order stands in for recency.
        SortOption::Newest => {}
        SortOption::PriceAsc => products.sort_by_key(|product| product.price_cents),
        SortOption::PriceDesc => products.sort_by(|a, b| b.price_cents.cmp(&a.price_cents)),
        SortOption::Rating => products.sort_by(|a, b| b.rating.total_cmp(&a.rating)),
        SortOption::Name => {
            // Unicode Collation Algorithm with the root tailoring.
            let mut collator = Collator::default();
            products.sort_by(|a, b| collator.collate(a.name.as_str(), b.name.as_str()));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::product::{Category, NewProduct};
    use crate::repository::{CatalogReader, StaticCatalog};

    fn catalog() -> Vec<Product> {
        StaticCatalog::seeded().list_all().expect("seeded catalog")
    }

    fn prices(products: &[Product]) -> Vec<i64> {
        products.iter().map(|product| product.price_cents).collect()
    }

    fn ids(products: &[Product]) -> Vec<&str> {
        products.iter().map(|product| product.id.as_str()).collect()
    }

    fn fixture() -> Vec<Product> {
        vec![
            NewProduct::new("a", "Headphones", Category::Electronics, 12999).build(),
            NewProduct::new("b", "Shoes", Category::Sports, 8999).build(),
            NewProduct::new("c", "Lamp", Category::Home, 4599).build(),
            NewProduct::new("d", "T-Shirt", Category::Clothing, 2499).build(),
        ]
    }

    #[test]
    fn default_filters_return_catalog_unchanged() {
        let products = catalog();

        assert_eq!(apply(&products, &ProductFilters::new()), products);
    }

    #[test]
    fn price_window_keeps_products_inside_bounds() {
        let filters = ProductFilters::new()
            .min_price(3000)
            .max_price(10000)
            .sort(SortOption::PriceAsc);

        let result = apply(&fixture(), &filters);

        assert_eq!(prices(&result), vec![4599, 8999]);
    }

    #[test]
    fn price_bounds_are_inclusive() {
        let at_min = apply(&fixture(), &ProductFilters::new().min_price(4599));
        assert!(ids(&at_min).contains(&"c"));

        let at_max = apply(&fixture(), &ProductFilters::new().max_price(4599));
        assert_eq!(ids(&at_max), vec!["c", "d"]);

        let exact = apply(&fixture(), &ProductFilters::new().min_price(4599).max_price(4599));
        assert_eq!(ids(&exact), vec!["c"]);
    }

    #[test]
    fn non_positive_minimum_is_ignored() {
        let result = apply(&fixture(), &ProductFilters::new().min_price(-100));

        assert_eq!(result.len(), 4);
    }

    #[test]
    fn category_filter_keeps_only_that_category() {
        let result = apply(&catalog(), &ProductFilters::new().category(Category::Sports));

        assert_eq!(ids(&result), vec!["2", "10"]);
        assert!(result.iter().all(|product| product.category == Category::Sports));
    }

    #[test]
    fn in_stock_filter_drops_unavailable_products() {
        let mut products = fixture();
        products[1].in_stock = false;

        let result = apply(&products, &ProductFilters::new().in_stock_only());

        assert_eq!(ids(&result), vec!["a", "c", "d"]);
        assert!(result.iter().all(|product| product.in_stock));
    }

    #[test]
    fn search_matches_name_or_description_case_insensitively() {
        let by_name = apply(&catalog(), &ProductFilters::new().search("WATCH"));
        assert_eq!(ids(&by_name), vec!["9"]);

        let by_description = apply(&catalog(), &ProductFilters::new().search("bluetooth"));
        assert!(by_description.is_empty());

        let by_description = apply(&catalog(), &ProductFilters::new().search("battery"));
        assert_eq!(ids(&by_description), vec!["1"]);

        for product in apply(&catalog(), &ProductFilters::new().search("set")) {
            let term = "set";
            assert!(
                product.name.to_lowercase().contains(term)
                    || product.description.to_lowercase().contains(term)
            );
        }
    }

    #[test]
    fn blank_search_is_skipped() {
        let result = apply(&catalog(), &ProductFilters::new().search("   "));

        assert_eq!(result.len(), 10);
    }

    #[test]
    fn price_sorts_are_monotonic() {
        let ascending = apply(&catalog(), &ProductFilters::new().sort(SortOption::PriceAsc));
        assert!(ascending.windows(2).all(|w| w[0].price_cents <= w[1].price_cents));

        let descending = apply(&catalog(), &ProductFilters::new().sort(SortOption::PriceDesc));
        assert!(descending.windows(2).all(|w| w[0].price_cents >= w[1].price_cents));
    }

    #[test]
    fn rating_sort_is_descending_and_stable() {
        let result = apply(&catalog(), &ProductFilters::new().sort(SortOption::Rating));

        assert!(result.windows(2).all(|w| w[0].rating >= w[1].rating));
        assert_eq!(ids(&result)[..3], ["5", "3", "1"]);
        // Products rated 4.0 keep catalog order.
        let tied: Vec<&str> = result
            .iter()
            .filter(|product| product.rating == 4.0)
            .map(|product| product.id.as_str())
            .collect();
        assert_eq!(tied, vec!["4", "6", "7", "8", "10"]);
    }

    #[test]
    fn name_sort_ignores_case() {
        let products = vec![
            NewProduct::new("1", "banana", Category::Grocery, 100).build(),
            NewProduct::new("2", "Apple", Category::Grocery, 100).build(),
            NewProduct::new("3", "cherry", Category::Grocery, 100).build(),
        ];

        let result = apply(&products, &ProductFilters::new().sort(SortOption::Name));

        assert_eq!(ids(&result), vec!["2", "1", "3"]);
    }

    #[test]
    fn name_sort_collates_accented_letters_with_their_base() {
        let products = vec![
            NewProduct::new("z", "Zebra cake", Category::Grocery, 100).build(),
            NewProduct::new("e", "Éclair", Category::Grocery, 100).build(),
            NewProduct::new("a", "apple pie", Category::Grocery, 100).build(),
        ];

        let result = apply(&products, &ProductFilters::new().sort(SortOption::Name));

        assert_eq!(ids(&result), vec!["a", "e", "z"]);
    }

    #[test]
    fn name_sort_keeps_input_order_for_identical_names() {
        let products = vec![
            NewProduct::new("2", "Mug", Category::Home, 900).build(),
            NewProduct::new("1", "Mug", Category::Home, 100).build(),
        ];

        let result = apply(&products, &ProductFilters::new().sort(SortOption::Name));

        assert_eq!(ids(&result), vec!["2", "1"]);
    }

    #[test]
    fn equal_prices_keep_input_order() {
        let products = vec![
            NewProduct::new("x", "X", Category::Toys, 500).build(),
            NewProduct::new("y", "Y", Category::Toys, 100).build(),
            NewProduct::new("z", "Z", Category::Toys, 500).build(),
        ];

        let asc = apply(&products, &ProductFilters::new().sort(SortOption::PriceAsc));
        assert_eq!(ids(&asc), vec!["y", "x", "z"]);

        let desc = apply(&products, &ProductFilters::new().sort(SortOption::PriceDesc));
        assert_eq!(ids(&desc), vec!["x", "z", "y"]);
    }

    #[test]
    fn apply_is_idempotent_and_never_fabricates_products() {
        let products = catalog();
        let filters = ProductFilters::new()
            .min_price(2000)
            .search("e")
            .sort(SortOption::Name);

        let first = apply(&products, &filters);
        let second = apply(&products, &filters);

        assert_eq!(first, second);
        assert!(first.iter().all(|product| products.contains(product)));
        let mut unique = ids(&first);
        unique.sort();
        unique.dedup();
        assert_eq!(unique.len(), first.len());
    }
}
