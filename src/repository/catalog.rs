use lazy_static::lazy_static;

use crate::domain::product::{Category, NewProduct, Product};
use crate::repository::{CatalogReader, StorageResult};

const SAMPLE_IMAGES: [&str; 3] = [
    "https://images.unsplash.com/photo-1505740420928-5e560c06d30e?w=400",
    "https://images.unsplash.com/photo-1523275335684-37898b6baf30?w=400",
    "https://images.unsplash.com/photo-1572635196237-14b3f281503f?w=400",
];

lazy_static! {
    static ref MOCK_PRODUCTS: Vec<Product> = seed_products();
}

fn seed_products() -> Vec<Product> {
    let product = |id: &str, name: &str, category: Category, price_cents: i64| {
        NewProduct::new(id, name, category, price_cents).with_images(SAMPLE_IMAGES)
    };

    vec![
        product("1", "Wireless Headphones", Category::Electronics, 12999)
            .with_description("Noise-cancelling over-ear headphones with 30h battery.")
            .with_original_price(17999)
            .with_rating(4.5, 312)
            .featured()
            .with_specification("Battery", "30h")
            .with_specification("Connectivity", "Bluetooth 5.2")
            .build(),
        product("2", "Running Shoes", Category::Sports, 8999)
            .with_description("Lightweight mesh running shoes for daily training.")
            .with_rating(4.2, 156)
            .featured()
            .build(),
        product("3", "Desk Lamp", Category::Home, 4599)
            .with_description("LED desk lamp with adjustable brightness and color temperature.")
            .with_rating(4.7, 24)
            .featured()
            .build(),
        product("4", "Cotton T-Shirt", Category::Clothing, 2499)
            .with_description("Organic cotton crew neck t-shirt. Available in multiple colors.")
            .build(),
        product("5", "Programming Guide", Category::Books, 3999)
            .with_description("Comprehensive guide to modern TypeScript and React.")
            .with_rating(4.8, 24)
            .build(),
        product("6", "Skincare Set", Category::Beauty, 5999)
            .with_description("Cleanser, serum, and moisturizer for daily routine.")
            .build(),
        product("7", "Building Blocks Set", Category::Toys, 3499)
            .with_description("200-piece construction set for ages 6+.")
            .build(),
        product("8", "Organic Coffee", Category::Grocery, 1499)
            .with_description("Whole bean organic coffee, 1kg.")
            .build(),
        product("9", "Smart Watch", Category::Electronics, 19999)
            .with_description("Fitness tracking, heart rate, and notifications.")
            .with_original_price(24999)
            .with_rating(4.4, 24)
            .featured()
            .build(),
        product("10", "Yoga Mat", Category::Sports, 2999)
            .with_description("Non-slip eco-friendly yoga mat with carrying strap.")
            .build(),
    ]
}

/// In-process catalog backed by a fixed list of products.
#[derive(Debug, Clone)]
pub struct StaticCatalog {
    products: Vec<Product>,
}

impl Default for StaticCatalog {
    fn default() -> Self {
        Self::seeded()
    }
}

impl StaticCatalog {
    /// Catalog serving exactly `products`, in the given order.
    pub fn new(products: Vec<Product>) -> Self {
        Self { products }
    }

    /// Catalog serving the built-in demo products.
    pub fn seeded() -> Self {
        Self::new(MOCK_PRODUCTS.clone())
    }
}

impl CatalogReader for StaticCatalog {
    fn list_all(&self) -> StorageResult<Vec<Product>> {
        Ok(self.products.clone())
    }

    fn get_by_id(&self, id: &str) -> StorageResult<Option<Product>> {
        Ok(self.products.iter().find(|product| product.id == id).cloned())
    }

    fn list_featured(&self) -> StorageResult<Vec<Product>> {
        Ok(self
            .products
            .iter()
            .filter(|product| product.featured)
            .cloned()
            .collect())
    }

    fn list_by_category(&self, category: Category) -> StorageResult<Vec<Product>> {
        Ok(self
            .products
            .iter()
            .filter(|product| product.category == category)
            .cloned()
            .collect())
    }
}
