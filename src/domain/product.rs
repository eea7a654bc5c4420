use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Upper price bound meaning "no maximum" when filtering.
pub const PRICE_UNBOUNDED: i64 = i64::MAX;

/// Fixed set of catalog categories.
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Category {
    Electronics,
    Clothing,
    Home,
    Books,
    Sports,
    Beauty,
    Toys,
    Grocery,
}

impl Category {
    /// All categories in display order.
    pub const ALL: [Category; 8] = [
        Category::Electronics,
        Category::Clothing,
        Category::Home,
        Category::Books,
        Category::Sports,
        Category::Beauty,
        Category::Toys,
        Category::Grocery,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Electronics => "Electronics",
            Category::Clothing => "Clothing",
            Category::Home => "Home",
            Category::Books => "Books",
            Category::Sports => "Sports",
            Category::Beauty => "Beauty",
            Category::Toys => "Toys",
            Category::Grocery => "Grocery",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Category {
    type Err = ();

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let value = value.trim();
        Category::ALL
            .iter()
            .copied()
            .find(|category| category.as_str().eq_ignore_ascii_case(value))
            .ok_or(())
    }
}

/// Single key/value entry of a product specification sheet.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct Specification {
    pub key: String,
    pub value: String,
}

/// Domain representation of a catalog product.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct Product {
    /// Unique identifier of the product.
    pub id: String,
    /// Human-readable name of the product.
    pub name: String,
    /// Longer description shown on detail views.
    pub description: String,
    /// Current price in the smallest currency unit (for example cents).
    pub price_cents: i64,
    /// Price before any discount; equals `price_cents` when not on sale.
    pub original_price_cents: i64,
    /// Category the product is listed under.
    pub category: Category,
    /// Ordered image references, the first one is the cover.
    pub images: Vec<String>,
    /// Average rating between 0.0 and 5.0.
    pub rating: f32,
    /// Number of reviews backing the rating.
    pub review_count: u32,
    /// Whether the product can currently be ordered.
    pub in_stock: bool,
    /// Whether the product is promoted on the home page.
    pub featured: bool,
    /// Ordered specification sheet.
    pub specifications: Vec<Specification>,
}

impl Product {
    /// Whether the product is discounted relative to its original price.
    pub fn is_on_sale(&self) -> bool {
        self.original_price_cents > self.price_cents
    }

    /// Discount relative to the original price, rounded down to whole percent.
    pub fn discount_percent(&self) -> u8 {
        if !self.is_on_sale() || self.original_price_cents <= 0 {
            return 0;
        }
        let saved = self.original_price_cents - self.price_cents;
        (saved * 100 / self.original_price_cents).clamp(0, 100) as u8
    }
}

/// Builder used to assemble catalog records with sensible defaults.
#[derive(Debug, Clone)]
pub struct NewProduct {
    pub id: String,
    pub name: String,
    pub description: String,
    pub price_cents: i64,
    pub original_price_cents: Option<i64>,
    pub category: Category,
    pub images: Vec<String>,
    pub rating: f32,
    pub review_count: u32,
    pub in_stock: bool,
    pub featured: bool,
    pub specifications: Vec<Specification>,
}

impl NewProduct {
    /// Start a product with the required fields; everything else is defaulted.
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        category: Category,
        price_cents: i64,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            description: String::new(),
            price_cents,
            original_price_cents: None,
            category,
            images: Vec::new(),
            rating: 4.0,
            review_count: 24,
            in_stock: true,
            featured: false,
            specifications: Vec::new(),
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Mark the product as discounted from `original_price_cents`.
    pub fn with_original_price(mut self, original_price_cents: i64) -> Self {
        self.original_price_cents = Some(original_price_cents);
        self
    }

    pub fn with_images<I, S>(mut self, images: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.images = images.into_iter().map(Into::into).collect();
        self
    }

    /// Set the rating, clamped to the 0.0 - 5.0 scale.
    pub fn with_rating(mut self, rating: f32, review_count: u32) -> Self {
        self.rating = rating.clamp(0.0, 5.0);
        self.review_count = review_count;
        self
    }

    pub fn in_stock(mut self, in_stock: bool) -> Self {
        self.in_stock = in_stock;
        self
    }

    pub fn featured(mut self) -> Self {
        self.featured = true;
        self
    }

    pub fn with_specification(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.specifications.push(Specification {
            key: key.into(),
            value: value.into(),
        });
        self
    }

    /// Finish the builder. The original price never drops below the price.
    pub fn build(self) -> Product {
        let original_price_cents = self
            .original_price_cents
            .unwrap_or(self.price_cents)
            .max(self.price_cents);

        Product {
            id: self.id,
            name: self.name,
            description: self.description,
            price_cents: self.price_cents,
            original_price_cents,
            category: self.category,
            images: self.images,
            rating: self.rating,
            review_count: self.review_count,
            in_stock: self.in_stock,
            featured: self.featured,
            specifications: self.specifications,
        }
    }
}

/// Ordering applied to a filtered product list.
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "kebab-case")]
pub enum SortOption {
    /// Catalog order.
    #[default]
    Newest,
    PriceAsc,
    PriceDesc,
    /// Highest rated first.
    Rating,
    /// Alphabetical by name.
    Name,
}

impl SortOption {
    pub fn as_str(&self) -> &'static str {
        match self {
            SortOption::Newest => "newest",
            SortOption::PriceAsc => "price-asc",
            SortOption::PriceDesc => "price-desc",
            SortOption::Rating => "rating",
            SortOption::Name => "name",
        }
    }
}

impl FromStr for SortOption {
    type Err = ();

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim() {
            "newest" => Ok(SortOption::Newest),
            "price-asc" => Ok(SortOption::PriceAsc),
            "price-desc" => Ok(SortOption::PriceDesc),
            "rating" => Ok(SortOption::Rating),
            "name" => Ok(SortOption::Name),
            _ => Err(()),
        }
    }
}

/// Query definition used to narrow and order the catalog.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct ProductFilters {
    /// Only products of this category; `None` means all categories.
    pub category: Option<Category>,
    /// Inclusive lower price bound, ignored when zero or below.
    pub min_price_cents: i64,
    /// Inclusive upper price bound, [`PRICE_UNBOUNDED`] disables it.
    pub max_price_cents: i64,
    /// Hide products that are out of stock.
    pub in_stock_only: bool,
    /// Case-insensitive term matched against name and description.
    pub search: String,
    /// Ordering of the result.
    pub sort: SortOption,
}

impl Default for ProductFilters {
    fn default() -> Self {
        Self::new()
    }
}

impl ProductFilters {
    /// Filters that keep the whole catalog in catalog order.
    pub fn new() -> Self {
        Self {
            category: None,
            min_price_cents: 0,
            max_price_cents: PRICE_UNBOUNDED,
            in_stock_only: false,
            search: String::new(),
            sort: SortOption::Newest,
        }
    }

    pub fn category(mut self, category: Category) -> Self {
        self.category = Some(category);
        self
    }

    pub fn min_price(mut self, min_price_cents: i64) -> Self {
        self.min_price_cents = min_price_cents;
        self
    }

    pub fn max_price(mut self, max_price_cents: i64) -> Self {
        self.max_price_cents = max_price_cents;
        self
    }

    pub fn in_stock_only(mut self) -> Self {
        self.in_stock_only = true;
        self
    }

    pub fn search(mut self, term: impl Into<String>) -> Self {
        self.search = term.into();
        self
    }

    pub fn sort(mut self, sort: SortOption) -> Self {
        self.sort = sort;
        self
    }

    /// Whether any criterion differs from the defaults.
    pub fn has_active_filters(&self) -> bool {
        self.category.is_some()
            || self.min_price_cents > 0
            || self.max_price_cents < PRICE_UNBOUNDED
            || self.in_stock_only
            || !self.search.trim().is_empty()
            || self.sort != SortOption::Newest
    }
}
