use std::collections::HashMap;

use serde::Serialize;

use crate::domain::cart::{CartItem, CartLine, CartSummary};
use crate::domain::product::Product;
use crate::forms::cart::{AddToCartForm, UpdateQuantityForm};
use crate::repository::{CartStorage, CatalogReader};
use crate::services::identity::IdentityProvider;
use crate::services::session::Session;
use crate::services::{ServiceError, ServiceResult};

/// Cart contents of the current user, persisted through a [`CartStorage`].
///
/// Only one user's items are held in memory at a time. Every change is written
/// back immediately; when the backend fails the store keeps working in memory
/// and stops persisting until the next user switch.
pub struct CartStore<S> {
    storage: S,
    user_id: Option<String>,
    items: Vec<CartItem>,
    persistent: bool,
}

impl<S: CartStorage> CartStore<S> {
    /// Create an anonymous, empty store.
    pub fn new(storage: S) -> Self {
        Self {
            storage,
            user_id: None,
            items: Vec::new(),
            persistent: true,
        }
    }

    /// Make `user_id` the active cart owner and load their saved items.
    pub fn switch_user(&mut self, user_id: Option<&str>) {
        self.items.clear();
        self.persistent = true;
        self.user_id = user_id.map(str::to_string);

        let Some(user_id) = user_id else {
            return;
        };

        match self.storage.load_cart(user_id) {
            Ok(items) => {
                log::debug!("Loaded {} cart items for {user_id}", items.len());
                self.items = items;
            }
            Err(err) => {
                log::warn!(
                    "Cart storage unavailable for {user_id}, using a session-only cart: {err}"
                );
                self.persistent = false;
            }
        }
    }

    pub fn user_id(&self) -> Option<&str> {
        self.user_id.as_deref()
    }

    pub fn items(&self) -> &[CartItem] {
        &self.items
    }

    /// Whether changes are still being written to storage.
    pub fn is_persistent(&self) -> bool {
        self.persistent
    }

    /// Add `quantity` units of a product, merging with an existing line.
    ///
    /// A merged line takes the new price snapshot. Does nothing when no user
    /// is active.
    pub fn add_item(
        &mut self,
        product_id: &str,
        quantity: i32,
        price_snapshot_cents: i64,
    ) -> ServiceResult<()> {
        let Some(user_id) = self.user_id.clone() else {
            return Ok(());
        };

        if quantity <= 0 {
            return Err(ServiceError::Form(format!(
                "quantity must be at least 1, got {quantity}"
            )));
        }

        match self
            .items
            .iter_mut()
            .find(|item| item.product_id == product_id)
        {
            Some(existing) => {
                existing.quantity = existing.quantity.saturating_add(quantity);
                existing.price_snapshot_cents = price_snapshot_cents;
            }
            None => self.items.push(CartItem::new(
                user_id,
                product_id,
                quantity,
                price_snapshot_cents,
            )),
        }

        self.persist();
        Ok(())
    }

    /// Set the quantity of a line; zero or below removes it.
    pub fn update_quantity(&mut self, item_id: &str, quantity: i32) {
        if quantity <= 0 {
            self.remove_item(item_id);
            return;
        }

        let Some(item) = self.items.iter_mut().find(|item| item.id == item_id) else {
            return;
        };
        item.quantity = quantity;
        self.persist();
    }

    pub fn remove_item(&mut self, item_id: &str) {
        let before = self.items.len();
        self.items.retain(|item| item.id != item_id);
        if self.items.len() != before {
            self.persist();
        }
    }

    pub fn get_item_by_product_id(&self, product_id: &str) -> Option<&CartItem> {
        self.items.iter().find(|item| item.product_id == product_id)
    }

    /// Total number of units in the cart.
    pub fn count(&self) -> i64 {
        self.items.iter().map(|item| i64::from(item.quantity)).sum()
    }

    pub fn subtotal_cents(&self) -> i64 {
        self.items.iter().map(CartItem::line_total_cents).sum()
    }

    fn persist(&mut self) {
        if !self.persistent {
            return;
        }
        let Some(user_id) = self.user_id.as_deref() else {
            return;
        };

        if let Err(err) = self.storage.save_cart(user_id, &self.items) {
            log::warn!("Failed to save cart for {user_id}, further changes stay in memory: {err}");
            self.persistent = false;
        }
    }
}

/// Data required to render the cart page.
#[derive(Debug, Serialize)]
pub struct CartPageData {
    /// Lines in cart order, including those whose product disappeared.
    pub lines: Vec<CartLine>,
    pub summary: CartSummary,
    pub count: i64,
    pub is_authenticated: bool,
}

/// Loads the cart page for the active user.
pub fn load_cart_page<S, R>(cart: &CartStore<S>, catalog: &R) -> CartPageData
where
    S: CartStorage,
    R: CatalogReader + ?Sized,
{
    let products = match catalog.list_all() {
        Ok(products) => products,
        Err(err) => {
            log::error!("Failed to load catalog for the cart page: {err}");
            Vec::new()
        }
    };
    let product_lookup: HashMap<&str, &Product> = products
        .iter()
        .map(|product| (product.id.as_str(), product))
        .collect();

    let lines = cart
        .items()
        .iter()
        .map(|item| CartLine {
            item: item.clone(),
            product: product_lookup
                .get(item.product_id.as_str())
                .map(|product| (*product).clone()),
        })
        .collect();

    CartPageData {
        lines,
        summary: CartSummary::from_items(cart.items()),
        count: cart.count(),
        is_authenticated: cart.user_id().is_some(),
    }
}

/// Adds a catalog product to the current user's cart at its current price.
pub fn add_to_cart<I, S, R>(
    session: &mut Session<I, S>,
    catalog: &R,
    form: AddToCartForm,
) -> ServiceResult<()>
where
    I: IdentityProvider,
    S: CartStorage,
    R: CatalogReader + ?Sized,
{
    let (product_id, quantity) = form
        .into_parts()
        .map_err(|err| ServiceError::Form(err.to_string()))?;

    let product = match catalog.get_by_id(&product_id) {
        Ok(Some(product)) => product,
        Ok(None) => return Err(ServiceError::NotFound),
        Err(err) => {
            log::error!("Failed to look up product {product_id}: {err}");
            return Err(ServiceError::NotFound);
        }
    };

    if !product.in_stock {
        return Err(ServiceError::Form(format!(
            "{} is out of stock",
            product.name
        )));
    }

    session
        .cart_mut()
        .add_item(&product.id, quantity, product.price_cents)
}

/// Applies a quantity change submitted from the cart page.
pub fn update_cart_item<I, S>(
    session: &mut Session<I, S>,
    form: UpdateQuantityForm,
) -> ServiceResult<()>
where
    I: IdentityProvider,
    S: CartStorage,
{
    let (item_id, quantity) = form
        .into_parts()
        .map_err(|err| ServiceError::Form(err.to_string()))?;
    session.cart_mut().update_quantity(&item_id, quantity);
    Ok(())
}

/// Removes a line from the current user's cart.
pub fn remove_cart_item<I, S>(session: &mut Session<I, S>, item_id: &str)
where
    I: IdentityProvider,
    S: CartStorage,
{
    session.cart_mut().remove_item(item_id);
}
