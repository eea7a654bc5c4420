use serde::Deserialize;
use thiserror::Error;
use validator::{Validate, ValidationErrors};

/// Largest quantity accepted in a single add-to-cart submission.
const MAX_ADD_QUANTITY: i32 = 99;

/// Result type returned by the cart form helpers.
pub type CartFormResult<T> = Result<T, CartFormError>;

/// Errors that can occur while processing cart forms.
#[derive(Debug, Error)]
pub enum CartFormError {
    /// Validation failures from the `validator` crate.
    #[error("validation failed: {0}")]
    Validation(#[from] ValidationErrors),
    /// The referenced identifier is blank after trimming.
    #[error("missing identifier")]
    MissingId,
}

/// Payload emitted by the "Add to cart" buttons.
#[derive(Debug, Deserialize, Validate)]
pub struct AddToCartForm {
    pub product_id: String,
    /// Units to add; defaults to one when omitted.
    #[serde(default = "default_quantity")]
    #[validate(range(min = 1, max = MAX_ADD_QUANTITY))]
    pub quantity: i32,
}

fn default_quantity() -> i32 {
    1
}

impl AddToCartForm {
    pub fn new(product_id: impl Into<String>, quantity: i32) -> Self {
        Self {
            product_id: product_id.into(),
            quantity,
        }
    }

    /// Validate and return the trimmed product id with the quantity.
    pub fn into_parts(self) -> CartFormResult<(String, i32)> {
        self.validate()?;
        let product_id = self.product_id.trim().to_string();
        if product_id.is_empty() {
            return Err(CartFormError::MissingId);
        }
        Ok((product_id, self.quantity))
    }
}

/// Payload emitted by the quantity stepper on the cart page.
///
/// Any quantity is accepted; zero or below removes the line.
#[derive(Debug, Deserialize)]
pub struct UpdateQuantityForm {
    pub item_id: String,
    pub quantity: i32,
}

impl UpdateQuantityForm {
    pub fn new(item_id: impl Into<String>, quantity: i32) -> Self {
        Self {
            item_id: item_id.into(),
            quantity,
        }
    }

    pub fn into_parts(self) -> CartFormResult<(String, i32)> {
        let item_id = self.item_id.trim().to_string();
        if item_id.is_empty() {
            return Err(CartFormError::MissingId);
        }
        Ok((item_id, self.quantity))
    }
}
