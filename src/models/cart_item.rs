use chrono::NaiveDateTime;
use diesel::prelude::*;

use crate::domain::cart::CartItem as DomainCartItem;

#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = crate::schema::cart_items)]
pub struct CartItem {
    pub id: String,
    pub user_id: String,
    pub product_id: String,
    pub quantity: i32,
    pub price_snapshot_cents: i64,
    pub position: i32,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

#[derive(Insertable)]
#[diesel(table_name = crate::schema::cart_items)]
pub struct NewCartItem<'a> {
    pub id: &'a str,
    pub user_id: &'a str,
    pub product_id: &'a str,
    pub quantity: i32,
    pub price_snapshot_cents: i64,
    pub position: i32,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

impl<'a> NewCartItem<'a> {
    /// Row for `item` stored in `user_id`'s cart at `position`.
    pub fn from_domain(
        user_id: &'a str,
        position: i32,
        item: &'a DomainCartItem,
        created_at: NaiveDateTime,
        updated_at: NaiveDateTime,
    ) -> Self {
        Self {
            id: item.id.as_str(),
            user_id,
            product_id: item.product_id.as_str(),
            quantity: item.quantity,
            price_snapshot_cents: item.price_snapshot_cents,
            position,
            created_at,
            updated_at,
        }
    }
}

impl From<CartItem> for DomainCartItem {
    fn from(value: CartItem) -> Self {
        Self {
            id: value.id,
            user_id: value.user_id,
            product_id: value.product_id,
            quantity: value.quantity,
            price_snapshot_cents: value.price_snapshot_cents,
        }
    }
}
