use std::collections::HashMap;

use chrono::NaiveDateTime;
use diesel::prelude::*;
use pushkind_common::repository::errors::{RepositoryError, RepositoryResult};

use crate::{
    domain::cart::CartItem as DomainCartItem,
    models::cart_item::{CartItem as DbCartItem, NewCartItem as DbNewCartItem},
    repository::{CartStorage, DieselRepository, StorageResult},
};

impl DieselRepository {
    fn load_cart_rows(&self, user_id: &str) -> RepositoryResult<Vec<DomainCartItem>> {
        use crate::schema::cart_items;

        let mut conn = self.conn()?;
        let rows = cart_items::table
            .filter(cart_items::user_id.eq(user_id))
            .order(cart_items::position.asc())
            .load::<DbCartItem>(&mut conn)?;

        Ok(rows.into_iter().map(DomainCartItem::from).collect())
    }

    fn replace_cart_rows(&self, user_id: &str, items: &[DomainCartItem]) -> RepositoryResult<()> {
        use crate::schema::cart_items;

        let mut conn = self.conn()?;
        let now = chrono::Local::now().naive_utc();

        conn.transaction::<(), RepositoryError, _>(|conn| {
            // Lines that survive a save keep their creation time.
            let created: HashMap<String, NaiveDateTime> = cart_items::table
                .filter(cart_items::user_id.eq(user_id))
                .select((cart_items::id, cart_items::created_at))
                .load::<(String, NaiveDateTime)>(conn)?
                .into_iter()
                .collect();

            diesel::delete(cart_items::table.filter(cart_items::user_id.eq(user_id)))
                .execute(conn)?;

            if !items.is_empty() {
                let payload: Vec<DbNewCartItem> = items
                    .iter()
                    .zip(0..)
                    .map(|(item, position)| {
                        let created_at = created.get(&item.id).copied().unwrap_or(now);
                        DbNewCartItem::from_domain(user_id, position, item, created_at, now)
                    })
                    .collect();

                diesel::insert_into(cart_items::table)
                    .values(&payload)
                    .execute(conn)?;
            }

            Ok(())
        })
    }
}

impl CartStorage for DieselRepository {
    fn load_cart(&self, user_id: &str) -> StorageResult<Vec<DomainCartItem>> {
        Ok(self.load_cart_rows(user_id)?)
    }

    fn save_cart(&self, user_id: &str, items: &[DomainCartItem]) -> StorageResult<()> {
        Ok(self.replace_cart_rows(user_id, items)?)
    }
}
