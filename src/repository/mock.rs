use mockall::mock;

use super::{CartStorage, CatalogReader, StorageResult};
use crate::domain::{
    cart::CartItem,
    product::{Category, Product},
};

mock! {
    pub CatalogReader {}

    impl CatalogReader for CatalogReader {
        fn list_all(&self) -> StorageResult<Vec<Product>>;
        fn get_by_id(&self, id: &str) -> StorageResult<Option<Product>>;
        fn list_featured(&self) -> StorageResult<Vec<Product>>;
        fn list_by_category(&self, category: Category) -> StorageResult<Vec<Product>>;
    }
}

mock! {
    pub CartStorage {}

    impl CartStorage for CartStorage {
        fn load_cart(&self, user_id: &str) -> StorageResult<Vec<CartItem>>;
        fn save_cart(&self, user_id: &str, items: &[CartItem]) -> StorageResult<()>;
    }
}
