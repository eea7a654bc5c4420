pub use pushkind_common::services::errors::{ServiceError, ServiceResult};

pub mod cart;
pub mod filters;
pub mod identity;
pub mod products;
pub mod session;
