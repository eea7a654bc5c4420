pub mod config;
pub mod domain;
pub mod forms;
pub mod models;
pub mod repository;
pub mod schema;
pub mod services;

/// Prefix of the per-user keys used by key-value cart storage.
pub const CART_STORAGE_PREFIX: &str = "ecomm-cart-";
