//! Domain models for the cart.
//!
//! # Models
//!
//! - `ProductDetails` - Catalog record returned by `products/{id}`
//! - `Product` - A cart entry: catalog record plus the selected amount
//! - `Stock` - Inventory record returned by `stock/{id}`

pub mod product;
pub mod stock;

pub use product::{Product, ProductDetails};
pub use stock::Stock;
