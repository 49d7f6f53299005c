//! `stockyard-products` — product catalog records.

pub mod product;

pub use product::Product;
