//! Configuration module

mod store;

pub use store::StoreConfig;
