pub mod store;
pub mod cache;
