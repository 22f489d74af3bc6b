pub mod item_store;
pub mod shop;

pub use item_store::ItemStore;
