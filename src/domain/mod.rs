pub mod item;
pub mod schema;
pub mod shop;
