//! Users and products for the shop API.

pub mod product;
pub mod user;

pub use product::{product_schema, NewProduct, Product};
pub use user::{NewUser, Role, User};
