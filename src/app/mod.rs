pub mod error;
pub mod item_service;
pub mod shop_service;

pub use error::{ItemError, ShopError};
pub use item_service::{EmptyListPolicy, ItemService};
pub use shop_service::{LoginOutcome, ShopService};
