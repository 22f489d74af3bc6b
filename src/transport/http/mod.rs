pub mod router;
pub mod types;
pub mod handlers {
    pub mod auth;
    pub mod common;
    pub mod health;
    pub mod items;
    pub mod products;
}

pub use router::{create_items_router, create_shop_router, with_common_layers, ItemsApiDoc, ShopApiDoc};
pub use types::{ItemsState, ShopState};
