pub mod app;
pub mod crypto;
pub mod domain;
pub mod infra;
pub mod storage;
pub mod transport;

// Convenience re-exports (keeps call-sites clean)
pub use app::{EmptyListPolicy, ItemError, ItemService, ShopError, ShopService};
pub use domain::item::Item;
pub use storage::shop::{MemoryShopRepository, PgShopRepository, ShopRepository};
